use tracing::{debug, trace};

use crate::bits::BitVector;
use crate::error::{MultiplierError, MultiplierResult};
use crate::types::{BitWidthMode, RegisterSnapshot, Run, Stage};

/// Widest operand the width-generic generator accepts; the product then fills a `u64`.
pub const MAX_OPERAND_BITS: usize = 32;

/// Working registers of the shift-and-add datapath.
///
/// Layout:
/// - `product` is the `2n`-bit PIPO register, loaded as `0^n ‖ multiplier`.
/// - `accumulator` is the adder's `n`-bit working copy of the product's high half.
/// - `carry` latches the adder's carry-out until the next shift consumes it.
///
/// Outside an `Add` step, `accumulator` always equals the high half of `product`.
struct Datapath {
    multiplicand: BitVector,
    multiplier: BitVector,
    accumulator: BitVector,
    product: BitVector,
    carry: u8,
}

impl Datapath {
    fn load(multiplicand: BitVector, multiplier: BitVector) -> Self {
        let operand_bits = multiplier.len();
        let product = BitVector::zeros(operand_bits).concat(&multiplier);
        Self {
            multiplicand,
            multiplier,
            accumulator: BitVector::zeros(operand_bits),
            product,
            carry: 0,
        }
    }

    fn operand_bits(&self) -> usize {
        self.multiplier.len()
    }

    /// The multiplier bit waiting at the product register's LSB.
    fn tested_bit(&self) -> u8 {
        self.product.lsb().unwrap_or(0)
    }

    fn add(&mut self) {
        self.carry = self.accumulator.add_assign_with_carry(&self.multiplicand);
    }

    /// Shifts `carry ‖ accumulator ‖ product[n..]` right by one into the product
    /// register, then reloads the accumulator from the new high half.
    fn shift(&mut self) {
        let n = self.operand_bits();
        let (_, low) = self.product.split_at(n);
        let mut combined = self.accumulator.concat(&low);
        combined.shift_right(self.carry);
        self.product = combined;
        self.accumulator = self.product.split_at(n).0;
        self.carry = 0;
    }

    fn snapshot(
        &self,
        stage: Stage,
        description: String,
        active_bit_index: Option<usize>,
    ) -> RegisterSnapshot {
        RegisterSnapshot {
            description,
            multiplicand: self.multiplicand.clone(),
            multiplier: self.multiplier.clone(),
            product: self.product.clone(),
            accumulator: self.accumulator.clone(),
            carry: self.carry,
            stage,
            active_bit_index,
        }
    }
}

fn check_operand(name: &'static str, value: u64, max: u64) -> MultiplierResult<()> {
    if value > max {
        return Err(MultiplierError::InvalidOperand { name, value, max });
    }
    Ok(())
}

/// Generates the register trace of `multiplicand × multiplier` in one of the
/// two supported circuit widths.
pub fn generate(multiplicand: u64, multiplier: u64, mode: BitWidthMode) -> MultiplierResult<Run> {
    generate_with_width(multiplicand, multiplier, mode.operand_bits())
}

/// Width-generic shift-and-add trace, LSB of the multiplier first.
///
/// Emits `Initialization`, then per multiplier bit an optional `Add` (bit was 1)
/// followed by a `Shift`, then `Complete`. Out-of-range operands are rejected
/// before any register is built; the generator never clamps.
pub fn generate_with_width(
    multiplicand: u64,
    multiplier: u64,
    operand_bits: usize,
) -> MultiplierResult<Run> {
    if operand_bits == 0 || operand_bits > MAX_OPERAND_BITS {
        return Err(MultiplierError::InvalidMode(format!("{operand_bits}-bit")));
    }
    let max = (1u64 << operand_bits) - 1;
    check_operand("multiplicand", multiplicand, max)?;
    check_operand("multiplier", multiplier, max)?;

    let product_bits = 2 * operand_bits;
    let mut dp = Datapath::load(
        BitVector::from_value(multiplicand, operand_bits)?,
        BitVector::from_value(multiplier, operand_bits)?,
    );

    let mut snapshots = Vec::with_capacity(product_bits + 2);
    let mut emit = |snap: RegisterSnapshot| {
        trace!(
            stage = ?snap.stage,
            product = %snap.product,
            accumulator = %snap.accumulator,
            carry = snap.carry,
            "{}",
            snap.description
        );
        snapshots.push(snap);
    };

    emit(dp.snapshot(Stage::Initialization, "Initialize registers".to_string(), None));

    for i in 0..operand_bits {
        let current_bit_pos = product_bits - 1 - i;
        // After `i` shifts, multiplier bit `i` has reached the product LSB.
        debug_assert_eq!(
            Some(dp.tested_bit()),
            dp.multiplier.bit(operand_bits - 1 - i)
        );

        if dp.tested_bit() == 1 {
            dp.add();
            emit(dp.snapshot(
                Stage::Add,
                format!("Bit {} is 1: Add multiplicand", i + 1),
                Some(current_bit_pos),
            ));
        }

        dp.shift();
        emit(dp.snapshot(Stage::Shift, format!("Shift right (step {})", i + 1), None));
    }

    // The settled result lives entirely in the product register.
    dp.accumulator = BitVector::zeros(operand_bits);
    emit(dp.snapshot(Stage::Complete, "Multiplication complete!".to_string(), None));

    let run = Run {
        multiplicand_value: multiplicand,
        multiplier_value: multiplier,
        operand_bits,
        snapshots,
    };
    debug!(
        multiplicand,
        multiplier,
        operand_bits,
        steps = run.len(),
        product = run.final_product(),
        "generated shift-and-add run"
    );
    Ok(run)
}
