use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::bits::BitVector;
use crate::error::{MultiplierError, MultiplierResult};

/// Operand widths the visualized circuit can be built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BitWidthMode {
    TwoBit,
    FourBit,
}

impl BitWidthMode {
    pub const ALL: [BitWidthMode; 2] = [BitWidthMode::TwoBit, BitWidthMode::FourBit];

    pub fn from_operand_bits(bits: usize) -> MultiplierResult<Self> {
        match bits {
            2 => Ok(Self::TwoBit),
            4 => Ok(Self::FourBit),
            other => Err(MultiplierError::InvalidMode(format!("{other}-bit"))),
        }
    }

    pub fn operand_bits(self) -> usize {
        match self {
            Self::TwoBit => 2,
            Self::FourBit => 4,
        }
    }

    pub fn product_bits(self) -> usize {
        2 * self.operand_bits()
    }

    pub fn max_operand_value(self) -> u64 {
        (1u64 << self.operand_bits()) - 1
    }

    /// Operands loaded when the mode is switched: `1 × 2` and `5 × 3`.
    pub fn default_operands(self) -> (u64, u64) {
        match self {
            Self::TwoBit => (1, 2),
            Self::FourBit => (5, 3),
        }
    }

    /// Caller-side clamp into `[0, max_operand_value]`. The generator itself
    /// never clamps.
    pub fn clamp_operand(self, raw: i64) -> u64 {
        raw.clamp(0, self.max_operand_value() as i64) as u64
    }
}

impl fmt::Display for BitWidthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.operand_bits())
    }
}

impl FromStr for BitWidthMode {
    type Err = MultiplierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "2" | "2-bit" | "2bit" | "two" => Ok(Self::TwoBit),
            "4" | "4-bit" | "4bit" | "four" => Ok(Self::FourBit),
            _ => Err(MultiplierError::InvalidMode(s.to_string())),
        }
    }
}

/// What the circuit just did; renderers key their highlighting off this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum Stage {
    Initialization = 0,
    Add = 1,
    Shift = 2,
    Complete = 3,
}

/// One instant of the multiplier datapath.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterSnapshot {
    pub description: String,
    pub multiplicand: BitVector,
    pub multiplier: BitVector,
    pub product: BitVector,
    pub accumulator: BitVector,
    /// Adder carry-out latch. Only an overflowing `Add` sets it.
    pub carry: u8,
    pub stage: Stage,
    /// Position in `product` (as loaded) of the multiplier bit tested by an `Add`.
    pub active_bit_index: Option<usize>,
}

impl RegisterSnapshot {
    /// Maps `active_bit_index` onto the `multiplier` register's own positions.
    pub fn active_multiplier_index(&self) -> Option<usize> {
        let offset = self.product.len().saturating_sub(self.multiplier.len());
        self.active_bit_index.and_then(|idx| idx.checked_sub(offset))
    }
}

/// The full, ordered output of one generator invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Run {
    pub multiplicand_value: u64,
    pub multiplier_value: u64,
    pub operand_bits: usize,
    pub snapshots: Vec<RegisterSnapshot>,
}

impl Run {
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RegisterSnapshot> {
        self.snapshots.get(index)
    }

    pub fn first(&self) -> Option<&RegisterSnapshot> {
        self.snapshots.first()
    }

    pub fn last(&self) -> Option<&RegisterSnapshot> {
        self.snapshots.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RegisterSnapshot> {
        self.snapshots.iter()
    }

    pub fn product_bits(&self) -> usize {
        2 * self.operand_bits
    }

    /// The settled product register read as an unsigned integer.
    pub fn final_product(&self) -> Option<u64> {
        self.last()
            .filter(|snap| snap.stage == Stage::Complete)
            .map(|snap| snap.product.to_value())
    }
}

impl std::ops::Index<usize> for Run {
    type Output = RegisterSnapshot;

    fn index(&self, index: usize) -> &Self::Output {
        &self.snapshots[index]
    }
}

impl<'a> IntoIterator for &'a Run {
    type Item = &'a RegisterSnapshot;
    type IntoIter = std::slice::Iter<'a, RegisterSnapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}
