use std::fmt;

use serde::Serialize;

use crate::error::{MultiplierError, MultiplierResult};

/// Fixed-length register contents, most-significant bit first.
/// Position 0 is the MSB and position `len - 1` is the LSB.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BitVector {
    bits: Vec<u8>,
}

impl BitVector {
    pub fn zeros(width: usize) -> Self {
        Self {
            bits: vec![0; width],
        }
    }

    /// MSB-first decomposition of `value` into exactly `width` bits.
    pub fn from_value(value: u64, width: usize) -> MultiplierResult<Self> {
        if width < 64 && value >> width != 0 {
            return Err(MultiplierError::ValueTooWide { value, width });
        }
        let bits = (0..width)
            .map(|pos| {
                let shift = width - 1 - pos;
                if shift >= 64 { 0 } else { ((value >> shift) & 1) as u8 }
            })
            .collect();
        Ok(Self { bits })
    }

    pub fn from_bits(bits: &[u8]) -> MultiplierResult<Self> {
        if let Some((index, value)) = bits.iter().enumerate().find(|(_, b)| **b > 1) {
            return Err(MultiplierError::InvalidBit {
                index,
                value: *value,
            });
        }
        Ok(Self {
            bits: bits.to_vec(),
        })
    }

    /// Reads the register back as an unsigned integer. Bits above position 63
    /// from the LSB fall off the top.
    pub fn to_value(&self) -> u64 {
        self.bits
            .iter()
            .fold(0u64, |acc, bit| (acc << 1) | u64::from(*bit))
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bit(&self, pos: usize) -> Option<u8> {
        self.bits.get(pos).copied()
    }

    pub fn lsb(&self) -> Option<u8> {
        self.bits.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.bits.iter().copied()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bits
    }

    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|b| **b == 1).count()
    }

    /// `self ‖ low`: `self` occupies the high-order positions.
    pub fn concat(&self, low: &BitVector) -> BitVector {
        let mut bits = Vec::with_capacity(self.len() + low.len());
        bits.extend_from_slice(&self.bits);
        bits.extend_from_slice(&low.bits);
        BitVector { bits }
    }

    /// Splits into `(high, low)` where `high` holds the first `mid` positions.
    pub fn split_at(&self, mid: usize) -> (BitVector, BitVector) {
        let (high, low) = self.bits.split_at(mid.min(self.len()));
        (
            BitVector {
                bits: high.to_vec(),
            },
            BitVector { bits: low.to_vec() },
        )
    }

    /// Ripple-carry addition of `addend` into `self`, LSB-aligned.
    /// A narrower addend is zero-extended; bits of a wider one above `self.len()`
    /// are not added. Carries run from position `len - 1` up to position 0; the
    /// carry out of position 0 is returned instead of widening the register.
    pub fn add_assign_with_carry(&mut self, addend: &BitVector) -> u8 {
        let mut carry = 0u8;
        for pos in (0..self.len()).rev() {
            let a = self.bits[pos];
            let b = (pos + addend.len())
                .checked_sub(self.len())
                .and_then(|idx| addend.bits.get(idx))
                .copied()
                .unwrap_or(0);
            // Full adder.
            self.bits[pos] = a ^ b ^ carry;
            carry = (a & b) | (carry & (a ^ b));
        }
        carry
    }

    /// Shifts every bit one position toward the LSB. `fill` enters at the MSB;
    /// the old LSB is returned.
    pub fn shift_right(&mut self, fill: u8) -> u8 {
        let Some(out) = self.bits.pop() else {
            return fill & 1;
        };
        self.bits.insert(0, fill & 1);
        out
    }
}

impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            f.write_str(if *bit == 1 { "1" } else { "0" })?;
        }
        Ok(())
    }
}
