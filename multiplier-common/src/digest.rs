use sha3::{Digest, Keccak256};

use crate::types::{RegisterSnapshot, Run};

/// Domain tag prefixed to every run encoding.
pub const RUN_DOMAIN: &[u8] = b"PIPO-RUN";

/// Marker written in place of `active_bit_index` when a snapshot has none.
pub const NO_ACTIVE_BIT: u8 = 0xFF;

/// Computes `keccak256` over concatenated byte slices.
pub fn keccak256(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// Canonical bytes of one snapshot:
/// `stage ‖ carry ‖ active ‖ product bits ‖ accumulator bits ‖ len(description) ‖ description`.
/// Register bits are written one byte per bit, MSB first.
pub fn encode_snapshot(snap: &RegisterSnapshot) -> Vec<u8> {
    let active = snap
        .active_bit_index
        .and_then(|idx| u8::try_from(idx).ok())
        .unwrap_or(NO_ACTIVE_BIT);
    let description = snap.description.as_bytes();

    let mut out = Vec::with_capacity(
        3 + snap.product.len() + snap.accumulator.len() + 4 + description.len(),
    );
    out.push(snap.stage as u8);
    out.push(snap.carry);
    out.push(active);
    out.extend_from_slice(snap.product.as_slice());
    out.extend_from_slice(snap.accumulator.as_slice());
    out.extend_from_slice(&(description.len() as u32).to_be_bytes());
    out.extend_from_slice(description);
    out
}

/// Fingerprint of a whole run:
/// `keccak256(RUN_DOMAIN ‖ operand_bits ‖ multiplicand ‖ multiplier ‖ snapshots...)`,
/// integers as big-endian `u64`.
pub fn run_digest(run: &Run) -> [u8; 32] {
    let header = [
        (run.operand_bits as u64).to_be_bytes(),
        run.multiplicand_value.to_be_bytes(),
        run.multiplier_value.to_be_bytes(),
    ]
    .concat();
    let encoded: Vec<Vec<u8>> = run.iter().map(encode_snapshot).collect();

    let mut parts: Vec<&[u8]> = Vec::with_capacity(2 + encoded.len());
    parts.push(RUN_DOMAIN);
    parts.push(&header);
    parts.extend(encoded.iter().map(Vec::as_slice));
    keccak256(&parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate;
    use crate::types::BitWidthMode;

    #[test]
    fn snapshot_encoding_layout() {
        let run = generate(3, 3, BitWidthMode::TwoBit).unwrap();
        let add = encode_snapshot(&run[1]);
        assert_eq!(&add[..3], &[1, 0, 3]);
        assert_eq!(&add[3..7], &[0, 0, 1, 1]);
        assert_eq!(&add[7..9], &[1, 1]);
        assert_eq!(&add[9..13], &28u32.to_be_bytes());
        assert_eq!(&add[13..], b"Bit 1 is 1: Add multiplicand");

        let init = encode_snapshot(&run[0]);
        assert_eq!(init[2], NO_ACTIVE_BIT);
    }

    #[test]
    fn digest_separates_operands() {
        let a = run_digest(&generate(2, 3, BitWidthMode::TwoBit).unwrap());
        let b = run_digest(&generate(3, 2, BitWidthMode::TwoBit).unwrap());
        assert_ne!(a, b);
    }
}
