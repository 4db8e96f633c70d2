//! Pinned vectors for the multiplier trace.
//! If any expected digest changes, the emitted register sequence has changed.

use multiplier_common::digest::run_digest;
use multiplier_common::{BitWidthMode, Stage, generate};

fn final_product_bits(a: u64, b: u64, mode: BitWidthMode) -> String {
    let run = generate(a, b, mode).unwrap();
    let last = run.last().unwrap();
    assert_eq!(last.stage, Stage::Complete);
    last.product.to_string()
}

#[test]
fn boundary_products() {
    assert_eq!(final_product_bits(0, 0, BitWidthMode::TwoBit), "0000");
    assert_eq!(final_product_bits(3, 3, BitWidthMode::TwoBit), "1001");
    assert_eq!(final_product_bits(15, 15, BitWidthMode::FourBit), "11100001");
    assert_eq!(final_product_bits(5, 3, BitWidthMode::FourBit), "00001111");
}

#[test]
fn fifteen_squared_register_trace() {
    let run = generate(15, 15, BitWidthMode::FourBit).unwrap();
    let rows: Vec<String> = run
        .iter()
        .map(|s| format!("{:?} {} {} {}", s.stage, s.product, s.accumulator, s.carry))
        .collect();
    assert_eq!(
        rows,
        vec![
            "Initialization 00001111 0000 0",
            "Add 00001111 1111 0",
            "Shift 01111111 0111 0",
            "Add 01111111 0110 1",
            "Shift 10110111 1011 0",
            "Add 10110111 1010 1",
            "Shift 11010011 1101 0",
            "Add 11010011 1100 1",
            "Shift 11100001 1110 0",
            "Complete 11100001 0000 0",
        ]
    );
}

#[test]
fn run_digests_are_stable() {
    let vectors = [
        (0, 0, BitWidthMode::TwoBit, "516fd4eacfee32b7c956737a29b3dfb32b611466627a8e4f1b277889ae069170"),
        (3, 3, BitWidthMode::TwoBit, "ac95aeee3c4566a9309da1d5d841cdeb7de208cdf23d0c13f2d43cbe822812a2"),
        (1, 2, BitWidthMode::TwoBit, "57e1accebbf529f1200d82afbc481e06a021744718ac927dae4bdf73df2c0c7c"),
        (15, 15, BitWidthMode::FourBit, "2bef655737d6736d665df0288babb48bb9ef183a8b468056d14abaabdd5e64d4"),
        (5, 3, BitWidthMode::FourBit, "714c30d5364c812820dd4830044cccb0db6d4c27fbf62ed9e76a25b78245738f"),
    ];
    for (a, b, mode, expected) in vectors {
        let run = generate(a, b, mode).unwrap();
        assert_eq!(hex::encode(run_digest(&run)), expected, "{a} x {b} ({mode})");
    }
}

#[test]
fn descriptions_follow_the_visualization_text() {
    let run = generate(1, 2, BitWidthMode::TwoBit).unwrap();
    let descriptions: Vec<&str> = run.iter().map(|s| s.description.as_str()).collect();
    assert_eq!(
        descriptions,
        vec![
            "Initialize registers",
            "Shift right (step 1)",
            "Bit 2 is 1: Add multiplicand",
            "Shift right (step 2)",
            "Multiplication complete!",
        ]
    );
}
