use std::env;

use crate::bits::BitVector;
use crate::types::{RegisterSnapshot, Stage};

/// Switch-style flag value: `1`, `true`, `yes` or `on`, case-insensitive.
pub fn is_truthy(value: &str) -> bool {
    ["1", "true", "yes", "on"]
        .iter()
        .any(|accepted| value.trim().eq_ignore_ascii_case(accepted))
}

/// Reads a switch such as `PIPO_STRICT`; unset or non-unicode counts as off.
pub fn env_truthy(name: &str) -> bool {
    env::var(name).is_ok_and(|value| is_truthy(&value))
}

/// Register bits with an optional `[b]` marker around one position.
pub fn format_register(reg: &BitVector, highlight: Option<usize>) -> String {
    reg.iter()
        .enumerate()
        .map(|(pos, bit)| {
            if highlight == Some(pos) {
                format!("[{bit}]")
            } else {
                bit.to_string()
            }
        })
        .collect()
}

pub fn stage_label(stage: Stage) -> &'static str {
    match stage {
        Stage::Initialization => "INIT",
        Stage::Add => "ADD",
        Stage::Shift => "SHIFT",
        Stage::Complete => "DONE",
    }
}

/// One table row: `index stage product accumulator carry description`.
pub fn format_snapshot_row(index: usize, snap: &RegisterSnapshot) -> String {
    format!(
        "{index:>3} {:<5} P={} ACC={} C={} {}",
        stage_label(snap.stage),
        format_register(&snap.product, snap.active_bit_index),
        format_register(&snap.accumulator, None),
        snap.carry,
        snap.description
    )
}

/// Register panel for the snapshot currently on screen.
pub fn format_register_panel(snap: &RegisterSnapshot) -> String {
    [
        format!("Multiplicand: {}", format_register(&snap.multiplicand, None)),
        format!(
            "Multiplier:   {}",
            format_register(&snap.multiplier, snap.active_multiplier_index())
        ),
        format!("Accumulator:  {}", format_register(&snap.accumulator, None)),
        format!("Product:      {}", format_register(&snap.product, None)),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate;
    use crate::types::BitWidthMode;

    #[test]
    fn highlights_tested_bit() {
        let run = generate(3, 3, BitWidthMode::TwoBit).unwrap();
        assert_eq!(
            format_snapshot_row(1, &run[1]),
            "  1 ADD   P=001[1] ACC=11 C=0 Bit 1 is 1: Add multiplicand"
        );
        assert!(format_register_panel(&run[3]).contains("Multiplier:   [1]1"));
    }

    #[test]
    fn switch_values() {
        for on in ["1", "true", " YES ", "On"] {
            assert!(is_truthy(on), "{on}");
        }
        for off in ["", "0", "false", "no", "enabled"] {
            assert!(!is_truthy(off), "{off}");
        }
        assert!(!env_truthy("PIPO_TEST_SURELY_UNSET_VARIABLE"));
    }
}
