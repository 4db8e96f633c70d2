use thiserror::Error;

/// Failures surfaced by the multiplier core. Every variant is a caller contract
/// violation; no variant is produced after a run has started emitting snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MultiplierError {
    #[error("{name} value {value} is outside [0, {max}]")]
    InvalidOperand {
        name: &'static str,
        value: u64,
        max: u64,
    },
    #[error("unsupported bit-width mode: {0}")]
    InvalidMode(String),
    #[error("value {value} does not fit in {width} bits")]
    ValueTooWide { value: u64, width: usize },
    #[error("bit at position {index} is {value}, expected 0 or 1")]
    InvalidBit { index: usize, value: u8 },
}

pub type MultiplierResult<T> = Result<T, MultiplierError>;
