//! Register-level model of a shift-and-add binary multiplier built from PIPO registers.
//! Modules are split by bit registers, run data types, step generation, run fingerprints,
//! consumer-side playback, and terminal rendering helpers.

pub mod bits;
pub mod cli;
pub mod digest;
pub mod error;
pub mod explain;
pub mod generator;
pub mod playback;
pub mod types;

pub use bits::BitVector;
pub use error::{MultiplierError, MultiplierResult};
pub use generator::{generate, generate_with_width, MAX_OPERAND_BITS};
pub use types::{BitWidthMode, RegisterSnapshot, Run, Stage};
