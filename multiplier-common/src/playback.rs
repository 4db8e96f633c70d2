use tracing::debug;

use crate::error::MultiplierResult;
use crate::generator::generate;
use crate::types::{BitWidthMode, RegisterSnapshot, Run};

/// Consumer-owned cursor over an immutable run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playback {
    run: Run,
    index: usize,
}

impl Playback {
    pub fn new(run: Run) -> Self {
        Self { run, index: 0 }
    }

    pub fn run(&self) -> &Run {
        &self.run
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&RegisterSnapshot> {
        self.run.get(self.index)
    }

    /// Moves to the next snapshot. Returns `None` once the last one is showing.
    pub fn advance(&mut self) -> Option<&RegisterSnapshot> {
        if self.index + 1 >= self.run.len() {
            return None;
        }
        self.index += 1;
        self.run.get(self.index)
    }

    /// Jumps straight to `index`, clamped to the last snapshot.
    pub fn seek(&mut self, index: usize) -> Option<&RegisterSnapshot> {
        self.index = index.min(self.run.len().saturating_sub(1));
        self.run.get(self.index)
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    pub fn is_finished(&self) -> bool {
        self.index + 1 >= self.run.len()
    }
}

/// Current inputs plus the playback derived from them.
///
/// Every input change clamps the raw value, regenerates the run and rewinds
/// the cursor; a mode switch also reloads that mode's default operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    mode: BitWidthMode,
    multiplicand: u64,
    multiplier: u64,
    playback: Playback,
}

impl Session {
    pub fn new(mode: BitWidthMode) -> MultiplierResult<Self> {
        let (multiplicand, multiplier) = mode.default_operands();
        let playback = Playback::new(generate(multiplicand, multiplier, mode)?);
        Ok(Self {
            mode,
            multiplicand,
            multiplier,
            playback,
        })
    }

    pub fn mode(&self) -> BitWidthMode {
        self.mode
    }

    pub fn operands(&self) -> (u64, u64) {
        (self.multiplicand, self.multiplier)
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut Playback {
        &mut self.playback
    }

    pub fn set_multiplicand(&mut self, raw: i64) -> MultiplierResult<()> {
        self.multiplicand = self.mode.clamp_operand(raw);
        self.regenerate()
    }

    pub fn set_multiplier(&mut self, raw: i64) -> MultiplierResult<()> {
        self.multiplier = self.mode.clamp_operand(raw);
        self.regenerate()
    }

    pub fn set_mode(&mut self, mode: BitWidthMode) -> MultiplierResult<()> {
        self.mode = mode;
        (self.multiplicand, self.multiplier) = mode.default_operands();
        self.regenerate()
    }

    fn regenerate(&mut self) -> MultiplierResult<()> {
        debug!(
            mode = %self.mode,
            multiplicand = self.multiplicand,
            multiplier = self.multiplier,
            "regenerating run"
        );
        self.playback = Playback::new(generate(self.multiplicand, self.multiplier, self.mode)?);
        Ok(())
    }
}
