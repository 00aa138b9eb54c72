//! Test RNG — deterministic `DeterministicRng` implementations for tests.

use beastarena_core::rng::DeterministicRng;

/// An RNG that always returns `min` for `next_u32_range` and `0.0` for
/// `next_f64`. Every roll with a non-zero probability succeeds, and the
/// turn-order coin flip always favours the first creature.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }

    fn next_f64(&mut self) -> f64 {
        0.0
    }
}

/// An RNG that returns `min` for `next_u32_range` and a constant for
/// `next_f64`. `FixedRng(0.999)` makes every roll below certainty fail.
#[derive(Debug)]
pub struct FixedRng(pub f64);

impl DeterministicRng for FixedRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }

    fn next_f64(&mut self) -> f64 {
        self.0
    }
}

/// An RNG that returns values from predetermined sequences. Panics if a
/// sequence is exhausted. Used in tests that need specific, repeatable
/// shuffles, trigger rolls and coin flips.
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<u32>,
    index: usize,
    rolls: Option<Vec<f64>>,
    roll_index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` with the given integer values. `next_f64`
    /// returns `0.0` unless rolls are supplied with [`Self::with_rolls`].
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        Self {
            values,
            index: 0,
            rolls: None,
            roll_index: 0,
        }
    }

    /// Supplies the sequence returned by `next_f64`.
    #[must_use]
    pub fn with_rolls(mut self, rolls: Vec<f64>) -> Self {
        self.rolls = Some(rolls);
        self
    }

    /// Number of integer values consumed so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.index
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, _min: u32, _max: u32) -> u32 {
        let val = self.values[self.index];
        self.index += 1;
        val
    }

    fn next_f64(&mut self) -> f64 {
        match &self.rolls {
            Some(rolls) => {
                let val = rolls[self.roll_index];
                self.roll_index += 1;
                val
            }
            None => 0.0,
        }
    }
}
