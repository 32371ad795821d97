//! Dodge counter and feedback message selection

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::error::EngineError;
use crate::tuning::Tuning;

/// Source of random indices/fractions (injectable for tests)
pub trait RandomSource {
    /// Uniform index in `0..len` (`len` is never 0)
    fn next_index(&mut self, len: usize) -> usize;
    /// Uniform fraction in `[0, 1)`
    fn next_unit(&mut self) -> f32;
}

/// Production random source
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: Pcg32,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }

    fn next_unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Monotonic dodge counter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionCounter {
    count: u64,
}

impl InteractionCounter {
    /// Count one qualifying dodge and return the new total
    pub fn increment(&mut self) -> u64 {
        self.count = self.count.saturating_add(1);
        self.count
    }

    pub fn get(&self) -> u64 {
        self.count
    }
}

/// True on every `cadence`-th dodge (never on zero)
#[inline]
pub fn should_emit(count: u64, cadence: u64) -> bool {
    cadence > 0 && count > 0 && count % cadence == 0
}

/// How the messaging collaborator should size the message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleHint {
    Regular,
    Large,
}

impl StyleHint {
    pub fn font_px(&self, tuning: &Tuning) -> u32 {
        match self {
            StyleHint::Regular => tuning.message_font_px_compact,
            StyleHint::Large => tuning.message_font_px_standard,
        }
    }
}

/// A message handed to the messaging collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub text: String,
    pub duration_ms: u32,
    pub style: StyleHint,
    pub font_px: u32,
}

/// Fixed ordered set of messages
#[derive(Debug, Clone, Default)]
pub struct MessageBook {
    entries: Vec<String>,
}

impl MessageBook {
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(tuning.messages.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pick one entry uniformly at random
    pub fn pick(&self, random: &mut dyn RandomSource) -> Result<&str, EngineError> {
        if self.entries.is_empty() {
            return Err(EngineError::EmptyMessageSet);
        }
        // Guard against a misbehaving source
        let index = random.next_index(self.entries.len()) % self.entries.len();
        Ok(&self.entries[index])
    }
}
