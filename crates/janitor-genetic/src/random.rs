//! Random source abstraction for map generation and evolution
//!
//! Every randomised operation takes the source as an explicit `&mut` argument.
//! Two kinds of source are supported:
//! - any `rand::Rng` (seeded `Xoshiro256PlusPlus` in the training driver)
//! - [`SequenceRandom`], a replay of fixed raw values for reproducible tests

/// Random number source used by the simulation and the genetic engine
pub trait RandomSource {
    /// Uniform integer in `[0, max_exclusive)`
    ///
    /// Panics when `max_exclusive` is zero.
    fn random_int(&mut self, max_exclusive: usize) -> usize;

    /// Bernoulli trial with percent resolution
    ///
    /// Always consumes exactly one draw. A probability of 0 (or below) never
    /// happens, 1 (or above) always happens.
    fn should_happen(&mut self, probability: f32) -> bool {
        let threshold = (probability * 100.0).round();
        (self.random_int(100) as f32) < threshold
    }
}

// Blanket implementation for any type implementing rand::Rng
impl<R: rand::Rng> RandomSource for R {
    fn random_int(&mut self, max_exclusive: usize) -> usize {
        assert!(max_exclusive > 0, "random_int called with an empty range");
        self.random_range(0..max_exclusive)
    }
}

/// Deterministic source that cycles through a fixed list of raw values
///
/// Each draw returns `value % max_exclusive`.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<u32>,
    cursor: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<u32>) -> Self {
        assert!(!values.is_empty(), "SequenceRandom needs at least one value");
        Self { values, cursor: 0 }
    }

    /// Source that returns the same raw value forever
    pub fn constant(value: u32) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws taken so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceRandom {
    fn random_int(&mut self, max_exclusive: usize) -> usize {
        assert!(max_exclusive > 0, "random_int called with an empty range");
        let value = self.values[self.cursor % self.values.len()] as usize;
        self.cursor += 1;
        value % max_exclusive
    }
}
