//! Explicitly owned pseudo-random streams.
//!
//! Each generation call builds its own `RandomSource` from a seed instead of
//! reseeding process-wide state. A source remembers its seed and how many
//! values it has handed out, so it can be rewound to reproduce a prior run.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seed used for every generated dataset.
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone)]
pub struct RandomSource {
    seed: u64,
    draws: u64,
    rng: StdRng,
}

impl RandomSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            draws: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of values drawn since construction or the last reseed.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Rewind the stream to its initial state.
    pub fn reseed(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
        self.draws = 0;
    }

    /// Uniform float in `[0, 1)`.
    pub fn next_unit(&mut self) -> f64 {
        self.draws += 1;
        self.rng.random::<f64>()
    }

    /// Uniform integer in `[low, high]`.
    pub fn next_in_range(&mut self, low: i32, high: i32) -> i32 {
        self.draws += 1;
        self.rng.random_range(low..=high)
    }

    /// Uniformly pick one element of a non-empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        self.draws += 1;
        &items[self.rng.random_range(0..items.len())]
    }

    pub fn units(&mut self, count: usize) -> Vec<f64> {
        (0..count).map(|_| self.next_unit()).collect()
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}
