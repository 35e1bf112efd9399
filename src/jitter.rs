//! Horizontal jitter for scatter and outlier markers.
//!
//! Builders never reach for a global generator: every call receives a
//! [`JitterSource`], so a seeded source makes a whole plot reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of jitter factors in `[-1, 1]`.
pub trait JitterSource {
    /// Next factor in `[-1, 1]`.
    fn next_unit(&mut self) -> f64;

    /// Scale each amplitude by a fresh factor.
    fn offsets(&mut self, amplitudes: &[f64]) -> Vec<f64> {
        amplitudes.iter().map(|a| a * self.next_unit()).collect()
    }
}

/// Uniform jitter drawn from a random number generator.
#[derive(Debug, Clone)]
pub struct RandomJitter<R = StdRng> {
    rng: R,
}

impl RandomJitter<StdRng> {
    /// Reproducible jitter from a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Jitter seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Seeded when `seed` is given, entropy-seeded otherwise.
    #[must_use]
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl<R: Rng> RandomJitter<R> {
    /// Wrap an existing generator.
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> JitterSource for RandomJitter<R> {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen_range(-1.0..=1.0)
    }
}

/// Constant jitter factor; `FixedJitter(0.0)` disables jitter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedJitter(pub f64);

impl JitterSource for FixedJitter {
    fn next_unit(&mut self) -> f64 {
        self.0.clamp(-1.0, 1.0)
    }
}
