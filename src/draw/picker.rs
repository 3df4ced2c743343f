//! Winner index selection.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the winning index
pub trait WinnerPicker {
    /// Return an index in `0..len`; `len` is never zero
    fn pick(&mut self, len: usize) -> usize;
}

/// Uniform selection over the whole index range
pub struct RandomPicker<R> {
    rng: R,
}

impl RandomPicker<StdRng> {
    /// Seed from operating system entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Reproducible sequence of winners for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomPicker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> WinnerPicker for RandomPicker<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}
