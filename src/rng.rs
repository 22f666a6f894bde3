//! Seeded randomness shared by the AI and test fixtures.

use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

/// Deterministic generator: the same seed yields the same sequence of
/// `float`/`int`/`pick` results on every run of the same build.
#[derive(Debug, Clone)]
pub struct SeededRng {
    inner: SmallRng,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
        }
    }

    /// Seed from the thread-local OS-backed generator.
    #[cfg(feature = "std")]
    pub fn from_entropy() -> Self {
        let mut seed_rng = rand::rng();
        Self {
            inner: SmallRng::from_rng(&mut seed_rng),
        }
    }

    /// Uniform float in `[0, 1)`.
    pub fn float(&mut self) -> f64 {
        self.inner.random::<f64>()
    }

    /// Uniform integer in `[0, bound)`; `0` when `bound` is zero.
    pub fn int(&mut self, bound: usize) -> usize {
        if bound == 0 {
            0
        } else {
            self.inner.random_range(0..bound)
        }
    }

    /// Uniformly chosen element, `None` for an empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            items.get(self.int(items.len()))
        }
    }

    /// Fair coin.
    pub fn coin(&mut self) -> bool {
        self.inner.random()
    }
}

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.inner.fill_bytes(dst)
    }
}
