//! Seeded RNG for sampling-based analyses.
//!
//! Centrality and network-wide detour statistics sample vertices rather than
//! visiting all of them.  Both take an explicit seed so the same graph and
//! parameters always produce the same report.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Deterministic sampling RNG.
pub struct SampleRng(SmallRng);

impl SampleRng {
    pub fn new(seed: u64) -> Self {
        SampleRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `min(amount, length)` distinct indices from `0..length`, ascending.
    ///
    /// When `amount >= length` every index is returned, so a sample request
    /// larger than the population is clamped rather than rejected.
    pub fn sample_indices(&mut self, length: usize, amount: usize) -> Vec<usize> {
        if amount >= length {
            return (0..length).collect();
        }
        let mut picked = rand::seq::index::sample(&mut self.0, length, amount).into_vec();
        picked.sort_unstable();
        picked
    }
}
