//! Random source for spawns
//!
//! Target size, color and speed are random. Gameplay code asks a
//! [`RandomSource`] instead of a global generator so tests can script it.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Uniform integers on demand
pub trait RandomSource {
    /// Uniform integer in `[0, upper)`. Returns 0 when `upper` is 0.
    fn next_below(&mut self, upper: u32) -> u32;
}

/// Seeded PCG generator
#[derive(Debug, Clone)]
pub struct PcgSource {
    seed: u64,
    rng: Pcg32,
}

impl PcgSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Snapshot of the seed for serialization
    pub fn state(&self) -> RngState {
        RngState { seed: self.seed }
    }
}

impl RandomSource for PcgSource {
    fn next_below(&mut self, upper: u32) -> u32 {
        if upper == 0 {
            return 0;
        }
        self.rng.random_range(0..upper)
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn to_source(&self) -> PcgSource {
        PcgSource::new(self.seed)
    }
}
