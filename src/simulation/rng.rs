//! Seedable random source for the simulation.
//!
//! Every random draw in the engine (traffic, disembarking, button floors)
//! goes through one `SimRng`, so equal seeds replay equal runs.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 42;

/// Deterministic RNG shared by all simulation steps. Use `rng.0` as a `rand::Rng`.
#[derive(Debug, Clone)]
pub struct SimRng(pub ChaCha8Rng);

impl Default for SimRng {
    fn default() -> Self {
        Self(ChaCha8Rng::seed_from_u64(DEFAULT_SEED))
    }
}

impl SimRng {
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(ChaCha8Rng::from_entropy())
    }
}
