//! Deterministic simulation RNG.
//!
//! The simulation itself is deterministic; randomness is confined to initial
//! spawn placement.  Seeding from `SimConfig::seed` makes a run with random
//! spawns reproducible.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seeded RNG owned by the simulation builder.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform index in `0..len`, or `None` when `len == 0`.
    #[inline]
    pub fn gen_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.0.gen_range(0..len))
    }
}
