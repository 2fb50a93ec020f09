//! Spawn context for particle initialization.
//!
//! Each particle draws its randomized attributes (scatter points, jitter,
//! radius, opacity) from its own RNG so a given `(seed, index)` pair always
//! produces the same particle, independent of how many others exist.

use crate::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Context handed to the layout generators while a particle is (re)built.
pub struct SpawnContext {
    /// Index of the particle being spawned (0 to count-1).
    pub index: u32,
    /// Total number of particles in the population.
    pub count: u32,
    rng: SmallRng,
}

impl SpawnContext {
    /// Create a context whose RNG is derived from `seed` and the index.
    pub fn seeded(index: u32, count: u32, seed: u64) -> Self {
        Self {
            index,
            count,
            rng: SmallRng::seed_from_u64(mix(seed, index as u64)),
        }
    }

    /// Normalized progress through the population (0.0 to 1.0).
    #[inline]
    pub fn progress(&self) -> f32 {
        self.index as f32 / self.count.max(1) as f32
    }

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in the given range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        self.rng.gen_range(min..max)
    }

    /// Random point inside a cube of given half-size, centered at origin.
    pub fn random_in_cube(&mut self, half_size: f32) -> Vec3 {
        Vec3::new(
            self.rng.gen_range(-half_size..half_size),
            self.rng.gen_range(-half_size..half_size),
            self.rng.gen_range(-half_size..half_size),
        )
    }
}

/// Seed that differs on every program execution.
pub fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}

// splitmix64 finalizer, so neighbouring indices get unrelated streams.
fn mix(seed: u64, index: u64) -> u64 {
    let mut z = seed ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
