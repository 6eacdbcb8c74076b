//! Seeded random sampling used by every spawner

use glam::Vec2;
use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg32;

/// Deterministic RNG owned by the game state
#[derive(Debug, Clone)]
pub struct SimRng {
    rng: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Uniform value in [0, 1)
    #[inline]
    pub fn float01(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Uniform value in [min, max)
    #[inline]
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.float01()
    }

    /// Random direction scaled to `scale`.
    ///
    /// Draws a point in the [-1, 1] square and normalizes it, so directions
    /// cluster toward the diagonals. Spawn distributions rely on that bias.
    pub fn unit_circle_vector(&mut self, scale: f32) -> Vec2 {
        let x = self.float01() * 2.0 - 1.0;
        let y = self.float01() * 2.0 - 1.0;
        Vec2::new(x, y).normalize_or_zero() * scale
    }

    /// Uniform index in [0, len)
    #[inline]
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }

    /// Raw 64 bits, used to derive the seed of the next game
    #[inline]
    pub fn next_seed(&mut self) -> u64 {
        self.rng.next_u64()
    }
}

impl Default for SimRng {
    fn default() -> Self {
        Self::new(0)
    }
}
