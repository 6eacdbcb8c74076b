//! Asteroid generation, motion and fragmentation

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{integrate, rotate_vertices, wrap_position};
use super::rng::SimRng;
use crate::consts::{ASTEROID_LAST_GENERATION, ASTEROID_VERTEX_COUNT};
use crate::polar_to_cartesian;
use crate::tuning::Tuning;

/// A rock drifting through the world.
///
/// `vertices` are relative to `position` and are rotated in place every
/// frame, so the outline carries its own orientation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Radians per second, fixed at spawn
    pub angular_velocity: f32,
    /// 0 = large, 1 = medium, 2 = small
    pub generation: u8,
    /// Nominal radius for this generation
    pub scale: f32,
    /// Farthest vertex from `position`; the wrap margin
    pub extent: f32,
    pub vertices: [Vec2; ASTEROID_VERTEX_COUNT],
}

impl Asteroid {
    /// Generate a jagged outline around `position`
    pub fn new(
        rng: &mut SimRng,
        tuning: &Tuning,
        position: Vec2,
        velocity: Vec2,
        scale: f32,
        generation: u8,
    ) -> Self {
        debug_assert!(generation <= ASTEROID_LAST_GENERATION);

        let (jitter_min, jitter_max) = tuning.asteroid_radius_jitter;
        let (variance_min, variance_max) = tuning.asteroid_shape_variance;
        let variance = rng.range(variance_min, variance_max);

        let step = TAU / ASTEROID_VERTEX_COUNT as f32;
        let mut vertices = [Vec2::ZERO; ASTEROID_VERTEX_COUNT];
        for (i, vertex) in vertices.iter_mut().enumerate() {
            let angle = (i + 1) as f32 * step;
            let radius = scale * variance * rng.range(jitter_min, jitter_max);
            *vertex = polar_to_cartesian(radius, angle);
        }

        let extent = vertices.iter().map(|v| v.length()).fold(0.0, f32::max);

        let max_spin = tuning.asteroid_max_angular_velocity;
        Self {
            position,
            velocity,
            angular_velocity: rng.range(-max_spin, max_spin),
            generation,
            scale,
            extent,
            vertices,
        }
    }

    /// Move, wrap and spin for one frame.
    ///
    /// Wraps only once the whole outline is past the world edge.
    pub fn update(&mut self, world_min: Vec2, world_max: Vec2, dt: f32) {
        self.position = integrate(self.position, self.velocity, dt);
        self.position = wrap_position(self.position, world_min, world_max, self.extent);
        rotate_vertices(&mut self.vertices, self.angular_velocity * dt);
    }

    /// Whether destroying this asteroid produces children
    #[inline]
    pub fn fragments(&self) -> bool {
        self.generation < ASTEROID_LAST_GENERATION
    }

    /// Score for destroying this asteroid
    #[inline]
    pub fn points(&self, points_per_asteroid: u32) -> u32 {
        points_per_asteroid / (self.generation as u32 + 1)
    }

    /// The two halves produced when this asteroid is destroyed.
    ///
    /// Children fly apart along the parent's velocity axis, one with the
    /// parent's velocity and one with its negation. Returns `None` for the
    /// last generation.
    pub fn fragment(&self, rng: &mut SimRng, tuning: &Tuning) -> Option<[Asteroid; 2]> {
        if !self.fragments() {
            return None;
        }

        let generation = self.generation + 1;
        let scale = tuning.asteroid_scale / (2.0 * generation as f32);
        let offset = self.velocity.normalize_or_zero() * scale * 0.5;

        Some([
            Asteroid::new(rng, tuning, self.position + offset, self.velocity, scale, generation),
            Asteroid::new(rng, tuning, self.position - offset, -self.velocity, scale, generation),
        ])
    }
}

/// Scatter the opening field of large asteroids around the world center
pub fn spawn_field(rng: &mut SimRng, tuning: &Tuning) -> Vec<Asteroid> {
    let center = tuning.world_center();
    let height = tuning.world_size().y;

    (0..tuning.asteroid_count)
        .map(|_| {
            let distance = rng.range(height / 3.0, height / 1.5);
            let position = center + rng.unit_circle_vector(distance);
            let speed = rng.range(tuning.asteroid_min_speed, tuning.asteroid_max_speed);
            let velocity = rng.unit_circle_vector(speed);
            Asteroid::new(rng, tuning, position, velocity, tuning.asteroid_scale, 0)
        })
        .collect()
}
