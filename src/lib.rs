//! Asteroids - gameplay core for a 2D arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `platform`: Headless platform layer (frame clock, scripted input)
//! - `error`: Error types for pools and configuration

pub mod error;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use error::{PoolFull, TuningError};
pub use tuning::Tuning;

use glam::Vec2;

/// Default game configuration constants
pub mod consts {
    /// World rectangle
    pub const WORLD_WIDTH: f32 = 2560.0;
    pub const WORLD_HEIGHT: f32 = 1440.0;

    /// Pool capacities
    pub const BULLET_CAPACITY: usize = 128;
    pub const ASTEROID_CAPACITY: usize = 128;
    pub const POWER_UP_CAPACITY: usize = 4;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 48.0;
    pub const PLAYER_HEIGHT: f32 = 64.0;
    pub const PLAYER_ACCELERATION: f32 = 30.0;
    pub const PLAYER_DRAG: f32 = 3.0;
    /// Per-second cap, multiplied by dt each frame
    pub const PLAYER_MAX_SPEED: f32 = 400.0;

    /// Weapons
    pub const SHOOTING_RATE: f32 = 0.25;
    pub const BULLET_SPEED: f32 = 900.0;
    pub const BULLET_RADIUS: f32 = 8.0;
    pub const BULLET_LIFETIME: f32 = 5.0;
    pub const BULLET_TIP_EXTENSION: f32 = 1.0;
    pub const SHOTGUN_SPREAD_DISTANCE: f32 = 60.0;
    pub const SHOTGUN_MIN_SPREAD: f32 = 0.05;
    pub const SHOTGUN_MAX_SPREAD: f32 = 0.35;

    /// Asteroids
    pub const ASTEROID_COUNT: usize = 16;
    pub const ASTEROID_SCALE: f32 = 128.0;
    pub const ASTEROID_VERTEX_COUNT: usize = 12;
    pub const ASTEROID_MIN_RADIUS_FACTOR: f32 = 0.5;
    pub const ASTEROID_MAX_RADIUS_FACTOR: f32 = 1.0;
    pub const ASTEROID_MIN_SHAPE_VARIANCE: f32 = 0.8;
    pub const ASTEROID_MAX_SHAPE_VARIANCE: f32 = 1.2;
    pub const ASTEROID_MAX_ANGULAR_VELOCITY: f32 = 2.0;
    pub const ASTEROID_MIN_SPEED: f32 = 50.0;
    pub const ASTEROID_MAX_SPEED: f32 = 250.0;
    /// Generations 0 (large) to 2 (small); the last one never fragments
    pub const ASTEROID_LAST_GENERATION: u8 = 2;
    pub const POINTS_PER_ASTEROID: u32 = 150;

    /// Power-ups
    pub const POWER_UP_DURATION: f32 = 10.0;
    pub const POWER_UP_SPAWN_CHANCE: f32 = 1.0 / 26.0;
    pub const POWER_UP_RADIUS: f32 = 80.0;
    pub const POWER_UP_GROW_TIME: f32 = 1.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
