//! Data-driven game balance
//!
//! Every constant the simulation reads at runtime lives in [`Tuning`]. A JSON
//! document may override any subset of fields; missing keys fall back to the
//! defaults in [`crate::consts`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;

/// Startup configuration for a game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub world_min: Vec2,
    pub world_max: Vec2,

    // === Pools ===
    pub bullet_capacity: usize,
    pub asteroid_capacity: usize,
    pub power_up_capacity: usize,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    pub player_acceleration: f32,
    pub player_drag: f32,
    /// Multiplied by dt to get the per-frame velocity cap
    pub player_max_speed: f32,

    // === Weapons ===
    /// Seconds between shots (halved by the machine gun)
    pub shooting_rate: f32,
    pub bullet_speed: f32,
    pub bullet_radius: f32,
    /// `None` means bullets only expire when leaving the world
    pub bullet_lifetime: Option<f32>,
    /// How far (in radii) the collision segment reaches past the bullet
    pub bullet_tip_extension: f32,
    pub shotgun_spread_distance: f32,
    pub shotgun_min_spread: f32,
    pub shotgun_max_spread: f32,

    // === Asteroids ===
    pub asteroid_count: usize,
    pub asteroid_scale: f32,
    /// Per-vertex radius factor range
    pub asteroid_radius_jitter: (f32, f32),
    /// Per-asteroid multiplier applied to every vertex
    pub asteroid_shape_variance: (f32, f32),
    pub asteroid_max_angular_velocity: f32,
    pub asteroid_min_speed: f32,
    pub asteroid_max_speed: f32,
    pub points_per_asteroid: u32,

    // === Power-ups ===
    pub power_up_duration: f32,
    pub power_up_spawn_chance: f32,
    pub power_up_radius: f32,
    pub power_up_grow_time: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_min: Vec2::ZERO,
            world_max: Vec2::new(WORLD_WIDTH, WORLD_HEIGHT),

            bullet_capacity: BULLET_CAPACITY,
            asteroid_capacity: ASTEROID_CAPACITY,
            power_up_capacity: POWER_UP_CAPACITY,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_acceleration: PLAYER_ACCELERATION,
            player_drag: PLAYER_DRAG,
            player_max_speed: PLAYER_MAX_SPEED,

            shooting_rate: SHOOTING_RATE,
            bullet_speed: BULLET_SPEED,
            bullet_radius: BULLET_RADIUS,
            bullet_lifetime: Some(BULLET_LIFETIME),
            bullet_tip_extension: BULLET_TIP_EXTENSION,
            shotgun_spread_distance: SHOTGUN_SPREAD_DISTANCE,
            shotgun_min_spread: SHOTGUN_MIN_SPREAD,
            shotgun_max_spread: SHOTGUN_MAX_SPREAD,

            asteroid_count: ASTEROID_COUNT,
            asteroid_scale: ASTEROID_SCALE,
            asteroid_radius_jitter: (ASTEROID_MIN_RADIUS_FACTOR, ASTEROID_MAX_RADIUS_FACTOR),
            asteroid_shape_variance: (ASTEROID_MIN_SHAPE_VARIANCE, ASTEROID_MAX_SHAPE_VARIANCE),
            asteroid_max_angular_velocity: ASTEROID_MAX_ANGULAR_VELOCITY,
            asteroid_min_speed: ASTEROID_MIN_SPEED,
            asteroid_max_speed: ASTEROID_MAX_SPEED,
            points_per_asteroid: POINTS_PER_ASTEROID,

            power_up_duration: POWER_UP_DURATION,
            power_up_spawn_chance: POWER_UP_SPAWN_CHANCE,
            power_up_radius: POWER_UP_RADIUS,
            power_up_grow_time: POWER_UP_GROW_TIME,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a tuning file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load a tuning file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::from_file(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("{e}; using default tuning");
                Self::default()
            }
        }
    }

    /// Size of the play area
    pub fn world_size(&self) -> Vec2 {
        self.world_max - self.world_min
    }

    /// Center of the play area
    pub fn world_center(&self) -> Vec2 {
        (self.world_min + self.world_max) * 0.5
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        let size = self.world_size();
        if !(size.x > 0.0 && size.y > 0.0) {
            return invalid("world_max", "must be greater than world_min on both axes");
        }
        if self.bullet_capacity == 0 {
            return invalid("bullet_capacity", "must be at least 1");
        }
        if self.asteroid_capacity < self.asteroid_count {
            return invalid("asteroid_capacity", "must hold the initial asteroid count");
        }
        if self.player_height <= 0.0 || self.player_width <= 0.0 {
            return invalid("player_height", "player dimensions must be positive");
        }
        if self.shooting_rate < 0.0 {
            return invalid("shooting_rate", "must not be negative");
        }
        if self.bullet_radius <= 0.0 {
            return invalid("bullet_radius", "must be positive");
        }
        if matches!(self.bullet_lifetime, Some(t) if t <= 0.0) {
            return invalid("bullet_lifetime", "must be positive when set");
        }
        if self.shotgun_min_spread > self.shotgun_max_spread {
            return invalid("shotgun_min_spread", "must not exceed shotgun_max_spread");
        }
        if self.asteroid_scale <= 0.0 {
            return invalid("asteroid_scale", "must be positive");
        }
        let (lo, hi) = self.asteroid_radius_jitter;
        if !(0.0 < lo && lo <= hi) {
            return invalid("asteroid_radius_jitter", "expected 0 < min <= max");
        }
        let (lo, hi) = self.asteroid_shape_variance;
        if !(0.0 < lo && lo <= hi) {
            return invalid("asteroid_shape_variance", "expected 0 < min <= max");
        }
        if self.asteroid_min_speed > self.asteroid_max_speed {
            return invalid("asteroid_min_speed", "must not exceed asteroid_max_speed");
        }
        if !(0.0..=1.0).contains(&self.power_up_spawn_chance) {
            return invalid("power_up_spawn_chance", "must be a probability in [0, 1]");
        }
        if self.power_up_duration < 0.0 {
            return invalid("power_up_duration", "must not be negative");
        }
        Ok(())
    }
}
