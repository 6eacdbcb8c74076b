//! The player's ship: thrust/drag movement, mouse aiming and weapons

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::wrap_position;
use super::powerup::{ActivePowerUps, PowerUpKind};
use super::state::Bullet;
use crate::normalize_angle;
use crate::tuning::Tuning;

/// Number of hull vertices
pub const PLAYER_VERTEX_COUNT: usize = 4;

/// Bullets in a shotgun blast
const SHOTGUN_PELLETS: usize = 3;

/// The player ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec2,
    /// Displacement per frame (not per second)
    pub velocity: Vec2,
    /// Angle from "up" toward the aim point, recomputed every frame
    pub rotation: f32,
    pub height: f32,
    pub score: u32,
    /// Time of the last shot, `None` before the first one
    pub last_shot_at: Option<f64>,
    pub power_ups: ActivePowerUps,
    /// Hull relative to `position`, rotated by `rotation`
    pub vertices: [Vec2; PLAYER_VERTEX_COUNT],
    reference_vertices: [Vec2; PLAYER_VERTEX_COUNT],
}

impl Player {
    /// A fresh ship parked at the world center, nose up
    pub fn new(tuning: &Tuning) -> Self {
        let reference = Self::reference_shape(tuning.player_width, tuning.player_height);
        Self {
            position: tuning.world_center(),
            velocity: Vec2::ZERO,
            rotation: 0.0,
            height: tuning.player_height,
            score: 0,
            last_shot_at: None,
            power_ups: ActivePowerUps::default(),
            vertices: reference,
            reference_vertices: reference,
        }
    }

    /// Arrowhead pointing toward -y
    pub fn reference_shape(width: f32, height: f32) -> [Vec2; PLAYER_VERTEX_COUNT] {
        [
            Vec2::new(0.0, -height / 2.0),
            Vec2::new(width / 2.0, height / 2.0),
            Vec2::new(0.0, height / 8.0),
            Vec2::new(-width / 2.0, height / 2.0),
        ]
    }

    /// Unit vector the nose points along
    #[inline]
    pub fn facing(&self) -> Vec2 {
        Vec2::from_angle(self.rotation).rotate(Vec2::NEG_Y)
    }

    /// Turn the ship toward `target` and rebuild the hull from the reference
    /// shape. Keeps the previous heading when the target is on the ship.
    pub fn aim(&mut self, target: Vec2) {
        let to_target = target - self.position;
        if to_target.length_squared() > f32::EPSILON {
            self.rotation = normalize_angle(Vec2::NEG_Y.angle_to(to_target));
        }
        let rotation = Vec2::from_angle(self.rotation);
        for (vertex, reference) in self.vertices.iter_mut().zip(self.reference_vertices) {
            *vertex = rotation.rotate(reference);
        }
    }

    /// Apply one frame of thrust, speed cap, movement, wrap and drag.
    ///
    /// The cap is `player_max_speed * dt` per frame and `velocity` is added to
    /// the position without another `dt` factor.
    pub fn thrust(&mut self, input: Vec2, tuning: &Tuning, dt: f32) {
        let direction = input.normalize_or_zero();
        self.velocity += direction * tuning.player_acceleration * dt;
        self.velocity = self.velocity.clamp_length_max(tuning.player_max_speed * dt);

        self.position += self.velocity;
        self.position = wrap_position(
            self.position,
            tuning.world_min,
            tuning.world_max,
            self.height / 2.0,
        );

        self.velocity *= (-tuning.player_drag * dt).exp();
    }

    /// Seconds between shots, halved by the machine gun
    pub fn cooldown(&self, tuning: &Tuning) -> f32 {
        if self.power_ups.is_active(PowerUpKind::MachineGun) {
            tuning.shooting_rate * 0.5
        } else {
            tuning.shooting_rate
        }
    }

    pub fn can_fire(&self, now: f64, tuning: &Tuning) -> bool {
        match self.last_shot_at {
            Some(t) => now - t >= self.cooldown(tuning) as f64,
            None => true,
        }
    }

    /// Fire toward `target` if the weapon is ready.
    ///
    /// Returns the bullets to spawn: one normally, a fan of three with the
    /// shotgun. Closer targets get a wider fan.
    pub fn fire(&mut self, target: Vec2, now: f64, tuning: &Tuning) -> Vec<Bullet> {
        if !self.can_fire(now, tuning) {
            return Vec::new();
        }
        self.last_shot_at = Some(now);

        let to_target = target - self.position;
        let direction = if to_target.length_squared() > f32::EPSILON {
            to_target.normalize()
        } else {
            self.facing()
        };
        let muzzle = self.position + direction * self.height / 2.0;
        let spawned_at = tuning.bullet_lifetime.map(|_| now);
        let bullet = |dir: Vec2| Bullet {
            prev_position: muzzle,
            position: muzzle,
            velocity: dir * tuning.bullet_speed,
            radius: tuning.bullet_radius,
            spawned_at,
        };

        if self.power_ups.is_active(PowerUpKind::Shotgun) {
            let spread = shotgun_spread(to_target.length(), tuning);
            let half = (SHOTGUN_PELLETS / 2) as i32;
            (-half..=half)
                .map(|i| bullet(Vec2::from_angle(spread * i as f32).rotate(direction)))
                .collect()
        } else {
            vec![bullet(direction)]
        }
    }

    /// Deflect off an asteroid edge, keeping the current speed
    pub fn bounce(&mut self, outward_normal: Vec2) {
        self.velocity = outward_normal * self.velocity.length();
    }
}

/// Angle between adjacent shotgun pellets for a target `distance` away
pub fn shotgun_spread(distance: f32, tuning: &Tuning) -> f32 {
    (tuning.shotgun_spread_distance / distance.max(1.0))
        .clamp(tuning.shotgun_min_spread, tuning.shotgun_max_spread)
}
