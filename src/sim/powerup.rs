//! Power-up drops and timed player effects
//!
//! Destroyed asteroids occasionally drop a power-up. Flying the ship into it
//! activates the matching effect for a fixed duration; picking up the same
//! kind again only refreshes the timer.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::pool::Pool;
use super::rng::SimRng;
use crate::tuning::Tuning;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Bullets reflect off asteroids instead of dying
    BouncyBullets,
    /// Asteroid contact bounces the ship instead of ending the game
    Invincibility,
    /// Three-bullet fan
    Shotgun,
    /// Halved weapon cooldown
    MachineGun,
}

impl PowerUpKind {
    pub const COUNT: usize = 4;
    pub const ALL: [PowerUpKind; Self::COUNT] = [
        PowerUpKind::BouncyBullets,
        PowerUpKind::Invincibility,
        PowerUpKind::Shotgun,
        PowerUpKind::MachineGun,
    ];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            PowerUpKind::BouncyBullets => 0,
            PowerUpKind::Invincibility => 1,
            PowerUpKind::Shotgun => 2,
            PowerUpKind::MachineGun => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::BouncyBullets => "bouncy bullets",
            PowerUpKind::Invincibility => "invincibility",
            PowerUpKind::Shotgun => "shotgun",
            PowerUpKind::MachineGun => "machine gun",
        }
    }
}

/// A collectible floating where an asteroid died
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub position: Vec2,
    pub spawned_at: f64,
    /// Eases in from 0 after spawning; doubles as the pickup radius
    pub radius: f32,
}

impl PowerUp {
    /// Grow the radius toward `max_radius` over `grow_time` seconds
    pub fn animate(&mut self, now: f64, max_radius: f32, grow_time: f32) {
        let t = if grow_time > 0.0 {
            ((now - self.spawned_at) as f32 / grow_time).clamp(0.0, 1.0)
        } else {
            1.0
        };
        self.radius = max_radius * ease_out_cubic(t);
    }

    #[inline]
    pub fn touches(&self, point: Vec2) -> bool {
        self.position.distance(point) <= self.radius
    }
}

#[inline]
fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Activation time of every effect currently on the player
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivePowerUps {
    activated_at: [Option<f64>; PowerUpKind::COUNT],
}

impl ActivePowerUps {
    #[inline]
    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.activated_at[kind.index()].is_some()
    }

    pub fn activated_at(&self, kind: PowerUpKind) -> Option<f64> {
        self.activated_at[kind.index()]
    }

    /// Turn an effect on, or restart its timer if already on
    pub fn activate(&mut self, kind: PowerUpKind, now: f64) {
        self.activated_at[kind.index()] = Some(now);
    }

    /// Clear every effect whose duration has fully elapsed
    pub fn expire(&mut self, now: f64, duration: f32) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        for kind in PowerUpKind::ALL {
            let slot = &mut self.activated_at[kind.index()];
            if let Some(t) = *slot {
                if now - t >= duration as f64 {
                    *slot = None;
                    expired.push(kind);
                }
            }
        }
        expired
    }
}

/// Roll for a drop where an asteroid died.
///
/// The position is clamped into the world so wrapped-out asteroids still
/// drop reachable power-ups. Returns the kind actually placed.
pub fn roll_drop(
    rng: &mut SimRng,
    tuning: &Tuning,
    pool: &mut Pool<PowerUp>,
    position: Vec2,
    now: f64,
) -> Option<PowerUpKind> {
    if rng.float01() >= tuning.power_up_spawn_chance {
        return None;
    }

    let kind = PowerUpKind::ALL[rng.index(PowerUpKind::COUNT)];
    let power_up = PowerUp {
        kind,
        position: position.clamp(tuning.world_min, tuning.world_max),
        spawned_at: now,
        radius: 0.0,
    };
    match pool.push(power_up) {
        Ok(_) => Some(kind),
        Err(e) => {
            log::trace!("dropped {} power-up: {e}", kind.as_str());
            None
        }
    }
}

/// Animate every power-up and collect the ones the ship touches
pub fn collect(
    pool: &mut Pool<PowerUp>,
    active: &mut ActivePowerUps,
    tuning: &Tuning,
    player_position: Vec2,
    now: f64,
) -> Vec<PowerUpKind> {
    let mut collected = Vec::new();
    let mut i = 0;
    while i < pool.len() {
        let power_up = &mut pool[i];
        power_up.animate(now, tuning.power_up_radius, tuning.power_up_grow_time);
        if power_up.touches(player_position) {
            let kind = power_up.kind;
            active.activate(kind, now);
            collected.push(kind);
            pool.remove(i);
        } else {
            i += 1;
        }
    }
    collected
}
