//! Game state and core simulation types
//!
//! Everything the presentation layer reads after a tick lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::asteroid::{Asteroid, spawn_field};
use super::geometry::out_of_bounds;
use super::player::Player;
use super::pool::Pool;
use super::powerup::{PowerUp, PowerUpKind};
use super::rng::SimRng;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// The ship hit an asteroid
    GameOver,
    /// Every asteroid destroyed
    GameWon,
}

impl GamePhase {
    /// Terminal phases only wait for the restart input
    pub fn is_terminal(self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// Something the presentation layer may want to draw or play a sound for
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The weapon fired this many bullets
    ShotFired { bullets: usize },
    AsteroidDestroyed { position: Vec2, generation: u8 },
    /// Fatal collision with an asteroid
    PlayerHit,
    /// Invincible ship deflected off an asteroid
    PlayerBounced,
    PowerUpSpawned(PowerUpKind),
    PowerUpCollected(PowerUpKind),
    PowerUpExpired(PowerUpKind),
    GameWon,
    /// A new game started after a restart input
    Restarted,
}

/// A bullet in flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    /// Position before the last integration step (start of the swept segment)
    pub prev_position: Vec2,
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    /// `None` when bullets only expire by leaving the world
    pub spawned_at: Option<f64>,
}

impl Bullet {
    pub fn advance(&mut self, dt: f32) {
        self.prev_position = self.position;
        self.position += self.velocity * dt;
    }

    /// Out of the world, or older than `lifetime`
    pub fn is_expired(
        &self,
        now: f64,
        lifetime: Option<f32>,
        world_min: Vec2,
        world_max: Vec2,
    ) -> bool {
        let too_old = match (self.spawned_at, lifetime) {
            (Some(t), Some(lifetime)) => now - t >= lifetime as f64,
            _ => false,
        };
        too_old || out_of_bounds(self.position, world_min, world_max)
    }
}

/// Complete game state for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    /// Seed the current game was built from
    pub seed: u64,
    pub phase: GamePhase,
    /// Frames simulated since the last reset
    pub frame: u64,
    pub player: Player,
    pub bullets: Pool<Bullet>,
    pub asteroids: Pool<Asteroid>,
    pub power_ups: Pool<PowerUp>,
    /// Events raised by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    #[serde(skip)]
    pub rng: SimRng,
}

impl GameState {
    /// Create a new game with the given tuning and seed
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let mut state = Self {
            player: Player::new(&tuning),
            bullets: Pool::with_capacity(tuning.bullet_capacity),
            asteroids: Pool::with_capacity(tuning.asteroid_capacity),
            power_ups: Pool::with_capacity(tuning.power_up_capacity),
            tuning,
            seed,
            phase: GamePhase::Playing,
            frame: 0,
            events: Vec::new(),
            rng: SimRng::new(seed),
        };
        state.reset(seed);
        state
    }

    /// Start over: reseed, clear every pool and scatter a new asteroid field
    pub fn reset(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = SimRng::new(seed);
        self.phase = GamePhase::Playing;
        self.frame = 0;
        self.player = Player::new(&self.tuning);
        self.bullets.clear();
        self.asteroids.clear();
        self.power_ups.clear();
        self.events.clear();

        for asteroid in spawn_field(&mut self.rng, &self.tuning) {
            self.spawn_asteroid(asteroid);
        }
        log::info!(
            "New game (seed {seed}): {} asteroids",
            self.asteroids.len()
        );
    }

    /// Add a bullet; silently dropped when the pool is full
    pub fn spawn_bullet(&mut self, bullet: Bullet) -> bool {
        match self.bullets.push(bullet) {
            Ok(_) => true,
            Err(e) => {
                log::trace!("bullet dropped: {e}");
                false
            }
        }
    }

    /// Add an asteroid; silently dropped when the pool is full
    pub fn spawn_asteroid(&mut self, asteroid: Asteroid) -> bool {
        match self.asteroids.push(asteroid) {
            Ok(_) => true,
            Err(e) => {
                log::trace!("asteroid dropped: {e}");
                false
            }
        }
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.player.score
    }

    /// Events raised by the most recent tick
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }
}
