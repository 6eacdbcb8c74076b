//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in from the platform as `dt` and `now`
//! - Seeded RNG only
//! - Stable iteration order (pool order with swap-removal)
//! - No rendering, audio or platform dependencies

pub mod asteroid;
pub mod collision;
pub mod geometry;
pub mod player;
pub mod pool;
pub mod powerup;
pub mod rng;
pub mod state;
pub mod tick;

pub use asteroid::Asteroid;
pub use player::Player;
pub use pool::Pool;
pub use powerup::{ActivePowerUps, PowerUp, PowerUpKind};
pub use rng::SimRng;
pub use state::{Bullet, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
