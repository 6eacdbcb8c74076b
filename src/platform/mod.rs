//! Platform abstraction layer
//!
//! Everything the simulation needs from the outside world, without a window:
//! - Time: one clamped `dt` and a monotonic `now` per frame
//! - Input: a scripted pilot that plays the game for headless runs

pub mod input;
pub mod time;

pub use input::Autopilot;
pub use time::{Frame, FrameClock};
