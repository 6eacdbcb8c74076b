//! Scripted input for demo and headless runs

use glam::Vec2;

use crate::sim::{GameState, TickInput};

/// Distance inside which the pilot treats movement keys as centered
const STEER_DEAD_ZONE: f32 = 0.25;

/// Plays the game: shoots the nearest asteroid, backs away from close ones
/// and picks up power-ups when nothing is threatening the ship.
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Clearance kept between the ship and an asteroid's outline
    pub danger_radius: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            danger_radius: 200.0,
        }
    }
}

impl Autopilot {
    pub fn new(danger_radius: f32) -> Self {
        Self { danger_radius }
    }

    /// Input for the coming frame
    pub fn input(&self, state: &GameState) -> TickInput {
        let mut input = TickInput::default();

        if state.phase.is_terminal() {
            input.restart = true;
            return input;
        }

        let ship = state.player.position;
        let nearest = state.asteroids.iter().min_by(|a, b| {
            a.position
                .distance_squared(ship)
                .partial_cmp(&b.position.distance_squared(ship))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let Some(asteroid) = nearest else {
            input.pointer = ship + state.player.facing();
            return input;
        };

        input.pointer = asteroid.position;
        input.fire = true;

        let clearance = ship.distance(asteroid.position) - asteroid.extent;
        let steer = if clearance < self.danger_radius {
            ship - asteroid.position
        } else {
            // Safe: go get the nearest power-up, if any
            state
                .power_ups
                .iter()
                .min_by(|a, b| {
                    a.position
                        .distance_squared(ship)
                        .partial_cmp(&b.position.distance_squared(ship))
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .map(|p| p.position - ship)
                .unwrap_or(Vec2::ZERO)
        };
        press_toward(&mut input, steer);
        input
    }
}

/// Hold the movement keys that point along `direction`
fn press_toward(input: &mut TickInput, direction: Vec2) {
    let d = direction.normalize_or_zero();
    input.right = d.x > STEER_DEAD_ZONE;
    input.left = d.x < -STEER_DEAD_ZONE;
    input.down = d.y > STEER_DEAD_ZONE;
    input.up = d.y < -STEER_DEAD_ZONE;
}
