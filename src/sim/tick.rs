//! Per-frame simulation step
//!
//! Core game loop that advances the simulation by one rendered frame.

use glam::Vec2;

use super::asteroid::Asteroid;
use super::collision::{edge_outward_normal, first_bullet_hit, hull_hits_edge, reflect_velocity};
use super::geometry::polygon_edges;
use super::powerup::{self, PowerUpKind};
use super::state::{GameEvent, GamePhase, GameState};

/// Input sampled by the platform layer for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement keys held
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Trigger held
    pub fire: bool,
    /// Start a new game (only honoured on the game over / win screens)
    pub restart: bool,
    /// Aim point in world coordinates
    pub pointer: Vec2,
}

impl TickInput {
    /// Sum of held movement keys; y grows downward
    pub fn thrust_direction(&self) -> Vec2 {
        let mut direction = Vec2::ZERO;
        if self.up {
            direction.y -= 1.0;
        }
        if self.down {
            direction.y += 1.0;
        }
        if self.left {
            direction.x -= 1.0;
        }
        if self.right {
            direction.x += 1.0;
        }
        direction
    }
}

/// Advance the game by one frame.
///
/// `dt` is the frame's delta time and `now` the monotonic clock, both sampled
/// once by the platform for this frame.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, now: f64) {
    state.events.clear();

    if state.phase.is_terminal() {
        if input.restart {
            log::info!("Restarting after {:?} with score {}", state.phase, state.score());
            let seed = state.rng.next_seed();
            state.reset(seed);
            state.events.push(GameEvent::Restarted);
        }
        return;
    }

    if state.asteroids.is_empty() {
        state.phase = GamePhase::GameWon;
        state.events.push(GameEvent::GameWon);
        log::info!("Field cleared! Final score {}", state.score());
        return;
    }

    state.frame += 1;

    expire_power_ups(state, now);
    retire_bullets(state, now);

    state.player.aim(input.pointer);
    if input.fire {
        fire(state, input.pointer, now);
    }
    state.player.thrust(input.thrust_direction(), &state.tuning, dt);

    for bullet in state.bullets.iter_mut() {
        bullet.advance(dt);
    }

    let (world_min, world_max) = (state.tuning.world_min, state.tuning.world_max);
    for asteroid in state.asteroids.iter_mut() {
        asteroid.update(world_min, world_max, dt);
    }

    let collected = powerup::collect(
        &mut state.power_ups,
        &mut state.player.power_ups,
        &state.tuning,
        state.player.position,
        now,
    );
    for kind in collected {
        log::debug!("Collected {}", kind.as_str());
        state.events.push(GameEvent::PowerUpCollected(kind));
    }

    resolve_collisions(state, now);
}

fn expire_power_ups(state: &mut GameState, now: f64) {
    let duration = state.tuning.power_up_duration;
    for kind in state.player.power_ups.expire(now, duration) {
        log::debug!("{} wore off", kind.as_str());
        state.events.push(GameEvent::PowerUpExpired(kind));
    }
}

fn retire_bullets(state: &mut GameState, now: f64) {
    let lifetime = state.tuning.bullet_lifetime;
    let (world_min, world_max) = (state.tuning.world_min, state.tuning.world_max);
    state
        .bullets
        .remove_where(|bullet| bullet.is_expired(now, lifetime, world_min, world_max));
}

fn fire(state: &mut GameState, target: Vec2, now: f64) {
    let bullets = state.player.fire(target, now, &state.tuning);
    if bullets.is_empty() {
        return;
    }
    let mut spawned = 0;
    for bullet in bullets {
        if state.spawn_bullet(bullet) {
            spawned += 1;
        }
    }
    if spawned > 0 {
        state.events.push(GameEvent::ShotFired { bullets: spawned });
    }
}

/// Player-vs-asteroid and bullet-vs-asteroid pass.
///
/// Walks the asteroid pool with swap-removal, so after a destruction the same
/// index is checked again. Children are added after the pass and are not
/// tested until the next frame. A fatal hit skips the rest of that asteroid
/// but bullets still resolve against the others.
fn resolve_collisions(state: &mut GameState, now: f64) {
    let tip_extension = state.tuning.bullet_tip_extension;
    let bouncy = state.player.power_ups.is_active(PowerUpKind::BouncyBullets);
    let invincible = state.player.power_ups.is_active(PowerUpKind::Invincibility);

    let mut fragments: Vec<Asteroid> = Vec::new();
    let mut i = 0;

    'asteroids: while i < state.asteroids.len() {
        let center = state.asteroids[i].position;
        let vertices = state.asteroids[i].vertices;
        let mut bounced = false;

        for (p0, p1) in polygon_edges(&vertices, center) {
            let ship_alive = state.phase == GamePhase::Playing;
            if ship_alive
                && !bounced
                && hull_hits_edge(&state.player.vertices, state.player.position, p0, p1)
            {
                if invincible {
                    state.player.bounce(edge_outward_normal(p0, p1, center));
                    state.events.push(GameEvent::PlayerBounced);
                    bounced = true;
                } else {
                    state.phase = GamePhase::GameOver;
                    state.events.push(GameEvent::PlayerHit);
                    log::info!("Ship destroyed! Final score {}", state.score());
                    i += 1;
                    continue 'asteroids;
                }
            }

            let Some(hit) = first_bullet_hit(&state.bullets, p0, p1, tip_extension) else {
                continue;
            };

            if bouncy {
                let normal = edge_outward_normal(p0, p1, center);
                let bullet = &mut state.bullets[hit];
                bullet.velocity = reflect_velocity(bullet.velocity, normal);
            } else {
                state.bullets.remove(hit);
            }

            let destroyed = state.asteroids.remove(i);
            state.player.score += destroyed.points(state.tuning.points_per_asteroid);
            state.events.push(GameEvent::AsteroidDestroyed {
                position: destroyed.position,
                generation: destroyed.generation,
            });
            log::debug!(
                "Asteroid (generation {}) destroyed, score {}",
                destroyed.generation,
                state.player.score
            );

            if let Some(children) = destroyed.fragment(&mut state.rng, &state.tuning) {
                fragments.extend(children);
            }
            if let Some(kind) = powerup::roll_drop(
                &mut state.rng,
                &state.tuning,
                &mut state.power_ups,
                destroyed.position,
                now,
            ) {
                log::debug!("{} power-up dropped", kind.as_str());
                state.events.push(GameEvent::PowerUpSpawned(kind));
            }

            // The last asteroid was swapped into slot i
            continue 'asteroids;
        }

        i += 1;
    }

    for asteroid in fragments {
        state.spawn_asteroid(asteroid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polar_to_cartesian;
    use crate::sim::pool::Pool;
    use crate::sim::state::Bullet;
    use crate::tuning::Tuning;
    use std::f32::consts::TAU;

    const DT: f32 = 1.0 / 60.0;

    /// A game with the player parked in a corner and no asteroids
    fn empty_game() -> GameState {
        let tuning = Tuning {
            world_max: Vec2::splat(1000.0),
            power_up_spawn_chance: 0.0,
            ..Tuning::default()
        };
        let mut state = GameState::new(tuning, 1234);
        state.asteroids.clear();
        state.player.position = Vec2::new(80.0, 920.0);
        state
    }

    /// Non-spinning regular 12-gon, so edge positions are known exactly
    fn rock(state: &mut GameState, position: Vec2, velocity: Vec2, generation: u8, radius: f32) {
        let scale = state.tuning.asteroid_scale / 2f32.powi(generation as i32);
        let mut asteroid =
            Asteroid::new(&mut state.rng, &state.tuning, position, velocity, scale, generation);
        asteroid.angular_velocity = 0.0;
        let count = asteroid.vertices.len();
        for (i, v) in asteroid.vertices.iter_mut().enumerate() {
            *v = polar_to_cartesian(radius, (i + 1) as f32 * TAU / count as f32);
        }
        asteroid.extent = radius;
        state.asteroids.push(asteroid).unwrap();
    }

    fn bullet_above(center: Vec2, height: f32) -> Bullet {
        let position = center - Vec2::new(0.0, height);
        Bullet {
            prev_position: position,
            position,
            velocity: Vec2::new(0.0, 900.0),
            radius: 10.0,
            spawned_at: None,
        }
    }

    fn aim_right(state: &GameState) -> TickInput {
        TickInput {
            pointer: state.player.position + Vec2::new(100.0, 0.0),
            ..Default::default()
        }
    }

    /// One frame of aiming right with no other input
    fn step(state: &mut GameState, now: f64) {
        let input = aim_right(state);
        tick(state, &input, DT, now);
    }

    #[test]
    fn test_thrust_direction() {
        let input = TickInput {
            up: true,
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(input.thrust_direction(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_empty_field_wins_without_physics() {
        let mut state = empty_game();
        state.player.velocity = Vec2::new(2.0, 0.0);
        let before = state.player.clone();

        let input = TickInput {
            right: true,
            fire: true,
            ..aim_right(&state)
        };
        tick(&mut state, &input, DT, 1.0);

        assert_eq!(state.phase, GamePhase::GameWon);
        assert_eq!(state.events(), &[GameEvent::GameWon]);
        assert_eq!(state.player, before);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_terminal_state_waits_for_restart() {
        let mut state = empty_game();
        state.phase = GamePhase::GameOver;
        step(&mut state, 1.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events().is_empty());

        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT, 2.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.events(), &[GameEvent::Restarted]);
        assert_eq!(state.asteroids.len(), state.tuning.asteroid_count);
    }

    #[test]
    fn test_collision_ends_game() {
        let mut state = empty_game();
        // Leftmost vertex sits on the ship
        let at = state.player.position + Vec2::new(60.0, 0.0);
        rock(&mut state, at, Vec2::ZERO, 0, 60.0);
        step(&mut state, 1.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events().contains(&GameEvent::PlayerHit));
    }

    #[test]
    fn test_fatal_hit_still_resolves_bullets() {
        let mut state = empty_game();
        let at = state.player.position + Vec2::new(60.0, 0.0);
        rock(&mut state, at, Vec2::ZERO, 0, 60.0);
        let small = Vec2::new(500.0, 500.0);
        rock(&mut state, small, Vec2::ZERO, 2, 30.0);
        state.bullets.push(bullet_above(small, 40.0)).unwrap();

        step(&mut state, 1.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        let hits = state.events().iter().filter(|e| **e == GameEvent::PlayerHit).count();
        assert_eq!(hits, 1);
        // The rock behind the ship still took the bullet
        assert_eq!(state.asteroids.len(), 1);
        assert_eq!(state.asteroids[0].position, at);
        assert!(state.bullets.is_empty());
        assert_eq!(state.score(), state.tuning.points_per_asteroid / 3);
    }

    #[test]
    fn test_shot_event_counts_spawned_bullets() {
        let mut state = empty_game();
        rock(&mut state, Vec2::new(900.0, 100.0), Vec2::ZERO, 0, 60.0);
        state.bullets = Pool::with_capacity(2);
        state.player.power_ups.activate(PowerUpKind::Shotgun, 0.0);
        let input = TickInput {
            fire: true,
            ..aim_right(&state)
        };

        tick(&mut state, &input, DT, 1.0);
        assert_eq!(state.bullets.len(), 2);
        assert!(state.events().contains(&GameEvent::ShotFired { bullets: 2 }));

        // Pool still full once the cooldown is over: nothing fired
        tick(&mut state, &input, DT, 1.5);
        assert_eq!(state.bullets.len(), 2);
        assert!(!state.events().iter().any(|e| matches!(e, GameEvent::ShotFired { .. })));
    }

    #[test]
    fn test_invincible_ship_bounces() {
        let mut state = empty_game();
        state.player.power_ups.activate(PowerUpKind::Invincibility, 0.0);
        state.player.velocity = Vec2::new(1.5, 0.0);
        let at = state.player.position + Vec2::new(60.0, 0.0);
        rock(&mut state, at, Vec2::ZERO, 0, 60.0);

        step(&mut state, 1.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.events().contains(&GameEvent::PlayerBounced));
        assert_eq!(state.asteroids.len(), 1);
        // Pushed back out along the contact normal at the same speed
        assert!(state.player.velocity.x < 0.0);
        let speed = 1.5 * (-state.tuning.player_drag * DT).exp();
        assert!((state.player.velocity.length() - speed).abs() < 1e-4);
    }

    #[test]
    fn test_fire_spawns_and_reports() {
        let mut state = empty_game();
        rock(&mut state, Vec2::new(900.0, 100.0), Vec2::ZERO, 0, 60.0);
        let input = TickInput {
            fire: true,
            ..aim_right(&state)
        };
        tick(&mut state, &input, DT, 1.0);
        assert_eq!(state.bullets.len(), 1);
        assert!(state.events().contains(&GameEvent::ShotFired { bullets: 1 }));

        // Still cooling down on the next frame
        tick(&mut state, &input, DT, 1.0 + DT as f64);
        assert_eq!(state.bullets.len(), 1);
        assert!(!state.events().iter().any(|e| matches!(e, GameEvent::ShotFired { .. })));
    }

    #[test]
    fn test_power_up_expires_during_tick() {
        let mut state = empty_game();
        rock(&mut state, Vec2::new(900.0, 100.0), Vec2::ZERO, 0, 60.0);
        state.player.power_ups.activate(PowerUpKind::Shotgun, 0.0);
        let duration = state.tuning.power_up_duration as f64;

        step(&mut state, duration - 0.01);
        assert!(state.player.power_ups.is_active(PowerUpKind::Shotgun));

        step(&mut state, duration);
        assert!(!state.player.power_ups.is_active(PowerUpKind::Shotgun));
        assert!(state.events().contains(&GameEvent::PowerUpExpired(PowerUpKind::Shotgun)));
    }

    #[test]
    fn test_last_generation_leaves_no_children() {
        let mut state = empty_game();
        let small = Vec2::new(500.0, 500.0);
        rock(&mut state, small, Vec2::ZERO, 2, 30.0);
        rock(&mut state, Vec2::new(900.0, 100.0), Vec2::ZERO, 0, 60.0);
        // Crosses the top edge (y = 470) during this frame's sweep
        state.bullets.push(bullet_above(small, 40.0)).unwrap();

        step(&mut state, 1.0);
        assert_eq!(state.asteroids.len(), 1);
        assert_eq!(state.asteroids[0].generation, 0);
        assert!(state.bullets.is_empty());
        assert_eq!(state.score(), state.tuning.points_per_asteroid / 3);
        assert!(state.events().contains(&GameEvent::AsteroidDestroyed {
            position: small,
            generation: 2
        }));
    }

    #[test]
    fn test_children_wait_for_next_frame() {
        let mut state = empty_game();
        state.player.power_ups.activate(PowerUpKind::BouncyBullets, 0.0);
        let big = Vec2::new(500.0, 500.0);
        rock(&mut state, big, Vec2::new(0.0, 30.0), 0, 60.0);
        state.bullets.push(bullet_above(big, 70.0)).unwrap();

        step(&mut state, 1.0);
        // Parent gone, both children present, bullet survived and turned back
        assert_eq!(state.asteroids.len(), 2);
        assert!(state.asteroids.iter().all(|a| a.generation == 1));
        assert_eq!(state.bullets.len(), 1);
        assert!(state.bullets[0].velocity.y < 0.0);
        assert_eq!(state.score(), state.tuning.points_per_asteroid);
    }

    #[test]
    fn test_power_up_drop_and_pickup() {
        let mut state = empty_game();
        state.tuning.power_up_spawn_chance = 1.0;
        let small = Vec2::new(500.0, 500.0);
        rock(&mut state, small, Vec2::ZERO, 2, 30.0);
        rock(&mut state, Vec2::new(900.0, 100.0), Vec2::ZERO, 0, 60.0);
        state.bullets.push(bullet_above(small, 40.0)).unwrap();

        step(&mut state, 1.0);
        assert_eq!(state.power_ups.len(), 1);
        let kind = state.power_ups[0].kind;
        assert!(state.events().contains(&GameEvent::PowerUpSpawned(kind)));

        // Park the ship on the drop once it has grown in
        state.player.position = state.power_ups[0].position;
        state.player.velocity = Vec2::ZERO;
        step(&mut state, 3.0);
        assert!(state.power_ups.is_empty());
        assert!(state.player.power_ups.is_active(kind));
        assert_eq!(state.player.power_ups.activated_at(kind), Some(3.0));
        assert!(state.events().contains(&GameEvent::PowerUpCollected(kind)));
    }
}
