//! End-to-end simulation scenarios driven through the public API

use asteroids::Tuning;
use asteroids::sim::{
    Asteroid, Bullet, GameEvent, GamePhase, GameState, PowerUpKind, TickInput, tick,
};
use glam::Vec2;

const DT: f32 = 1.0 / 60.0;

fn tuning() -> Tuning {
    Tuning {
        world_min: Vec2::ZERO,
        world_max: Vec2::splat(1000.0),
        power_up_spawn_chance: 0.0,
        bullet_lifetime: None,
        ..Tuning::default()
    }
}

/// World 0..1000, one motionless generation-0 asteroid at (500, 500) and a
/// radius-10 bullet at (500, 400) flying straight down at 900 units/s.
fn shooting_gallery() -> GameState {
    let mut state = GameState::new(tuning(), 99);
    state.asteroids.clear();
    state.player.position = Vec2::new(100.0, 900.0);

    let scale = state.tuning.asteroid_scale;
    let asteroid = Asteroid::new(
        &mut state.rng,
        &state.tuning,
        Vec2::new(500.0, 500.0),
        Vec2::ZERO,
        scale,
        0,
    );
    state.asteroids.push(asteroid).unwrap();

    let start = Vec2::new(500.0, 400.0);
    state
        .bullets
        .push(Bullet {
            prev_position: start,
            position: start,
            velocity: Vec2::new(0.0, 900.0),
            radius: 10.0,
            spawned_at: None,
        })
        .unwrap();
    state
}

fn idle(state: &GameState) -> TickInput {
    TickInput {
        pointer: state.player.position + Vec2::new(-50.0, 0.0),
        ..Default::default()
    }
}

/// Tick until the asteroid count changes; returns the frames taken
fn run_until_hit(state: &mut GameState) -> usize {
    for frame in 1..=60 {
        let input = idle(state);
        tick(state, &input, DT, frame as f64 * DT as f64);
        if state.asteroids.len() != 1 {
            return frame;
        }
    }
    panic!("bullet never hit the asteroid");
}

#[test]
fn bullet_splits_asteroid() {
    let mut state = shooting_gallery();
    run_until_hit(&mut state);

    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.asteroids.len(), 2);
    assert!(state.asteroids.iter().all(|a| a.generation == 1));
    assert!(state.bullets.is_empty());
    assert_eq!(state.score(), state.tuning.points_per_asteroid);
    assert!(state.events().contains(&GameEvent::AsteroidDestroyed {
        position: Vec2::new(500.0, 500.0),
        generation: 0,
    }));
}

#[test]
fn bouncy_bullet_survives_the_hit() {
    let mut state = shooting_gallery();
    state.player.power_ups.activate(PowerUpKind::BouncyBullets, 0.0);
    run_until_hit(&mut state);

    assert_eq!(state.asteroids.len(), 2);
    assert_eq!(state.bullets.len(), 1);
    let bullet = &state.bullets[0];
    assert!((bullet.velocity.length() - 900.0).abs() < 1e-2);
    assert_ne!(bullet.velocity, Vec2::new(0.0, 900.0));
}

#[test]
fn children_fly_apart() {
    let mut state = GameState::new(tuning(), 3);
    state.asteroids.clear();
    let velocity = Vec2::new(40.0, -30.0);
    let scale = state.tuning.asteroid_scale;
    let parent = Asteroid::new(
        &mut state.rng,
        &state.tuning,
        Vec2::new(500.0, 500.0),
        velocity,
        scale,
        0,
    );

    let [a, b] = parent.fragment(&mut state.rng, &state.tuning).unwrap();
    assert_eq!(a.velocity, velocity);
    assert_eq!(b.velocity, -velocity);
    assert!((a.position + b.position - 2.0 * parent.position).length() < 1e-3);
    assert_eq!(a.scale, scale / 2.0);
    assert_eq!(a.scale, b.scale);
}

#[test]
fn clearing_the_field_wins() {
    let mut state = GameState::new(tuning(), 4);
    state.asteroids.clear();
    let input = idle(&state);
    tick(&mut state, &input, DT, 1.0);
    assert_eq!(state.phase, GamePhase::GameWon);

    // Stays won until a restart
    tick(&mut state, &input, DT, 2.0);
    assert_eq!(state.phase, GamePhase::GameWon);
    assert!(state.events().is_empty());
}

#[test]
fn reset_is_idempotent() {
    let mut state = GameState::new(tuning(), 8);
    let input = TickInput {
        fire: true,
        up: true,
        ..idle(&state)
    };
    for frame in 0..30 {
        tick(&mut state, &input, DT, frame as f64 * DT as f64);
    }
    state.phase = GamePhase::GameOver;

    state.reset(42);
    let first = serde_json::to_string(&state).unwrap();
    state.phase = GamePhase::GameWon;
    state.reset(42);
    let second = serde_json::to_string(&state).unwrap();
    assert_eq!(first, second);

    let fresh = serde_json::to_string(&GameState::new(tuning(), 42)).unwrap();
    assert_eq!(first, fresh);
}

#[test]
fn same_seed_same_game() {
    let mut a = GameState::new(tuning(), 1234);
    let mut b = GameState::new(tuning(), 1234);
    let input = TickInput {
        fire: true,
        right: true,
        pointer: Vec2::new(500.0, 0.0),
        ..Default::default()
    };
    for frame in 0..300 {
        let now = frame as f64 * DT as f64;
        tick(&mut a, &input, DT, now);
        tick(&mut b, &input, DT, now);
    }
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn everything_stays_in_the_wrap_band() {
    let mut state = GameState::new(tuning(), 77);
    let (min, max) = (state.tuning.world_min, state.tuning.world_max);
    let input = TickInput {
        down: true,
        left: true,
        pointer: Vec2::new(500.0, 500.0),
        ..Default::default()
    };
    state.player.power_ups.activate(PowerUpKind::Invincibility, 0.0);

    for frame in 0..600 {
        tick(&mut state, &input, DT, frame as f64 * DT as f64 * 0.01);
        for asteroid in state.asteroids.iter() {
            let margin = Vec2::splat(asteroid.extent + 1e-2);
            assert!(asteroid.position.cmpge(min - margin).all());
            assert!(asteroid.position.cmple(max + margin).all());
        }
        let margin = Vec2::splat(state.player.height / 2.0 + 1e-2);
        assert!(state.player.position.cmpge(min - margin).all());
        assert!(state.player.position.cmple(max + margin).all());
    }
}
