//! Asteroids headless runner
//!
//! Plays a number of frames with the autopilot at a fixed 60 Hz and reports
//! how the games went.
//!
//! Usage: `asteroids [TUNING_JSON] [SEED] [FRAMES]`

use serde::Serialize;

use asteroids::Tuning;
use asteroids::platform::{Autopilot, FrameClock};
use asteroids::sim::{GameEvent, GameState, tick};

/// Host frame time fed to the clock
const FRAME_DT: f32 = 1.0 / 60.0;
/// Two minutes of play
const DEFAULT_FRAMES: u64 = 60 * 120;
const DEFAULT_SEED: u64 = 0x5eed;

/// Run report printed to stdout as JSON
#[derive(Debug, Default, Serialize)]
struct Summary {
    seed: u64,
    frames: u64,
    games: u32,
    wins: u32,
    losses: u32,
    best_score: u32,
    asteroids_destroyed: u32,
    shots_fired: usize,
    power_ups_collected: u32,
}

fn parse_arg<T: std::str::FromStr>(arg: Option<&String>, name: &str, default: T) -> T {
    match arg {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid {name} {raw:?}");
            default
        }),
        None => default,
    }
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Asteroids (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let tuning = match args.first() {
        Some(path) => Tuning::load_or_default(path),
        None => Tuning::default(),
    };
    let seed = parse_arg(args.get(1), "seed", DEFAULT_SEED);
    let frames = parse_arg(args.get(2), "frame count", DEFAULT_FRAMES);

    let mut state = GameState::new(tuning, seed);
    let mut clock = FrameClock::new();
    let pilot = Autopilot::default();
    let mut summary = Summary {
        seed,
        frames,
        games: 1,
        ..Summary::default()
    };

    for _ in 0..frames {
        let frame = clock.advance(FRAME_DT);
        let input = pilot.input(&state);
        tick(&mut state, &input, frame.dt, frame.now);

        for event in state.events() {
            match event {
                GameEvent::ShotFired { bullets } => summary.shots_fired += bullets,
                GameEvent::AsteroidDestroyed { .. } => summary.asteroids_destroyed += 1,
                GameEvent::PowerUpCollected(kind) => {
                    summary.power_ups_collected += 1;
                    log::info!("Picked up {} at {:.1}s", kind.as_str(), frame.now);
                }
                GameEvent::PlayerHit => summary.losses += 1,
                GameEvent::GameWon => summary.wins += 1,
                GameEvent::Restarted => summary.games += 1,
                _ => {}
            }
        }
        summary.best_score = summary.best_score.max(state.score());
    }

    log::info!(
        "Played {} game(s) in {:.1}s: {} won, {} lost, best score {}",
        summary.games,
        clock.now(),
        summary.wins,
        summary.losses,
        summary.best_score
    );
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize summary: {e}"),
    }
}
