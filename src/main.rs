//! Monsters Under the Bed headless entry point
//!
//! Plays one session in real time without a tracker or renderer: the anchor
//! is "found" immediately, a stand-in collision source reports hands that
//! reach their candy, and a scripted player taps the most dangerous hand.
//!
//! Usage: `bed-monsters [--idle] [tuning.json]`
//! - `--idle`: never tap (the monsters win)

use std::time::Duration;

use bed_monsters::platform::GameHost;
use bed_monsters::sim::{CollisionEvent, FrameTick, Game, GameEvent, GameState, TapEvent, UiSignal};
use bed_monsters::{AnchorId, SceneConfig, SetupError, Tuning};

/// Assets shipped with the headless build
const BUNDLED_ASSETS: [&str; 4] = ["bed2.png", "orc-hand.usdz", "gumdrop.usdz", "plane.usda"];

/// Frames between scripted taps (~5 taps per second at 60 Hz)
const TAP_EVERY_FRAMES: u32 = 12;

/// Load tuning from an optional JSON file
fn load_tuning(path: Option<&str>) -> Result<Tuning, SetupError> {
    let Some(path) = path else {
        log::info!("Using default tuning");
        return Ok(Tuning::default());
    };
    let json = std::fs::read_to_string(path)
        .map_err(|e| SetupError::InvalidTuning(format!("cannot read {}: {}", path, e)))?;
    log::info!("Loaded tuning from {}", path);
    Tuning::from_json(&json)
}

/// Hands whose top has reached their candy, as a physics engine would report
fn touching_pairs(state: &GameState) -> Vec<CollisionEvent> {
    state
        .hands
        .iter()
        .zip(&state.candies)
        .filter(|(hand, candy)| candy.active && hand.position().y >= candy.position.y)
        .map(|(hand, candy)| CollisionEvent {
            hand: hand.id,
            candy: candy.id,
        })
        .collect()
}

/// The highest hand that still has a candy to eat
fn most_dangerous(state: &GameState) -> Option<TapEvent> {
    state
        .hands
        .iter()
        .zip(&state.candies)
        .filter(|(_, candy)| candy.active)
        .max_by(|(a, _), (b, _)| a.offset.total_cmp(&b.offset))
        .map(|(hand, _)| TapEvent::hand(hand.id.index()))
}

#[tokio::main]
async fn main() {
    env_logger::init();
    log::info!("Monsters Under the Bed (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let idle = args.iter().any(|a| a == "--idle");
    let tuning_path = args.iter().find(|a| !a.starts_with("--")).map(String::as_str);

    let setup = SceneConfig::default()
        .validate(&BUNDLED_ASSETS[..])
        .and_then(|target| {
            log::info!(
                "Tracking {} ({} m wide)",
                target.image,
                target.physical_width
            );
            load_tuning(tuning_path)
        })
        .and_then(Game::new);
    let game = match setup {
        Ok(game) => game,
        Err(e) => {
            log::error!("Setup failed: {}", e);
            std::process::exit(1);
        }
    };

    let (mut host, mut events) = GameHost::new(game);
    host.anchor_ready(AnchorId(1));
    host.ui_signal(UiSignal::StartPressed);

    let started = tokio::time::Instant::now();
    let mut frames = tokio::time::interval(Duration::from_millis(16));
    let mut frame_count: u32 = 0;

    'session: loop {
        tokio::select! {
            _ = frames.tick() => {
                frame_count += 1;
                host.frame(FrameTick::at(started.elapsed().as_secs_f64()));

                for collision in host.with_state(touching_pairs) {
                    host.collision(collision);
                }
                if !idle && frame_count % TAP_EVERY_FRAMES == 0 {
                    if let Some(tap) = host.with_state(most_dangerous) {
                        host.tap(tap);
                    }
                }
            }
            Some(event) = events.recv() => {
                match event {
                    GameEvent::Countdown { seconds_remaining } => {
                        log::info!("Time Left: {}s", seconds_remaining);
                    }
                    GameEvent::PhaseChanged { to, .. } if to.is_finished() => {
                        break 'session;
                    }
                    _ => log::debug!("{:?}", event),
                }
            }
        }
    }

    let hud = host.hud();
    log::info!("{} - {}", hud.status, hud.phase.message());
    log::info!("Candies left: {}", hud.candies_left);
}
