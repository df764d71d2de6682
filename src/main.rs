//! Eight Ball headless runner
//!
//! Plays a computer-vs-computer match frame by frame and prints the final
//! match snapshot as JSON. An optional settings file may be passed as the
//! first argument; the mode is always forced to computer-vs-computer.
//!
//! Usage: `eight-ball [settings.json]` (`RUST_LOG=info` for turn-by-turn logs)

use eight_ball::sim::{GameState, TickInput, tick};
use eight_ball::{GameMode, Settings};

/// Hard stop so a stalled match cannot spin forever (~30 min at 60 fps)
const MAX_FRAMES: u64 = 108_000;

fn load_settings(path: Option<String>) -> Settings {
    let mut settings = match path {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Settings::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring invalid settings in {}: {}", path, e);
                Settings::default()
            }),
            Err(e) => {
                log::warn!("Could not read {}: {}", path, e);
                Settings::default()
            }
        },
        None => Settings::default(),
    };
    settings.mode = GameMode::ComputerVsComputer;
    settings
}

fn main() {
    env_logger::init();

    let settings = load_settings(std::env::args().nth(1));
    log::info!("Eight Ball (headless) starting, seed {}", settings.seed);

    let mut state = GameState::new(settings);
    let input = TickInput::default();
    let mut last_message = state.match_state.message.clone();

    while !state.match_state.is_over() && state.time_ticks < MAX_FRAMES {
        tick(&mut state, &input);
        if state.match_state.message != last_message {
            last_message = state.match_state.message.clone();
            log::info!("[frame {}] {}", state.time_ticks, last_message);
        }
    }

    if !state.match_state.is_over() {
        log::warn!("Stopped after {} frames without a result", state.time_ticks);
    }

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Failed to serialize snapshot: {}", e);
            std::process::exit(1);
        }
    }
}
