//! Retro Shooter entry point
//!
//! Headless build: no window or audio device. Runs one session on the
//! autopilot against the logging presenter, then prints the last game frame.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use retro_shooter::Settings;
use retro_shooter::audio::LogSink;
use retro_shooter::runner::{AutopilotInput, LogPresenter, Runner};
use retro_shooter::settings::SETTINGS_FILE;

/// Demo length cap (frames, roughly 10 ms each)
const DEMO_FRAME_BUDGET: u64 = 6_000;

fn main() {
    env_logger::init();
    log::info!("Retro Shooter (headless) starting...");

    let settings = Settings::load(Path::new(SETTINGS_FILE));
    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    });
    log::info!("Session seed: {}", seed);

    let mut runner = Runner::new(
        &settings,
        seed,
        AutopilotInput::new(1, Some(DEMO_FRAME_BUDGET)),
        LogPresenter::new(100),
        LogSink,
    );
    let frame = runner.run();

    println!("Best score: {}", frame.best_score);
    if let Some(snapshot) = runner.last_snapshot() {
        match serde_json::to_string_pretty(snapshot) {
            Ok(json) => println!("{}", json),
            Err(e) => log::warn!("Could not serialize final snapshot: {}", e),
        }
    }
}
