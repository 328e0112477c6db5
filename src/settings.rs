//! Game settings and preferences
//!
//! Read from an optional JSON file next to the binary. Missing keys take
//! their defaults; an unreadable or invalid file falls back to defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::sim::Arena;

/// Default settings file name
pub const SETTINGS_FILE: &str = "retro_shooter_settings.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Playable area; all clamp margins derive from it
    pub arena: Arena,

    // === Timing ===
    /// Minimum wall-clock time per tick (milliseconds)
    pub tick_interval_ms: u64,
    /// Maximum ticks run per rendered frame
    pub max_substeps: u32,

    /// Session seed; `None` draws one from the clock
    pub seed: Option<u64>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena: Arena::default(),

            tick_interval_ms: (SIM_DT * 1000.0).round() as u64,
            max_substeps: MAX_SUBSTEPS,

            seed: None,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Repair values that cannot be played with, logging each fix
    pub fn validate(mut self) -> Self {
        if !self.arena.is_playable() {
            log::warn!(
                "Arena {}x{} too small for wall margins, using default",
                self.arena.width,
                self.arena.height
            );
            self.arena = Arena::default();
        }
        if self.tick_interval_ms == 0 {
            let default = Self::default().tick_interval_ms;
            log::warn!("tick_interval_ms must be at least 1, using {}", default);
            self.tick_interval_ms = default;
        }
        if self.max_substeps == 0 {
            log::warn!("max_substeps must be at least 1");
            self.max_substeps = 1;
        }
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("No settings at {} ({}), using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.validate()
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}
