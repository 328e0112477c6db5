//! Retro Shooter - a single-screen arcade shooter core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, tick, collisions)
//! - `session`: Start / Playing / GameOver state machine
//! - `runner`: Fixed-step loop driving a session against a presentation adapter
//! - `audio`: Sound cue routing with volume settings
//! - `settings`: Serializable configuration

pub mod audio;
pub mod runner;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::{Phase, Session, SessionInput};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (10 ms pacing, ~100 Hz)
    pub const SIM_DT: f32 = 0.01;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;
    /// Wall thickness, the inset of every playable bound
    pub const WALL_THICKNESS: f32 = 32.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 64.0;
    pub const PLAYER_MAX_HEALTH: u32 = 100;
    /// Units moved per tick per pressed direction
    pub const PLAYER_STEP: f32 = 5.0;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 48.0;
    pub const ENEMY_MAX_HEALTH: u32 = 50;
    /// Units moved per tick along each axis
    pub const ENEMY_STEP: f32 = 2.0;
    /// Respawn margins: x in [50, width - 100], y in [50, height - 100]
    pub const ENEMY_SPAWN_MIN: i32 = 50;
    pub const ENEMY_SPAWN_FAR_MARGIN: i32 = 100;

    /// Projectile speed (units per tick)
    pub const PROJECTILE_SPEED: f32 = 10.0;
    /// Distance from the player sprite centre to the muzzle
    pub const MUZZLE_OFFSET: f32 = 32.0;

    /// Damage and scoring
    pub const PROJECTILE_DAMAGE: u32 = 10;
    pub const CONTACT_DAMAGE_TO_PLAYER: u32 = 10;
    pub const CONTACT_DAMAGE_TO_ENEMY: u32 = 20;
    pub const KILL_REWARD: u64 = 10;
}

/// Angle (radians) of the direction from `from` to `to`
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
