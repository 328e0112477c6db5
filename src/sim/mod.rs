//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or audio dependencies

pub mod arena;
pub mod autopilot;
pub mod collision;
pub mod state;
pub mod tick;

pub use arena::Arena;
pub use autopilot::Autopilot;
pub use collision::{Aabb, in_closed_bounds};
pub use state::{Enemy, GameEvent, GameState, Player, Projectile, Snapshot};
pub use tick::{TickInput, tick};
