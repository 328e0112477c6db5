//! Arena geometry
//!
//! Every clamp margin in the game is derived from the arena size and the
//! wall thickness, so changing `width`/`height` reshapes all bounds at once.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;

/// The bounded rectangular play area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Centre of the screen
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Allowed range for the player's top-left corner: [32, w - 96] x [32, h - 96]
    pub fn player_bounds(&self) -> (Vec2, Vec2) {
        let far = WALL_THICKNESS + PLAYER_SIZE;
        (
            Vec2::splat(WALL_THICKNESS),
            Vec2::new(self.width - far, self.height - far),
        )
    }

    /// Allowed range for the enemy's top-left corner: [32, w - 80] x [32, h - 80]
    pub fn enemy_bounds(&self) -> (Vec2, Vec2) {
        let far = WALL_THICKNESS + ENEMY_SIZE;
        (
            Vec2::splat(WALL_THICKNESS),
            Vec2::new(self.width - far, self.height - far),
        )
    }

    /// Region a projectile must stay inside (closed): [32, w - 32] x [32, h - 32]
    pub fn projectile_bounds(&self) -> Aabb {
        Aabb::from_corners(
            Vec2::splat(WALL_THICKNESS),
            Vec2::new(self.width - WALL_THICKNESS, self.height - WALL_THICKNESS),
        )
    }

    /// Inclusive integer ranges used when spawning the enemy
    pub fn enemy_spawn_range(&self) -> ((i32, i32), (i32, i32)) {
        (
            (ENEMY_SPAWN_MIN, self.width as i32 - ENEMY_SPAWN_FAR_MARGIN),
            (ENEMY_SPAWN_MIN, self.height as i32 - ENEMY_SPAWN_FAR_MARGIN),
        )
    }

    /// Whether every margin still describes a non-empty range
    pub fn is_playable(&self) -> bool {
        let (player_min, player_max) = self.player_bounds();
        let ((sx0, sx1), (sy0, sy1)) = self.enemy_spawn_range();
        self.width.is_finite()
            && self.height.is_finite()
            && player_max.x >= player_min.x
            && player_max.y >= player_min.y
            && sx1 >= sx0
            && sy1 >= sy0
    }
}
