//! Idle/demo controller
//!
//! Produces `TickInput` from the current state so the game can play itself:
//! kite away from the enemy when it gets close, drift back toward the middle
//! otherwise, and fire on a fixed cadence.

use glam::Vec2;

use super::state::GameState;
use super::tick::TickInput;
use crate::distance;

/// Enemy distance (centre to centre) below which the autopilot retreats
pub const DEFAULT_FLEE_RADIUS: f32 = 160.0;
/// Ticks between shots
pub const DEFAULT_FIRE_INTERVAL: u32 = 15;

#[derive(Debug, Clone)]
pub struct Autopilot {
    pub flee_radius: f32,
    pub fire_interval: u32,
    ticks_since_fire: u32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(DEFAULT_FLEE_RADIUS, DEFAULT_FIRE_INTERVAL)
    }
}

impl Autopilot {
    pub fn new(flee_radius: f32, fire_interval: u32) -> Self {
        Self {
            flee_radius,
            fire_interval: fire_interval.max(1),
            ticks_since_fire: 0,
        }
    }

    /// Decide the input for the next tick
    pub fn input(&mut self, state: &GameState) -> TickInput {
        let me = state.player.center();
        let enemy = state.enemy.bounds();
        let enemy_center = (enemy.min + enemy.max) * 0.5;

        let heading = if distance(me, enemy_center) < self.flee_radius {
            let away = me - enemy_center;
            // Cornered on an axis: slide along the wall instead
            let (min, max) = state.arena.player_bounds();
            let pos = state.player.pos;
            let slide = |v: f32| if v.abs() < f32::EPSILON { 1.0 } else { v.signum() };
            let mut dir = away;
            if (pos.x <= min.x && away.x < 0.0) || (pos.x >= max.x && away.x > 0.0) {
                dir = Vec2::new(0.0, slide(away.y) * self.flee_radius);
            }
            if (pos.y <= min.y && away.y < 0.0) || (pos.y >= max.y && away.y > 0.0) {
                dir = Vec2::new(slide(away.x) * self.flee_radius, 0.0);
            }
            dir
        } else {
            state.arena.center() - me
        };

        let dead_zone = 3.0;
        let mut input = TickInput {
            left: heading.x < -dead_zone,
            right: heading.x > dead_zone,
            up: heading.y < -dead_zone,
            down: heading.y > dead_zone,
            fire: false,
        };

        self.ticks_since_fire += 1;
        if self.ticks_since_fire >= self.fire_interval {
            self.ticks_since_fire = 0;
            input.fire = true;
        }

        input
    }

    /// Forget cadence state (on a new game)
    pub fn reset(&mut self) {
        self.ticks_since_fire = 0;
    }
}
