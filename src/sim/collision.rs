//! Collision detection for axis-aligned sprites
//!
//! Sprites are boxes anchored at their top-left corner. Overlap and
//! containment are strict, so boxes that merely share an edge do not touch.

use glam::Vec2;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box with top-left corner `pos` and the given square size
    pub fn from_sprite(pos: Vec2, size: f32) -> Self {
        Self {
            min: pos,
            max: pos + Vec2::splat(size),
        }
    }

    pub fn from_corners(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Strict overlap test: `a.min < b.max && a.max > b.min` on both axes
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Strict interior test (points on an edge are outside)
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x > self.min.x && p.x < self.max.x && p.y > self.min.y && p.y < self.max.y
    }
}

/// Closed bounds test (points on an edge are inside)
pub fn in_closed_bounds(p: Vec2, bounds: &Aabb) -> bool {
    (bounds.min.x..=bounds.max.x).contains(&p.x) && (bounds.min.y..=bounds.max.y).contains(&p.y)
}
