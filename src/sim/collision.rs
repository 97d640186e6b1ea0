//! Axis-aligned box geometry
//!
//! Every entity is a square. Overlap uses strict inequalities, so boxes that
//! only share an edge do not collide.

use glam::Vec2;

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// A square hitbox
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Edge length
    pub size: f32,
}

impl Rect {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self { pos, size }
    }
}

/// Check whether two boxes overlap (edge contact is not overlap)
#[inline]
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.pos.x < b.pos.x + b.size
        && b.pos.x < a.pos.x + a.size
        && a.pos.y < b.pos.y + b.size
        && b.pos.y < a.pos.y + a.size
}

/// Clamp a box so it stays fully inside the arena
pub fn clamp_to_arena(pos: Vec2, size: f32) -> Vec2 {
    Vec2::new(
        pos.x.clamp(0.0, ARENA_WIDTH - size),
        pos.y.clamp(0.0, ARENA_HEIGHT - size),
    )
}

/// Bottom edge at or above the top of the arena
#[inline]
pub fn above_arena(r: Rect) -> bool {
    r.pos.y + r.size <= 0.0
}

/// Bottom edge strictly above the top of the arena
#[inline]
pub fn fully_above(r: Rect) -> bool {
    r.pos.y + r.size < 0.0
}

/// No part of the box is inside the arena
pub fn outside_arena(r: Rect) -> bool {
    let visible = r.pos.x + r.size > 0.0
        && r.pos.x < ARENA_WIDTH
        && r.pos.y + r.size > 0.0
        && r.pos.y < ARENA_HEIGHT;
    !visible
}

/// Velocity of length `speed` pointing from `from` to `to`.
/// `None` when the points coincide.
pub fn aim(from: Vec2, to: Vec2, speed: f32) -> Option<Vec2> {
    let delta = to - from;
    let dist_sq = delta.length_squared();
    if dist_sq == 0.0 {
        return None;
    }
    Some(delta / dist_sq.sqrt() * speed)
}
