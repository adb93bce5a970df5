//! Collision detection for circles and axis-aligned rectangles
//!
//! Meteors and the ship collide as circles; lasers are rectangles. Detection
//! only - callers decide what a hit means.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A circle collider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// An axis-aligned rectangle, `pos` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    /// Closest point of the rectangle to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min(), self.max())
    }
}

/// Circle vs circle. Touching counts as a hit.
pub fn circles_overlap(a: &Circle, b: &Circle) -> bool {
    let reach = a.radius + b.radius;
    a.center.distance_squared(b.center) <= reach * reach
}

/// Circle vs rectangle. Touching counts as a hit.
pub fn circle_rect_overlap(circle: &Circle, rect: &Rect) -> bool {
    let closest = rect.closest_point(circle.center);
    closest.distance_squared(circle.center) <= circle.radius * circle.radius
}

/// Rectangle vs circle, same answer as [`circle_rect_overlap`]
#[inline]
pub fn rect_circle_overlap(rect: &Rect, circle: &Circle) -> bool {
    circle_rect_overlap(circle, rect)
}
