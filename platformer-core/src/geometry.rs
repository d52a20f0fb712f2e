//! Axis-aligned rectangles in world space
//!
//! World coordinates follow the screen convention: x grows to the right and
//! y grows downward, so `top()` is the smaller y coordinate of a rectangle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// How rectangles whose edges only touch are classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeRule {
    /// Zero-area overlap (shared edge or corner) is not an intersection
    Exclusive,
    /// Shared edges and corners count as an intersection
    Inclusive,
}

/// An axis-aligned bounding box described by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Geometric center of the rectangle
    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// Same size, moved by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            size: self.size,
        }
    }

    /// Same size, top-left corner placed at `min`
    pub fn with_min(&self, min: Vec2) -> Self {
        Self {
            min,
            size: self.size,
        }
    }

    /// Strict overlap test: rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Aabb) -> bool {
        intersects_with(self, other, EdgeRule::Exclusive)
    }
}

/// Overlap test shared by every collision query in the crate
pub fn intersects_with(a: &Aabb, b: &Aabb, rule: EdgeRule) -> bool {
    let overlap_min = a.min.max(b.min);
    let overlap_max = Vec2::new(a.right().min(b.right()), a.bottom().min(b.bottom()));
    match rule {
        EdgeRule::Exclusive => overlap_min.x < overlap_max.x && overlap_min.y < overlap_max.y,
        EdgeRule::Inclusive => overlap_min.x <= overlap_max.x && overlap_min.y <= overlap_max.y,
    }
}
