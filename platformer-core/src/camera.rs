//! Smoothed view that trails the body

use crate::geometry::Aabb;
use glam::Vec2;

pub const DEFAULT_TAKE: f32 = 0.03;
pub const DEFAULT_VIEW_SIZE: Vec2 = Vec2::new(512.0, 384.0);

/// A fixed-size view whose center eases toward a target every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub center: Vec2,
    pub view_size: Vec2,
    /// Fraction of the remaining distance covered per frame
    pub take: f32,
}

impl Camera {
    pub fn new(center: Vec2, view_size: Vec2, take: f32) -> Self {
        Self {
            center,
            view_size,
            take,
        }
    }

    /// Blend the center toward `target` by one frame's worth.
    ///
    /// The blend is per call, not per second: at a higher frame rate the
    /// camera catches up faster.
    pub fn follow(&mut self, target: Vec2) -> Vec2 {
        let keep = 1.0 - self.take;
        self.center = self.center * keep + target * self.take;
        self.center
    }

    /// The world-space rectangle currently in view
    pub fn visible_rect(&self) -> Aabb {
        Aabb::from_min_size(self.center - self.view_size / 2.0, self.view_size)
    }
}
