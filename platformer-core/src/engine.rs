use crate::geometry::Aabb;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A static, immutable piece of level geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    rect: Aabb,
}

impl Obstacle {
    pub fn new(rect: Aabb) -> Self {
        Self { rect }
    }

    pub fn rect(&self) -> &Aabb {
        &self.rect
    }
}

/// Control flags sampled by the input collaborator before each step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl Controls {
    pub const NONE: Controls = Controls {
        left: false,
        right: false,
        jump: false,
    };
}

/// Movement tuning of a body.
///
/// `jump_velocity`, `gravity` and `max_downward_velocity` are derived from
/// `jump_height` and `flight_time` once, in [`BodyConstants::new`]:
///
/// ```text
/// jump_velocity         = 2 * jump_height * (2 / flight_time)
/// gravity               = (2 / flight_time) * jump_velocity
/// max_downward_velocity = jump_velocity
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyConstants {
    pub walk_speed: f32,
    pub flight_time: f32,
    pub jump_height: f32,
    pub jump_velocity: f32,
    pub gravity: f32,
    pub max_downward_velocity: f32,
}

impl BodyConstants {
    pub fn new(walk_speed: f32, flight_time: f32, jump_height: f32) -> Self {
        let jump_velocity = 2.0 * jump_height * (2.0 / flight_time);
        let gravity = (2.0 / flight_time) * jump_velocity;
        Self {
            walk_speed,
            flight_time,
            jump_height,
            jump_velocity,
            gravity,
            max_downward_velocity: jump_velocity,
        }
    }
}

/// The single controllable body of the simulation
#[derive(Debug, Clone)]
pub struct Body {
    pub(crate) rect: Aabb,
    pub(crate) velocity: Vec2,
    pub(crate) is_on_ground: bool,
    pub controls: Controls,
    spawn_point: Vec2,
    constants: BodyConstants,
}

impl Body {
    /// Create a body at rest at `spawn_point`
    pub fn new(spawn_point: Vec2, size: Vec2, constants: BodyConstants) -> Self {
        log::info!(
            "body created: gravity = {}, jump velocity = {}",
            constants.gravity,
            constants.jump_velocity
        );
        Self {
            rect: Aabb::from_min_size(spawn_point, size),
            velocity: Vec2::ZERO,
            is_on_ground: false,
            controls: Controls::NONE,
            spawn_point,
            constants,
        }
    }

    /// Place the body somewhere other than its spawn point, e.g. for a test setup
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.rect = self.rect.with_min(position);
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn rect(&self) -> &Aabb {
        &self.rect
    }

    pub fn position(&self) -> Vec2 {
        self.rect.min
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn is_on_ground(&self) -> bool {
        self.is_on_ground
    }

    pub fn spawn_point(&self) -> Vec2 {
        self.spawn_point
    }

    pub fn constants(&self) -> &BodyConstants {
        &self.constants
    }

    /// Geometric center, the point the camera follows
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }
}

/// Respawn thresholds: a body beyond any of them is sent back to its spawn point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapBounds {
    /// Respawn once the body's top edge is below this y
    pub fall_limit: f32,
    /// Respawn once the body's right edge is left of this x
    pub left_limit: f32,
    /// Respawn once the body's left edge is right of this x
    pub right_limit: f32,
}

impl Default for MapBounds {
    fn default() -> Self {
        Self {
            fall_limit: 1100.0,
            left_limit: -100.0,
            right_limit: 600.0,
        }
    }
}

impl MapBounds {
    pub fn contains(&self, rect: &Aabb) -> bool {
        !(rect.top() > self.fall_limit
            || rect.right() < self.left_limit
            || rect.left() > self.right_limit)
    }
}

/// The physics world: one body and the level it moves through
#[derive(Debug, Clone)]
pub struct World {
    pub body: Body,
    pub obstacles: Vec<Obstacle>,
    pub bounds: MapBounds,
}

impl World {
    pub fn new(body: Body, obstacles: Vec<Obstacle>, bounds: MapBounds) -> Self {
        Self {
            body,
            obstacles,
            bounds,
        }
    }
}
