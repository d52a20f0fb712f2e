//! Scenario files: the level layout and body tuning a simulation starts from
//!
//! Scenarios are JSON documents. Every field is optional and falls back to the
//! reference level, so `{}` describes the stock five-platform layout.

use crate::camera::{Camera, DEFAULT_TAKE, DEFAULT_VIEW_SIZE};
use crate::diagnostics::Diagnostics;
use crate::engine::{Body, BodyConstants, Controls, MapBounds, Obstacle, World};
use crate::geometry::Aabb;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed scenario: {0}")]
    Syntax(#[from] serde_json::Error),
    #[error("invalid scenario:\n{0}")]
    Invalid(Diagnostics),
}

/// One rectangle of level geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObstacleDecl {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ObstacleDecl {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn rect(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BodyDecl {
    pub spawn: Vec2,
    pub size: Vec2,
    pub walk_speed: f32,
    pub jump_height: f32,
    pub flight_time: f32,
}

impl Default for BodyDecl {
    fn default() -> Self {
        Self {
            spawn: Vec2::new(100.0, 950.0),
            size: Vec2::new(20.0, 28.0),
            walk_speed: 100.0,
            jump_height: 80.0,
            flight_time: 0.75,
        }
    }
}

impl BodyDecl {
    pub fn spawn_rect(&self) -> Aabb {
        Aabb::from_min_size(self.spawn, self.size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraDecl {
    pub take: f32,
    pub view_size: Vec2,
}

impl Default for CameraDecl {
    fn default() -> Self {
        Self {
            take: DEFAULT_TAKE,
            view_size: DEFAULT_VIEW_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowDecl {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for WindowDecl {
    fn default() -> Self {
        Self {
            title: "physics".to_string(),
            width: 1024.0,
            height: 768.0,
        }
    }
}

/// Fixed-rate stepping used by headless runs and the single-step button
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulateDecl {
    pub frames_per_second: f32,
    pub frames: usize,
}

impl Default for SimulateDecl {
    fn default() -> Self {
        Self {
            frames_per_second: 60.0,
            frames: 600,
        }
    }
}

impl SimulateDecl {
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.frames_per_second
    }
}

/// Controls held for a number of consecutive frames
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputSegment {
    pub frames: usize,
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default)]
    pub jump: bool,
}

impl InputSegment {
    pub fn controls(&self) -> Controls {
        Controls {
            left: self.left,
            right: self.right,
            jump: self.jump,
        }
    }
}

/// The five platforms of the stock level, in collision order
pub const REFERENCE_OBSTACLES: [ObstacleDecl; 5] = [
    ObstacleDecl::new(0.0, 1000.0, 500.0, 10.0),
    ObstacleDecl::new(200.0, 940.0, 300.0, 10.0),
    ObstacleDecl::new(300.0, 880.0, 200.0, 10.0),
    ObstacleDecl::new(400.0, 820.0, 100.0, 10.0),
    ObstacleDecl::new(100.0, 820.0, 100.0, 10.0),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scenario {
    pub obstacles: Vec<ObstacleDecl>,
    pub body: BodyDecl,
    pub bounds: MapBounds,
    pub camera: CameraDecl,
    pub window: WindowDecl,
    pub simulate: SimulateDecl,
    /// Scripted controls for headless runs; frames past the end use no input
    pub inputs: Vec<InputSegment>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            obstacles: REFERENCE_OBSTACLES.to_vec(),
            body: BodyDecl::default(),
            bounds: MapBounds::default(),
            camera: CameraDecl::default(),
            window: WindowDecl::default(),
            simulate: SimulateDecl::default(),
            inputs: Vec::new(),
        }
    }
}

impl Scenario {
    pub fn body_constants(&self) -> BodyConstants {
        BodyConstants::new(
            self.body.walk_speed,
            self.body.flight_time,
            self.body.jump_height,
        )
    }

    pub fn build_body(&self) -> Body {
        Body::new(self.body.spawn, self.body.size, self.body_constants())
    }

    pub fn build_obstacles(&self) -> Vec<Obstacle> {
        self.obstacles
            .iter()
            .map(|decl| Obstacle::new(decl.rect()))
            .collect()
    }

    pub fn build_world(&self) -> World {
        World::new(self.build_body(), self.build_obstacles(), self.bounds)
    }

    /// Camera centred on the body's spawn rectangle
    pub fn build_camera(&self) -> Camera {
        Camera::new(
            self.body.spawn_rect().center(),
            self.camera.view_size,
            self.camera.take,
        )
    }
}

/// Parse a scenario from JSON source
pub fn parse_scenario(source: &str) -> Result<Scenario, ScenarioError> {
    Ok(serde_json::from_str(source)?)
}

/// Read and parse a scenario file
pub fn load_scenario(path: &Path) -> Result<Scenario, ScenarioError> {
    let source = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_scenario(&source)
}
