//! Test helper utilities for platformer tests

use crate::engine::{Body, BodyConstants, Obstacle};
use crate::geometry::Aabb;
use crate::runtime::SimulationResult;
use crate::scenario::REFERENCE_OBSTACLES;
use glam::Vec2;
use std::path::PathBuf;

/// Check if two f32 values are approximately equal within tolerance
pub fn approx_eq_f32(a: f32, b: f32, tol: f32) -> bool {
    (a - b).abs() <= tol
}

pub fn approx_eq_vec2(a: Vec2, b: Vec2, tol: f32) -> bool {
    approx_eq_f32(a.x, b.x, tol) && approx_eq_f32(a.y, b.y, tol)
}

/// Path of a scenario fixture under `platformer-core/tests/data`
pub fn scenario_data_path(filename: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path.push(filename);
    path
}

/// Read a scenario fixture's JSON source
pub fn load_fixture(filename: &str) -> Result<String, Box<dyn std::error::Error>> {
    Ok(std::fs::read_to_string(scenario_data_path(filename))?)
}

/// Constants of the reference body: walk 100, flight time 0.75, jump height 80
pub fn reference_constants() -> BodyConstants {
    BodyConstants::new(100.0, 0.75, 80.0)
}

/// A 20 x 28 reference body spawning at (100, 950), placed at `(x, y)`
pub fn body_at(x: f32, y: f32) -> Body {
    Body::new(
        Vec2::new(100.0, 950.0),
        Vec2::new(20.0, 28.0),
        reference_constants(),
    )
    .with_position(Vec2::new(x, y))
}

pub fn obstacle(x: f32, y: f32, width: f32, height: f32) -> Obstacle {
    Obstacle::new(Aabb::new(x, y, width, height))
}

pub fn reference_obstacles() -> Vec<Obstacle> {
    REFERENCE_OBSTACLES
        .iter()
        .map(|decl| Obstacle::new(decl.rect()))
        .collect()
}

/// Compare two simulation results with tolerance
pub fn results_approx_equal(a: &SimulationResult, b: &SimulationResult, tol: f32) -> bool {
    a.steps == b.steps
        && a.landings == b.landings
        && a.respawns == b.respawns
        && a.body.is_on_ground == b.body.is_on_ground
        && approx_eq_vec2(a.body.position, b.body.position, tol)
        && approx_eq_vec2(a.body.velocity, b.body.velocity, tol)
        && approx_eq_vec2(a.camera_center, b.camera_center, tol)
}
