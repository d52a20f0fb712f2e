//! Static checks on a parsed scenario
//!
//! Errors make a scenario unusable (a world built from it would produce NaN
//! constants or a body of no size). Warnings flag layouts that run but are
//! probably not what the author meant.

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::scenario::Scenario;

/// Analyze a scenario and return diagnostics
pub fn analyze_scenario(scenario: &Scenario) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();

    check_finite(scenario, &mut diagnostics);
    if diagnostics.has_errors() {
        // Range checks below are meaningless on NaN or infinite input.
        return diagnostics;
    }

    for (idx, obstacle) in scenario.obstacles.iter().enumerate() {
        if obstacle.width < 0.0 {
            diagnostics.push(Diagnostic::error(
                format!("obstacle width must not be negative, got {}", obstacle.width),
                Some(format!("obstacles[{}].width", idx)),
            ));
        }
        if obstacle.height < 0.0 {
            diagnostics.push(Diagnostic::error(
                format!("obstacle height must not be negative, got {}", obstacle.height),
                Some(format!("obstacles[{}].height", idx)),
            ));
        }
    }

    let body = &scenario.body;
    if body.size.x <= 0.0 || body.size.y <= 0.0 {
        diagnostics.push(Diagnostic::error(
            format!("body size must be positive, got {} x {}", body.size.x, body.size.y),
            Some("body.size".to_string()),
        ));
    }
    if body.flight_time <= 0.0 {
        diagnostics.push(Diagnostic::error(
            format!("flight time must be positive, got {}", body.flight_time),
            Some("body.flight_time".to_string()),
        ));
    }
    if body.jump_height <= 0.0 {
        diagnostics.push(Diagnostic::error(
            format!("jump height must be positive, got {}", body.jump_height),
            Some("body.jump_height".to_string()),
        ));
    }
    if body.walk_speed < 0.0 {
        diagnostics.push(Diagnostic::error(
            format!("walk speed must not be negative, got {}", body.walk_speed),
            Some("body.walk_speed".to_string()),
        ));
    }

    if !(0.0..=1.0).contains(&scenario.camera.take) {
        diagnostics.push(Diagnostic::error(
            format!("camera take must lie in [0, 1], got {}", scenario.camera.take),
            Some("camera.take".to_string()),
        ));
    }
    if scenario.camera.view_size.x <= 0.0 || scenario.camera.view_size.y <= 0.0 {
        diagnostics.push(Diagnostic::error(
            "camera view size must be positive",
            Some("camera.view_size".to_string()),
        ));
    }
    if scenario.window.width <= 0.0 || scenario.window.height <= 0.0 {
        diagnostics.push(Diagnostic::error(
            "window size must be positive",
            Some("window".to_string()),
        ));
    }

    if scenario.simulate.frames_per_second <= 0.0 {
        diagnostics.push(Diagnostic::error(
            format!(
                "frames per second must be positive, got {}",
                scenario.simulate.frames_per_second
            ),
            Some("simulate.frames_per_second".to_string()),
        ));
    }

    if scenario.bounds.left_limit >= scenario.bounds.right_limit {
        diagnostics.push(Diagnostic::error(
            format!(
                "left limit {} must be less than right limit {}",
                scenario.bounds.left_limit, scenario.bounds.right_limit
            ),
            Some("bounds".to_string()),
        ));
    }

    if diagnostics.has_errors() {
        return diagnostics;
    }

    check_spawn(scenario, &mut diagnostics);

    if scenario.obstacles.is_empty() {
        diagnostics.push(Diagnostic::warning(
            "scenario has no obstacles; the body will fall forever",
            Some("obstacles".to_string()),
        ));
    }

    diagnostics
}

fn check_finite(scenario: &Scenario, diagnostics: &mut Diagnostics) {
    let mut values: Vec<(String, f32)> = vec![
        ("body.spawn.x".to_string(), scenario.body.spawn.x),
        ("body.spawn.y".to_string(), scenario.body.spawn.y),
        ("body.size.x".to_string(), scenario.body.size.x),
        ("body.size.y".to_string(), scenario.body.size.y),
        ("body.walk_speed".to_string(), scenario.body.walk_speed),
        ("body.jump_height".to_string(), scenario.body.jump_height),
        ("body.flight_time".to_string(), scenario.body.flight_time),
        ("bounds.fall_limit".to_string(), scenario.bounds.fall_limit),
        ("bounds.left_limit".to_string(), scenario.bounds.left_limit),
        ("bounds.right_limit".to_string(), scenario.bounds.right_limit),
        ("camera.take".to_string(), scenario.camera.take),
        ("camera.view_size.x".to_string(), scenario.camera.view_size.x),
        ("camera.view_size.y".to_string(), scenario.camera.view_size.y),
        ("window.width".to_string(), scenario.window.width),
        ("window.height".to_string(), scenario.window.height),
        (
            "simulate.frames_per_second".to_string(),
            scenario.simulate.frames_per_second,
        ),
    ];
    for (idx, obstacle) in scenario.obstacles.iter().enumerate() {
        values.push((format!("obstacles[{}].x", idx), obstacle.x));
        values.push((format!("obstacles[{}].y", idx), obstacle.y));
        values.push((format!("obstacles[{}].width", idx), obstacle.width));
        values.push((format!("obstacles[{}].height", idx), obstacle.height));
    }

    for (field, value) in values {
        if !value.is_finite() {
            diagnostics.push(Diagnostic::error(
                format!("value must be finite, got {}", value),
                Some(field),
            ));
        }
    }
}

fn check_spawn(scenario: &Scenario, diagnostics: &mut Diagnostics) {
    let spawn_rect = scenario.body.spawn_rect();

    for (idx, obstacle) in scenario.obstacles.iter().enumerate() {
        if spawn_rect.intersects(&obstacle.rect()) {
            diagnostics.push(Diagnostic::warning(
                format!(
                    "spawn rectangle overlaps obstacle {}; the body will be snapped onto it",
                    idx
                ),
                Some("body.spawn".to_string()),
            ));
        }
    }

    if !scenario.bounds.contains(&spawn_rect) {
        diagnostics.push(Diagnostic::warning(
            "spawn point lies outside the respawn bounds; the body will respawn every frame",
            Some("body.spawn".to_string()),
        ));
    }
}
