//! Tests for static scenario checks

use glam::Vec2;
use platformer_core::analyze_scenario;
use platformer_core::diagnostics::DiagnosticSeverity;
use platformer_core::scenario::{ObstacleDecl, Scenario};

fn fields(scenario: &Scenario, severity: DiagnosticSeverity) -> Vec<String> {
    analyze_scenario(scenario)
        .iter()
        .filter(|d| d.severity == severity)
        .filter_map(|d| d.field.clone())
        .collect()
}

#[test]
fn test_reference_scenario_is_clean() {
    let diagnostics = analyze_scenario(&Scenario::default());
    assert!(diagnostics.is_empty(), "unexpected diagnostics: {}", diagnostics);
}

#[test]
fn test_non_positive_flight_time_and_jump_height() {
    let mut scenario = Scenario::default();
    scenario.body.flight_time = 0.0;
    scenario.body.jump_height = -1.0;

    let errors = fields(&scenario, DiagnosticSeverity::Error);
    assert!(errors.contains(&"body.flight_time".to_string()));
    assert!(errors.contains(&"body.jump_height".to_string()));
}

#[test]
fn test_body_size_must_be_positive() {
    let mut scenario = Scenario::default();
    scenario.body.size = Vec2::new(20.0, 0.0);

    let errors = fields(&scenario, DiagnosticSeverity::Error);
    assert_eq!(errors, vec!["body.size".to_string()]);
}

#[test]
fn test_negative_obstacle_size_names_the_obstacle() {
    let mut scenario = Scenario::default();
    scenario.obstacles[3].height = -10.0;

    let errors = fields(&scenario, DiagnosticSeverity::Error);
    assert_eq!(errors, vec!["obstacles[3].height".to_string()]);
}

#[test]
fn test_zero_size_obstacle_is_allowed() {
    let mut scenario = Scenario::default();
    scenario.obstacles.push(ObstacleDecl::new(0.0, 0.0, 0.0, 0.0));

    assert!(!analyze_scenario(&scenario).has_errors());
}

#[test]
fn test_non_finite_values_are_rejected() {
    let mut scenario = Scenario::default();
    scenario.body.walk_speed = f32::NAN;
    scenario.obstacles[0].x = f32::INFINITY;

    let diagnostics = analyze_scenario(&scenario);
    assert!(diagnostics.has_errors());

    let errors = fields(&scenario, DiagnosticSeverity::Error);
    assert!(errors.contains(&"body.walk_speed".to_string()));
    assert!(errors.contains(&"obstacles[0].x".to_string()));
}

#[test]
fn test_camera_take_out_of_range() {
    let mut scenario = Scenario::default();
    scenario.camera.take = 1.5;

    let errors = fields(&scenario, DiagnosticSeverity::Error);
    assert_eq!(errors, vec!["camera.take".to_string()]);
}

#[test]
fn test_inverted_horizontal_limits() {
    let mut scenario = Scenario::default();
    scenario.bounds.left_limit = 700.0;

    let errors = fields(&scenario, DiagnosticSeverity::Error);
    assert!(errors.contains(&"bounds".to_string()));
}

#[test]
fn test_zero_frame_rate() {
    let mut scenario = Scenario::default();
    scenario.simulate.frames_per_second = 0.0;

    let errors = fields(&scenario, DiagnosticSeverity::Error);
    assert_eq!(errors, vec!["simulate.frames_per_second".to_string()]);
}

#[test]
fn test_spawn_inside_obstacle_warns() {
    let mut scenario = Scenario::default();
    scenario.body.spawn = Vec2::new(100.0, 990.0);

    let diagnostics = analyze_scenario(&scenario);
    assert!(!diagnostics.has_errors());
    assert_eq!(diagnostics.warnings().count(), 1);
    assert_eq!(
        fields(&scenario, DiagnosticSeverity::Warning),
        vec!["body.spawn".to_string()]
    );
}

#[test]
fn test_spawn_outside_bounds_warns() {
    let mut scenario = Scenario::default();
    scenario.body.spawn = Vec2::new(100.0, 1200.0);

    let diagnostics = analyze_scenario(&scenario);
    assert!(!diagnostics.has_errors());
    let message = diagnostics
        .warnings()
        .next()
        .map(|d| d.message.clone())
        .unwrap_or_default();
    assert!(message.contains("respawn"));
}

#[test]
fn test_no_obstacles_warns() {
    let mut scenario = Scenario::default();
    scenario.obstacles.clear();

    let diagnostics = analyze_scenario(&scenario);
    assert!(!diagnostics.has_errors());
    assert_eq!(
        fields(&scenario, DiagnosticSeverity::Warning),
        vec!["obstacles".to_string()]
    );
}

#[test]
fn test_diagnostic_display_includes_field() {
    let mut scenario = Scenario::default();
    scenario.body.flight_time = -2.0;

    let rendered = analyze_scenario(&scenario).to_string();
    assert!(rendered.starts_with("error at body.flight_time:"));
}

#[test]
fn test_overflowing_window_size_is_rejected() {
    // 1e39 does not fit in an f32 and parses as infinity.
    let scenario = platformer_core::parse_scenario(r#"{ "window": { "width": 1e39 } }"#)
        .expect("Should parse");
    assert!(scenario.window.width.is_infinite());

    let diagnostics = analyze_scenario(&scenario);
    assert!(diagnostics.has_errors());
    let errors = fields(&scenario, DiagnosticSeverity::Error);
    assert_eq!(errors, vec!["window.width".to_string()]);
}
