pub mod analyzer;
pub mod camera;
pub mod diagnostics;
pub mod engine;
pub mod frame;
pub mod geometry;
pub mod integrator;
pub mod runtime;
pub mod scenario;

pub use analyzer::analyze_scenario;
pub use camera::Camera;
pub use diagnostics::{Diagnostic, DiagnosticSeverity, Diagnostics};
pub use engine::{Body, BodyConstants, Controls, MapBounds, Obstacle, World};
pub use frame::{
    run_frame, run_loop, ControlSource, FixedClock, FrameBudget, FrameClock, FrameSink,
    FrameView, ScriptedControls, WallClock,
};
pub use geometry::{intersects_with, Aabb, EdgeRule};
pub use integrator::{step, StepOutcome};
pub use runtime::{
    advance_frame, build_simulation_context, build_simulation_context_from_source,
    collect_result, frame_interval, get_body_state, run_loaded_scenario, run_scenario, sanitize_dt,
    step_simulation, BodyState, SimulationContext, SimulationResult,
};
pub use scenario::{load_scenario, parse_scenario, Scenario, ScenarioError};

// Test helpers module (public for integration tests)
pub mod tests;
