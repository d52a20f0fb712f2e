use crate::analyzer::analyze_scenario;
use crate::camera::Camera;
use crate::diagnostics::Diagnostics;
use crate::engine::{Controls, World};
use crate::frame::{run_loop, FixedClock, FrameBudget, ScriptedControls};
use crate::integrator::{step, StepOutcome};
use crate::scenario::{parse_scenario, InputSegment, Scenario, ScenarioError};
use glam::Vec2;
use std::time::Duration;

/// Longest frame the simulation will integrate in one go, in seconds
pub const MAX_FRAME_DT: f32 = 0.25;

/// Snapshot of the body for reporting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub position: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
    pub is_on_ground: bool,
}

/// Final result of a headless run
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub body: BodyState,
    pub camera_center: Vec2,
    pub steps: usize,
    pub landings: usize,
    pub respawns: usize,
}

/// Everything a driver needs to step a scenario frame by frame
#[derive(Debug, Clone)]
pub struct SimulationContext {
    pub world: World,
    pub camera: Camera,
    pub current_step: usize,
    pub max_steps: usize,
    /// Fixed timestep for scripted and single-step frames
    pub frame_dt: f32,
    pub script: Vec<InputSegment>,
    pub landings: usize,
    pub respawns: usize,
}

/// Check a scenario and build a fresh simulation from it.
///
/// Warnings are logged and returned alongside the context; any error rejects
/// the scenario.
pub fn build_simulation_context(
    scenario: &Scenario,
) -> Result<(SimulationContext, Diagnostics), ScenarioError> {
    let diagnostics = analyze_scenario(scenario);
    if diagnostics.has_errors() {
        return Err(ScenarioError::Invalid(diagnostics));
    }
    for warning in diagnostics.warnings() {
        log::warn!("{}", warning);
    }

    let ctx = SimulationContext {
        world: scenario.build_world(),
        camera: scenario.build_camera(),
        current_step: 0,
        max_steps: scenario.simulate.frames,
        frame_dt: scenario.simulate.frame_dt(),
        script: scenario.inputs.clone(),
        landings: 0,
        respawns: 0,
    };
    Ok((ctx, diagnostics))
}

pub fn build_simulation_context_from_source(
    source: &str,
) -> Result<(SimulationContext, Diagnostics), ScenarioError> {
    let scenario = parse_scenario(source)?;
    build_simulation_context(&scenario)
}

/// Make a measured frame delta safe to integrate.
///
/// A stalled or misbehaving clock can report NaN, negative or very large
/// deltas; those become 0 or are capped at `max`.
pub fn sanitize_dt(dt: f32, max: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        0.0
    } else {
        dt.min(max)
    }
}

/// Controls the input script holds during `frame`
pub fn scripted_controls(script: &[InputSegment], frame: usize) -> Controls {
    let mut start = 0;
    for segment in script {
        let end = start + segment.frames;
        if frame < end {
            return segment.controls();
        }
        start = end;
    }
    Controls::NONE
}

/// Run one frame: apply controls, step physics, then move the camera
pub fn advance_frame(ctx: &mut SimulationContext, controls: Controls, dt: f32) -> StepOutcome {
    let world = &mut ctx.world;
    world.body.controls = controls;
    let outcome = step(&mut world.body, &world.obstacles, &world.bounds, dt);

    if outcome.landed_on.is_some() {
        ctx.landings += 1;
    }
    if outcome.respawned {
        ctx.respawns += 1;
    }

    ctx.camera.follow(world.body.center());
    ctx.current_step += 1;
    outcome
}

/// Advance one fixed-timestep frame using the scripted controls.
///
/// Returns true once the configured number of frames has been reached.
pub fn step_simulation(ctx: &mut SimulationContext) -> bool {
    if ctx.current_step >= ctx.max_steps {
        return true;
    }
    let controls = scripted_controls(&ctx.script, ctx.current_step);
    let dt = ctx.frame_dt;
    advance_frame(ctx, controls, dt);
    ctx.current_step >= ctx.max_steps
}

/// Wall-clock time one fixed frame should take, for capping a window's frame rate
pub fn frame_interval(ctx: &SimulationContext) -> Duration {
    Duration::try_from_secs_f32(ctx.frame_dt).unwrap_or_default()
}

pub fn get_body_state(ctx: &SimulationContext) -> BodyState {
    let body = &ctx.world.body;
    BodyState {
        position: body.position(),
        size: body.rect().size,
        velocity: body.velocity(),
        is_on_ground: body.is_on_ground(),
    }
}

pub fn collect_result(ctx: &SimulationContext) -> SimulationResult {
    SimulationResult {
        body: get_body_state(ctx),
        camera_center: ctx.camera.center,
        steps: ctx.current_step,
        landings: ctx.landings,
        respawns: ctx.respawns,
    }
}

/// Run a scenario headlessly at its fixed frame rate until its frame budget is spent
pub fn run_loaded_scenario(scenario: &Scenario) -> Result<SimulationResult, ScenarioError> {
    let (mut ctx, _diagnostics) = build_simulation_context(scenario)?;

    let mut clock = FixedClock::new(ctx.frame_dt);
    let mut controls = ScriptedControls::new(ctx.script.clone());
    let mut sink = FrameBudget::new(ctx.max_steps);
    run_loop(&mut ctx, &mut clock, &mut controls, &mut sink);

    Ok(collect_result(&ctx))
}

/// Main entry point: parse and run a scenario
pub fn run_scenario(source: &str) -> Result<SimulationResult, ScenarioError> {
    let scenario = parse_scenario(source)?;
    run_loaded_scenario(&scenario)
}
