//! The frame loop and the collaborators it is driven by
//!
//! A frame samples controls, measures elapsed time, steps the simulation and
//! hands the result to a sink (a window, a trace printer, a frame counter).
//! The loop owns no window, clock or keyboard state of its own; each is
//! passed in explicitly.

use crate::camera::Camera;
use crate::engine::{Body, Controls, Obstacle};
use crate::integrator::StepOutcome;
use crate::runtime::{advance_frame, sanitize_dt, scripted_controls, SimulationContext, MAX_FRAME_DT};
use crate::scenario::InputSegment;
use std::time::Instant;

/// Source of elapsed time between frames
pub trait FrameClock {
    /// Seconds since the previous call (or since creation)
    fn restart(&mut self) -> f32;

    /// Longest delta the loop will integrate from this clock
    fn max_dt(&self) -> f32 {
        MAX_FRAME_DT
    }
}

/// Source of the control flags for the next frame
pub trait ControlSource {
    fn sample(&mut self) -> Controls;
}

/// Consumer of finished frames
pub trait FrameSink {
    /// False once the sink wants the loop to stop
    fn is_open(&self) -> bool;
    fn present(&mut self, frame: &FrameView<'_>);
}

/// Read-only view of one finished frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub index: usize,
    pub dt: f32,
    pub body: &'a Body,
    pub obstacles: &'a [Obstacle],
    pub camera: &'a Camera,
    pub outcome: StepOutcome,
}

/// Wall-clock time, like a stopwatch restarted every frame
#[derive(Debug)]
pub struct WallClock {
    last: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for WallClock {
    fn restart(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        elapsed
    }
}

/// A clock that always reports the same delta
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    dt: f32,
}

impl FixedClock {
    pub fn new(dt: f32) -> Self {
        Self { dt }
    }
}

impl FrameClock for FixedClock {
    fn restart(&mut self) -> f32 {
        self.dt
    }

    /// A fixed step is configured, not measured, so it is never capped.
    fn max_dt(&self) -> f32 {
        f32::INFINITY
    }
}

/// Plays back a scenario input script, one sample per frame
#[derive(Debug, Clone)]
pub struct ScriptedControls {
    script: Vec<InputSegment>,
    frame: usize,
}

impl ScriptedControls {
    pub fn new(script: Vec<InputSegment>) -> Self {
        Self { script, frame: 0 }
    }
}

impl ControlSource for ScriptedControls {
    fn sample(&mut self) -> Controls {
        let controls = scripted_controls(&self.script, self.frame);
        self.frame += 1;
        controls
    }
}

/// A sink that closes after a fixed number of frames
#[derive(Debug, Clone, Copy)]
pub struct FrameBudget {
    remaining: usize,
}

impl FrameBudget {
    pub fn new(frames: usize) -> Self {
        Self { remaining: frames }
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

impl FrameSink for FrameBudget {
    fn is_open(&self) -> bool {
        self.remaining > 0
    }

    fn present(&mut self, _frame: &FrameView<'_>) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

/// Run one frame against explicit collaborators and present it
pub fn run_frame(
    ctx: &mut SimulationContext,
    clock: &mut dyn FrameClock,
    controls: &mut dyn ControlSource,
    sink: &mut dyn FrameSink,
) -> StepOutcome {
    let dt = sanitize_dt(clock.restart(), clock.max_dt());
    let sampled = controls.sample();
    let outcome = advance_frame(ctx, sampled, dt);

    let view = FrameView {
        index: ctx.current_step,
        dt,
        body: &ctx.world.body,
        obstacles: &ctx.world.obstacles,
        camera: &ctx.camera,
        outcome,
    };
    sink.present(&view);
    outcome
}

/// Step frames until the sink closes; returns the number of frames run
pub fn run_loop(
    ctx: &mut SimulationContext,
    clock: &mut dyn FrameClock,
    controls: &mut dyn ControlSource,
    sink: &mut dyn FrameSink,
) -> usize {
    let mut frames = 0;
    while sink.is_open() {
        run_frame(ctx, clock, controls, sink);
        frames += 1;
    }
    log::debug!("frame loop finished after {} frames", frames);
    frames
}
