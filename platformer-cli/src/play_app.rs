//! Interactive window for playing a scenario
//!
//! The window is the render and input collaborator of the frame loop: it
//! samples A/D/Space, steps the simulation with wall-clock time and draws
//! every rectangle as an outline through the camera. When the scenario came
//! from a file, the file is watched and the simulation restarts whenever it
//! changes.

use eframe::egui;
use glam::Vec2;
use notify::{Event, RecommendedWatcher, Watcher};
use platformer_core::frame::{run_frame, ControlSource, FrameClock, FrameSink, FrameView, WallClock};
use platformer_core::{
    advance_frame, build_simulation_context, frame_interval, parse_scenario, Aabb, Body, Camera,
    Controls, Obstacle, Scenario, SimulationContext,
};
use std::path::PathBuf;
use std::sync::mpsc;

const BODY_COLOR: egui::Color32 = egui::Color32::RED;
const OBSTACLE_COLOR: egui::Color32 = egui::Color32::WHITE;
const OUTLINE_THICKNESS: f32 = 1.0;

/// Keyboard state as seen by egui this frame
struct KeyboardControls<'a> {
    ctx: &'a egui::Context,
}

impl ControlSource for KeyboardControls<'_> {
    fn sample(&mut self) -> Controls {
        self.ctx.input(|i| Controls {
            left: i.key_down(egui::Key::A),
            right: i.key_down(egui::Key::D),
            jump: i.key_down(egui::Key::Space),
        })
    }
}

/// Draws presented frames into the central panel
struct PainterSink<'a> {
    painter: &'a egui::Painter,
    screen: egui::Rect,
}

impl FrameSink for PainterSink<'_> {
    fn is_open(&self) -> bool {
        true
    }

    fn present(&mut self, frame: &FrameView<'_>) {
        draw_scene(
            self.painter,
            self.screen,
            frame.camera,
            frame.body,
            frame.obstacles,
        );
    }
}

/// Map a world point into the panel, stretching the camera view to fill it
fn world_to_screen(view: &Aabb, screen: egui::Rect, point: Vec2) -> egui::Pos2 {
    let scale_x = screen.width() / view.width();
    let scale_y = screen.height() / view.height();
    egui::pos2(
        screen.min.x + (point.x - view.left()) * scale_x,
        screen.min.y + (point.y - view.top()) * scale_y,
    )
}

fn outline(
    painter: &egui::Painter,
    view: &Aabb,
    screen: egui::Rect,
    rect: &Aabb,
    color: egui::Color32,
) {
    let min = world_to_screen(view, screen, rect.min);
    let max = world_to_screen(view, screen, Vec2::new(rect.right(), rect.bottom()));
    painter.rect_stroke(
        egui::Rect::from_min_max(min, max),
        0.0,
        egui::Stroke::new(OUTLINE_THICKNESS, color),
    );
}

fn draw_scene(
    painter: &egui::Painter,
    screen: egui::Rect,
    camera: &Camera,
    body: &Body,
    obstacles: &[Obstacle],
) {
    painter.rect_filled(screen, 0.0, egui::Color32::BLACK);

    let view = camera.visible_rect();
    for obstacle in obstacles {
        outline(painter, &view, screen, obstacle.rect(), OBSTACLE_COLOR);
    }
    outline(painter, &view, screen, body.rect(), BODY_COLOR);
}

/// Whether the window steps the simulation, and why it stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RunState {
    playing: bool,
    paused_by_error: bool,
}

impl RunState {
    fn new() -> Self {
        Self {
            playing: true,
            paused_by_error: false,
        }
    }

    fn toggle(&mut self) {
        self.playing = !self.playing;
        self.paused_by_error = false;
    }

    /// Returns true if the failure paused a running simulation
    fn on_load_error(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        self.playing = false;
        self.paused_by_error = true;
        true
    }

    /// Returns true if a pause caused by an earlier failure was lifted
    fn on_load_ok(&mut self) -> bool {
        if !self.paused_by_error {
            return false;
        }
        self.playing = true;
        self.paused_by_error = false;
        true
    }
}

/// Platformer play window
pub struct PlayApp {
    source_path: Option<PathBuf>,
    scenario: Scenario,
    sim: Option<SimulationContext>,
    last_load_error: Option<String>,
    run: RunState,
    clock: WallClock,
    #[allow(dead_code)] // Kept alive to maintain file watching
    file_watcher: Option<RecommendedWatcher>,
    file_receiver: mpsc::Receiver<notify::Result<Event>>,
    needs_reload: bool,
}

impl PlayApp {
    pub fn new(
        source_path: Option<PathBuf>,
        scenario: Scenario,
        _cc: &eframe::CreationContext<'_>,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            // The receiver is gone during shutdown.
            let _ = tx.send(res);
        })
        .ok();

        if let (Some(w), Some(path)) = (watcher.as_mut(), source_path.as_ref()) {
            if let Err(e) = w.watch(path, notify::RecursiveMode::NonRecursive) {
                log::warn!("not watching {}: {}", path.display(), e);
            }
        }

        let mut app = Self {
            source_path,
            scenario,
            sim: None,
            last_load_error: None,
            run: RunState::new(),
            clock: WallClock::new(),
            file_watcher: watcher,
            file_receiver: rx,
            needs_reload: false,
        };

        app.reload_context();

        app
    }

    fn reload_context(&mut self) {
        match build_simulation_context(&self.scenario) {
            Ok((sim, _diagnostics)) => {
                self.sim = Some(sim);
                self.last_load_error = None;
                if self.run.on_load_ok() {
                    log::info!("scenario loads again, resuming");
                }
            }
            Err(e) => {
                log::error!("{}", e);
                self.fail_load(e.to_string());
            }
        }
        self.clock.restart();
    }

    fn reload_scenario_file(&mut self) {
        let Some(path) = self.source_path.as_ref() else {
            return;
        };
        let parsed = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|source| parse_scenario(&source).map_err(|e| e.to_string()));
        match parsed {
            Ok(scenario) => {
                log::info!("reloaded {}", path.display());
                self.scenario = scenario;
                self.reload_context();
            }
            Err(e) => {
                log::error!("reload of {} failed: {}", path.display(), e);
                self.fail_load(e);
            }
        }
    }

    fn fail_load(&mut self, error: String) {
        self.last_load_error = Some(error);
        self.sim = None;
        if self.run.on_load_error() {
            log::warn!("simulation paused until the scenario loads");
        }
    }

    fn check_file_changes(&mut self) {
        while let Ok(event) = self.file_receiver.try_recv() {
            match event {
                Ok(Event {
                    kind: notify::EventKind::Modify(_),
                    paths,
                    ..
                }) => {
                    if let Some(path) = self.source_path.as_ref() {
                        if paths.contains(path) {
                            self.needs_reload = true;
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    log::warn!("file watcher error: {}", e);
                }
            }
        }

        if self.needs_reload {
            self.reload_scenario_file();
            self.needs_reload = false;
        }
    }
}

impl eframe::App for PlayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_file_changes();

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button(if self.run.playing { "⏸ Pause" } else { "▶ Play" }).clicked() {
                    self.run.toggle();
                    self.clock.restart();
                }

                if ui.button("⏮ Reset").clicked() {
                    self.reload_context();
                }

                if ui.button("⏭ Step").clicked() {
                    if let Some(sim) = self.sim.as_mut() {
                        let controls = KeyboardControls { ctx: ui.ctx() }.sample();
                        let dt = sim.frame_dt;
                        advance_frame(sim, controls, dt);
                    }
                }

                ui.separator();

                if let Some(sim) = self.sim.as_ref() {
                    let body = &sim.world.body;
                    ui.label(format!(
                        "Frame: {}  pos: ({:.1}, {:.1})  vel: ({:.1}, {:.1})  {}",
                        sim.current_step,
                        body.position().x,
                        body.position().y,
                        body.velocity().x,
                        body.velocity().y,
                        if body.is_on_ground() { "grounded" } else { "airborne" }
                    ));
                }
            });
        });

        if let Some(error) = self.last_load_error.as_ref() {
            egui::TopBottomPanel::bottom("errors").show(ctx, |ui| {
                ui.set_max_height(100.0);
                ui.label(egui::RichText::new(format!("Error: {}", error)).color(egui::Color32::RED));
            });
        }

        let playing = self.run.playing;
        let clock = &mut self.clock;
        let sim = self.sim.as_mut();
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let screen = ui.max_rect();
                let painter = ui.painter();
                let Some(sim) = sim else {
                    painter.rect_filled(screen, 0.0, egui::Color32::BLACK);
                    return;
                };

                if playing {
                    let mut controls = KeyboardControls { ctx: ui.ctx() };
                    let mut sink = PainterSink { painter, screen };
                    run_frame(sim, clock, &mut controls, &mut sink);
                } else {
                    draw_scene(painter, screen, &sim.camera, &sim.world.body, &sim.world.obstacles);
                }
            });

        // Frames are capped at the scenario's rate; camera smoothing is per frame.
        if let (true, Some(sim)) = (self.run.playing, self.sim.as_ref()) {
            ctx.request_repaint_after(frame_interval(sim));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_reload_pauses_and_successful_reload_resumes() {
        let mut run = RunState::new();

        assert!(run.on_load_error());
        assert!(!run.playing);

        // A second failure while already paused changes nothing.
        assert!(!run.on_load_error());

        assert!(run.on_load_ok());
        assert!(run.playing);
        assert!(!run.paused_by_error);
    }

    #[test]
    fn test_manual_pause_survives_reload() {
        let mut run = RunState::new();
        run.toggle();
        assert!(!run.playing);

        assert!(!run.on_load_error());
        assert!(!run.on_load_ok());
        assert!(!run.playing);
    }

    #[test]
    fn test_manual_play_clears_error_pause() {
        let mut run = RunState::new();
        run.on_load_error();
        run.toggle();
        assert!(run.playing);

        assert!(!run.on_load_ok());
        assert!(run.playing);
    }
}
