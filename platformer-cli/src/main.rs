mod logging;
mod play_app;

use clap::{Parser, Subcommand};
use platformer_core::frame::{run_loop, FixedClock, FrameBudget, FrameSink, FrameView, ScriptedControls};
use platformer_core::{
    build_simulation_context, collect_result, load_scenario, Scenario, SimulationResult,
};
use play_app::PlayApp;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "platformer")]
#[command(about = "A single-body 2D platformer physics sandbox", long_about = None)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Step a scenario headlessly at its fixed frame rate and print the final state
    Run {
        /// Scenario JSON file; the reference level when omitted
        scenario: Option<PathBuf>,
        /// Number of frames to run, overriding the scenario
        #[arg(long)]
        frames: Option<usize>,
        /// Print the body after every frame
        #[arg(long)]
        trace: bool,
    },
    /// Open a window and play a scenario with A/D/Space
    Play {
        /// Scenario JSON file; reloaded when it changes on disk
        scenario: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            scenario,
            frames,
            trace,
        } => run_file(scenario.as_deref(), frames, trace),
        Commands::Play { scenario } => play_file(scenario),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn read_scenario(path: Option<&Path>) -> Result<Scenario, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            log::info!("loading scenario {}", path.display());
            Ok(load_scenario(path)?)
        }
        None => Ok(Scenario::default()),
    }
}

/// Prints each presented frame, then defers to the frame budget
struct TraceSink {
    budget: FrameBudget,
}

impl FrameSink for TraceSink {
    fn is_open(&self) -> bool {
        self.budget.is_open()
    }

    fn present(&mut self, frame: &FrameView<'_>) {
        let rect = frame.body.rect();
        let velocity = frame.body.velocity();
        println!(
            "{:>5} pos=({:.3}, {:.3}) vel=({:.3}, {:.3}) ground={}{}",
            frame.index,
            rect.left(),
            rect.top(),
            velocity.x,
            velocity.y,
            frame.body.is_on_ground(),
            if frame.outcome.respawned { " respawned" } else { "" }
        );
        self.budget.present(frame);
    }
}

fn run_file(
    path: Option<&Path>,
    frames: Option<usize>,
    trace: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut scenario = read_scenario(path)?;
    if let Some(frames) = frames {
        scenario.simulate.frames = frames;
    }

    let (mut ctx, _diagnostics) = build_simulation_context(&scenario)?;
    let mut clock = FixedClock::new(ctx.frame_dt);
    let mut controls = ScriptedControls::new(ctx.script.clone());
    let budget = FrameBudget::new(ctx.max_steps);

    if trace {
        let mut sink = TraceSink { budget };
        run_loop(&mut ctx, &mut clock, &mut controls, &mut sink);
    } else {
        let mut sink = budget;
        run_loop(&mut ctx, &mut clock, &mut controls, &mut sink);
    }

    print_result(&collect_result(&ctx));
    Ok(())
}

fn print_result(result: &SimulationResult) {
    println!("steps = {}", result.steps);
    println!("x = {}", result.body.position.x);
    println!("y = {}", result.body.position.y);
    println!("vx = {}", result.body.velocity.x);
    println!("vy = {}", result.body.velocity.y);
    println!("on_ground = {}", result.body.is_on_ground);
    println!("camera_x = {}", result.camera_center.x);
    println!("camera_y = {}", result.camera_center.y);
    println!("landings = {}", result.landings);
    println!("respawns = {}", result.respawns);
}

fn play_file(path: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let scenario = read_scenario(path.as_deref())?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(scenario.window.title.clone())
            .with_inner_size([scenario.window.width, scenario.window.height])
            .with_resizable(false),
        ..Default::default()
    };

    let title = scenario.window.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(PlayApp::new(path, scenario, cc)))),
    )?;
    Ok(())
}
