//! sphere_rt - orbiting mirror spheres ray traced into the terminal
//!
//! Controls:
//! - Space: Pause
//! - Q or Escape: Quit
//!
//! Usage:
//!   sphere_rt                  - Run interactive mode
//!   sphere_rt --debug [DIR]    - Render frames to DIR/frame_XXX.txt files

use anyhow::Context;
use clap::{Parser, ValueEnum};
use sphere_rt::animation::{GridSink, Simulation};
use sphere_rt::config::AppConfig;
use sphere_rt::renderer::Renderer;
use sphere_rt::scene::Scene;
use sphere_rt::terminal::{TerminalDisplay, TextDump};
use std::path::PathBuf;
use std::time::Duration;

/// Frames written by `--debug` when no `--frames` is given
const DEBUG_FRAMES: u64 = 10;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Parser)]
#[command(name = "sphere_rt")]
#[command(version)]
#[command(about = "Ray traced mirror spheres in a character grid")]
struct Cli {
    /// Path to a YAML config file (defaults to ./sphere-rt.yaml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Set logging level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    /// Stop after this many frames
    #[arg(short, long)]
    frames: Option<u64>,

    /// Frame counter to start from
    #[arg(long, default_value_t = 0)]
    start_frame: u64,

    /// Write frames as text files to DIR instead of drawing to the terminal
    #[arg(short, long, value_name = "DIR", num_args = 0..=1, default_missing_value = "debug")]
    debug: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level_filter = if let Some(level) = cli.log_level {
        level.to_string()
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
            .to_string()
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&level_filter))
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;
    config.validate()?;

    tracing::info!(
        width = config.display.width,
        height = config.display.height,
        spheres = config.spheres.len(),
        "Configuration loaded"
    );

    let renderer = Renderer::new(
        config.display.width,
        config.display.height,
        config.display.pixel_aspect,
    )
    .with_parallel(config.animation.parallel);
    let scene = Scene::from_config(&config.spheres);
    let mut sim = Simulation::at_frame(scene, renderer, cli.start_frame);
    let delay = Duration::from_millis(config.animation.frame_delay_ms);

    let frames = match cli.debug {
        Some(dir) => {
            let mut sink = TextDump::new(&dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
            let frames = run(&mut sim, &mut sink, delay, Some(cli.frames.unwrap_or(DEBUG_FRAMES)))?;
            println!("Debug frames saved to {}", dir.display());
            frames
        }
        None => {
            let mut terminal = TerminalDisplay::new().context("Failed to initialize terminal")?;
            let (cols, rows) = terminal.get_size();
            if cols < config.display.width || rows < config.display.height {
                tracing::warn!(cols, rows, "Terminal smaller than the grid, output is clipped");
            }
            run(&mut sim, &mut terminal, delay, cli.frames)?
        }
    };

    tracing::info!(frames, last_frame = sim.frame(), "Done");
    Ok(())
}

/// Run the animation, treating a closed output as a normal exit
fn run<S: GridSink>(
    sim: &mut Simulation,
    sink: &mut S,
    delay: Duration,
    limit: Option<u64>,
) -> anyhow::Result<u64> {
    let start = sim.frame();
    match sim.run(sink, delay, limit) {
        Ok(frames) => Ok(frames),
        Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(sim.frame() - start),
        Err(e) => Err(e).context("Failed to present frame"),
    }
}
