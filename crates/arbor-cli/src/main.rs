//! Arbor CLI - drives behavior trees frame by frame.
//!
//! - `arbor run` - simulate the chaser scenario for a number of frames
//! - `arbor init` - write a default `arbor.yaml`

mod chaser;
mod config;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use arbor_tools::SharedTraceSink;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use arbor_bt::Scheduler;
use chaser::ChaserSim;
use config::ArborConfig;

#[derive(Parser)]
#[command(name = "arbor")]
#[command(about = "Frame-driven behavior tree runner", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the chaser scenario
    Run {
        /// Config file (defaults are used when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the number of frames
        #[arg(long)]
        frames: Option<u64>,

        /// Override the frame delta in seconds
        #[arg(long)]
        dt: Option<f32>,

        /// Override the number of chasers
        #[arg(long)]
        chasers: Option<usize>,

        /// Print one JSON trace event per tree per frame to stdout
        #[arg(long)]
        trace: bool,

        /// Unregister the first chaser after this many frames
        #[arg(long)]
        park_first_after: Option<u64>,
    },

    /// Write the default configuration
    Init {
        #[arg(long, default_value = "arbor.yaml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            config,
            frames,
            dt,
            chasers,
            trace,
            park_first_after,
        } => {
            let mut cfg = match &config {
                Some(path) => ArborConfig::load(path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => ArborConfig::default(),
            };
            if let Some(frames) = frames {
                cfg.demo.frames = frames;
            }
            if let Some(dt) = dt {
                cfg.demo.dt_seconds = dt;
            }
            if let Some(chasers) = chasers {
                cfg.demo.chasers = chasers;
            }
            cfg.validate()?;
            run_demo(cfg, trace, park_first_after)
        }
        Commands::Init { path, force } => init_config(&path, force),
    }
}

fn run_demo(config: ArborConfig, trace: bool, park_first_after: Option<u64>) -> Result<()> {
    tracing::info!(
        chasers = config.demo.chasers,
        frames = config.demo.frames,
        dt = config.demo.dt_seconds,
        seed = config.scheduler.seed,
        "Starting chaser scenario"
    );

    let sink = SharedTraceSink::new();
    let mut scheduler = Scheduler::new(config.scheduler);
    if trace {
        scheduler = scheduler.with_trace_sink(sink.clone());
    }

    let dt = config.demo.dt_seconds;
    let frames = config.demo.frames;
    let log_every = ((1.0 / dt).round() as u64).max(1);
    let mut sim = ChaserSim::new(config.demo, scheduler);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for frame in 0..frames {
        if park_first_after == Some(frame) && sim.park(0) {
            tracing::info!(frame, "Parked chaser-0");
        }

        let report = sim.step(dt);

        if trace {
            for event in sink.take() {
                serde_json::to_writer(&mut out, &event)?;
                writeln!(out)?;
            }
        }

        if frame % log_every == 0 {
            let target = sim.target().borrow().position;
            tracing::debug!(
                tick = report.tick,
                ran = report.ran,
                target_x = target.x,
                target_y = target.y,
                "frame"
            );
        }
    }
    out.flush()?;

    for summary in sim.summaries() {
        tracing::info!(
            name = %summary.name,
            searches = summary.searches,
            sightings = summary.sightings,
            x = summary.position.x,
            y = summary.position.y,
            last_status = ?summary.last_status,
            "Chaser finished"
        );
    }
    tracing::info!(ticks = sim.scheduler().ticks(), "Scenario complete");
    Ok(())
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    ArborConfig::default().save(path)?;
    tracing::info!(path = %path.display(), "Wrote default config");
    Ok(())
}
