// src/main.rs

use anyhow::{Context, Result};
use clap::Parser;
use lensing::{export_run_record, export_trails, IntegratorKind, SimulationConfig};
use std::path::PathBuf;
use tracing::info;

/// Trace a fan of light rays past a point mass and dump the trails as CSV.
#[derive(Parser, Debug)]
struct Args {
    /// Scene description (JSON). The stock scene is used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, default_value = "trail_data")]
    output: PathBuf,

    /// Overrides `num_steps` from the config.
    #[arg(long)]
    steps: Option<usize>,

    /// `rk4` or `euler`; overrides the config.
    #[arg(long)]
    integrator: Option<IntegratorKind>,

    #[arg(long)]
    no_progress: bool,
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_path(path)
            .with_context(|| format!("failed to load scene from {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    if let Some(steps) = args.steps {
        config.num_steps = steps;
    }
    if let Some(integrator) = args.integrator {
        config.integrator = integrator;
    }
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = load_config(&args)?;
    let mut sim = config.build().context("failed to build simulation")?;
    sim.show_progress = !args.no_progress;

    info!("{}", sim.body);
    let elapsed = sim.run();
    let summary = sim.summary();

    let trails = export_trails(&sim, &args.output).context("failed to write trails")?;
    let runs = export_run_record(&sim, &summary, elapsed, &args.output)
        .context("failed to write run record")?;
    info!(
        trails = %trails.display(),
        runs = %runs.display(),
        "captured {}/{} rays in {} steps",
        summary.captured,
        summary.rays,
        summary.steps_taken
    );

    Ok(())
}
