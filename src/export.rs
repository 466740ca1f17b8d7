// src/export.rs

use crate::error::Result;
use crate::simulation::{RunSummary, Simulation};
use chrono::Utc;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

pub const TRAILS_FILE: &str = "trails.csv";
pub const RUNS_FILE: &str = "runs.csv";

#[derive(Serialize)]
struct RunRecord {
    date: String,
    integrator: String,
    dt: f64,
    steps_taken: usize,
    mass: f64,
    capture_radius: f64,
    rays: usize,
    captured: usize,
    escaped: usize,
    diverged: usize,
    unlaunched: usize,
    closest_approach: Option<f64>,
    execution_duration: f64,
}

/// Writes every trail point as `ray_id,point_index,x,y,active`, oldest first.
pub fn export_trails(sim: &Simulation, dir: impl AsRef<Path>) -> Result<PathBuf> {
    fs::create_dir_all(dir.as_ref())?;
    let path = dir.as_ref().join(TRAILS_FILE);
    let mut wtr = csv::Writer::from_path(&path)?;
    wtr.write_record(["ray_id", "point_index", "x", "y", "active"])?;
    for (id, ray) in sim.rays.iter().enumerate() {
        let active = ray.is_active().to_string();
        for (idx, point) in ray.trail().iter().enumerate() {
            wtr.write_record(&[
                id.to_string(),
                idx.to_string(),
                point.x.to_string(),
                point.y.to_string(),
                active.clone(),
            ])?;
        }
    }
    wtr.flush()?;
    Ok(path)
}

/// Appends one row describing a finished run; the header is written only when
/// the file is new.
pub fn export_run_record(
    sim: &Simulation,
    summary: &RunSummary,
    execution_duration: f64,
    dir: impl AsRef<Path>,
) -> Result<PathBuf> {
    fs::create_dir_all(dir.as_ref())?;
    let path = dir.as_ref().join(RUNS_FILE);
    let file_exists = path.exists();
    let file = OpenOptions::new().append(true).create(true).open(&path)?;

    let record = RunRecord {
        date: Utc::now().to_rfc3339(),
        integrator: sim.integrator.to_string(),
        dt: sim.dt,
        steps_taken: summary.steps_taken,
        mass: sim.body.mass(),
        capture_radius: sim.body.capture_radius(),
        rays: summary.rays,
        captured: summary.captured,
        escaped: summary.escaped,
        diverged: summary.diverged,
        unlaunched: summary.unlaunched,
        closest_approach: summary.closest_approach,
        execution_duration,
    };

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);
    wtr.serialize(record)?;
    wtr.flush()?;
    Ok(path)
}
