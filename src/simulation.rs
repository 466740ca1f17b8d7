// src/simulation.rs

use crate::mass::MassBody;
use crate::ray::{Ray, RayPhase, StepOutcome};
use crate::solvers::IntegratorKind;
use indicatif::{ProgressBar, ProgressStyle};
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use std::time::Instant;
use tracing::info;

/// A lens and the rays bending around it, advanced in lockstep.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub body: MassBody,
    pub rays: Vec<Ray>,
    pub integrator: IntegratorKind,
    pub dt: f64,
    pub num_steps: usize,
    pub steps_taken: usize,
    pub show_progress: bool,
}

/// `captured + escaped + diverged + unlaunched == rays`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub rays: usize,
    pub captured: usize,
    pub escaped: usize,
    pub diverged: usize,
    /// Rays still in `RayPhase::Uninitialized`.
    pub unlaunched: usize,
    pub steps_taken: usize,
    /// Smallest radius any ray reached; `None` without rays.
    pub closest_approach: Option<f64>,
    pub longest_trail: usize,
}

impl Simulation {
    pub fn new(body: MassBody, rays: Vec<Ray>, dt: f64, num_steps: usize) -> Self {
        Self {
            body,
            rays,
            integrator: IntegratorKind::default(),
            dt,
            num_steps,
            steps_taken: 0,
            show_progress: false,
        }
    }

    pub fn with_integrator(mut self, integrator: IntegratorKind) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn active_rays(&self) -> usize {
        self.rays.iter().filter(|r| r.is_active()).count()
    }

    /// One tick for every active ray. Rays only share the body, read-only.
    pub fn step_all(&mut self) -> Vec<StepOutcome> {
        let dt = self.dt;
        let body = &self.body;
        let integrator = self.integrator.integrator();
        let outcomes = self
            .rays
            .par_iter_mut()
            .map(|ray| ray.step_with(dt, body, integrator))
            .collect();
        self.steps_taken += 1;
        outcomes
    }

    /// Runs up to `num_steps` ticks, stopping once no ray is active.
    /// Returns the wall time in seconds.
    pub fn run(&mut self) -> f64 {
        let start = Instant::now();
        info!(
            body = %self.body,
            rays = self.rays.len(),
            dt = self.dt,
            steps = self.num_steps,
            integrator = %self.integrator,
            "starting ray integration"
        );

        let pb = if self.show_progress {
            let pb = ProgressBar::new(self.num_steps as u64);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            {
                pb.set_style(style.progress_chars("#>-"));
            }
            pb.set_message(format!("Tracing with {}", self.integrator));
            pb
        } else {
            ProgressBar::hidden()
        };

        for _ in 0..self.num_steps {
            if self.active_rays() == 0 {
                break;
            }
            self.step_all();
            pb.inc(1);
        }
        pb.finish();

        let elapsed = start.elapsed().as_secs_f64();
        let summary = self.summary();
        info!(
            captured = summary.captured,
            escaped = summary.escaped,
            diverged = summary.diverged,
            steps = summary.steps_taken,
            elapsed,
            "ray integration finished"
        );
        elapsed
    }

    pub fn summary(&self) -> RunSummary {
        let diverged = self.rays.iter().filter(|r| r.is_diverged()).count();
        let escaped = self.active_rays();
        let unlaunched = self
            .rays
            .iter()
            .filter(|r| r.phase() == RayPhase::Uninitialized)
            .count();
        let terminated = self
            .rays
            .iter()
            .filter(|r| r.phase() == RayPhase::Terminated)
            .count();
        let closest_approach = self
            .rays
            .iter()
            .filter(|r| !r.trail().is_empty())
            .map(|r| OrderedFloat(r.closest_approach()))
            .min()
            .map(OrderedFloat::into_inner);

        RunSummary {
            rays: self.rays.len(),
            captured: terminated - diverged,
            escaped,
            diverged,
            unlaunched,
            steps_taken: self.steps_taken,
            closest_approach,
            longest_trail: self.rays.iter().map(|r| r.trail().len()).max().unwrap_or(0),
        }
    }
}
