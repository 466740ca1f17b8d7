// src/emitter.rs

use crate::error::{LensingError, Result};
use crate::mass::MassBody;
use crate::ray::Ray;
use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Uniform;
use serde::{Deserialize, Serialize};

/// A point light source spraying a fan of rays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Emitter {
    pub source: [f64; 2],
    pub num_rays: usize,
    /// Total opening angle of the fan.
    pub spread_degrees: f64,
    pub speed: f64,
    /// Direction of the fan's center line, 0 = +x.
    pub base_angle_degrees: f64,
    /// Uniform per-ray perturbation of the direction, `±jitter_degrees`.
    pub jitter_degrees: f64,
    pub seed: Option<u64>,
}

impl Default for Emitter {
    fn default() -> Self {
        Emitter {
            source: [100.0, 300.0],
            num_rays: 30,
            spread_degrees: 60.0,
            speed: 70.0,
            base_angle_degrees: 0.0,
            jitter_degrees: 0.0,
            seed: None,
        }
    }
}

impl Emitter {
    pub fn validate(&self) -> Result<()> {
        let finite = self.source.iter().all(|v| v.is_finite())
            && self.spread_degrees.is_finite()
            && self.speed.is_finite()
            && self.base_angle_degrees.is_finite()
            && self.jitter_degrees.is_finite();
        if !finite {
            return Err(LensingError::InvalidConfig(
                "emitter values must be finite".to_string(),
            ));
        }
        if self.speed < 0.0 || self.spread_degrees < 0.0 || self.jitter_degrees < 0.0 {
            return Err(LensingError::InvalidConfig(format!(
                "emitter speed, spread and jitter must be non-negative (speed={}, spread={}, jitter={})",
                self.speed, self.spread_degrees, self.jitter_degrees
            )));
        }
        Ok(())
    }

    /// Launch directions in degrees, before jitter.
    pub fn directions(&self) -> Vec<f64> {
        match self.num_rays {
            0 => Vec::new(),
            1 => vec![self.base_angle_degrees],
            n => {
                let step = self.spread_degrees / (n - 1) as f64;
                (0..n)
                    .map(|i| self.base_angle_degrees - self.spread_degrees / 2.0 + step * i as f64)
                    .collect()
            }
        }
    }

    /// Initialized rays, one per direction.
    pub fn emit(&self, body: &MassBody) -> Result<Vec<Ray>> {
        self.validate()?;
        let source = Vector2::new(self.source[0], self.source[1]);
        let mut directions = self.directions();
        if self.jitter_degrees > 0.0 {
            perturb_directions(&mut directions, self.jitter_degrees, self.seed)?;
        }

        Ok(directions
            .into_iter()
            .map(|degrees| {
                let angle = degrees.to_radians();
                let velocity = self.speed * Vector2::new(angle.cos(), angle.sin());
                Ray::launch(source, velocity, body)
            })
            .collect())
    }
}

fn perturb_directions(directions: &mut [f64], threshold: f64, seed: Option<u64>) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let range = Uniform::new_inclusive(-threshold, threshold)
        .map_err(|e| LensingError::InvalidConfig(format!("bad jitter range: {e}")))?;
    for direction in directions.iter_mut() {
        *direction += rng.sample(&range);
    }
    Ok(())
}
