// src/config.rs

// Scene configuration loaded from JSON.
//
// Every field has a default, so `{}` describes the stock scene: a lens with a
// 40 px capture radius at (400, 300) and a 30-ray, 60° fan fired from
// (100, 300) at 70 px/s.
//
// ```json
// {
//   "constants": { "g": 1.0, "c": 100.0 },
//   "body": { "position": [400.0, 300.0], "capture_radius": 40.0 },
//   "emitter": { "source": [100.0, 300.0], "num_rays": 30, "spread_degrees": 60.0, "speed": 70.0 },
//   "dt": 0.008,
//   "num_steps": 2000,
//   "integrator": "rk4"
// }
// ```

use crate::emitter::Emitter;
use crate::error::{LensingError, Result};
use crate::mass::MassBody;
use crate::simulation::Simulation;
use crate::solvers::IntegratorKind;
use crate::units::PhysicalConstants;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// The lens. Give either `mass` or `capture_radius`, not both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    pub position: [f64; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture_radius: Option<f64>,
}

impl Default for BodyConfig {
    fn default() -> Self {
        BodyConfig {
            position: [400.0, 300.0],
            mass: None,
            capture_radius: Some(40.0),
        }
    }
}

impl BodyConfig {
    pub fn build(&self, constants: PhysicalConstants) -> Result<MassBody> {
        let position = Vector2::new(self.position[0], self.position[1]);
        match (self.mass, self.capture_radius) {
            (Some(mass), None) => MassBody::new(position, mass, constants),
            (None, Some(rs)) => MassBody::with_capture_radius(position, rs, constants),
            _ => Err(LensingError::InvalidConfig(
                "body needs exactly one of `mass` or `capture_radius`".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub constants: PhysicalConstants,
    pub body: BodyConfig,
    pub emitter: Emitter,
    pub dt: f64,
    pub num_steps: usize,
    pub integrator: IntegratorKind,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            constants: PhysicalConstants::default(),
            body: BodyConfig::default(),
            emitter: Emitter::default(),
            dt: 0.008,
            num_steps: 2000,
            integrator: IntegratorKind::default(),
        }
    }
}

impl SimulationConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: SimulationConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        PhysicalConstants::new(self.constants.g, self.constants.c)?;
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(LensingError::InvalidConfig(format!(
                "dt must be positive and finite, got {}",
                self.dt
            )));
        }
        self.body.build(self.constants)?;
        self.emitter.validate()
    }

    pub fn build(&self) -> Result<Simulation> {
        self.validate()?;
        let body = self.body.build(self.constants)?;
        let rays = self.emitter.emit(&body)?;
        Ok(Simulation::new(body, rays, self.dt, self.num_steps).with_integrator(self.integrator))
    }
}
