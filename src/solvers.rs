// src/solvers.rs

use crate::error::LensingError;
use crate::geodesic::{derivative, StateVector};
use crate::mass::MassBody;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed-step integrator over the polar ray state.
///
/// `h` is the caller's frame time reused as the step of the integration
/// parameter. There is no step-size control; large `h` relative to the radius
/// is unstable.
pub trait Integrator: Sync {
    fn advance(&self, s0: StateVector, h: f64, body: &MassBody) -> StateVector;
    fn name(&self) -> String;
}

pub struct Rk4;
impl Integrator for Rk4 {
    fn name(&self) -> String {
        "RK4".to_string()
    }

    fn advance(&self, s0: StateVector, h: f64, body: &MassBody) -> StateVector {
        let h2 = h / 2.0;
        let h6 = h / 6.0;

        let k1 = derivative(&s0, body);
        let k2 = derivative(&s0.add(k1.scale(h2)), body);
        let k3 = derivative(&s0.add(k2.scale(h2)), body);
        let k4 = derivative(&s0.add(k3.scale(h)), body);

        let sum = k1.add(k2.scale(2.0)).add(k3.scale(2.0)).add(k4);
        s0.add(sum.scale(h6))
    }
}

pub struct Euler;
impl Integrator for Euler {
    fn name(&self) -> String {
        "Euler".to_string()
    }

    fn advance(&self, s0: StateVector, h: f64, body: &MassBody) -> StateVector {
        s0.add(derivative(&s0, body).scale(h))
    }
}

/// Integrator choice as it appears in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IntegratorKind {
    #[default]
    #[serde(rename = "rk4")]
    Rk4,
    #[serde(rename = "euler")]
    Euler,
}

impl IntegratorKind {
    pub fn integrator(self) -> &'static dyn Integrator {
        match self {
            IntegratorKind::Rk4 => &Rk4,
            IntegratorKind::Euler => &Euler,
        }
    }
}

/// Accepts the config names, ignoring case.
impl FromStr for IntegratorKind {
    type Err = LensingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rk4" => Ok(IntegratorKind::Rk4),
            "euler" => Ok(IntegratorKind::Euler),
            other => Err(LensingError::InvalidConfig(format!(
                "unknown integrator '{other}', expected 'rk4' or 'euler'"
            ))),
        }
    }
}

impl fmt::Display for IntegratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.integrator().name())
    }
}
