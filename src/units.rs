// src/units.rs

use crate::error::{LensingError, Result};
use serde::{Deserialize, Serialize};

const G_SI: f64 = 6.6743e-11;
const C_SI: f64 = 299_792_458.0;

/// Gravitational constant and speed of light for one unit system.
///
/// The pixel system keeps capture radii on the order of tens of pixels for
/// masses in the 1e5 range, which is what the screen-space scenes are tuned for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalConstants {
    pub g: f64,
    pub c: f64,
}

impl PhysicalConstants {
    pub fn new(g: f64, c: f64) -> Result<Self> {
        if !(g.is_finite() && c.is_finite()) || g <= 0.0 || c <= 0.0 {
            return Err(LensingError::InvalidConstants { g, c });
        }
        Ok(Self { g, c })
    }

    pub fn pixel() -> Self {
        Self { g: 1.0, c: 100.0 }
    }

    pub fn si() -> Self {
        Self { g: G_SI, c: C_SI }
    }

    /// `2·G·m / c²`
    pub fn capture_radius(&self, mass: f64) -> f64 {
        2.0 * self.g * mass / (self.c * self.c)
    }

    pub fn mass_for_capture_radius(&self, capture_radius: f64) -> f64 {
        capture_radius * self.c * self.c / (2.0 * self.g)
    }
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self::pixel()
    }
}
