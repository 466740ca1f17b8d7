// src/mass.rs

use crate::error::{LensingError, Result};
use crate::units::PhysicalConstants;
use nalgebra::Vector2;
use std::fmt;

/// The gravitating body rays bend around.
///
/// Fields are private so the capture radius can never drift from the mass it
/// was derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassBody {
    position: Vector2<f64>,
    mass: f64,
    capture_radius: f64,
    constants: PhysicalConstants,
}

impl MassBody {
    pub fn new(position: Vector2<f64>, mass: f64, constants: PhysicalConstants) -> Result<Self> {
        let constants = PhysicalConstants::new(constants.g, constants.c)?;
        if !(position.x.is_finite() && position.y.is_finite()) {
            return Err(LensingError::InvalidMass(format!(
                "position must be finite, got ({}, {})",
                position.x, position.y
            )));
        }
        if !mass.is_finite() || mass < 0.0 {
            return Err(LensingError::InvalidMass(format!(
                "mass must be finite and non-negative, got {mass}"
            )));
        }
        Ok(MassBody {
            position,
            mass,
            capture_radius: constants.capture_radius(mass),
            constants,
        })
    }

    /// Picks the mass whose capture radius is `capture_radius` under `constants`.
    pub fn with_capture_radius(
        position: Vector2<f64>,
        capture_radius: f64,
        constants: PhysicalConstants,
    ) -> Result<Self> {
        Self::new(
            position,
            constants.mass_for_capture_radius(capture_radius),
            constants,
        )
    }

    pub fn position(&self) -> Vector2<f64> {
        self.position
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn capture_radius(&self) -> f64 {
        self.capture_radius
    }

    pub fn constants(&self) -> PhysicalConstants {
        self.constants
    }

    pub fn speed_of_light(&self) -> f64 {
        self.constants.c
    }

    /// Circular photon orbit, 1.5 capture radii.
    pub fn photon_sphere_radius(&self) -> f64 {
        1.5 * self.capture_radius
    }
}

impl fmt::Display for MassBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MassBody(m={:.3e}, p=[{:.2}, {:.2}], rs={:.3}, photon_sphere={:.3})",
            self.mass,
            self.position.x,
            self.position.y,
            self.capture_radius,
            self.photon_sphere_radius()
        )
    }
}
