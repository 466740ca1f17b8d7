// src/ray.rs

// A single light ray and its trail.
//
// A ray goes `Uninitialized -> Active -> Terminated` and never back. Every
// successful [`Ray::step`] appends exactly one point to the trail; the capture
// check runs after the append, so the last trail point may already sit inside
// the capture radius.

use crate::coords::{radial_basis, to_cartesian, to_polar};
use crate::error::{LensingError, Result};
use crate::geodesic::{guarded_acceleration, StateVector};
use crate::mass::MassBody;
use crate::solvers::{Integrator, Rk4};
use nalgebra::Vector2;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RayPhase {
    #[default]
    Uninitialized,
    Active,
    Terminated,
}

/// What a call to [`Ray::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Ray was not active; nothing changed.
    Idle,
    Advanced,
    /// Crossed the capture radius on this step.
    Captured,
    /// The integrator produced a non-finite state; the ray was stopped
    /// without touching the trail.
    Diverged,
}

#[derive(Debug, Clone)]
pub struct Ray {
    position: Vector2<f64>,
    velocity: Vector2<f64>,
    trail: Vec<Vector2<f64>>,
    state: StateVector,
    radial_accel: f64,
    angular_accel: f64,
    closest_approach: f64,
    diverged: bool,
    phase: RayPhase,
}

impl Ray {
    pub fn new() -> Self {
        Ray {
            position: Vector2::zeros(),
            velocity: Vector2::zeros(),
            trail: Vec::new(),
            state: StateVector::default(),
            radial_accel: 0.0,
            angular_accel: 0.0,
            closest_approach: f64::INFINITY,
            diverged: false,
            phase: RayPhase::Uninitialized,
        }
    }

    /// Builds and initializes a ray in one go.
    pub fn launch(position: Vector2<f64>, velocity: Vector2<f64>, body: &MassBody) -> Self {
        let mut ray = Ray::new();
        ray.seed(position, velocity, body);
        ray
    }

    /// Places the ray at `position` moving with `velocity`.
    ///
    /// The velocity is split into a radial rate and an angular rate about the
    /// body. A start point on top of the body gets both rates set to zero.
    /// Fails if the ray was already initialized.
    pub fn initialize(
        &mut self,
        position: Vector2<f64>,
        velocity: Vector2<f64>,
        body: &MassBody,
    ) -> Result<()> {
        if self.phase != RayPhase::Uninitialized {
            return Err(LensingError::AlreadyInitialized);
        }
        self.seed(position, velocity, body);
        Ok(())
    }

    fn seed(&mut self, position: Vector2<f64>, velocity: Vector2<f64>, body: &MassBody) {
        let center = body.position();
        let (radius, angle) = to_polar(position, center);
        let (radial_rate, angular_rate) = match radial_basis(position, center) {
            Some((radial, tangential)) => {
                (velocity.dot(&radial), velocity.dot(&tangential) / radius)
            }
            None => (0.0, 0.0),
        };

        self.position = position;
        self.velocity = velocity;
        self.state = StateVector::new(radius, angle, radial_rate, angular_rate);
        self.radial_accel = 0.0;
        self.angular_accel = 0.0;
        self.closest_approach = radius;
        self.diverged = false;
        self.trail.clear();
        self.trail.push(position);
        self.phase = RayPhase::Active;
    }

    /// Advances the ray by `dt` with RK4. No-op unless the ray is active.
    pub fn step(&mut self, dt: f64, body: &MassBody) -> StepOutcome {
        self.step_with(dt, body, &Rk4)
    }

    pub fn step_with(
        &mut self,
        dt: f64,
        body: &MassBody,
        integrator: &dyn Integrator,
    ) -> StepOutcome {
        if self.phase != RayPhase::Active {
            return StepOutcome::Idle;
        }

        let next = integrator.advance(self.state, dt, body);
        let position = to_cartesian(next.radius, next.angle, body.position());
        if !next.is_finite() || !(position.x.is_finite() && position.y.is_finite()) {
            debug!(radius = self.state.radius, "ray diverged, terminating");
            self.diverged = true;
            self.phase = RayPhase::Terminated;
            return StepOutcome::Diverged;
        }

        self.state = next;
        let (radial_accel, angular_accel) = guarded_acceleration(&next, body);
        self.radial_accel = radial_accel;
        self.angular_accel = angular_accel;
        self.position = position;
        self.trail.push(position);
        self.closest_approach = self.closest_approach.min(next.radius);

        if next.radius <= body.capture_radius() {
            debug!(
                radius = next.radius,
                capture_radius = body.capture_radius(),
                trail_len = self.trail.len(),
                "ray captured"
            );
            self.phase = RayPhase::Terminated;
            return StepOutcome::Captured;
        }
        StepOutcome::Advanced
    }

    pub fn trail(&self) -> &[Vector2<f64>] {
        &self.trail
    }

    pub fn is_active(&self) -> bool {
        self.phase == RayPhase::Active
    }

    pub fn phase(&self) -> RayPhase {
        self.phase
    }

    pub fn is_diverged(&self) -> bool {
        self.diverged
    }

    pub fn position(&self) -> Vector2<f64> {
        self.position
    }

    /// Velocity the ray was launched with.
    pub fn velocity(&self) -> Vector2<f64> {
        self.velocity
    }

    pub fn polar(&self) -> StateVector {
        self.state
    }

    /// `(radial, angular)` acceleration re-evaluated at the state reached by
    /// the last step, not any intermediate integrator stage. Zero until the
    /// first step.
    pub fn acceleration(&self) -> (f64, f64) {
        (self.radial_accel, self.angular_accel)
    }

    pub fn closest_approach(&self) -> f64 {
        self.closest_approach
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self::new()
    }
}
