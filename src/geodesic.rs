// src/geodesic.rs

// Equatorial ray equations in polar form.
//
// The model is the weak-field approximation
//
// ```text
// θ'' = -(2 / r) · r' · θ'
// r'' = -(c² · rs) / (2 r²) + r · θ'²
// ```
//
// with derivatives taken with respect to the integration parameter. It is not
// the full Schwarzschild geodesic; it bends and captures rays plausibly near a
// point mass, which is all the trails are used for.

use crate::mass::MassBody;

/// Radius used in place of anything smaller when evaluating accelerations.
pub const MIN_RADIUS: f64 = 1e-9;

/// `(r, θ, r', θ')` as a plain value, combined with [`StateVector::add`] and
/// [`StateVector::scale`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StateVector {
    pub radius: f64,
    pub angle: f64,
    pub radial_rate: f64,
    pub angular_rate: f64,
}

impl StateVector {
    pub fn new(radius: f64, angle: f64, radial_rate: f64, angular_rate: f64) -> Self {
        StateVector {
            radius,
            angle,
            radial_rate,
            angular_rate,
        }
    }

    pub fn add(self, other: StateVector) -> StateVector {
        StateVector {
            radius: self.radius + other.radius,
            angle: self.angle + other.angle,
            radial_rate: self.radial_rate + other.radial_rate,
            angular_rate: self.angular_rate + other.angular_rate,
        }
    }

    pub fn scale(self, k: f64) -> StateVector {
        StateVector {
            radius: self.radius * k,
            angle: self.angle * k,
            radial_rate: self.radial_rate * k,
            angular_rate: self.angular_rate * k,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.radius.is_finite()
            && self.angle.is_finite()
            && self.radial_rate.is_finite()
            && self.angular_rate.is_finite()
    }
}

/// Returns `(radial_accel, angular_accel)`. Unguarded: `radius` must be non-zero.
pub fn accelerate(
    radius: f64,
    radial_rate: f64,
    angular_rate: f64,
    capture_radius: f64,
    c: f64,
) -> (f64, f64) {
    let angular_accel = -(2.0 / radius) * radial_rate * angular_rate;
    let radial_accel =
        -(c * c * capture_radius) / (2.0 * radius * radius) + radius * angular_rate * angular_rate;
    (radial_accel, angular_accel)
}

/// Acceleration at `state` with the radius clamped to [`MIN_RADIUS`].
pub fn guarded_acceleration(state: &StateVector, body: &MassBody) -> (f64, f64) {
    accelerate(
        state.radius.max(MIN_RADIUS),
        state.radial_rate,
        state.angular_rate,
        body.capture_radius(),
        body.speed_of_light(),
    )
}

/// Time derivative of `state`: `(r', θ', r'', θ'')`.
pub fn derivative(state: &StateVector, body: &MassBody) -> StateVector {
    let (radial_accel, angular_accel) = guarded_acceleration(state, body);
    StateVector::new(
        state.radial_rate,
        state.angular_rate,
        radial_accel,
        angular_accel,
    )
}
