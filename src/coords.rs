// src/coords.rs

// Cartesian <-> polar conversion about an arbitrary center.

use nalgebra::Vector2;

/// Returns `(radius, angle)` of `point` as seen from `center`, angle in (-π, π].
///
/// `point == center` gives `(0.0, 0.0)`; callers treat that as singular.
pub fn to_polar(point: Vector2<f64>, center: Vector2<f64>) -> (f64, f64) {
    let d = point - center;
    (d.norm(), d.y.atan2(d.x))
}

pub fn to_cartesian(radius: f64, angle: f64, center: Vector2<f64>) -> Vector2<f64> {
    center + Vector2::new(radius * angle.cos(), radius * angle.sin())
}

/// Outward unit vector from `center` toward `point` and its +90° rotation,
/// or `None` when the two coincide.
pub fn radial_basis(
    point: Vector2<f64>,
    center: Vector2<f64>,
) -> Option<(Vector2<f64>, Vector2<f64>)> {
    let d = point - center;
    let distance = d.norm();
    if distance == 0.0 {
        return None;
    }
    let radial = d / distance;
    let tangential = Vector2::new(-radial.y, radial.x);
    Some((radial, tangential))
}
