use approx::assert_relative_eq;
use lensing::{
    to_cartesian, to_polar, Integrator, MassBody, PhysicalConstants, Ray, Rk4, Simulation,
    StateVector, StepOutcome,
};
use nalgebra::Vector2;

/// Lens at (400, 300) with a 40 px capture radius in pixel units.
pub fn demo_lens() -> MassBody {
    MassBody::with_capture_radius(Vector2::new(400.0, 300.0), 40.0, PhysicalConstants::pixel())
        .unwrap()
}

pub fn massless_lens() -> MassBody {
    MassBody::new(Vector2::new(400.0, 300.0), 0.0, PhysicalConstants::pixel()).unwrap()
}

/// Steps until capture or `max_steps`, returning the number of steps taken.
pub fn run_until_captured(ray: &mut Ray, body: &MassBody, dt: f64, max_steps: usize) -> usize {
    let mut steps = 0;
    while ray.is_active() && steps < max_steps {
        ray.step(dt, body);
        steps += 1;
    }
    steps
}

// ==================================================================================
// Coordinates
// ==================================================================================

#[test]
fn polar_round_trip_about_the_lens() {
    let center = demo_lens().position();
    for i in 1..=20 {
        let radius = i as f64 * 17.5;
        for j in 0..36 {
            let angle = -3.1 + j as f64 * 0.17;
            let (r, theta) = to_polar(to_cartesian(radius, angle, center), center);
            assert_relative_eq!(r, radius, max_relative = 1e-12);
            assert_relative_eq!(theta, angle, epsilon = 1e-9);
        }
    }
}

// ==================================================================================
// Lifecycle
// ==================================================================================

#[test]
fn trail_grows_one_point_per_step() {
    let body = demo_lens();
    let mut ray = Ray::launch(Vector2::new(100.0, 100.0), Vector2::new(0.0, 70.0), &body);
    for n in 1..=100 {
        assert_eq!(ray.step(0.008, &body), StepOutcome::Advanced);
        assert_eq!(ray.trail().len(), n + 1);
    }
    assert!(ray.is_active());
}

#[test]
fn terminated_ray_ignores_further_steps() {
    let body = demo_lens();
    let mut ray = Ray::launch(Vector2::new(100.0, 300.0), Vector2::new(70.0, 0.0), &body);
    run_until_captured(&mut ray, &body, 0.008, 10_000);
    assert!(!ray.is_active());

    let trail = ray.trail().to_vec();
    let state = ray.polar();
    for _ in 0..25 {
        assert_eq!(ray.step(0.008, &body), StepOutcome::Idle);
    }
    assert_eq!(ray.trail(), trail.as_slice());
    assert_eq!(ray.polar(), state);
    assert!(!ray.is_active());
}

#[test]
fn zero_velocity_ray_stays_put_without_mass() {
    let body = massless_lens();
    let start = Vector2::new(250.0, 180.0);
    let mut ray = Ray::launch(start, Vector2::zeros(), &body);
    assert_eq!(ray.polar().radial_rate, 0.0);
    assert_eq!(ray.polar().angular_rate, 0.0);

    let initial = ray.polar();
    for n in 1..=10 {
        ray.step(0.05, &body);
        assert_eq!(ray.polar(), initial);
        assert_eq!(ray.trail().len(), n + 1);
    }
    for point in ray.trail() {
        assert_relative_eq!(point.x, start.x, epsilon = 1e-9);
        assert_relative_eq!(point.y, start.y, epsilon = 1e-9);
    }
}

#[test]
fn zero_velocity_ray_falls_in_with_mass() {
    let body = demo_lens();
    let mut ray = Ray::launch(Vector2::new(400.0, 420.0), Vector2::zeros(), &body);
    assert_eq!(ray.polar().radial_rate, 0.0);
    assert_eq!(ray.polar().angular_rate, 0.0);
    run_until_captured(&mut ray, &body, 0.008, 20_000);
    assert!(!ray.is_active());
}

// ==================================================================================
// Capture
// ==================================================================================

#[test]
fn head_on_ray_is_captured() {
    let body = demo_lens();
    let mut ray = Ray::launch(Vector2::new(100.0, 300.0), Vector2::new(70.0, 0.0), &body);
    assert_relative_eq!(ray.polar().radius, 300.0);
    assert_relative_eq!(ray.polar().radial_rate, -70.0, epsilon = 1e-12);
    assert_relative_eq!(ray.polar().angular_rate, 0.0, epsilon = 1e-12);

    let steps = run_until_captured(&mut ray, &body, 0.008, 10_000);
    assert!(steps < 10_000, "ray never reached the capture radius");
    assert!(!ray.is_active());
    assert!(ray.polar().radius <= 40.0);
    // the step before capture was still outside
    let before = ray.trail()[ray.trail().len() - 2];
    assert!((before - body.position()).norm() > 40.0);
    // stays on the x axis the whole way in
    assert!(ray.trail().iter().all(|p| (p.y - 300.0).abs() < 1e-9));
}

#[test]
fn overshooting_step_is_kept_in_the_trail() {
    let body = demo_lens();
    // 5 px outside the capture radius, moving inward far faster than 5 px per step.
    let mut ray = Ray::launch(Vector2::new(445.0, 300.0), Vector2::new(-100.0, 0.0), &body);
    assert_eq!(ray.step(0.1, &body), StepOutcome::Captured);

    assert!(!ray.is_active());
    assert_eq!(ray.trail().len(), 2);
    let last = ray.trail()[1];
    let radius = (last - body.position()).norm();
    assert!(radius < 36.0, "expected a deep overshoot, got r={radius}");
    assert_relative_eq!(radius, ray.polar().radius, epsilon = 1e-9);
}

#[test]
fn grazing_ray_is_deflected_toward_the_lens() {
    let body = demo_lens();
    let mut ray = Ray::launch(Vector2::new(100.0, 420.0), Vector2::new(70.0, 0.0), &body);
    for _ in 0..1500 {
        ray.step(0.008, &body);
    }
    assert!(ray.is_active(), "ray with 120 px impact parameter should escape");
    let trail = ray.trail();
    let n = trail.len();
    let exit = trail[n - 1] - trail[n - 2];
    // heading has turned downward, toward the lens
    assert!(exit.y < 0.0, "exit direction {exit:?}");
    assert!(ray.closest_approach() < 120.0);
}

// ==================================================================================
// Integrator
// ==================================================================================

#[test]
fn one_rk4_step_matches_four_quarter_steps() {
    let body = demo_lens();
    let s0 = StateVector::new(180.0, 2.5, -40.0, 0.2);
    let dt = 0.004;
    let single = Rk4.advance(s0, dt, &body);
    let quartered = (0..4).fold(s0, |s, _| Rk4.advance(s, dt / 4.0, &body));
    assert_relative_eq!(single.radius, quartered.radius, max_relative = 1e-10);
    assert_relative_eq!(single.angle, quartered.angle, max_relative = 1e-10);
    assert_relative_eq!(single.radial_rate, quartered.radial_rate, max_relative = 1e-9);
    assert_relative_eq!(single.angular_rate, quartered.angular_rate, max_relative = 1e-9);
}

#[test]
fn trail_never_contains_non_finite_points() {
    let body = demo_lens();
    // Starting inside the capture radius: captured on the first step, but the
    // step itself must still be finite.
    let mut ray = Ray::launch(Vector2::new(400.0, 301.0), Vector2::new(0.0, -5.0), &body);
    ray.step(0.5, &body);
    assert!(!ray.is_active());
    assert!(ray
        .trail()
        .iter()
        .all(|p| p.x.is_finite() && p.y.is_finite()));
}

#[test]
fn overflowing_step_stops_the_ray_without_touching_the_trail() {
    let body = MassBody::new(Vector2::zeros(), 1e30, PhysicalConstants::si()).unwrap();
    let start = Vector2::new(1e4, 0.0);
    let mut ray = Ray::launch(start, Vector2::new(0.0, 3e8), &body);
    let state = ray.polar();

    assert_eq!(ray.step(1e150, &body), StepOutcome::Diverged);
    assert!(!ray.is_active());
    assert!(ray.is_diverged());
    assert_eq!(ray.trail(), &[start]);
    assert_eq!(ray.polar(), state);
    assert_eq!(ray.position(), start);

    assert_eq!(ray.step(1e-6, &body), StepOutcome::Idle);
    assert_eq!(ray.trail().len(), 1);

    let summary = Simulation::new(body, vec![ray], 1e150, 1).summary();
    assert_eq!(summary.diverged, 1);
    assert_eq!(summary.captured, 0);
    assert_eq!(summary.escaped, 0);
}
