// src/lib.rs

// Bending light rays around a point mass.
//
// Rays live in a 2D polar frame centred on a [`MassBody`], are advanced with
// a fixed-step RK4 integrator and keep a trail of every Cartesian point they
// visit, ready for something else to draw.

pub mod config;
pub mod coords;
pub mod emitter;
pub mod error;
pub mod export;
pub mod geodesic;
pub mod mass;
pub mod ray;
pub mod simulation;
pub mod solvers;
pub mod units;

pub use config::{BodyConfig, SimulationConfig};
pub use coords::{to_cartesian, to_polar};
pub use emitter::Emitter;
pub use error::{LensingError, Result};
pub use export::{export_run_record, export_trails};
pub use geodesic::{accelerate, StateVector, MIN_RADIUS};
pub use mass::MassBody;
pub use ray::{Ray, RayPhase, StepOutcome};
pub use simulation::{RunSummary, Simulation};
pub use solvers::{Euler, Integrator, IntegratorKind, Rk4};
pub use units::PhysicalConstants;
