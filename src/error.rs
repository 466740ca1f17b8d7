// src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LensingError {
    #[error("invalid physical constants: g={g}, c={c}")]
    InvalidConstants { g: f64, c: f64 },
    #[error("invalid mass body: {0}")]
    InvalidMass(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("ray has already been initialized")]
    AlreadyInitialized,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LensingError>;
