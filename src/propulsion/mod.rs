pub mod curve;
pub mod profile;

pub use curve::ThrustCurve;
pub use profile::{grid_len, index_for_time, ThrustProfile};

use thiserror::Error;

/// Errors raised while loading or resampling a thrust curve.
#[derive(Debug, Error)]
pub enum ThrustCurveError {
    #[error("thrust curve needs at least two numeric samples, found {valid}")]
    InsufficientSamples { valid: usize },

    #[error("invalid resampling grid (dt = {dt}, max_time = {max_time})")]
    InvalidGrid { dt: f64, max_time: f64 },

    #[error("thrust lookup at step {index} is past the end of the profile ({len} steps)")]
    OutOfRange { index: usize, len: usize },

    #[error("failed to read thrust curve: {0}")]
    Io(#[from] std::io::Error),
}
