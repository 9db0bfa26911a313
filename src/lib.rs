//! A calculator for the frequency-domain behaviour of lossy transmission lines.
//!
//! A line is described by its construction (`line::LineSpec`), turned into
//! per-unit-length R, L, G, C at each frequency, solved for its propagation
//! constant and characteristic impedance, and cascaded with other lines and a
//! load. `Sweep` drives this over a list of frequencies.
//!
//! To get started, refer to the `demos` directory in the main repository.

mod sweep;

pub mod cascade;
pub mod config;
pub mod consts;
pub mod frequency;
pub mod line;
pub mod prelude;
pub mod propagation;

pub use sweep::{run, RunDescriptor, Sweep, SweepDescriptor, SweepRecord, SweepResult};

/// Represents an error in a line calculation.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid line geometry: {reason}")]
    InvalidGeometry {
        reason: String,
    },
    #[error("Frequency must be finite and positive ( frequency: {0} Hz )")]
    InvalidFrequency(f64),
    #[error("Invalid termination: {reason}")]
    InvalidTermination {
        reason: String,
    },
    #[error("Propagation is undefined for a line with G = C = 0 \
        ( frequency: {frequency} Hz )")]
    DegenerateLine {
        frequency: f64,
    },
    #[error("A sweep needs at least one frequency point")]
    EmptySweep,
    #[error(transparent)]
    Config(#[from] serde_json::Error),
}

/// Checks that a frequency is usable as a sweep point.
#[inline]
pub(crate) fn check_frequency(frequency: f64) -> Result<f64, Error> {
    if frequency.is_finite() && frequency > 0.0 {
        Ok(frequency)
    } else {
        Err(Error::InvalidFrequency(frequency))
    }
}
