//! Includes commonly used library components.

pub use crate::{
    Error,
    RunDescriptor,
    Sweep,
    SweepDescriptor,
    SweepRecord,
    SweepResult,
};
pub use crate::cascade::{Load, Segment, Termination};
pub use crate::config::SweepConfig;
pub use crate::frequency::FrequencySweep;
pub use crate::line::{CoaxialLine, Dielectric, LineModel, LineSpec, LossModelLine, ParallelWireLine};
pub use num_complex::Complex64;
