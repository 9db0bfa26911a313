//! Serializable description of a complete sweep.

use ndarray::Array1;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::cascade::{Segment, Termination};
use crate::frequency::FrequencySweep;
use crate::{Error, Sweep, SweepDescriptor};

fn default_reference_impedance() -> f64 {
    50.0
}

/// A line, fixed load and frequency sweep, as read from a settings file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// The line, ordered from the source to the load.
    pub segments: Vec<Segment>,
    /// Load impedance as `[re, im]` [Ω].
    pub load: Complex64,
    /// Reference impedance for reflection and VSWR [Ω].
    #[serde(default = "default_reference_impedance")]
    pub reference_impedance: f64,
    pub frequencies: FrequencySweep,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub parallel: bool,
}

impl SweepConfig {
    /// Parses a JSON document.
    pub fn from_json(text: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builds the sweep and resolves its frequency list.
    pub fn build(&self) -> Result<(Sweep, Array1<f64>), Error> {
        let sweep = Sweep::new(SweepDescriptor {
            segments: self.segments.clone(),
            termination: Termination::new(self.load, self.reference_impedance),
        })?;
        Ok((sweep, self.frequencies.resolve()?))
    }
}
