//! Line constructions and their per-unit-length electrical parameters.

mod coaxial;
mod conductor;
mod loss_model;
mod parallel_wire;

pub use coaxial::CoaxialLine;
pub use conductor::skin_depth;
pub use loss_model::LossModelLine;
pub use parallel_wire::ParallelWireLine;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::consts::{angular, SPEED_OF_LIGHT};
use crate::propagation::{self, PropagationResult};
use crate::{check_frequency, Error};

/// Per-unit-length parameters of a line at one frequency.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineElectricalParams {
    /// Series resistance [Ω / m].
    pub resistance: f64,
    /// Series inductance, including internal inductance [H / m].
    pub inductance: f64,
    /// Shunt conductance [S / m].
    pub conductance: f64,
    /// Shunt capacitance [F / m].
    pub capacitance: f64,
}

impl LineElectricalParams {
    /// R + jωL.
    #[inline]
    pub fn series_impedance(&self, omega: f64) -> Complex64 {
        Complex64::new(self.resistance, omega * self.inductance)
    }

    /// G + jωC.
    #[inline]
    pub fn shunt_admittance(&self, omega: f64) -> Complex64 {
        Complex64::new(self.conductance, omega * self.capacitance)
    }
}

/// The insulating material between a line's conductors.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dielectric {
    /// Relative permittivity, εr.
    pub permittivity: f64,
    /// Loss tangent, tan δ.
    #[serde(default)]
    pub loss_tangent: f64,
}

impl Dielectric {
    /// Dry air, treated as vacuum.
    pub const AIR: Dielectric = Dielectric { permittivity: 1.0, loss_tangent: 0.0 };
    /// Solid polyethylene.
    pub const POLYETHYLENE: Dielectric = Dielectric { permittivity: 2.25, loss_tangent: 2e-4 };
    /// Solid PTFE.
    pub const PTFE: Dielectric = Dielectric { permittivity: 2.1, loss_tangent: 2e-4 };

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if !(self.permittivity.is_finite() && self.permittivity >= 1.0) {
            return Err(Error::InvalidGeometry {
                reason: format!("relative permittivity must be at least 1, got {}", self.permittivity),
            });
        }
        if !(self.loss_tangent.is_finite() && self.loss_tangent >= 0.0) {
            return Err(Error::InvalidGeometry {
                reason: format!("loss tangent must not be negative, got {}", self.loss_tangent),
            });
        }
        Ok(())
    }
}

impl Default for Dielectric {
    fn default() -> Self {
        Self::AIR
    }
}

/// Describes how a line construction turns into R, L, G, C.
pub trait LineModel {
    /// Checks that the construction is physically meaningful.
    fn validate(&self) -> Result<(), Error>;

    /// Per-unit-length parameters at a frequency already known to be valid.
    fn electrical_params(&self, frequency: f64) -> LineElectricalParams;

    /// The impedance the line is designed for, if one was declared.
    fn nominal_impedance(&self) -> Option<f64> {
        None
    }
}

/// A line construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LineSpec {
    Coaxial(CoaxialLine),
    ParallelWire(ParallelWireLine),
    LossModel(LossModelLine),
}

impl LineSpec {
    #[inline]
    fn model(&self) -> &dyn LineModel {
        match self {
            LineSpec::Coaxial(line) => line,
            LineSpec::ParallelWire(line) => line,
            LineSpec::LossModel(line) => line,
        }
    }

    /// Checks the construction without evaluating it.
    pub fn validate(&self) -> Result<(), Error> {
        self.model().validate()
    }

    /// The declared design impedance, used as a sanity check on computed Z0.
    pub fn nominal_impedance(&self) -> Option<f64> {
        self.model().nominal_impedance()
    }

    /// Per-unit-length R, L, G, C at `frequency` [Hz].
    pub fn electrical_params(&self, frequency: f64) -> Result<LineElectricalParams, Error> {
        compute(self, frequency)
    }

    /// Propagation constant and characteristic impedance at `frequency`.
    pub fn propagation(&self, frequency: f64) -> Result<PropagationResult, Error> {
        propagation::solve(&compute(self, frequency)?, frequency)
    }

    /// Characteristic impedance at `frequency`.
    pub fn characteristic_impedance(&self, frequency: f64) -> Result<Complex64, Error> {
        Ok(self.propagation(frequency)?.z0)
    }

    /// Phase velocity relative to the speed of light, ω / (β c).
    pub fn velocity_factor(&self, frequency: f64) -> Result<f64, Error> {
        let beta = self.propagation(frequency)?.phase_constant();
        Ok(angular(frequency) / (beta * SPEED_OF_LIGHT))
    }
}

impl From<CoaxialLine> for LineSpec {
    fn from(line: CoaxialLine) -> Self {
        LineSpec::Coaxial(line)
    }
}

impl From<ParallelWireLine> for LineSpec {
    fn from(line: ParallelWireLine) -> Self {
        LineSpec::ParallelWire(line)
    }
}

impl From<LossModelLine> for LineSpec {
    fn from(line: LossModelLine) -> Self {
        LineSpec::LossModel(line)
    }
}

/// Computes the per-unit-length parameters of `spec` at `frequency` [Hz].
pub fn compute(spec: &LineSpec, frequency: f64) -> Result<LineElectricalParams, Error> {
    let model = spec.model();
    model.validate()?;
    let frequency = check_frequency(frequency)?;
    Ok(model.electrical_params(frequency))
}

pub(crate) fn require_positive(name: &str, value: f64) -> Result<(), Error> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidGeometry {
            reason: format!("{} must be positive, got {}", name, value),
        })
    }
}
