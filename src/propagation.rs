//! Propagation constant and characteristic impedance from R, L, G, C.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::consts::angular;
use crate::line::LineElectricalParams;
use crate::{check_frequency, Error};

/// The wave solution of a uniform line at one frequency.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropagationResult {
    /// Propagation constant γ = α + jβ [1 / m].
    pub gamma: Complex64,
    /// Characteristic impedance [Ω].
    pub z0: Complex64,
}

impl PropagationResult {
    /// Attenuation constant α [Np / m].
    #[inline]
    pub fn attenuation(&self) -> f64 {
        self.gamma.re
    }

    /// Phase constant β [rad / m].
    #[inline]
    pub fn phase_constant(&self) -> f64 {
        self.gamma.im
    }
}

/// Square root on the passive branch: non-negative real part, and
/// non-negative imaginary part when the real part is zero.
#[inline]
pub fn passive_sqrt(z: Complex64) -> Complex64 {
    let root = z.sqrt();
    if root.re < 0.0 || (root.re == 0.0 && root.im < 0.0) {
        -root
    } else {
        root
    }
}

/// Solves for γ and Z0 of a line with `params` at `frequency` [Hz].
pub fn solve(params: &LineElectricalParams, frequency: f64) -> Result<PropagationResult, Error> {
    let frequency = check_frequency(frequency)?;
    if params.conductance == 0.0 && params.capacitance == 0.0 {
        return Err(Error::DegenerateLine { frequency });
    }

    let omega = angular(frequency);
    let series = params.series_impedance(omega);
    let shunt = params.shunt_admittance(omega);

    Ok(PropagationResult {
        gamma: passive_sqrt(series * shunt),
        z0: passive_sqrt(series / shunt),
    })
}
