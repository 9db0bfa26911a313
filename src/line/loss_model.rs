use std::f64::consts::LN_10;

use serde::{Deserialize, Serialize};

use crate::consts::SPEED_OF_LIGHT;
use crate::line::{require_positive, LineElectricalParams, LineModel};
use crate::Error;

/// A line described by its nominal impedance, velocity factor and a
/// two-term matched-loss model.
///
/// Matched loss in dB per metre is `k1·√f + k2·f` (f in Hz): `k1` carries the
/// conductor (skin-effect) loss and `k2` the dielectric loss. L and C follow
/// from the nominal impedance and velocity factor, so catalogue cables can be
/// modeled from a datasheet without knowing their construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LossModelLine {
    /// Nominal characteristic impedance, Rn [Ω].
    pub nominal_impedance: f64,
    /// Velocity factor, Vf.
    pub velocity_factor: f64,
    /// Conductor loss coefficient [dB / (m·√Hz)].
    pub k1: f64,
    /// Dielectric loss coefficient [dB / (m·Hz)].
    pub k2: f64,
}

impl Default for LossModelLine {
    /// RG-303 (Belden 84303) 50 Ω coax.
    fn default() -> Self {
        Self {
            nominal_impedance: 50.0,
            velocity_factor: 0.700,
            k1: 1.226e-5,
            k2: 5.226e-11,
        }
    }
}

impl LineModel for LossModelLine {
    fn validate(&self) -> Result<(), Error> {
        require_positive("nominal impedance", self.nominal_impedance)?;
        require_positive("velocity factor", self.velocity_factor)?;
        if self.velocity_factor > 1.0 {
            return Err(Error::InvalidGeometry {
                reason: format!("velocity factor cannot exceed 1, got {}", self.velocity_factor),
            });
        }
        for (name, value) in [("k1", self.k1), ("k2", self.k2)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::InvalidGeometry {
                    reason: format!("loss coefficient {} must not be negative, got {}", name, value),
                });
            }
        }
        Ok(())
    }

    fn electrical_params(&self, frequency: f64) -> LineElectricalParams {
        let rn = self.nominal_impedance;
        let speed = SPEED_OF_LIGHT * self.velocity_factor;
        // dB to nepers
        let np_per_db = LN_10 / 20.0;

        LineElectricalParams {
            resistance: 2.0 * rn * np_per_db * self.k1 * frequency.sqrt(),
            inductance: rn / speed,
            conductance: 2.0 / rn * np_per_db * self.k2 * frequency,
            capacitance: (speed * rn).recip(),
        }
    }

    fn nominal_impedance(&self) -> Option<f64> {
        Some(self.nominal_impedance)
    }
}
