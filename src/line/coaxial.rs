use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::consts::{angular, free_space_impedance, COPPER_CONDUCTIVITY, EPSILON_0, MU_0};
use crate::line::conductor::Conductor;
use crate::line::{require_positive, Dielectric, LineElectricalParams, LineModel};
use crate::Error;

/// A coaxial line: a round inner conductor inside a tubular shield.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoaxialLine {
    /// Radius of the inner conductor [m].
    pub inner_radius: f64,
    /// Inner radius of the shield [m].
    pub outer_radius: f64,
    /// Wall thickness of the shield [m].
    pub shield_thickness: f64,
    /// Conductivity of both conductors [S / m].
    pub conductivity: f64,
    pub dielectric: Dielectric,
    /// Declared design impedance [Ω].
    #[serde(default)]
    pub nominal_impedance: Option<f64>,
}

impl CoaxialLine {
    /// Sizes the shield so the lossless impedance of the line is `impedance`.
    pub fn with_impedance(impedance: f64, inner_radius: f64, dielectric: Dielectric) -> Self {
        let ratio = (2.0 * PI * impedance * dielectric.permittivity.sqrt()
            / free_space_impedance())
        .exp();

        Self {
            inner_radius,
            outer_radius: inner_radius * ratio,
            dielectric,
            nominal_impedance: Some(impedance),
            ..Self::default()
        }
    }

    #[inline]
    fn log_ratio(&self) -> f64 {
        (self.outer_radius / self.inner_radius).ln()
    }
}

impl Default for CoaxialLine {
    fn default() -> Self {
        Self {
            inner_radius: 1.0e-3,
            outer_radius: 2.3e-3,
            shield_thickness: 0.2e-3,
            conductivity: COPPER_CONDUCTIVITY,
            dielectric: Dielectric::AIR,
            nominal_impedance: None,
        }
    }
}

impl LineModel for CoaxialLine {
    fn validate(&self) -> Result<(), Error> {
        require_positive("inner radius", self.inner_radius)?;
        require_positive("outer radius", self.outer_radius)?;
        require_positive("shield thickness", self.shield_thickness)?;
        require_positive("conductivity", self.conductivity)?;
        if self.inner_radius >= self.outer_radius {
            return Err(Error::InvalidGeometry {
                reason: format!(
                    "inner radius ({} m) must be smaller than outer radius ({} m)",
                    self.inner_radius, self.outer_radius,
                ),
            });
        }
        if let Some(impedance) = self.nominal_impedance {
            require_positive("nominal impedance", impedance)?;
        }
        self.dielectric.validate()
    }

    fn electrical_params(&self, frequency: f64) -> LineElectricalParams {
        let log_ratio = self.log_ratio();
        let inner = Conductor::round_wire(self.inner_radius, self.conductivity, 1.0);
        let shield = Conductor::tube(self.outer_radius, self.shield_thickness, self.conductivity);

        let capacitance = 2.0 * PI * EPSILON_0 * self.dielectric.permittivity / log_ratio;

        LineElectricalParams {
            resistance: inner.resistance(frequency) + shield.resistance(frequency),
            inductance: MU_0 / (2.0 * PI) * log_ratio
                + inner.internal_inductance(frequency)
                + shield.internal_inductance(frequency),
            conductance: angular(frequency) * capacitance * self.dielectric.loss_tangent,
            capacitance,
        }
    }

    fn nominal_impedance(&self) -> Option<f64> {
        self.nominal_impedance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sized_shield_gives_requested_impedance() {
        let line = CoaxialLine::with_impedance(75.0, 0.5e-3, Dielectric::POLYETHYLENE);
        let lossless = free_space_impedance() / (2.0 * PI * 1.5) * line.log_ratio();
        assert_relative_eq!(lossless, 75.0, max_relative = 1e-12);
    }

    #[test]
    fn high_frequency_inductance_and_capacitance_match_lossless_z0() {
        let line = CoaxialLine::with_impedance(50.0, 1e-3, Dielectric::AIR);
        let params = line.electrical_params(10e9);
        let z0 = (params.inductance / params.capacitance).sqrt();
        assert_relative_eq!(z0, 50.0, max_relative = 1e-3);
    }

    #[test]
    fn inverted_radii_are_rejected() {
        let line = CoaxialLine {
            inner_radius: 3e-3,
            outer_radius: 1e-3,
            ..CoaxialLine::default()
        };
        assert!(matches!(line.validate(), Err(Error::InvalidGeometry { .. })));
    }

    #[test]
    fn lossy_dielectric_conductance_follows_loss_tangent() {
        let line = CoaxialLine {
            dielectric: Dielectric::PTFE,
            ..CoaxialLine::default()
        };
        let params = line.electrical_params(100e6);
        assert_relative_eq!(
            params.conductance,
            angular(100e6) * params.capacitance * 2e-4,
            max_relative = 1e-12
        );
    }
}
