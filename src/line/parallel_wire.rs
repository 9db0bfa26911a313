use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::consts::{angular, EPSILON_0, MU_0};
use crate::line::conductor::Conductor;
use crate::line::{require_positive, Dielectric, LineElectricalParams, LineModel};
use crate::Error;

/// Two identical round conductors running side by side (open-wire, ladder
/// line, twin-lead).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParallelWireLine {
    /// Diameter of each conductor [m].
    pub diameter: f64,
    /// Centre-to-centre spacing [m].
    pub spacing: f64,
    /// Conductivity of the conductors [S / m].
    pub conductivity: f64,
    pub dielectric: Dielectric,
    /// Declared design impedance [Ω].
    #[serde(default)]
    pub nominal_impedance: Option<f64>,
}

impl ParallelWireLine {
    #[inline]
    fn spacing_ratio(&self) -> f64 {
        self.spacing / self.diameter
    }

    #[inline]
    fn wire(&self) -> Conductor {
        let ratio = self.spacing_ratio();
        let proximity = ratio / (ratio.powi(2) - 1.0).sqrt();
        Conductor::round_wire(self.diameter / 2.0, self.conductivity, proximity)
    }
}

impl LineModel for ParallelWireLine {
    fn validate(&self) -> Result<(), Error> {
        require_positive("conductor diameter", self.diameter)?;
        require_positive("conductor spacing", self.spacing)?;
        require_positive("conductivity", self.conductivity)?;
        if self.spacing <= self.diameter {
            return Err(Error::InvalidGeometry {
                reason: format!(
                    "spacing ({} m) must exceed conductor diameter ({} m)",
                    self.spacing, self.diameter,
                ),
            });
        }
        if let Some(impedance) = self.nominal_impedance {
            require_positive("nominal impedance", impedance)?;
        }
        self.dielectric.validate()
    }

    fn electrical_params(&self, frequency: f64) -> LineElectricalParams {
        let geometry = self.spacing_ratio().acosh();
        let wire = self.wire();

        let capacitance = PI * EPSILON_0 * self.dielectric.permittivity / geometry;

        // both conductors carry the loop current
        LineElectricalParams {
            resistance: 2.0 * wire.resistance(frequency),
            inductance: MU_0 / PI * geometry + 2.0 * wire.internal_inductance(frequency),
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
    use crate::consts::COPPER_CONDUCTIVITY;
    use approx::assert_relative_eq;

    fn ladder_line() -> ParallelWireLine {
        ParallelWireLine {
            diameter: 1.3e-3,
            spacing: 25e-3,
            conductivity: COPPER_CONDUCTIVITY,
            dielectric: Dielectric::AIR,
            nominal_impedance: Some(450.0),
        }
    }

    #[test]
    fn touching_wires_are_rejected() {
        let line = ParallelWireLine { spacing: 1.3e-3, ..ladder_line() };
        assert!(matches!(line.validate(), Err(Error::InvalidGeometry { .. })));
    }

    #[test]
    fn wide_spacing_has_negligible_proximity_effect() {
        let line = ParallelWireLine { spacing: 1.0, ..ladder_line() };
        let isolated = Conductor::round_wire(0.65e-3, COPPER_CONDUCTIVITY, 1.0);
        assert_relative_eq!(
            line.electrical_params(1e8).resistance,
            2.0 * isolated.resistance(1e8),
            max_relative = 1e-5
        );
    }

    #[test]
    fn close_spacing_raises_resistance() {
        let close = ParallelWireLine { spacing: 2e-3, ..ladder_line() };
        let far = ladder_line();
        assert!(close.electrical_params(1e7).resistance > far.electrical_params(1e7).resistance);
    }
}
