use std::f64::consts::PI;

use crate::consts::{angular, MU_0};

/// Skin depth δ = 1 / √(π f μ0 σ) [m] of a non-magnetic conductor.
#[inline]
pub fn skin_depth(frequency: f64, conductivity: f64) -> f64 {
    (PI * frequency * MU_0 * conductivity).sqrt().recip()
}

/// Surface resistance at 1 Hz, √(π μ0 / σ). Scales with √f.
#[inline]
fn surface_resistance_coefficient(conductivity: f64) -> f64 {
    (PI * MU_0 / conductivity).sqrt()
}

/// One conductor's share of a line's series impedance.
///
/// Resistance blends the DC value with the skin-effect value in quadrature,
/// `R = √(R_dc² + R_hf²)`, so it starts at `R_dc` and approaches `R_hf ∝ √f`
/// without a kink. Internal inductance blends the same way in reciprocal
/// form: the DC internal inductance at low frequency and `R_hf / ω` (equal
/// surface resistance and reactance) at high frequency.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Conductor {
    dc_resistance: f64,
    skin_coefficient: f64,
    dc_internal_inductance: f64,
}

impl Conductor {
    /// A solid round wire. `proximity` scales the skin-effect resistance for
    /// current crowding towards a nearby return conductor.
    pub fn round_wire(radius: f64, conductivity: f64, proximity: f64) -> Self {
        Self {
            dc_resistance: (conductivity * PI * radius.powi(2)).recip(),
            skin_coefficient: surface_resistance_coefficient(conductivity) * proximity
                / (2.0 * PI * radius),
            dc_internal_inductance: MU_0 / (8.0 * PI),
        }
    }

    /// A tubular conductor with current returning on its inner surface, as
    /// a coaxial shield.
    pub fn tube(inner_radius: f64, thickness: f64, conductivity: f64) -> Self {
        let b2 = inner_radius.powi(2);
        let c = inner_radius + thickness;
        let c2 = c.powi(2);
        let area = c2 - b2;

        Self {
            dc_resistance: (conductivity * PI * area).recip(),
            skin_coefficient: surface_resistance_coefficient(conductivity)
                / (2.0 * PI * inner_radius),
            dc_internal_inductance: MU_0 / (2.0 * PI)
                * (c2.powi(2) / area.powi(2) * (c / inner_radius).ln()
                    - (3.0 * c2 - b2) / (4.0 * area)),
        }
    }

    #[inline]
    fn skin_resistance(&self, frequency: f64) -> f64 {
        self.skin_coefficient * frequency.sqrt()
    }

    /// Series resistance [Ω / m].
    #[inline]
    pub fn resistance(&self, frequency: f64) -> f64 {
        self.dc_resistance.hypot(self.skin_resistance(frequency))
    }

    /// Internal inductance [H / m].
    #[inline]
    pub fn internal_inductance(&self, frequency: f64) -> f64 {
        let high = self.skin_resistance(frequency) / angular(frequency);
        self.dc_internal_inductance.recip().hypot(high.recip()).recip()
    }
}
