//! Physical constants and common material values, all in SI units.

use std::f64::consts::PI;

/// Speed of light in vacuum [m / s].
pub const SPEED_OF_LIGHT: f64 = physical_constants::SPEED_OF_LIGHT_IN_VACUUM;

/// Vacuum magnetic permeability, μ0 [H / m].
pub const MU_0: f64 = physical_constants::VACUUM_MAG_PERMEABILITY;

/// Vacuum electric permittivity, ε0 [F / m].
pub const EPSILON_0: f64 = physical_constants::VACUUM_ELECTRIC_PERMITTIVITY;

/// Conductivity of annealed copper [S / m].
pub const COPPER_CONDUCTIVITY: f64 = 5.8e7;

/// Conductivity of aluminium [S / m].
pub const ALUMINIUM_CONDUCTIVITY: f64 = 3.5e7;

/// Free-space wave impedance, η0 = μ0 c [Ω].
#[inline]
pub fn free_space_impedance() -> f64 {
    MU_0 * SPEED_OF_LIGHT
}

/// Angular frequency for a frequency in Hz.
#[inline]
pub fn angular(frequency: f64) -> f64 {
    2.0 * PI * frequency
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn vacuum_constants_are_consistent() {
        assert_relative_eq!((MU_0 * EPSILON_0).sqrt().recip(), SPEED_OF_LIGHT, max_relative = 1e-9);
        assert_relative_eq!(
            free_space_impedance(),
            physical_constants::CHARACTERISTIC_IMPEDANCE_OF_VACUUM,
            max_relative = 1e-9
        );
    }

    #[test]
    fn wave_impedance_is_close_to_120_pi() {
        assert_relative_eq!(free_space_impedance(), 120.0 * PI, max_relative = 1e-3);
    }
}
