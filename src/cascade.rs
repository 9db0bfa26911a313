//! Chains uniform line segments and a load into the impedance seen at the
//! source.

mod abcd;
mod termination;

pub use abcd::Abcd;
pub use termination::{Load, Termination};

use std::f64::consts::LN_10;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::line::LineSpec;
use crate::propagation::{self, PropagationResult};
use crate::{line, Error};

/// A uniform length of line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub line: LineSpec,
    /// Physical length [m].
    pub length: f64,
}

impl Segment {
    #[inline]
    pub fn new(line: impl Into<LineSpec>, length: f64) -> Self {
        Self { line: line.into(), length }
    }

    /// Checks the line construction and the length.
    pub fn validate(&self) -> Result<(), Error> {
        self.line.validate()?;
        if !(self.length.is_finite() && self.length >= 0.0) {
            return Err(Error::InvalidGeometry {
                reason: format!("segment length must not be negative, got {} m", self.length),
            });
        }
        Ok(())
    }

    /// Propagation constant and characteristic impedance at `frequency`.
    pub fn propagation(&self, frequency: f64) -> Result<PropagationResult, Error> {
        self.validate()?;
        propagation::solve(&line::compute(&self.line, frequency)?, frequency)
    }

    /// Impedance seen looking into this segment when it ends in `load`.
    pub fn input_impedance(&self, load: Complex64, frequency: f64) -> Result<Complex64, Error> {
        Ok(transform(&self.propagation(frequency)?, self.length, load))
    }

    /// Two-port matrix of this segment at `frequency`.
    pub fn abcd(&self, frequency: f64) -> Result<Abcd, Error> {
        Ok(Abcd::line(&self.propagation(frequency)?, self.length))
    }
}

/// `e^{-2γℓ}`, the round trip factor of a line. Its magnitude never exceeds
/// one on a passive line, so it underflows to zero instead of overflowing.
#[inline]
fn round_trip(solution: &PropagationResult, length: f64) -> Complex64 {
    (-2.0 * solution.gamma * length).exp()
}

/// Moves `load` to the input of a line of `length` metres:
/// `Z0 (Z_L + Z0 tanh γℓ) / (Z0 + Z_L tanh γℓ)`.
///
/// tanh γℓ is expanded as `(1 - e^{-2γℓ}) / (1 + e^{-2γℓ})`, which stays
/// finite however long the line. A zero length returns `load` unchanged.
pub fn transform(solution: &PropagationResult, length: f64, load: Complex64) -> Complex64 {
    if length == 0.0 {
        return load;
    }
    let z0 = solution.z0;
    let e = round_trip(solution, length);
    z0 * (load * (1.0 + e) + z0 * (1.0 - e)) / (z0 * (1.0 + e) + load * (1.0 - e))
}

/// Input impedance of one segment ending in `load`, and the ratio of power
/// entering it to power leaving it [dB].
fn segment_loss(solution: &PropagationResult, length: f64, load: Complex64) -> (Complex64, f64) {
    if length == 0.0 {
        return (load, 0.0);
    }
    let z0 = solution.z0;
    let e = round_trip(solution, length);
    let z_in = transform(solution, length, load);

    // input current per unit load current, without its e^{γℓ} growth
    let current = ((load + z0) - (load - z0) * e) / (2.0 * z0);
    let nepers = solution.attenuation() * length;
    let loss = 20.0 / LN_10 * nepers
        + 20.0 * current.norm().log10()
        + 10.0 * (z_in.re / load.re).log10();

    (z_in, loss)
}

/// Reflection coefficient of `z` against the reference `z_ref`.
#[inline]
pub fn reflection_coefficient(z: Complex64, z_ref: Complex64) -> Complex64 {
    (z - z_ref) / (z + z_ref)
}

/// Standing-wave ratio for a reflection coefficient. Total reflection gives
/// `f64::INFINITY`.
#[inline]
pub fn vswr(reflection: Complex64) -> f64 {
    let magnitude = reflection.norm();
    if magnitude >= 1.0 {
        f64::INFINITY
    } else {
        (1.0 + magnitude) / (1.0 - magnitude)
    }
}

/// Impedance seen at the source end of `segments` (ordered source to load)
/// terminated in `load`.
pub fn input_impedance(
    segments: &[Segment],
    load: Complex64,
    frequency: f64,
) -> Result<Complex64, Error> {
    Ok(SolvedCascade::solve(segments, frequency)?.input_impedance(load))
}

/// A cascade with every segment solved at one frequency.
#[derive(Clone, Debug)]
pub struct SolvedCascade<'a> {
    segments: &'a [Segment],
    solutions: Vec<PropagationResult>,
}

impl<'a> SolvedCascade<'a> {
    pub fn solve(segments: &'a [Segment], frequency: f64) -> Result<Self, Error> {
        let solutions = segments
            .iter()
            .map(|segment| segment.propagation(frequency))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments, solutions })
    }

    /// Per-segment solutions, in source-to-load order.
    #[inline]
    pub fn solutions(&self) -> &[PropagationResult] {
        &self.solutions
    }

    /// Transforms `load` back to the source, last segment first.
    pub fn input_impedance(&self, load: Complex64) -> Complex64 {
        self.segments
            .iter()
            .zip(self.solutions.iter())
            .rev()
            .fold(load, |z, (segment, solution)| transform(solution, segment.length, z))
    }

    /// Product of the segment matrices, source first.
    ///
    /// Entries grow as e^{αℓ} and overflow once the cascade exceeds about
    /// 700 Np; impedances and losses are computed without the matrix.
    pub fn abcd(&self) -> Abcd {
        self.segments
            .iter()
            .zip(self.solutions.iter())
            .fold(Abcd::identity(), |total, (segment, solution)| {
                total * Abcd::line(solution, segment.length)
            })
    }

    /// Loss of the cascade if every segment were terminated in its own Z0,
    /// 2·Σαℓ expressed in dB.
    pub fn matched_loss_db(&self) -> f64 {
        let nepers: f64 = self
            .segments
            .iter()
            .zip(self.solutions.iter())
            .map(|(segment, solution)| solution.attenuation() * segment.length)
            .sum();
        20.0 / LN_10 * nepers
    }

    /// Ratio of power entering the cascade to power delivered to `load`, in
    /// dB. A load that cannot absorb power gives `f64::INFINITY`.
    pub fn total_loss_db(&self, load: Complex64) -> f64 {
        if load.re <= 0.0 {
            return f64::INFINITY;
        }
        let (_, loss) = self
            .segments
            .iter()
            .zip(self.solutions.iter())
            .rev()
            .fold((load, 0.0), |(z, total), (segment, solution)| {
                let (z_in, loss) = segment_loss(solution, segment.length, z);
                (z_in, total + loss)
            });
        loss.max(0.0)
    }
}
