//! Frequency sweep descriptions, resolved into explicit frequency lists.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::{check_frequency, Error};

/// Describes the frequencies [Hz] a sweep visits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrequencySweep {
    /// Exactly these frequencies, in this order.
    List { frequencies: Vec<f64> },
    /// `npoints` evenly spaced frequencies from `start` to `stop`.
    Linear { start: f64, stop: f64, npoints: usize },
    /// `npoints` logarithmically spaced frequencies from `start` to `stop`.
    Log { start: f64, stop: f64, npoints: usize },
    /// `count` frequencies `start`, `start + step`, ...
    Stepped { start: f64, step: f64, count: usize },
}

impl FrequencySweep {
    /// Produces the frequency list, checking every point.
    pub fn resolve(&self) -> Result<Array1<f64>, Error> {
        let frequencies = match *self {
            FrequencySweep::List { ref frequencies } => Array1::from(frequencies.clone()),
            FrequencySweep::Linear { start, stop, npoints } => {
                Array1::linspace(start, stop, npoints)
            }
            FrequencySweep::Log { start, stop, npoints } => {
                check_frequency(start)?;
                check_frequency(stop)?;
                Array1::geomspace(start, stop, npoints).ok_or(Error::InvalidFrequency(start))?
            }
            FrequencySweep::Stepped { start, step, count } => {
                Array1::from_shape_fn(count, |i| start + (i as f64) * step)
            }
        };

        for &frequency in frequencies.iter() {
            check_frequency(frequency)?;
        }
        Ok(frequencies)
    }
}

impl From<Vec<f64>> for FrequencySweep {
    fn from(frequencies: Vec<f64>) -> Self {
        FrequencySweep::List { frequencies }
    }
}
