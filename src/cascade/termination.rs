use std::fmt;

use num_complex::Complex64;

use crate::Error;

/// The impedance at the far end of a cascade.
pub enum Load {
    /// The same impedance at every frequency.
    Fixed(Complex64),
    /// An impedance that depends on frequency [Hz], such as an antenna
    /// feedpoint model.
    Varying(Box<dyn Fn(f64) -> Complex64 + Send + Sync>),
}

impl Load {
    /// Wraps a function of frequency.
    pub fn varying<F>(impedance_fn: F) -> Self
    where
        F: Fn(f64) -> Complex64 + Send + Sync + 'static,
    {
        Load::Varying(Box::new(impedance_fn))
    }

    /// The load impedance at `frequency`.
    #[inline]
    pub fn impedance(&self, frequency: f64) -> Complex64 {
        match self {
            Load::Fixed(z) => *z,
            Load::Varying(impedance_fn) => impedance_fn(frequency),
        }
    }
}

impl From<Complex64> for Load {
    fn from(z: Complex64) -> Self {
        Load::Fixed(z)
    }
}

impl fmt::Debug for Load {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Load::Fixed(z) => f.debug_tuple("Fixed").field(z).finish(),
            Load::Varying(_) => f.write_str("Varying(..)"),
        }
    }
}

/// A load and the reference impedance reflections are measured against.
#[derive(Debug)]
pub struct Termination {
    pub load: Load,
    /// Usually the system impedance, not necessarily any line's Z0.
    pub reference_impedance: Complex64,
}

impl Termination {
    /// A load measured against a real reference impedance.
    pub fn new(load: impl Into<Load>, reference_impedance: f64) -> Self {
        Self {
            load: load.into(),
            reference_impedance: Complex64::new(reference_impedance, 0.0),
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        let z_ref = self.reference_impedance;
        if !(z_ref.re.is_finite() && z_ref.im.is_finite() && z_ref.re > 0.0) {
            return Err(Error::InvalidTermination {
                reason: format!("reference impedance needs a positive real part, got {}", z_ref),
            });
        }
        Ok(())
    }
}
