use std::ops::Mul;

use num_complex::Complex64;

use crate::propagation::PropagationResult;

/// Transmission (ABCD) matrix of a two-port:
/// `[V1, I1] = [[A, B], [C, D]] · [V2, I2]`, with I2 flowing out of port 2.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Abcd {
    pub a: Complex64,
    pub b: Complex64,
    pub c: Complex64,
    pub d: Complex64,
}

impl Abcd {
    #[inline]
    pub fn identity() -> Self {
        Self {
            a: Complex64::new(1.0, 0.0),
            b: Complex64::new(0.0, 0.0),
            c: Complex64::new(0.0, 0.0),
            d: Complex64::new(1.0, 0.0),
        }
    }

    /// A uniform line of `length` metres.
    pub fn line(solution: &PropagationResult, length: f64) -> Self {
        if length == 0.0 {
            return Self::identity();
        }
        let gl = solution.gamma * length;
        let (cosh, sinh) = (gl.cosh(), gl.sinh());

        Self {
            a: cosh,
            b: solution.z0 * sinh,
            c: sinh / solution.z0,
            d: cosh,
        }
    }

    /// Port 1 voltage and current for a given port 2 voltage and current.
    #[inline]
    pub fn drive(&self, v2: Complex64, i2: Complex64) -> (Complex64, Complex64) {
        (self.a * v2 + self.b * i2, self.c * v2 + self.d * i2)
    }

    /// Impedance seen at port 1 with `load` on port 2.
    #[inline]
    pub fn input_impedance(&self, load: Complex64) -> Complex64 {
        (self.a * load + self.b) / (self.c * load + self.d)
    }

    #[inline]
    pub fn determinant(&self) -> Complex64 {
        self.a * self.d - self.b * self.c
    }
}

impl Mul for Abcd {
    type Output = Abcd;

    fn mul(self, rhs: Abcd) -> Abcd {
        Abcd {
            a: self.a * rhs.a + self.b * rhs.c,
            b: self.a * rhs.b + self.b * rhs.d,
            c: self.c * rhs.a + self.d * rhs.c,
            d: self.c * rhs.b + self.d * rhs.d,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn lossy() -> PropagationResult {
        PropagationResult {
            gamma: Complex64::new(2e-3, 0.3),
            z0: Complex64::new(50.2, -0.4),
        }
    }

    #[test]
    fn uniform_line_is_reciprocal() {
        let det = Abcd::line(&lossy(), 17.0).determinant();
        assert_relative_eq!(det.re, 1.0, epsilon = 1e-9);
        assert_relative_eq!(det.im, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn zero_length_is_identity() {
        assert_eq!(Abcd::line(&lossy(), 0.0), Abcd::identity());
    }

    #[test]
    fn product_of_halves_is_whole() {
        let whole = Abcd::line(&lossy(), 9.0);
        let halves = Abcd::line(&lossy(), 4.5) * Abcd::line(&lossy(), 4.5);
        for (x, y) in [(whole.a, halves.a), (whole.b, halves.b), (whole.c, halves.c), (whole.d, halves.d)] {
            assert_relative_eq!(x.re, y.re, epsilon = 1e-9);
            assert_relative_eq!(x.im, y.im, epsilon = 1e-9);
        }
    }
}
