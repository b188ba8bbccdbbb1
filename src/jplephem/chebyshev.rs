//! Chebyshev polynomial functionality for ephemeris interpolation
//!
//! Type 2 SPK records store, for each axis, the coefficients of a Chebyshev
//! expansion of the first kind over the record's time window. Evaluation uses
//! the Clenshaw recurrence; velocities come from the derivative series.

use crate::jplephem::errors::{JplephemError, Result};

/// Chebyshev polynomial representation and evaluation
///
/// The coefficients are ordered from lowest to highest degree:
/// [c₀, c₁, c₂, ..., cₙ] where the polynomial is:
/// f(x) = c₀·T₀(x) + c₁·T₁(x) + c₂·T₂(x) + ... + cₙ·Tₙ(x)
#[derive(Debug, Clone, Copy)]
pub struct ChebyshevPolynomial<'a> {
    coefficients: &'a [f64],
}

impl<'a> ChebyshevPolynomial<'a> {
    /// Wrap a coefficient slice
    pub fn new(coefficients: &'a [f64]) -> Self {
        Self { coefficients }
    }

    /// Evaluate the expansion at `x` using the Clenshaw recurrence
    pub fn evaluate(&self, x: f64) -> f64 {
        let c = self.coefficients;
        match c.len() {
            0 => 0.0,
            1 => c[0],
            n => {
                let two_x = 2.0 * x;
                let mut b1 = 0.0; // b_{k+1}
                let mut b2 = 0.0; // b_{k+2}
                for &ck in c[1..n].iter().rev() {
                    let bk = two_x * b1 - b2 + ck;
                    b2 = b1;
                    b1 = bk;
                }
                x * b1 - b2 + c[0]
            }
        }
    }

    /// Evaluate d/dx of the expansion at `x`
    ///
    /// Runs the forward recurrence for T_k and T_k' together:
    /// T_k'(x) = 2·T_{k-1}(x) + 2x·T_{k-1}'(x) − T_{k-2}'(x)
    pub fn derivative(&self, x: f64) -> f64 {
        let c = self.coefficients;
        if c.len() <= 1 {
            return 0.0;
        }

        let two_x = 2.0 * x;
        let (mut t_prev2, mut dt_prev2) = (1.0, 0.0); // T_0, T_0'
        let (mut t_prev1, mut dt_prev1) = (x, 1.0); // T_1, T_1'
        let mut result = c[1];

        for &ck in &c[2..] {
            let t_k = two_x * t_prev1 - t_prev2;
            let dt_k = 2.0 * t_prev1 + two_x * dt_prev1 - dt_prev2;
            result += ck * dt_k;

            t_prev2 = t_prev1;
            t_prev1 = t_k;
            dt_prev2 = dt_prev1;
            dt_prev1 = dt_k;
        }

        result
    }

    /// Get the degree of the polynomial
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Get a reference to the coefficients
    pub fn coefficients(&self) -> &[f64] {
        self.coefficients
    }
}

/// Map `time` into the Chebyshev domain of a record window
///
/// `s = 2 (time - init) / intlen - 1`, which places `init` at -1 and
/// `init + intlen` at +1.
pub fn normalize_time(time: f64, init: f64, intlen: f64) -> Result<f64> {
    if intlen <= 0.0 {
        return Err(JplephemError::InvalidFormat(format!(
            "Invalid record interval length {}: must be positive",
            intlen
        )));
    }

    Ok(2.0 * (time - init) / intlen - 1.0)
}

/// Rescale a derivative from normalized time to seconds
///
/// `ds/dt = 2 / intlen`.
pub fn rescale_derivative(deriv_normalized: f64, intlen: f64) -> f64 {
    deriv_normalized * 2.0 / intlen
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPS: f64 = 1e-14;

    #[test]
    fn test_chebyshev_constant() {
        let coeffs = [5.0];
        let poly = ChebyshevPolynomial::new(&coeffs);

        assert_eq!(poly.evaluate(-1.0), 5.0);
        assert_eq!(poly.evaluate(0.0), 5.0);
        assert_eq!(poly.evaluate(1.0), 5.0);
        assert_eq!(poly.derivative(0.0), 0.0);
    }

    #[test]
    fn test_chebyshev_linear() {
        // 3·T0 + 2·T1 = 3 + 2x
        let coeffs = [3.0, 2.0];
        let poly = ChebyshevPolynomial::new(&coeffs);

        assert_eq!(poly.evaluate(-1.0), 1.0);
        assert_eq!(poly.evaluate(0.0), 3.0);
        assert_eq!(poly.evaluate(1.0), 5.0);

        assert_eq!(poly.derivative(-1.0), 2.0);
        assert_eq!(poly.derivative(0.5), 2.0);
    }

    #[test]
    fn test_chebyshev_quadratic() {
        // 3 + 2x + (2x² - 1) = 2 + 2x + 2x²
        let coeffs = [3.0, 2.0, 1.0];
        let poly = ChebyshevPolynomial::new(&coeffs);

        assert_relative_eq!(poly.evaluate(-1.0), 2.0, epsilon = EPS);
        assert_relative_eq!(poly.evaluate(0.0), 2.0, epsilon = EPS);
        assert_relative_eq!(poly.evaluate(1.0), 6.0, epsilon = EPS);

        // f'(x) = 2 + 4x
        assert_relative_eq!(poly.derivative(-1.0), -2.0, epsilon = EPS);
        assert_relative_eq!(poly.derivative(0.0), 2.0, epsilon = EPS);
        assert_relative_eq!(poly.derivative(1.0), 6.0, epsilon = EPS);
    }

    #[test]
    fn test_chebyshev_cubic_matches_direct_form() {
        // T3(x) = 4x³ - 3x, T3'(x) = 12x² - 3
        let coeffs = [1.0, 0.0, 0.0, 1.0];
        let poly = ChebyshevPolynomial::new(&coeffs);
        let x = 0.6;

        assert_relative_eq!(poly.evaluate(x), 1.0 + 4.0 * x * x * x - 3.0 * x, epsilon = EPS);
        assert_relative_eq!(poly.derivative(x), 12.0 * x * x - 3.0, epsilon = EPS);
        assert_eq!(poly.degree(), 3);
    }

    #[test]
    fn test_empty_coefficients() {
        let poly = ChebyshevPolynomial::new(&[]);
        assert_eq!(poly.evaluate(0.3), 0.0);
        assert_eq!(poly.derivative(0.3), 0.0);
        assert_eq!(poly.degree(), 0);
    }

    #[test]
    fn test_time_normalization() {
        // Window [100, 120)
        assert_eq!(normalize_time(100.0, 100.0, 20.0).unwrap(), -1.0);
        assert_eq!(normalize_time(110.0, 100.0, 20.0).unwrap(), 0.0);
        assert_eq!(normalize_time(120.0, 100.0, 20.0).unwrap(), 1.0);
        assert_eq!(normalize_time(105.0, 100.0, 20.0).unwrap(), -0.5);

        assert!(normalize_time(100.0, 100.0, 0.0).is_err());
        assert!(normalize_time(100.0, 100.0, -10.0).is_err());
    }

    #[test]
    fn test_derivative_rescaling() {
        // ds/dt = 2 / 20
        assert_relative_eq!(rescale_derivative(5.0, 20.0), 0.5, epsilon = EPS);
    }
}
