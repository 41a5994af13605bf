// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Distributions
//!
//! Quantile access to continuous distributions for expectation bounding.
//!
//! Expectations are computed by integrating over the probability axis, so a
//! distribution only needs to answer two questions: where is the `p`-th
//! quantile, and how much mass lies below a point. [`QuantileProvider`]
//! captures exactly that; [`Gaussian`] and [`Truncated`] are the two
//! implementations shipped here.

/// Quantile-level access to a continuous distribution.
pub trait QuantileProvider {
    /// Returns the `p`-th quantile for `p` in `[0, 1]`. May return an
    /// infinite value at `p = 0` or `p = 1` for unbounded support.
    fn quantile(&self, p: f64) -> f64;

    /// Returns the probability mass strictly below `x`.
    fn prob_less_than(&self, x: f64) -> f64;

    /// An upper bound on the absolute error of the probability mass this
    /// provider attributes to any quantile range. Consumers widen their
    /// results by this much per unit of integrand magnitude.
    fn prob_between_error(&self) -> f64 {
        0.0
    }
}

/// The standard normal CDF, accurate to roughly `1e-7` absolute error.
pub fn standard_normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / std::f64::consts::SQRT_2)
}

/// Complementary error function via the Chebyshev-fitted rational
/// approximation; absolute error below `1.2e-7` everywhere.
fn erfc(z: f64) -> f64 {
    let t = 1.0 / (1.0 + 0.5 * z.abs());
    let answer = t
        * (-z * z - 1.26551223
            + t * (1.00002368
                + t * (0.37409196
                    + t * (0.09678418
                        + t * (-0.18628806
                            + t * (0.27886807
                                + t * (-1.13520398
                                    + t * (1.48851587
                                        + t * (-0.82215223 + t * 0.17087277)))))))))
        .exp();
    if z >= 0.0 {
        answer
    } else {
        2.0 - answer
    }
}

/// The standard normal quantile function via Acklam's rational
/// approximation; relative error below `1.2e-9`.
fn standard_normal_quantile(p: f64) -> f64 {
    assert!(
        (0.0..=1.0).contains(&p),
        "standard_normal_quantile: p = {} must lie in [0, 1]",
        p
    );
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }

    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];
    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];
    const P_LOW: f64 = 0.02425;

    if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p > 1.0 - P_LOW {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -(((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    }
}

/// A Gaussian distribution with the given mean and standard deviation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gaussian {
    mean: f64,
    stdev: f64,
}

impl Gaussian {
    /// Creates a Gaussian.
    ///
    /// # Panics
    ///
    /// Panics unless `stdev` is finite and positive and `mean` is finite.
    pub fn new(mean: f64, stdev: f64) -> Self {
        assert!(
            mean.is_finite(),
            "Gaussian::new: mean must be finite, got {}",
            mean
        );
        assert!(
            stdev.is_finite() && stdev > 0.0,
            "Gaussian::new: stdev must be finite and positive, got {}",
            stdev
        );
        Self { mean, stdev }
    }

    /// The standard normal distribution.
    pub fn standard() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Returns the mean.
    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Returns the standard deviation.
    #[inline]
    pub fn stdev(&self) -> f64 {
        self.stdev
    }
}

impl QuantileProvider for Gaussian {
    fn quantile(&self, p: f64) -> f64 {
        self.mean + self.stdev * standard_normal_quantile(p)
    }

    fn prob_less_than(&self, x: f64) -> f64 {
        standard_normal_cdf((x - self.mean) / self.stdev)
    }

    fn prob_between_error(&self) -> f64 {
        // Twice the CDF approximation error, one per quantile endpoint.
        3e-7
    }
}

/// A distribution restricted to `[lower, upper]` and renormalized.
///
/// Wrapping an unbounded distribution makes every quantile finite, which
/// expectation bounding over elementary enclosures requires.
#[derive(Clone, Copy, Debug)]
pub struct Truncated<P> {
    inner: P,
    lower: f64,
    upper: f64,
    mass_below: f64,
    mass: f64,
}

impl<P: QuantileProvider> Truncated<P> {
    /// Restricts `inner` to `[lower, upper]`.
    ///
    /// # Panics
    ///
    /// Panics if the bounds are not finite and ordered or the inner
    /// distribution puts no mass between them.
    pub fn new(inner: P, lower: f64, upper: f64) -> Self {
        assert!(
            lower.is_finite() && upper.is_finite() && lower < upper,
            "Truncated::new: bounds [{}, {}] must be finite and ordered",
            lower,
            upper
        );
        let mass_below = inner.prob_less_than(lower);
        let mass = inner.prob_less_than(upper) - mass_below;
        assert!(
            mass > 0.0,
            "Truncated::new: no probability mass in [{}, {}]",
            lower,
            upper
        );
        Self {
            inner,
            lower,
            upper,
            mass_below,
            mass,
        }
    }
}

impl<P: QuantileProvider> QuantileProvider for Truncated<P> {
    fn quantile(&self, p: f64) -> f64 {
        let mapped = self.inner.quantile(self.mass_below + p * self.mass);
        mapped.clamp(self.lower, self.upper)
    }

    fn prob_less_than(&self, x: f64) -> f64 {
        if x <= self.lower {
            return 0.0;
        }
        if x >= self.upper {
            return 1.0;
        }
        ((self.inner.prob_less_than(x) - self.mass_below) / self.mass).clamp(0.0, 1.0)
    }

    fn prob_between_error(&self) -> f64 {
        // Renormalization amplifies the inner error by the kept mass.
        self.inner.prob_between_error() / self.mass
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_standard_normal_cdf_reference_values() {
        assert_abs_diff_eq!(standard_normal_cdf(0.0), 0.5, epsilon = 1e-7);
        assert_abs_diff_eq!(standard_normal_cdf(1.0), 0.841344746, epsilon = 1e-6);
        assert_abs_diff_eq!(standard_normal_cdf(-1.96), 0.024997895, epsilon = 1e-6);
        assert!(standard_normal_cdf(-10.0) >= 0.0);
        assert!(standard_normal_cdf(10.0) <= 1.0);
    }

    #[test]
    fn test_quantile_inverts_cdf() {
        for &p in &[0.001, 0.01, 0.1, 0.25, 0.5, 0.75, 0.9, 0.99, 0.999] {
            let x = standard_normal_quantile(p);
            assert_abs_diff_eq!(standard_normal_cdf(x), p, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_quantile_boundary_values() {
        assert_eq!(standard_normal_quantile(0.0), f64::NEG_INFINITY);
        assert_eq!(standard_normal_quantile(1.0), f64::INFINITY);
        assert_abs_diff_eq!(standard_normal_quantile(0.5), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_gaussian_rescales_standard_normal() {
        let gaussian = Gaussian::new(3.0, 2.0);
        assert_abs_diff_eq!(gaussian.quantile(0.5), 3.0, epsilon = 1e-8);
        assert_abs_diff_eq!(gaussian.prob_less_than(3.0), 0.5, epsilon = 1e-7);
        assert_abs_diff_eq!(
            gaussian.prob_less_than(5.0),
            standard_normal_cdf(1.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_truncated_quantiles_stay_in_bounds() {
        let truncated = Truncated::new(Gaussian::standard(), -2.0, 2.0);
        for &p in &[0.0, 0.001, 0.25, 0.5, 0.75, 0.999, 1.0] {
            let x = truncated.quantile(p);
            assert!(
                (-2.0..=2.0).contains(&x),
                "quantile({}) = {} escaped the truncation bounds",
                p,
                x
            );
        }
        assert_eq!(truncated.prob_less_than(-3.0), 0.0);
        assert_eq!(truncated.prob_less_than(3.0), 1.0);
        assert_abs_diff_eq!(truncated.prob_less_than(0.0), 0.5, epsilon = 1e-7);
    }

    #[test]
    #[should_panic(expected = "no probability mass")]
    fn test_truncated_rejects_empty_tail() {
        Truncated::new(Gaussian::standard(), 50.0, 60.0);
    }
}
