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

//! # Expectation Bounding
//!
//! Bounds `E[f(X)]` for a distribution exposed through a
//! [`QuantileProvider`] by substituting `x = Q(p)` and integrating over the
//! probability axis: `E[f(X)] = ∫₀¹ f(Q(p)) dp`. Because `Q` is monotone,
//! a sound bound on `f` over `[Q(p₀), Q(p₁)]` is a sound bound on the
//! integrand over the probability panel `[p₀, p₁]`, so the adaptive
//! subdivision integrator applies directly and puts its panels where the
//! distribution carries mass.

use crate::distribution::QuantileProvider;
use girder_core::math::{
    integrate::{integrate_adaptive, IntegralBound, IntegrateError},
    interval::Interval,
};
use std::sync::atomic::AtomicBool;

/// Bounds the expectation of a function under `provider`'s distribution.
///
/// `bound(values)` must contain `f(x)` for every `x` in `values`. The result
/// is widened by the provider's admitted probability error scaled by the
/// largest bound magnitude seen, so quantile approximation error cannot
/// silently break soundness.
///
/// Unbounded providers fail with [`IntegrateError::NonFiniteBound`] on the
/// first tail panel; wrap them in
/// [`Truncated`](crate::distribution::Truncated) first.
pub fn expectation_bound<P, F>(
    provider: &P,
    tolerance: f64,
    cancel: Option<&AtomicBool>,
    mut bound: F,
) -> Result<IntegralBound, IntegrateError>
where
    P: QuantileProvider,
    F: FnMut(Interval) -> Interval,
{
    let mut max_magnitude: f64 = 0.0;
    let mut result = integrate_adaptive(
        Interval::new(0.0, 1.0),
        tolerance,
        cancel,
        |panel| {
            let a = provider.quantile(panel.lower());
            let b = provider.quantile(panel.upper());
            let values = Interval::new_unchecked(a.min(b), a.max(b));
            let value_bound = bound(values);
            if value_bound.is_finite() && !value_bound.is_nan() {
                max_magnitude = max_magnitude.max(value_bound.abs().upper());
            }
            value_bound
        },
    )?;

    let slack = provider.prob_between_error() * max_magnitude;
    if slack > 0.0 {
        result.value = result.value + Interval::new(-slack, slack);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beam::Beam;
    use crate::distribution::{Gaussian, Truncated};
    use approx::assert_abs_diff_eq;
    use std::sync::atomic::AtomicBool;

    fn clipped_standard_normal() -> Truncated<Gaussian> {
        // +/- 8 sigma carries all but ~1e-15 of the mass.
        Truncated::new(Gaussian::standard(), -8.0, 8.0)
    }

    #[test]
    fn test_second_moment_of_standard_normal() {
        let provider = clipped_standard_normal();
        let result =
            expectation_bound(&provider, 1e-3, None, |values| values.square()).unwrap();
        assert!(result.completed);
        assert_abs_diff_eq!(result.value.midpoint(), 1.0, epsilon = 0.01);
        assert!(result.value.lower() <= 1.0 + 1e-3);
        assert!(result.value.upper() >= 1.0 - 1e-3);
    }

    #[test]
    fn test_mean_of_shifted_gaussian() {
        let provider = Truncated::new(Gaussian::new(3.0, 2.0), -13.0, 19.0);
        let result = expectation_bound(&provider, 1e-3, None, |values| values).unwrap();
        assert!(result.completed);
        assert_abs_diff_eq!(result.value.midpoint(), 3.0, epsilon = 0.01);
    }

    #[test]
    fn test_expectation_of_beam_enclosure() {
        // Bound E[exp(X)] for a clipped standard normal; the truth is
        // e^(1/2), off only by the clipped tails.
        let provider = clipped_standard_normal();
        let result = expectation_bound(&provider, 1e-3, None, |values| {
            Beam::exp(values).output_interval(&[values])
        })
        .unwrap();
        assert!(result.completed);
        assert_abs_diff_eq!(result.value.midpoint(), 0.5f64.exp(), epsilon = 0.02);
    }

    #[test]
    fn test_unbounded_provider_is_a_typed_error() {
        let result = expectation_bound(&Gaussian::standard(), 1e-3, None, |values| values);
        assert!(matches!(result, Err(IntegrateError::NonFiniteBound { .. })));
    }

    #[test]
    fn test_cancellation_propagates() {
        let cancel = AtomicBool::new(true);
        let provider = clipped_standard_normal();
        let result =
            expectation_bound(&provider, 1e-9, Some(&cancel), |values| values.square())
                .unwrap();
        assert!(!result.completed);
    }

    #[test]
    fn test_probability_error_widens_the_result() {
        // Uniform on [0, 1] with a configurable admitted probability error.
        struct Uniform {
            admitted_error: f64,
        }
        impl QuantileProvider for Uniform {
            fn quantile(&self, p: f64) -> f64 {
                p
            }
            fn prob_less_than(&self, x: f64) -> f64 {
                x.clamp(0.0, 1.0)
            }
            fn prob_between_error(&self) -> f64 {
                self.admitted_error
            }
        }

        let exact =
            expectation_bound(&Uniform { admitted_error: 0.0 }, 1e-4, None, |v| v).unwrap();
        let sloppy = expectation_bound(
            &Uniform {
                admitted_error: 0.25,
            },
            1e-4,
            None,
            |v| v,
        )
        .unwrap();

        // The largest bound magnitude is 1, so the sloppy result widens by
        // 2 * 0.25 on top of the exact bracket.
        assert!(exact.value.contains(0.5));
        assert!(sloppy.value.contains(0.5));
        assert!(sloppy.value.width() >= exact.value.width() + 0.4);
    }
}
