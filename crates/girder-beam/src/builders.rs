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

//! # Beam Builders
//!
//! Constructors for one-input beams that enclose elementary functions over a
//! finite input interval.
//!
//! For convex or concave functions the secant through the endpoints gives the
//! tightest affine slope, and the offset interval closes the gap between the
//! secant line and the stationary point of `f(x) - slope * x`. For piecewise
//! and sampled functions the offset is the hull of the gap at a small set of
//! candidate points. Point inputs degenerate to the tangent line.

use crate::beam::Beam;
use crate::distribution::standard_normal_cdf;
use girder_core::math::interval::Interval;

/// Default sample count for [`Beam::nondecreasing`].
pub const DEFAULT_SAMPLE_COUNT: usize = 100;

fn assert_finite_input(name: &str, input: Interval) {
    assert!(
        input.is_finite(),
        "Beam::{}: input {} must be finite",
        name,
        input
    );
}

/// Builds an offset from analytically ordered bounds.
///
/// On inputs a few ulps wide the two closed-form bounds agree to rounding
/// error and can come out in either order; the hull of the computed pair is
/// the enclosure either way.
#[inline]
fn ordered_offset(a: f64, b: f64) -> Interval {
    assert!(
        !a.is_nan() && !b.is_nan(),
        "Beam builder produced a NaN offset bound"
    );
    Interval::new_unchecked(a.min(b), a.max(b))
}

impl Beam {
    /// Encloses `exp` over `input`.
    pub fn exp(input: Interval) -> Beam {
        assert_finite_input("exp", input);
        let (l, u) = (input.lower(), input.upper());
        if input.is_point() {
            // Tangent at the point: exp(m) + exp(m) * (x - m).
            let e = l.exp();
            return Beam::linear(e, Interval::point(e * (1.0 - l)));
        }
        let slope = (u.exp() - l.exp()) / (u - l);
        if slope <= 0.0 || !slope.is_finite() {
            // Both exponentials underflowed (or overflowed); fall back to the
            // exact monotone range with a flat slope.
            return Beam::linear(0.0, Interval::new(l.exp(), u.exp()));
        }
        // Convex: the line touches exp from below at x = ln(slope), from
        // above at both endpoints.
        let offset = ordered_offset(slope * (1.0 - slope.ln()), l.exp() - slope * l);
        Beam::linear(slope, offset)
    }

    /// Encloses `x * x` over `input`.
    pub fn square(input: Interval) -> Beam {
        assert_finite_input("square", input);
        let (l, u) = (input.lower(), input.upper());
        if input.is_point() {
            return Beam::linear(2.0 * l, Interval::point(-l * l));
        }
        // Secant slope L + U; the gap to the parabola spans from the vertex
        // of x^2 - (L + U) x to the shared endpoint value -L * U.
        let slope = l + u;
        let offset = ordered_offset(-slope * slope / 4.0, -l * u);
        Beam::linear(slope, offset)
    }

    /// Encloses `1 / x` over an `input` that does not contain zero.
    ///
    /// # Panics
    ///
    /// Panics if `input` contains zero.
    pub fn reciprocal(input: Interval) -> Beam {
        assert_finite_input("reciprocal", input);
        let (l, u) = (input.lower(), input.upper());
        assert!(
            l > 0.0 || u < 0.0,
            "Beam::reciprocal: input {} must not contain zero",
            input
        );
        if input.is_point() {
            return Beam::linear(-1.0 / (l * l), Interval::point(2.0 / l));
        }
        let slope = -1.0 / (l * u);
        // Stationary point of 1/x - slope * x at sqrt(L * U), sign-adjusted.
        let touch = 2.0 / (l * u).sqrt();
        let end = 1.0 / l + 1.0 / u;
        let offset = if l > 0.0 {
            // Convex branch.
            ordered_offset(touch, end)
        } else {
            // Concave branch, mirrored.
            ordered_offset(end, -touch)
        };
        Beam::linear(slope, offset)
    }

    /// Encloses `|x|` over `input`.
    pub fn abs(input: Interval) -> Beam {
        assert_finite_input("abs", input);
        let (l, u) = (input.lower(), input.upper());
        if l >= 0.0 {
            return Beam::linear(1.0, Interval::zero());
        }
        if u <= 0.0 {
            return Beam::linear(-1.0, Interval::zero());
        }
        // Straddles zero: secant slope, gap maximal at the kink.
        let slope = (u + l) / (u - l);
        Beam::linear(slope, Interval::new(0.0, -2.0 * l * u / (u - l)))
    }

    /// Encloses `min(x, threshold)` over `input`.
    pub fn min_with(input: Interval, threshold: f64) -> Beam {
        assert_finite_input("min_with", input);
        assert!(
            threshold.is_finite(),
            "Beam::min_with: threshold must be finite, got {}",
            threshold
        );
        if input.upper() <= threshold {
            return Beam::linear(1.0, Interval::zero());
        }
        if input.lower() >= threshold {
            return Beam::constant(Interval::point(threshold), 1);
        }
        kinked(input, threshold, |x| x.min(threshold))
    }

    /// Encloses `max(x, threshold)` over `input`.
    pub fn max_with(input: Interval, threshold: f64) -> Beam {
        assert_finite_input("max_with", input);
        assert!(
            threshold.is_finite(),
            "Beam::max_with: threshold must be finite, got {}",
            threshold
        );
        if input.lower() >= threshold {
            return Beam::linear(1.0, Interval::zero());
        }
        if input.upper() <= threshold {
            return Beam::constant(Interval::point(threshold), 1);
        }
        kinked(input, threshold, |x| x.max(threshold))
    }

    /// Encloses an arbitrary nondecreasing function over `input` by sampling
    /// it at `count + 1` evenly spaced points. Between adjacent samples the
    /// function is bracketed by the sample values, which bounds the gap to
    /// the secant line.
    ///
    /// Tightness improves with `count`; soundness does not depend on it.
    ///
    /// # Panics
    ///
    /// Panics if `count` is zero or the function produces a non-finite or
    /// decreasing sample.
    pub fn nondecreasing(input: Interval, count: usize, f: impl Fn(f64) -> f64) -> Beam {
        assert_finite_input("nondecreasing", input);
        assert!(count > 0, "Beam::nondecreasing: count must be positive");
        let (l, u) = (input.lower(), input.upper());
        if input.is_point() {
            let y = f(l);
            assert!(
                y.is_finite(),
                "Beam::nondecreasing: sample f({}) = {} is not finite",
                l,
                y
            );
            return Beam::linear(0.0, Interval::point(y));
        }

        let mut xs = Vec::with_capacity(count + 1);
        let mut ys = Vec::with_capacity(count + 1);
        for j in 0..=count {
            let x = l + (u - l) * (j as f64) / (count as f64);
            let y = f(x);
            assert!(
                y.is_finite(),
                "Beam::nondecreasing: sample f({}) = {} is not finite",
                x,
                y
            );
            if let Some(&previous) = ys.last() {
                assert!(
                    y >= previous,
                    "Beam::nondecreasing: samples decrease at x = {}",
                    x
                );
            }
            xs.push(x);
            ys.push(y);
        }
        // Nondecreasing secant has nonnegative slope, so within each cell
        // [x_j, x_{j+1}] the gap f(x) - slope * x lies between the opposite
        // corners of the sample box.
        let slope = (ys[count] - ys[0]) / (u - l);
        let mut offset = Interval::point(ys[0] - slope * xs[0]);
        for j in 0..count {
            offset = offset.hull(Interval::new(
                ys[j] - slope * xs[j + 1],
                ys[j + 1] - slope * xs[j],
            ));
        }
        Beam::linear(slope, offset)
    }

    /// Encloses the standard normal CDF over `input`, sampled at
    /// [`DEFAULT_SAMPLE_COUNT`] points.
    pub fn normal_cdf(input: Interval) -> Beam {
        assert_finite_input("normal_cdf", input);
        Beam::nondecreasing(input, DEFAULT_SAMPLE_COUNT, standard_normal_cdf)
    }
}

/// Secant enclosure for a piecewise-linear function with a single kink.
/// The gap to the secant is extremal at the endpoints and the kink.
fn kinked(input: Interval, kink: f64, f: impl Fn(f64) -> f64) -> Beam {
    let (l, u) = (input.lower(), input.upper());
    let slope = (f(u) - f(l)) / (u - l);
    let mut offset = Interval::point(f(l) - slope * l);
    offset = offset.hull(Interval::point(f(kink) - slope * kink));
    offset = offset.hull(Interval::point(f(u) - slope * u));
    Beam::linear(slope, offset)
}
