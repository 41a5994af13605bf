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

use crate::math::integrate::{self, IntegralBound, IntegrateError};
use std::{
    ops::{Add, Div, Mul, Neg, Sub},
    sync::atomic::AtomicBool,
};

/// Maximum recursion depth for [`Interval::apply`].
const MAX_APPLY_DEPTH: u32 = 32;

/// Maximum number of fixed-point rounds for [`Interval::weighted_average`].
const MAX_WEIGHTED_AVERAGE_ROUNDS: u32 = 100;

/// A closed real interval `[lower, upper]`.
///
/// An interval represents every value an uncertain quantity could take. All
/// arithmetic on intervals is *sound*: the result contains every value the
/// exact pointwise computation could produce for operands drawn from the
/// inputs. Bounds may be infinite; `Interval::nan()` is a distinguished
/// sentinel for "no valid bound".
///
/// # Invariants
///
/// `lower <= upper` for every non-sentinel interval.
///
/// # Examples
///
/// ```rust
/// # use girder_core::math::interval::Interval;
///
/// let a = Interval::new(1.0, 2.0);
/// let b = Interval::new(-1.0, 3.0);
/// let sum = a + b;
/// assert_eq!(sum, Interval::new(0.0, 5.0));
/// assert!(sum.contains(1.0 + -0.5));
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct Interval {
    lower: f64,
    upper: f64,
}

impl Interval {
    /// Creates a new interval `[lower, upper]`.
    ///
    /// # Panics
    ///
    /// Panics if `lower > upper` or either bound is NaN.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use girder_core::math::interval::Interval;
    ///
    /// let iv = Interval::new(0.0, 10.0);
    /// assert_eq!(iv.width(), 10.0);
    /// ```
    #[inline]
    pub fn new(lower: f64, upper: f64) -> Self {
        assert!(
            lower <= upper,
            "Invalid interval: lower ({}) must be less than or equal to upper ({})",
            lower,
            upper
        );
        Self { lower, upper }
    }

    /// Creates a new interval if the inputs are valid.
    ///
    /// Returns `None` if `lower > upper` or either bound is NaN.
    #[inline]
    pub fn try_new(lower: f64, upper: f64) -> Option<Self> {
        if lower <= upper {
            Some(Self { lower, upper })
        } else {
            None
        }
    }

    /// Creates a new interval without checking invariants in release builds.
    ///
    /// # Safety
    ///
    /// The caller must ensure `lower <= upper`. This function contains a
    /// `debug_assert!` to catch errors during development.
    #[inline]
    pub fn new_unchecked(lower: f64, upper: f64) -> Self {
        debug_assert!(
            lower <= upper,
            "Invalid interval: lower ({}) must be less than or equal to upper ({})",
            lower,
            upper
        );
        Self { lower, upper }
    }

    /// Creates the degenerate interval `[v, v]`.
    #[inline]
    pub fn point(v: f64) -> Self {
        debug_assert!(!v.is_nan(), "Interval::point requires a non-NaN value");
        Self { lower: v, upper: v }
    }

    /// The interval `[0, 0]`.
    #[inline]
    pub const fn zero() -> Self {
        Self {
            lower: 0.0,
            upper: 0.0,
        }
    }

    /// The whole real line `[-inf, +inf]`.
    #[inline]
    pub const fn entire() -> Self {
        Self {
            lower: f64::NEG_INFINITY,
            upper: f64::INFINITY,
        }
    }

    /// The distinguished NaN sentinel interval.
    ///
    /// This is the only way to obtain an interval with NaN bounds; arithmetic
    /// that would produce NaN panics instead of propagating it silently.
    #[inline]
    pub const fn nan() -> Self {
        Self {
            lower: f64::NAN,
            upper: f64::NAN,
        }
    }

    /// Returns the lower bound.
    #[inline]
    pub const fn lower(&self) -> f64 {
        self.lower
    }

    /// Returns the upper bound.
    #[inline]
    pub const fn upper(&self) -> f64 {
        self.upper
    }

    /// Returns the width `upper - lower`.
    ///
    /// A point interval has width `0`, even at infinity.
    #[inline]
    pub fn width(&self) -> f64 {
        if self.lower == self.upper {
            0.0
        } else {
            self.upper - self.lower
        }
    }

    /// Returns `true` if this is the NaN sentinel.
    #[inline]
    pub fn is_nan(&self) -> bool {
        self.lower.is_nan() || self.upper.is_nan()
    }

    /// Returns `true` if `lower == upper`.
    #[inline]
    pub fn is_point(&self) -> bool {
        self.lower == self.upper
    }

    /// Returns `true` if both bounds are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.lower.is_finite() && self.upper.is_finite()
    }

    /// Returns `true` if `value` lies in `[lower, upper]`.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Returns `true` if `other` is entirely contained within `self`.
    #[inline]
    pub fn contains_interval(&self, other: Self) -> bool {
        self.lower <= other.lower && other.upper <= self.upper
    }

    /// Calculates the intersection of two intervals.
    ///
    /// Returns `None` if the intervals are disjoint.
    #[inline]
    pub fn intersection(&self, other: Self) -> Option<Self> {
        let lower = self.lower.max(other.lower);
        let upper = self.upper.min(other.upper);
        Self::try_new(lower, upper)
    }

    /// Returns the smallest interval containing both operands (the hull).
    #[inline]
    pub fn hull(&self, other: Self) -> Self {
        Self {
            lower: self.lower.min(other.lower),
            upper: self.upper.max(other.upper),
        }
    }

    /// Calculates the midpoint of the interval.
    ///
    /// Infinite bounds use a convention that keeps bisection well-defined
    /// instead of the arithmetic mean:
    ///
    /// - `[-inf, +inf]` yields `0`.
    /// - `[-inf, u]` yields `0` if `u > 0`, `-1` if `u == 0`, else `2u`
    ///   (mirror the finite bound).
    /// - `[l, +inf]` yields `0` if `l < 0`, `+1` if `l == 0`, else `2l`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use girder_core::math::interval::Interval;
    ///
    /// assert_eq!(Interval::new(0.0, 10.0).midpoint(), 5.0);
    /// assert_eq!(Interval::entire().midpoint(), 0.0);
    /// assert_eq!(Interval::new(4.0, f64::INFINITY).midpoint(), 8.0);
    /// assert_eq!(Interval::new(f64::NEG_INFINITY, 0.0).midpoint(), -1.0);
    /// ```
    #[inline]
    pub fn midpoint(&self) -> f64 {
        match (
            self.lower == f64::NEG_INFINITY,
            self.upper == f64::INFINITY,
        ) {
            (true, true) => 0.0,
            (true, false) => {
                if self.upper > 0.0 {
                    0.0
                } else if self.upper == 0.0 {
                    -1.0
                } else {
                    2.0 * self.upper
                }
            }
            (false, true) => {
                if self.lower < 0.0 {
                    0.0
                } else if self.lower == 0.0 {
                    1.0
                } else {
                    2.0 * self.lower
                }
            }
            (false, false) => self.lower + (self.upper - self.lower) / 2.0,
        }
    }

    /// Returns the absolute value interval.
    #[inline]
    pub fn abs(&self) -> Self {
        if self.lower >= 0.0 {
            *self
        } else if self.upper <= 0.0 {
            -*self
        } else {
            Self::new_unchecked(0.0, (-self.lower).max(self.upper))
        }
    }

    /// Returns the interval of `x^2` over all `x` in `self`.
    #[inline]
    pub fn square(&self) -> Self {
        let a = self.abs();
        guarded(a.lower * a.lower, a.upper * a.upper)
    }

    /// Returns the interval of `sqrt(x)`.
    ///
    /// # Panics
    ///
    /// Panics if the interval contains negative values.
    #[inline]
    pub fn sqrt(&self) -> Self {
        assert!(
            self.lower >= 0.0,
            "Interval::sqrt requires a nonnegative domain, got {}",
            self
        );
        Self::new_unchecked(self.lower.sqrt(), self.upper.sqrt())
    }

    /// Returns the interval of `ln(x)`.
    ///
    /// `ln(0)` is `-inf`, which is a valid lower bound.
    ///
    /// # Panics
    ///
    /// Panics if the interval contains negative values.
    #[inline]
    pub fn log(&self) -> Self {
        assert!(
            self.lower >= 0.0,
            "Interval::log requires a nonnegative domain, got {}",
            self
        );
        Self::new_unchecked(self.lower.ln(), self.upper.ln())
    }

    /// Returns the interval of `exp(x)`.
    #[inline]
    pub fn exp(&self) -> Self {
        Self::new_unchecked(self.lower.exp(), self.upper.exp())
    }

    /// Elementwise minimum: the interval of `min(x, y)` over both operands.
    #[inline]
    pub fn min(&self, other: Self) -> Self {
        Self::new_unchecked(self.lower.min(other.lower), self.upper.min(other.upper))
    }

    /// Elementwise maximum: the interval of `max(x, y)` over both operands.
    #[inline]
    pub fn max(&self, other: Self) -> Self {
        Self::new_unchecked(self.lower.max(other.lower), self.upper.max(other.upper))
    }

    /// Applies a nondecreasing function to both bounds.
    ///
    /// Sound only when `f` is nondecreasing over the whole interval; this is
    /// the caller's obligation.
    #[inline]
    pub fn apply_monotone<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        guarded(f(self.lower), f(self.upper))
    }

    /// Computes sound bounds on the weighted average `sum(w_i v_i) / sum(w_i)`
    /// where each weight `w_i` is itself an interval.
    ///
    /// A combinatorial search over weight assignments is intractable, so each
    /// directional bound is found by fixed-point iteration: every weight is
    /// pushed to the extreme that moves the average in the wanted direction
    /// (maximum weight for values above the current bound when maximizing,
    /// minimum otherwise), the average is recomputed, and the process repeats
    /// until it converges or a round cap is hit.
    ///
    /// # Panics
    ///
    /// Panics if `entries` is empty, any weight admits negative values, or no
    /// weight assignment has positive total weight.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use girder_core::math::interval::Interval;
    ///
    /// let entries = [
    ///     (1.0, Interval::new(1.0, 2.0)),
    ///     (5.0, Interval::new(1.0, 2.0)),
    /// ];
    /// let avg = Interval::weighted_average(&entries);
    /// // Extremes: weights (2, 1) -> 7/3, weights (1, 2) -> 11/3.
    /// assert!(avg.contains(7.0 / 3.0));
    /// assert!(avg.contains(11.0 / 3.0));
    /// ```
    pub fn weighted_average(entries: &[(f64, Interval)]) -> Self {
        assert!(
            !entries.is_empty(),
            "Interval::weighted_average requires at least one entry"
        );
        for (value, weight) in entries {
            assert!(
                weight.lower >= 0.0,
                "Interval::weighted_average requires nonnegative weights, got {} for value {}",
                weight,
                value
            );
        }
        let max_total: f64 = entries.iter().map(|(_, w)| w.upper).sum();
        assert!(
            max_total > 0.0,
            "Interval::weighted_average requires a positive total weight to be attainable"
        );

        let upper = directional_average(entries, true);
        let lower = directional_average(entries, false);
        Self::new_unchecked(lower.min(upper), upper.max(lower))
    }

    /// Computes a sound bound on `f` over the whole interval by recursive
    /// bisection.
    ///
    /// `f` must be an interval extension: `f(sub)` must contain the true
    /// value of the underlying function for every point of `sub`. A
    /// sub-interval's bound is accepted into the accumulated union when its
    /// width exceeds the reference bound (the hull of `f` at the two
    /// endpoints) by at most `tolerance * max(1, reference width)`;
    /// otherwise the sub-interval is bisected. Acceptance only affects
    /// tightness, never soundness: the union of sound bounds is sound.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance` is not positive or `f` returns the NaN sentinel.
    pub fn apply<F>(&self, tolerance: f64, f: F) -> Self
    where
        F: Fn(Interval) -> Interval,
    {
        assert!(
            tolerance > 0.0,
            "Interval::apply requires a positive tolerance, got {}",
            tolerance
        );
        let mut accumulated: Option<Interval> = None;
        apply_recursive(*self, tolerance, &f, 0, &mut accumulated);
        match accumulated {
            Some(result) => result,
            // The recursion always accepts at least one sub-interval.
            None => Self::nan(),
        }
    }

    /// Adaptively integrates `f` over this interval to the given tolerance.
    ///
    /// `f(sub)` must be a sound bound on the integrand over `sub`. See
    /// [`integrate::integrate_adaptive`] for the subdivision strategy,
    /// error taxonomy, and cancellation semantics.
    #[inline]
    pub fn integrate<F>(
        &self,
        tolerance: f64,
        cancel: Option<&AtomicBool>,
        f: F,
    ) -> Result<IntegralBound, IntegrateError>
    where
        F: FnMut(Interval) -> Interval,
    {
        integrate::integrate_adaptive(*self, tolerance, cancel, f)
    }
}

/// Builds an interval from computed bounds, panicking on NaN.
///
/// Interval arithmetic on valid operands must never produce NaN; when it
/// does, some enclosure upstream was unsound and continuing would silently
/// produce an invalid bound.
#[inline]
fn guarded(lower: f64, upper: f64) -> Interval {
    assert!(
        !lower.is_nan() && !upper.is_nan(),
        "interval arithmetic produced NaN; an upstream bound is unsound"
    );
    Interval::new_unchecked(lower.min(upper), upper.max(lower))
}

/// One corner product under the `0 * inf = 0` guard.
#[inline]
fn corner_mul(a: f64, b: f64) -> f64 {
    if a == 0.0 || b == 0.0 {
        0.0
    } else {
        a * b
    }
}

/// One directional bound of the weighted-average fixed point.
fn directional_average(entries: &[(f64, Interval)], maximize: bool) -> f64 {
    // Seed with midpoint weights; fall back to the unweighted mean when all
    // midpoints are zero.
    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (value, weight) in entries {
        let w = weight.lower + weight.width() / 2.0;
        numerator += w * value;
        denominator += w;
    }
    let mut average = if denominator > 0.0 {
        numerator / denominator
    } else {
        entries.iter().map(|(v, _)| v).sum::<f64>() / entries.len() as f64
    };

    for _ in 0..MAX_WEIGHTED_AVERAGE_ROUNDS {
        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for (value, weight) in entries {
            let above = *value > average;
            let w = if above == maximize {
                weight.upper
            } else {
                weight.lower
            };
            numerator += w * value;
            denominator += w;
        }
        if denominator <= 0.0 {
            // Every remaining weight can be zero; the extreme is attained by
            // the most favorable value alone.
            let extreme = entries
                .iter()
                .filter(|(_, w)| w.upper > 0.0)
                .map(|(v, _)| *v)
                .fold(if maximize { f64::NEG_INFINITY } else { f64::INFINITY }, |a, b| {
                    if maximize { a.max(b) } else { a.min(b) }
                });
            return extreme;
        }
        let next = numerator / denominator;
        if next == average {
            break;
        }
        average = next;
    }
    average
}

fn apply_recursive<F>(
    sub: Interval,
    tolerance: f64,
    f: &F,
    depth: u32,
    accumulated: &mut Option<Interval>,
) where
    F: Fn(Interval) -> Interval,
{
    let bound = f(sub);
    assert!(
        !bound.is_nan(),
        "Interval::apply: extension returned NaN for {}",
        sub
    );

    let reference = f(Interval::point(sub.lower())).hull(f(Interval::point(sub.upper())));
    let gap = bound.width() - reference.width();
    let scale = 1.0f64.max(reference.width());
    let accept = depth >= MAX_APPLY_DEPTH || (gap.is_finite() && gap <= tolerance * scale);

    if accept {
        *accumulated = Some(match accumulated {
            Some(acc) => acc.hull(bound),
            None => bound,
        });
        return;
    }

    let mid = sub.midpoint();
    if !(sub.lower() < mid && mid < sub.upper()) {
        // Bisection made no progress (adjacent floats); accept as-is.
        *accumulated = Some(match accumulated {
            Some(acc) => acc.hull(bound),
            None => bound,
        });
        return;
    }
    apply_recursive(
        Interval::new_unchecked(sub.lower(), mid),
        tolerance,
        f,
        depth + 1,
        accumulated,
    );
    apply_recursive(
        Interval::new_unchecked(mid, sub.upper()),
        tolerance,
        f,
        depth + 1,
        accumulated,
    );
}

impl Neg for Interval {
    type Output = Interval;

    #[inline]
    fn neg(self) -> Interval {
        Interval::new_unchecked(-self.upper, -self.lower)
    }
}

impl Add for Interval {
    type Output = Interval;

    #[inline]
    fn add(self, rhs: Interval) -> Interval {
        guarded(self.lower + rhs.lower, self.upper + rhs.upper)
    }
}

impl Add<f64> for Interval {
    type Output = Interval;

    #[inline]
    fn add(self, rhs: f64) -> Interval {
        guarded(self.lower + rhs, self.upper + rhs)
    }
}

impl Sub for Interval {
    type Output = Interval;

    #[inline]
    fn sub(self, rhs: Interval) -> Interval {
        self + (-rhs)
    }
}

impl Sub<f64> for Interval {
    type Output = Interval;

    #[inline]
    fn sub(self, rhs: f64) -> Interval {
        guarded(self.lower - rhs, self.upper - rhs)
    }
}

impl Mul<f64> for Interval {
    type Output = Interval;

    /// Scales the interval by a scalar.
    ///
    /// Multiplying by exactly `0` short-circuits to `[0, 0]` even when a
    /// bound is infinite, so `0 * inf` never surfaces as NaN.
    #[inline]
    fn mul(self, rhs: f64) -> Interval {
        if rhs == 0.0 {
            Interval::zero()
        } else if rhs > 0.0 {
            guarded(self.lower * rhs, self.upper * rhs)
        } else {
            guarded(self.upper * rhs, self.lower * rhs)
        }
    }
}

impl Mul for Interval {
    type Output = Interval;

    /// Interval product: the min/max of all four corner products.
    ///
    /// A point-zero operand short-circuits to `[0, 0]` even against an
    /// infinite operand.
    #[inline]
    fn mul(self, rhs: Interval) -> Interval {
        if (self.lower == 0.0 && self.upper == 0.0) || (rhs.lower == 0.0 && rhs.upper == 0.0) {
            return Interval::zero();
        }
        let corners = [
            corner_mul(self.lower, rhs.lower),
            corner_mul(self.lower, rhs.upper),
            corner_mul(self.upper, rhs.lower),
            corner_mul(self.upper, rhs.upper),
        ];
        let mut lower = corners[0];
        let mut upper = corners[0];
        for &c in &corners[1..] {
            lower = lower.min(c);
            upper = upper.max(c);
        }
        guarded(lower, upper)
    }
}

impl Div for Interval {
    type Output = Interval;

    /// Interval quotient.
    ///
    /// - A point-zero numerator yields `[0, 0]`.
    /// - A denominator with zero at a boundary yields a one-sided infinite
    ///   reciprocal; zero in the interior (or a point-zero denominator)
    ///   widens to the whole real line.
    #[inline]
    fn div(self, rhs: Interval) -> Interval {
        if self.lower == 0.0 && self.upper == 0.0 {
            return Interval::zero();
        }
        let reciprocal = if rhs.lower > 0.0 || rhs.upper < 0.0 {
            Interval::new_unchecked(1.0 / rhs.upper, 1.0 / rhs.lower)
        } else if rhs.lower == 0.0 && rhs.upper > 0.0 {
            Interval::new_unchecked(1.0 / rhs.upper, f64::INFINITY)
        } else if rhs.upper == 0.0 && rhs.lower < 0.0 {
            Interval::new_unchecked(f64::NEG_INFINITY, 1.0 / rhs.lower)
        } else {
            // Zero interior, or the point-zero denominator: every real is a
            // sound enclosure of the attainable quotients.
            return Interval::entire();
        };
        self * reciprocal
    }
}

impl Div<f64> for Interval {
    type Output = Interval;

    #[inline]
    fn div(self, rhs: f64) -> Interval {
        self / Interval::point(rhs)
    }
}

impl std::fmt::Debug for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interval")
            .field("lower", &self.lower)
            .field("upper", &self.upper)
            .finish()
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_construction_valid() {
        let iv = Interval::new(-1.5, 2.5);
        assert_eq!(iv.lower(), -1.5);
        assert_eq!(iv.upper(), 2.5);
        assert_eq!(iv.width(), 4.0);
        assert!(!iv.is_point());
        assert!(iv.is_finite());
    }

    #[test]
    #[should_panic(expected = "Invalid interval")]
    fn test_construction_panics_on_reversed_bounds() {
        Interval::new(1.0, 0.0);
    }

    #[test]
    fn test_try_new() {
        assert!(Interval::try_new(0.0, 1.0).is_some());
        assert!(Interval::try_new(0.0, 0.0).is_some());
        assert!(Interval::try_new(1.0, 0.0).is_none());
        assert!(Interval::try_new(f64::NAN, 1.0).is_none());
    }

    #[test]
    fn test_nan_sentinel() {
        let nan = Interval::nan();
        assert!(nan.is_nan());
        assert!(!Interval::new(0.0, 1.0).is_nan());
        // The sentinel is not equal to itself, like the floats it wraps.
        assert_ne!(nan, nan);
    }

    #[test]
    fn test_point_width_at_infinity() {
        let iv = Interval::point(f64::INFINITY);
        assert!(iv.is_point());
        assert_eq!(iv.width(), 0.0);
    }

    #[test]
    fn test_midpoint_finite() {
        assert_eq!(Interval::new(0.0, 10.0).midpoint(), 5.0);
        assert_eq!(Interval::new(-4.0, -2.0).midpoint(), -3.0);
        // Robust against overflow of lower + upper.
        let big = Interval::new(f64::MAX / 2.0, f64::MAX);
        assert!(big.midpoint().is_finite());
    }

    #[test]
    fn test_midpoint_conventions_at_infinity() {
        assert_eq!(Interval::entire().midpoint(), 0.0);
        assert_eq!(Interval::new(f64::NEG_INFINITY, 5.0).midpoint(), 0.0);
        assert_eq!(Interval::new(f64::NEG_INFINITY, 0.0).midpoint(), -1.0);
        assert_eq!(Interval::new(f64::NEG_INFINITY, -3.0).midpoint(), -6.0);
        assert_eq!(Interval::new(-5.0, f64::INFINITY).midpoint(), 0.0);
        assert_eq!(Interval::new(0.0, f64::INFINITY).midpoint(), 1.0);
        assert_eq!(Interval::new(3.0, f64::INFINITY).midpoint(), 6.0);
    }

    #[test]
    fn test_midpoint_is_interior() {
        // The convention must keep bisection making progress.
        let cases = [
            Interval::entire(),
            Interval::new(f64::NEG_INFINITY, 7.0),
            Interval::new(f64::NEG_INFINITY, 0.0),
            Interval::new(f64::NEG_INFINITY, -2.0),
            Interval::new(-1.0, f64::INFINITY),
            Interval::new(0.0, f64::INFINITY),
            Interval::new(9.0, f64::INFINITY),
            Interval::new(-3.0, 4.0),
        ];
        for iv in cases {
            let m = iv.midpoint();
            assert!(iv.lower() < m && m < iv.upper(), "midpoint of {} was {}", iv, m);
        }
    }

    #[test]
    fn test_set_operations() {
        let a = Interval::new(0.0, 10.0);
        let b = Interval::new(5.0, 15.0);
        assert_eq!(a.intersection(b), Some(Interval::new(5.0, 10.0)));
        assert_eq!(a.hull(b), Interval::new(0.0, 15.0));
        assert!(a.intersection(Interval::new(11.0, 12.0)).is_none());
        assert!(a.contains_interval(Interval::new(2.0, 8.0)));
        assert!(!a.contains_interval(b));
    }

    #[test]
    fn test_addition_and_negation() {
        let a = Interval::new(1.0, 2.0);
        let b = Interval::new(-3.0, 5.0);
        assert_eq!(a + b, Interval::new(-2.0, 7.0));
        assert_eq!(-a, Interval::new(-2.0, -1.0));
        assert_eq!(a - b, Interval::new(-4.0, 5.0));
        assert_eq!(a + 10.0, Interval::new(11.0, 12.0));
    }

    #[test]
    fn test_scalar_zero_multiplication_short_circuits() {
        let unbounded = Interval::new(0.0, f64::INFINITY);
        assert_eq!(unbounded * 0.0, Interval::zero());
        assert_eq!(Interval::entire() * 0.0, Interval::zero());
    }

    #[test]
    fn test_point_zero_interval_multiplication_short_circuits() {
        assert_eq!(Interval::zero() * Interval::entire(), Interval::zero());
        assert_eq!(Interval::entire() * Interval::zero(), Interval::zero());
    }

    #[test]
    fn test_interval_multiplication_corners() {
        let a = Interval::new(-2.0, 3.0);
        let b = Interval::new(-1.0, 4.0);
        // Corners: 2, -8, -3, 12.
        assert_eq!(a * b, Interval::new(-8.0, 12.0));
    }

    #[test]
    fn test_multiplication_with_mixed_zero_and_infinity() {
        let a = Interval::new(0.0, 1.0);
        let b = Interval::new(0.0, f64::INFINITY);
        let product = a * b;
        assert_eq!(product.lower(), 0.0);
        assert_eq!(product.upper(), f64::INFINITY);
    }

    #[test]
    fn test_division_regular() {
        let a = Interval::new(1.0, 2.0);
        let b = Interval::new(4.0, 8.0);
        assert_eq!(a / b, Interval::new(0.125, 0.5));
        assert_eq!(a / 2.0, Interval::new(0.5, 1.0));
    }

    #[test]
    fn test_division_zero_numerator() {
        assert_eq!(Interval::zero() / Interval::new(0.0, 0.0), Interval::zero());
        assert_eq!(Interval::zero() / Interval::new(-1.0, 1.0), Interval::zero());
    }

    #[test]
    fn test_division_by_interval_touching_zero() {
        let one = Interval::point(1.0);
        let right = one / Interval::new(0.0, 2.0);
        assert_eq!(right, Interval::new(0.5, f64::INFINITY));

        let left = one / Interval::new(-2.0, 0.0);
        assert_eq!(left, Interval::new(f64::NEG_INFINITY, -0.5));
    }

    #[test]
    fn test_division_by_interval_straddling_zero() {
        let result = Interval::point(1.0) / Interval::new(-1.0, 1.0);
        assert_eq!(result, Interval::entire());
        // Point-zero denominator with a nonzero numerator widens too.
        assert_eq!(Interval::point(1.0) / 0.0, Interval::entire());
    }

    #[test]
    fn test_abs_square() {
        assert_eq!(Interval::new(-3.0, 2.0).abs(), Interval::new(0.0, 3.0));
        assert_eq!(Interval::new(-3.0, 2.0).square(), Interval::new(0.0, 9.0));
        assert_eq!(Interval::new(2.0, 3.0).square(), Interval::new(4.0, 9.0));
        assert_eq!(Interval::new(-3.0, -2.0).square(), Interval::new(4.0, 9.0));
    }

    #[test]
    fn test_elementary_functions() {
        let iv = Interval::new(0.0, 4.0);
        assert_eq!(iv.sqrt(), Interval::new(0.0, 2.0));
        assert_eq!(iv.exp().lower(), 1.0);
        assert_eq!(iv.log().lower(), f64::NEG_INFINITY);
        assert_eq!(iv.log().upper(), 4.0f64.ln());
    }

    #[test]
    #[should_panic(expected = "nonnegative domain")]
    fn test_sqrt_panics_on_negative_domain() {
        Interval::new(-1.0, 1.0).sqrt();
    }

    #[test]
    fn test_min_max() {
        let a = Interval::new(0.0, 5.0);
        let b = Interval::new(2.0, 3.0);
        assert_eq!(a.min(b), Interval::new(0.0, 3.0));
        assert_eq!(a.max(b), Interval::new(2.0, 5.0));
    }

    #[test]
    fn test_point_degeneracy_of_arithmetic() {
        // Point op point == point of the scalar op.
        let cases = [(1.5, 2.5), (-3.0, 7.0), (0.25, -0.5)];
        for (v, w) in cases {
            let p = Interval::point(v);
            let q = Interval::point(w);
            assert_eq!(p + q, Interval::point(v + w));
            assert_eq!(p - q, Interval::point(v - w));
            assert_eq!(p * q, Interval::point(v * w));
            assert_eq!(p / q, Interval::point(v / w));
        }
    }

    #[test]
    fn test_weighted_average_brackets_all_corner_assignments() {
        let entries = [
            (1.0, Interval::new(0.5, 2.0)),
            (4.0, Interval::new(1.0, 3.0)),
            (-2.0, Interval::new(0.0, 1.0)),
        ];
        let bound = Interval::weighted_average(&entries);

        // Brute-force every corner assignment of the three weights.
        for mask in 0..(1u32 << entries.len()) {
            let mut numerator = 0.0;
            let mut denominator = 0.0;
            for (i, (value, weight)) in entries.iter().enumerate() {
                let w = if mask & (1 << i) != 0 {
                    weight.upper()
                } else {
                    weight.lower()
                };
                numerator += w * value;
                denominator += w;
            }
            if denominator > 0.0 {
                let avg = numerator / denominator;
                assert!(
                    bound.contains(avg),
                    "corner average {} escaped bound {}",
                    avg,
                    bound
                );
            }
        }
    }

    #[test]
    fn test_weighted_average_random_assignments_contained() {
        let entries = [
            (0.0, Interval::new(0.1, 1.0)),
            (10.0, Interval::new(0.0, 2.0)),
            (-5.0, Interval::new(0.5, 0.5)),
            (3.0, Interval::new(0.0, 4.0)),
        ];
        let bound = Interval::weighted_average(&entries);

        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..2000 {
            let mut numerator = 0.0;
            let mut denominator = 0.0;
            for (value, weight) in &entries {
                let w = weight.lower() + rng.random::<f64>() * weight.width();
                numerator += w * value;
                denominator += w;
            }
            let avg = numerator / denominator;
            assert!(
                bound.contains(avg),
                "sampled average {} escaped bound {}",
                avg,
                bound
            );
        }
    }

    #[test]
    #[should_panic(expected = "nonnegative weights")]
    fn test_weighted_average_rejects_negative_weights() {
        Interval::weighted_average(&[(1.0, Interval::new(-1.0, 1.0))]);
    }

    #[test]
    fn test_apply_tightens_a_crude_extension() {
        // Crude extension of x^2 over [-1, 2]: the naive product [l,u]*[l,u]
        // is a valid but loose extension; apply should tighten it while
        // remaining sound.
        let domain = Interval::new(-1.0, 2.0);
        let crude = |iv: Interval| iv * iv;
        let refined = domain.apply(1e-3, crude);
        let naive = crude(domain);

        // Sound: must still contain the exact range [0, 4].
        assert!(refined.contains(0.0));
        assert!(refined.contains(4.0));
        // Tighter than the single-shot bound [-2, 4].
        assert!(refined.width() <= naive.width());
        assert!(refined.lower() > -0.5);
    }

    #[test]
    fn test_apply_on_point_interval() {
        let p = Interval::point(3.0);
        let result = p.apply(1e-6, |iv| iv.exp());
        assert!(result.contains(3.0f64.exp()));
        assert!(result.width() < 1e-9);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Interval::new(0.5, 2.0)), "[0.5, 2]");
        assert_eq!(
            format!("{:?}", Interval::new(0.0, 1.0)),
            "Interval { lower: 0.0, upper: 1.0 }"
        );
    }

    fn sample_in(iv: Interval, rng: &mut ChaCha8Rng) -> f64 {
        if iv.is_point() {
            iv.lower()
        } else {
            iv.lower() + rng.random::<f64>() * iv.width()
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(512))]

        /// For all x in a and y in b, x + y is contained in a + b.
        #[test]
        fn soundness_addition(
            (al, au) in bounds_strategy(),
            (bl, bu) in bounds_strategy(),
            seed in any::<u64>(),
        ) {
            let a = Interval::new(al, au);
            let b = Interval::new(bl, bu);
            let sum = a + b;
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for _ in 0..16 {
                let x = sample_in(a, &mut rng);
                let y = sample_in(b, &mut rng);
                prop_assert!(sum.contains(x + y), "{} + {} escaped {}", x, y, sum);
            }
        }

        /// For all x in a and y in b, x * y is contained in a * b.
        #[test]
        fn soundness_multiplication(
            (al, au) in bounds_strategy(),
            (bl, bu) in bounds_strategy(),
            seed in any::<u64>(),
        ) {
            let a = Interval::new(al, au);
            let b = Interval::new(bl, bu);
            let product = a * b;
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for _ in 0..16 {
                let x = sample_in(a, &mut rng);
                let y = sample_in(b, &mut rng);
                prop_assert!(product.contains(x * y), "{} * {} escaped {}", x, y, product);
            }
        }

        /// For all x in a and y in b with b bounded away from zero,
        /// x / y is contained in a / b.
        #[test]
        fn soundness_division(
            (al, au) in bounds_strategy(),
            (bl, bu) in bounds_strategy(),
            seed in any::<u64>(),
        ) {
            let a = Interval::new(al, au);
            // Shift the divisor strictly positive.
            let b = Interval::new(bl.abs() + 0.125, bl.abs() + 0.125 + (bu - bl).abs());
            let quotient = a / b;
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for _ in 0..16 {
                let x = sample_in(a, &mut rng);
                let y = sample_in(b, &mut rng);
                prop_assert!(quotient.contains(x / y), "{} / {} escaped {}", x, y, quotient);
            }
        }

        /// Square, abs, and exp bounds contain sampled images.
        #[test]
        fn soundness_unary(
            (al, au) in bounds_strategy(),
            seed in any::<u64>(),
        ) {
            let a = Interval::new(al, au);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for _ in 0..16 {
                let x = sample_in(a, &mut rng);
                prop_assert!(a.square().contains(x * x));
                prop_assert!(a.abs().contains(x.abs()));
                prop_assert!(a.exp().contains(x.exp()) || x.exp() == f64::INFINITY);
            }
        }
    }

    prop_compose! {
        fn bounds_strategy()(a in -100.0f64..100.0, b in -100.0f64..100.0) -> (f64, f64) {
            (a.min(b), a.max(b))
        }
    }
}
