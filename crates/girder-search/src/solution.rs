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

use girder_core::math::{interval::Interval, region::Region};

/// A candidate found during search: the region it came from, the caller's
/// evaluation payload, and the interval bracketing the objective value at
/// the candidate point.
///
/// The *certified* value is `value.lower()` — the objective is guaranteed to
/// reach at least that much. `uncertainty` is the width of the value
/// interval; a noisy or numerically bounded objective reports how much of
/// its value it cannot vouch for.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<D> {
    region: Region,
    data: D,
    value: Interval,
}

impl<D> Solution<D> {
    /// Creates a solution.
    ///
    /// # Panics
    ///
    /// Panics if `value` is the NaN sentinel or has an infinite lower bound;
    /// a solution must certify a concrete value.
    pub fn new(region: Region, data: D, value: Interval) -> Self {
        assert!(
            !value.is_nan(),
            "Solution::new: value must not be the NaN sentinel"
        );
        assert!(
            value.lower().is_finite(),
            "Solution::new: certified value must be finite, got {}",
            value
        );
        Self {
            region,
            data,
            value,
        }
    }

    /// The region the candidate was drawn from.
    #[inline]
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// The caller's evaluation payload.
    #[inline]
    pub fn data(&self) -> &D {
        &self.data
    }

    /// The interval bracketing the objective value at the candidate.
    #[inline]
    pub fn value(&self) -> Interval {
        self.value
    }

    /// The value the objective is guaranteed to reach.
    #[inline]
    pub fn certified_value(&self) -> f64 {
        self.value.lower()
    }

    /// The width of the value interval.
    #[inline]
    pub fn uncertainty(&self) -> f64 {
        self.value.width()
    }

    /// Consumes the solution, returning its parts.
    pub fn into_parts(self) -> (Region, D, Interval) {
        (self.region, self.data, self.value)
    }
}

impl<D> std::fmt::Display for Solution<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Solution(value: {}, region: {})",
            self.value, self.region
        )
    }
}
