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

use crate::objective::Objective;
use girder_core::math::{interval::Interval, region::Region, vector::DenseVector};
use girder_search::solution::Solution;

/// One candidate region of the search, with everything the engine needs
/// cached: the midpoint, the value interval the objective reported there,
/// and the sound bound over the whole region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionState<D> {
    region: Region,
    midpoint: DenseVector,
    value: Interval,
    bound: Interval,
    data: D,
}

impl<D> RegionState<D> {
    /// Bounds `region` and evaluates the objective at its midpoint.
    ///
    /// # Panics
    ///
    /// Panics if the objective returns a NaN bound or a value interval
    /// whose lower end is not finite; a candidate must certify a concrete
    /// value.
    pub fn evaluate<O>(region: Region, objective: &mut O) -> Self
    where
        O: Objective<Data = D>,
    {
        let bound = objective.bound(&region);
        assert!(
            !bound.is_nan(),
            "RegionState::evaluate: objective returned a NaN bound for {}",
            region
        );
        let midpoint = region.midpoint();
        let (data, value) = objective.evaluate(&midpoint);
        assert!(
            !value.is_nan() && value.lower().is_finite(),
            "RegionState::evaluate: objective returned uncertifiable value {} at {}",
            value,
            midpoint
        );
        Self {
            region,
            midpoint,
            value,
            bound,
            data,
        }
    }

    /// The candidate region.
    #[inline]
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// The region midpoint the objective was evaluated at.
    #[inline]
    pub fn midpoint(&self) -> &DenseVector {
        &self.midpoint
    }

    /// The value interval at the midpoint.
    #[inline]
    pub fn value(&self) -> Interval {
        self.value
    }

    /// The sound bound over the whole region.
    #[inline]
    pub fn bound(&self) -> Interval {
        self.bound
    }

    /// The value the objective certifies at the midpoint.
    #[inline]
    pub fn certified_value(&self) -> f64 {
        self.value.lower()
    }

    /// The width of the midpoint value interval.
    #[inline]
    pub fn uncertainty(&self) -> f64 {
        self.value.width()
    }

    /// Whether splitting this state further can still pay off.
    ///
    /// A state is resolved when its bound is as tight as the objective's own
    /// evaluation uncertainty allows (or as tight as the caller asked for);
    /// splitting it forever would chase noise, not value.
    #[inline]
    pub fn is_resolved(&self, f_tolerance: f64) -> bool {
        self.bound.width() <= f_tolerance.max(self.uncertainty())
    }

    /// Converts this state into a reportable solution.
    pub fn to_solution(&self) -> Solution<D>
    where
        D: Clone,
    {
        Solution::new(self.region.clone(), self.data.clone(), self.value)
    }
}

impl<D> std::fmt::Display for RegionState<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RegionState(bound: {}, value: {}, region: {})",
            self.bound, self.value, self.region
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::FnObjective;

    fn parabola() -> FnObjective<impl FnMut(&Region) -> Interval> {
        // f(x) = -(x - 1)^2.
        FnObjective::new(|region: &Region| -(region.interval(0) - 1.0).square())
    }

    #[test]
    fn test_evaluate_caches_midpoint_and_bound() {
        let mut objective = parabola();
        let region = Region::from_intervals(&[Interval::new(0.0, 4.0)]);
        let state = RegionState::evaluate(region, &mut objective);

        assert_eq!(state.midpoint()[0], 2.0);
        assert_eq!(state.value(), Interval::point(-1.0));
        assert_eq!(state.certified_value(), -1.0);
        assert_eq!(state.uncertainty(), 0.0);
        // The bound must cover the whole range [-9, 0].
        assert!(state.bound().contains(0.0));
        assert!(state.bound().contains(-9.0));
    }

    #[test]
    fn test_resolution_respects_evaluation_uncertainty() {
        // A noisy objective: value width 0.5 at every point.
        let mut noisy = FnObjective::new(|region: &Region| {
            region.interval(0) + Interval::new(-0.25, 0.25)
        });
        let region = Region::from_intervals(&[Interval::new(0.0, 0.1)]);
        let state = RegionState::evaluate(region, &mut noisy);

        assert_eq!(state.uncertainty(), 0.5);
        // Even with a tiny tolerance the state counts as resolved: its bound
        // width (0.6) exceeds the noise only by the region's own width.
        assert!(!state.is_resolved(1e-9));
        let tiny = Region::from_intervals(&[Interval::point(0.05)]);
        let state = RegionState::evaluate(tiny, &mut noisy);
        assert!(state.is_resolved(1e-9));
    }

    #[test]
    #[should_panic(expected = "uncertifiable value")]
    fn test_rejects_unbounded_midpoint_values() {
        let mut bad = FnObjective::new(|_: &Region| Interval::new(f64::NEG_INFINITY, 0.0));
        RegionState::evaluate(
            Region::from_intervals(&[Interval::new(0.0, 1.0)]),
            &mut bad,
        );
    }
}
