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

use crate::branching::Branching;
use girder_core::math::region::Region;

/// Running mean and variance of observed sensitivities for one dimension
/// (Welford's update, numerically stable against long runs).
#[derive(Debug, Clone, Copy, Default)]
struct SensitivityAccumulator {
    count: u64,
    mean: f64,
    m2: f64,
}

impl SensitivityAccumulator {
    fn push(&mut self, sample: f64) {
        self.count += 1;
        let delta = sample - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (sample - self.mean);
    }

    fn mean(&self) -> f64 {
        self.mean
    }

    fn stdev(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            (self.m2 / (self.count - 1) as f64).sqrt()
        }
    }
}

/// Splits the dimension the objective appears most sensitive to.
///
/// Every observed parent-to-child midpoint move contributes a sample of
/// `|value delta / coordinate delta|` to that dimension's accumulator. A
/// dimension's score is an optimistic sensitivity estimate — mean plus one
/// standard deviation, so rarely-tried dimensions with erratic payoffs stay
/// attractive — times its current half-width, the most the split can
/// actually move the midpoint. With no informative observations, or when
/// every score is zero, the choice degrades to the widest dimension.
#[derive(Debug, Clone)]
pub struct SensitivityBranching {
    accumulators: Vec<SensitivityAccumulator>,
}

impl SensitivityBranching {
    /// Creates a strategy for regions of the given dimension.
    pub fn new(dimension: usize) -> Self {
        Self {
            accumulators: vec![SensitivityAccumulator::default(); dimension],
        }
    }

    /// Number of observations recorded for `dimension`.
    #[inline]
    pub fn observations(&self, dimension: usize) -> u64 {
        self.accumulators[dimension].count
    }
}

impl Branching for SensitivityBranching {
    fn choose_dimension(&self, region: &Region) -> Option<usize> {
        assert_eq!(
            region.dimension(),
            self.accumulators.len(),
            "SensitivityBranching: built for {} dimensions, asked about {}",
            self.accumulators.len(),
            region.dimension()
        );

        let mut best: Option<(usize, f64)> = None;
        for (d, accumulator) in self.accumulators.iter().enumerate() {
            let half_width = region.interval(d).width() / 2.0;
            if half_width == 0.0 || accumulator.count == 0 {
                continue;
            }
            let score = (accumulator.mean() + accumulator.stdev()) * half_width;
            if !score.is_finite() || score <= 0.0 {
                continue;
            }
            match best {
                Some((_, s)) if s >= score => {}
                _ => best = Some((d, score)),
            }
        }

        match best {
            Some((d, _)) => Some(d),
            None => region.widest_dimension(),
        }
    }

    fn observe(&mut self, dimension: usize, coordinate_delta: f64, value_delta: f64) {
        if coordinate_delta == 0.0 {
            return;
        }
        let sample = (value_delta / coordinate_delta).abs();
        if sample.is_finite() {
            self.accumulators[dimension].push(sample);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SensitivityBranching;
    use crate::branching::Branching;
    use girder_core::math::{interval::Interval, region::Region};

    fn square() -> Region {
        Region::from_intervals(&[Interval::new(0.0, 1.0), Interval::new(0.0, 1.0)])
    }

    #[test]
    fn test_falls_back_to_widest_without_observations() {
        let branching = SensitivityBranching::new(2);
        let region = Region::from_intervals(&[Interval::new(0.0, 1.0), Interval::new(0.0, 3.0)]);
        assert_eq!(branching.choose_dimension(&region), Some(1));
    }

    #[test]
    fn test_prefers_the_sensitive_dimension() {
        let mut branching = SensitivityBranching::new(2);
        // Dimension 0 barely moves the value, dimension 1 moves it a lot.
        for _ in 0..8 {
            branching.observe(0, 0.1, 0.001);
            branching.observe(1, 0.1, 1.0);
        }
        assert_eq!(branching.choose_dimension(&square()), Some(1));
        assert_eq!(branching.observations(1), 8);
    }

    #[test]
    fn test_scores_are_weighted_by_half_width() {
        let mut branching = SensitivityBranching::new(2);
        // Equal sensitivities; the wider dimension must win.
        for _ in 0..4 {
            branching.observe(0, 0.1, 0.5);
            branching.observe(1, 0.1, 0.5);
        }
        let region = Region::from_intervals(&[Interval::new(0.0, 4.0), Interval::new(0.0, 1.0)]);
        assert_eq!(branching.choose_dimension(&region), Some(0));
    }

    #[test]
    fn test_ignores_degenerate_observations() {
        let mut branching = SensitivityBranching::new(1);
        branching.observe(0, 0.0, 1.0);
        assert_eq!(branching.observations(0), 0);
    }
}
