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

/// Always splits the widest dimension. The baseline strategy, and the
/// fallback the adaptive one degrades to.
#[derive(Debug, Clone, Copy, Default)]
pub struct WidestBranching;

impl WidestBranching {
    #[inline]
    pub fn new() -> Self {
        WidestBranching
    }
}

impl Branching for WidestBranching {
    fn choose_dimension(&self, region: &Region) -> Option<usize> {
        region.widest_dimension()
    }

    fn observe(&mut self, _dimension: usize, _coordinate_delta: f64, _value_delta: f64) {}
}

#[cfg(test)]
mod tests {
    use super::WidestBranching;
    use crate::branching::Branching;
    use girder_core::math::{interval::Interval, region::Region, vector::DenseVector};

    #[test]
    fn test_picks_the_widest_dimension() {
        let branching = WidestBranching::new();
        let region = Region::from_intervals(&[
            Interval::new(0.0, 1.0),
            Interval::new(0.0, 5.0),
            Interval::new(0.0, 2.0),
        ]);
        assert_eq!(branching.choose_dimension(&region), Some(1));
    }

    #[test]
    fn test_point_region_has_no_dimension() {
        let branching = WidestBranching::new();
        let region = Region::point(&DenseVector::from_vec(vec![1.0, 2.0]));
        assert_eq!(branching.choose_dimension(&region), None);
    }
}
