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

use girder_core::math::{interval::Interval, region::Region, vector::DenseVector};

/// The function being maximized, seen through sound interval bounds.
///
/// `bound` must be a *sound* interval extension: for every point of the
/// region, the true function value lies inside the returned interval.
/// `evaluate` assesses a single candidate point and may attach an arbitrary
/// payload (the witness the caller wants back — a schedule, a parameter
/// assignment) alongside the value interval; a noisy or numerically bounded
/// objective reports its evaluation uncertainty as the interval's width.
///
/// Both methods take `&mut self` so objectives can keep caches or scratch
/// buffers across calls.
pub trait Objective {
    /// The per-evaluation payload returned to the caller.
    type Data;

    /// A sound bound on the objective over the whole region.
    fn bound(&mut self, region: &Region) -> Interval;

    /// Evaluates the objective at a single point.
    fn evaluate(&mut self, point: &DenseVector) -> (Self::Data, Interval);
}

/// Adapts a plain `FnMut(&Region) -> Interval` interval extension into an
/// [`Objective`] with no payload. Point evaluations go through the same
/// extension applied to a degenerate region.
pub struct FnObjective<F> {
    extension: F,
}

impl<F> FnObjective<F>
where
    F: FnMut(&Region) -> Interval,
{
    #[inline]
    pub fn new(extension: F) -> Self {
        Self { extension }
    }
}

impl<F> Objective for FnObjective<F>
where
    F: FnMut(&Region) -> Interval,
{
    type Data = ();

    fn bound(&mut self, region: &Region) -> Interval {
        (self.extension)(region)
    }

    fn evaluate(&mut self, point: &DenseVector) -> ((), Interval) {
        ((), (self.extension)(&Region::point(point)))
    }
}
