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

//! # Branching Strategies
//!
//! Which dimension to split when a region is expanded. The engine feeds the
//! strategy observed value deltas between parent and child midpoints, so
//! adaptive strategies can learn which coordinates actually move the
//! objective.

pub mod sensitivity;
pub mod widest;

use girder_core::math::region::Region;

/// Picks the dimension a region should be split along.
pub trait Branching {
    /// The dimension to split, or `None` when every dimension is a point.
    fn choose_dimension(&self, region: &Region) -> Option<usize>;

    /// Records that moving `coordinate_delta` along `dimension` changed the
    /// observed objective value by `value_delta`.
    fn observe(&mut self, dimension: usize, coordinate_delta: f64, value_delta: f64);
}
