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

//! # Girder Core
//!
//! Foundational numeric primitives for the Girder enclosure ecosystem:
//! rigorous interval arithmetic, dense vectors, axis-aligned regions, and an
//! adaptive-subdivision integrator. Everything in this crate is *sound*: a
//! returned interval always contains every value the exact computation could
//! take, including at infinities and through cancellation.
//!
//! ## Modules
//!
//! - `math::interval`: Closed real intervals `[lower, upper]` with a full
//!   sound arithmetic algebra, set operations, midpoint conventions at
//!   infinity, weighted averages over uncertain weights, and a recursive
//!   interval-extension helper.
//! - `math::vector`: A dense `f64` vector with the small set of linear
//!   operations higher-level crates need (inner product, scaling, linear
//!   combinations, elementwise products).
//! - `math::region`: Axis-aligned hyper-rectangles (one interval per
//!   dimension) with clone-on-split semantics, uniform sampling, and
//!   log-volume measurement.
//! - `math::integrate`: A priority-driven adaptive integrator shared by the
//!   interval and enclosure integration entry points.
//!
//! ## Purpose
//!
//! These primitives underpin probabilistic-inference computations where
//! inputs are themselves uncertain and a naive midpoint evaluation could
//! silently underestimate worst-case error. Higher-level crates build affine
//! enclosures and branch-and-bound searches on top of them.

pub mod math;
