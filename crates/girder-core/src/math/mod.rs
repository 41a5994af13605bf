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

//! # Math Primitives
//!
//! Rigorous numeric building blocks for enclosure computation.
//!
//! ## Submodules
//!
//! - `interval`: A closed real interval `[lower, upper]` with validation,
//!   sound arithmetic (`+ - * /`, negation, `abs`, `square`, `sqrt`, `log`,
//!   `exp`), set operations (intersection/hull/containment), midpoint
//!   conventions at infinity, weighted averages over interval weights, and
//!   recursive interval extension of arbitrary functions.
//! - `vector`: Dense `f64` vectors with indexed access, inner products,
//!   scaling, and linear-combination setters.
//! - `region`: Axis-aligned hyper-rectangles with containment, midpoint,
//!   sampling, log-volume, and clone-on-split operations.
//! - `integrate`: Adaptive subdivision of an interval domain driven by a
//!   priority queue ordered by error contribution.
//!
//! ## Motivation
//!
//! Bounding expectations of nonlinear functions under uncertain inputs
//! requires every intermediate bound to be provably valid. These modules
//! keep that guarantee mechanical: constructors validate invariants, and
//! arithmetic never narrows below the true result set.

pub mod integrate;
pub mod interval;
pub mod region;
pub mod vector;
