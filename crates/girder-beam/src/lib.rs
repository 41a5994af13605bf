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

//! # Girder Beam
//!
//! Affine enclosures of functions over interval inputs. A `Beam` is a slope
//! vector plus an interval offset such that, for every point of the input
//! region it was built over, the true function value lies within
//! `slope . x + offset`. The offset's width is the enclosure's looseness.
//!
//! ## Modules
//!
//! - `beam`: The `Beam` type itself — construction, output intervals,
//!   composition through computation graphs (`compose`, `compose_partial`),
//!   input-dimension alignment (`pad_left`, `pad_right`, `permute`), and
//!   exact integration of the affine form over one input dimension.
//! - `builders`: Closed-form near-optimal enclosures for elementary
//!   functions (`exp`, `square`, `reciprocal`, `abs`, `min`/`max` against a
//!   constant) and a derivative-free sampled builder for arbitrary
//!   nondecreasing functions (used for CDF bounding).
//! - `bilinear`: Enclosures of bilinear/ratio expressions — the product of
//!   two uncertain scalars and the two-entry weighted average — evaluated at
//!   sign corners plus interior stationary points, because a corner-only
//!   bound is unsound for non-monotone bilinear forms.
//! - `distribution`: The quantile/CDF provider interface consumed by the
//!   expectation routines, with a Gaussian implementation and generic
//!   truncation.
//! - `expectation`: Sound expectation bounding by transforming a domain
//!   integral into a probability-space integral driven by the adaptive
//!   integrator from `girder-core`.
//!
//! ## Contract
//!
//! Every builder and combinator preserves soundness: violating it (NaN
//! bounds, infinite offsets where finiteness is required) is a fatal
//! precondition violation, not a recoverable error.

pub mod beam;
pub mod bilinear;
pub mod builders;
pub mod distribution;
pub mod expectation;
