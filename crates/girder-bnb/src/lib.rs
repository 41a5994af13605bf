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

//! # Girder Branch and Bound
//!
//! A certified branch-and-bound global maximizer over interval-bounded
//! objectives. An [`objective::Objective`] supplies a sound enclosure of a
//! function over any axis-aligned box; the [`bnb::Maximizer`] splits the
//! search region, prunes pieces that provably cannot improve the answer,
//! and converges to a solution whose certified (midpoint) value is within
//! a caller-chosen tolerance of the true global maximum.
//!
//! ## Motivation
//!
//! Sample-based optimizers return a good point with no guarantee that a
//! much better one was missed. When the objective's enclosures are sound —
//! built from interval arithmetic, never excluding a true value — the
//! branch-and-bound certificate is unconditional: at convergence, no point
//! of the root region beats the returned value by more than the tolerance,
//! even for noisy or discontinuous objectives.

pub mod anytime;
pub mod bnb;
pub mod branching;
pub mod incumbent;
pub mod node;
pub mod objective;
pub mod result;
pub mod state;
pub mod stats;
