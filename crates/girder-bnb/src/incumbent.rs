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

//! # Incumbent Plumbing
//!
//! Declares `IncumbentStore<D>`, a minimal interface the maximizer uses to
//! read the best certified value established elsewhere and to publish new
//! solutions. This abstracts over local (single-run) and shared
//! (multi-start / portfolio) use.
//!
//! Implementations:
//! - `NoSharedIncumbent<D>`: local only. The external certified value stays
//!   at `-inf` and publication is a no-op.
//! - `SharedIncumbentAdapter<'a, D>`: wraps a borrowed
//!   `girder_search::incumbent::SharedIncumbent<D>`; the external value
//!   mirrors the shared one, and publication attempts installation.

use girder_search::{incumbent::SharedIncumbent, solution::Solution};
use std::marker::PhantomData;

/// How a maximizer run coordinates with a (possibly shared) incumbent.
pub trait IncumbentStore<D> {
    /// The best certified value established outside this run.
    fn external_certified(&self) -> f64;

    /// Publishes a new local best solution.
    fn on_improvement(&self, solution: &Solution<D>);
}

/// An `IncumbentStore` that shares nothing. Use this for standalone runs.
#[repr(transparent)]
pub struct NoSharedIncumbent<D>(PhantomData<D>);

impl<D> Default for NoSharedIncumbent<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> NoSharedIncumbent<D> {
    /// Creates a new `NoSharedIncumbent` instance.
    #[inline(always)]
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<D> IncumbentStore<D> for NoSharedIncumbent<D> {
    #[inline(always)]
    fn external_certified(&self) -> f64 {
        f64::NEG_INFINITY
    }

    #[inline(always)]
    fn on_improvement(&self, _: &Solution<D>) {}
}

/// An `IncumbentStore` that coordinates runs through a `SharedIncumbent`.
#[repr(transparent)]
#[derive(Debug, Clone)]
pub struct SharedIncumbentAdapter<'a, D> {
    inner: &'a SharedIncumbent<D>,
}

impl<'a, D> SharedIncumbentAdapter<'a, D> {
    /// Creates a new `SharedIncumbentAdapter` that wraps the given
    /// `SharedIncumbent`.
    #[inline(always)]
    pub fn new(inner: &'a SharedIncumbent<D>) -> Self {
        Self { inner }
    }
}

impl<'a, D> IncumbentStore<D> for SharedIncumbentAdapter<'a, D>
where
    D: Clone,
{
    #[inline(always)]
    fn external_certified(&self) -> f64 {
        self.inner.certified_value()
    }

    #[inline(always)]
    fn on_improvement(&self, solution: &Solution<D>) {
        self.inner.try_install(solution);
    }
}
