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

use std::cmp::Ordering;

/// A queue element: a search state with its ordering keys cached so the
/// priority queue never re-derives them.
///
/// Ordered max-first by the state's bound upper end, with the certified
/// value as tie-break, both through `f64::total_cmp` so NaN cannot poison
/// the heap invariant.
#[derive(Debug, Clone)]
pub struct SearchNode<S> {
    upper: f64,
    certified: f64,
    state: S,
}

impl<S> SearchNode<S> {
    #[inline]
    pub fn new(upper: f64, certified: f64, state: S) -> Self {
        Self {
            upper,
            certified,
            state,
        }
    }

    /// The bound's upper end — the most this subtree could still deliver.
    #[inline]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// The certified value at the state's candidate point.
    #[inline]
    pub fn certified(&self) -> f64 {
        self.certified
    }

    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    #[inline]
    pub fn into_state(self) -> S {
        self.state
    }
}

impl<S> PartialEq for SearchNode<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<S> Eq for SearchNode<S> {}

impl<S> PartialOrd for SearchNode<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for SearchNode<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.upper
            .total_cmp(&other.upper)
            .then(self.certified.total_cmp(&other.certified))
    }
}
