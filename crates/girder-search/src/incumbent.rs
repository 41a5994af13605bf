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

//! # Shared Incumbent (Best Solution Holder)
//!
//! A concurrent container for the best solution discovered so far across
//! one or more searches. It exposes a fast, lock-free certified lower bound
//! via an atomic and stores the actual `Solution<D>` behind a `Mutex` as the
//! source of truth.
//!
//! ## Motivation
//!
//! - Fast heuristic checks: a cheap atomic certified bound short-circuits
//!   attempts to install obviously worse candidates without locking.
//! - Correctness by locking: the authoritative incumbent is protected by a
//!   `Mutex`, ensuring consistent updates even under contention.
//! - Simple sentinel: the certified bound starts at `-inf`, meaning "no
//!   incumbent yet"; we maximize, so every real solution beats it.

use crate::solution::Solution;
use std::sync::{atomic::AtomicU64, Mutex};

/// A concurrent holder for the best (incumbent) solution found during
/// search.
///
/// The certified value is stored as `f64` bit patterns in an `AtomicU64`
/// (there is no `AtomicF64`); it is only ever read back through
/// `f64::from_bits`, so the indirection is invisible to callers. The atomic
/// is loaded and stored with `Ordering::Relaxed`: it serves as a heuristic
/// to short-circuit work, and all correctness-sensitive state is
/// synchronized via the `Mutex`.
#[derive(Debug)]
pub struct SharedIncumbent<D> {
    /// Bits of the incumbent's certified value, `-inf` when empty.
    certified: AtomicU64,

    /// The incumbent solution, the source of truth under contention.
    solution: Mutex<Option<Solution<D>>>,
}

impl<D> Default for SharedIncumbent<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> std::fmt::Display for SharedIncumbent<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Incumbent(certified: {})", self.certified_value())
    }
}

impl<D> SharedIncumbent<D> {
    /// Creates a new shared incumbent with no solution installed.
    #[inline]
    pub fn new() -> Self {
        SharedIncumbent {
            certified: AtomicU64::new(f64::NEG_INFINITY.to_bits()),
            solution: Mutex::new(None),
        }
    }

    /// Returns the current certified value, `-inf` when no solution has
    /// been installed yet. Monotone non-decreasing over the incumbent's
    /// lifetime.
    #[inline]
    pub fn certified_value(&self) -> f64 {
        f64::from_bits(self.certified.load(std::sync::atomic::Ordering::Relaxed))
    }

    /// Returns a snapshot of the current incumbent solution, if any.
    #[inline]
    pub fn snapshot(&self) -> Option<Solution<D>>
    where
        D: Clone,
    {
        let guard = self.solution.lock().unwrap();
        guard.clone()
    }

    /// Attempts to install the given candidate as the new incumbent.
    /// Returns `true` if the candidate was installed, `false` otherwise.
    /// Only strictly better certified values are admitted.
    pub fn try_install(&self, candidate: &Solution<D>) -> bool
    where
        D: Clone,
    {
        let candidate_value = candidate.certified_value();

        // We are maximizing, so higher is better.
        if candidate_value <= self.certified_value() {
            return false;
        }

        let mut guard = self.solution.lock().unwrap();
        // Another thread might have installed a better solution while we
        // were waiting for the lock; compare against the actual incumbent,
        // not the atomic hint read earlier.
        if let Some(current) = guard.as_ref() {
            if candidate_value <= current.certified_value() {
                return false;
            }
        }

        *guard = Some(candidate.clone());
        self.certified.store(
            candidate_value.to_bits(),
            std::sync::atomic::Ordering::Relaxed,
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::SharedIncumbent;
    use crate::solution::Solution;
    use girder_core::math::{interval::Interval, region::Region, vector::DenseVector};

    fn solution(value: f64) -> Solution<()> {
        Solution::new(
            Region::point(&DenseVector::from_vec(vec![0.0])),
            (),
            Interval::point(value),
        )
    }

    #[test]
    fn test_empty_incumbent_reports_negative_infinity() {
        let incumbent: SharedIncumbent<()> = SharedIncumbent::new();
        assert_eq!(incumbent.certified_value(), f64::NEG_INFINITY);
        assert!(incumbent.snapshot().is_none());
    }

    #[test]
    fn test_installs_strictly_better_candidates_only() {
        let incumbent: SharedIncumbent<()> = SharedIncumbent::new();

        assert!(incumbent.try_install(&solution(1.0)));
        assert_eq!(incumbent.certified_value(), 1.0);

        // Equal is not better.
        assert!(!incumbent.try_install(&solution(1.0)));
        assert!(!incumbent.try_install(&solution(0.5)));
        assert_eq!(incumbent.certified_value(), 1.0);

        assert!(incumbent.try_install(&solution(2.0)));
        assert_eq!(incumbent.certified_value(), 2.0);
        assert_eq!(incumbent.snapshot().unwrap().certified_value(), 2.0);
    }

    #[test]
    fn test_certified_value_is_monotone_under_contention() {
        let incumbent: std::sync::Arc<SharedIncumbent<()>> =
            std::sync::Arc::new(SharedIncumbent::new());

        std::thread::scope(|scope| {
            for offset in 0..4 {
                let incumbent = incumbent.clone();
                scope.spawn(move || {
                    for step in 0..50 {
                        incumbent.try_install(&solution((step * 4 + offset) as f64));
                    }
                });
            }
        });

        assert_eq!(incumbent.certified_value(), 199.0);
    }
}
