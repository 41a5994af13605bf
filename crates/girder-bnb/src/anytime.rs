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

//! # Anytime Column Search
//!
//! The generic best-first engine under the maximizer. Candidate states are
//! bucketed by a quantized scale (log-volume for regions) into parallel
//! max-priority queues — the *columns* — and dequeuing round-robins across
//! the columns. A pure best-first order would grind on one promising coarse
//! region while fine, nearly-resolved regions starve; rotating across scales
//! keeps the incumbent improving at every granularity, which is what makes
//! the search a useful anytime algorithm.
//!
//! ## Pruning
//!
//! The engine maintains a global threshold `best certified value +
//! f_tolerance`, monotone non-decreasing, folded together with any external
//! certified value the space reports (a shared incumbent). A state whose
//! bound upper end does not exceed the threshold can never improve the
//! answer by more than the tolerance and is discarded, at admission and
//! again at dequeue (the threshold may have risen since the state was
//! queued).

use crate::node::SearchNode;
use girder_search::monitor::search_monitor::SearchCommand;
use std::{
    collections::{BTreeMap, BinaryHeap},
    ops::Bound,
};

/// Natural-log width of one scale bucket.
const SCALE_BUCKET_WIDTH: f64 = 1.0;

/// The search space the engine explores: states, their bounds, and their
/// successors. Implementations also carry the steering hooks (monitor
/// polling, improvement publication) so the engine stays oblivious to where
/// commands come from.
pub trait ColumnSpace {
    type State;

    /// The most the state's subtree could still deliver. Sound: never below
    /// any certified value reachable within the state.
    fn bound_upper(&self, state: &Self::State) -> f64;

    /// The value certified at the state's candidate point.
    fn certified(&self, state: &Self::State) -> f64;

    /// The scale key used for column bucketing.
    fn scale(&self, state: &Self::State) -> f64;

    /// Whether expanding the state further can still pay off.
    fn is_resolved(&self, state: &Self::State) -> bool;

    /// Expands the state, appending successors to `children`.
    fn expand(&mut self, state: &Self::State, children: &mut Vec<Self::State>);

    /// Polled at every dequeue and every child admission.
    fn command(&mut self) -> SearchCommand {
        SearchCommand::Continue
    }

    /// A certified value established outside this search (a shared
    /// incumbent); folded into the pruning threshold at every dequeue.
    fn external_certified(&self) -> f64 {
        f64::NEG_INFINITY
    }

    /// Called when a state improves on the best certified value so far.
    fn on_improvement(&mut self, _state: &Self::State) {}
}

/// What a finished (or aborted) engine run produced.
#[derive(Debug, Clone)]
pub struct ColumnSearchReport<S> {
    /// The state with the best certified value, if any state was admitted.
    pub best: Option<S>,
    /// `false` if a command terminated the run before the columns drained.
    pub completed: bool,
    /// The terminating command's reason, when not completed.
    pub abort_reason: Option<String>,
    /// States expanded into children.
    pub expanded: u64,
    /// States discarded against the pruning threshold.
    pub pruned: u64,
    /// Improvements of the best certified value.
    pub improvements: u64,
    /// Largest number of queued states at any point.
    pub peak_queue: usize,
}

/// The bucketed round-robin best-first engine. See the module docs.
pub struct AnytimeColumnSearch<C: ColumnSpace> {
    space: C,
    f_tolerance: f64,
}

impl<C: ColumnSpace> AnytimeColumnSearch<C> {
    /// Creates an engine over `space`.
    ///
    /// # Panics
    ///
    /// Panics if `f_tolerance` is negative or not finite.
    pub fn new(space: C, f_tolerance: f64) -> Self {
        assert!(
            f_tolerance.is_finite() && f_tolerance >= 0.0,
            "AnytimeColumnSearch: f_tolerance must be finite and nonnegative, got {}",
            f_tolerance
        );
        Self { space, f_tolerance }
    }

    /// Returns the underlying space.
    #[inline]
    pub fn space(&self) -> &C {
        &self.space
    }

    /// Consumes the engine, returning the space.
    #[inline]
    pub fn into_space(self) -> C {
        self.space
    }

    /// Runs the search to completion (or until a command stops it),
    /// starting from `roots`.
    pub fn run(&mut self, roots: Vec<C::State>) -> ColumnSearchReport<C::State>
    where
        C::State: Clone,
    {
        let mut report = ColumnSearchReport {
            best: None,
            completed: true,
            abort_reason: None,
            expanded: 0,
            pruned: 0,
            improvements: 0,
            peak_queue: 0,
        };
        let mut buckets: BTreeMap<i64, BinaryHeap<SearchNode<C::State>>> = BTreeMap::new();
        let mut queued: usize = 0;
        let mut best_certified = f64::NEG_INFINITY;
        let mut threshold = f64::NEG_INFINITY;

        for root in roots {
            let certified = self.space.certified(&root);
            if certified > best_certified {
                best_certified = certified;
                threshold = threshold.max(certified + self.f_tolerance);
                self.space.on_improvement(&root);
                report.improvements += 1;
                report.best = Some(root.clone());
            }
            let upper = self.space.bound_upper(&root);
            if upper > threshold {
                let key = bucket_key(self.space.scale(&root));
                buckets
                    .entry(key)
                    .or_default()
                    .push(SearchNode::new(upper, certified, root));
                queued += 1;
            } else {
                report.pruned += 1;
            }
        }
        report.peak_queue = report.peak_queue.max(queued);

        let mut cursor: Option<i64> = None;
        let mut children: Vec<C::State> = Vec::new();

        'search: loop {
            if let SearchCommand::Terminate(reason) = self.space.command() {
                report.completed = false;
                report.abort_reason = Some(reason);
                break 'search;
            }

            // Round-robin: first column strictly after the cursor, wrapping.
            let key = match cursor {
                Some(c) => buckets
                    .range((Bound::Excluded(c), Bound::Unbounded))
                    .next()
                    .map(|(k, _)| *k)
                    .or_else(|| buckets.keys().next().copied()),
                None => buckets.keys().next().copied(),
            };
            let Some(key) = key else {
                // Every column drained: converged.
                break 'search;
            };
            cursor = Some(key);

            let popped = buckets.get_mut(&key).and_then(|heap| {
                heap.pop().map(|node| (node, heap.is_empty()))
            });
            let Some((node, now_empty)) = popped else {
                buckets.remove(&key);
                continue;
            };
            if now_empty {
                buckets.remove(&key);
            }
            queued -= 1;

            // The shared incumbent may have moved the bar.
            threshold = threshold.max(self.space.external_certified() + self.f_tolerance);

            if node.upper() <= threshold {
                report.pruned += 1;
                continue;
            }
            if self.space.is_resolved(node.state()) {
                continue;
            }

            report.expanded += 1;
            children.clear();
            self.space.expand(node.state(), &mut children);

            for child in children.drain(..) {
                if let SearchCommand::Terminate(reason) = self.space.command() {
                    report.completed = false;
                    report.abort_reason = Some(reason);
                    break 'search;
                }
                let certified = self.space.certified(&child);
                if certified > best_certified {
                    best_certified = certified;
                    threshold = threshold.max(certified + self.f_tolerance);
                    self.space.on_improvement(&child);
                    report.improvements += 1;
                    report.best = Some(child.clone());
                }
                let upper = self.space.bound_upper(&child);
                if upper > threshold {
                    let key = bucket_key(self.space.scale(&child));
                    buckets
                        .entry(key)
                        .or_default()
                        .push(SearchNode::new(upper, certified, child));
                    queued += 1;
                } else {
                    report.pruned += 1;
                }
            }
            report.peak_queue = report.peak_queue.max(queued);
        }

        report
    }
}

/// Quantizes a scale into a column key. Point regions have scale `-inf`
/// (smallest column) and mixed point/unbounded regions produce NaN, which
/// lands in the zero column rather than poisoning the map.
fn bucket_key(scale: f64) -> i64 {
    if scale.is_nan() {
        return 0;
    }
    let quantized = (scale / SCALE_BUCKET_WIDTH).floor();
    if quantized <= i64::MIN as f64 {
        i64::MIN
    } else if quantized >= i64::MAX as f64 {
        i64::MAX
    } else {
        quantized as i64
    }
}
