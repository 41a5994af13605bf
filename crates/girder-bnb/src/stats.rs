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

use girder_core::math::interval::Interval;

/// Statistics collected by one maximizer run.
#[derive(Debug, Clone, PartialEq)]
pub struct MaximizerStatistics {
    /// The objective bound over the root region, before any splitting.
    pub root_bound: Interval,
    /// Candidate regions expanded into children.
    pub nodes_expanded: u64,
    /// Candidate regions discarded against the pruning threshold.
    pub nodes_pruned: u64,
    /// Expansions that produced no children (point dimensions, split points
    /// clamping onto boundaries).
    pub degenerate_splits: u64,
    /// Improvements of the best certified value.
    pub improvements: u64,
    /// Largest number of queued regions at any point.
    pub peak_queue_size: usize,
    /// Total duration of the run.
    pub wall_time: std::time::Duration,
}

impl MaximizerStatistics {
    /// Creates zeroed statistics for a run whose root bound is known.
    pub fn new(root_bound: Interval) -> Self {
        Self {
            root_bound,
            nodes_expanded: 0,
            nodes_pruned: 0,
            degenerate_splits: 0,
            improvements: 0,
            peak_queue_size: 0,
            wall_time: std::time::Duration::ZERO,
        }
    }
}

impl std::fmt::Display for MaximizerStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Maximizer Statistics:")?;
        writeln!(f, "  Root Bound: {}", self.root_bound)?;
        writeln!(f, "  Nodes Expanded: {}", self.nodes_expanded)?;
        writeln!(f, "  Nodes Pruned: {}", self.nodes_pruned)?;
        writeln!(f, "  Degenerate Splits: {}", self.degenerate_splits)?;
        writeln!(f, "  Improvements: {}", self.improvements)?;
        writeln!(f, "  Peak Queue Size: {}", self.peak_queue_size)?;
        writeln!(
            f,
            "  Wall Time (secs): {:.3}",
            self.wall_time.as_secs_f64()
        )
    }
}
