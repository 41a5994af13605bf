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

/// Statistics collected while a search runs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchStatistics {
    /// Number of candidate states expanded.
    pub nodes_expanded: u64,
    /// Number of candidate states discarded because their bound could not
    /// beat the incumbent.
    pub nodes_pruned: u64,
    /// Number of region splits performed.
    pub splits: u64,
    /// Number of new best solutions installed.
    pub improvements: u64,
    /// Largest number of pending candidates at any point.
    pub peak_queue_size: usize,
    /// Total duration of the search.
    pub wall_time: std::time::Duration,
}

impl SearchStatistics {
    /// Creates zeroed statistics.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Search Statistics:")?;
        writeln!(f, "  Nodes Expanded: {}", self.nodes_expanded)?;
        writeln!(f, "  Nodes Pruned: {}", self.nodes_pruned)?;
        writeln!(f, "  Splits: {}", self.splits)?;
        writeln!(f, "  Improvements: {}", self.improvements)?;
        writeln!(f, "  Peak Queue Size: {}", self.peak_queue_size)?;
        writeln!(
            f,
            "  Wall Time (secs): {:.3}",
            self.wall_time.as_secs_f64()
        )
    }
}
