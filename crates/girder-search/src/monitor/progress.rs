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

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use crate::solution::Solution;
use girder_core::math::region::Region;

/// A monitor that forwards every new best solution to a caller-supplied
/// callback and keeps simple progress counters.
///
/// The callback runs synchronously on the search thread; anything expensive
/// belongs on the caller's side of a channel.
pub struct ProgressMonitor<F> {
    callback: F,
    improvements: u64,
    steps: u64,
}

impl<F> ProgressMonitor<F> {
    /// Creates a progress monitor invoking `callback` on each improvement.
    #[inline]
    pub fn new(callback: F) -> Self {
        Self {
            callback,
            improvements: 0,
            steps: 0,
        }
    }

    /// Number of improvements observed so far.
    #[inline]
    pub fn improvements(&self) -> u64 {
        self.improvements
    }

    /// Number of steps observed so far.
    #[inline]
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl<F> std::fmt::Debug for ProgressMonitor<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressMonitor")
            .field("improvements", &self.improvements)
            .field("steps", &self.steps)
            .finish()
    }
}

impl<D, F> SearchMonitor<D> for ProgressMonitor<F>
where
    F: FnMut(&Solution<D>),
{
    fn name(&self) -> &str {
        "ProgressMonitor"
    }

    fn on_enter_search(&mut self, _root: &Region) {
        self.improvements = 0;
        self.steps = 0;
    }

    fn on_exit_search(&mut self) {}

    fn on_improvement(&mut self, solution: &Solution<D>) {
        self.improvements += 1;
        (self.callback)(solution);
    }

    fn on_step(&mut self) {
        self.steps += 1;
    }

    fn search_command(&self) -> SearchCommand {
        SearchCommand::Continue
    }
}
