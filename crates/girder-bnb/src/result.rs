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

use crate::stats::MaximizerStatistics;
use girder_search::{
    result::{SearchResult, TerminationReason},
    solution::Solution,
};

/// Everything one maximizer run reports back: the result, why the run
/// stopped, and its statistics.
#[derive(Debug, Clone)]
pub struct MaximizerOutcome<D> {
    result: SearchResult<D>,
    termination_reason: TerminationReason,
    statistics: MaximizerStatistics,
}

impl<D> MaximizerOutcome<D> {
    /// A run that drained its candidate set. The solution, when present, is
    /// certified within the run's tolerance.
    pub fn converged(solution: Option<Solution<D>>, statistics: MaximizerStatistics) -> Self {
        let result = match solution {
            Some(solution) => SearchResult::Certified(solution),
            None => SearchResult::Empty,
        };
        Self {
            result,
            termination_reason: TerminationReason::Converged,
            statistics,
        }
    }

    /// A run a monitor stopped early; the solution, when present, carries no
    /// optimality claim.
    pub fn aborted<R>(
        reason: R,
        solution: Option<Solution<D>>,
        statistics: MaximizerStatistics,
    ) -> Self
    where
        R: Into<String>,
    {
        let result = match solution {
            Some(solution) => SearchResult::BestEffort(solution),
            None => SearchResult::Empty,
        };
        Self {
            result,
            termination_reason: TerminationReason::Aborted(reason.into()),
            statistics,
        }
    }

    /// The search result.
    #[inline]
    pub fn result(&self) -> &SearchResult<D> {
        &self.result
    }

    /// Why the run stopped.
    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    /// The run's statistics.
    #[inline]
    pub fn statistics(&self) -> &MaximizerStatistics {
        &self.statistics
    }

    /// The best solution carried by the result, if any.
    #[inline]
    pub fn solution(&self) -> Option<&Solution<D>> {
        self.result.solution()
    }
}

impl<D> std::fmt::Display for MaximizerOutcome<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MaximizerOutcome(result: {}, reason: {})",
            self.result, self.termination_reason
        )
    }
}
