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

use crate::solution::Solution;

/// What a finished search produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult<D> {
    /// The search exhausted its candidate set: the solution's certified
    /// value is within tolerance of the global maximum.
    Certified(Solution<D>),
    /// The search was terminated early; the solution is the best found, with
    /// no optimality claim.
    BestEffort(Solution<D>),
    /// The search terminated before evaluating any candidate.
    Empty,
}

impl<D> SearchResult<D> {
    /// The best solution carried by the result, if any.
    #[inline]
    pub fn solution(&self) -> Option<&Solution<D>> {
        match self {
            SearchResult::Certified(solution) | SearchResult::BestEffort(solution) => {
                Some(solution)
            }
            SearchResult::Empty => None,
        }
    }

    /// Returns `true` if the result carries an optimality certificate.
    #[inline]
    pub fn is_certified(&self) -> bool {
        matches!(self, SearchResult::Certified(_))
    }
}

impl<D> std::fmt::Display for SearchResult<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchResult::Certified(solution) => {
                write!(f, "Certified(value={})", solution.value())
            }
            SearchResult::BestEffort(solution) => {
                write!(f, "BestEffort(value={})", solution.value())
            }
            SearchResult::Empty => write!(f, "Empty"),
        }
    }
}

/// Why a search stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The candidate set was exhausted; nothing left could beat the
    /// incumbent by more than the tolerance.
    Converged,
    /// A monitor commanded termination, with its stated reason.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::Converged => write!(f, "Converged"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use girder_core::math::{interval::Interval, region::Region, vector::DenseVector};

    fn solution(value: f64) -> Solution<()> {
        Solution::new(
            Region::point(&DenseVector::from_vec(vec![0.0])),
            (),
            Interval::point(value),
        )
    }

    #[test]
    fn test_solution_accessor() {
        assert!(SearchResult::<()>::Empty.solution().is_none());
        let result = SearchResult::Certified(solution(3.0));
        assert!(result.is_certified());
        assert_eq!(result.solution().unwrap().certified_value(), 3.0);
        assert!(!SearchResult::BestEffort(solution(3.0)).is_certified());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", SearchResult::<()>::Empty), "Empty");
        assert_eq!(format!("{}", TerminationReason::Converged), "Converged");
        assert_eq!(
            format!(
                "{}",
                TerminationReason::Aborted("Interrupt signal received".to_string())
            ),
            "Aborted: Interrupt signal received"
        );
    }
}
