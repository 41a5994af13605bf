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
use girder_core::math::region::Region;

/// What a monitor wants the search to do next.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    #[default]
    Continue,
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// Observes and steers a running search.
///
/// The engine calls `on_enter_search` once with the root region,
/// `on_improvement` for every new best solution, `on_step` at each node
/// expansion, and `on_exit_search` once at the end. `search_command` is
/// polled at every decision point and must therefore be cheap.
pub trait SearchMonitor<D> {
    fn name(&self) -> &str;
    fn on_enter_search(&mut self, root: &Region);
    fn on_exit_search(&mut self);
    fn on_improvement(&mut self, solution: &Solution<D>);
    fn on_step(&mut self);
    fn search_command(&self) -> SearchCommand;
}

impl<D> std::fmt::Debug for dyn SearchMonitor<D> + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

impl<D> std::fmt::Display for dyn SearchMonitor<D> + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::SearchCommand;

    #[test]
    fn test_command_display() {
        assert_eq!(format!("{}", SearchCommand::Continue), "Continue");
        assert_eq!(
            format!("{}", SearchCommand::Terminate("time limit".to_string())),
            "Terminate: time limit"
        );
    }

    #[test]
    fn test_default_is_continue() {
        assert_eq!(SearchCommand::default(), SearchCommand::Continue);
    }
}
