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

//! # Certified Global Maximization
//!
//! The branch-and-bound maximizer over interval-bounded objectives. The
//! `Maximizer` is the reusable engine configuration; each run builds a
//! search session that adapts the objective, the branching strategy, the
//! caller's monitor, and the incumbent store into a column space for the
//! anytime engine. When a run converges, the returned solution's certified
//! value is within the configured tolerance of the global maximum over the
//! root region.

use crate::{
    anytime::{AnytimeColumnSearch, ColumnSpace},
    branching::{sensitivity::SensitivityBranching, Branching},
    incumbent::{IncumbentStore, NoSharedIncumbent, SharedIncumbentAdapter},
    objective::Objective,
    result::MaximizerOutcome,
    state::RegionState,
    stats::MaximizerStatistics,
};
use girder_core::math::region::Region;
use girder_search::{
    incumbent::SharedIncumbent,
    monitor::search_monitor::{SearchCommand, SearchMonitor},
};

/// A certified branch-and-bound global maximizer.
///
/// The maximizer repeatedly splits the root region, bounds the objective
/// over each piece, evaluates midpoints for certified values, and prunes
/// pieces whose bound cannot beat the incumbent by more than `f_tolerance`.
/// Because every bound is sound, convergence yields a certificate: no point
/// of the root region beats the answer by more than the tolerance.
#[derive(Debug, Clone, Copy)]
pub struct Maximizer {
    f_tolerance: f64,
}

impl Maximizer {
    /// Creates a maximizer with the given certification tolerance.
    ///
    /// # Panics
    ///
    /// Panics if `f_tolerance` is negative or not finite.
    #[inline]
    pub fn new(f_tolerance: f64) -> Self {
        assert!(
            f_tolerance.is_finite() && f_tolerance >= 0.0,
            "Maximizer::new: f_tolerance must be finite and nonnegative, got {}",
            f_tolerance
        );
        Self { f_tolerance }
    }

    /// The certification tolerance.
    #[inline]
    pub fn f_tolerance(&self) -> f64 {
        self.f_tolerance
    }

    /// Maximizes `objective` over `root`. This variant shares nothing and
    /// acts as a standalone, single-threaded run.
    #[inline]
    pub fn maximize<O, M>(
        &self,
        root: &Region,
        objective: &mut O,
        monitor: M,
    ) -> MaximizerOutcome<O::Data>
    where
        O: Objective,
        O::Data: Clone,
        M: SearchMonitor<O::Data>,
    {
        self.maximize_internal(root, objective, monitor, NoSharedIncumbent::new())
    }

    /// Maximizes `objective` over `root`, coordinating with a shared
    /// incumbent: certified values established by other runs raise this
    /// run's pruning threshold, and improvements found here are published
    /// back.
    #[inline]
    pub fn maximize_with_incumbent<O, M>(
        &self,
        root: &Region,
        objective: &mut O,
        monitor: M,
        incumbent: &SharedIncumbent<O::Data>,
    ) -> MaximizerOutcome<O::Data>
    where
        O: Objective,
        O::Data: Clone,
        M: SearchMonitor<O::Data>,
    {
        self.maximize_internal(root, objective, monitor, SharedIncumbentAdapter::new(incumbent))
    }

    fn maximize_internal<O, M, I>(
        &self,
        root: &Region,
        objective: &mut O,
        monitor: M,
        store: I,
    ) -> MaximizerOutcome<O::Data>
    where
        O: Objective,
        O::Data: Clone,
        M: SearchMonitor<O::Data>,
        I: IncumbentStore<O::Data>,
    {
        let start = std::time::Instant::now();
        let root_state = RegionState::evaluate(root.clone(), objective);
        let root_bound = root_state.bound();

        let mut session = MaximizerSearchSession {
            objective,
            branching: SensitivityBranching::new(root.dimension()),
            monitor,
            store,
            f_tolerance: self.f_tolerance,
            degenerate_splits: 0,
        };
        session.monitor.on_enter_search(root);

        let mut engine = AnytimeColumnSearch::new(session, self.f_tolerance);
        let report = engine.run(vec![root_state]);
        let mut session = engine.into_space();
        session.monitor.on_exit_search();

        let mut statistics = MaximizerStatistics::new(root_bound);
        statistics.nodes_expanded = report.expanded;
        statistics.nodes_pruned = report.pruned;
        statistics.degenerate_splits = session.degenerate_splits;
        statistics.improvements = report.improvements;
        statistics.peak_queue_size = report.peak_queue;
        statistics.wall_time = start.elapsed();

        let solution = report.best.map(|state| state.to_solution());
        match report.abort_reason {
            Some(reason) => MaximizerOutcome::aborted(reason, solution, statistics),
            None => MaximizerOutcome::converged(solution, statistics),
        }
    }
}

/// Maximizes `objective` over `root` with the default engine configuration.
/// The convenience entry point for one-shot searches.
pub fn find_maximum<O, M>(
    root: &Region,
    f_tolerance: f64,
    objective: &mut O,
    monitor: M,
) -> MaximizerOutcome<O::Data>
where
    O: Objective,
    O::Data: Clone,
    M: SearchMonitor<O::Data>,
{
    Maximizer::new(f_tolerance).maximize(root, objective, monitor)
}

/// Per-run state: adapts the objective, branching strategy, monitor, and
/// incumbent store into a column space for the anytime engine.
struct MaximizerSearchSession<'a, O, M, I>
where
    O: Objective,
{
    objective: &'a mut O,
    branching: SensitivityBranching,
    monitor: M,
    store: I,
    f_tolerance: f64,
    degenerate_splits: u64,
}

impl<'a, O, M, I> ColumnSpace for MaximizerSearchSession<'a, O, M, I>
where
    O: Objective,
    O::Data: Clone,
    M: SearchMonitor<O::Data>,
    I: IncumbentStore<O::Data>,
{
    type State = RegionState<O::Data>;

    fn bound_upper(&self, state: &Self::State) -> f64 {
        state.bound().upper()
    }

    fn certified(&self, state: &Self::State) -> f64 {
        state.certified_value()
    }

    fn scale(&self, state: &Self::State) -> f64 {
        state.region().log_volume()
    }

    fn is_resolved(&self, state: &Self::State) -> bool {
        state.is_resolved(self.f_tolerance)
    }

    fn expand(&mut self, state: &Self::State, children: &mut Vec<Self::State>) {
        self.monitor.on_step();

        let Some(dimension) = self.branching.choose_dimension(state.region()) else {
            self.degenerate_splits += 1;
            return;
        };
        let splits = state.region().split_thirds(dimension);
        if splits.len() < 2 {
            self.degenerate_splits += 1;
            return;
        }

        for region in splits {
            let child = RegionState::evaluate(region, self.objective);
            let coordinate_delta = child.midpoint()[dimension] - state.midpoint()[dimension];
            let value_delta = child.value().midpoint() - state.value().midpoint();
            self.branching.observe(dimension, coordinate_delta, value_delta);
            children.push(child);
        }
    }

    fn command(&mut self) -> SearchCommand {
        self.monitor.search_command()
    }

    fn external_certified(&self) -> f64 {
        self.store.external_certified()
    }

    fn on_improvement(&mut self, state: &Self::State) {
        let solution = state.to_solution();
        self.monitor.on_improvement(&solution);
        self.store.on_improvement(&solution);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::FnObjective;
    use girder_core::math::{interval::Interval, region::Region, vector::DenseVector};
    use girder_search::{
        monitor::{interrupt::InterruptMonitor, no_op::NoOpMonitor, progress::ProgressMonitor},
        result::TerminationReason,
    };
    use std::sync::atomic::{AtomicBool, Ordering};

    /// f(x, y) = -(x - 1)^2 - (y + 2)^2, maximum 0 at (1, -2).
    fn paraboloid() -> FnObjective<impl FnMut(&Region) -> Interval> {
        FnObjective::new(|region: &Region| {
            -(region.interval(0) - 1.0).square() - (region.interval(1) + 2.0).square()
        })
    }

    fn square_10() -> Region {
        Region::from_intervals(&[Interval::new(-10.0, 10.0), Interval::new(-10.0, 10.0)])
    }

    #[test]
    fn test_finds_the_global_maximum_of_a_paraboloid() {
        let mut objective = paraboloid();
        let outcome = find_maximum(&square_10(), 1e-3, &mut objective, NoOpMonitor::new());

        assert_eq!(outcome.termination_reason(), &TerminationReason::Converged);
        assert!(outcome.result().is_certified());

        let solution = outcome.solution().expect("a maximum exists");
        // Convergence certifies the value within the tolerance of 0.
        assert!(solution.certified_value() >= -1e-3);
        assert!(solution.value().upper() <= 1e-9);

        // The witness midpoint is close to (1, -2).
        let witness = solution.region().midpoint();
        assert!((witness[0] - 1.0).abs() < 0.05, "x = {}", witness[0]);
        assert!((witness[1] + 2.0).abs() < 0.05, "y = {}", witness[1]);

        let stats = outcome.statistics();
        assert!(stats.root_bound.contains(0.0));
        assert!(stats.nodes_expanded > 0);
        assert!(stats.nodes_pruned > 0);
        assert!(stats.improvements > 0);
    }

    #[test]
    fn test_point_root_converges_without_splitting() {
        let mut objective = paraboloid();
        let root = Region::point(&DenseVector::from_vec(vec![1.0, -2.0]));
        let outcome = find_maximum(&root, 1e-6, &mut objective, NoOpMonitor::new());

        assert!(outcome.result().is_certified());
        assert_eq!(outcome.statistics().nodes_expanded, 0);
        assert_eq!(outcome.solution().unwrap().certified_value(), 0.0);
    }

    #[test]
    fn test_interrupt_yields_a_best_effort_result() {
        let flag = AtomicBool::new(false);
        flag.store(true, Ordering::Relaxed);

        let mut objective = paraboloid();
        let outcome = find_maximum(
            &square_10(),
            1e-3,
            &mut objective,
            InterruptMonitor::new(&flag),
        );

        assert!(!outcome.result().is_certified());
        match outcome.termination_reason() {
            TerminationReason::Aborted(reason) => {
                assert_eq!(reason, "Interrupt signal received");
            }
            other => panic!("expected Aborted, got {:?}", other),
        }
        // The root was evaluated before the first poll, so a best-effort
        // witness exists.
        assert!(outcome.solution().is_some());
    }

    #[test]
    fn test_progress_monitor_observes_the_run() {
        let mut improvements: Vec<f64> = Vec::new();
        {
            let monitor = ProgressMonitor::new(|solution: &girder_search::solution::Solution<()>| {
                improvements.push(solution.certified_value());
            });
            let mut objective = paraboloid();
            let outcome = find_maximum(&square_10(), 1e-3, &mut objective, monitor);
            assert!(outcome.result().is_certified());
        }

        assert!(!improvements.is_empty());
        // Improvements arrive in strictly increasing certified order.
        for pair in improvements.windows(2) {
            assert!(pair[0] < pair[1], "{} then {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_shared_incumbent_raises_the_pruning_bar() {
        let shared: SharedIncumbent<()> = SharedIncumbent::new();
        let maximizer = Maximizer::new(1e-3);

        // First run establishes the global maximum near 0.
        let mut objective = paraboloid();
        let first =
            maximizer.maximize_with_incumbent(&square_10(), &mut objective, NoOpMonitor::new(), &shared);
        assert!(first.result().is_certified());
        assert!(shared.certified_value() >= -1e-3);

        // A second run over a region whose values are all far below the
        // shared bound prunes its root outright.
        let hopeless = Region::from_intervals(&[
            Interval::new(5.0, 6.0),
            Interval::new(5.0, 6.0),
        ]);
        let mut objective = paraboloid();
        let second = maximizer.maximize_with_incumbent(
            &hopeless,
            &mut objective,
            NoOpMonitor::new(),
            &shared,
        );
        assert_eq!(second.statistics().nodes_expanded, 0);
        // The shared incumbent kept the better witness.
        assert!(shared.certified_value() >= -1e-3);
    }

    #[test]
    #[should_panic(expected = "f_tolerance must be finite")]
    fn test_rejects_invalid_tolerance() {
        Maximizer::new(f64::NAN);
    }
}
