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

//! # Adaptive Subdivision Integration
//!
//! Computes sound bounds on `∫ f` over an interval domain by adaptive
//! subdivision: a priority queue of panels ordered by error contribution
//! (`bound width × panel width`, worst first) is refined until the total gap
//! between the running lower and upper sums falls below the caller's
//! tolerance.
//!
//! ## Motivation
//!
//! A single interval bound over a wide domain is usually far too loose for
//! expectation computations. Splitting where the enclosure is loosest
//! concentrates effort exactly where it pays, and because every panel bound
//! is sound, the accumulated sums bracket the true integral at every step.
//!
//! ## Error taxonomy
//!
//! - A non-finite or NaN panel bound is a fatal input error: an unbounded
//!   sub-bound means the enclosure builder was handed invalid input.
//! - Exceeding the panel safety cap is a typed error carrying diagnostics
//!   rather than an endless loop on ill-conditioned integrands.
//! - Cancellation is not an error: the current bracket is returned with
//!   `completed == false`.

use crate::math::interval::Interval;
use std::{
    cmp::Ordering,
    collections::BinaryHeap,
    sync::atomic::{AtomicBool, Ordering as AtomicOrdering},
};

/// Default safety cap on the number of panels.
pub const DEFAULT_PANEL_BUDGET: u64 = 100_000;

/// A sound bracket on an integral, with subdivision diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegralBound {
    /// The interval guaranteed to contain the true integral.
    pub value: Interval,
    /// Number of panels in the final subdivision.
    pub panels: u64,
    /// `false` if cancellation stopped refinement before the tolerance was
    /// met; the bracket is still sound, just wider than requested.
    pub completed: bool,
}

impl std::fmt::Display for IntegralBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "IntegralBound(value: {}, panels: {}, completed: {})",
            self.value, self.panels, self.completed
        )
    }
}

/// Errors surfaced by adaptive integration.
#[derive(Debug, Clone, PartialEq)]
pub enum IntegrateError {
    /// A panel bound, its width-scaled contribution, or the running sums
    /// became infinite or NaN. The enclosure handed to the integrator does
    /// not usefully bound the integrand on the offending panel.
    NonFiniteBound {
        /// The panel that broke the sums.
        panel: Interval,
        /// The bound returned for that panel.
        bound: Interval,
    },
    /// The subdivision exceeded the safety cap before reaching the
    /// tolerance.
    PanelBudgetExceeded {
        /// The cap that was hit.
        budget: u64,
        /// The remaining gap between the upper and lower sums.
        remaining_error: f64,
        /// The tolerance that was requested.
        tolerance: f64,
    },
}

impl std::fmt::Display for IntegrateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntegrateError::NonFiniteBound { panel, bound } => {
                write!(
                    f,
                    "non-finite integrand bound {} over panel {}",
                    bound, panel
                )
            }
            IntegrateError::PanelBudgetExceeded {
                budget,
                remaining_error,
                tolerance,
            } => {
                write!(
                    f,
                    "panel budget of {} exhausted with error {} above tolerance {}",
                    budget, remaining_error, tolerance
                )
            }
        }
    }
}

impl std::error::Error for IntegrateError {}

/// A pending panel, ordered by error contribution (worst first).
struct Panel {
    input: Interval,
    /// The integrand bound over `input`.
    bound: Interval,
    /// `bound * input.width()`: this panel's contribution to the sums.
    contribution: Interval,
}

impl Panel {
    fn error(&self) -> f64 {
        self.contribution.width()
    }
}

impl PartialEq for Panel {
    fn eq(&self, other: &Self) -> bool {
        self.error() == other.error()
    }
}

impl Eq for Panel {}

impl PartialOrd for Panel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Panel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.error().total_cmp(&other.error())
    }
}

/// Adaptively integrates a sound interval bound over `domain`.
///
/// `bound(panel)` must contain the integrand's value for every point of
/// `panel`. Refinement stops when the gap between the running upper and
/// lower sums is at most `tolerance`, the optional `cancel` flag is raised
/// (normal return, `completed == false`), or the panel budget is exhausted
/// (typed error).
///
/// # Panics
///
/// Panics if `tolerance` is not positive.
///
/// # Examples
///
/// ```rust
/// # use girder_core::math::interval::Interval;
/// # use girder_core::math::integrate::integrate_adaptive;
///
/// // Bound x^2 over [0, 1]; the true integral is 1/3.
/// let result = integrate_adaptive(
///     Interval::new(0.0, 1.0),
///     1e-4,
///     None,
///     |panel| panel.square(),
/// ).unwrap();
/// assert!(result.value.contains(1.0 / 3.0));
/// assert!(result.value.width() <= 1e-4);
/// ```
pub fn integrate_adaptive<F>(
    domain: Interval,
    tolerance: f64,
    cancel: Option<&AtomicBool>,
    bound: F,
) -> Result<IntegralBound, IntegrateError>
where
    F: FnMut(Interval) -> Interval,
{
    integrate_adaptive_with_budget(domain, tolerance, DEFAULT_PANEL_BUDGET, cancel, bound)
}

/// [`integrate_adaptive`] with an explicit panel budget.
pub fn integrate_adaptive_with_budget<F>(
    domain: Interval,
    tolerance: f64,
    budget: u64,
    cancel: Option<&AtomicBool>,
    mut bound: F,
) -> Result<IntegralBound, IntegrateError>
where
    F: FnMut(Interval) -> Interval,
{
    assert!(
        tolerance > 0.0,
        "integrate_adaptive requires a positive tolerance, got {}",
        tolerance
    );

    if domain.is_point() {
        return Ok(IntegralBound {
            value: Interval::zero(),
            panels: 1,
            completed: true,
        });
    }

    let mut queue: BinaryHeap<Panel> = BinaryHeap::new();
    let mut lower_sum = 0.0;
    let mut upper_sum = 0.0;
    let mut panels: u64 = 1;

    let root = make_panel(domain, &mut bound)?;
    lower_sum += root.contribution.lower();
    upper_sum += root.contribution.upper();
    queue.push(root);

    while upper_sum - lower_sum > tolerance {
        if let Some(flag) = cancel {
            if flag.load(AtomicOrdering::Relaxed) {
                return Ok(IntegralBound {
                    value: Interval::new_unchecked(lower_sum, upper_sum),
                    panels,
                    completed: false,
                });
            }
        }
        if panels >= budget {
            return Err(IntegrateError::PanelBudgetExceeded {
                budget,
                remaining_error: upper_sum - lower_sum,
                tolerance,
            });
        }

        let worst = match queue.pop() {
            Some(panel) => panel,
            // Every panel is exact yet the gap persists; the sums cannot
            // tighten further, so report what we have.
            None => break,
        };

        let mid = worst.input.midpoint();
        if !(worst.input.lower() < mid && mid < worst.input.upper()) {
            // Bisection cannot make progress on this panel; its contribution
            // stays in the sums, and refinement continues elsewhere.
            continue;
        }

        lower_sum -= worst.contribution.lower();
        upper_sum -= worst.contribution.upper();

        let left = make_panel(Interval::new_unchecked(worst.input.lower(), mid), &mut bound)?;
        let right = make_panel(Interval::new_unchecked(mid, worst.input.upper()), &mut bound)?;
        lower_sum += left.contribution.lower() + right.contribution.lower();
        upper_sum += left.contribution.upper() + right.contribution.upper();

        if !lower_sum.is_finite() || !upper_sum.is_finite() {
            // Every contribution is finite, so the running sums overflowed
            // on this split; point the diagnostic at the heavier child.
            let culprit = if left.contribution.abs().upper() >= right.contribution.abs().upper() {
                left
            } else {
                right
            };
            return Err(IntegrateError::NonFiniteBound {
                panel: culprit.input,
                bound: culprit.bound,
            });
        }

        queue.push(left);
        queue.push(right);
        panels += 1;
    }

    Ok(IntegralBound {
        value: Interval::new_unchecked(lower_sum, upper_sum),
        panels,
        completed: true,
    })
}

fn make_panel<F>(input: Interval, bound: &mut F) -> Result<Panel, IntegrateError>
where
    F: FnMut(Interval) -> Interval,
{
    let value = bound(input);
    if value.is_nan() || !value.is_finite() || !input.width().is_finite() {
        return Err(IntegrateError::NonFiniteBound {
            panel: input,
            bound: value,
        });
    }
    let contribution = value * input.width();
    if !contribution.is_finite() {
        // A finite bound over a finite width can still overflow the product.
        return Err(IntegrateError::NonFiniteBound {
            panel: input,
            bound: value,
        });
    }
    Ok(Panel {
        input,
        bound: value,
        contribution,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;

    #[test]
    fn test_converges_on_square() {
        // Property: decreasing tolerances produce shrinking brackets that
        // all contain the true integral of x^2 over [0, 1].
        let truth = 1.0 / 3.0;
        let mut previous_width = f64::INFINITY;
        for tolerance in [1e-1, 1e-2, 1e-3, 1e-4] {
            let result = integrate_adaptive(
                Interval::new(0.0, 1.0),
                tolerance,
                None,
                |panel| panel.square(),
            )
            .unwrap();
            assert!(result.completed);
            assert!(
                result.value.contains(truth),
                "bracket {} lost 1/3 at tolerance {}",
                result.value,
                tolerance
            );
            assert!(result.value.width() <= tolerance);
            assert!(result.value.width() <= previous_width);
            previous_width = result.value.width();
        }
    }

    #[test]
    fn test_linear_integrand_is_cheap() {
        // f(x) = x over [0, 2]: integral 2. The secant bound per panel is
        // just the panel itself, which tightens quadratically.
        let result =
            integrate_adaptive(Interval::new(0.0, 2.0), 1e-6, None, |panel| panel).unwrap();
        assert!(result.value.contains(2.0));
        assert!(result.panels < DEFAULT_PANEL_BUDGET);
    }

    #[test]
    fn test_point_domain() {
        let result =
            integrate_adaptive(Interval::point(3.0), 1e-9, None, |panel| panel.exp()).unwrap();
        assert_eq!(result.value, Interval::zero());
        assert!(result.completed);
    }

    #[test]
    fn test_budget_exceeded_is_typed_error() {
        // A constant-width bound never tightens, so the budget must trip.
        let result = integrate_adaptive_with_budget(
            Interval::new(0.0, 1.0),
            1e-12,
            16,
            None,
            |_panel| Interval::new(0.0, 1.0),
        );
        match result {
            Err(IntegrateError::PanelBudgetExceeded {
                budget,
                remaining_error,
                tolerance,
            }) => {
                assert_eq!(budget, 16);
                assert!(remaining_error > tolerance);
            }
            other => panic!("expected PanelBudgetExceeded, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_bound_is_typed_error() {
        let result = integrate_adaptive(Interval::new(0.0, 1.0), 1e-3, None, |panel| {
            Interval::new(0.0, f64::INFINITY) * panel.width()
        });
        assert!(matches!(
            result,
            Err(IntegrateError::NonFiniteBound { .. })
        ));
    }

    #[test]
    fn test_overflowing_contribution_names_its_panel() {
        // The bound is finite but bound * width overflows.
        let domain = Interval::new(0.0, 4.0);
        let result = integrate_adaptive(domain, 1e-3, None, |_panel| {
            Interval::new(0.0, f64::MAX)
        });
        match result {
            Err(IntegrateError::NonFiniteBound { panel, bound }) => {
                assert_eq!(panel, domain);
                assert_eq!(bound, Interval::new(0.0, f64::MAX));
            }
            other => panic!("expected NonFiniteBound, got {:?}", other),
        }
    }

    #[test]
    fn test_overflowing_sums_name_the_offending_panel() {
        // Per-panel contributions stay finite, but the first split pushes
        // the running upper sum past f64::MAX. The diagnostic must carry the
        // actual sub-panel and its finite bound, not a whole-domain blame.
        let domain = Interval::new(0.0, 2.0);
        let result = integrate_adaptive(domain, 1e-3, None, |panel| {
            Interval::new(0.0, 9.0e307 / panel.width())
        });
        match result {
            Err(IntegrateError::NonFiniteBound { panel, bound }) => {
                assert!(domain.contains_interval(panel));
                assert!(panel.width() < domain.width());
                assert!(bound.is_finite());
            }
            other => panic!("expected NonFiniteBound, got {:?}", other),
        }
    }

    #[test]
    fn test_cancellation_returns_best_effort() {
        let cancel = AtomicBool::new(true);
        let result = integrate_adaptive(
            Interval::new(0.0, 1.0),
            1e-12,
            Some(&cancel),
            |panel| panel.square(),
        )
        .unwrap();
        assert!(!result.completed);
        assert!(result.value.contains(1.0 / 3.0));
    }

    #[test]
    #[should_panic(expected = "positive tolerance")]
    fn test_rejects_nonpositive_tolerance() {
        let _ = integrate_adaptive(Interval::new(0.0, 1.0), 0.0, None, |panel| panel);
    }

    #[test]
    fn test_error_display() {
        let err = IntegrateError::PanelBudgetExceeded {
            budget: 10,
            remaining_error: 0.5,
            tolerance: 0.1,
        };
        assert_eq!(
            format!("{}", err),
            "panel budget of 10 exhausted with error 0.5 above tolerance 0.1"
        );
    }
}
