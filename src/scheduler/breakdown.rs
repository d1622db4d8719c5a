//! Objective decomposition of a solved roster.
//!
//! Recomputes every objective term directly from the day assignments, so a
//! roster can be audited without access to solver internals.
//!
//! # Terms
//!
//! | Term | Definition |
//! |------|-----------|
//! | Base | Σ day cost of real workers on duty |
//! | Uncovered | Σ day cost of `Void` on duty |
//! | Overall deviation | Σ \|shifts − preferred\| · weight |
//! | Weekday deviation | Σ \|weekday shifts − preferred\| · weight |
//! | Weekend shortfall | Σ max(0, preferred − weekend shifts) · weight |
//! | Weekend excess | Σ max(0, weekend shifts − preferred) · weight |
//! | Dense reward | −reward per qualifying window of a dense worker |
//! | Sparse penalty | penalty per qualifying window of a sparse worker |
//!
//! A window qualifies when it holds at least `density_threshold` duty days.

use serde::Serialize;

use crate::config::OptimizerConfig;
use crate::milp::windows;
use crate::models::{Roster, RosterProblem};

/// Objective terms of a roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CostBreakdown {
    /// Day cost of real workers.
    pub base: f64,
    /// Day cost of `Void` assignments.
    pub uncovered: f64,
    /// Overall-target deviation cost.
    pub overall_deviation: f64,
    /// Weekday-target deviation cost.
    pub weekday_deviation: f64,
    /// Weekend shortfall cost.
    pub weekend_shortfall: f64,
    /// Weekend excess cost.
    pub weekend_excess: f64,
    /// Dense-window reward (zero or negative).
    pub dense_reward: f64,
    /// Sparse-window penalty.
    pub sparse_penalty: f64,
}

impl CostBreakdown {
    /// Computes the breakdown of `roster` under `problem` and `config`.
    ///
    /// Roster entries naming workers outside the problem are ignored.
    pub fn evaluate(problem: &RosterProblem, roster: &Roster, config: &OptimizerConfig) -> Self {
        let days = problem.day_count();
        let mut on_duty = vec![vec![false; days]; problem.worker_count()];
        for entry in &roster.entries {
            if let Some(w) = problem.worker_index(&entry.worker_id) {
                if entry.day < days {
                    on_duty[w][entry.day] = true;
                }
            }
        }

        let weights = &config.weights;
        let rules = &config.windows;
        let density_windows = windows(days, rules.density_window, false);
        let mut breakdown = Self::default();

        for (w, worker) in problem.workers.iter().enumerate() {
            let row = &on_duty[w];
            let day_cost: f64 = (0..days).filter(|&d| row[d]).map(|d| problem.cost[w][d]).sum();
            if worker.is_void {
                breakdown.uncovered += day_cost;
                continue;
            }
            breakdown.base += day_cost;

            if let Some(target) = worker.preferred_shifts {
                let shifts = duty_count(row, 0..days);
                breakdown.overall_deviation +=
                    (shifts - f64::from(target)).abs() * weights.not_preferred_shifts;
            }
            if let Some(target) = worker.preferred_weekday_shifts {
                let shifts = duty_count(row, problem.weekdays());
                breakdown.weekday_deviation +=
                    (shifts - f64::from(target)).abs() * weights.not_preferred_weekday;
            }
            if let Some(target) = worker.preferred_weekend_shifts {
                let gap = duty_count(row, problem.weekend_days()) - f64::from(target);
                if gap < 0.0 {
                    breakdown.weekend_shortfall += -gap * weights.missing_weekend;
                } else {
                    breakdown.weekend_excess += gap * weights.excess_weekend;
                }
            }

            if worker.prefer_dense || worker.prefer_sparse {
                let qualifying = density_windows
                    .iter()
                    .filter(|&&(start, end)| {
                        row[start..end].iter().filter(|&&on| on).count() >= rules.density_threshold
                    })
                    .count() as f64;
                if worker.prefer_dense {
                    breakdown.dense_reward -= qualifying * weights.dense_window_reward;
                }
                if worker.prefer_sparse {
                    breakdown.sparse_penalty += qualifying * weights.sparse_window_penalty;
                }
            }
        }

        breakdown
    }

    /// Sum of all terms.
    pub fn total(&self) -> f64 {
        self.base
            + self.uncovered
            + self.overall_deviation
            + self.weekday_deviation
            + self.weekend_shortfall
            + self.weekend_excess
            + self.dense_reward
            + self.sparse_penalty
    }

    /// Sum of the soft-preference terms.
    pub fn preference_cost(&self) -> f64 {
        self.total() - self.base - self.uncovered
    }
}

fn duty_count(row: &[bool], subset: impl Iterator<Item = usize>) -> f64 {
    subset.filter(|&d| row[d]).count() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Day, RosterEntry, RosterRequest, Worker, VOID_WORKER_ID};

    fn roster(assignment: &[&str]) -> Roster {
        let entries = assignment
            .iter()
            .enumerate()
            .map(|(day, id)| RosterEntry {
                day,
                label: String::new(),
                worker_id: id.to_string(),
            })
            .collect();
        Roster::new(entries, Vec::new(), 0.0)
    }

    fn evaluate(request: &RosterRequest, assignment: &[&str]) -> CostBreakdown {
        let config = OptimizerConfig::default();
        let problem = RosterProblem::resolve(request, &config).unwrap();
        CostBreakdown::evaluate(&problem, &roster(assignment), &config)
    }

    #[test]
    fn test_base_and_uncovered() {
        let request = RosterRequest::new(
            vec![Worker::new("Ann"), Worker::new("Bob")],
            (0..3).map(|i| Day::new(i, "")).collect(),
        )
        .with_cell("Ann", 0, "willing");
        let b = evaluate(&request, &["Ann", "Bob", VOID_WORKER_ID]);
        assert!((b.base - (14.0 + 15.0)).abs() < 1e-9);
        assert!((b.uncovered - 150.0).abs() < 1e-9);
        assert!((b.total() - 179.0).abs() < 1e-9);
        assert_eq!(b.preference_cost(), 0.0);
    }

    #[test]
    fn test_target_deviations() {
        let request = RosterRequest::new(
            vec![
                Worker::new("Ann").with_preferred_shifts(3),
                Worker::new("Bob")
                    .with_preferred_weekday_shifts(0)
                    .with_preferred_weekend_shifts(2),
            ],
            vec![
                Day::new(0, ""),
                Day::new(1, ""),
                Day::new(2, ""),
                Day::weekend(3, ""),
                Day::weekend(4, ""),
            ],
        );
        let b = evaluate(&request, &["Bob", "Ann", "Bob", "Bob", "Ann"]);
        // Ann: 2 shifts vs 3
        assert!((b.overall_deviation - 4.0).abs() < 1e-9);
        // Bob: 2 weekday shifts vs 0
        assert!((b.weekday_deviation - 8.0).abs() < 1e-9);
        // Bob: 1 weekend shift vs 2
        assert!((b.weekend_shortfall - 7.0).abs() < 1e-9);
        assert_eq!(b.weekend_excess, 0.0);
    }

    #[test]
    fn test_weekend_excess() {
        let request = RosterRequest::new(
            vec![Worker::new("Ann").with_preferred_weekend_shifts(0)],
            vec![Day::weekend(0, ""), Day::weekend(1, "")],
        );
        let b = evaluate(&request, &["Ann", VOID_WORKER_ID]);
        assert!((b.weekend_excess - 4.0).abs() < 1e-9);
        assert_eq!(b.weekend_shortfall, 0.0);
    }

    #[test]
    fn test_density_windows() {
        let request = RosterRequest::new(
            vec![Worker::new("Ann").dense(), Worker::new("Bob").sparse(), Worker::new("Cid")],
            (0..6).map(|i| Day::new(i, "")).collect(),
        );
        // Ann on 1 and 4: both windows [0,5) and [1,6) hold 2 duties
        // Bob on 0 and 3: only [0,5) does
        let b = evaluate(&request, &["Bob", "Ann", "Cid", "Bob", "Ann", "Cid"]);
        assert!((b.dense_reward + 0.2).abs() < 1e-9);
        assert!((b.sparse_penalty - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_worker_ignored() {
        let request = RosterRequest::new(
            vec![Worker::new("Ann")],
            (0..2).map(|i| Day::new(i, "")).collect(),
        );
        let b = evaluate(&request, &["Ann", "Zed"]);
        assert!((b.total() - 15.0).abs() < 1e-9);
    }
}
