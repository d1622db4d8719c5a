//! Model builder: resolved problem → 0/1 linear program.
//!
//! # Formulation
//!
//! Binary `x[w][d]` = worker `w` on duty on day `d`.
//!
//! Hard constraints:
//! - Coverage: `Σ_w x[w][d] = 1`
//! - Workload (real workers): `min ≤ Σ_d x[w][d] ≤ max`
//! - Rest (real workers): `Σ x[w][t..t+R] ≤ 1` for every full window
//! - Fixed cells: `x = 0` or `x = 1`
//!
//! Objective terms (minimized):
//! - Day cost `Σ c[w][d]·x[w][d]`
//! - Target deviations via slack pairs: `Σ x − over + under = target`,
//!   cost `(over + under)·weight`
//! - Weekend shortfall/excess with separate weights
//! - Density windows: indicator `z` per (worker, window); dense workers
//!   get `K·z ≤ Σ window` and a reward, sparse workers get
//!   `Σ window − (K−1) ≤ (D−K+1)·z` and a penalty
//!
//! All absolute values are linearized, so any MILP backend applies.
//!
//! Variables and constraints are registered in a fixed order (workers in
//! problem order, days ascending), so identical problems produce
//! identical models.

use good_lp::{constraint, variable, variables, Constraint, Expression, ProblemVariables, Variable};
use serde::Serialize;
use tracing::debug;

use crate::config::OptimizerConfig;
use crate::models::{FixedAssignment, RosterProblem};

/// Linear objective kept as explicit terms so it can be re-evaluated
/// against any solution.
#[derive(Debug, Clone, Default)]
pub struct LinearObjective {
    terms: Vec<(Variable, f64)>,
}

impl LinearObjective {
    /// Adds `coefficient · var`. Zero coefficients are skipped.
    pub fn add(&mut self, var: Variable, coefficient: f64) {
        if coefficient != 0.0 {
            self.terms.push((var, coefficient));
        }
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the objective has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Builds the `good_lp` expression.
    pub fn expression(&self) -> Expression {
        self.terms
            .iter()
            .fold(Expression::from(0.0), |acc, &(v, c)| acc + c * v)
    }

    /// Evaluates the objective with the given variable values.
    pub fn evaluate(&self, value: impl Fn(Variable) -> f64) -> f64 {
        self.terms.iter().map(|&(v, c)| c * value(v)).sum()
    }
}

/// Model size by constraint family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModelStats {
    /// Binary variables (assignment and window indicators).
    pub binary_vars: usize,
    /// Continuous slack variables.
    pub slack_vars: usize,
    /// Coverage constraints.
    pub coverage: usize,
    /// Min/max workload constraints.
    pub workload: usize,
    /// Rest-window constraints.
    pub rest: usize,
    /// Fixed-cell constraints.
    pub fixed: usize,
    /// Target-deviation balance constraints.
    pub targets: usize,
    /// Density/sparsity indicator constraints.
    pub windows: usize,
}

impl ModelStats {
    /// Total number of variables.
    pub fn variable_count(&self) -> usize {
        self.binary_vars + self.slack_vars
    }

    /// Total number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.coverage + self.workload + self.rest + self.fixed + self.targets + self.windows
    }
}

/// An assembled, not yet solved, roster model.
pub struct RosterModel {
    pub(crate) vars: ProblemVariables,
    pub(crate) constraints: Vec<Constraint>,
    pub(crate) objective: LinearObjective,
    /// Assignment variables, `x[worker][day]`.
    pub(crate) x: Vec<Vec<Variable>>,
    stats: ModelStats,
}

impl RosterModel {
    /// Model size.
    pub fn stats(&self) -> &ModelStats {
        &self.stats
    }

    /// Objective terms.
    pub fn objective(&self) -> &LinearObjective {
        &self.objective
    }

    /// Assignment variable of a cell.
    pub fn assignment_var(&self, worker: usize, day: usize) -> Option<Variable> {
        self.x.get(worker).and_then(|row| row.get(day)).copied()
    }
}

/// Builds a [`RosterModel`] from a resolved problem.
///
/// # Example
/// ```
/// use u_roster::config::OptimizerConfig;
/// use u_roster::milp::RosterModelBuilder;
/// use u_roster::models::{Day, RosterProblem, RosterRequest, Worker};
///
/// let config = OptimizerConfig::default();
/// let request = RosterRequest::new(
///     vec![Worker::new("Ann"), Worker::new("Bob")],
///     (0..4).map(|i| Day::new(i, "")).collect(),
/// );
/// let problem = RosterProblem::resolve(&request, &config).unwrap();
/// let model = RosterModelBuilder::new(&problem, &config).build();
///
/// // 3 workers (Void included) × 4 days
/// assert_eq!(model.stats().binary_vars, 12);
/// assert_eq!(model.stats().coverage, 4);
/// ```
pub struct RosterModelBuilder<'a> {
    problem: &'a RosterProblem,
    config: &'a OptimizerConfig,
}

impl<'a> RosterModelBuilder<'a> {
    /// Creates a builder.
    pub fn new(problem: &'a RosterProblem, config: &'a OptimizerConfig) -> Self {
        Self { problem, config }
    }

    /// Builds the model.
    pub fn build(&self) -> RosterModel {
        let problem = self.problem;
        let days = problem.day_count();
        let mut vars = variables!();
        let mut constraints = Vec::new();
        let mut objective = LinearObjective::default();
        let mut stats = ModelStats::default();

        let x: Vec<Vec<Variable>> = problem
            .workers
            .iter()
            .map(|w| {
                (0..days)
                    .map(|d| vars.add(variable().binary().name(format!("x_{}_{d}", w.id))))
                    .collect()
            })
            .collect();
        stats.binary_vars += problem.worker_count() * days;

        for (w, row) in x.iter().enumerate() {
            for (d, &var) in row.iter().enumerate() {
                objective.add(var, problem.cost[w][d]);
            }
        }

        for d in 0..days {
            let covered = sum(x.iter().map(|row| row[d]));
            constraints.push(constraint!(covered == 1.0));
            stats.coverage += 1;
        }

        let rest_windows = windows(days, self.config.windows.rest_window, true);
        for (w, worker) in problem.workers.iter().enumerate() {
            if worker.is_void {
                continue;
            }
            let total = sum(x[w].iter().copied());
            let min = f64::from(worker.min_shifts);
            let max = f64::from(worker.max_shifts);
            constraints.push(constraint!(total.clone() >= min));
            constraints.push(constraint!(total <= max));
            stats.workload += 2;

            for &(start, end) in &rest_windows {
                let on_duty = sum(x[w][start..end].iter().copied());
                constraints.push(constraint!(on_duty <= 1.0));
                stats.rest += 1;
            }
        }

        for cell in &problem.fixed {
            let var = x[cell.worker][cell.day];
            let value = match cell.fixed {
                FixedAssignment::Off => 0.0,
                FixedAssignment::On => 1.0,
            };
            constraints.push(constraint!(var == value));
            stats.fixed += 1;
        }

        let weights = &self.config.weights;
        let weekdays: Vec<usize> = problem.weekdays().collect();
        let weekend: Vec<usize> = problem.weekend_days().collect();
        for (w, worker) in problem.workers.iter().enumerate() {
            if worker.is_void {
                continue;
            }
            let mut deviation = |target: u32, subset: &[usize], under_weight: f64, over_weight: f64| {
                let over = vars.add(variable().min(0.0));
                let under = vars.add(variable().min(0.0));
                let total = sum(subset.iter().map(|&d| x[w][d]));
                let balance = total - over + under;
                constraints.push(constraint!(balance == f64::from(target)));
                objective.add(over, over_weight);
                objective.add(under, under_weight);
                stats.slack_vars += 2;
                stats.targets += 1;
            };

            if let Some(target) = worker.preferred_shifts {
                let all: Vec<usize> = (0..days).collect();
                let p = weights.not_preferred_shifts;
                deviation(target, &all, p, p);
            }
            if let Some(target) = worker.preferred_weekday_shifts {
                let p = weights.not_preferred_weekday;
                deviation(target, &weekdays, p, p);
            }
            if let Some(target) = worker.preferred_weekend_shifts {
                deviation(target, &weekend, weights.missing_weekend, weights.excess_weekend);
            }
        }

        let rules = &self.config.windows;
        let span = rules.density_window;
        let threshold = rules.density_threshold;
        let density_windows = windows(days, span, false);
        for (w, worker) in problem.workers.iter().enumerate() {
            if worker.is_void || !(worker.prefer_dense || worker.prefer_sparse) {
                continue;
            }
            for &(start, end) in &density_windows {
                let window = || sum(x[w][start..end].iter().copied());
                if worker.prefer_dense {
                    let z = vars.add(variable().binary());
                    let qualifies = (threshold as f64) * z - window();
                    constraints.push(constraint!(qualifies <= 0.0));
                    objective.add(z, -weights.dense_window_reward);
                    stats.binary_vars += 1;
                    stats.windows += 1;
                }
                if worker.prefer_sparse {
                    let z = vars.add(variable().binary());
                    let excess = window() - ((span - threshold + 1) as f64) * z;
                    constraints.push(constraint!(excess <= (threshold - 1) as f64));
                    objective.add(z, weights.sparse_window_penalty);
                    stats.binary_vars += 1;
                    stats.windows += 1;
                }
            }
        }

        debug!(
            workers = problem.worker_count(),
            days,
            variables = stats.variable_count(),
            constraints = stats.constraint_count(),
            "roster model built"
        );

        RosterModel {
            vars,
            constraints,
            objective,
            x,
            stats,
        }
    }
}

fn sum(vars: impl Iterator<Item = Variable>) -> Expression {
    vars.fold(Expression::from(0.0), |acc, v| acc + v)
}

/// Half-open `[start, end)` windows of length `len` fully inside `0..days`.
///
/// With `cover_short` set, a horizon shorter than `len` yields one window
/// spanning the whole horizon. Single-day windows are never returned.
pub(crate) fn windows(days: usize, len: usize, cover_short: bool) -> Vec<(usize, usize)> {
    if days >= len {
        if len < 2 {
            return Vec::new();
        }
        (0..=days - len).map(|start| (start, start + len)).collect()
    } else if cover_short && days >= 2 {
        vec![(0, days)]
    } else {
        Vec::new()
    }
}
