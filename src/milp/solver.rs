//! Solver adapter: dispatches a [`RosterModel`] to a `good_lp` backend.
//!
//! The adapter performs exactly one solve per call and never retries.
//! Infeasibility is a [`SolveStatus`], not an error, so callers can tell
//! "no feasible roster" apart from a backend failure.
//!
//! # Backends
//! - `highs`: HiGHS, behind the default `highs` feature.
//! - `microlp`: pure-Rust branch-and-bound, always compiled.
//!
//! Both honor the configured time limit. The status comes from the backend:
//! a limit hit with an incumbent is [`SolveStatus::TimeLimited`] with a
//! solution, a limit hit before any incumbent is `TimeLimited` without one.

use std::time::{Duration, Instant};

use good_lp::solvers::microlp::microlp;
use good_lp::{
    Constraint, ResolutionError, Solution, SolutionStatus, SolverModel, Variable, WithTimeLimit,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::builder::{LinearObjective, RosterModel};
use crate::config::{OptimizerConfig, SolverBackend};
use crate::error::RosterError;

/// Backend messages meaning the time limit expired before any incumbent.
const NO_INCUMBENT: [&str; 2] = [
    "NoSolutionFound",
    "Time limit reached before finding a feasible solution",
];

/// Tolerance on the per-day coverage sum of an incumbent.
const COVERAGE_TOLERANCE: f64 = 1e-6;

/// Outcome classification of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// Optimal within the backend's gap tolerance.
    Optimal,
    /// The time limit expired; a solution is attached only if the backend
    /// found an incumbent.
    TimeLimited,
    /// No assignment satisfies the hard constraints.
    Infeasible,
}

impl SolveStatus {
    /// Whether this status can carry a solution.
    pub fn has_solution(&self) -> bool {
        !matches!(self, SolveStatus::Infeasible)
    }
}

/// Raw variable values of a solved model.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSolution {
    /// Objective value.
    pub objective: f64,
    /// Assignment values, `x[worker][day]`.
    pub x: Vec<Vec<f64>>,
}

impl RawSolution {
    /// Whether every day sums to one worker on duty.
    fn covers_every_day(&self) -> bool {
        let days = self.x.first().map_or(0, Vec::len);
        (0..days).all(|d| {
            let on_duty: f64 = self.x.iter().filter_map(|row| row.get(d)).sum();
            (on_duty - 1.0).abs() <= COVERAGE_TOLERANCE
        })
    }
}

/// Result of one solve.
#[derive(Debug, Clone)]
pub struct SolverOutcome {
    /// Status.
    pub status: SolveStatus,
    /// Values, present when the backend returned an incumbent.
    pub solution: Option<RawSolution>,
    /// Wall-clock solve time.
    pub elapsed: Duration,
}

/// Runs the configured backend on a model.
#[derive(Debug, Clone)]
pub struct RosterSolver {
    backend: SolverBackend,
    time_limit_secs: Option<f64>,
}

impl RosterSolver {
    /// Creates a solver from the optimizer configuration.
    pub fn new(config: &OptimizerConfig) -> Self {
        Self {
            backend: config.backend,
            time_limit_secs: config.time_limit_secs,
        }
    }

    /// Solves the model once.
    ///
    /// # Errors
    /// `BackendUnavailable` if the backend is not compiled in, `Unbounded`
    /// or `Solver` for backend failures. Infeasibility and an expired time
    /// limit are returned as `Ok` with the matching [`SolveStatus`].
    pub fn solve(&self, model: RosterModel) -> Result<SolverOutcome, RosterError> {
        if self.backend == SolverBackend::Highs && !cfg!(feature = "highs") {
            return Err(RosterError::BackendUnavailable(self.backend.name().to_string()));
        }
        let RosterModel {
            vars,
            constraints,
            objective,
            x,
            ..
        } = model;
        let expression = objective.expression();
        let started = Instant::now();
        if self.time_limit_secs.is_none() {
            warn!(backend = self.backend.name(), "solving without a time limit");
        }
        info!(
            backend = self.backend.name(),
            time_limit_secs = ?self.time_limit_secs,
            "solving roster model"
        );

        let result = match self.backend {
            SolverBackend::Microlp => {
                let mut problem = vars.minimise(expression).using(microlp);
                if let Some(limit) = self.time_limit_secs {
                    problem = problem.with_time_limit(limit);
                }
                run(problem, constraints, &x, &objective)
            }
            SolverBackend::Highs => self.run_highs(vars, expression, constraints, &x, &objective),
        };
        let elapsed = started.elapsed();

        match result {
            Ok((SolveStatus::TimeLimited, solution)) if !solution.covers_every_day() => {
                warn!(?elapsed, "time limit reached; incumbent does not cover every day");
                Ok(Self::without_incumbent(elapsed))
            }
            Ok((status, solution)) => {
                info!(?status, objective = solution.objective, ?elapsed, "roster solved");
                Ok(SolverOutcome {
                    status,
                    solution: Some(solution),
                    elapsed,
                })
            }
            Err(ResolutionError::Infeasible) => {
                info!(?elapsed, "roster model is infeasible");
                Ok(SolverOutcome {
                    status: SolveStatus::Infeasible,
                    solution: None,
                    elapsed,
                })
            }
            Err(ResolutionError::Other(reason))
                if self.time_limit_secs.is_some() && NO_INCUMBENT.contains(&reason) =>
            {
                warn!(?elapsed, "time limit reached before any feasible roster");
                Ok(Self::without_incumbent(elapsed))
            }
            Err(ResolutionError::Unbounded) => Err(RosterError::Unbounded),
            Err(err) => Err(RosterError::Solver(err.to_string())),
        }
    }

    fn without_incumbent(elapsed: Duration) -> SolverOutcome {
        SolverOutcome {
            status: SolveStatus::TimeLimited,
            solution: None,
            elapsed,
        }
    }

    #[cfg(feature = "highs")]
    fn run_highs(
        &self,
        vars: good_lp::ProblemVariables,
        expression: good_lp::Expression,
        constraints: Vec<Constraint>,
        x: &[Vec<Variable>],
        objective: &LinearObjective,
    ) -> Result<(SolveStatus, RawSolution), ResolutionError> {
        use good_lp::solvers::highs::highs;

        // zero gap: slack and indicator values sit at their optimum
        let mut problem = vars
            .minimise(expression)
            .using(highs)
            .set_option("mip_rel_gap", 0.0);
        if let Some(limit) = self.time_limit_secs {
            problem = problem.with_time_limit(limit);
        }
        run(problem, constraints, x, objective)
    }

    #[cfg(not(feature = "highs"))]
    fn run_highs(
        &self,
        _vars: good_lp::ProblemVariables,
        _expression: good_lp::Expression,
        _constraints: Vec<Constraint>,
        _x: &[Vec<Variable>],
        _objective: &LinearObjective,
    ) -> Result<(SolveStatus, RawSolution), ResolutionError> {
        Err(ResolutionError::Str(format!(
            "backend '{}' requires the `highs` feature",
            SolverBackend::Highs.name()
        )))
    }
}

fn run<M>(
    mut problem: M,
    constraints: Vec<Constraint>,
    x: &[Vec<Variable>],
    objective: &LinearObjective,
) -> Result<(SolveStatus, RawSolution), ResolutionError>
where
    M: SolverModel<Error = ResolutionError>,
{
    for c in constraints {
        problem.add_constraint(c);
    }
    let solution = problem.solve()?;
    let status = match solution.status() {
        SolutionStatus::Optimal | SolutionStatus::GapLimit => SolveStatus::Optimal,
        SolutionStatus::TimeLimit => SolveStatus::TimeLimited,
    };
    let values = x
        .iter()
        .map(|row| row.iter().map(|&v| solution.value(v)).collect())
        .collect();
    Ok((
        status,
        RawSolution {
            objective: objective.evaluate(|v| solution.value(v)),
            x: values,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::milp::RosterModelBuilder;
    use crate::models::{CellMarker, Day, RosterProblem, RosterRequest, Worker};

    fn solve(request: &RosterRequest, config: &OptimizerConfig) -> SolverOutcome {
        let problem = RosterProblem::resolve(request, config).unwrap();
        let model = RosterModelBuilder::new(&problem, config).build();
        RosterSolver::new(config).solve(model).unwrap()
    }

    fn days(n: usize) -> Vec<Day> {
        (0..n).map(|i| Day::new(i, "")).collect()
    }

    #[test]
    fn test_solve_optimal() {
        let config = OptimizerConfig::default();
        let request = RosterRequest::new(
            vec![Worker::new("Ann"), Worker::new("Bob"), Worker::new("Cid")],
            days(6),
        );
        let outcome = solve(&request, &config);
        assert_eq!(outcome.status, SolveStatus::Optimal);
        let sol = outcome.solution.unwrap();
        // 3 workers cover 6 days at base cost, Void unused
        assert!((sol.objective - 6.0 * 15.0).abs() < 1e-6);
        for d in 0..6 {
            let on: f64 = sol.x.iter().map(|row| row[d]).sum();
            assert!((on - 1.0).abs() < 1e-6);
            assert!(sol.x[3][d] < 0.5);
        }
    }

    #[test]
    fn test_conflicting_fixed_cells_infeasible() {
        let config = OptimizerConfig::default();
        let request = RosterRequest::new(vec![Worker::new("Ann"), Worker::new("Bob")], days(4))
            .with_cell("Ann", 1, CellMarker::Must)
            .with_cell("Ann", 1, CellMarker::MustNot);
        let outcome = solve(&request, &config);
        assert_eq!(outcome.status, SolveStatus::Infeasible);
        assert!(!outcome.status.has_solution());
        assert!(outcome.solution.is_none());
    }

    #[test]
    fn test_forced_days_violating_rest_infeasible() {
        let config = OptimizerConfig::default();
        let request = RosterRequest::new(vec![Worker::new("Ann"), Worker::new("Bob")], days(5))
            .with_cell("Ann", 1, CellMarker::Must)
            .with_cell("Ann", 2, CellMarker::Must);
        assert_eq!(solve(&request, &config).status, SolveStatus::Infeasible);
    }

    #[test]
    fn test_min_shifts_beyond_horizon_infeasible() {
        let config = OptimizerConfig::default();
        let request = RosterRequest::new(vec![Worker::new("Ann").with_min_shifts(3)], days(5));
        assert_eq!(solve(&request, &config).status, SolveStatus::Infeasible);
    }

    #[test]
    fn test_microlp_optimal() {
        let config = OptimizerConfig::default().with_backend(SolverBackend::Microlp);
        let request = RosterRequest::new(
            vec![Worker::new("Ann").dense(), Worker::new("Bob"), Worker::new("Cid")],
            days(6),
        );
        let outcome = solve(&request, &config);
        assert_eq!(outcome.status, SolveStatus::Optimal);
        let sol = outcome.solution.unwrap();
        assert!(sol.covers_every_day());
        assert!((sol.objective - (6.0 * 15.0 - 0.2)).abs() < 1e-6);
    }

    #[test]
    fn test_time_limit_without_incumbent() {
        let config = OptimizerConfig::default()
            .with_backend(SolverBackend::Microlp)
            .with_time_limit(1e-9);
        let request = RosterRequest::new(
            (0..6).map(|i| Worker::new(format!("W{i}")).dense()).collect(),
            days(20),
        );
        let outcome = solve(&request, &config);
        assert_eq!(outcome.status, SolveStatus::TimeLimited);
        assert!(outcome.status.has_solution());
        assert!(outcome.solution.is_none());
    }

    #[cfg(feature = "highs")]
    #[test]
    fn test_highs_time_limit() {
        let config = OptimizerConfig::default().with_time_limit(1e-6);
        let request = RosterRequest::new(
            (0..8).map(|i| Worker::new(format!("W{i}")).dense()).collect(),
            days(31),
        );
        let outcome = solve(&request, &config);
        assert!(matches!(
            outcome.status,
            SolveStatus::TimeLimited | SolveStatus::Optimal
        ));
        if let Some(sol) = &outcome.solution {
            assert!(sol.covers_every_day());
        }
    }

    #[test]
    fn test_covers_every_day() {
        let covered = RawSolution {
            objective: 0.0,
            x: vec![vec![1.0, 0.0], vec![0.0, 0.999_999_9]],
        };
        assert!(covered.covers_every_day());
        let gap = RawSolution {
            objective: 0.0,
            x: vec![vec![1.0, 0.0], vec![0.0, 0.0]],
        };
        assert!(!gap.covers_every_day());
    }

    #[cfg(not(feature = "highs"))]
    #[test]
    fn test_highs_unavailable() {
        let config = OptimizerConfig::default().with_backend(SolverBackend::Highs);
        let request = RosterRequest::new(vec![Worker::new("Ann")], days(2));
        let problem = RosterProblem::resolve(&request, &config).unwrap();
        let model = RosterModelBuilder::new(&problem, &config).build();
        let err = RosterSolver::new(&config).solve(model).unwrap_err();
        assert_eq!(err, RosterError::BackendUnavailable("highs".into()));
    }
}
