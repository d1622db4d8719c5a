//! Roster optimizer facade.
//!
//! # Pipeline
//!
//! 1. Check the configuration.
//! 2. Validate the request (findings never block the solve).
//! 3. Resolve the request into a [`RosterProblem`]; structural errors abort.
//! 4. Build the MILP, solve it once, and materialize the roster.
//! 5. Decompose the objective into a [`CostBreakdown`].
//!
//! # Complexity
//! The model has O(W·D) binaries plus O(W·D) window indicators for workers
//! with a density preference; solve time is dominated by the backend.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{info, warn};

use super::breakdown::CostBreakdown;
use crate::config::OptimizerConfig;
use crate::error::RosterError;
use crate::milp::{materialize, ModelStats, RosterModelBuilder, RosterSolver, SolveStatus};
use crate::models::{Roster, RosterProblem, RosterRequest};
use crate::validation::{validate_request, ValidationReport};

/// Result of one optimization run.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationReport {
    /// Pre-solve findings.
    pub validation: ValidationReport,
    /// Solve status.
    pub status: SolveStatus,
    /// Solved roster, absent when infeasible or out of time before an incumbent.
    pub roster: Option<Roster>,
    /// Objective terms of the roster.
    pub breakdown: Option<CostBreakdown>,
    /// Model size.
    pub stats: ModelStats,
    /// Wall-clock time of the whole run.
    pub elapsed: Duration,
}

impl OptimizationReport {
    /// Whether a roster was produced.
    pub fn is_solved(&self) -> bool {
        self.roster.is_some()
    }

    /// Days left to `Void`, empty without a roster.
    pub fn uncovered_days(&self) -> Vec<usize> {
        self.roster
            .as_ref()
            .map(Roster::uncovered_days)
            .unwrap_or_default()
    }
}

/// On-call roster optimizer.
///
/// Holds only its configuration; every call builds and solves its own model.
///
/// # Example
///
/// ```
/// use u_roster::config::OptimizerConfig;
/// use u_roster::models::{Day, RosterRequest, Worker};
/// use u_roster::scheduler::RosterOptimizer;
///
/// let request = RosterRequest::new(
///     vec![Worker::new("Ann"), Worker::new("Bob"), Worker::new("Cid")],
///     (0..6).map(|i| Day::new(i, format!("day {i}"))).collect(),
/// )
/// .with_cell("Ann", 0, "must");
///
/// let report = RosterOptimizer::new(OptimizerConfig::default())
///     .optimize(&request)
///     .unwrap();
/// let roster = report.roster.unwrap();
/// assert_eq!(roster.worker_for_day(0), Some("Ann"));
/// assert!(roster.is_fully_covered());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RosterOptimizer {
    config: OptimizerConfig,
}

impl RosterOptimizer {
    /// Creates an optimizer.
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Runs validation only.
    pub fn validate(&self, request: &RosterRequest) -> ValidationReport {
        validate_request(request, &self.config)
    }

    /// Validates, models, solves and materializes a request.
    ///
    /// # Errors
    /// Configuration and structural request errors, backend failures, and
    /// coverage breaches in the backend's answer. An infeasible model or an
    /// expired time limit is not an error: the report carries the
    /// [`SolveStatus`] and possibly no roster.
    pub fn optimize(&self, request: &RosterRequest) -> Result<OptimizationReport, RosterError> {
        let started = Instant::now();
        self.config.check()?;

        let validation = self.validate(request);
        for finding in &validation.findings {
            warn!(kind = ?finding.kind, "{}", finding.message);
        }

        let problem = RosterProblem::resolve(request, &self.config)?;
        info!(
            workers = problem.worker_count() - 1,
            days = problem.day_count(),
            findings = validation.findings.len(),
            "optimizing roster"
        );

        let model = RosterModelBuilder::new(&problem, &self.config).build();
        let stats = model.stats().clone();
        let outcome = RosterSolver::new(&self.config).solve(model)?;

        let (roster, breakdown) = match &outcome.solution {
            Some(solution) => {
                let roster = materialize(&problem, solution)?;
                let breakdown = CostBreakdown::evaluate(&problem, &roster, &self.config);
                (Some(roster), Some(breakdown))
            }
            None => (None, None),
        };

        Ok(OptimizationReport {
            validation,
            status: outcome.status,
            roster,
            breakdown,
            stats,
            elapsed: started.elapsed(),
        })
    }
}
