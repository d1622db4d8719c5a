//! MILP formulation of the roster problem.
//!
//! Bridges roster domain models to `good_lp`. The pipeline is strictly
//! sequential and runs once per request:
//!
//! 1. [`RosterModelBuilder`] turns a [`RosterProblem`] into a 0/1 linear
//!    program (assignment binaries, linearized deviations, window indicators).
//! 2. [`RosterSolver`] hands the model to the configured backend and reports
//!    a [`SolveStatus`].
//! 3. [`materialize`] reads the assignment back into a [`Roster`].
//!
//! # Reference
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of
//!   applications, methods and models"
//! - Wolsey (2020), "Integer Programming", Ch. 1.4 (formulating absolute values)
//!
//! [`RosterProblem`]: crate::models::RosterProblem
//! [`Roster`]: crate::models::Roster

mod builder;
mod materialize;
mod solver;

pub(crate) use builder::windows;
pub use builder::{LinearObjective, ModelStats, RosterModel, RosterModelBuilder};
pub use materialize::materialize;
pub use solver::{RawSolution, RosterSolver, SolveStatus, SolverOutcome};
