//! Roster optimizer and objective diagnostics.
//!
//! # Optimizer
//!
//! `RosterOptimizer` runs the full pipeline for one request: validation,
//! request resolution, MILP construction, a single solve, and
//! materialization. Validation findings are reported alongside the result
//! and never block the solve.
//!
//! # Breakdown
//!
//! `CostBreakdown` splits a roster's objective into its terms: base day
//! cost, uncovered days, target deviations, and density windows.
//!
//! # References
//!
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of
//!   applications, methods and models"
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"

mod breakdown;
mod optimizer;

pub use breakdown::CostBreakdown;
pub use optimizer::{OptimizationReport, RosterOptimizer};
