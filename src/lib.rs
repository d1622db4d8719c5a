//! On-call roster optimization.
//!
//! Assigns exactly one worker to every day of a planning horizon by solving
//! a 0/1 integer program. Hard rules (coverage, workload bounds, rest
//! spacing, fixed cells) are constraints; preferences (day costs, shift
//! targets, weekend targets, dense or sparse duty patterns) are objective
//! terms. A synthetic `Void` worker absorbs days no real worker can take.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Worker`, `Day`, `CellMarker`,
//!   `RosterRequest`, `RosterProblem`, `Roster`
//! - **`config`**: Cost weights, window rules and solver selection
//! - **`validation`**: Pre-solve checks (bounds, targets, dates, reachable minimums)
//! - **`milp`**: Model builder, solver adapter and result materializer on `good_lp`
//! - **`scheduler`**: `RosterOptimizer` facade and `CostBreakdown`
//! - **`error`**: `RosterError`
//!
//! # Example
//!
//! ```
//! use u_roster::config::OptimizerConfig;
//! use u_roster::models::{Day, RosterRequest, Worker};
//! use u_roster::scheduler::RosterOptimizer;
//!
//! let request = RosterRequest::new(
//!     vec![
//!         Worker::new("Ann").with_preferred_shifts(2),
//!         Worker::new("Bob"),
//!         Worker::new("Cid"),
//!     ],
//!     (0..6).map(|i| Day::new(i, "")).collect(),
//! )
//! .with_cell("Bob", 0, "must not");
//!
//! let report = RosterOptimizer::new(OptimizerConfig::default())
//!     .optimize(&request)
//!     .unwrap();
//! assert!(report.validation.is_clean());
//! let roster = report.roster.unwrap();
//! assert_eq!(roster.day_count(), 6);
//! assert_ne!(roster.worker_for_day(0), Some("Bob"));
//! ```
//!
//! # References
//!
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of
//!   applications, methods and models"
//! - Wolsey (2020), "Integer Programming"

pub mod config;
pub mod error;
pub mod milp;
pub mod models;
pub mod scheduler;
pub mod validation;
