//! Roster domain models.
//!
//! Provides the data types for on-call roster problems and their
//! solutions: request records supplied by the caller, the resolved
//! problem consumed by the model builder, and the solved roster.
//!
//! # Domain Mappings
//!
//! | u-roster | Hospital | Operations | Support desk |
//! |----------|----------|------------|--------------|
//! | Worker | Doctor | Engineer | Agent |
//! | Day | Duty night | On-call day | Rotation day |
//! | Cell marker | Availability note | Blackout/request | Shift swap wish |
//! | Roster | Duty schedule | Pager rotation | Rotation plan |

mod cell;
mod day;
mod problem;
mod request;
mod roster;
mod worker;

pub use cell::{CellEntry, CellMarker, CostOverride, FixedAssignment};
pub use day::{horizon_from, parse_date_label, Day};
pub use problem::{FixedCell, ModeledWorker, RosterProblem};
pub use request::RosterRequest;
pub use roster::{DutyMatrix, Roster, RosterEntry};
pub use worker::{Worker, VOID_WORKER_ID};
