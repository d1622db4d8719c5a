//! Fatal errors.
//!
//! Validation findings are not errors (see [`crate::validation`]) and an
//! infeasible model is a [`SolveStatus`](crate::milp::SolveStatus), not an
//! error. `RosterError` covers the remaining cases: structural input problems
//! detected before modeling, backend failures, and broken solver contracts.

use thiserror::Error;

/// Errors that abort an optimization request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RosterError {
    /// The request contains no days.
    #[error("no schedule section: the request contains no days")]
    EmptyHorizon,

    /// Day indices are not the contiguous sequence `0..n`.
    #[error("day at position {position} has index {index}; days must be indexed 0..n in order")]
    NonContiguousDays { position: usize, index: usize },

    /// A cell or cost override names a worker that is not in the request.
    #[error("unknown worker '{0}'")]
    UnknownWorker(String),

    /// A cell or cost override points past the end of the horizon.
    #[error("day {day} is outside the horizon of {horizon} days")]
    DayOutOfRange { day: usize, horizon: usize },

    /// A real worker uses the id reserved for the synthetic worker.
    #[error("worker id '{0}' is reserved")]
    ReservedWorkerId(String),

    /// Configuration could not be parsed or is inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The selected backend is not compiled into this build.
    #[error("solver backend '{0}' is not available in this build")]
    BackendUnavailable(String),

    /// The backend reported an unbounded objective.
    #[error("objective is unbounded")]
    Unbounded,

    /// Any other backend failure.
    #[error("solver failure: {0}")]
    Solver(String),

    /// A solved day has zero or several workers on duty.
    #[error("coverage breach on day {day}: {on_duty} workers on duty")]
    CoverageBreach { day: usize, on_duty: usize },
}

impl From<serde_json::Error> for RosterError {
    fn from(err: serde_json::Error) -> Self {
        RosterError::Config(err.to_string())
    }
}
