//! Worker model.
//!
//! Workers are the entities that take on-call duty. Each carries hard
//! workload bounds and optional soft targets (overall, weekday, weekend)
//! plus a density preference.
//!
//! # Synthetic Worker
//! [`VOID_WORKER_ID`] names a synthetic worker that the model always adds.
//! It has no bounds, no rest rule and a very high day cost, so that every
//! day can be covered even when no real worker may legally take it.

use serde::{Deserialize, Serialize};

/// Id of the synthetic worker absorbing uncoverable days.
pub const VOID_WORKER_ID: &str = "Void";

/// A worker eligible for duty days.
///
/// Every field but `id` is optional in serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Worker {
    /// Unique worker identifier.
    pub id: String,
    /// Whether the worker participates (disabled workers are excluded pre-solve).
    pub enabled: bool,
    /// Minimum number of duty days.
    pub min_shifts: u32,
    /// Maximum number of duty days. `None` = configured default cap.
    pub max_shifts: Option<u32>,
    /// Overall target. `None` = no preference.
    pub preferred_shifts: Option<u32>,
    /// Target restricted to weekdays. `None` = no preference.
    pub preferred_weekday_shifts: Option<u32>,
    /// Target restricted to weekends. `None` = no preference.
    pub preferred_weekend_shifts: Option<u32>,
    /// Rewards duty days clustered within a density window.
    pub prefer_dense: bool,
    /// Penalizes duty days clustered within a density window.
    pub prefer_sparse: bool,
}

impl Default for Worker {
    fn default() -> Self {
        Self {
            id: String::new(),
            enabled: true,
            min_shifts: 0,
            max_shifts: None,
            preferred_shifts: None,
            preferred_weekday_shifts: None,
            preferred_weekend_shifts: None,
            prefer_dense: false,
            prefer_sparse: false,
        }
    }
}

impl Worker {
    /// Creates an enabled worker with default parameters.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Sets the minimum number of duty days.
    pub fn with_min_shifts(mut self, min: u32) -> Self {
        self.min_shifts = min;
        self
    }

    /// Sets the maximum number of duty days.
    pub fn with_max_shifts(mut self, max: u32) -> Self {
        self.max_shifts = Some(max);
        self
    }

    /// Sets the overall target.
    pub fn with_preferred_shifts(mut self, preferred: u32) -> Self {
        self.preferred_shifts = Some(preferred);
        self
    }

    /// Sets the weekday target.
    pub fn with_preferred_weekday_shifts(mut self, preferred: u32) -> Self {
        self.preferred_weekday_shifts = Some(preferred);
        self
    }

    /// Sets the weekend target.
    pub fn with_preferred_weekend_shifts(mut self, preferred: u32) -> Self {
        self.preferred_weekend_shifts = Some(preferred);
        self
    }

    /// Marks the worker as preferring clustered duty.
    pub fn dense(mut self) -> Self {
        self.prefer_dense = true;
        self
    }

    /// Marks the worker as preferring spread-out duty.
    pub fn sparse(mut self) -> Self {
        self.prefer_sparse = true;
        self
    }

    /// Excludes the worker from the solve.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Upper bound, falling back to `default_max`.
    #[inline]
    pub fn max_or(&self, default_max: u32) -> u32 {
        self.max_shifts.unwrap_or(default_max)
    }

    /// Number of soft targets set (overall, weekday, weekend).
    pub fn target_count(&self) -> usize {
        [
            self.preferred_shifts,
            self.preferred_weekday_shifts,
            self.preferred_weekend_shifts,
        ]
        .iter()
        .filter(|t| t.is_some())
        .count()
    }

    /// Whether this is the synthetic worker.
    #[inline]
    pub fn is_void(&self) -> bool {
        self.id == VOID_WORKER_ID
    }
}
