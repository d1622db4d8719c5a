//! Optimizer configuration.
//!
//! Cost weights are ordered by priority: an uncovered day dominates every
//! preference, a missing weekend shift outweighs a missed workload target,
//! and density rewards only break ties.
//!
//! All fields default individually, so a partial JSON document is valid:
//!
//! ```
//! use u_roster::config::OptimizerConfig;
//!
//! let config = OptimizerConfig::from_json(r#"{ "weights": { "void_cost": 1500.0 } }"#).unwrap();
//! assert_eq!(config.weights.void_cost, 1500.0);
//! assert_eq!(config.weights.base_cost, 15.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::RosterError;

/// Default wall-clock limit of one solve, in seconds.
pub const DEFAULT_TIME_LIMIT_SECS: f64 = 60.0;

/// Objective coefficients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostWeights {
    /// Default cost of one duty day for a real worker.
    pub base_cost: f64,
    /// Subtracted for "willing" cells, added for "reluctant" cells.
    pub willing_modifier: f64,
    /// Cost of one day assigned to the synthetic `Void` worker.
    pub void_cost: f64,
    /// Per-shift penalty for missing the overall target.
    pub not_preferred_shifts: f64,
    /// Per-shift penalty for missing the weekday target.
    pub not_preferred_weekday: f64,
    /// Per-shift penalty for weekend shifts below the weekend target.
    pub missing_weekend: f64,
    /// Per-shift penalty for weekend shifts above the weekend target.
    pub excess_weekend: f64,
    /// Reward per qualifying window for workers preferring dense duty.
    pub dense_window_reward: f64,
    /// Penalty per qualifying window for workers preferring sparse duty.
    pub sparse_window_penalty: f64,
}

impl Default for CostWeights {
    fn default() -> Self {
        let base_cost = 15.0;
        Self {
            base_cost,
            willing_modifier: 1.0,
            void_cost: 10.0 * base_cost,
            not_preferred_shifts: 4.0,
            not_preferred_weekday: 4.0,
            missing_weekend: 7.0,
            excess_weekend: 4.0,
            dense_window_reward: 0.1,
            sparse_window_penalty: 0.1,
        }
    }
}

/// Window lengths used by the rest and density rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowRules {
    /// At most one duty day per worker in any window of this length.
    pub rest_window: usize,
    /// Length of the density/sparsity evaluation window.
    pub density_window: usize,
    /// Duty days in a density window needed for it to qualify.
    pub density_threshold: usize,
}

impl Default for WindowRules {
    fn default() -> Self {
        Self {
            rest_window: 3,
            density_window: 5,
            density_threshold: 2,
        }
    }
}

/// MILP backend selection.
///
/// Defaults to HiGHS when the `highs` feature is enabled, microlp otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverBackend {
    /// Pure-Rust branch-and-bound (always available).
    Microlp,
    /// HiGHS (requires the `highs` feature, on by default).
    Highs,
}

impl Default for SolverBackend {
    fn default() -> Self {
        if cfg!(feature = "highs") {
            SolverBackend::Highs
        } else {
            SolverBackend::Microlp
        }
    }
}

impl SolverBackend {
    /// Backend name as used in configuration.
    pub fn name(&self) -> &'static str {
        match self {
            SolverBackend::Microlp => "microlp",
            SolverBackend::Highs => "highs",
        }
    }
}

/// Complete optimizer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Objective coefficients.
    pub weights: CostWeights,
    /// Rest and density windows.
    pub windows: WindowRules,
    /// Upper workload bound applied when a worker has none.
    pub default_max_shifts: u32,
    /// Fewer enabled workers than this is reported by validation.
    pub min_active_workers: usize,
    /// `chrono` formats tried, in order, when reading day labels as dates.
    pub date_formats: Vec<String>,
    /// MILP backend.
    pub backend: SolverBackend,
    /// Wall-clock limit of one solve. `None` lets the backend run to optimality.
    pub time_limit_secs: Option<f64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            weights: CostWeights::default(),
            windows: WindowRules::default(),
            default_max_shifts: 99,
            min_active_workers: 3,
            date_formats: vec![
                "%Y-%m-%d".to_string(),
                "%d.%m.%Y".to_string(),
                "%d/%m/%Y".to_string(),
            ],
            backend: SolverBackend::default(),
            time_limit_secs: Some(DEFAULT_TIME_LIMIT_SECS),
        }
    }
}

impl OptimizerConfig {
    /// Parses a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, RosterError> {
        let config: Self = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    /// Sets the cost weights.
    pub fn with_weights(mut self, weights: CostWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the backend.
    pub fn with_backend(mut self, backend: SolverBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Sets the solver time limit.
    pub fn with_time_limit(mut self, secs: f64) -> Self {
        self.time_limit_secs = Some(secs);
        self
    }

    /// Rejects window rules the model cannot express.
    pub fn check(&self) -> Result<(), RosterError> {
        let w = &self.windows;
        if w.rest_window == 0 {
            return Err(RosterError::Config("rest_window must be at least 1".into()));
        }
        if w.density_threshold == 0 || w.density_threshold > w.density_window {
            return Err(RosterError::Config(format!(
                "density_threshold must be in 1..={}",
                w.density_window
            )));
        }
        if let Some(limit) = self.time_limit_secs {
            if limit.is_nan() || limit <= 0.0 {
                return Err(RosterError::Config("time_limit_secs must be positive".into()));
            }
        }
        Ok(())
    }
}
