//! Resolved optimization problem.
//!
//! `RosterProblem` is the immutable, fully-defaulted form of a request.
//! It is assembled once before modeling so that the model builder never
//! sees partially-initialized data.
//!
//! # Resolution Rules
//! - Disabled workers and their cells are dropped.
//! - Duplicate worker ids: the first occurrence wins.
//! - The synthetic `Void` worker is appended last.
//! - Day cost = base cost (or explicit override) ± willing modifier.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{FixedAssignment, RosterRequest, Worker, VOID_WORKER_ID};
use crate::config::OptimizerConfig;
use crate::error::RosterError;

/// A worker with every default applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeledWorker {
    /// Worker id.
    pub id: String,
    /// Synthetic worker flag (exempt from bounds and rest).
    pub is_void: bool,
    /// Minimum duty days.
    pub min_shifts: u32,
    /// Maximum duty days.
    pub max_shifts: u32,
    /// Overall target.
    pub preferred_shifts: Option<u32>,
    /// Weekday target.
    pub preferred_weekday_shifts: Option<u32>,
    /// Weekend target.
    pub preferred_weekend_shifts: Option<u32>,
    /// Dense preference.
    pub prefer_dense: bool,
    /// Sparse preference.
    pub prefer_sparse: bool,
}

impl ModeledWorker {
    fn from_worker(worker: &Worker, default_max: u32) -> Self {
        Self {
            id: worker.id.clone(),
            is_void: false,
            min_shifts: worker.min_shifts,
            max_shifts: worker.max_or(default_max),
            preferred_shifts: worker.preferred_shifts,
            preferred_weekday_shifts: worker.preferred_weekday_shifts,
            preferred_weekend_shifts: worker.preferred_weekend_shifts,
            prefer_dense: worker.prefer_dense,
            prefer_sparse: worker.prefer_sparse,
        }
    }

    fn void() -> Self {
        Self {
            id: VOID_WORKER_ID.to_string(),
            is_void: true,
            min_shifts: 0,
            max_shifts: u32::MAX,
            preferred_shifts: None,
            preferred_weekday_shifts: None,
            preferred_weekend_shifts: None,
            prefer_dense: false,
            prefer_sparse: false,
        }
    }
}

/// A fixed cell in model coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedCell {
    /// Worker position in [`RosterProblem::workers`].
    pub worker: usize,
    /// Day index.
    pub day: usize,
    /// Fixed value.
    pub fixed: FixedAssignment,
}

/// Immutable optimization input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterProblem {
    /// Modeled workers; the last one is `Void`.
    pub workers: Vec<ModeledWorker>,
    /// Day labels, by index.
    pub labels: Vec<String>,
    /// Weekend flags, by index.
    pub weekend: Vec<bool>,
    /// Day cost, `cost[worker][day]`.
    pub cost: Vec<Vec<f64>>,
    /// Fixed cells in request order. Conflicting entries are kept.
    pub fixed: Vec<FixedCell>,
}

impl RosterProblem {
    /// Resolves a request into a problem.
    ///
    /// # Errors
    /// Structural problems: empty horizon, non-contiguous day indices,
    /// references to unknown workers or days, a real worker named `Void`.
    pub fn resolve(request: &RosterRequest, config: &OptimizerConfig) -> Result<Self, RosterError> {
        let horizon = request.days.len();
        if horizon == 0 {
            return Err(RosterError::EmptyHorizon);
        }
        for (position, day) in request.days.iter().enumerate() {
            if day.index != position {
                return Err(RosterError::NonContiguousDays {
                    position,
                    index: day.index,
                });
            }
        }

        let mut workers = Vec::new();
        let mut slot: HashMap<&str, Option<usize>> = HashMap::new();
        for worker in &request.workers {
            if worker.is_void() {
                return Err(RosterError::ReservedWorkerId(worker.id.clone()));
            }
            if slot.contains_key(worker.id.as_str()) {
                warn!(worker = %worker.id, "duplicate worker id, keeping first occurrence");
                continue;
            }
            if worker.enabled {
                slot.insert(&worker.id, Some(workers.len()));
                workers.push(ModeledWorker::from_worker(worker, config.default_max_shifts));
            } else {
                slot.insert(&worker.id, None);
            }
        }
        let void_slot = workers.len();
        workers.push(ModeledWorker::void());

        let weights = &config.weights;
        let mut cost: Vec<Vec<f64>> = workers
            .iter()
            .map(|w| {
                let c = if w.is_void { weights.void_cost } else { weights.base_cost };
                vec![c; horizon]
            })
            .collect();

        let lookup = |id: &str, day: usize| -> Result<Option<usize>, RosterError> {
            if day >= horizon {
                return Err(RosterError::DayOutOfRange { day, horizon });
            }
            if id == VOID_WORKER_ID {
                return Ok(Some(void_slot));
            }
            slot.get(id)
                .copied()
                .ok_or_else(|| RosterError::UnknownWorker(id.to_string()))
        };

        for entry in &request.cost_overrides {
            if let Some(w) = lookup(&entry.worker_id, entry.day)? {
                cost[w][entry.day] = entry.cost;
            }
        }

        let mut fixed = Vec::new();
        let mut modifiers: Vec<(usize, usize, f64)> = Vec::new();
        for cell in &request.cells {
            let Some(w) = lookup(&cell.worker_id, cell.day)? else {
                continue;
            };
            if let Some(f) = cell.marker.fixed() {
                fixed.push(FixedCell {
                    worker: w,
                    day: cell.day,
                    fixed: f,
                });
            }
            let sign = cell.marker.cost_sign();
            if sign != 0.0 {
                modifiers.push((w, cell.day, sign));
            }
        }
        for (w, d, sign) in modifiers {
            cost[w][d] += sign * weights.willing_modifier;
        }

        Ok(Self {
            workers,
            labels: request.days.iter().map(|d| d.label.clone()).collect(),
            weekend: request.days.iter().map(|d| d.is_weekend).collect(),
            cost,
            fixed,
        })
    }

    /// Number of days.
    #[inline]
    pub fn day_count(&self) -> usize {
        self.weekend.len()
    }

    /// Number of modeled workers, `Void` included.
    #[inline]
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Position of the `Void` worker.
    #[inline]
    pub fn void_index(&self) -> usize {
        self.workers.len() - 1
    }

    /// Position of a worker by id.
    pub fn worker_index(&self, id: &str) -> Option<usize> {
        self.workers.iter().position(|w| w.id == id)
    }

    /// Indices of weekend days.
    pub fn weekend_days(&self) -> impl Iterator<Item = usize> + '_ {
        self.weekend.iter().enumerate().filter(|(_, &we)| we).map(|(d, _)| d)
    }

    /// Indices of weekdays.
    pub fn weekdays(&self) -> impl Iterator<Item = usize> + '_ {
        self.weekend.iter().enumerate().filter(|(_, &we)| !we).map(|(d, _)| d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CellMarker, Day};

    fn days(n: usize) -> Vec<Day> {
        (0..n).map(|i| Day::new(i, format!("d{i}"))).collect()
    }

    #[test]
    fn test_resolve_defaults() {
        let config = OptimizerConfig::default();
        let request = RosterRequest::new(vec![Worker::new("Ann"), Worker::new("Bob")], days(3));
        let p = RosterProblem::resolve(&request, &config).unwrap();

        assert_eq!(p.worker_count(), 3);
        assert_eq!(p.workers[2].id, VOID_WORKER_ID);
        assert!(p.workers[2].is_void);
        assert_eq!(p.void_index(), 2);
        assert_eq!(p.workers[0].max_shifts, 99);
        assert_eq!(p.cost[0], vec![15.0; 3]);
        assert_eq!(p.cost[2], vec![150.0; 3]);
        assert!(p.fixed.is_empty());
    }

    #[test]
    fn test_resolve_cell_markers() {
        let config = OptimizerConfig::default();
        let request = RosterRequest::new(vec![Worker::new("Ann")], days(4))
            .with_cell("Ann", 0, CellMarker::Willing)
            .with_cell("Ann", 1, CellMarker::Reluctant)
            .with_cell("Ann", 2, CellMarker::Must)
            .with_cell("Ann", 3, CellMarker::MustNot)
            .with_cost("Ann", 1, 30.0);
        let p = RosterProblem::resolve(&request, &config).unwrap();

        assert_eq!(p.cost[0], vec![14.0, 31.0, 15.0, 15.0]);
        assert_eq!(p.fixed.len(), 2);
        assert_eq!(p.fixed[0].fixed, FixedAssignment::On);
        assert_eq!(p.fixed[1].day, 3);
    }

    #[test]
    fn test_resolve_drops_disabled_and_duplicates() {
        let config = OptimizerConfig::default();
        let request = RosterRequest::new(
            vec![
                Worker::new("Ann").with_min_shifts(1),
                Worker::new("Bob").disabled(),
                Worker::new("Ann").with_min_shifts(5),
            ],
            days(3),
        )
        .with_cell("Bob", 0, CellMarker::Must);
        let p = RosterProblem::resolve(&request, &config).unwrap();

        let ids: Vec<&str> = p.workers.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["Ann", VOID_WORKER_ID]);
        assert_eq!(p.workers[0].min_shifts, 1);
        assert!(p.fixed.is_empty());
    }

    #[test]
    fn test_resolve_structural_errors() {
        let config = OptimizerConfig::default();

        let empty = RosterRequest::new(vec![Worker::new("Ann")], vec![]);
        assert_eq!(
            RosterProblem::resolve(&empty, &config).unwrap_err(),
            RosterError::EmptyHorizon
        );

        let gap = RosterRequest::new(vec![Worker::new("Ann")], vec![Day::new(0, ""), Day::new(2, "")]);
        assert!(matches!(
            RosterProblem::resolve(&gap, &config).unwrap_err(),
            RosterError::NonContiguousDays { position: 1, index: 2 }
        ));

        let unknown = RosterRequest::new(vec![Worker::new("Ann")], days(2)).with_cell("Zed", 0, "must");
        assert_eq!(
            RosterProblem::resolve(&unknown, &config).unwrap_err(),
            RosterError::UnknownWorker("Zed".into())
        );

        let out = RosterRequest::new(vec![Worker::new("Ann")], days(2)).with_cell("Ann", 5, "must");
        assert!(matches!(
            RosterProblem::resolve(&out, &config).unwrap_err(),
            RosterError::DayOutOfRange { day: 5, horizon: 2 }
        ));

        let reserved = RosterRequest::new(vec![Worker::new(VOID_WORKER_ID)], days(2));
        assert!(matches!(
            RosterProblem::resolve(&reserved, &config).unwrap_err(),
            RosterError::ReservedWorkerId(_)
        ));
    }

    #[test]
    fn test_weekend_partition() {
        let config = OptimizerConfig::default();
        let request = RosterRequest::new(
            vec![Worker::new("Ann")],
            vec![Day::new(0, ""), Day::weekend(1, ""), Day::weekend(2, ""), Day::new(3, "")],
        );
        let p = RosterProblem::resolve(&request, &config).unwrap();
        assert_eq!(p.weekend_days().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(p.weekdays().collect::<Vec<_>>(), vec![0, 3]);
        assert_eq!(p.worker_index("Ann"), Some(0));
    }
}
