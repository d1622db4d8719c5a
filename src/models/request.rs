//! Scheduling request.
//!
//! A `RosterRequest` is the strongly-typed input of one optimization: worker
//! records, day records, and the marked cells. It is a plain container; all
//! defaulting and cross-checking happens in [`RosterProblem::resolve`].
//!
//! [`RosterProblem::resolve`]: super::RosterProblem::resolve

use serde::{Deserialize, Serialize};

use super::{CellEntry, CellMarker, CostOverride, Day, Worker};

/// Input container for one roster optimization.
///
/// # Example
///
/// ```
/// use u_roster::models::{CellMarker, Day, RosterRequest, Worker};
///
/// let request = RosterRequest::new(
///     vec![Worker::new("Ann"), Worker::new("Bob").with_max_shifts(2)],
///     (0..7).map(|i| Day::new(i, format!("day {i}"))).collect(),
/// )
/// .with_cell("Ann", 0, CellMarker::Must)
/// .with_cell("Bob", 3, "reluctant");
///
/// assert_eq!(request.cells.len(), 2);
/// assert_eq!(request.cells[1].marker, CellMarker::Reluctant);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterRequest {
    /// Workers in display order.
    pub workers: Vec<Worker>,
    /// Days of the horizon, indexed `0..n`.
    pub days: Vec<Day>,
    /// Marked cells.
    #[serde(default)]
    pub cells: Vec<CellEntry>,
    /// Explicit base-cost replacements.
    #[serde(default)]
    pub cost_overrides: Vec<CostOverride>,
}

impl RosterRequest {
    /// Creates a request without marked cells.
    pub fn new(workers: Vec<Worker>, days: Vec<Day>) -> Self {
        Self {
            workers,
            days,
            cells: Vec::new(),
            cost_overrides: Vec::new(),
        }
    }

    /// Marks a cell.
    pub fn with_cell(
        mut self,
        worker_id: impl Into<String>,
        day: usize,
        marker: impl Into<CellMarker>,
    ) -> Self {
        self.cells.push(CellEntry {
            worker_id: worker_id.into(),
            day,
            marker: marker.into(),
        });
        self
    }

    /// Replaces the base cost of a cell.
    pub fn with_cost(mut self, worker_id: impl Into<String>, day: usize, cost: f64) -> Self {
        self.cost_overrides.push(CostOverride {
            worker_id: worker_id.into(),
            day,
            cost,
        });
        self
    }

    /// Number of days in the horizon.
    #[inline]
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Looks up a worker by id (first occurrence).
    pub fn worker(&self, id: &str) -> Option<&Worker> {
        self.workers.iter().find(|w| w.id == id)
    }

    /// Cells marked for a worker.
    pub fn cells_for_worker<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a CellEntry> {
        self.cells.iter().filter(move |c| c.worker_id == id)
    }

    /// Workers that participate in the solve.
    pub fn enabled_workers(&self) -> impl Iterator<Item = &Worker> {
        self.workers.iter().filter(|w| w.enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RosterRequest {
        RosterRequest::new(
            vec![Worker::new("Ann"), Worker::new("Bob").disabled()],
            (0..4).map(|i| Day::new(i, "")).collect(),
        )
        .with_cell("Ann", 1, "must not")
        .with_cell("Bob", 2, CellMarker::Must)
        .with_cost("Ann", 3, 20.0)
    }

    #[test]
    fn test_request_builder() {
        let r = sample();
        assert_eq!(r.day_count(), 4);
        assert_eq!(r.cells.len(), 2);
        assert_eq!(r.cells[0].marker, CellMarker::MustNot);
        assert_eq!(r.cost_overrides[0].cost, 20.0);
    }

    #[test]
    fn test_request_lookups() {
        let r = sample();
        assert!(r.worker("Ann").is_some());
        assert!(r.worker("Zed").is_none());
        assert_eq!(r.cells_for_worker("Ann").count(), 1);
        let enabled: Vec<&str> = r.enabled_workers().map(|w| w.id.as_str()).collect();
        assert_eq!(enabled, vec!["Ann"]);
    }

    #[test]
    fn test_request_json_defaults() {
        let json = r#"{
            "workers": [{ "id": "Ann", "enabled": true, "min_shifts": 1, "max_shifts": null,
                          "preferred_shifts": 2, "preferred_weekday_shifts": null,
                          "preferred_weekend_shifts": null, "prefer_dense": false,
                          "prefer_sparse": false }],
            "days": [{ "index": 0, "label": "2025-03-01", "is_weekend": true }]
        }"#;
        let r: RosterRequest = serde_json::from_str(json).unwrap();
        assert!(r.cells.is_empty());
        assert!(r.cost_overrides.is_empty());
        assert_eq!(r.workers[0].preferred_shifts, Some(2));
    }

    #[test]
    fn test_request_json_minimal_worker() {
        let json = r#"{
            "workers": [{ "id": "Ann" }],
            "days": [{ "index": 0, "label": "2025-03-03" }, { "index": 1 }]
        }"#;
        let r: RosterRequest = serde_json::from_str(json).unwrap();
        assert_eq!(r.workers[0], Worker::new("Ann"));
        assert!(r.workers[0].enabled);
        assert_eq!(r.workers[0].min_shifts, 0);
        assert!(!r.days[0].is_weekend);
        assert_eq!(r.days[1], Day::new(1, ""));
    }
}
