//! Roster (solution) model.
//!
//! A roster assigns exactly one worker to every day of the horizon.
//! Days assigned to the synthetic `Void` worker are uncovered: no real
//! worker could legally take them under the hard constraints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::VOID_WORKER_ID;

/// One day of a roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Day index.
    pub day: usize,
    /// Day label.
    pub label: String,
    /// Worker on duty.
    pub worker_id: String,
}

impl RosterEntry {
    /// Whether the day is covered by the synthetic worker.
    #[inline]
    pub fn is_uncovered(&self) -> bool {
        self.worker_id == VOID_WORKER_ID
    }
}

/// A solved roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    /// Day-ordered assignments.
    pub entries: Vec<RosterEntry>,
    /// Modeled worker ids in model order (`Void` last).
    pub worker_ids: Vec<String>,
    /// Objective value reported by the solve.
    pub total_cost: f64,
}

/// Day × worker view of a roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyMatrix {
    /// Column headers.
    pub worker_ids: Vec<String>,
    /// Row headers.
    pub labels: Vec<String>,
    /// `on_duty[day][worker]`; exactly one `true` per row.
    pub on_duty: Vec<Vec<bool>>,
}

impl Roster {
    /// Creates a roster.
    pub fn new(entries: Vec<RosterEntry>, worker_ids: Vec<String>, total_cost: f64) -> Self {
        Self {
            entries,
            worker_ids,
            total_cost,
        }
    }

    /// Number of days.
    #[inline]
    pub fn day_count(&self) -> usize {
        self.entries.len()
    }

    /// Worker on duty for a day.
    pub fn worker_for_day(&self, day: usize) -> Option<&str> {
        self.entries.get(day).map(|e| e.worker_id.as_str())
    }

    /// Day indices a worker is on duty, ascending.
    pub fn days_for_worker(&self, worker_id: &str) -> Vec<usize> {
        self.entries
            .iter()
            .filter(|e| e.worker_id == worker_id)
            .map(|e| e.day)
            .collect()
    }

    /// Duty day count per worker (workers without duty included as 0).
    pub fn shift_counts(&self) -> BTreeMap<String, usize> {
        let mut counts: BTreeMap<String, usize> =
            self.worker_ids.iter().map(|id| (id.clone(), 0)).collect();
        for e in &self.entries {
            *counts.entry(e.worker_id.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Days covered by the synthetic worker.
    pub fn uncovered_days(&self) -> Vec<usize> {
        self.entries
            .iter()
            .filter(|e| e.is_uncovered())
            .map(|e| e.day)
            .collect()
    }

    /// Whether every day has a real worker.
    pub fn is_fully_covered(&self) -> bool {
        self.entries.iter().all(|e| !e.is_uncovered())
    }

    /// `(label, worker)` pairs in day order.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.label.as_str(), e.worker_id.as_str()))
            .collect()
    }

    /// Full day × worker matrix.
    pub fn matrix(&self) -> DutyMatrix {
        let on_duty = self
            .entries
            .iter()
            .map(|e| self.worker_ids.iter().map(|id| *id == e.worker_id).collect())
            .collect();
        DutyMatrix {
            worker_ids: self.worker_ids.clone(),
            labels: self.entries.iter().map(|e| e.label.clone()).collect(),
            on_duty,
        }
    }
}
