//! Input validation for roster requests.
//!
//! Runs before solving and never blocks it: findings are informational and
//! meant to be reviewed next to the solved roster. Detects:
//! - Inconsistent workload bounds and targets (min > max, min > preferred,
//!   preferred > max)
//! - Overall, weekday and weekend targets all set at once
//! - Dense and sparse preferences set at once
//! - Duplicate worker ids
//! - Fewer enabled workers than a viable rotation needs
//! - Unparseable date labels and gaps in the date sequence
//! - Minimums that cannot be reached given forced-off days and rest spacing
//!
//! Per-worker checks skip disabled workers. Horizon-wide findings carry
//! [`FindingScope::Global`].

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::config::OptimizerConfig;
use crate::models::{parse_date_label, CellMarker, RosterRequest, Worker};

/// Categories of validation findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FindingKind {
    /// `min_shifts > max_shifts`.
    MinExceedsMax,
    /// `min_shifts > preferred_shifts`.
    MinExceedsPreferred,
    /// `preferred_shifts > max_shifts`.
    PreferredExceedsMax,
    /// Overall, weekday and weekend targets are all set.
    ConflictingTargets,
    /// Dense and sparse preferences are both set.
    ConflictingDensity,
    /// Fewer enabled workers than the configured minimum.
    TooFewWorkers,
    /// Two workers share an id.
    DuplicateId,
    /// A day label is not a date in any configured format.
    UnparseableDate,
    /// Consecutive day labels are not consecutive dates.
    DateGap,
    /// `min_shifts` cannot be reached under forced-off days and rest spacing.
    InfeasibleMinimum,
}

/// What a finding is about.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FindingScope {
    /// A single worker.
    Worker(String),
    /// The whole horizon.
    Global,
}

/// A validation finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationFinding {
    /// Finding category.
    pub kind: FindingKind,
    /// Worker or horizon.
    pub scope: FindingScope,
    /// Human-readable description.
    pub message: String,
}

impl ValidationFinding {
    fn worker(kind: FindingKind, id: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            scope: FindingScope::Worker(id.to_string()),
            message: message.into(),
        }
    }

    fn global(kind: FindingKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            scope: FindingScope::Global,
            message: message.into(),
        }
    }
}

/// All findings for one request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Findings in detection order.
    pub findings: Vec<ValidationFinding>,
}

impl ValidationReport {
    /// Whether nothing was found.
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Whether any finding has the given kind.
    pub fn has(&self, kind: FindingKind) -> bool {
        self.findings.iter().any(|f| f.kind == kind)
    }

    /// Findings about one worker.
    pub fn for_worker<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a ValidationFinding> {
        self.findings
            .iter()
            .filter(move |f| matches!(&f.scope, FindingScope::Worker(w) if w == id))
    }

    /// Horizon-wide findings.
    pub fn global(&self) -> impl Iterator<Item = &ValidationFinding> {
        self.findings
            .iter()
            .filter(|f| f.scope == FindingScope::Global)
    }

    /// Findings grouped by scope.
    pub fn by_scope(&self) -> BTreeMap<&FindingScope, Vec<&ValidationFinding>> {
        let mut grouped: BTreeMap<&FindingScope, Vec<&ValidationFinding>> = BTreeMap::new();
        for f in &self.findings {
            grouped.entry(&f.scope).or_default().push(f);
        }
        grouped
    }
}

/// Validates a roster request.
///
/// Checks, in order:
/// 1. Duplicate worker ids
/// 2. Enabled worker count against `min_active_workers`
/// 3. Per enabled worker: bound/target consistency, target conflicts,
///    density conflicts, reachable minimum
/// 4. Day labels: parseable dates, no gaps
pub fn validate_request(request: &RosterRequest, config: &OptimizerConfig) -> ValidationReport {
    let mut findings = Vec::new();

    let mut seen = HashSet::new();
    for w in &request.workers {
        if !seen.insert(w.id.as_str()) {
            findings.push(ValidationFinding::worker(
                FindingKind::DuplicateId,
                &w.id,
                format!("Duplicate worker ID: {}", w.id),
            ));
        }
    }

    let enabled = request
        .enabled_workers()
        .map(|w| w.id.as_str())
        .collect::<HashSet<_>>()
        .len();
    if enabled < config.min_active_workers {
        findings.push(ValidationFinding::global(
            FindingKind::TooFewWorkers,
            format!(
                "Only {enabled} enabled workers; at least {} are needed",
                config.min_active_workers
            ),
        ));
    }

    for worker in request.enabled_workers() {
        check_worker(worker, request, config, &mut findings);
    }

    check_dates(request, config, &mut findings);

    ValidationReport { findings }
}

fn check_worker(
    worker: &Worker,
    request: &RosterRequest,
    config: &OptimizerConfig,
    findings: &mut Vec<ValidationFinding>,
) {
    let id = worker.id.as_str();
    let min = worker.min_shifts;
    let max = worker.max_or(config.default_max_shifts);

    if min > max {
        findings.push(ValidationFinding::worker(
            FindingKind::MinExceedsMax,
            id,
            format!("Worker '{id}': min_shifts {min} exceeds max_shifts {max}"),
        ));
    }
    if let Some(preferred) = worker.preferred_shifts {
        if min > preferred {
            findings.push(ValidationFinding::worker(
                FindingKind::MinExceedsPreferred,
                id,
                format!("Worker '{id}': min_shifts {min} exceeds preferred_shifts {preferred}"),
            ));
        }
        if preferred > max {
            findings.push(ValidationFinding::worker(
                FindingKind::PreferredExceedsMax,
                id,
                format!("Worker '{id}': preferred_shifts {preferred} exceeds max_shifts {max}"),
            ));
        }
    }
    if worker.target_count() > 2 {
        findings.push(ValidationFinding::worker(
            FindingKind::ConflictingTargets,
            id,
            format!("Worker '{id}': overall, weekday and weekend targets are all set"),
        ));
    }
    if worker.prefer_dense && worker.prefer_sparse {
        findings.push(ValidationFinding::worker(
            FindingKind::ConflictingDensity,
            id,
            format!("Worker '{id}': both dense and sparse duty preferred"),
        ));
    }

    if min > 0 {
        let reachable = reachable_shifts(worker, request, config.windows.rest_window);
        if reachable < min as usize {
            findings.push(ValidationFinding::worker(
                FindingKind::InfeasibleMinimum,
                id,
                format!(
                    "Worker '{id}': min_shifts {min} unreachable, only {reachable} available days at rest spacing"
                ),
            ));
        }
    }
}

/// Greedy count of days a worker could take: not forced off, and at least
/// `rest_window` days after the previously counted day.
fn reachable_shifts(worker: &Worker, request: &RosterRequest, rest_window: usize) -> usize {
    let n = request.day_count();
    let mut off = vec![false; n];
    for cell in request.cells_for_worker(&worker.id) {
        if cell.marker == CellMarker::MustNot && cell.day < n {
            off[cell.day] = true;
        }
    }

    let mut count = 0;
    let mut last: Option<usize> = None;
    for (day, &blocked) in off.iter().enumerate() {
        if blocked {
            continue;
        }
        if last.map_or(true, |l| day >= l + rest_window) {
            count += 1;
            last = Some(day);
        }
    }
    count
}

fn check_dates(request: &RosterRequest, config: &OptimizerConfig, findings: &mut Vec<ValidationFinding>) {
    let mut previous = None;
    for day in &request.days {
        if day.label.trim().is_empty() {
            previous = None;
            continue;
        }
        let Some(date) = parse_date_label(&day.label, &config.date_formats) else {
            findings.push(ValidationFinding::global(
                FindingKind::UnparseableDate,
                format!("Day {}: label '{}' is not a date", day.index, day.label),
            ));
            previous = None;
            continue;
        };
        if let Some(prev) = previous {
            if prev + chrono::Days::new(1) != date {
                findings.push(ValidationFinding::global(
                    FindingKind::DateGap,
                    format!("Day {}: {date} does not follow {prev}", day.index),
                ));
            }
        }
        previous = Some(date);
    }
}
