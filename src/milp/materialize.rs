//! Result materializer: raw variable values → [`Roster`].
//!
//! The coverage constraint guarantees exactly one worker per day. A day
//! with zero or several workers on duty therefore means the builder or
//! the backend broke its contract; it is reported as
//! [`RosterError::CoverageBreach`] instead of being repaired.

use tracing::warn;

use super::solver::RawSolution;
use crate::error::RosterError;
use crate::models::{Roster, RosterEntry, RosterProblem};

/// Variable values above this threshold count as 1.
const ON_DUTY_THRESHOLD: f64 = 0.5;

/// Converts a raw solution into a roster.
///
/// Days covered by `Void` are logged at warn level and remain visible
/// through [`Roster::uncovered_days`].
pub fn materialize(problem: &RosterProblem, solution: &RawSolution) -> Result<Roster, RosterError> {
    let mut entries = Vec::with_capacity(problem.day_count());

    for (day, label) in problem.labels.iter().enumerate() {
        let on_duty: Vec<usize> = (0..problem.worker_count())
            .filter(|&w| {
                solution
                    .x
                    .get(w)
                    .and_then(|row| row.get(day))
                    .is_some_and(|&v| v > ON_DUTY_THRESHOLD)
            })
            .collect();

        let [w] = on_duty[..] else {
            return Err(RosterError::CoverageBreach {
                day,
                on_duty: on_duty.len(),
            });
        };
        let worker = &problem.workers[w];

        if worker.is_void {
            warn!(day, label = %label, "no real worker can cover this day");
        }
        entries.push(RosterEntry {
            day,
            label: label.clone(),
            worker_id: worker.id.clone(),
        });
    }

    Ok(Roster::new(
        entries,
        problem.workers.iter().map(|w| w.id.clone()).collect(),
        solution.objective,
    ))
}
