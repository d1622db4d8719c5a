//! Per-cell duty markers.
//!
//! A cell is one (worker, day) pair. Its marker either fixes the decision
//! variable (`Must`, `MustNot`) or shifts the day cost (`Willing`,
//! `Reluctant`). Markers are parsed case-insensitively:
//!
//! | Text | Marker |
//! |------|--------|
//! | `must not`, `no`, `off`, `nie` | `MustNot` |
//! | `must`, `yes`, `on`, `tak` | `Must` |
//! | `willing`, `chętnie`, `chetnie` | `Willing` |
//! | `reluctant`, `niechętnie`, `niechetnie` | `Reluctant` |
//! | anything else | `Blank` |

use serde::{Deserialize, Serialize};

/// Duty marker for one (worker, day) cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CellMarker {
    /// Worker is forced off duty.
    MustNot,
    /// Worker is forced on duty.
    Must,
    /// Day cost is lowered by the willing modifier.
    Willing,
    /// Day cost is raised by the willing modifier.
    Reluctant,
    /// No marker.
    #[default]
    Blank,
}

/// Hard pre-determination of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FixedAssignment {
    /// The variable is fixed to 0.
    Off,
    /// The variable is fixed to 1.
    On,
}

impl CellMarker {
    /// Parses marker text. Unrecognized text is `Blank`.
    pub fn parse(text: &str) -> Self {
        let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
        match normalized.to_lowercase().as_str() {
            "must not" | "no" | "off" | "nie" => CellMarker::MustNot,
            "must" | "yes" | "on" | "tak" => CellMarker::Must,
            "willing" | "chętnie" | "chetnie" => CellMarker::Willing,
            "reluctant" | "niechętnie" | "niechetnie" => CellMarker::Reluctant,
            _ => CellMarker::Blank,
        }
    }

    /// Fixed assignment implied by this marker, if any.
    pub fn fixed(&self) -> Option<FixedAssignment> {
        match self {
            CellMarker::MustNot => Some(FixedAssignment::Off),
            CellMarker::Must => Some(FixedAssignment::On),
            _ => None,
        }
    }

    /// Sign applied to the willing modifier (-1, 0 or +1).
    pub fn cost_sign(&self) -> f64 {
        match self {
            CellMarker::Willing => -1.0,
            CellMarker::Reluctant => 1.0,
            _ => 0.0,
        }
    }
}

impl From<&str> for CellMarker {
    fn from(text: &str) -> Self {
        CellMarker::parse(text)
    }
}

/// A marked cell in a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellEntry {
    /// Worker id.
    pub worker_id: String,
    /// Day index.
    pub day: usize,
    /// Marker.
    pub marker: CellMarker,
}

/// Replaces the base cost of one cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostOverride {
    /// Worker id.
    pub worker_id: String,
    /// Day index.
    pub day: usize,
    /// Cost used instead of the configured base cost.
    pub cost: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_markers() {
        assert_eq!(CellMarker::parse("must not"), CellMarker::MustNot);
        assert_eq!(CellMarker::parse("  MUST   NOT "), CellMarker::MustNot);
        assert_eq!(CellMarker::parse("No"), CellMarker::MustNot);
        assert_eq!(CellMarker::parse("Must"), CellMarker::Must);
        assert_eq!(CellMarker::parse("yes"), CellMarker::Must);
        assert_eq!(CellMarker::parse("Willing"), CellMarker::Willing);
        assert_eq!(CellMarker::parse("reluctant"), CellMarker::Reluctant);
        assert_eq!(CellMarker::parse(""), CellMarker::Blank);
        assert_eq!(CellMarker::parse("maybe"), CellMarker::Blank);
        assert_eq!(CellMarker::from("off"), CellMarker::MustNot);
    }

    #[test]
    fn test_parse_polish_markers() {
        assert_eq!(CellMarker::parse("nie"), CellMarker::MustNot);
        assert_eq!(CellMarker::parse(" TAK "), CellMarker::Must);
        assert_eq!(CellMarker::parse("Chętnie"), CellMarker::Willing);
        assert_eq!(CellMarker::parse("NIECHĘTNIE"), CellMarker::Reluctant);
        assert_eq!(CellMarker::parse("chetnie"), CellMarker::Willing);
        assert_eq!(CellMarker::parse("niechetnie"), CellMarker::Reluctant);
    }

    #[test]
    fn test_marker_effects() {
        assert_eq!(CellMarker::MustNot.fixed(), Some(FixedAssignment::Off));
        assert_eq!(CellMarker::Must.fixed(), Some(FixedAssignment::On));
        assert_eq!(CellMarker::Willing.fixed(), None);
        assert_eq!(CellMarker::Willing.cost_sign(), -1.0);
        assert_eq!(CellMarker::Reluctant.cost_sign(), 1.0);
        assert_eq!(CellMarker::Must.cost_sign(), 0.0);
        assert_eq!(CellMarker::Blank.cost_sign(), 0.0);
    }
}
