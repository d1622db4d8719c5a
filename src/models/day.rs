//! Day model.
//!
//! The horizon is a contiguous, ordered run of days indexed from zero.
//! Ordering matters: rest and density rules look at sliding windows.
//!
//! Labels are free text supplied by the caller (usually a date). They are
//! only interpreted by validation, which tries the configured date formats.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// One day of the scheduling horizon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    /// Zero-based position in the horizon.
    pub index: usize,
    /// Display label (typically a date).
    #[serde(default)]
    pub label: String,
    /// Whether the day counts toward weekend targets.
    #[serde(default)]
    pub is_weekend: bool,
}

impl Day {
    /// Creates a weekday.
    pub fn new(index: usize, label: impl Into<String>) -> Self {
        Self {
            index,
            label: label.into(),
            is_weekend: false,
        }
    }

    /// Creates a weekend day.
    pub fn weekend(index: usize, label: impl Into<String>) -> Self {
        Self {
            index,
            label: label.into(),
            is_weekend: true,
        }
    }

    /// Creates a day from a calendar date; Saturday and Sunday are weekend days.
    pub fn from_date(index: usize, date: NaiveDate) -> Self {
        Self {
            index,
            label: date.format("%Y-%m-%d").to_string(),
            is_weekend: matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
        }
    }

    /// Parses the label with the first matching format.
    ///
    /// Returns `None` for blank labels and labels matching no format.
    pub fn date<S: AsRef<str>>(&self, formats: &[S]) -> Option<NaiveDate> {
        parse_date_label(&self.label, formats)
    }
}

/// Builds a horizon of `count` consecutive calendar days starting at `start`.
pub fn horizon_from(start: NaiveDate, count: usize) -> Vec<Day> {
    start
        .iter_days()
        .take(count)
        .enumerate()
        .map(|(i, date)| Day::from_date(i, date))
        .collect()
}

/// Parses a date label with the first matching format.
pub fn parse_date_label<S: AsRef<str>>(label: &str, formats: &[S]) -> Option<NaiveDate> {
    let label = label.trim();
    if label.is_empty() {
        return None;
    }
    formats
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(label, f.as_ref()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORMATS: [&str; 2] = ["%Y-%m-%d", "%d.%m.%Y"];

    #[test]
    fn test_from_date_weekend() {
        // 2025-03-01 is a Saturday
        let sat = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let d = Day::from_date(0, sat);
        assert!(d.is_weekend);
        assert_eq!(d.label, "2025-03-01");

        let mon = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        assert!(!Day::from_date(2, mon).is_weekend);
    }

    #[test]
    fn test_horizon_from() {
        let start = NaiveDate::from_ymd_opt(2025, 2, 27).unwrap(); // Thursday
        let days = horizon_from(start, 5);
        assert_eq!(days.len(), 5);
        assert_eq!(days[4].index, 4);
        assert_eq!(days[4].label, "2025-03-03");
        let weekend: Vec<bool> = days.iter().map(|d| d.is_weekend).collect();
        assert_eq!(weekend, vec![false, false, true, true, false]);
    }

    #[test]
    fn test_parse_date_label() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 14);
        assert_eq!(parse_date_label("2025-03-14", &FORMATS), expected);
        assert_eq!(parse_date_label(" 14.03.2025 ", &FORMATS), expected);
        assert_eq!(parse_date_label("Friday", &FORMATS), None);
        assert_eq!(parse_date_label("   ", &FORMATS), None);
    }

    #[test]
    fn test_day_date() {
        let d = Day::weekend(0, "15.03.2025");
        assert_eq!(d.date(&FORMATS), NaiveDate::from_ymd_opt(2025, 3, 15));
        assert!(d.is_weekend);
    }
}
