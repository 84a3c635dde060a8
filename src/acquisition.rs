use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A user-chosen date range within which scenes are searched for.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct AcquisitionWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl AcquisitionWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        let window = Self { start, end };
        window.warn_if_inverted("acquisition");
        window
    }

    pub fn is_inverted(self: &Self) -> bool {
        self.end < self.start
    }

    /// Inverted windows are searched as given; they only get a warning.
    pub fn warn_if_inverted(self: &Self, label: &str) {
        if self.is_inverted() {
            warn!("The {label} window ends before it starts: {self}");
        }
    }

    /// Datetime interval in the form expected by the catalog search,
    /// `<start>T00:00:00Z/<end>T00:00:00Z`.
    pub fn datetime_interval(self: &Self) -> String {
        format!(
            "{}T00:00:00Z/{}T00:00:00Z",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

impl fmt::Display for AcquisitionWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// Ideal separation in days between a scene of the first window and one of
/// the second: the mean of the start-to-start and end-to-end offsets.
///
/// Odd totals round toward negative infinity, so a total of -365 days
/// gives -183 rather than -182.
pub fn target_gap(first: &AcquisitionWindow, second: &AcquisitionWindow) -> i64 {
    let end_delta = (second.end - first.end).num_days();
    let start_delta = (second.start - first.start).num_days();
    (end_delta + start_delta).div_euclid(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_target_gap_symmetric_windows() {
        let first = AcquisitionWindow::new(date(2020, 12, 1), date(2020, 12, 15));
        let second = AcquisitionWindow::new(date(2021, 6, 1), date(2021, 6, 15));
        assert_eq!(target_gap(&first, &second), 182);
    }

    #[test]
    fn test_target_gap_odd_total_truncates_down() {
        let first = AcquisitionWindow::new(date(2021, 1, 1), date(2021, 1, 10));
        let second = AcquisitionWindow::new(date(2021, 1, 11), date(2021, 1, 21));
        // 10 + 11 = 21 days
        assert_eq!(target_gap(&first, &second), 10);

        // Second window before the first: -10 + -11 = -21 days
        assert_eq!(target_gap(&second, &first), -11);
    }

    #[test]
    fn test_datetime_interval() {
        let window = AcquisitionWindow::new(date(2020, 12, 1), date(2020, 12, 15));
        assert_eq!(
            window.datetime_interval(),
            "2020-12-01T00:00:00Z/2020-12-15T00:00:00Z"
        );
    }

    #[test]
    fn test_inverted_window_is_accepted() {
        let window = AcquisitionWindow::new(date(2021, 1, 10), date(2021, 1, 1));
        assert_eq!(window.start, date(2021, 1, 10));
        assert_eq!(window.to_string(), "2021-01-10 - 2021-01-01");
        assert!(window.is_inverted());

        let single_day = AcquisitionWindow::new(date(2021, 1, 1), date(2021, 1, 1));
        assert!(!single_day.is_inverted());
    }
}
