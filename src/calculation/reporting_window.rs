//! Date windows for dashboard rollups.
//!
//! Entries are attributed to the UTC date of their clock-in. A week starts on
//! the most recent Sunday.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// A half-open interval `[start, end)` of clock-in instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Inclusive lower bound.
    pub start: DateTime<Utc>,
    /// Exclusive upper bound.
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Start bound as Unix milliseconds.
    pub fn start_millis(&self) -> i64 {
        self.start.timestamp_millis()
    }

    /// End bound as Unix milliseconds.
    pub fn end_millis(&self) -> i64 {
        self.end.timestamp_millis()
    }
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Returns the most recent Sunday on or before `date`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use timesheet_engine::calculation::week_start;
///
/// // Tuesday 13 January 2026 -> Sunday 11 January 2026
/// let tuesday = NaiveDate::from_ymd_opt(2026, 1, 13).unwrap();
/// assert_eq!(week_start(tuesday), NaiveDate::from_ymd_opt(2026, 1, 11).unwrap());
/// ```
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let days_since_sunday = u64::from(date.weekday().num_days_from_sunday());
    date - Days::new(days_since_sunday)
}

/// Returns the window covering the whole of `date`.
pub fn day_window(date: NaiveDate) -> TimeWindow {
    let start = midnight(date);
    TimeWindow {
        start,
        end: midnight(date + Days::new(1)),
    }
}

/// Returns the window from the start of the week containing `today` to the end of `today`.
pub fn week_to_date_window(today: NaiveDate) -> TimeWindow {
    TimeWindow {
        start: midnight(week_start(today)),
        end: day_window(today).end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_week_start_on_sunday_is_same_day() {
        assert_eq!(week_start(make_date("2026-01-11")), make_date("2026-01-11"));
    }

    #[test]
    fn test_week_start_on_saturday_is_previous_sunday() {
        assert_eq!(week_start(make_date("2026-01-17")), make_date("2026-01-11"));
    }

    #[test]
    fn test_week_start_crosses_month_boundary() {
        // Thursday 1 January 2026
        assert_eq!(week_start(make_date("2026-01-01")), make_date("2025-12-28"));
    }

    #[test]
    fn test_day_window_is_half_open() {
        let window = day_window(make_date("2026-01-13"));
        assert_eq!(window.start, Utc.with_ymd_and_hms(2026, 1, 13, 0, 0, 0).unwrap());
        assert_eq!(window.end, Utc.with_ymd_and_hms(2026, 1, 14, 0, 0, 0).unwrap());
        assert_eq!(window.end_millis() - window.start_millis(), 86_400_000);
    }

    #[test]
    fn test_week_to_date_window() {
        let window = week_to_date_window(make_date("2026-01-13"));
        assert_eq!(window.start, Utc.with_ymd_and_hms(2026, 1, 11, 0, 0, 0).unwrap());
        assert_eq!(window.end, Utc.with_ymd_and_hms(2026, 1, 14, 0, 0, 0).unwrap());
    }
}
