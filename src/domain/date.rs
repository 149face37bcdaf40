//! Dates attached to deadlines and events
//!
//! A task date is either a calendar day (`2024-01-01`) or a day with a time
//! (`2024-01-01T18:30`). The granularity a date was entered with is kept, so
//! writing it back produces the same text.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use super::task::TaskError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Accepted date-time layouts, tried in order after the strict ISO parser
const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S"];

/// Due date of a deadline or scheduled date of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskDate {
    /// A whole day
    Date(NaiveDate),
    /// A specific moment
    DateTime(NaiveDateTime),
}

impl TaskDate {
    /// Parses an ISO-8601 date or date-time
    pub fn parse(text: &str) -> Result<Self, TaskError> {
        let text = text.trim();

        if let Ok(date) = NaiveDate::parse_from_str(text, DATE_FORMAT) {
            return Ok(TaskDate::Date(date));
        }

        if let Ok(date_time) = text.parse::<NaiveDateTime>() {
            return Ok(TaskDate::DateTime(date_time));
        }

        DATE_TIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
            .map(TaskDate::DateTime)
            .ok_or_else(|| TaskError::BadDateFormat(text.to_string()))
    }

    /// Returns the moment this date refers to (midnight for whole days)
    pub fn as_date_time(&self) -> NaiveDateTime {
        match self {
            TaskDate::Date(date) => date.and_time(NaiveTime::MIN),
            TaskDate::DateTime(date_time) => *date_time,
        }
    }

    /// Returns true if a time of day was given
    pub fn has_time(&self) -> bool {
        matches!(self, TaskDate::DateTime(_))
    }
}

impl fmt::Display for TaskDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskDate::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            TaskDate::DateTime(date_time) => {
                if date_time.second() == 0 && date_time.nanosecond() == 0 {
                    write!(f, "{}", date_time.format("%Y-%m-%dT%H:%M"))
                } else {
                    write!(f, "{}", date_time.format("%Y-%m-%dT%H:%M:%S%.f"))
                }
            }
        }
    }
}

impl FromStr for TaskDate {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskDate::parse(s)
    }
}

impl Ord for TaskDate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Whole days sort before a time on the same day at midnight
        self.as_date_time()
            .cmp(&other.as_date_time())
            .then_with(|| self.has_time().cmp(&other.has_time()))
    }
}

impl PartialOrd for TaskDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_date_only() {
        let date = TaskDate::parse("2024-01-01").unwrap();
        assert_eq!(date, TaskDate::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
        assert!(!date.has_time());
        assert_eq!(date.to_string(), "2024-01-01");
    }

    #[test]
    fn parses_date_time_variants() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap();

        for text in ["2024-03-09T18:30", "2024-03-09T18:30:00", "2024-03-09 18:30"] {
            assert_eq!(TaskDate::parse(text).unwrap(), TaskDate::DateTime(expected), "{}", text);
        }
    }

    #[test]
    fn keeps_granularity_in_text() {
        assert_eq!(TaskDate::parse("2024-03-09T18:30").unwrap().to_string(), "2024-03-09T18:30");
        assert_eq!(
            TaskDate::parse("2024-03-09T18:30:15").unwrap().to_string(),
            "2024-03-09T18:30:15"
        );
    }

    #[test]
    fn rejects_non_iso_dates() {
        for text in ["tomorrow", "01/02/2024", "2024-13-01", "", "2024-01-01 noon"] {
            assert!(
                matches!(TaskDate::parse(text), Err(TaskError::BadDateFormat(_))),
                "{}",
                text
            );
        }
    }

    #[test]
    fn orders_chronologically() {
        let day = TaskDate::parse("2024-01-02").unwrap();
        let midnight = TaskDate::parse("2024-01-02T00:00").unwrap();
        let earlier = TaskDate::parse("2024-01-01T23:59").unwrap();

        assert!(earlier < day);
        assert!(day < midnight);
    }
}
