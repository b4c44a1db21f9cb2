//! Error types for the clearview-calendar crate.

use chrono::NaiveDateTime;

/// Error type for all fallible operations in the clearview-calendar crate.
///
/// This enum covers start years the calendar cannot represent and day
/// numbers or timestamps that fall outside the convertible range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a start year cannot be represented as a calendar date.
    #[error("invalid start year: {year}")]
    InvalidStartYear {
        /// The start year that was rejected.
        year: i32,
    },

    /// Returned when a day number is not finite, not positive, or too far
    /// from the epoch to convert.
    #[error("day number out of range: {day} (must be finite and > 0)")]
    DayOutOfRange {
        /// The day number that was rejected.
        day: f64,
    },

    /// Returned when a timestamp is too far from the start-year epoch to
    /// express as a day number.
    #[error("timestamp out of range: {timestamp}")]
    TimestampOutOfRange {
        /// The timestamp that was rejected.
        timestamp: NaiveDateTime,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn display_invalid_start_year() {
        let err = CalendarError::InvalidStartYear { year: -300_000 };
        assert_eq!(err.to_string(), "invalid start year: -300000");
    }

    #[test]
    fn display_day_out_of_range() {
        let err = CalendarError::DayOutOfRange { day: -1.5 };
        assert_eq!(
            err.to_string(),
            "day number out of range: -1.5 (must be finite and > 0)"
        );
    }

    #[test]
    fn display_timestamp_out_of_range() {
        let ts = NaiveDate::from_ymd_opt(1, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let err = CalendarError::TimestampOutOfRange { timestamp: ts };
        assert!(err.to_string().contains("timestamp out of range"));
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<CalendarError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<CalendarError>();
    }

    #[test]
    fn error_is_clone_and_partial_eq() {
        let a = CalendarError::InvalidStartYear { year: 0 };
        let b = a.clone();
        assert_eq!(a, b);
    }
}
