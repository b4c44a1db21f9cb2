//! Fractional Julian-day conversions.
//!
//! Day 1.0 is midnight, January 1 of the start year; the fractional part
//! is the time of day. Conversions work at microsecond resolution, which
//! keeps a round trip well inside 1e-6 days (86.4 ms) over a century of
//! model time.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::error::CalendarError;

const MICROS_PER_DAY: f64 = 86_400_000_000.0;

/// Midnight, January 1 of the start year: the day-number epoch.
fn epoch(start_year: i32) -> Result<NaiveDateTime, CalendarError> {
    let date = NaiveDate::from_ymd_opt(start_year, 1, 1)
        .ok_or(CalendarError::InvalidStartYear { year: start_year })?;
    // Midnight always exists on a valid date.
    Ok(date.and_hms_opt(0, 0, 0).expect("midnight is always valid"))
}

/// Convert a model Julian day number to a calendar timestamp.
///
/// Day 1.0 maps to `start_year-01-01 00:00:00`; the fractional part maps
/// to time of day at microsecond resolution.
///
/// # Errors
///
/// Returns [`CalendarError::DayOutOfRange`] if `jday` is not finite, not
/// positive, or overflows the calendar, and
/// [`CalendarError::InvalidStartYear`] if the start year is not
/// representable.
pub fn day_to_datetime(start_year: i32, jday: f64) -> Result<NaiveDateTime, CalendarError> {
    if !jday.is_finite() || jday <= 0.0 {
        return Err(CalendarError::DayOutOfRange { day: jday });
    }

    let offset = (jday - 1.0) * MICROS_PER_DAY;
    if offset >= i64::MAX as f64 {
        return Err(CalendarError::DayOutOfRange { day: jday });
    }

    epoch(start_year)?
        .checked_add_signed(TimeDelta::microseconds(offset.round() as i64))
        .ok_or(CalendarError::DayOutOfRange { day: jday })
}

/// Convert a calendar timestamp back to a model Julian day number.
///
/// Inverse of [`day_to_datetime`] for the same start year.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidStartYear`] if the start year is not
/// representable, [`CalendarError::TimestampOutOfRange`] if the timestamp
/// is too far from the epoch, and [`CalendarError::DayOutOfRange`] if the
/// resulting day number would not be positive (the timestamp precedes the
/// epoch by a full day or more).
pub fn datetime_to_day(start_year: i32, timestamp: NaiveDateTime) -> Result<f64, CalendarError> {
    let delta = timestamp.signed_duration_since(epoch(start_year)?);
    let micros = delta
        .num_microseconds()
        .ok_or(CalendarError::TimestampOutOfRange { timestamp })?;

    let day = micros as f64 / MICROS_PER_DAY + 1.0;
    if day <= 0.0 {
        return Err(CalendarError::DayOutOfRange { day });
    }
    Ok(day)
}

/// Convert a whole time axis of day numbers to timestamps.
///
/// # Errors
///
/// Returns the first conversion error encountered; no partial result is
/// produced.
pub fn days_to_datetimes(
    start_year: i32,
    days: &[f64],
) -> Result<Vec<NaiveDateTime>, CalendarError> {
    days.iter()
        .map(|&d| day_to_datetime(start_year, d))
        .collect()
}
