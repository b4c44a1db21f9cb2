//! # clearview-calendar
//!
//! Pure conversions between CE-QUAL-W2's model-native time axis and
//! calendar timestamps.
//!
//! CE-QUAL-W2 writes time as a fractional Julian day: a floating-point
//! day count where day 1.0 is midnight, January 1 of the simulation
//! start year, and the fractional part is the time of day. This crate
//! converts that representation to and from [`chrono::NaiveDateTime`]
//! exactly, so a day number survives a round trip through a timestamp.
//!
//! ## Quick Start
//!
//! ```ignore
//! use clearview_calendar::{datetime_to_day, day_to_datetime};
//!
//! let dt = day_to_datetime(2006, 1.5).unwrap(); // 2006-01-01 12:00:00
//! let jday = datetime_to_day(2006, dt).unwrap(); // 1.5
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `jday` | Fractional Julian-day conversions |
//! | `error` | Error types |

mod error;
mod jday;

pub use error::CalendarError;
pub use jday::{datetime_to_day, day_to_datetime, days_to_datetimes};
