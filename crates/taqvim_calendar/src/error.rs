//! Error types for taqvim_calendar

use thiserror::Error;

/// Errors from the fallible calendar entry points
///
/// The picker never surfaces these: it substitutes a valid fallback date
/// instead. They exist for callers that want to know why input was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// Input did not look like `YYYY-MM-DD`
    #[error("malformed date {0:?}, expected YYYY-MM-DD")]
    Malformed(String),

    /// Year outside the supported Jalali range
    #[error("year {0} is outside the supported range")]
    YearOutOfRange(i64),

    /// Month outside 1..=12
    #[error("month {0} is not between 1 and 12")]
    InvalidMonth(i64),

    /// Day outside the month's length
    #[error("day {day} does not exist in {year}-{month:02}")]
    InvalidDay { year: i32, month: u8, day: i64 },

    /// Gregorian date outside the convertible range
    #[error("gregorian date {0} is outside the supported range")]
    GregorianOutOfRange(String),
}

/// Result type for taqvim_calendar operations
pub type Result<T> = std::result::Result<T, CalendarError>;
