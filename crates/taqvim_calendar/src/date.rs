//! Validated Jalali dates
//!
//! A [`JalaliDate`] always satisfies `1 <= day <= days_in_month(year, month)`.
//! The `with_*` setters keep that invariant by clamping the day downward,
//! which is exactly what the picker needs when the year or month wheel moves
//! under a day that no longer exists.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, Result};
use crate::jalali::{
    days_in_month, gregorian_to_jdn, is_supported_year, jalali_to_jdn, jdn_to_gregorian,
    jdn_to_jalali, MAX_YEAR, MIN_YEAR,
};

/// A day in the Jalali calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JalaliDate {
    year: i32,
    month: u8,
    day: u8,
}

impl JalaliDate {
    /// Create a date, rejecting anything that does not exist
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self> {
        Self::from_parts(i64::from(year), i64::from(month), i64::from(day))
    }

    fn from_parts(year: i64, month: i64, day: i64) -> Result<Self> {
        let year = i32::try_from(year)
            .ok()
            .filter(|y| is_supported_year(*y))
            .ok_or(CalendarError::YearOutOfRange(year))?;
        let month = u8::try_from(month)
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or(CalendarError::InvalidMonth(month))?;
        let max_day = days_in_month(year, month);
        let day = u8::try_from(day)
            .ok()
            .filter(|d| (1..=max_day).contains(d))
            .ok_or(CalendarError::InvalidDay { year, month, day })?;

        Ok(Self { year, month, day })
    }

    /// Create a date, clamping every field into range
    pub fn new_clamped(year: i32, month: u8, day: u8) -> Self {
        let year = year.clamp(MIN_YEAR, MAX_YEAR);
        let month = month.clamp(1, 12);
        let day = day.clamp(1, days_in_month(year, month));
        Self { year, month, day }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    /// Length of this date's month
    pub fn days_in_month(&self) -> u8 {
        days_in_month(self.year, self.month)
    }

    /// Same month and day in another year, day clamped to the month length
    pub fn with_year(self, year: i32) -> Self {
        Self::new_clamped(year, self.month, self.day)
    }

    /// Same year and day in another month, day clamped to the month length
    pub fn with_month(self, month: u8) -> Self {
        Self::new_clamped(self.year, month, self.day)
    }

    /// Another day of the same month, clamped to the month length
    pub fn with_day(self, day: u8) -> Self {
        Self::new_clamped(self.year, self.month, day)
    }

    /// Julian Day Number of this date
    pub fn to_jdn(&self) -> i64 {
        // Fields are validated on construction, so the year is always supported
        jalali_to_jdn(self.year, self.month, self.day).unwrap_or_default()
    }

    /// Jalali date of a Gregorian date
    pub fn from_gregorian(date: NaiveDate) -> Result<Self> {
        let (year, month, day) = jdn_to_jalali(gregorian_to_jdn(date))
            .ok_or_else(|| CalendarError::GregorianOutOfRange(date.to_string()))?;
        Self::new(year, month, day)
    }

    /// Gregorian date of this day
    pub fn to_naive_date(&self) -> Result<NaiveDate> {
        jdn_to_gregorian(self.to_jdn())
            .ok_or_else(|| CalendarError::GregorianOutOfRange(self.to_string()))
    }

    /// Today's date on the local clock
    pub fn today() -> Self {
        let local = chrono::Local::now().date_naive();
        match Self::from_gregorian(local) {
            Ok(today) => today,
            Err(err) => {
                tracing::warn!("local date {} not convertible: {}", local, err);
                Self::EPOCH
            }
        }
    }

    /// 1348-10-11, the Unix epoch
    pub const EPOCH: Self = Self {
        year: 1348,
        month: 10,
        day: 11,
    };
}

impl fmt::Display for JalaliDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for JalaliDate {
    type Err = CalendarError;

    /// Parse `YYYY-MM-DD` (a `/` separator is accepted too)
    fn from_str(s: &str) -> Result<Self> {
        let malformed = || CalendarError::Malformed(s.to_string());
        let trimmed = s.trim();

        let mut parts = trimmed.split(['-', '/']);
        let (Some(year), Some(month), Some(day), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };

        let field = |text: &str, max_len: usize| -> Result<i64> {
            if text.is_empty() || text.len() > max_len || !text.bytes().all(|b| b.is_ascii_digit())
            {
                return Err(malformed());
            }
            text.parse::<i64>().map_err(|_| malformed())
        };

        Self::from_parts(field(year, 4)?, field(month, 2)?, field(day, 2)?)
    }
}

impl TryFrom<String> for JalaliDate {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<JalaliDate> for String {
    fn from(date: JalaliDate) -> Self {
        date.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_missing_days() {
        assert!(JalaliDate::new(1403, 12, 30).is_ok());
        assert_eq!(
            JalaliDate::new(1404, 12, 30),
            Err(CalendarError::InvalidDay {
                year: 1404,
                month: 12,
                day: 30
            })
        );
        assert_eq!(
            JalaliDate::new(1404, 13, 1),
            Err(CalendarError::InvalidMonth(13))
        );
        assert_eq!(
            JalaliDate::new(1404, 7, 0),
            Err(CalendarError::InvalidDay {
                year: 1404,
                month: 7,
                day: 0
            })
        );
    }

    #[test]
    fn test_setters_clamp_day_downward() {
        let date = JalaliDate::new(1403, 12, 30).unwrap();
        let moved = date.with_year(1404);
        assert_eq!((moved.year(), moved.month(), moved.day()), (1404, 12, 29));

        let date = JalaliDate::new(1404, 6, 31).unwrap();
        assert_eq!(date.with_month(7).day(), 30);
        assert_eq!(date.with_day(40).day(), 31);
    }

    #[test]
    fn test_parse_and_display() {
        let date: JalaliDate = "1379-10-05".parse().unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (1379, 10, 5));
        assert_eq!(date.to_string(), "1379-10-05");

        let loose: JalaliDate = " 1379/1/5 ".parse().unwrap();
        assert_eq!(loose.to_string(), "1379-01-05");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["not-a-date", "", "1379-10", "1379-10-05-01", "13790-1-1", "1379-+1-05"] {
            assert!(
                matches!(input.parse::<JalaliDate>(), Err(CalendarError::Malformed(_))),
                "{input:?} should be malformed"
            );
        }
        assert!(matches!(
            "1379-00-05".parse::<JalaliDate>(),
            Err(CalendarError::InvalidMonth(0))
        ));
    }

    #[test]
    fn test_gregorian_conversions() {
        let date = JalaliDate::new(1379, 10, 5).unwrap();
        let gregorian = date.to_naive_date().unwrap();
        assert_eq!(gregorian, NaiveDate::from_ymd_opt(2000, 12, 25).unwrap());
        assert_eq!(JalaliDate::from_gregorian(gregorian), Ok(date));

        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(JalaliDate::from_gregorian(epoch), Ok(JalaliDate::EPOCH));
    }

    #[test]
    fn test_today_is_valid() {
        let today = JalaliDate::today();
        assert!(today.day() <= today.days_in_month());
        assert!(today.year() > 1400);
    }

    #[test]
    fn test_serde_uses_string_form() {
        let date = JalaliDate::new(1403, 1, 9).unwrap();
        let as_string: String = date.into();
        assert_eq!(as_string, "1403-01-09");
        assert_eq!(JalaliDate::try_from(as_string), Ok(date));
    }
}
