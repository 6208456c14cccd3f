//! Forgiving date resolution
//!
//! These are the calendar operations the picker calls. None of them fail:
//! invalid input is replaced with a valid date so the picker can always
//! render.

use crate::date::JalaliDate;
use crate::locale::{format_display, DisplayStyle};

/// Parse a `YYYY-MM-DD` Jalali date, or return `fallback` unchanged
pub fn parse_initial(input: &str, fallback: JalaliDate) -> JalaliDate {
    match input.parse::<JalaliDate>() {
        Ok(date) => date,
        Err(err) => {
            tracing::debug!("initial date {:?} rejected ({}), using {}", input, err, fallback);
            fallback
        }
    }
}

/// Parse a Jalali date string, `None` if it is not a valid date
pub fn from_jalali_string(input: &str) -> Option<JalaliDate> {
    input.parse().ok()
}

/// Clamp a year into `min..=max`
///
/// A reversed range collapses onto `min`.
pub fn clamp_year(year: i32, min: i32, max: i32) -> i32 {
    year.clamp(min, max.max(min))
}

/// `YYYY-MM-DD` rendering of the Jalali date
pub fn to_jalali_string(date: &JalaliDate) -> String {
    date.to_string()
}

/// `YYYY-MM-DD` rendering of the equivalent Gregorian date
pub fn to_gregorian(date: &JalaliDate) -> String {
    match date.to_naive_date() {
        Ok(gregorian) => gregorian.format("%Y-%m-%d").to_string(),
        Err(err) => {
            tracing::warn!("{} has no gregorian equivalent: {}", date, err);
            String::new()
        }
    }
}

/// Localized (Persian) rendering of the date
pub fn to_jalali_display(date: &JalaliDate) -> String {
    format_display(date, DisplayStyle::Long)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jalali::days_in_month;

    #[test]
    fn test_parse_initial_valid() {
        let fallback = JalaliDate::EPOCH;
        let date = parse_initial("1379-10-05", fallback);
        assert_eq!((date.year(), date.month(), date.day()), (1379, 10, 5));
    }

    #[test]
    fn test_parse_initial_falls_back() {
        let fallback = JalaliDate::new(1404, 3, 3).unwrap();
        for input in ["not-a-date", "", "1404-12-30", "1404-13-01", "99999-01-01"] {
            assert_eq!(parse_initial(input, fallback), fallback, "{input:?}");
        }
    }

    #[test]
    fn test_clamp_year() {
        assert_eq!(clamp_year(1200, 1300, 1404), 1300);
        assert_eq!(clamp_year(1500, 1300, 1404), 1404);
        assert_eq!(clamp_year(1350, 1300, 1404), 1350);
        assert_eq!(clamp_year(1350, 1400, 1300), 1400);
    }

    #[test]
    fn test_string_conversions() {
        let date = JalaliDate::new(1379, 10, 5).unwrap();
        assert_eq!(to_jalali_string(&date), "1379-10-05");
        assert_eq!(to_gregorian(&date), "2000-12-25");
        assert_eq!(to_jalali_display(&date), "۵ دی ۱۳۷۹");
    }

    #[test]
    fn test_gregorian_survives_string_round_trip() {
        for year in [1300, 1379, 1403, 1404] {
            for month in 1..=12u8 {
                for day in [1, 15, days_in_month(year, month)] {
                    let date = JalaliDate::new(year, month, day).unwrap();
                    let again = from_jalali_string(&to_jalali_string(&date)).unwrap();
                    assert_eq!(to_gregorian(&again), to_gregorian(&date));
                }
            }
        }
    }
}
