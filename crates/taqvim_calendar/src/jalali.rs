//! Jalali calendar arithmetic
//!
//! Leap years follow the break-year table of the astronomical solar Hijri
//! calendar, the same rules used by the widely deployed `jalaali` converters.
//! Conversions go through the Julian Day Number; the Gregorian side is
//! delegated to `chrono`.
//!
//! Supported Jalali years are [`MIN_YEAR`]`..=`[`MAX_YEAR`].

use chrono::{Datelike, NaiveDate};

/// First supported Jalali year
pub const MIN_YEAR: i32 = -61;

/// Last supported Jalali year
pub const MAX_YEAR: i32 = 3177;

/// Jalali years that start a new leap cycle segment
const BREAKS: [i64; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
    2394, 2456, 3178,
];

/// Julian Day Number of the day before 0001-01-01 (proleptic Gregorian)
const JDN_CE_OFFSET: i64 = 1_721_425;

/// Offset between Jalali and Gregorian year numbers at Nowruz
const GREGORIAN_YEAR_OFFSET: i32 = 621;

/// Leap-cycle facts about one Jalali year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct YearInfo {
    /// Years since the last leap year (0 = this year is leap)
    leap: i64,
    /// Gregorian year in which this Jalali year starts
    gregorian_year: i32,
    /// Day of March on which Farvardin 1 falls
    march_day: u32,
}

fn year_info(year: i32) -> Option<YearInfo> {
    let jy = i64::from(year);
    if jy < BREAKS[0] || jy >= BREAKS[BREAKS.len() - 1] {
        return None;
    }

    let gy = jy + i64::from(GREGORIAN_YEAR_OFFSET);
    let mut leap_j: i64 = -14;
    let mut jp = BREAKS[0];
    let mut jump = 0;

    for &jm in &BREAKS[1..] {
        jump = jm - jp;
        if jy < jm {
            break;
        }
        leap_j += jump / 33 * 8 + (jump % 33) / 4;
        jp = jm;
    }

    let mut n = jy - jp;
    leap_j += n / 33 * 8 + (n % 33 + 3) / 4;
    if jump % 33 == 4 && jump - n == 4 {
        leap_j += 1;
    }

    let leap_g = gy / 4 - (gy / 100 + 1) * 3 / 4 - 150;
    let march_day = 20 + leap_j - leap_g;

    if jump - n < 6 {
        n = n - jump + (jump + 4) / 33 * 33;
    }
    let mut leap = ((n + 1) % 33 - 1) % 4;
    if leap == -1 {
        leap = 4;
    }

    Some(YearInfo {
        leap,
        gregorian_year: i32::try_from(gy).ok()?,
        march_day: u32::try_from(march_day).ok()?,
    })
}

/// Check whether a Jalali year is in the supported range
pub fn is_supported_year(year: i32) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&year)
}

/// Check whether a Jalali year is a leap year (Esfand has 30 days)
///
/// Unsupported years are reported as common years.
pub fn is_leap_year(year: i32) -> bool {
    year_info(year).is_some_and(|info| info.leap == 0)
}

/// Number of days in a Jalali month
///
/// The first six months have 31 days, the next five 30, and Esfand 29 or 30
/// depending on the leap year. `month` is clamped into `1..=12`.
pub fn days_in_month(year: i32, month: u8) -> u8 {
    match month.clamp(1, 12) {
        1..=6 => 31,
        7..=11 => 30,
        _ => {
            if is_leap_year(year) {
                30
            } else {
                29
            }
        }
    }
}

/// Number of days in a Jalali year (365 or 366)
pub fn days_in_year(year: i32) -> u16 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Julian Day Number of a Gregorian date
pub fn gregorian_to_jdn(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) + JDN_CE_OFFSET
}

/// Gregorian date of a Julian Day Number
pub fn jdn_to_gregorian(jdn: i64) -> Option<NaiveDate> {
    i32::try_from(jdn - JDN_CE_OFFSET)
        .ok()
        .and_then(NaiveDate::from_num_days_from_ce_opt)
}

/// Julian Day Number of Farvardin 1 of `year`
fn nowruz_jdn(info: &YearInfo) -> Option<i64> {
    NaiveDate::from_ymd_opt(info.gregorian_year, 3, info.march_day).map(gregorian_to_jdn)
}

/// Julian Day Number of a Jalali date
///
/// Returns `None` for unsupported years. Month and day are not range
/// checked here; out-of-range values roll over arithmetically.
pub fn jalali_to_jdn(year: i32, month: u8, day: u8) -> Option<i64> {
    let info = year_info(year)?;
    let jm = i64::from(month);
    let jd = i64::from(day);
    Some(nowruz_jdn(&info)? + (jm - 1) * 31 - jm / 7 * (jm - 7) + jd - 1)
}

/// Jalali `(year, month, day)` of a Julian Day Number
pub fn jdn_to_jalali(jdn: i64) -> Option<(i32, u8, u8)> {
    let gregorian_year = jdn_to_gregorian(jdn)?.year();
    let mut year = gregorian_year - GREGORIAN_YEAR_OFFSET;
    let info = year_info(year)?;
    let mut k = jdn - nowruz_jdn(&info)?;

    if k >= 0 {
        if k <= 185 {
            return Some((year, (1 + k / 31) as u8, (k % 31 + 1) as u8));
        }
        k -= 186;
    } else {
        year -= 1;
        k += 179;
        if info.leap == 1 {
            k += 1;
        }
    }

    Some((year, (7 + k / 30) as u8, (k % 30 + 1) as u8))
}
