//! Taqvim Calendar
//!
//! Jalali (solar Hijri) date resolution for the picker:
//!
//! - **Arithmetic**: leap years, month lengths, Julian Day Number conversion
//! - **Validated dates**: [`JalaliDate`] never holds a day its month lacks
//! - **Resolver**: the forgiving entry points the picker uses
//!   ([`parse_initial`], [`clamp_year`], [`to_gregorian`], ...)
//! - **Presentation**: Persian month names and digits
//!
//! # Example
//!
//! ```rust
//! use taqvim_calendar::{parse_initial, to_gregorian, JalaliDate};
//!
//! let fallback = JalaliDate::today();
//! let date = parse_initial("1379-10-05", fallback);
//! assert_eq!(to_gregorian(&date), "2000-12-25");
//!
//! // Garbage never escapes, the fallback is used instead
//! assert_eq!(parse_initial("not-a-date", fallback), fallback);
//! ```
//!
//! No process-wide registration is needed before converting: everything is
//! a pure function of its arguments.

pub mod date;
pub mod error;
pub mod jalali;
pub mod locale;
pub mod resolver;

pub use date::JalaliDate;
pub use error::{CalendarError, Result};
pub use jalali::{days_in_month, days_in_year, is_leap_year, MAX_YEAR, MIN_YEAR};
pub use locale::{format_display, month_name, month_name_latin, to_persian_digits, DisplayStyle};
pub use resolver::{
    clamp_year, from_jalali_string, parse_initial, to_gregorian, to_jalali_display,
    to_jalali_string,
};
