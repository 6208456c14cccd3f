//! Persian presentation helpers
//!
//! Month names, Persian (Extended Arabic-Indic) digits and the localized
//! display form used for the picker's labels.

use crate::date::JalaliDate;

/// Jalali month names in Persian script
pub const MONTHS_FA: [&str; 12] = [
    "فروردین",
    "اردیبهشت",
    "خرداد",
    "تیر",
    "مرداد",
    "شهریور",
    "مهر",
    "آبان",
    "آذر",
    "دی",
    "بهمن",
    "اسفند",
];

/// Jalali month names transliterated to Latin script
pub const MONTHS_LATIN: [&str; 12] = [
    "Farvardin",
    "Ordibehesht",
    "Khordad",
    "Tir",
    "Mordad",
    "Shahrivar",
    "Mehr",
    "Aban",
    "Azar",
    "Dey",
    "Bahman",
    "Esfand",
];

/// How a date is rendered for people
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayStyle {
    /// `۱۳۷۹/۱۰/۰۵`
    Numeric,
    /// `۵ دی ۱۳۷۹`
    #[default]
    Long,
}

/// Persian name of a month (1-based, clamped)
pub fn month_name(month: u8) -> &'static str {
    MONTHS_FA[usize::from(month.clamp(1, 12)) - 1]
}

/// Latin transliteration of a month name (1-based, clamped)
pub fn month_name_latin(month: u8) -> &'static str {
    MONTHS_LATIN[usize::from(month.clamp(1, 12)) - 1]
}

/// Replace ASCII digits with Persian digits, leaving everything else alone
pub fn to_persian_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) if c.is_ascii_digit() => char::from_u32(0x06F0 + d).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// Render a date for display in the given style
pub fn format_display(date: &JalaliDate, style: DisplayStyle) -> String {
    let latin = match style {
        DisplayStyle::Numeric => {
            format!("{:04}/{:02}/{:02}", date.year(), date.month(), date.day())
        }
        DisplayStyle::Long => format!(
            "{} {} {}",
            date.day(),
            month_name(date.month()),
            date.year()
        ),
    };
    to_persian_digits(&latin)
}
