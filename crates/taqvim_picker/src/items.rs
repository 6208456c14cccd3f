//! Wheel item lists

use serde::{Deserialize, Serialize};
use taqvim_calendar::{month_name, to_persian_digits};

/// One selectable entry of a wheel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelItem {
    /// Unique within its wheel
    pub value: i32,
    pub label: String,
}

impl WheelItem {
    pub fn new(value: i32, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// Years from `max` down to `min`, newest first
pub fn year_items(min: i32, max: i32) -> Vec<WheelItem> {
    (min..=max.max(min))
        .rev()
        .map(|year| WheelItem::new(year, to_persian_digits(&year.to_string())))
        .collect()
}

/// Farvardin through Esfand
pub fn month_items() -> Vec<WheelItem> {
    (1..=12u8)
        .map(|month| WheelItem::new(i32::from(month), month_name(month)))
        .collect()
}

/// Days `1..=days`
pub fn day_items(days: u8) -> Vec<WheelItem> {
    (1..=days)
        .map(|day| WheelItem::new(i32::from(day), to_persian_digits(&day.to_string())))
        .collect()
}
