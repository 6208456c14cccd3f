//! Picker configuration
//!
//! [`PickerConfig`] is the public option surface of the picker. It can be
//! built in code with the chained setters or loaded from TOML:
//!
//! ```toml
//! min_year = 1300
//! max_year = 1404
//! initial_jalali_date = "1379-10-05"
//! centered = true
//! visible_rows = 5
//! ```
//!
//! Out-of-range values are normalised instead of rejected, so a config never
//! prevents the picker from rendering.

use serde::{Deserialize, Serialize};
use taqvim_calendar::{clamp_year, JalaliDate, MAX_YEAR, MIN_YEAR};
use thiserror::Error;

use crate::geometry::{WheelGeometry, WheelMode};

/// Default lower bound of the year wheel
pub const DEFAULT_MIN_YEAR: i32 = 1300;

/// Default number of visible rows in centered mode
pub const DEFAULT_VISIBLE_ROWS: usize = 5;

/// Default row height in pixels
pub const DEFAULT_ITEM_HEIGHT: f32 = 40.0;

/// Errors reading a config document
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Picker options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Lower bound of the year wheel
    pub min_year: i32,
    /// Upper bound of the year wheel, the current Jalali year when unset
    pub max_year: Option<i32>,
    /// Seed date as `YYYY-MM-DD`; invalid or missing means today
    pub initial_jalali_date: Option<String>,
    /// Centered instead of linear interaction/layout mode
    pub centered: bool,
    /// Visible rows (odd, at least 3); sizes the centered mode spacers and
    /// the viewport of either mode
    pub visible_rows: usize,
    /// Presentation passthrough, no behavioural effect
    pub class_name: String,
    /// Row height in pixels
    pub item_height: f32,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            min_year: DEFAULT_MIN_YEAR,
            max_year: None,
            initial_jalali_date: None,
            centered: false,
            visible_rows: DEFAULT_VISIBLE_ROWS,
            class_name: String::new(),
            item_height: DEFAULT_ITEM_HEIGHT,
        }
    }
}

impl PickerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn min_year(mut self, year: i32) -> Self {
        self.min_year = year;
        self
    }

    pub fn max_year(mut self, year: i32) -> Self {
        self.max_year = Some(year);
        self
    }

    pub fn initial_jalali_date(mut self, date: impl Into<String>) -> Self {
        self.initial_jalali_date = Some(date.into());
        self
    }

    pub fn centered(mut self, centered: bool) -> Self {
        self.centered = centered;
        self
    }

    pub fn visible_rows(mut self, rows: usize) -> Self {
        self.visible_rows = rows;
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn item_height(mut self, height: f32) -> Self {
        self.item_height = height;
        self
    }

    /// Normalise against `today` into the values the picker actually uses
    pub fn resolve(&self, today: JalaliDate) -> ResolvedConfig {
        let min_year = self.min_year.clamp(MIN_YEAR, MAX_YEAR);
        let max_year = self
            .max_year
            .unwrap_or_else(|| today.year())
            .clamp(MIN_YEAR, MAX_YEAR)
            .max(min_year);

        let visible_rows = match self.visible_rows.max(3) {
            even if even % 2 == 0 => even + 1,
            odd => odd,
        };

        let item_height = if self.item_height.is_finite() && self.item_height > 0.0 {
            self.item_height
        } else {
            DEFAULT_ITEM_HEIGHT
        };

        let mode = if self.centered {
            WheelMode::Centered
        } else {
            WheelMode::Linear
        };

        let initial = self
            .initial_jalali_date
            .as_deref()
            .map_or(today, |text| taqvim_calendar::parse_initial(text, today));
        let initial = initial.with_year(clamp_year(initial.year(), min_year, max_year));

        ResolvedConfig {
            min_year,
            max_year,
            initial,
            geometry: WheelGeometry::new(mode, item_height, visible_rows),
        }
    }
}

/// Config after normalisation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedConfig {
    pub min_year: i32,
    pub max_year: i32,
    /// Seed date, already clamped into the year range
    pub initial: JalaliDate,
    pub geometry: WheelGeometry,
}
