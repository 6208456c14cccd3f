//! Taqvim Picker
//!
//! A toolkit-independent day / month / year scroll picker for the Jalali
//! calendar.
//!
//! # Architecture
//!
//! ```text
//! JalaliPicker ── owns the selected date, debounces notifications
//!   ├── Wheel (year)  ─┐
//!   ├── Wheel (month) ─┼── state machine + idle timer + frame callback
//!   └── Wheel (day)   ─┘        │
//!                               ▼
//!                        ScrollSurface (PhysicsSurface by default)
//! ```
//!
//! The host owns the clock. It forwards user input (`scroll_by`, `fling`,
//! `select`) and calls [`JalaliPicker::advance`] once per display refresh.

pub mod config;
pub mod geometry;
pub mod items;
pub mod picker;
pub mod surface;
pub mod wheel;

pub use config::{ConfigError, PickerConfig, ResolvedConfig};
pub use geometry::{WheelGeometry, WheelMode};
pub use items::{day_items, month_items, year_items, WheelItem};
pub use picker::{DateChange, JalaliPicker, PickerEvent, PickerEvents, WheelKind, NOTIFY_DELAY};
pub use surface::{PhysicsSurface, ScrollBehavior, ScrollSource, ScrollSurface, SurfaceConfig};
pub use wheel::{Wheel, WheelEvent, WheelEvents, WheelState, IDLE_DELAY};

pub use taqvim_calendar::JalaliDate;
