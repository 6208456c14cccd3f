//! Three-wheel Jalali date picker
//!
//! [`JalaliPicker`] owns the selected date and three [`Wheel`]s (year, month,
//! day). Wheels report value changes upward; the picker applies calendar
//! rules, keeps the day wheel in step with the month length and debounces an
//! external change notification.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use taqvim_picker::{JalaliPicker, PickerConfig, WheelKind};
//!
//! let config = PickerConfig::new()
//!     .initial_jalali_date("1379-10-05")
//!     .centered(true);
//! let mut picker: JalaliPicker = JalaliPicker::new(config);
//! picker.mount(Duration::ZERO);
//!
//! // Tap the third day
//! picker.select(WheelKind::Day, 2, Duration::ZERO);
//! let events = picker.advance(Duration::from_millis(200));
//!
//! assert_eq!(picker.date().to_string(), "1379-10-03");
//! assert!(events.iter().any(|e| matches!(e, taqvim_picker::PickerEvent::Changed(_))));
//! ```

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use taqvim_calendar::{clamp_year, to_gregorian, to_jalali_string, JalaliDate};
use taqvim_core::{TimerId, TimerQueue};

use crate::config::{PickerConfig, ResolvedConfig};
use crate::items::{day_items, month_items, year_items};
use crate::surface::{PhysicsSurface, ScrollSurface};
use crate::wheel::{Wheel, WheelEvent, WheelEvents};

/// Quiet period before a settled change is announced
pub const NOTIFY_DELAY: Duration = Duration::from_millis(150);

/// Which of the three wheels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelKind {
    Year,
    Month,
    Day,
}

impl WheelKind {
    /// All wheels in display order
    pub const ALL: [WheelKind; 3] = [WheelKind::Day, WheelKind::Month, WheelKind::Year];

    pub fn name(&self) -> &'static str {
        match self {
            WheelKind::Year => "year",
            WheelKind::Month => "month",
            WheelKind::Day => "day",
        }
    }
}

impl fmt::Display for WheelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Payload of the change notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateChange {
    /// `YYYY-MM-DD` in the Jalali calendar
    pub jalali: String,
    /// `YYYY-MM-DD` in the Gregorian calendar
    pub gregorian: String,
}

impl DateChange {
    pub fn new(date: &JalaliDate) -> Self {
        Self {
            jalali: to_jalali_string(date),
            gregorian: to_gregorian(date),
        }
    }
}

/// Something that happened during a picker call
#[derive(Debug, Clone, PartialEq)]
pub enum PickerEvent {
    /// Forwarded from one of the wheels
    Wheel { kind: WheelKind, event: WheelEvent },
    /// Debounced notification fired
    Changed(DateChange),
}

/// Events produced by one call
pub type PickerEvents = SmallVec<[PickerEvent; 4]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PickerTimer {
    Notify,
}

type ChangeCallback = Box<dyn FnMut(&DateChange)>;

/// Day / month / year scroll picker
pub struct JalaliPicker<S: ScrollSurface = PhysicsSurface> {
    config: PickerConfig,
    resolved: ResolvedConfig,
    date: JalaliDate,
    year: Wheel<S>,
    month: Wheel<S>,
    day: Wheel<S>,
    timers: TimerQueue<PickerTimer>,
    notify: Option<TimerId>,
    on_change: Option<ChangeCallback>,
}

impl<S: ScrollSurface> JalaliPicker<S> {
    /// Create a picker seeded from `config`, falling back to today
    pub fn new(config: PickerConfig) -> Self {
        Self::with_today(config, JalaliDate::today())
    }

    /// Create a picker with an explicit notion of "today"
    pub fn with_today(config: PickerConfig, today: JalaliDate) -> Self {
        let resolved = config.resolve(today);
        let date = resolved.initial;
        let geometry = resolved.geometry;

        let mut year = Wheel::new(
            WheelKind::Year.name(),
            year_items(resolved.min_year, resolved.max_year),
            geometry,
        );
        let mut month = Wheel::new(WheelKind::Month.name(), month_items(), geometry);
        let mut day = Wheel::new(
            WheelKind::Day.name(),
            day_items(date.days_in_month()),
            geometry,
        );

        // Unmounted wheels only record the value
        year.set_value(date.year());
        month.set_value(i32::from(date.month()));
        day.set_value(i32::from(date.day()));

        tracing::debug!(
            date = %date,
            min_year = resolved.min_year,
            max_year = resolved.max_year,
            "picker created"
        );

        Self {
            config,
            resolved,
            date,
            year,
            month,
            day,
            timers: TimerQueue::new(),
            notify: None,
            on_change: None,
        }
    }

    /// Register the debounced change callback
    pub fn on_change(mut self, callback: impl FnMut(&DateChange) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    /// Normalised year range and geometry
    pub fn resolved(&self) -> &ResolvedConfig {
        &self.resolved
    }

    /// Currently selected date
    pub fn date(&self) -> JalaliDate {
        self.date
    }

    /// Notification payload for the current date
    pub fn change(&self) -> DateChange {
        DateChange::new(&self.date)
    }

    pub fn wheel(&self, kind: WheelKind) -> &Wheel<S> {
        match kind {
            WheelKind::Year => &self.year,
            WheelKind::Month => &self.month,
            WheelKind::Day => &self.day,
        }
    }

    fn wheel_mut(&mut self, kind: WheelKind) -> &mut Wheel<S> {
        match kind {
            WheelKind::Year => &mut self.year,
            WheelKind::Month => &mut self.month,
            WheelKind::Day => &mut self.day,
        }
    }

    /// Whether a notification is waiting for its debounce
    pub fn has_pending_notification(&self) -> bool {
        self.notify.is_some_and(|id| self.timers.is_pending(id))
    }

    pub fn is_mounted(&self) -> bool {
        WheelKind::ALL
            .iter()
            .all(|kind| self.wheel(*kind).is_mounted())
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Attach surfaces created by `make`, one per wheel
    ///
    /// The starting date is announced once the debounce elapses, like any
    /// other change.
    pub fn mount_with(&mut self, mut make: impl FnMut(WheelKind) -> S, now: Duration) {
        for kind in WheelKind::ALL {
            let surface = make(kind);
            self.wheel_mut(kind).mount(surface, now);
        }
        tracing::debug!(date = %self.date, "picker mounted");
        self.schedule_notify(now);
    }

    /// Tear down: detach surfaces and drop any pending notification
    pub fn unmount(&mut self) {
        for kind in WheelKind::ALL {
            self.wheel_mut(kind).unmount();
        }
        self.timers.clear();
        self.notify = None;
        tracing::debug!("picker unmounted");
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// User drag on a wheel
    pub fn scroll_by(&mut self, kind: WheelKind, delta: f32, now: Duration) {
        self.wheel_mut(kind).scroll_by(delta, now);
    }

    /// User released a wheel with `velocity` pixels per second
    pub fn fling(&mut self, kind: WheelKind, velocity: f32, now: Duration) {
        self.wheel_mut(kind).fling(velocity, now);
    }

    /// Tap an item of a wheel
    pub fn select(&mut self, kind: WheelKind, index: usize, now: Duration) -> PickerEvents {
        let mut out = PickerEvents::new();
        let events = self.wheel_mut(kind).select(index);
        self.dispatch(kind, events, now, &mut out);
        out
    }

    /// Apply a date chosen outside the picker
    ///
    /// The year is clamped into range and the day to the month length.
    /// Wheels being dragged keep their position. Unlike wheel-driven
    /// changes this does not schedule a notification: the host supplied
    /// the value and already knows it.
    pub fn set_date(&mut self, date: JalaliDate) -> PickerEvents {
        let year = clamp_year(date.year(), self.resolved.min_year, self.resolved.max_year);
        let date = date.with_year(year);
        let mut out = PickerEvents::new();
        if date == self.date {
            return out;
        }
        tracing::debug!(from = %self.date, to = %date, "external date");
        self.date = date;

        self.sync_day_items();
        let synced = [
            (WheelKind::Year, date.year()),
            (WheelKind::Month, i32::from(date.month())),
            (WheelKind::Day, i32::from(date.day())),
        ];
        for (kind, value) in synced {
            let events = self.wheel_mut(kind).set_value(value);
            forward(kind, events, &mut out);
        }
        out
    }

    // =========================================================================
    // Frame Loop
    // =========================================================================

    /// Advance every wheel and the notification timer to `now`
    pub fn advance(&mut self, now: Duration) -> PickerEvents {
        let mut out = PickerEvents::new();

        for kind in WheelKind::ALL {
            let events = self.wheel_mut(kind).advance(now);
            self.dispatch(kind, events, now, &mut out);
        }

        for timer in self.timers.take_due(now) {
            match timer {
                PickerTimer::Notify => {
                    self.notify = None;
                    let change = self.change();
                    tracing::debug!(jalali = %change.jalali, gregorian = %change.gregorian, "notify");
                    if let Some(callback) = self.on_change.as_mut() {
                        callback(&change);
                    }
                    out.push(PickerEvent::Changed(change));
                }
            }
        }

        out
    }

    /// Forward wheel events and apply any value change they carry
    fn dispatch(
        &mut self,
        kind: WheelKind,
        events: WheelEvents,
        now: Duration,
        out: &mut PickerEvents,
    ) {
        for event in events {
            let changed = match event {
                WheelEvent::Changed { value, .. } => Some(value),
                _ => None,
            };
            out.push(PickerEvent::Wheel { kind, event });
            if let Some(value) = changed {
                self.apply_change(kind, value, now, out);
            }
        }
    }

    /// Fold a wheel's published value into the date
    fn apply_change(&mut self, kind: WheelKind, value: i32, now: Duration, out: &mut PickerEvents) {
        let before = self.date;
        self.date = match kind {
            WheelKind::Year => self.date.with_year(clamp_year(
                value,
                self.resolved.min_year,
                self.resolved.max_year,
            )),
            WheelKind::Month => match u8::try_from(value) {
                Ok(month) => self.date.with_month(month),
                Err(_) => return,
            },
            WheelKind::Day => match u8::try_from(value) {
                Ok(day) => self.date.with_day(day),
                Err(_) => return,
            },
        };

        if kind != WheelKind::Day {
            // Month length may have changed; the day is already clamped
            self.sync_day_items();
            let events = self.day.set_value(i32::from(self.date.day()));
            forward(WheelKind::Day, events, out);
        }

        if self.date != before {
            tracing::debug!(wheel = %kind, from = %before, to = %self.date, "date changed");
        }
        self.schedule_notify(now);
    }

    /// Rebuild the day wheel when the month length differs from its items
    fn sync_day_items(&mut self) {
        let days = self.date.days_in_month();
        if self.day.items().len() != usize::from(days) {
            tracing::debug!(days, "day wheel resized");
            self.day.set_items(day_items(days));
        }
    }

    fn schedule_notify(&mut self, now: Duration) {
        if let Some(id) = self.notify.take() {
            self.timers.cancel(id);
        }
        self.notify = Some(self.timers.set_timeout(now, NOTIFY_DELAY, PickerTimer::Notify));
    }
}

impl<S: ScrollSurface + Default> JalaliPicker<S> {
    /// Attach default surfaces to all wheels
    pub fn mount(&mut self, now: Duration) {
        self.mount_with(|_| S::default(), now);
    }
}

fn forward(kind: WheelKind, events: WheelEvents, out: &mut PickerEvents) {
    out.extend(
        events
            .into_iter()
            .map(|event| PickerEvent::Wheel { kind, event }),
    );
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::wheel::WheelState;
    use taqvim_calendar::days_in_month;

    const FRAME: Duration = Duration::from_millis(16);

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn today() -> JalaliDate {
        JalaliDate::new(1404, 7, 26).unwrap()
    }

    fn mounted(config: PickerConfig) -> JalaliPicker {
        let mut picker = JalaliPicker::with_today(config, today());
        picker.mount(Duration::ZERO);
        picker
    }

    fn notifications(events: &[PickerEvent]) -> Vec<DateChange> {
        events
            .iter()
            .filter_map(|e| match e {
                PickerEvent::Changed(change) => Some(change.clone()),
                _ => None,
            })
            .collect()
    }

    fn run(picker: &mut JalaliPicker, from: Duration, until: Duration) -> Vec<PickerEvent> {
        let mut events = Vec::new();
        let mut now = from;
        while now <= until {
            events.extend(picker.advance(now));
            now += FRAME;
        }
        events
    }

    #[test]
    fn test_initial_date_announced_after_mount() {
        let mut picker = mounted(PickerConfig::new().initial_jalali_date("1379-10-05"));
        assert_eq!(picker.wheel(WheelKind::Day).items().len(), 30);
        assert_eq!(picker.wheel(WheelKind::Month).value(), Some(10));
        assert!(picker.has_pending_notification());

        assert!(notifications(&picker.advance(ms(149))).is_empty());
        let events = run(&mut picker, ms(150), ms(1000));
        assert_eq!(
            notifications(&events),
            vec![DateChange {
                jalali: "1379-10-05".into(),
                gregorian: "2000-12-25".into(),
            }]
        );
        assert!(!picker.has_pending_notification());
    }

    #[test]
    fn test_unmounted_picker_stays_silent() {
        let mut picker =
            JalaliPicker::<PhysicsSurface>::with_today(PickerConfig::new(), today());
        assert!(!picker.has_pending_notification());
        assert!(notifications(&picker.advance(ms(500))).is_empty());
    }

    #[test]
    fn test_invalid_initial_date_uses_today() {
        let picker = mounted(PickerConfig::new().initial_jalali_date("not-a-date"));
        assert_eq!(picker.date(), today());
        assert_eq!(picker.wheel(WheelKind::Year).value(), Some(1404));
    }

    #[test]
    fn test_year_change_clamps_leap_day() {
        let mut picker = mounted(
            PickerConfig::new()
                .max_year(1404)
                .initial_jalali_date("1403-12-30")
                .centered(true),
        );
        assert_eq!(picker.wheel(WheelKind::Day).items().len(), 30);

        // Years are listed newest first
        picker.select(WheelKind::Year, 0, ms(0));
        assert_eq!(picker.date().to_string(), "1404-12-29");
        assert_eq!(picker.wheel(WheelKind::Day).items().len(), 29);
        assert_eq!(picker.wheel(WheelKind::Day).value(), Some(29));

        let events = run(&mut picker, ms(16), ms(1000));
        assert_eq!(
            notifications(&events),
            vec![DateChange {
                jalali: "1404-12-29".into(),
                gregorian: "2026-03-20".into(),
            }]
        );
        assert_eq!(picker.wheel(WheelKind::Day).offset(), 28.0 * 40.0);
    }

    #[test]
    fn test_rapid_scroll_snaps_once_and_notifies_once() {
        let mut picker = mounted(
            PickerConfig::new()
                .initial_jalali_date("1403-01-01")
                .centered(true),
        );
        // Years run newest first; 1403 sits at index 1
        assert_eq!(picker.wheel(WheelKind::Year).offset(), 40.0);

        let mut timeline: Vec<(Duration, PickerEvent)> = Vec::new();
        for step in 0..10u64 {
            let now = ms(step * 10);
            picker.scroll_by(WheelKind::Year, 9.0, now);
            timeline.extend(picker.advance(now).into_iter().map(|e| (now, e)));
        }
        let mut now = ms(100);
        while now <= ms(2000) {
            timeline.extend(picker.advance(now).into_iter().map(|e| (now, e)));
            now += FRAME;
        }

        let snaps = timeline
            .iter()
            .filter(|(_, e)| {
                matches!(
                    e,
                    PickerEvent::Wheel {
                        kind: WheelKind::Year,
                        event: WheelEvent::Snapped { .. }
                    }
                )
            })
            .count();
        assert_eq!(snaps, 1);

        let last_change = timeline
            .iter()
            .filter(|(_, e)| {
                matches!(
                    e,
                    PickerEvent::Wheel {
                        kind: WheelKind::Year,
                        event: WheelEvent::Changed { .. }
                    }
                )
            })
            .map(|(at, _)| *at)
            .max()
            .unwrap();

        let notified: Vec<_> = timeline
            .iter()
            .filter_map(|(at, e)| match e {
                PickerEvent::Changed(change) => Some((*at, change.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(notified.len(), 1);
        let (at, change) = &notified[0];
        assert_eq!(change.jalali, "1401-01-01");
        assert!(*at >= last_change + NOTIFY_DELAY);
        assert!(*at < last_change + NOTIFY_DELAY + FRAME * 2);

        assert_eq!(picker.date().to_string(), "1401-01-01");
        assert_eq!(picker.wheel(WheelKind::Year).offset(), 120.0);
        assert_eq!(picker.wheel(WheelKind::Year).state(), WheelState::Idle);
    }

    #[test]
    fn test_single_year_range() {
        let picker = mounted(
            PickerConfig::new()
                .min_year(1390)
                .max_year(1390)
                .initial_jalali_date("1379-10-05"),
        );
        let year = picker.wheel(WheelKind::Year);
        assert_eq!(year.items().len(), 1);
        assert_eq!(year.committed_index(), 0);
        assert_eq!(picker.date().to_string(), "1390-10-05");
    }

    #[test]
    fn test_burst_of_changes_coalesces() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut picker = JalaliPicker::<PhysicsSurface>::with_today(
            PickerConfig::new().initial_jalali_date("1403-06-31"),
            today(),
        )
        .on_change(move |change| sink.borrow_mut().push(change.clone()));
        picker.mount(Duration::ZERO);

        picker.select(WheelKind::Month, 1, ms(0));
        picker.advance(ms(50));
        picker.select(WheelKind::Month, 5, ms(50));
        picker.advance(ms(100));
        picker.select(WheelKind::Month, 11, ms(100));
        assert!(picker.advance(ms(240)).iter().all(|e| !matches!(e, PickerEvent::Changed(_))));

        run(&mut picker, ms(250), ms(1000));
        assert_eq!(
            seen.borrow().as_slice(),
            &[DateChange {
                jalali: "1403-12-30".into(),
                gregorian: "2025-03-20".into(),
            }]
        );
    }

    #[test]
    fn test_day_never_exceeds_month_length() {
        let mut picker = mounted(
            PickerConfig::new()
                .min_year(1395)
                .max_year(1404)
                .initial_jalali_date("1399-06-31")
                .centered(true),
        );

        let mut now = Duration::ZERO;
        for step in 0..60usize {
            let kind = WheelKind::ALL[step % 3];
            let count = picker.wheel(kind).items().len();
            picker.select(kind, (step * 7) % count, now);
            now += ms(30);
            picker.advance(now);

            let date = picker.date();
            let days = days_in_month(date.year(), date.month());
            assert!(date.day() <= days);
            assert_eq!(picker.wheel(WheelKind::Day).items().len(), usize::from(days));
        }
    }

    #[test]
    fn test_set_date_leaves_dragged_wheel_alone() {
        let mut picker = mounted(
            PickerConfig::new()
                .initial_jalali_date("1403-01-01")
                .centered(true),
        );
        picker.scroll_by(WheelKind::Day, 30.0, ms(0));
        picker.advance(ms(16));

        let target = JalaliDate::new(1403, 1, 20).unwrap();
        let events = picker.set_date(target);
        assert!(!events.iter().any(|e| matches!(
            e,
            PickerEvent::Wheel {
                kind: WheelKind::Day,
                ..
            }
        )));
        assert_eq!(picker.wheel(WheelKind::Day).state(), WheelState::UserScrolling);

        // The gesture finishes where the user left it and wins
        run(&mut picker, ms(32), ms(2000));
        assert_eq!(picker.date().to_string(), "1403-01-02");
    }

    #[test]
    fn test_set_date_scrolls_idle_wheels_without_notifying() {
        let mut picker = mounted(
            PickerConfig::new()
                .initial_jalali_date("1403-01-01")
                .centered(true),
        );
        let announced = run(&mut picker, ms(0), ms(200));
        assert_eq!(notifications(&announced).len(), 1);

        let events = picker.set_date(JalaliDate::new(1403, 3, 10).unwrap());
        let commanded: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                PickerEvent::Wheel {
                    kind,
                    event: WheelEvent::ScrollCommanded { .. },
                } => Some(*kind),
                _ => None,
            })
            .collect();
        assert_eq!(commanded, vec![WheelKind::Month, WheelKind::Day]);

        let events = run(&mut picker, ms(208), ms(2000));
        assert!(notifications(&events).is_empty());
        assert_eq!(picker.wheel(WheelKind::Month).offset(), 80.0);
        assert_eq!(picker.wheel(WheelKind::Day).offset(), 360.0);
    }

    #[test]
    fn test_set_date_clamps_year() {
        let mut picker = mounted(PickerConfig::new().min_year(1390).max_year(1400));
        picker.set_date(JalaliDate::new(1410, 5, 5).unwrap());
        assert_eq!(picker.date().to_string(), "1400-05-05");
        assert_eq!(picker.wheel(WheelKind::Year).committed_index(), 0);
    }

    #[test]
    fn test_unmount_drops_pending_notification() {
        let mut picker = mounted(PickerConfig::new().initial_jalali_date("1403-01-01"));
        picker.select(WheelKind::Day, 4, ms(0));
        assert!(picker.has_pending_notification());

        picker.unmount();
        assert!(!picker.is_mounted());
        assert!(!picker.has_pending_notification());
        assert!(notifications(&picker.advance(ms(500))).is_empty());
    }

    #[test]
    fn test_change_serializes_as_json() {
        let change = DateChange::new(&JalaliDate::new(1379, 10, 5).unwrap());
        let json = serde_json::to_string(&change).unwrap();
        assert_eq!(json, r#"{"jalali":"1379-10-05","gregorian":"2000-12-25"}"#);
    }
}
