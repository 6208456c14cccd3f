//! Scripted gestures against a picker
//!
//! A script is a `;` separated list of steps:
//!
//! ```text
//! drag day 90        drag the day wheel by 90px (one 10px move per frame)
//! fling year 1200    release the year wheel at 1200px/s
//! select month 11    tap the 12th month
//! set 1403-12-30     external date
//! wait 300           let 300ms of frames pass
//! ```
//!
//! After the last step the clock keeps running until every wheel is idle and
//! the pending notification has fired.

use anyhow::{bail, Context, Result};
use std::time::Duration;
use taqvim_calendar::JalaliDate;
use taqvim_picker::{DateChange, JalaliPicker, PickerEvent, WheelKind, WheelState};

/// Largest drag distance applied in one frame
const DRAG_CHUNK: f32 = 10.0;

/// Upper bound on the drain after the script ends
const DRAIN_LIMIT: Duration = Duration::from_secs(10);

/// Longest drag a single step may ask for, in pixels
const MAX_DRAG: f32 = 1_000_000.0;

/// Longest single wait
const MAX_WAIT: Duration = Duration::from_secs(3600);

/// One scripted action
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Drag { wheel: WheelKind, distance: f32 },
    Fling { wheel: WheelKind, velocity: f32 },
    Select { wheel: WheelKind, index: usize },
    Set(JalaliDate),
    Wait(Duration),
}

fn parse_amount(word: &str, what: &str, limit: f32) -> Result<f32> {
    let value: f32 = word
        .parse()
        .with_context(|| format!("Invalid {} '{}'", what, word))?;
    if !value.is_finite() || value.abs() > limit {
        bail!("{} '{}' must be a finite number within ±{}", what, word, limit);
    }
    Ok(value)
}

fn parse_wheel(word: &str) -> Result<WheelKind> {
    match word {
        "year" => Ok(WheelKind::Year),
        "month" => Ok(WheelKind::Month),
        "day" => Ok(WheelKind::Day),
        other => bail!("Unknown wheel '{}'. Valid wheels: year, month, day", other),
    }
}

/// Parse a gesture script
pub fn parse_script(script: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();

    for raw in script.split(';') {
        let words: Vec<&str> = raw.split_whitespace().collect();
        let step = match words.as_slice() {
            [] => continue,
            ["drag", wheel, distance] => Step::Drag {
                wheel: parse_wheel(wheel)?,
                distance: parse_amount(distance, "drag distance", MAX_DRAG)?,
            },
            ["fling", wheel, velocity] => Step::Fling {
                wheel: parse_wheel(wheel)?,
                velocity: parse_amount(velocity, "fling velocity", f32::MAX)?,
            },
            ["select", wheel, index] => Step::Select {
                wheel: parse_wheel(wheel)?,
                index: index
                    .parse()
                    .with_context(|| format!("Invalid item index '{}'", index))?,
            },
            ["set", date] => Step::Set(
                date.parse::<JalaliDate>()
                    .with_context(|| format!("Invalid Jalali date '{}'", date))?,
            ),
            ["wait", millis] => {
                let wait = Duration::from_millis(
                    millis
                        .parse()
                        .with_context(|| format!("Invalid wait '{}'", millis))?,
                );
                if wait > MAX_WAIT {
                    bail!("Wait '{}' exceeds the {:?} limit", millis, MAX_WAIT);
                }
                Step::Wait(wait)
            }
            _ => bail!("Cannot parse step '{}'", raw.trim()),
        };
        steps.push(step);
    }

    Ok(steps)
}

/// A mounted picker plus its simulated clock
pub struct Simulation {
    picker: JalaliPicker,
    now: Duration,
    frame: Duration,
    changes: Vec<DateChange>,
}

impl Simulation {
    pub fn new(mut picker: JalaliPicker, frame: Duration) -> Self {
        picker.mount(Duration::ZERO);
        Self {
            picker,
            now: Duration::ZERO,
            frame: frame.max(Duration::from_millis(1)),
            changes: Vec::new(),
        }
    }

    /// Run every step, then drain; returns the notifications in order
    pub fn run(mut self, steps: &[Step]) -> (JalaliPicker, Vec<DateChange>) {
        for step in steps {
            tracing::debug!(at = ?self.now, ?step, "step");
            self.apply(step);
        }
        self.drain();
        (self.picker, self.changes)
    }

    fn apply(&mut self, step: &Step) {
        match *step {
            Step::Drag { wheel, distance } => {
                if !distance.is_finite() {
                    tracing::warn!(%wheel, distance, "ignoring non-finite drag");
                    return;
                }
                let frames = (distance.abs() / DRAG_CHUNK).ceil() as u32;
                let mut remaining = distance;
                for _ in 0..frames {
                    let delta = remaining.clamp(-DRAG_CHUNK, DRAG_CHUNK);
                    self.picker.scroll_by(wheel, delta, self.now);
                    remaining -= delta;
                    self.frame();
                }
            }
            Step::Fling { wheel, velocity } => {
                self.picker.fling(wheel, velocity, self.now);
                self.frame();
            }
            Step::Select { wheel, index } => {
                let events = self.picker.select(wheel, index, self.now);
                self.record(events);
                self.frame();
            }
            Step::Set(date) => {
                let events = self.picker.set_date(date);
                self.record(events);
                self.frame();
            }
            Step::Wait(duration) => {
                let until = self.now.saturating_add(duration.min(MAX_WAIT));
                while self.now < until {
                    self.frame();
                }
            }
        }
    }

    fn frame(&mut self) {
        let events = self.picker.advance(self.now);
        self.record(events);
        self.now += self.frame;
    }

    fn is_quiet(&self) -> bool {
        !self.picker.has_pending_notification()
            && WheelKind::ALL
                .iter()
                .all(|kind| self.picker.wheel(*kind).state() == WheelState::Idle)
    }

    fn drain(&mut self) {
        let limit = self.now + DRAIN_LIMIT;
        while !self.is_quiet() && self.now < limit {
            self.frame();
        }
        if !self.is_quiet() {
            tracing::warn!("picker still busy after {:?}", DRAIN_LIMIT);
        }
    }

    fn record(&mut self, events: impl IntoIterator<Item = PickerEvent>) {
        for event in events {
            match event {
                PickerEvent::Wheel { kind, event } => {
                    tracing::debug!(at = ?self.now, wheel = %kind, ?event, "wheel");
                }
                PickerEvent::Changed(change) => self.changes.push(change),
            }
        }
    }
}
