//! Scroll wheel interaction controller
//!
//! One wheel of the picker. Tracks the continuous scroll offset of its
//! surface, maps it onto a discrete item, and snaps onto that item once the
//! gesture goes quiet. The wheel only *reports* value changes; calendar
//! semantics live in the composite picker.
//!
//! # State Machine
//!
//! ```text
//!        scroll                       idle 120ms
//! Idle ─────────────► UserScrolling ─────────────► SettlingSnap
//!  ▲  ▲                 ▲    │ scroll (restart)         │
//!  │  │                 └────┘                          │ snap landed
//!  │  └─────────────────────────────────────────────────┘
//!  │
//!  │ landed           external value / select
//!  └──────── ProgrammaticScroll ◄──────────── Idle
//! ```
//!
//! A scroll signal from the user always wins: it moves `SettlingSnap` and
//! `ProgrammaticScroll` back to `UserScrolling`. External values never issue
//! a scroll command while the user is scrolling or the snap is settling.
//!
//! # Timing
//!
//! Each scroll signal restarts a 120ms idle timer and replaces the pending
//! frame request. The frame callback publishes the item under the current
//! offset (live preview); the idle timer triggers the snap.

use std::time::Duration;

use smallvec::SmallVec;
use taqvim_core::event_types::*;
use taqvim_core::{event_name, FrameId, StateTransitions, TimerId, TimerQueue, Transitioned};

use crate::geometry::WheelGeometry;
use crate::items::WheelItem;
use crate::surface::{ScrollBehavior, ScrollSource, ScrollSurface};

/// Quiet period after the last scroll signal before snapping
pub const IDLE_DELAY: Duration = Duration::from_millis(120);

/// Distance under which an external value does not move the wheel
const EXTERNAL_EPSILON: f32 = 0.5;

/// Distance under which a clicked item is considered already in place
const SELECT_EPSILON: f32 = 1.0;

// ============================================================================
// Wheel State
// ============================================================================

/// Interaction state of a wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WheelState {
    /// At rest on an item
    #[default]
    Idle,
    /// The user (or their fling) is moving the wheel
    UserScrolling,
    /// Gesture went quiet, snap animation running
    SettlingSnap,
    /// Moving to a value chosen from outside or by click
    ProgrammaticScroll,
}

impl WheelState {
    /// Whether an external value must leave the wheel alone
    pub fn is_gesture(&self) -> bool {
        matches!(self, WheelState::UserScrolling | WheelState::SettlingSnap)
    }
}

impl StateTransitions for WheelState {
    fn on_event(&self, event: u32) -> Option<Self> {
        use WheelState::*;

        match (self, event) {
            (Idle, SCROLL) => Some(UserScrolling),
            (UserScrolling, SCROLL) => None,
            (SettlingSnap, SCROLL) => Some(UserScrolling),
            (ProgrammaticScroll, SCROLL) => Some(UserScrolling),

            (UserScrolling, IDLE_TIMEOUT) => Some(SettlingSnap),

            (SettlingSnap, SCROLL_SETTLED) => Some(Idle),
            (ProgrammaticScroll, SCROLL_SETTLED) => Some(Idle),

            // Suppressed during a gesture
            (Idle, EXTERNAL_VALUE) => Some(ProgrammaticScroll),
            (ProgrammaticScroll, EXTERNAL_VALUE) => Some(ProgrammaticScroll),

            (_, SELECT) => Some(ProgrammaticScroll),

            _ => None,
        }
    }
}

// ============================================================================
// Wheel Events
// ============================================================================

/// Something the wheel reports upward
#[derive(Debug, Clone, PartialEq)]
pub enum WheelEvent {
    /// The item under the wheel changed to `value`
    Changed { index: usize, value: i32 },
    /// Gesture settled; animating onto the item at `offset`
    Snapped { index: usize, offset: f32 },
    /// An external value or click started a programmatic scroll
    ScrollCommanded { index: usize, offset: f32 },
    /// The wheel came to rest
    Settled { index: usize, offset: f32 },
}

/// Events produced by one call; usually zero or one
pub type WheelEvents = SmallVec<[WheelEvent; 2]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WheelTimer {
    Idle,
    Frame,
}

// ============================================================================
// Wheel
// ============================================================================

/// A single scroll wheel
pub struct Wheel<S: ScrollSurface> {
    name: &'static str,
    items: Vec<WheelItem>,
    geometry: WheelGeometry,
    state: WheelState,
    /// Index the wheel rests on (or is heading to)
    committed: usize,
    /// Last value reported upward or received from outside
    value: Option<i32>,
    surface: Option<S>,
    timers: TimerQueue<WheelTimer>,
    idle_timer: Option<TimerId>,
    frame: Option<FrameId>,
    last_tick: Option<Duration>,
}

impl<S: ScrollSurface> Wheel<S> {
    /// Create an unmounted wheel resting on its first item
    pub fn new(name: &'static str, items: Vec<WheelItem>, geometry: WheelGeometry) -> Self {
        let value = items.first().map(|item| item.value);
        Self {
            name,
            items,
            geometry,
            state: WheelState::Idle,
            committed: 0,
            value,
            surface: None,
            timers: TimerQueue::new(),
            idle_timer: None,
            frame: None,
            last_tick: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn state(&self) -> WheelState {
        self.state
    }

    pub fn items(&self) -> &[WheelItem] {
        &self.items
    }

    pub fn geometry(&self) -> &WheelGeometry {
        &self.geometry
    }

    /// Index the wheel rests on or is moving to
    pub fn committed_index(&self) -> usize {
        self.committed
    }

    /// Current value of the wheel
    pub fn value(&self) -> Option<i32> {
        self.value
    }

    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Current scroll offset (0 when unmounted)
    pub fn offset(&self) -> f32 {
        self.surface.as_ref().map_or(0.0, |s| s.offset())
    }

    /// Whether an idle timer is pending
    pub fn has_pending_idle(&self) -> bool {
        self.idle_timer.is_some_and(|id| self.timers.is_pending(id))
    }

    /// Whether a frame callback is pending
    pub fn has_pending_frame(&self) -> bool {
        self.frame.is_some()
    }

    /// Scroll range for the current item list
    pub fn max_offset(&self) -> f32 {
        self.geometry.max_offset(self.items.len())
    }

    /// Exact resting offset of an item
    pub fn offset_for_index(&self, index: usize) -> f32 {
        self.geometry
            .offset_for_index(index, self.max_offset(), self.items.len())
    }

    fn nearest_index(&self, surface: &S) -> usize {
        self.geometry
            .index_for_offset(surface.offset(), surface.max_offset(), self.items.len())
    }

    fn index_of(&self, value: i32) -> Option<usize> {
        self.items.iter().position(|item| item.value == value)
    }

    fn transition(&mut self, event: u32) -> bool {
        match self.state.apply(event) {
            Some((from, to)) => {
                tracing::debug!(
                    wheel = self.name,
                    "{:?} -> {:?} on {}",
                    from,
                    to,
                    event_name(event)
                );
                true
            }
            None => false,
        }
    }

    /// Publish the item at `index` if its value differs from the last one
    fn publish(&mut self, index: usize, events: &mut WheelEvents) {
        self.committed = index;
        let Some(value) = self.items.get(index).map(|item| item.value) else {
            return;
        };
        if self.value != Some(value) {
            tracing::debug!(wheel = self.name, index, value, "value changed");
            self.value = Some(value);
            events.push(WheelEvent::Changed { index, value });
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Attach a surface and place it on the committed item
    pub fn mount(&mut self, mut surface: S, now: Duration) {
        surface.set_max_offset(self.max_offset());
        surface.scroll_to(self.offset_for_index(self.committed), ScrollBehavior::Instant);
        self.surface = Some(surface);
        self.state = WheelState::Idle;
        self.last_tick = Some(now);
        tracing::debug!(wheel = self.name, index = self.committed, "mounted");
    }

    /// Detach the surface, cancelling the idle timer and any frame request
    pub fn unmount(&mut self) -> Option<S> {
        self.timers.clear();
        self.idle_timer = None;
        self.frame = None;
        self.last_tick = None;
        self.state = WheelState::Idle;
        tracing::debug!(wheel = self.name, "unmounted");
        self.surface.take()
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// User drag by `delta` pixels
    pub fn scroll_by(&mut self, delta: f32, now: Duration) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.apply_scroll_delta(delta);
        self.on_scroll(now);
    }

    /// User released the wheel with `velocity` pixels per second
    pub fn fling(&mut self, velocity: f32, now: Duration) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.fling(velocity);
        self.on_scroll(now);
    }

    /// Scroll-position-changed signal from user input or momentum
    fn on_scroll(&mut self, now: Duration) {
        self.transition(SCROLL);

        if let Some(id) = self.idle_timer.take() {
            self.timers.cancel(id);
        }
        self.idle_timer = Some(self.timers.set_timeout(now, IDLE_DELAY, WheelTimer::Idle));

        if let Some(id) = self.frame.take() {
            self.timers.cancel_frame(id);
        }
        self.frame = Some(self.timers.request_frame(WheelTimer::Frame));
    }

    /// Pick an item directly (click / tap)
    pub fn select(&mut self, index: usize) -> WheelEvents {
        let mut events = WheelEvents::new();
        if self.items.is_empty() {
            return events;
        }
        let index = index.min(self.items.len() - 1);

        if let Some(id) = self.idle_timer.take() {
            self.timers.cancel(id);
        }
        if let Some(id) = self.frame.take() {
            self.timers.cancel_frame(id);
        }

        self.publish(index, &mut events);

        if !self.is_mounted() {
            return events;
        }
        self.transition(SELECT);

        let target = self.offset_for_index(index);
        if (self.offset() - target).abs() > SELECT_EPSILON {
            if let Some(surface) = self.surface.as_mut() {
                surface.scroll_to(target, ScrollBehavior::Smooth);
            }
            events.push(WheelEvent::ScrollCommanded {
                index,
                offset: target,
            });
        }
        events
    }

    /// Apply a value chosen outside the wheel
    ///
    /// Returns the scroll command issued, if any. Nothing moves while the
    /// user is scrolling or the snap is settling; the value is still
    /// remembered so the settle only publishes a genuine difference.
    pub fn set_value(&mut self, value: i32) -> WheelEvents {
        let mut events = WheelEvents::new();
        let Some(index) = self.index_of(value) else {
            tracing::debug!(wheel = self.name, value, "external value not on wheel");
            return events;
        };
        self.value = Some(value);

        if self.state.is_gesture() {
            tracing::debug!(
                wheel = self.name,
                value,
                "external value during gesture, not scrolling"
            );
            return events;
        }
        self.committed = index;

        if !self.is_mounted() {
            return events;
        }
        let target = self.offset_for_index(index);
        if (self.offset() - target).abs() > EXTERNAL_EPSILON && self.transition(EXTERNAL_VALUE) {
            if let Some(surface) = self.surface.as_mut() {
                surface.scroll_to(target, ScrollBehavior::Smooth);
            }
            events.push(WheelEvent::ScrollCommanded {
                index,
                offset: target,
            });
        }
        events
    }

    /// Replace the item list (e.g. month length changed)
    ///
    /// The committed index is clamped into the new list; the current value
    /// is left for the owner to reconcile through [`Wheel::set_value`].
    pub fn set_items(&mut self, items: Vec<WheelItem>) {
        self.items = items;
        self.committed = self.committed.min(self.items.len().saturating_sub(1));
        let max_offset = self.max_offset();
        if let Some(surface) = self.surface.as_mut() {
            surface.set_max_offset(max_offset);
        }
    }

    // =========================================================================
    // Frame Loop
    // =========================================================================

    /// Advance to `now`: physics, frame callback, idle timer, settle check
    pub fn advance(&mut self, now: Duration) -> WheelEvents {
        let mut events = WheelEvents::new();
        let Some(surface) = self.surface.as_mut() else {
            // Torn down: pending callbacks are dropped
            self.timers.clear();
            return events;
        };

        let dt = self
            .last_tick
            .map_or(Duration::ZERO, |last| now.saturating_sub(last));
        self.last_tick = Some(now);

        if surface.tick(dt.as_secs_f32()) == Some(ScrollSource::Momentum) {
            self.on_scroll(now);
        }

        for timer in self.timers.take_frames() {
            if timer == WheelTimer::Frame {
                self.frame = None;
                self.on_frame(&mut events);
            }
        }

        for timer in self.timers.take_due(now) {
            if timer == WheelTimer::Idle {
                self.idle_timer = None;
                self.settle(&mut events);
            }
        }

        let resting = self.surface.as_ref().is_some_and(|s| !s.is_animating());
        if resting
            && matches!(
                self.state,
                WheelState::SettlingSnap | WheelState::ProgrammaticScroll
            )
            && self.transition(SCROLL_SETTLED)
        {
            events.push(WheelEvent::Settled {
                index: self.committed,
                offset: self.offset(),
            });
        }

        events
    }

    /// Live preview while the gesture is running
    fn on_frame(&mut self, events: &mut WheelEvents) {
        if self.state != WheelState::UserScrolling {
            return;
        }
        let Some(index) = self.surface.as_ref().map(|s| self.nearest_index(s)) else {
            return;
        };
        tracing::trace!(wheel = self.name, index, offset = self.offset(), "frame");
        self.publish(index, events);
    }

    /// Gesture went quiet: publish and snap onto the nearest item
    fn settle(&mut self, events: &mut WheelEvents) {
        if !self.transition(IDLE_TIMEOUT) {
            return;
        }
        let Some(index) = self.surface.as_ref().map(|s| self.nearest_index(s)) else {
            return;
        };
        self.publish(index, events);

        let target = self.offset_for_index(index);
        if let Some(surface) = self.surface.as_mut() {
            surface.scroll_to(target, ScrollBehavior::Smooth);
        }
        tracing::debug!(wheel = self.name, index, target, "snapping");
        events.push(WheelEvent::Snapped {
            index,
            offset: target,
        });
    }
}
