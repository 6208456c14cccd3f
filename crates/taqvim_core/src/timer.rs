//! Cooperative timer queue
//!
//! Single-threaded scheduling of one-shot timeouts and next-frame
//! callbacks. Nothing runs in the background: the owner calls
//! [`TimerQueue::take_due`] and [`TimerQueue::take_frames`] from its own
//! frame loop and dispatches the returned payloads itself.
//!
//! Timers are identified by slotmap keys, so a cancelled or already fired
//! handle is simply stale and cancelling it again is harmless.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use taqvim_core::timer::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! let idle = timers.set_timeout(Duration::ZERO, Duration::from_millis(120), "idle");
//!
//! // Restarting a debounce is cancel + schedule
//! timers.cancel(idle);
//! timers.set_timeout(Duration::from_millis(50), Duration::from_millis(120), "idle");
//!
//! assert!(timers.take_due(Duration::from_millis(150)).is_empty());
//! assert_eq!(timers.take_due(Duration::from_millis(170)).as_slice(), &["idle"]);
//! ```

use std::time::Duration;

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Handle to a pending one-shot timeout
    pub struct TimerId;
    /// Handle to a pending frame callback
    pub struct FrameId;
}

/// Batch of fired payloads. Most frames fire zero or one timer.
pub type Fired<T> = SmallVec<[T; 2]>;

struct Timeout<T> {
    deadline: Duration,
    seq: u64,
    payload: T,
}

struct FrameRequest<T> {
    seq: u64,
    payload: T,
}

/// Queue of one-shot timeouts and next-frame callbacks
pub struct TimerQueue<T> {
    timeouts: SlotMap<TimerId, Timeout<T>>,
    frames: SlotMap<FrameId, FrameRequest<T>>,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            timeouts: SlotMap::with_key(),
            frames: SlotMap::with_key(),
            next_seq: 0,
        }
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Schedule `payload` to fire once `delay` has elapsed after `now`
    pub fn set_timeout(&mut self, now: Duration, delay: Duration, payload: T) -> TimerId {
        let seq = self.bump_seq();
        self.timeouts.insert(Timeout {
            deadline: now + delay,
            seq,
            payload,
        })
    }

    /// Cancel a pending timeout
    ///
    /// Returns false if the timer already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timeouts.remove(id).is_some()
    }

    /// Check whether a timeout is still pending
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timeouts.contains_key(id)
    }

    /// Request a callback on the next frame
    pub fn request_frame(&mut self, payload: T) -> FrameId {
        let seq = self.bump_seq();
        self.frames.insert(FrameRequest { seq, payload })
    }

    /// Cancel a pending frame callback
    pub fn cancel_frame(&mut self, id: FrameId) -> bool {
        self.frames.remove(id).is_some()
    }

    /// Remove and return every timeout whose deadline is at or before `now`
    ///
    /// Payloads come back in deadline order, ties broken by scheduling order.
    pub fn take_due(&mut self, now: Duration) -> Fired<T> {
        let mut due: SmallVec<[(Duration, u64, TimerId); 2]> = self
            .timeouts
            .iter()
            .filter(|(_, t)| t.deadline <= now)
            .map(|(id, t)| (t.deadline, t.seq, id))
            .collect();
        due.sort_by_key(|&(deadline, seq, _)| (deadline, seq));

        due.into_iter()
            .filter_map(|(_, _, id)| self.timeouts.remove(id))
            .map(|t| t.payload)
            .collect()
    }

    /// Remove and return every pending frame callback, in request order
    pub fn take_frames(&mut self) -> Fired<T> {
        let mut frames: SmallVec<[(u64, FrameId); 2]> =
            self.frames.iter().map(|(id, f)| (f.seq, id)).collect();
        frames.sort_by_key(|&(seq, _)| seq);

        frames
            .into_iter()
            .filter_map(|(_, id)| self.frames.remove(id))
            .map(|f| f.payload)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.timeouts.is_empty() && self.frames.is_empty()
    }

    /// Drop everything that is pending (teardown)
    pub fn clear(&mut self) {
        self.timeouts.clear();
        self.frames.clear();
    }
}
