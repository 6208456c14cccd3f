//! Interaction state machines
//!
//! Widgets describe their interaction states as a plain enum and implement
//! [`StateTransitions`] as a `(state, event) -> new state` table. Events are
//! `u32` codes from [`crate::events::event_types`] or widget-private ranges.
//!
//! # Example
//!
//! ```rust
//! use taqvim_core::events::event_types::*;
//! use taqvim_core::fsm::{StateTransitions, Transitioned};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
//! enum Grip {
//!     #[default]
//!     Released,
//!     Held,
//! }
//!
//! impl StateTransitions for Grip {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         match (self, event) {
//!             (Grip::Released, SCROLL) => Some(Grip::Held),
//!             (Grip::Held, IDLE_TIMEOUT) => Some(Grip::Released),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut grip = Grip::default();
//! assert!(grip.apply(SCROLL).is_some());
//! assert!(grip.apply(SCROLL).is_none());
//! assert_eq!(grip, Grip::Held);
//! ```

use std::hash::Hash;

/// Trait for enums that define state transitions
///
/// Implement this trait on your state enum to define how events cause
/// state transitions.
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: u32) -> Option<Self>;
}

/// A transition that was applied: `(from, to)`
pub type Transition<S> = (S, S);

/// In-place application of a transition table
pub trait Transitioned: StateTransitions {
    /// Apply `event` to `self`, returning the transition if one happened
    fn apply(&mut self, event: u32) -> Option<Transition<Self>>;
}

impl<S: StateTransitions> Transitioned for S {
    fn apply(&mut self, event: u32) -> Option<Transition<Self>> {
        let from = *self;
        let to = self.on_event(event)?;
        *self = to;
        tracing::trace!(?from, ?to, event, "state transition");
        Some((from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::event_types::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Toggle {
        Off,
        On,
    }

    impl StateTransitions for Toggle {
        fn on_event(&self, event: u32) -> Option<Self> {
            match (self, event) {
                (Toggle::Off, SELECT) => Some(Toggle::On),
                (Toggle::On, SELECT) => Some(Toggle::Off),
                _ => None,
            }
        }
    }

    #[test]
    fn test_apply_reports_transition() {
        let mut state = Toggle::Off;
        assert_eq!(state.apply(SELECT), Some((Toggle::Off, Toggle::On)));
        assert_eq!(state, Toggle::On);
    }

    #[test]
    fn test_unknown_event_keeps_state() {
        let mut state = Toggle::On;
        assert_eq!(state.apply(SCROLL), None);
        assert_eq!(state, Toggle::On);
    }
}
