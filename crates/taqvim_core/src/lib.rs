//! Taqvim Core Runtime
//!
//! Foundational primitives shared by the Taqvim picker crates:
//!
//! - **State Machines**: `(state, event)` transition tables for widget interaction states
//! - **Event Codes**: shared `u32` event identifiers
//! - **Cooperative Timers**: timeouts and frame callbacks driven by the host's frame loop
//!
//! Everything here is single-threaded and deterministic. Time is passed in
//! explicitly as a [`std::time::Duration`] since an arbitrary origin, which
//! keeps every widget reproducible under test.

pub mod events;
pub mod fsm;
pub mod timer;

pub use events::{event_name, event_types};
pub use fsm::{StateTransitions, Transition, Transitioned};
pub use timer::{FrameId, Fired, TimerId, TimerQueue};
