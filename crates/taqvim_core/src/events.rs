//! Event codes shared by interaction state machines

/// Event type constants
pub mod event_types {
    /// Scroll position changed because of user input or momentum
    pub const SCROLL: u32 = 30;
    /// Quiet period after the last scroll elapsed
    pub const IDLE_TIMEOUT: u32 = 40;
    /// A running scroll animation reached its target
    pub const SCROLL_SETTLED: u32 = 41;
    /// The controlled value was changed from outside the widget
    pub const EXTERNAL_VALUE: u32 = 50;
    /// An item was picked directly (click / tap)
    pub const SELECT: u32 = 51;
}

/// Human readable name for an event code (logging only)
pub fn event_name(event: u32) -> &'static str {
    use event_types::*;
    match event {
        SCROLL => "scroll",
        IDLE_TIMEOUT => "idle_timeout",
        SCROLL_SETTLED => "scroll_settled",
        EXTERNAL_VALUE => "external_value",
        SELECT => "select",
        _ => "unknown",
    }
}
