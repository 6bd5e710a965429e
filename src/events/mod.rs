//! Event handling for Nordpuls.
//!
//! Terminal input is read by the [`EventHandler`] and translated into
//! [`Action`](crate::state::Action)s for the store.

mod handler;
mod input;

pub use handler::EventHandler;
pub use input::{Binding, InputEvent, Key, Modifiers};

use std::time::Duration;

/// Configuration for the event handler.
#[derive(Debug, Clone)]
pub struct EventConfig {
    /// How long to wait for input before emitting a tick.
    pub tick_rate: Duration,
    /// Whether mouse scrolling is translated.
    pub mouse_capture: bool,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(250),
            mouse_capture: false,
        }
    }
}

impl EventConfig {
    /// Create a new event config with the specified tick rate in milliseconds.
    pub fn with_tick_rate_ms(mut self, ms: u64) -> Self {
        self.tick_rate = Duration::from_millis(ms.max(10));
        self
    }

    /// Enable or disable mouse capture.
    pub fn with_mouse_capture(mut self, capture: bool) -> Self {
        self.mouse_capture = capture;
        self
    }
}
