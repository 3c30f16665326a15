//! Observability for the todo service
//!
//! - Structured logging through `tracing` (text or JSON lines)
//! - Typed lifecycle events, attached to log lines as the `event` field
//!
//! # Usage
//!
//! ```ignore
//! use todo_api::observability::{init_logging, log_event, Event, LoggingConfig};
//!
//! init_logging(&LoggingConfig::default());
//! log_event(Event::BootStart);
//! tracing::info!(event = %Event::Serving, addr = %addr, "listening");
//! ```

mod events;
mod logging;

pub use events::Event;
pub use logging::{init_logging, LoggingConfig};

/// Log a lifecycle event with no extra fields
pub fn log_event(event: Event) {
    if event.is_failure() {
        tracing::error!(event = %event);
    } else {
        tracing::info!(event = %event);
    }
}
