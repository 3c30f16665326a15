//! Observable lifecycle events
//!
//! Events are explicit and typed. They are attached to log lines as the
//! `event` field so they can be filtered on regardless of message text.

use std::fmt;

/// Observable events in the todo service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Process startup begins
    BootStart,
    /// Configuration loaded and validated
    ConfigLoaded,
    /// Listener bound, ready to serve
    Serving,
    /// Shutdown signal received
    ShutdownStart,
    /// Server stopped accepting and drained
    ShutdownComplete,

    // Store connection
    /// First connect attempt begins
    StoreConnectStart,
    /// Handle cached
    StoreConnectComplete,
    /// Connect failed, nothing cached
    StoreConnectFailed,

    // Requests
    /// A handler failed with a store fault
    RequestFailed,
    /// A fault escaped a handler and was caught by the guard
    RequestFault,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "TODO_API_STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::Serving => "TODO_API_SERVING",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",

            Event::StoreConnectStart => "STORE_CONNECT_BEGIN",
            Event::StoreConnectComplete => "STORE_CONNECT_COMPLETE",
            Event::StoreConnectFailed => "STORE_CONNECT_FAILED",

            Event::RequestFailed => "REQUEST_FAILED",
            Event::RequestFault => "REQUEST_FAULT",
        }
    }

    /// Returns true if this event reports a failure
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Event::StoreConnectFailed | Event::RequestFailed | Event::RequestFault
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
