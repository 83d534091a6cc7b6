//! Session lifecycle.

/// State of a sensor session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Not subscribed (never started, or stopped).
    Idle,
    /// Subscribed and consuming sensor events.
    Running,
    /// A permission prompt was refused. Terminal until a new start attempt.
    Denied,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Idle
    }
}
