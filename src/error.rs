use crate::system::platform::SensorKind;

/// Failures at the permission / acquisition boundary of a session.
///
/// A motion event without acceleration data is not an error: the integrator
/// skips it and reports `UpdateOutcome::PayloadMissing`.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The user refused a permission prompt. Nothing was subscribed.
    #[error("Permission denied for {0} sensor")]
    PermissionDenied(SensorKind),

    /// A permission prompt or the camera feed failed to start.
    #[error("Acquisition failed: {0}")]
    AcquisitionFailure(String),

    /// `start` was called while a subscription is live.
    #[error("Session is already running")]
    AlreadyRunning,
}
