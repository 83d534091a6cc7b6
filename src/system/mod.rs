//! Session orchestration: platform seams, sensor subscription and the
//! shared pose record read by the renderer.

pub mod messages;
pub mod platform;
pub mod session;
pub mod shared_state;

pub use messages::SensorEvent;
pub use platform::{FixedGate, Permission, PermissionGate, SensorKind, Ungated, VideoFeed};
pub use session::{ArSession, SensorSubscription};
pub use shared_state::SharedState;
