//! Pose tracking: sample routing, pose record and session lifecycle.

pub mod pose_state;
pub mod state;
pub mod tracker;

pub use pose_state::PoseState;
pub use state::SessionState;
pub use tracker::PoseTracker;
