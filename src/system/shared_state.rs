//! Pose record shared between the sensor handlers and the render loop.
//!
//! Producers hold the write lock only long enough to overwrite their own
//! fields, so a reader always sees whole writes and never a half-updated
//! vector.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::geometry::CameraPose;
use crate::tracking::PoseState;

/// State shared by the sensor handlers (writers) and the renderer (reader).
pub struct SharedState {
    /// Latest pose estimate. Writers replace only their own fields.
    pub pose: RwLock<PoseState>,
}

impl SharedState {
    /// Create a shared record at the initial pose.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Copy of the full pose record.
    pub fn snapshot(&self) -> PoseState {
        *self.pose.read()
    }

    /// Camera placement for the current frame.
    pub fn camera_pose(&self) -> CameraPose {
        self.pose.read().camera_pose()
    }

    /// Back to the initial pose (origin, identity rotation).
    pub fn reset(&self) {
        *self.pose.write() = PoseState::new();
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self {
            pose: RwLock::new(PoseState::new()),
        }
    }
}
