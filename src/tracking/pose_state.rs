//! Latest pose estimate shared between the sensor handlers and the renderer.

use nalgebra::{UnitQuaternion, Vector3};

use crate::geometry::CameraPose;

/// Most recent output of the integrator and the orientation estimator.
///
/// Each producer overwrites only its own fields: the integrator writes
/// `position`, `velocity` and `last_acceleration`, the orientation handler
/// writes `rotation` and `orientation_deg`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseState {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    /// Gated acceleration of the last accepted motion sample.
    pub last_acceleration: Vector3<f64>,
    pub rotation: UnitQuaternion<f64>,
    /// Last orientation as received, (alpha, beta, gamma) in degrees.
    pub orientation_deg: Vector3<f64>,
}

impl PoseState {
    pub fn new() -> Self {
        Self {
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            last_acceleration: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
            orientation_deg: Vector3::zeros(),
        }
    }

    /// Pose the renderer places the virtual camera at.
    pub fn camera_pose(&self) -> CameraPose {
        CameraPose {
            position: self.position,
            rotation: self.rotation,
        }
    }
}

impl Default for PoseState {
    fn default() -> Self {
        Self::new()
    }
}
