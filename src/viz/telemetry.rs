//! On-screen diagnostics for the pose pipeline.
//!
//! Layout:
//!     acceleration (m/s²)  - gated acceleration of the last accepted sample
//!     velocity (m/s)       - integrated velocity
//!     position (m)         - integrated position
//!     orientation (deg)    - alpha (Z), beta (X), gamma (Y) as received

use std::fmt;

use nalgebra::Vector3;

use crate::tracking::PoseState;

/// Pre-formatted diagnostic lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Telemetry {
    pub acceleration: String,
    pub velocity: String,
    pub position: String,
    pub orientation: String,
}

impl Telemetry {
    pub fn from_pose_state(pose: &PoseState) -> Self {
        let o = pose.orientation_deg;
        Self {
            acceleration: format_vector(&pose.last_acceleration),
            velocity: format_vector(&pose.velocity),
            position: format_vector(&pose.position),
            orientation: format!("alpha: {:.1}, beta: {:.1}, gamma: {:.1}", o.x, o.y, o.z),
        }
    }
}

/// `x: 0.050, y: 0.000, z: -1.250`
///
/// Negative zero (a decayed negative velocity) prints as `0.000`.
pub fn format_vector(v: &Vector3<f64>) -> String {
    format!(
        "x: {:.3}, y: {:.3}, z: {:.3}",
        v.x + 0.0,
        v.y + 0.0,
        v.z + 0.0
    )
}

impl fmt::Display for Telemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "acceleration (m/s²): {}", self.acceleration)?;
        writeln!(f, "velocity (m/s):      {}", self.velocity)?;
        writeln!(f, "position (m):        {}", self.position)?;
        write!(f, "orientation (deg):   {}", self.orientation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_decimal_vectors() {
        let v = Vector3::new(0.05, 0.0, -1.2504);
        assert_eq!(format_vector(&v), "x: 0.050, y: 0.000, z: -1.250");
    }

    #[test]
    fn test_negative_zero_prints_unsigned() {
        let v = Vector3::new(-0.0, 0.0, -0.0);
        assert_eq!(format_vector(&v), "x: 0.000, y: 0.000, z: 0.000");
    }

    #[test]
    fn test_decayed_negative_velocity_prints_unsigned() {
        use crate::config::TrackerConfig;
        use crate::imu::{AxisReading, MotionSample};
        use crate::system::{ArSession, Ungated};

        let mut session = ArSession::new(TrackerConfig::motion_only());
        let sub = session.start(&mut Ungated).unwrap();
        for (t, x) in [(0.0, -1.0), (100.0, -1.0), (200.0, 0.0)] {
            sub.push_motion(MotionSample::new(t, AxisReading::x_only(x)));
        }
        session.process_pending();

        assert!(session.pose().velocity.x.is_sign_negative());
        assert_eq!(session.telemetry().velocity, "x: 0.000, y: 0.000, z: 0.000");
    }

    #[test]
    fn test_from_pose_state() {
        let mut pose = PoseState::new();
        pose.velocity = Vector3::new(0.01, 0.0, 0.0);
        pose.position = Vector3::new(0.006, 0.0, 0.0);
        pose.orientation_deg = Vector3::new(90.0, -12.34, 5.0);

        let t = Telemetry::from_pose_state(&pose);
        assert_eq!(t.acceleration, "x: 0.000, y: 0.000, z: 0.000");
        assert_eq!(t.velocity, "x: 0.010, y: 0.000, z: 0.000");
        assert_eq!(t.position, "x: 0.006, y: 0.000, z: 0.000");
        assert_eq!(t.orientation, "alpha: 90.0, beta: -12.3, gamma: 5.0");
        assert_eq!(t.to_string().lines().count(), 4);
    }
}
