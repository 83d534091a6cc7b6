use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};

/// Virtual camera placement read by the renderer once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Camera position in the world frame (m).
    pub position: Vector3<f64>,
    /// Camera orientation (device frame to world).
    pub rotation: UnitQuaternion<f64>,
}

impl CameraPose {
    pub fn identity() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Camera-to-world transform, for renderers that take a single matrix.
    pub fn to_isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(Translation3::from(self.position), self.rotation)
    }

    /// World-to-camera (view) transform.
    pub fn view_isometry(&self) -> Isometry3<f64> {
        self.to_isometry().inverse()
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn test_view_inverts_camera_transform() {
        let pose = CameraPose {
            position: Vector3::new(1.0, 2.0, 3.0),
            rotation: UnitQuaternion::from_euler_angles(0.1, 0.2, 0.3),
        };
        let p = Point3::new(-0.5, 4.0, 1.5);
        let round_trip = pose.view_isometry() * (pose.to_isometry() * p);
        assert_relative_eq!(round_trip, p, epsilon = 1e-12);
    }
}
