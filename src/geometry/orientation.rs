//! Device orientation angles to camera rotation.
//!
//! # Device Frame
//!
//! ```text
//!        +Z (up, out of the screen when lying flat)
//!         |
//!         |
//!         +------ +X (right edge of the screen)
//!        /
//!       /
//!      +Y (top edge of the screen)
//! ```
//!
//! The platform reports three Tait-Bryan angles:
//! - alpha: rotation about Z (heading), [0, 360)
//! - beta: rotation about X (front-back tilt), [-180, 180)
//! - gamma: rotation about Y (left-right tilt), [-90, 90)
//!
//! The angles are intrinsic Z-X'-Y'' rotations, so the camera rotation is
//!
//! ```text
//! R = Rz(alpha) * Rx(beta) * Ry(gamma)
//! ```
//!
//! Any other composition order leaves the rendered overlay misaligned with
//! the physical device.

use nalgebra::{UnitQuaternion, Vector3};

use crate::imu::OrientationSample;

/// Degrees to radians.
#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg.to_radians()
}

/// Build the camera rotation from device angles in degrees.
pub fn estimate(alpha_deg: f64, beta_deg: f64, gamma_deg: f64) -> UnitQuaternion<f64> {
    let rz = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), deg_to_rad(alpha_deg));
    let rx = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), deg_to_rad(beta_deg));
    let ry = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), deg_to_rad(gamma_deg));
    rz * rx * ry
}

/// Same as [`estimate`], with missing angles resolved to zero.
pub fn estimate_sample(sample: &OrientationSample) -> UnitQuaternion<f64> {
    let (alpha, beta, gamma) = sample.resolved();
    estimate(alpha, beta, gamma)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Quaternion;
    use std::f64::consts::FRAC_PI_2;

    /// Closed-form ZXY Euler-to-quaternion, with x = beta, y = gamma, z = alpha.
    fn zxy_closed_form(x: f64, y: f64, z: f64) -> UnitQuaternion<f64> {
        let (s1, c1) = (x / 2.0).sin_cos();
        let (s2, c2) = (y / 2.0).sin_cos();
        let (s3, c3) = (z / 2.0).sin_cos();
        UnitQuaternion::new_unchecked(Quaternion::new(
            c1 * c2 * c3 - s1 * s2 * s3,
            s1 * c2 * c3 - c1 * s2 * s3,
            c1 * s2 * c3 + s1 * c2 * s3,
            c1 * c2 * s3 + s1 * s2 * c3,
        ))
    }

    #[test]
    fn test_zero_angles_identity() {
        let q = estimate(0.0, 0.0, 0.0);
        assert_relative_eq!(q, UnitQuaternion::identity(), epsilon = 1e-12);
    }

    #[test]
    fn test_heading_only_rotates_about_vertical() {
        let q = estimate(90.0, 0.0, 0.0);
        let expected = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2);
        assert_relative_eq!(q, expected, epsilon = 1e-12);

        let (axis, angle) = q.axis_angle().expect("non-trivial rotation");
        assert_relative_eq!(angle, FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(axis.into_inner(), Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn test_beta_and_gamma_axes() {
        let q = estimate(0.0, 90.0, 0.0);
        assert_relative_eq!(q * Vector3::y(), Vector3::z(), epsilon = 1e-12);

        let q = estimate(0.0, 0.0, 90.0);
        assert_relative_eq!(q * Vector3::z(), Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn test_composition_order_is_zxy() {
        let (alpha, beta, gamma) = (30.0_f64, 45.0_f64, -20.0_f64);
        let q = estimate(alpha, beta, gamma);
        let expected = zxy_closed_form(beta.to_radians(), gamma.to_radians(), alpha.to_radians());
        assert_relative_eq!(q, expected, epsilon = 1e-12);

        // XYZ order gives a visibly different rotation
        let xyz = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), beta.to_radians())
            * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), gamma.to_radians())
            * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), alpha.to_radians());
        assert!(q.angle_to(&xyz) > 1e-3);
    }

    #[test]
    fn test_sample_missing_angles_default_to_zero() {
        let sample = OrientationSample {
            alpha_deg: Some(90.0),
            beta_deg: None,
            gamma_deg: None,
        };
        let q = estimate_sample(&sample);
        assert_relative_eq!(q, estimate(90.0, 0.0, 0.0), epsilon = 1e-12);

        let q = estimate_sample(&OrientationSample::default());
        assert_relative_eq!(q, UnitQuaternion::identity(), epsilon = 1e-12);
    }

    #[test]
    fn test_deterministic() {
        let a = estimate(123.0, -45.0, 10.0);
        let b = estimate(123.0, -45.0, 10.0);
        assert_eq!(a, b);
    }
}
