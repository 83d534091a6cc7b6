use nalgebra::Vector3;

/// Per-axis acceleration as reported by the platform (m/s^2).
///
/// Any component may be missing; the noise gate resolves a missing component
/// to zero before it can reach the integrator.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisReading {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

impl AxisReading {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(z),
        }
    }

    /// Reading that only reports the x axis.
    pub fn x_only(x: f64) -> Self {
        Self {
            x: Some(x),
            ..Self::default()
        }
    }

    pub fn components(&self) -> [Option<f64>; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<Vector3<f64>> for AxisReading {
    fn from(v: Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// Single motion event.
///
/// `acceleration` is `None` when the platform delivered the event without any
/// acceleration payload at all, which is distinct from a payload whose axes
/// are individually missing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    pub timestamp_ms: f64,
    pub acceleration: Option<AxisReading>,
}

impl MotionSample {
    pub fn new(timestamp_ms: f64, acceleration: AxisReading) -> Self {
        Self {
            timestamp_ms,
            acceleration: Some(acceleration),
        }
    }

    pub fn without_payload(timestamp_ms: f64) -> Self {
        Self {
            timestamp_ms,
            acceleration: None,
        }
    }
}

/// Device orientation in degrees.
///
/// - alpha: heading around the vertical axis
/// - beta: front-back tilt
/// - gamma: left-right tilt
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrientationSample {
    pub alpha_deg: Option<f64>,
    pub beta_deg: Option<f64>,
    pub gamma_deg: Option<f64>,
}

impl OrientationSample {
    pub fn new(alpha_deg: f64, beta_deg: f64, gamma_deg: f64) -> Self {
        Self {
            alpha_deg: Some(alpha_deg),
            beta_deg: Some(beta_deg),
            gamma_deg: Some(gamma_deg),
        }
    }

    /// Angles with missing components resolved to zero, as (alpha, beta, gamma).
    pub fn resolved(&self) -> (f64, f64, f64) {
        (
            resolve(self.alpha_deg),
            resolve(self.beta_deg),
            resolve(self.gamma_deg),
        )
    }
}

/// Missing or non-finite platform values become zero.
#[inline]
pub(crate) fn resolve(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}
