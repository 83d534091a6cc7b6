//! Sensor events delivered through a subscription.

use crate::imu::{MotionSample, OrientationSample};

use super::platform::SensorKind;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorEvent {
    Motion(MotionSample),
    Orientation(OrientationSample),
}

impl SensorEvent {
    pub fn kind(&self) -> SensorKind {
        match self {
            Self::Motion(_) => SensorKind::Motion,
            Self::Orientation(_) => SensorKind::Orientation,
        }
    }
}
