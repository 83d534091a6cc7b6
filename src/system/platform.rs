//! Seams to the host platform.
//!
//! The platform owns the actual sensors, permission prompts and camera. The
//! session only needs a one-shot answer from each of them before it starts
//! consuming events.

use std::fmt;

/// Sensor stream a permission applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    Orientation,
    Motion,
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Orientation => write!(f, "orientation"),
            Self::Motion => write!(f, "motion"),
        }
    }
}

/// Answer of a permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// One-shot permission prompt for a sensor stream.
///
/// `Err` means the prompt itself failed (rejected), which is distinct from
/// the user answering `Denied`.
pub trait PermissionGate {
    fn request(&mut self, sensor: SensorKind) -> Result<Permission, String>;
}

/// Platforms that deliver sensor events without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ungated;

impl PermissionGate for Ungated {
    fn request(&mut self, _sensor: SensorKind) -> Result<Permission, String> {
        Ok(Permission::Granted)
    }
}

/// Gate with a fixed answer per sensor.
#[derive(Debug, Clone, Copy)]
pub struct FixedGate {
    pub orientation: Permission,
    pub motion: Permission,
}

impl PermissionGate for FixedGate {
    fn request(&mut self, sensor: SensorKind) -> Result<Permission, String> {
        Ok(match sensor {
            SensorKind::Orientation => self.orientation,
            SensorKind::Motion => self.motion,
        })
    }
}

/// Camera feed composited behind the rendered scene.
pub trait VideoFeed {
    fn start(&mut self) -> Result<(), String>;
}
