//! Dead-zone noise gate for raw acceleration.
//!
//! Readings whose magnitude is below the threshold are treated as sensor
//! noise or stationary drift and replaced by exactly zero. Everything else
//! passes through unchanged.

use nalgebra::Vector3;
use serde::Deserialize;

use super::sample::{AxisReading, resolve};

/// Default dead-zone width (m/s^2).
pub const DEFAULT_NOISE_THRESHOLD: f64 = 0.1;

/// Gate a single reading. A missing value is zero before thresholding.
#[inline]
pub fn filter(value: Option<f64>, threshold: f64) -> f64 {
    let v = resolve(value);
    if v.abs() < threshold { 0.0 } else { v }
}

/// Per-axis dead-zone widths.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AxisThresholds {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl AxisThresholds {
    pub fn uniform(threshold: f64) -> Self {
        Self {
            x: threshold,
            y: threshold,
            z: threshold,
        }
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl Default for AxisThresholds {
    fn default() -> Self {
        Self::uniform(DEFAULT_NOISE_THRESHOLD)
    }
}

/// Applies [`filter`] independently to each axis of a reading.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoiseGate {
    thresholds: AxisThresholds,
}

impl NoiseGate {
    pub fn new(thresholds: AxisThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> AxisThresholds {
        self.thresholds
    }

    pub fn apply(&self, reading: &AxisReading) -> Vector3<f64> {
        Vector3::new(
            filter(reading.x, self.thresholds.x),
            filter(reading.y, self.thresholds.y),
            filter(reading.z, self.thresholds.z),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_threshold_is_zero() {
        assert_eq!(filter(Some(0.05), 0.1), 0.0);
        assert_eq!(filter(Some(-0.099), 0.1), 0.0);
    }

    #[test]
    fn test_at_or_above_threshold_passes_unchanged() {
        assert_eq!(filter(Some(0.1), 0.1), 0.1);
        assert_eq!(filter(Some(-0.5), 0.1), -0.5);
        assert_eq!(filter(Some(12.25), 0.1), 12.25);
    }

    #[test]
    fn test_absent_is_zero() {
        assert_eq!(filter(None, 0.1), 0.0);
        assert_eq!(filter(None, 0.0), 0.0);
    }

    #[test]
    fn test_non_finite_is_zero() {
        assert_eq!(filter(Some(f64::NAN), 0.1), 0.0);
        assert_eq!(filter(Some(f64::INFINITY), 0.1), 0.0);
    }

    #[test]
    fn test_zero_iff_magnitude_below_threshold() {
        let threshold = 0.3;
        for i in -20..=20 {
            let v = i as f64 * 0.05;
            let out = filter(Some(v), threshold);
            if v.abs() < threshold {
                assert_eq!(out, 0.0, "v = {}", v);
            } else {
                assert_eq!(out, v, "v = {}", v);
            }
        }
    }

    #[test]
    fn test_gate_uses_per_axis_thresholds() {
        let gate = NoiseGate::new(AxisThresholds {
            x: 0.1,
            y: 1.0,
            z: 0.0,
        });
        let reading = AxisReading {
            x: Some(0.5),
            y: Some(0.5),
            z: None,
        };

        let out = gate.apply(&reading);
        assert_eq!(out, Vector3::new(0.5, 0.0, 0.0));
    }
}
