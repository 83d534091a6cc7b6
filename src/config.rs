//! Tracker configuration.
//!
//! Loaded from YAML, for example:
//!
//! ```yaml
//! noise_threshold: 0.1        # or { x: 0.1, y: 0.1, z: 0.2 }
//! friction: 0.2               # retained fraction of velocity per gated step
//! timestamp_policy: discard   # discard | clamp | permit
//! mode: full                  # full | orientation_only | motion_only
//! ```

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::imu::{AxisThresholds, DEFAULT_FRICTION, DEFAULT_NOISE_THRESHOLD, TimestampPolicy};

/// Which sensor streams a session subscribes to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    /// Orientation drives rotation, motion drives position.
    #[default]
    Full,
    OrientationOnly,
    MotionOnly,
}

impl SessionMode {
    pub fn wants_orientation(&self) -> bool {
        matches!(self, Self::Full | Self::OrientationOnly)
    }

    pub fn wants_motion(&self) -> bool {
        matches!(self, Self::Full | Self::MotionOnly)
    }
}

/// Dead-zone width given either once for all axes or per axis.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NoiseThreshold {
    Uniform(f64),
    PerAxis(AxisThresholds),
}

impl NoiseThreshold {
    pub fn axes(&self) -> AxisThresholds {
        match *self {
            Self::Uniform(t) => AxisThresholds::uniform(t),
            Self::PerAxis(axes) => axes,
        }
    }
}

impl Default for NoiseThreshold {
    fn default() -> Self {
        Self::Uniform(DEFAULT_NOISE_THRESHOLD)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub noise_threshold: NoiseThreshold,
    /// Fraction of velocity RETAINED when an axis reads zero after gating.
    /// 0.0 stops instantly, values near 1.0 coast with little loss.
    pub friction: f64,
    pub timestamp_policy: TimestampPolicy,
    pub mode: SessionMode,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            noise_threshold: NoiseThreshold::default(),
            friction: DEFAULT_FRICTION,
            timestamp_policy: TimestampPolicy::default(),
            mode: SessionMode::default(),
        }
    }
}

impl TrackerConfig {
    /// Position-only tracking that stops dead whenever the gate reads zero.
    pub fn motion_only() -> Self {
        Self {
            friction: 0.0,
            mode: SessionMode::MotionOnly,
            ..Self::default()
        }
    }

    pub fn orientation_only() -> Self {
        Self {
            mode: SessionMode::OrientationOnly,
            ..Self::default()
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).context("Failed to parse tracker config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config: Self = serde_yaml::from_reader(
            File::open(path).with_context(|| format!("Failed to open {:?}", path))?,
        )
        .with_context(|| format!("Failed to parse {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (axis, t) in ["x", "y", "z"].iter().zip(self.noise_threshold.axes().as_array()) {
            if !t.is_finite() || t < 0.0 {
                bail!("Noise threshold for {} must be finite and >= 0, got {}", axis, t);
            }
        }
        if !(0.0..=1.0).contains(&self.friction) {
            bail!("Friction must be in [0, 1], got {}", self.friction);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_gives_defaults() {
        let config = TrackerConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, TrackerConfig::default());
        assert_eq!(config.noise_threshold.axes(), AxisThresholds::uniform(0.1));
        assert_eq!(config.friction, 0.2);
    }

    #[test]
    fn test_uniform_threshold() {
        let config = TrackerConfig::from_yaml_str("noise_threshold: 0.25\nfriction: 0.0\n").unwrap();
        assert_eq!(config.noise_threshold.axes(), AxisThresholds::uniform(0.25));
        assert_eq!(config.friction, 0.0);
    }

    #[test]
    fn test_per_axis_threshold_and_enums() {
        let yaml = "\
noise_threshold:
  x: 0.1
  y: 0.2
  z: 0.3
timestamp_policy: clamp
mode: motion_only
";
        let config = TrackerConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(
            config.noise_threshold.axes(),
            AxisThresholds {
                x: 0.1,
                y: 0.2,
                z: 0.3
            }
        );
        assert_eq!(config.timestamp_policy, TimestampPolicy::Clamp);
        assert_eq!(config.mode, SessionMode::MotionOnly);
    }

    #[test]
    fn test_rejects_out_of_range_friction() {
        assert!(TrackerConfig::from_yaml_str("friction: 1.5").is_err());
        assert!(TrackerConfig::from_yaml_str("friction: -0.1").is_err());
    }

    #[test]
    fn test_rejects_negative_threshold() {
        assert!(TrackerConfig::from_yaml_str("noise_threshold: -0.1").is_err());
    }

    #[test]
    fn test_presets() {
        let motion = TrackerConfig::motion_only();
        assert_eq!(motion.friction, 0.0);
        assert!(motion.mode.wants_motion());
        assert!(!motion.mode.wants_orientation());

        let orientation = TrackerConfig::orientation_only();
        assert!(!orientation.mode.wants_motion());
        assert!(orientation.mode.wants_orientation());
    }
}
