use nalgebra::Vector3;
use serde::Deserialize;
use tracing::{debug, warn};

use super::filter::NoiseGate;
use super::sample::MotionSample;

/// Default retained fraction of velocity per gated step.
pub const DEFAULT_FRICTION: f64 = 0.2;

/// What to do with a sample whose timestamp precedes the anchor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampPolicy {
    /// Drop the sample entirely; the anchor stays where it was.
    #[default]
    Discard,
    /// Integrate with `dt = 0` and move the anchor back to the sample.
    Clamp,
    /// Integrate with the negative `dt` as-is.
    Permit,
}

/// Dead-reckoning state for one subscription run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegratorState {
    pub last_timestamp_ms: Option<f64>,
    pub velocity: Vector3<f64>,
    pub position: Vector3<f64>,
}

impl IntegratorState {
    pub fn empty() -> Self {
        Self {
            last_timestamp_ms: None,
            velocity: Vector3::zeros(),
            position: Vector3::zeros(),
        }
    }
}

impl Default for IntegratorState {
    fn default() -> Self {
        Self::empty()
    }
}

/// Result of feeding one motion sample to the [`Integrator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpdateOutcome {
    /// First sample of a run: only the time anchor was set.
    Anchored { acceleration: Vector3<f64> },
    /// Velocity and position advanced by `dt_s` seconds.
    Integrated {
        acceleration: Vector3<f64>,
        dt_s: f64,
    },
    /// No acceleration payload; state and anchor untouched.
    PayloadMissing,
    /// Timestamp is NaN or infinite; state and anchor untouched.
    InvalidTimestamp,
    /// Timestamp went backwards and the policy dropped the sample.
    OutOfOrder { dt_s: f64 },
}

impl UpdateOutcome {
    /// Filtered acceleration, if the sample was accepted.
    pub fn acceleration(&self) -> Option<Vector3<f64>> {
        match *self {
            Self::Anchored { acceleration } | Self::Integrated { acceleration, .. } => {
                Some(acceleration)
            }
            Self::PayloadMissing | Self::InvalidTimestamp | Self::OutOfOrder { .. } => None,
        }
    }
}

/// Explicit Euler double integration of gated acceleration.
///
/// For each axis with gated acceleration `a`:
///
/// ```text
/// a == 0:  v' = v * friction
/// a != 0:  v' = v + a * dt
/// always:  p' = p + v' * dt
/// ```
///
/// `friction` is the fraction of velocity RETAINED on a step whose gated
/// acceleration is zero. 0.0 stops the axis instantly, values close to 1.0
/// let it coast almost without loss. It is not a resistance coefficient.
pub struct Integrator {
    gate: NoiseGate,
    friction: f64,
    policy: TimestampPolicy,
    state: IntegratorState,
}

impl Integrator {
    pub fn new(gate: NoiseGate, friction: f64, policy: TimestampPolicy) -> Self {
        Self {
            gate,
            friction,
            policy,
            state: IntegratorState::empty(),
        }
    }

    pub fn state(&self) -> &IntegratorState {
        &self.state
    }

    pub fn velocity(&self) -> Vector3<f64> {
        self.state.velocity
    }

    pub fn position(&self) -> Vector3<f64> {
        self.state.position
    }

    pub fn friction(&self) -> f64 {
        self.friction
    }

    /// Discard the run: clear the anchor and zero velocity and position.
    pub fn reset(&mut self) {
        self.state = IntegratorState::empty();
    }

    /// Feed one motion sample.
    ///
    /// A sample without any acceleration payload is skipped without advancing
    /// the anchor, so the next accepted sample integrates across the whole gap.
    pub fn update(&mut self, sample: &MotionSample) -> UpdateOutcome {
        if !sample.timestamp_ms.is_finite() {
            warn!(
                timestamp_ms = sample.timestamp_ms,
                "Motion sample with non-finite timestamp discarded"
            );
            return UpdateOutcome::InvalidTimestamp;
        }

        let Some(reading) = sample.acceleration.as_ref() else {
            debug!(
                timestamp_ms = sample.timestamp_ms,
                "Motion sample without acceleration payload, skipping"
            );
            return UpdateOutcome::PayloadMissing;
        };

        let acceleration = self.gate.apply(reading);

        let Some(last_ms) = self.state.last_timestamp_ms else {
            self.state.last_timestamp_ms = Some(sample.timestamp_ms);
            return UpdateOutcome::Anchored { acceleration };
        };

        let mut dt_s = (sample.timestamp_ms - last_ms) / 1000.0;
        if dt_s < 0.0 {
            match self.policy {
                TimestampPolicy::Discard => {
                    warn!(
                        timestamp_ms = sample.timestamp_ms,
                        last_ms, "Out-of-order motion sample discarded"
                    );
                    return UpdateOutcome::OutOfOrder { dt_s };
                }
                TimestampPolicy::Clamp => dt_s = 0.0,
                TimestampPolicy::Permit => {}
            }
        }
        self.state.last_timestamp_ms = Some(sample.timestamp_ms);

        self.step(&acceleration, dt_s);

        UpdateOutcome::Integrated { acceleration, dt_s }
    }

    fn step(&mut self, acceleration: &Vector3<f64>, dt_s: f64) {
        for axis in 0..3 {
            let a = acceleration[axis];
            if a == 0.0 {
                self.state.velocity[axis] *= self.friction;
            } else {
                self.state.velocity[axis] += a * dt_s;
            }
        }
        // Position uses the velocity that was just updated.
        self.state.position += self.state.velocity * dt_s;
    }
}

impl Default for Integrator {
    fn default() -> Self {
        Self::new(
            NoiseGate::default(),
            DEFAULT_FRICTION,
            TimestampPolicy::default(),
        )
    }
}
