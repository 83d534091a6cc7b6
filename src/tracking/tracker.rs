//! Routes sensor samples to the integrator and the orientation estimator
//! and publishes their results into the shared pose record.

use std::sync::Arc;

use nalgebra::Vector3;
use tracing::debug;

use crate::config::TrackerConfig;
use crate::geometry::estimate_sample;
use crate::imu::{Integrator, MotionSample, NoiseGate, OrientationSample, UpdateOutcome};
use crate::system::shared_state::SharedState;

/// Sensor-sample handler for one session.
///
/// Motion goes through the [`Integrator`], orientation through the
/// estimator; each publishes only its own fields of the shared pose.
pub struct PoseTracker {
    /// Dead-reckoning state for the current run.
    integrator: Integrator,

    /// Pose record the renderer reads.
    shared: Arc<SharedState>,

    /// Samples that reached the integrator or the estimator.
    samples_processed: usize,

    /// Motion samples skipped (no payload, bad or out-of-order timestamp).
    samples_skipped: usize,
}

impl PoseTracker {
    /// Build the gate and integrator from `config`.
    pub fn new(config: &TrackerConfig, shared: Arc<SharedState>) -> Self {
        let integrator = Integrator::new(
            NoiseGate::new(config.noise_threshold.axes()),
            config.friction,
            config.timestamp_policy,
        );
        Self {
            integrator,
            shared,
            samples_processed: 0,
            samples_skipped: 0,
        }
    }

    /// Current dead-reckoning state.
    pub fn integrator(&self) -> &Integrator {
        &self.integrator
    }

    /// Samples handled since the run started.
    pub fn samples_processed(&self) -> usize {
        self.samples_processed
    }

    /// Motion samples skipped since the run started.
    pub fn samples_skipped(&self) -> usize {
        self.samples_skipped
    }

    /// Integrate one motion sample and publish velocity/position.
    pub fn handle_motion(&mut self, sample: &MotionSample) -> UpdateOutcome {
        let outcome = self.integrator.update(sample);

        match outcome {
            UpdateOutcome::Anchored { acceleration } => {
                self.shared.pose.write().last_acceleration = acceleration;
                debug!(timestamp_ms = sample.timestamp_ms, "Dead-reckoning anchor set");
            }
            UpdateOutcome::Integrated { acceleration, .. } => {
                let mut pose = self.shared.pose.write();
                pose.last_acceleration = acceleration;
                pose.velocity = self.integrator.velocity();
                pose.position = self.integrator.position();
            }
            UpdateOutcome::PayloadMissing
            | UpdateOutcome::InvalidTimestamp
            | UpdateOutcome::OutOfOrder { .. } => {
                self.samples_skipped += 1;
                return outcome;
            }
        }

        self.samples_processed += 1;
        outcome
    }

    /// Convert one orientation sample and publish the rotation.
    pub fn handle_orientation(&mut self, sample: &OrientationSample) {
        let rotation = estimate_sample(sample);
        let (alpha, beta, gamma) = sample.resolved();

        let mut pose = self.shared.pose.write();
        pose.rotation = rotation;
        pose.orientation_deg = Vector3::new(alpha, beta, gamma);
        drop(pose);

        self.samples_processed += 1;
    }

    /// Clear the dead-reckoning run. The next motion sample re-anchors.
    pub fn reset(&mut self) {
        self.integrator.reset();
        self.samples_processed = 0;
        self.samples_skipped = 0;
    }
}
