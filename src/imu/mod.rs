//! Inertial sample types, noise gating and dead-reckoning integration.

pub mod filter;
pub mod integrator;
pub mod sample;

pub use filter::{AxisThresholds, DEFAULT_NOISE_THRESHOLD, NoiseGate, filter};
pub use integrator::{DEFAULT_FRICTION, Integrator, IntegratorState, TimestampPolicy, UpdateOutcome};
pub use sample::{AxisReading, MotionSample, OrientationSample};
