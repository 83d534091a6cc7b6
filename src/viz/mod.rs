//! Human-readable diagnostics.

pub mod telemetry;

pub use telemetry::{Telemetry, format_vector};
