//! Sensor recordings.

pub mod recording;

pub use recording::{OrientationEntry, RecordedEvent, Recording, parse_motion_log, parse_orientation_log};
