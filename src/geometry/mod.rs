//! Geometry utilities: device orientation and camera pose.

pub mod orientation;
pub mod pose;

pub use orientation::{deg_to_rad, estimate, estimate_sample};
pub use pose::CameraPose;
