pub mod config;
pub mod error;
pub mod geometry;
pub mod imu;
pub mod io;
pub mod system;
pub mod tracking;
pub mod viz;
