//! Lot monitoring module
//!
//! Startup (calibration image, stall points, bounds) and the capture loop
//! that evaluates the current image against the calibration image.

mod lot_monitor;
pub mod types;

#[cfg(test)]
mod tests;

pub use lot_monitor::LotMonitor;
pub use types::{CycleReport, MonitorConfig, MonitorConfigBuilder};
