//! Stall geometry module
//!
//! Stall centers, the sampling windows derived from them, and the points
//! file they are stored in.

mod bounds;
mod calibration;
mod points_file;
pub mod types;


pub use bounds::{compute_stall_bounds, stall_radius};
pub use calibration::CalibrationSession;
pub use points_file::{parse_points, read_points_file};
pub use types::{MAX_STALLS, StallBounds, StallPoint};
