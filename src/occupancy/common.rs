//! Common utilities module
//!
//! This module contains shared utilities used across the occupancy engine.

pub mod error;

pub use error::{OccupancyError, Result};
