pub mod logger;
pub mod occupancy;
