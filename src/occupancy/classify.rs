//! Occupancy classification module
//!
//! Color and brightness similarity predicates and the day/night policy
//! that turns a pair of color samples into a stall verdict.

mod classifier;
mod similarity;
pub mod types;


pub use classifier::SimilarityClassifier;
pub use similarity::{similar_color, similar_intensity};
pub use types::{ClassifierConfig, ClassifierConfigBuilder, OccupancyVerdict};
