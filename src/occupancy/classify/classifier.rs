use tracing::debug;

use crate::occupancy::classify::similarity::{similar_color, similar_intensity};
use crate::occupancy::classify::types::{ClassifierConfig, OccupancyVerdict};
use crate::occupancy::sampling::ColorSample;

#[derive(Debug, Clone, Default)]
pub struct SimilarityClassifier {
    config: ClassifierConfig,
}

impl SimilarityClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        if config.night_intensity_tolerance >= config.day_intensity_tolerance {
            debug!(
                day = config.day_intensity_tolerance,
                night = config.night_intensity_tolerance,
                "Night tolerance is not tighter than day tolerance, FullNight will never be reported"
            );
        }
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Compares the calibration sample of a stall with its current sample.
    ///
    /// `Full` when the day profile rejects the pair, `FullNight` when only
    /// the night profile rejects it, `Empty` otherwise.
    pub fn classify(&self, calibration: &ColorSample, current: &ColorSample) -> OccupancyVerdict {
        let cfg = &self.config;
        let same_color = similar_color(
            calibration,
            current,
            cfg.ratio_tolerance,
            cfg.channel_tolerance,
        );

        if !(same_color && similar_intensity(calibration, current, cfg.day_intensity_tolerance)) {
            OccupancyVerdict::Full
        } else if !(same_color && similar_intensity(calibration, current, cfg.night_intensity_tolerance)) {
            OccupancyVerdict::FullNight
        } else {
            OccupancyVerdict::Empty
        }
    }
}
