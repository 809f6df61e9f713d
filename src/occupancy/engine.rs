//! Occupancy evaluation for one comparison cycle.

use tracing::{debug, instrument, warn};

use crate::occupancy::classify::{OccupancyVerdict, SimilarityClassifier};
use crate::occupancy::common::error::Result;
use crate::occupancy::raster::RasterBuffer;
use crate::occupancy::sampling::{ColorSample, average_bounds};
use crate::occupancy::stalls::StallBounds;


/// Samples and verdict of one stall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StallReport {
    pub index: usize,
    pub bounds: StallBounds,
    pub calibration: ColorSample,
    pub current: ColorSample,
    pub verdict: OccupancyVerdict,
}

/// Compares calibration and current images stall by stall.
///
/// Holds no state between calls; every evaluation depends only on its
/// arguments.
#[derive(Debug, Clone, Default)]
pub struct OccupancyEngine {
    classifier: SimilarityClassifier,
}

impl OccupancyEngine {
    pub fn new(classifier: SimilarityClassifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &SimilarityClassifier {
        &self.classifier
    }

    /// One verdict per entry of `bounds`, in the same order.
    pub fn evaluate(
        &self,
        calibration: &RasterBuffer,
        current: &RasterBuffer,
        bounds: &[StallBounds],
    ) -> Result<Vec<OccupancyVerdict>> {
        Ok(self
            .evaluate_detailed(calibration, current, bounds)?
            .into_iter()
            .map(|report| report.verdict)
            .collect())
    }

    #[instrument(skip_all, fields(stalls = bounds.len()))]
    pub fn evaluate_detailed(
        &self,
        calibration: &RasterBuffer,
        current: &RasterBuffer,
        bounds: &[StallBounds],
    ) -> Result<Vec<StallReport>> {
        if (calibration.rows(), calibration.cols()) != (current.rows(), current.cols()) {
            warn!(
                calibration_rows = calibration.rows(),
                calibration_cols = calibration.cols(),
                current_rows = current.rows(),
                current_cols = current.cols(),
                "Current image size differs from calibration image"
            );
        }

        bounds
            .iter()
            .enumerate()
            .map(|(index, stall)| {
                let before = average_bounds(calibration, stall)?;
                let after = average_bounds(current, stall)?;
                let verdict = self.classifier.classify(&before, &after);

                debug!(
                    stall = index,
                    before = ?before.channels(),
                    after = ?after.channels(),
                    ?verdict,
                    "Sampled stall"
                );

                Ok(StallReport {
                    index,
                    bounds: *stall,
                    calibration: before,
                    current: after,
                    verdict,
                })
            })
            .collect()
    }
}
