use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tracing::{debug, info, instrument, warn};

use crate::occupancy::classify::SimilarityClassifier;
use crate::occupancy::common::error::{OccupancyError, Result};
use crate::occupancy::engine::OccupancyEngine;
use crate::occupancy::map::{MapRenderer, MapWriter, StandardTiffWriter};
use crate::occupancy::monitor::types::{CycleReport, MonitorConfig};
use crate::occupancy::raster::{FrameDecoder, ImageFrameDecoder, RasterBuffer, RasterSlot};
use crate::occupancy::stalls::{StallBounds, compute_stall_bounds, read_points_file};

/// Longest single sleep while waiting between captures, so a stop request
/// is noticed promptly.
const WAIT_SLICE: Duration = Duration::from_millis(50);

pub struct LotMonitor<D: FrameDecoder, W: MapWriter> {
    decoder: D,
    writer: W,
    config: MonitorConfig,
    engine: OccupancyEngine,
    renderer: MapRenderer,
    calibration: RasterBuffer,
    current: RasterSlot,
    current_path: PathBuf,
    bounds: Vec<StallBounds>,
    iteration: usize,
}

impl LotMonitor<ImageFrameDecoder, StandardTiffWriter> {
    pub fn start<P, Q, R>(calibration_path: P, current_path: Q, points_path: R, config: MonitorConfig) -> Result<Self>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
        R: AsRef<Path>,
    {
        Self::with_custom(
            ImageFrameDecoder,
            StandardTiffWriter,
            config,
            calibration_path,
            current_path,
            points_path,
        )
    }
}

impl<D: FrameDecoder, W: MapWriter> LotMonitor<D, W> {
    /// Loads the calibration image, reads the stall points and derives the
    /// sampling windows. Every failure here is fatal to the session.
    #[instrument(skip_all)]
    pub fn with_custom<P, Q, R>(
        decoder: D,
        writer: W,
        config: MonitorConfig,
        calibration_path: P,
        current_path: Q,
        points_path: R,
    ) -> Result<Self>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
        R: AsRef<Path>,
    {
        let calibration = {
            let _span = tracing::info_span!("load_calibration").entered();
            RasterBuffer::load(calibration_path, &decoder)?
        };

        let points = read_points_file(points_path)?;

        let bounds = {
            let _span = tracing::info_span!("stall_bounds", stalls = points.len()).entered();
            compute_stall_bounds(&points, calibration.rows(), calibration.cols())?
        };

        info!(
            stalls = bounds.len(),
            rows = calibration.rows(),
            cols = calibration.cols(),
            "Lot monitor ready"
        );

        Ok(Self {
            engine: OccupancyEngine::new(SimilarityClassifier::new(config.classifier.clone())),
            renderer: MapRenderer::new(config.style.clone()),
            decoder,
            writer,
            config,
            calibration,
            current: RasterSlot::new("current"),
            current_path: current_path.as_ref().to_path_buf(),
            bounds,
            iteration: 0,
        })
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn bounds(&self) -> &[StallBounds] {
        &self.bounds
    }

    pub fn calibration(&self) -> &RasterBuffer {
        &self.calibration
    }

    /// Latest capture, if the last reload succeeded.
    pub fn current(&self) -> Option<&RasterBuffer> {
        self.current.buffer()
    }

    /// Captures, evaluates and renders once.
    ///
    /// A capture that fails to load leaves the current slot empty and is
    /// returned as an error; the next cycle simply tries again.
    #[instrument(skip(self), fields(iteration = self.iteration))]
    pub fn run_cycle(&mut self) -> Result<CycleReport> {
        let iteration = self.iteration;
        self.iteration += 1;
        let mut stage_times = Vec::with_capacity(4);

        let started = Instant::now();
        let reloaded = self.current.reload(&self.current_path, &self.decoder);
        stage_times.push(("decode", started.elapsed()));
        let current = reloaded?;

        let started = Instant::now();
        let verdicts = self.engine.evaluate(&self.calibration, current, &self.bounds)?;
        stage_times.push(("evaluate", started.elapsed()));

        let started = Instant::now();
        let map = self.renderer.render(current, &self.bounds, &verdicts)?;
        stage_times.push(("render", started.elapsed()));

        if let Some(path) = self.config.map_output.clone() {
            let started = Instant::now();
            self.write_map_file(&map, &path)?;
            stage_times.push(("write_map", started.elapsed()));
        }

        let report = CycleReport {
            iteration,
            verdicts,
            map,
            stage_times,
        };
        info!(
            full = ?report.occupied_indices(),
            total_full = report.occupied_count(),
            total_empty = report.empty_count(),
            "Stalls evaluated"
        );
        debug!(
            stages = ?report.stage_times,
            total_ms = report.total_time().as_secs_f64() * 1000.0,
            "Cycle timings"
        );
        Ok(report)
    }

    /// Runs cycles until the iteration cap is reached or `stop` is set.
    ///
    /// Capture failures are logged and skipped; any other error ends the
    /// session. Returns the number of cycles that produced a report.
    pub fn run(&mut self, stop: &AtomicBool) -> Result<usize> {
        let half_interval = self.config.interval / 2;
        let mut completed = 0;

        for _ in 0..self.config.max_iterations {
            if wait_or_stop(half_interval, stop) {
                break;
            }

            match self.run_cycle() {
                Ok(_) => completed += 1,
                Err(
                    e @ (OccupancyError::InputReadError(_)
                    | OccupancyError::DecodeError(_)
                    | OccupancyError::RegionOutOfBounds { .. }),
                ) => {
                    warn!(
                        path = %self.current_path.display(),
                        error = %e,
                        "Skipping capture"
                    );
                    continue;
                }
                Err(e) => return Err(e),
            }

            if wait_or_stop(half_interval, stop) {
                break;
            }
        }

        self.current.release();
        info!(completed, "Lot monitor stopped");
        Ok(completed)
    }

    fn write_map_file(&self, map: &RasterBuffer, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .map_err(|e| OccupancyError::OutputWriteError(format!("{}: {}", path.display(), e)))?;
        self.writer.write_map(map, &mut file, &self.config.map)
    }
}

/// Sleeps for `duration` unless `stop` is raised first. Returns whether a
/// stop was requested.
fn wait_or_stop(duration: Duration, stop: &AtomicBool) -> bool {
    let deadline = Instant::now() + duration;
    loop {
        if stop.load(Ordering::Relaxed) {
            return true;
        }
        let now = Instant::now();
        if now >= deadline {
            return false;
        }
        std::thread::sleep((deadline - now).min(WAIT_SLICE));
    }
}
