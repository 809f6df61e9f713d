use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::occupancy::classify::OccupancyVerdict;
use crate::occupancy::common::error::{OccupancyError, Result};
use crate::occupancy::map::{MapConfig, MapWriter};
use crate::occupancy::monitor::lot_monitor::LotMonitor;
use crate::occupancy::monitor::types::MonitorConfig;
use crate::occupancy::raster::{ChannelOrder, DecodedFrame, FrameDecoder, RasterBuffer};

const SIZE: usize = 60;
const POINTS: &str = "30 10\n30 30\n30 50\n;";

/// Decodes the test "format": the file text names the scene.
struct MockDecoder;

impl FrameDecoder for MockDecoder {
    fn decode(&self, data: &[u8]) -> Result<DecodedFrame> {
        let scene = std::str::from_utf8(data).unwrap_or("").trim();
        let car_cols = match scene {
            "pavement" => 0..0,
            "car" => 20..40,
            _ => return Err(OccupancyError::DecodeError("Mock decode error".to_string())),
        };
        let data = (0..SIZE * SIZE)
            .flat_map(|i| {
                if car_cols.contains(&(i % SIZE)) {
                    [30u8, 90, 40]
                } else {
                    [200u8, 200, 200]
                }
            })
            .collect();
        Ok(DecodedFrame {
            width: SIZE,
            height: SIZE,
            data,
            channel_order: ChannelOrder::Rgb,
        })
    }
}

struct MockWriter {
    should_fail: bool,
    written_maps: Arc<Mutex<Vec<RasterBuffer>>>,
}

impl MapWriter for MockWriter {
    fn write_map(&self, map: &RasterBuffer, _output: &mut dyn Write, _config: &MapConfig) -> Result<()> {
        if self.should_fail {
            return Err(OccupancyError::EncodeError("Mock encode error".to_string()));
        }
        self.written_maps.lock().unwrap().push(map.clone());
        Ok(())
    }
}

struct Lot {
    dir: tempfile::TempDir,
}

impl Lot {
    fn new(calibration: &str, current: &str, points: &str) -> Self {
        let lot = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        lot.write("calibration.img", calibration);
        lot.write("current.img", current);
        lot.write("points.txt", points);
        lot
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, contents: &str) {
        std::fs::write(self.path(name), contents).unwrap();
    }

    fn monitor(&self, config: MonitorConfig) -> Result<LotMonitor<MockDecoder, MockWriter>> {
        self.monitor_with_writer(config, false).map(|(monitor, _)| monitor)
    }

    fn monitor_with_writer(
        &self,
        config: MonitorConfig,
        writer_fails: bool,
    ) -> Result<(LotMonitor<MockDecoder, MockWriter>, Arc<Mutex<Vec<RasterBuffer>>>)> {
        let written = Arc::new(Mutex::new(Vec::new()));
        let writer = MockWriter {
            should_fail: writer_fails,
            written_maps: written.clone(),
        };
        let monitor = LotMonitor::with_custom(
            MockDecoder,
            writer,
            config,
            self.path("calibration.img"),
            self.path("current.img"),
            self.path("points.txt"),
        )?;
        Ok((monitor, written))
    }
}

fn fast_config() -> MonitorConfig {
    MonitorConfig::builder()
        .interval(Duration::ZERO)
        .max_iterations(3)
        .build()
}

#[test]
fn test_config_builder() {
    let config = MonitorConfig::builder()
        .interval(Duration::from_millis(500))
        .map_output(Some(PathBuf::from("map.tiff")))
        .build();

    assert_eq!(config.interval, Duration::from_millis(500));
    assert_eq!(config.max_iterations, 600);
    assert_eq!(config.map_output.as_deref(), Some(Path::new("map.tiff")));
}

#[test]
fn test_startup_fails_on_bad_calibration_image() {
    let lot = Lot::new("garbage", "pavement", POINTS);
    let err = lot.monitor(fast_config()).err().unwrap();
    assert!(matches!(err, OccupancyError::DecodeError(_)));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_startup_fails_on_malformed_points() {
    let lot = Lot::new("pavement", "pavement", "30 10 x 30 ;");
    let err = lot.monitor(fast_config()).err().unwrap();
    assert!(matches!(err, OccupancyError::ParseError { line: 2, .. }));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_startup_fails_without_stalls() {
    let lot = Lot::new("pavement", "pavement", ";");
    let err = lot.monitor(fast_config()).err().unwrap();
    assert!(matches!(err, OccupancyError::Unconfigured));
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn test_startup_derives_bounds() {
    let lot = Lot::new("pavement", "pavement", POINTS);
    let monitor = lot.monitor(fast_config()).unwrap();
    assert_eq!(monitor.bounds().len(), 3);
    assert_eq!(monitor.calibration().rows(), SIZE);
    assert!(monitor.current().is_none());
}

#[test]
fn test_cycle_detects_parked_car() {
    let lot = Lot::new("pavement", "car", POINTS);
    let mut monitor = lot.monitor(fast_config()).unwrap();

    let report = monitor.run_cycle().unwrap();
    assert_eq!(report.iteration, 0);
    assert_eq!(
        report.verdicts,
        vec![
            OccupancyVerdict::Empty,
            OccupancyVerdict::Full,
            OccupancyVerdict::Empty
        ]
    );
    assert_eq!(report.occupied_indices(), vec![1]);
    assert_eq!(report.occupied_count(), 1);
    assert_eq!(report.empty_count(), 2);
    assert_eq!(report.map.channel_order(), ChannelOrder::Bgr);
    assert!(monitor.current().is_some());
}

#[test]
fn test_cycle_follows_current_capture() {
    let lot = Lot::new("pavement", "car", POINTS);
    let mut monitor = lot.monitor(fast_config()).unwrap();
    assert_eq!(monitor.run_cycle().unwrap().occupied_count(), 1);

    lot.write("current.img", "pavement");
    let report = monitor.run_cycle().unwrap();
    assert_eq!(report.iteration, 1);
    assert_eq!(report.occupied_count(), 0);
}

#[test]
fn test_failed_capture_empties_current_slot() {
    let lot = Lot::new("pavement", "car", POINTS);
    let mut monitor = lot.monitor(fast_config()).unwrap();
    monitor.run_cycle().unwrap();

    lot.write("current.img", "corrupt");
    let result = monitor.run_cycle();
    assert!(matches!(result, Err(OccupancyError::DecodeError(_))));
    assert!(monitor.current().is_none());
}

#[test]
fn test_map_written_when_configured() {
    let lot = Lot::new("pavement", "car", POINTS);
    let config = MonitorConfig::builder()
        .map_output(Some(lot.path("map.tiff")))
        .build();
    let (mut monitor, written) = lot.monitor_with_writer(config, false).unwrap();

    let report = monitor.run_cycle().unwrap();
    let maps = written.lock().unwrap();
    assert_eq!(maps.len(), 1);
    assert_eq!(maps[0], report.map);
}

#[test]
fn test_map_write_failure_is_reported() {
    let lot = Lot::new("pavement", "car", POINTS);
    let config = MonitorConfig::builder()
        .map_output(Some(lot.path("map.tiff")))
        .build();
    let (mut monitor, _) = lot.monitor_with_writer(config, true).unwrap();

    let result = monitor.run_cycle();
    assert!(matches!(result, Err(OccupancyError::EncodeError(_))));
}

#[test]
fn test_run_stops_at_iteration_cap() {
    let lot = Lot::new("pavement", "car", POINTS);
    let mut monitor = lot.monitor(fast_config()).unwrap();
    let stop = AtomicBool::new(false);

    assert_eq!(monitor.run(&stop).unwrap(), 3);
    assert!(monitor.current().is_none());
}

#[test]
fn test_run_skips_failed_captures() {
    let lot = Lot::new("pavement", "corrupt", POINTS);
    let mut monitor = lot.monitor(fast_config()).unwrap();
    let stop = AtomicBool::new(false);

    assert_eq!(monitor.run(&stop).unwrap(), 0);
}

#[test]
fn test_run_honors_stop_flag() {
    let lot = Lot::new("pavement", "car", POINTS);
    let config = MonitorConfig::builder()
        .interval(Duration::from_secs(3600))
        .build();
    let mut monitor = lot.monitor(config).unwrap();
    let stop = AtomicBool::new(true);

    assert_eq!(monitor.run(&stop).unwrap(), 0);
}

#[test]
fn test_run_ends_on_configuration_defect() {
    // 21 stalls on a 60-row image leave a radius of 0: empty windows.
    let points: String = (0..21).map(|i| format!("{} {}\n", 10 + i, 10 + i)).collect();
    let lot = Lot::new("pavement", "pavement", &points);
    let mut monitor = lot.monitor(fast_config()).unwrap();
    let stop = AtomicBool::new(false);

    let result = monitor.run(&stop);
    assert!(matches!(result, Err(OccupancyError::EmptyRegion { .. })));
}

#[test]
fn test_cycle_records_stage_times() {
    let lot = Lot::new("pavement", "car", POINTS);
    let mut monitor = lot.monitor(fast_config()).unwrap();

    let report = monitor.run_cycle().unwrap();
    let stages: Vec<&str> = report.stage_times.iter().map(|&(stage, _)| stage).collect();
    assert_eq!(stages, vec!["decode", "evaluate", "render"]);
    assert_eq!(
        report.total_time(),
        report.stage_times.iter().map(|&(_, elapsed)| elapsed).sum::<Duration>()
    );
}

#[test]
fn test_cycle_times_map_write_when_configured() {
    let lot = Lot::new("pavement", "car", POINTS);
    let config = MonitorConfig::builder()
        .map_output(Some(lot.path("map.tiff")))
        .build();
    let mut monitor = lot.monitor(config).unwrap();

    let report = monitor.run_cycle().unwrap();
    assert_eq!(report.stage_times.last().map(|&(stage, _)| stage), Some("write_map"));
}

#[test]
fn test_end_to_end_with_real_codecs() {
    let dir = tempfile::tempdir().unwrap();
    let calibration = dir.path().join("initial.png");
    let current = dir.path().join("update.png");
    let points = dir.path().join("points.txt");
    let map = dir.path().join("map.tiff");

    image::RgbImage::from_pixel(80, 45, image::Rgb([180, 180, 175]))
        .save(&calibration)
        .unwrap();
    image::RgbImage::from_fn(80, 45, |x, _| {
        if x < 40 {
            image::Rgb([20, 20, 120])
        } else {
            image::Rgb([182, 179, 176])
        }
    })
    .save(&current)
    .unwrap();
    // After the 180° turn the dark left half of the file is on the right.
    std::fs::write(&points, "22 20 22 60 ;").unwrap();

    let config = MonitorConfig::builder().map_output(Some(map.clone())).build();
    let mut monitor = LotMonitor::start(&calibration, &current, &points, config).unwrap();
    let report = monitor.run_cycle().unwrap();

    assert_eq!(
        report.verdicts,
        vec![OccupancyVerdict::Empty, OccupancyVerdict::Full]
    );

    let written = image::open(&map).unwrap().to_rgb8();
    assert_eq!(written.dimensions(), (80, 45));
    // Stall 1 window (radius 7) around (22, 60) is painted with the full color.
    assert_eq!(written.get_pixel(60, 22).0, [0, 255, 0]);
    assert_eq!(written.get_pixel(20, 22).0, [255, 0, 0]);
}
