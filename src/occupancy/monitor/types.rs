//! Monitoring configuration and cycle results

use std::path::PathBuf;
use std::time::Duration;

use crate::occupancy::classify::{ClassifierConfig, OccupancyVerdict};
use crate::occupancy::map::{MapConfig, MapStyle};
use crate::occupancy::raster::RasterBuffer;

/// Configuration for a monitoring session
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Time between captures; half is waited before loading, half after
    pub interval: Duration,
    /// Number of cycles after which the session ends
    pub max_iterations: usize,
    /// Classification tolerances
    pub classifier: ClassifierConfig,
    /// Overlay colors of the occupancy map
    pub style: MapStyle,
    /// Encoding of the occupancy map
    pub map: MapConfig,
    /// Where to write the map after every cycle, if anywhere
    pub map_output: Option<PathBuf>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(2000),
            max_iterations: 600,
            classifier: ClassifierConfig::default(),
            style: MapStyle::default(),
            map: MapConfig::default(),
            map_output: None,
        }
    }
}

impl MonitorConfig {
    pub fn builder() -> MonitorConfigBuilder {
        MonitorConfigBuilder::default()
    }
}

/// Builder for MonitorConfig
#[derive(Default)]
pub struct MonitorConfigBuilder {
    interval: Option<Duration>,
    max_iterations: Option<usize>,
    classifier: Option<ClassifierConfig>,
    style: Option<MapStyle>,
    map: Option<MapConfig>,
    map_output: Option<Option<PathBuf>>,
}

impl MonitorConfigBuilder {
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = Some(iterations);
        self
    }

    pub fn classifier(mut self, classifier: ClassifierConfig) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn style(mut self, style: MapStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn map(mut self, map: MapConfig) -> Self {
        self.map = Some(map);
        self
    }

    pub fn map_output(mut self, path: Option<PathBuf>) -> Self {
        self.map_output = Some(path);
        self
    }

    pub fn build(self) -> MonitorConfig {
        let default = MonitorConfig::default();
        MonitorConfig {
            interval: self.interval.unwrap_or(default.interval),
            max_iterations: self.max_iterations.unwrap_or(default.max_iterations),
            classifier: self.classifier.unwrap_or(default.classifier),
            style: self.style.unwrap_or(default.style),
            map: self.map.unwrap_or(default.map),
            map_output: self.map_output.unwrap_or(default.map_output),
        }
    }
}

/// Outcome of one monitoring cycle
#[derive(Debug, Clone)]
pub struct CycleReport {
    /// 0-based cycle number within the session
    pub iteration: usize,
    /// One verdict per stall, in points file order
    pub verdicts: Vec<OccupancyVerdict>,
    /// Current image with the verdict overlay
    pub map: RasterBuffer,
    /// Wall time of each stage that ran, in order
    pub stage_times: Vec<(&'static str, Duration)>,
}

impl CycleReport {
    pub fn occupied_indices(&self) -> Vec<usize> {
        self.verdicts
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_occupied())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.verdicts.iter().filter(|v| v.is_occupied()).count()
    }

    pub fn empty_count(&self) -> usize {
        self.verdicts.len() - self.occupied_count()
    }

    pub fn total_time(&self) -> Duration {
        self.stage_times.iter().map(|&(_, elapsed)| elapsed).sum()
    }
}
