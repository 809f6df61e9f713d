//! Classification types and configuration

/// Occupancy of one stall for one comparison cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccupancyVerdict {
    /// Stall looks like the calibration image
    Empty,
    /// Rejected by the day profile
    Full,
    /// Accepted by the day profile but rejected by the night profile
    FullNight,
}

impl OccupancyVerdict {
    pub fn is_occupied(self) -> bool {
        !matches!(self, OccupancyVerdict::Empty)
    }
}

/// Tolerances for comparing a stall's calibration and current samples
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Maximum relative difference between channel ratios (0.01 = 1%)
    pub ratio_tolerance: f64,
    /// Maximum absolute difference per channel, red, green, blue
    pub channel_tolerance: [u16; 3],
    /// Maximum mean brightness difference for the day profile
    pub day_intensity_tolerance: u32,
    /// Maximum mean brightness difference for the night profile
    pub night_intensity_tolerance: u32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            ratio_tolerance: 0.01,
            channel_tolerance: [15, 15, 15],
            day_intensity_tolerance: 60,
            night_intensity_tolerance: 100,
        }
    }
}

impl ClassifierConfig {
    pub fn builder() -> ClassifierConfigBuilder {
        ClassifierConfigBuilder::default()
    }
}

/// Builder for ClassifierConfig
#[derive(Default)]
pub struct ClassifierConfigBuilder {
    ratio_tolerance: Option<f64>,
    channel_tolerance: Option<[u16; 3]>,
    day_intensity_tolerance: Option<u32>,
    night_intensity_tolerance: Option<u32>,
}

impl ClassifierConfigBuilder {
    pub fn ratio_tolerance(mut self, tolerance: f64) -> Self {
        self.ratio_tolerance = Some(tolerance);
        self
    }

    pub fn channel_tolerance(mut self, tolerance: [u16; 3]) -> Self {
        self.channel_tolerance = Some(tolerance);
        self
    }

    pub fn day_intensity_tolerance(mut self, tolerance: u32) -> Self {
        self.day_intensity_tolerance = Some(tolerance);
        self
    }

    pub fn night_intensity_tolerance(mut self, tolerance: u32) -> Self {
        self.night_intensity_tolerance = Some(tolerance);
        self
    }

    pub fn build(self) -> ClassifierConfig {
        let default = ClassifierConfig::default();
        ClassifierConfig {
            ratio_tolerance: self.ratio_tolerance.unwrap_or(default.ratio_tolerance),
            channel_tolerance: self.channel_tolerance.unwrap_or(default.channel_tolerance),
            day_intensity_tolerance: self
                .day_intensity_tolerance
                .unwrap_or(default.day_intensity_tolerance),
            night_intensity_tolerance: self
                .night_intensity_tolerance
                .unwrap_or(default.night_intensity_tolerance),
        }
    }
}
