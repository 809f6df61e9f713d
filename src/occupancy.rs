//! Parking stall occupancy engine
//!
//! Compares the mean color of a fixed window around every stall between a
//! calibration photo of the empty lot and the latest capture, and renders
//! the verdicts as a colored overlay map.

pub mod classify;
pub mod common;
pub mod engine;
pub mod map;
pub mod monitor;
pub mod raster;
pub mod sampling;
pub mod stalls;

pub use common::{
    OccupancyError,
    Result,
};

pub use raster::{
    ChannelOrder,
    FlipAxis,
    FrameDecoder,
    ImageFrameDecoder,
    RasterBuffer,
    RasterSlot,
};

pub use stalls::{
    CalibrationSession,
    StallBounds,
    StallPoint,
    compute_stall_bounds,
    read_points_file,
};

pub use sampling::ColorSample;

pub use classify::{
    ClassifierConfig,
    OccupancyVerdict,
    SimilarityClassifier,
};

pub use engine::{
    OccupancyEngine,
    StallReport,
};

pub use map::{
    MapConfig,
    MapRenderer,
    MapStyle,
    MapWriter,
    StandardTiffWriter,
    TiffCompression,
};

pub use monitor::{
    CycleReport,
    LotMonitor,
    MonitorConfig,
};
