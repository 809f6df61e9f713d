//! Map rendering and encoding configuration types

use crate::occupancy::classify::OccupancyVerdict;
use crate::occupancy::raster::{ChannelOrder, Pixel};

/// Colors and channel layout of a rendered map
#[derive(Debug, Clone)]
pub struct MapStyle {
    /// RGB color painted over full stalls
    pub full_color: Pixel,
    /// RGB color painted over empty stalls
    pub empty_color: Pixel,
    /// Channel order of the rendered map
    pub channel_order: ChannelOrder,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            full_color: [0, 255, 0],
            empty_color: [255, 0, 0],
            channel_order: ChannelOrder::Bgr,
        }
    }
}

impl MapStyle {
    /// RGB overlay color for a verdict. Night-only detections get the
    /// per-channel midpoint of the full and empty colors.
    pub fn color_for(&self, verdict: OccupancyVerdict) -> Pixel {
        match verdict {
            OccupancyVerdict::Full => self.full_color,
            OccupancyVerdict::FullNight => {
                std::array::from_fn(|i| {
                    ((u32::from(self.full_color[i]) + u32::from(self.empty_color[i])) / 2) as u16
                })
            }
            OccupancyVerdict::Empty => self.empty_color,
        }
    }
}

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression (slow, good compression)
    Lzw,
    /// Deflate compression - fast level (default)
    DeflateFast,
    /// Deflate compression - best compression (slower)
    DeflateBest,
    /// Deflate compression - balanced
    DeflateBalanced,
}

/// Configuration for writing occupancy maps
#[derive(Debug, Clone)]
pub struct MapConfig {
    /// Compression method to use
    pub compression: TiffCompression,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            compression: TiffCompression::DeflateFast,
        }
    }
}

impl MapConfig {
    pub fn builder() -> MapConfigBuilder {
        MapConfigBuilder::default()
    }
}

/// Builder for MapConfig
#[derive(Default)]
pub struct MapConfigBuilder {
    compression: Option<TiffCompression>,
}

impl MapConfigBuilder {
    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn build(self) -> MapConfig {
        let default = MapConfig::default();
        MapConfig {
            compression: self.compression.unwrap_or(default.compression),
        }
    }
}
