//! Region color sampling
//!
//! Mean color of a rectangular region of a raster buffer.

use crate::occupancy::common::error::{OccupancyError, Result};
use crate::occupancy::raster::RasterBuffer;
use crate::occupancy::stalls::StallBounds;


/// Mean red, green and blue over a region, truncated to integers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorSample {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
}

impl ColorSample {
    pub fn new(red: u16, green: u16, blue: u16) -> Self {
        Self { red, green, blue }
    }

    pub fn channels(&self) -> [u16; 3] {
        [self.red, self.green, self.blue]
    }

    /// Sum of the three channels.
    pub fn intensity(&self) -> u32 {
        self.channels().iter().map(|&c| c as u32).sum()
    }
}

impl From<[u16; 3]> for ColorSample {
    fn from(rgb: [u16; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

/// Averages every pixel in `[row_start, row_end) x [col_start, col_end)`.
///
/// # Errors
///
/// * `OccupancyError::EmptyRegion` - the rectangle has no area
/// * `OccupancyError::RegionOutOfBounds` - the rectangle reaches past the
///   buffer, e.g. a capture smaller than the calibration image
pub fn average(
    buffer: &RasterBuffer,
    row_start: usize,
    col_start: usize,
    row_end: usize,
    col_end: usize,
) -> Result<ColorSample> {
    if row_end <= row_start || col_end <= col_start {
        return Err(OccupancyError::EmptyRegion {
            row_start,
            col_start,
            row_end,
            col_end,
        });
    }
    if row_end > buffer.rows() || col_end > buffer.cols() {
        return Err(OccupancyError::RegionOutOfBounds {
            row_start,
            col_start,
            row_end,
            col_end,
            rows: buffer.rows(),
            cols: buffer.cols(),
        });
    }

    let mut sums = [0u64; 3];
    for r in row_start..row_end {
        for pixel in &buffer.row(r)[col_start..col_end] {
            for (sum, &channel) in sums.iter_mut().zip(pixel) {
                *sum += channel as u64;
            }
        }
    }

    let count = ((row_end - row_start) * (col_end - col_start)) as u64;
    Ok(mean(sums, count))
}

/// Averages one column over `[row_start, row_end)`.
pub fn average_column(buffer: &RasterBuffer, col: usize, row_start: usize, row_end: usize) -> Result<ColorSample> {
    average(buffer, row_start, col, row_end, col + 1)
}

pub fn average_bounds(buffer: &RasterBuffer, bounds: &StallBounds) -> Result<ColorSample> {
    average(
        buffer,
        bounds.row_start,
        bounds.col_start,
        bounds.row_end,
        bounds.col_end,
    )
}

fn mean(sums: [u64; 3], count: u64) -> ColorSample {
    ColorSample::from(sums.map(|sum| (sum / count.max(1)) as u16))
}
