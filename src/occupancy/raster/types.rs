//! Raster data types

use std::path::Path;

use tracing::info;

use crate::occupancy::common::error::{OccupancyError, Result};
use crate::occupancy::raster::decoder::FrameDecoder;

/// One pixel as three channels. Stored wider than the 8-bit source so that
/// callers can add channels without narrowing first.
pub type Pixel = [u16; 3];

/// Channel layout of a pixel triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOrder {
    /// Red, green, blue (engine order)
    Rgb,
    /// Blue, green, red (native order of many display codecs)
    Bgr,
}

impl ChannelOrder {
    /// Converts a pixel in this order to red-green-blue.
    pub fn to_rgb(self, pixel: Pixel) -> Pixel {
        match self {
            ChannelOrder::Rgb => pixel,
            ChannelOrder::Bgr => [pixel[2], pixel[1], pixel[0]],
        }
    }

    /// Converts a red-green-blue pixel into this order.
    pub fn from_rgb(self, rgb: Pixel) -> Pixel {
        match self {
            ChannelOrder::Rgb => rgb,
            ChannelOrder::Bgr => [rgb[2], rgb[1], rgb[0]],
        }
    }
}

/// Reflection axis for [`RasterBuffer::reflect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipAxis {
    /// Mirror rows: row `r` moves to `rows - 1 - r`
    Vertical,
    /// Mirror columns: column `c` moves to `cols - 1 - c`
    Horizontal,
    /// Both axes (180° rotation)
    Both,
}

/// Output of a codec before orientation and channel normalization
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Interleaved 8-bit triples, row-major
    pub data: Vec<u8>,
    /// Order of the channels within each triple
    pub channel_order: ChannelOrder,
}

/// Decoded image as a row-major grid of pixel triples.
///
/// Buffers are never mutated after construction; every transform returns a
/// new buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    rows: usize,
    cols: usize,
    data: Vec<Pixel>,
    order: ChannelOrder,
}

impl RasterBuffer {
    pub fn new(rows: usize, cols: usize, data: Vec<Pixel>, order: ChannelOrder) -> Result<Self> {
        if rows == 0 || cols == 0 || data.len() != rows * cols {
            return Err(OccupancyError::InvalidDimensions(rows, cols));
        }
        Ok(Self {
            rows,
            cols,
            data,
            order,
        })
    }

    /// Buffer of a single RGB color.
    pub fn filled(rows: usize, cols: usize, pixel: Pixel) -> Result<Self> {
        Self::new(rows, cols, vec![pixel; rows * cols], ChannelOrder::Rgb)
    }

    /// Normalizes a codec frame: channels to RGB, then a reflection on both
    /// axes to move the codec's top-left origin to the engine's convention.
    pub fn from_frame(frame: DecodedFrame) -> Result<Self> {
        let DecodedFrame {
            width,
            height,
            data,
            channel_order,
        } = frame;

        if width == 0 || height == 0 {
            return Err(OccupancyError::DecodeError("no image data".to_string()));
        }
        if data.len() != width * height * 3 {
            return Err(OccupancyError::DecodeError(format!(
                "expected {} bytes for {}x{} RGB, got {}",
                width * height * 3,
                width,
                height,
                data.len()
            )));
        }

        let pixels = data
            .chunks_exact(3)
            .map(|p| channel_order.to_rgb([p[0] as u16, p[1] as u16, p[2] as u16]))
            .collect();

        let raw = Self::new(height, width, pixels, ChannelOrder::Rgb)?;
        Ok(raw.reflect(FlipAxis::Both))
    }

    /// Reads and decodes the image at `path`.
    ///
    /// # Errors
    ///
    /// * `OccupancyError::InputReadError` - the file cannot be read
    /// * `OccupancyError::DecodeError` - the codec produced no usable data
    pub fn load<P, D>(path: P, decoder: &D) -> Result<Self>
    where
        P: AsRef<Path>,
        D: FrameDecoder + ?Sized,
    {
        let path = path.as_ref();
        info!(path = %path.display(), "Opening image");

        let data = std::fs::read(path).map_err(|e| {
            OccupancyError::InputReadError(format!("{}: {}", path.display(), e))
        })?;
        let buffer = Self::from_frame(decoder.decode(&data)?)?;

        info!(
            path = %path.display(),
            rows = buffer.rows,
            cols = buffer.cols,
            "Opened image"
        );
        Ok(buffer)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn channel_order(&self) -> ChannelOrder {
        self.order
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.data
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Pixel> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.data[row * self.cols + col])
    }

    /// Pixels of one row; panics when `row` is out of range.
    pub fn row(&self, row: usize) -> &[Pixel] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    pub fn reflect(&self, axis: FlipAxis) -> RasterBuffer {
        let mut data = Vec::with_capacity(self.data.len());
        for r in 0..self.rows {
            let src = match axis {
                FlipAxis::Vertical | FlipAxis::Both => self.row(self.rows - 1 - r),
                FlipAxis::Horizontal => self.row(r),
            };
            match axis {
                FlipAxis::Horizontal | FlipAxis::Both => data.extend(src.iter().rev()),
                FlipAxis::Vertical => data.extend_from_slice(src),
            }
        }
        RasterBuffer {
            rows: self.rows,
            cols: self.cols,
            data,
            order: self.order,
        }
    }

    /// Copy of this buffer with every pixel rewritten into `order`.
    pub fn with_channel_order(&self, order: ChannelOrder) -> RasterBuffer {
        let data = if order == self.order {
            self.data.clone()
        } else {
            self.data
                .iter()
                .map(|&p| order.from_rgb(self.order.to_rgb(p)))
                .collect()
        };
        RasterBuffer {
            rows: self.rows,
            cols: self.cols,
            data,
            order,
        }
    }
}
