//! Frame decoder backed by the `image` crate.
//!
//! Handles every container the camera or a user is likely to hand us
//! (BMP captures, PNG, JPEG, TIFF) and always yields interleaved 8-bit RGB.

use tracing::debug;

use crate::occupancy::common::error::{OccupancyError, Result};
use crate::occupancy::raster::decoder::FrameDecoder;
use crate::occupancy::raster::types::{ChannelOrder, DecodedFrame};

pub struct ImageFrameDecoder;

impl FrameDecoder for ImageFrameDecoder {
    /// Decodes an encoded image into RGB triples.
    ///
    /// Alpha is discarded and 16-bit sources are narrowed to 8 bits.
    ///
    /// # Errors
    ///
    /// * `OccupancyError::DecodeError` - the bytes are empty or the format is
    ///   not recognized
    fn decode(&self, data: &[u8]) -> Result<DecodedFrame> {
        debug!("Decoding image, {} bytes", data.len());

        if data.is_empty() {
            return Err(OccupancyError::DecodeError("no image data".to_string()));
        }

        let decoded = image::load_from_memory(data)
            .map_err(|e| OccupancyError::DecodeError(e.to_string()))?;
        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();

        debug!("Decoded image: {}x{}", width, height);

        Ok(DecodedFrame {
            width: width as usize,
            height: height as usize,
            data: rgb.into_raw(),
            channel_order: ChannelOrder::Rgb,
        })
    }
}
