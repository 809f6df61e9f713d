//! Raster buffer module
//!
//! Decoded images as contiguous RGB grids, orientation normalization and
//! the slot that owns the buffer of one logical image source.

mod decoder;
mod image_decoder;
mod slot;
pub mod types;


pub use decoder::FrameDecoder;
pub use image_decoder::ImageFrameDecoder;
pub use slot::RasterSlot;
pub use types::{ChannelOrder, DecodedFrame, FlipAxis, Pixel, RasterBuffer};
