use crate::occupancy::common::error::Result;
use crate::occupancy::raster::types::DecodedFrame;

pub trait FrameDecoder {
    fn decode(&self, data: &[u8]) -> Result<DecodedFrame>;
}
