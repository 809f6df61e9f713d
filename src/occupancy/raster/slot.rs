use std::path::Path;

use tracing::debug;

use crate::occupancy::common::error::Result;
use crate::occupancy::raster::decoder::FrameDecoder;
use crate::occupancy::raster::types::RasterBuffer;

/// Owner of at most one raster buffer for a logical image source
/// ("calibration" or "current").
///
/// A reload always releases the previous buffer first. If decoding the
/// replacement fails the slot stays empty, so a caller can never observe a
/// buffer from an earlier capture as if it were the new one.
#[derive(Debug)]
pub struct RasterSlot {
    name: &'static str,
    buffer: Option<RasterBuffer>,
}

impl RasterSlot {
    pub fn new(name: &'static str) -> Self {
        Self { name, buffer: None }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn buffer(&self) -> Option<&RasterBuffer> {
        self.buffer.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.buffer.is_some()
    }

    pub fn release(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            debug!(
                slot = self.name,
                rows = buffer.rows(),
                cols = buffer.cols(),
                "Releasing image"
            );
        }
    }

    pub fn reload<P, D>(&mut self, path: P, decoder: &D) -> Result<&RasterBuffer>
    where
        P: AsRef<Path>,
        D: FrameDecoder + ?Sized,
    {
        self.release();
        let buffer = RasterBuffer::load(path, decoder)?;
        let buffer: &RasterBuffer = self.buffer.insert(buffer);
        Ok(buffer)
    }
}
