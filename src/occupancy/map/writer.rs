use std::io::Write;

use crate::occupancy::common::error::Result;
use crate::occupancy::map::types::MapConfig;
use crate::occupancy::raster::RasterBuffer;

pub trait MapWriter {
    fn write_map(&self, map: &RasterBuffer, output: &mut dyn Write, config: &MapConfig) -> Result<()>;
}
