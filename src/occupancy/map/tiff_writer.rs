use std::io::Write;

use tracing::debug;

use crate::occupancy::common::error::{OccupancyError, Result};
use crate::occupancy::map::types::{MapConfig, TiffCompression};
use crate::occupancy::map::writer::MapWriter;
use crate::occupancy::raster::RasterBuffer;

/// Writes maps as 8-bit RGB TIFF. Maps rendered in another channel order
/// are converted back to RGB on the way out.
pub struct StandardTiffWriter;

impl MapWriter for StandardTiffWriter {
    fn write_map(&self, map: &RasterBuffer, output: &mut dyn Write, config: &MapConfig) -> Result<()> {
        debug!("Encoding TIFF map: {}x{}", map.cols(), map.rows());

        let order = map.channel_order();
        let rgb: Vec<u8> = map
            .pixels()
            .iter()
            .flat_map(|&p| order.to_rgb(p).map(|c| c.min(255) as u8))
            .collect();

        let mut buffer = Vec::new();

        let compression = match config.compression {
            TiffCompression::None => tiff::encoder::Compression::Uncompressed,
            TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
            TiffCompression::DeflateFast => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Balanced),
            TiffCompression::DeflateBest => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Best),
        };

        {
            let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
                .map_err(|e| OccupancyError::EncodeError(e.to_string()))?
                .with_compression(compression);

            encoder
                .write_image::<tiff::encoder::colortype::RGB8>(map.cols() as u32, map.rows() as u32, &rgb)
                .map_err(|e| OccupancyError::EncodeError(e.to_string()))?;
        }

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete");
        Ok(())
    }
}
