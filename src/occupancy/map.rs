//! Occupancy map module
//!
//! Paints stall verdicts over the current image and encodes the result.

mod renderer;
mod tiff_writer;
mod writer;
pub mod types;


pub use renderer::MapRenderer;
pub use tiff_writer::StandardTiffWriter;
pub use types::{MapConfig, MapConfigBuilder, MapStyle, TiffCompression};
pub use writer::MapWriter;
