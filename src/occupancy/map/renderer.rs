use tracing::{debug, instrument};

use crate::occupancy::classify::OccupancyVerdict;
use crate::occupancy::common::error::{OccupancyError, Result};
use crate::occupancy::map::types::MapStyle;
use crate::occupancy::raster::RasterBuffer;
use crate::occupancy::stalls::StallBounds;

#[derive(Debug, Clone, Default)]
pub struct MapRenderer {
    style: MapStyle,
}

impl MapRenderer {
    pub fn new(style: MapStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &MapStyle {
        &self.style
    }

    /// Copies `current` into the style's channel order and fills every
    /// stall window with the color of its verdict. Stalls are painted in
    /// order, so where windows overlap the later stall wins.
    #[instrument(skip_all, fields(stalls = bounds.len()))]
    pub fn render(
        &self,
        current: &RasterBuffer,
        bounds: &[StallBounds],
        verdicts: &[OccupancyVerdict],
    ) -> Result<RasterBuffer> {
        if bounds.len() != verdicts.len() {
            return Err(OccupancyError::VerdictCountMismatch {
                stalls: bounds.len(),
                verdicts: verdicts.len(),
            });
        }

        let order = self.style.channel_order;
        let (rows, cols) = (current.rows(), current.cols());
        let mut data = current.with_channel_order(order).pixels().to_vec();

        for (stall, &verdict) in bounds.iter().zip(verdicts) {
            let color = order.from_rgb(self.style.color_for(verdict));
            let (c0, c1) = (stall.col_start.min(cols), stall.col_end.min(cols));
            if c0 >= c1 {
                continue;
            }
            for r in stall.row_start..stall.row_end.min(rows) {
                data[r * cols + c0..r * cols + c1].fill(color);
            }
        }

        debug!(rows, cols, ?order, "Rendered occupancy map");
        RasterBuffer::new(rows, cols, data, order)
    }
}
