use tracing::debug;

use crate::occupancy::common::error::{OccupancyError, Result};
use crate::occupancy::stalls::types::{StallBounds, StallPoint};

/// Half-side of every sampling window. Shrinks as the stall count grows so
/// that windows in a densely packed lot stay mostly apart.
pub fn stall_radius(rows: usize, num_points: usize) -> usize {
    rows / (3 * num_points)
}

/// Derives one clipped sampling window per stall center, in input order.
///
/// Windows are centered on each point with sides of `2 * radius`, cropped at
/// the image border. The end edge is clipped to `rows - 1` / `cols - 1`, so
/// the last row and column of the image are never sampled. Overlapping
/// windows are allowed.
///
/// # Errors
///
/// * `OccupancyError::Unconfigured` - `points` is empty; there is no
///   automatic stall detection to fall back on
/// * `OccupancyError::PointOutsideImage` - a center lies outside the image
pub fn compute_stall_bounds(points: &[StallPoint], rows: usize, cols: usize) -> Result<Vec<StallBounds>> {
    if points.is_empty() {
        return Err(OccupancyError::Unconfigured);
    }

    let radius = stall_radius(rows, points.len());
    debug!(stalls = points.len(), radius, "Computing stall bounds");

    points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            if point.row >= rows || point.col >= cols {
                return Err(OccupancyError::PointOutsideImage {
                    index,
                    row: point.row,
                    col: point.col,
                    rows,
                    cols,
                });
            }
            Ok(StallBounds {
                row_start: point.row.saturating_sub(radius),
                col_start: point.col.saturating_sub(radius),
                row_end: (point.row + radius).min(rows - 1),
                col_end: (point.col + radius).min(cols - 1),
            })
        })
        .collect()
}
