use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{info, warn};

use crate::occupancy::common::error::{OccupancyError, Result};
use crate::occupancy::stalls::types::{MAX_STALLS, StallPoint};

/// Records stall centers picked on the calibration image into a points
/// file. Lives exactly as long as the picking session; [`finish`] writes
/// the terminator and hands back the recorded points.
///
/// [`finish`]: CalibrationSession::finish
pub struct CalibrationSession<W: Write> {
    out: W,
    points: Vec<StallPoint>,
}

impl CalibrationSession<BufWriter<File>> {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| {
            OccupancyError::OutputWriteError(format!("{}: {}", path.display(), e))
        })?;
        info!(path = %path.display(), "Recording stall points");
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> CalibrationSession<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            points: Vec::new(),
        }
    }

    /// Appends one picked center. Returns `false` when the stall limit is
    /// already reached and the click was dropped.
    pub fn record_click(&mut self, row: usize, col: usize) -> Result<bool> {
        if self.points.len() >= MAX_STALLS {
            warn!(row, col, "Stall limit of {} reached, ignoring point", MAX_STALLS);
            return Ok(false);
        }
        writeln!(self.out, "{} {}", row, col)?;
        self.points.push(StallPoint::new(row, col));
        info!(row, col, "Added point");
        Ok(true)
    }

    pub fn points(&self) -> &[StallPoint] {
        &self.points
    }

    pub fn finish(self) -> Result<Vec<StallPoint>> {
        let Self { mut out, points } = self;
        write!(out, ";")?;
        out.flush()?;
        info!(stalls = points.len(), "Finished recording stall points");
        Ok(points)
    }
}
