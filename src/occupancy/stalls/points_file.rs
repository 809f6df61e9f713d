//! Stall points file reading.
//!
//! The format is whitespace-separated integers, two per stall (`row col`),
//! ended by a literal `;` (standalone or directly after the last number)
//! or end of file. Only the first
//! [`MAX_STALLS`] centers are read.

use std::path::Path;

use tracing::{info, warn};

use crate::occupancy::common::error::{OccupancyError, Result};
use crate::occupancy::stalls::types::{MAX_STALLS, StallPoint};

const TERMINATOR: &str = ";";

/// Parses stall centers from points file text.
///
/// A token that is not a non-negative integer is fatal and reported with
/// the 1-based stall line it appeared on. Data past the terminator or past
/// [`MAX_STALLS`] centers is ignored with a warning.
pub fn parse_points(input: &str) -> Result<Vec<StallPoint>> {
    let mut tokens = input.split_whitespace().peekable();
    let mut points = Vec::new();
    let mut terminated = false;

    while points.len() < MAX_STALLS {
        let mut coords = [0usize; 2];
        let mut filled = 0;
        for coord in coords.iter_mut() {
            match tokens.next() {
                None => break,
                Some(TERMINATOR) => {
                    terminated = true;
                    break;
                }
                Some(token) => {
                    let (digits, ends) = match token.strip_suffix(TERMINATOR) {
                        Some(digits) if !digits.is_empty() => (digits, true),
                        _ => (token, false),
                    };
                    *coord = digits.parse().map_err(|_| OccupancyError::ParseError {
                        line: points.len() + 1,
                        token: token.to_string(),
                    })?;
                    filled += 1;
                    if ends {
                        terminated = true;
                        break;
                    }
                }
            }
        }

        match filled {
            2 => points.push(StallPoint::new(coords[0], coords[1])),
            1 => warn!(
                line = points.len() + 1,
                "Stall points file ends with a lone coordinate, ignoring it"
            ),
            _ => {}
        }
        if filled < 2 || terminated {
            break;
        }
    }

    if !terminated && tokens.peek() == Some(&TERMINATOR) {
        tokens.next();
    }
    if tokens.next().is_some() {
        warn!("Stall points file has extra data");
    }

    Ok(points)
}

pub fn read_points_file<P: AsRef<Path>>(path: P) -> Result<Vec<StallPoint>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|e| OccupancyError::InputReadError(format!("{}: {}", path.display(), e)))?;
    let points = parse_points(&text)?;
    info!(path = %path.display(), stalls = points.len(), "Read stall points");
    Ok(points)
}
