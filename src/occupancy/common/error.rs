use thiserror::Error;

#[derive(Error, Debug)]
pub enum OccupancyError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    #[error("Failed to encode map image: {0}")]
    EncodeError(String),

    #[error("Invalid image dimensions: rows={0}, cols={1}")]
    InvalidDimensions(usize, usize),

    #[error("Bad data in stall points file at line {line}: {token:?}")]
    ParseError { line: usize, token: String },

    #[error("Averaging 0 or negative pixels: rows {row_start}..{row_end}, cols {col_start}..{col_end}")]
    EmptyRegion {
        row_start: usize,
        col_start: usize,
        row_end: usize,
        col_end: usize,
    },

    #[error("Region rows {row_start}..{row_end}, cols {col_start}..{col_end} exceeds {rows}x{cols} image")]
    RegionOutOfBounds {
        row_start: usize,
        col_start: usize,
        row_end: usize,
        col_end: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Stall {index} center ({row}, {col}) lies outside {rows}x{cols} image")]
    PointOutsideImage {
        index: usize,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("No stalls configured and automatic stall detection is not available")]
    Unconfigured,

    #[error("Got {verdicts} verdicts for {stalls} stalls")]
    VerdictCountMismatch { stalls: usize, verdicts: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl OccupancyError {
    /// Process exit code for a fatal session error, distinct per cause.
    pub fn exit_code(&self) -> u8 {
        match self {
            OccupancyError::InputReadError(_)
            | OccupancyError::DecodeError(_)
            | OccupancyError::InvalidDimensions(_, _) => 1,
            OccupancyError::ParseError { .. } => 2,
            OccupancyError::Unconfigured => 3,
            _ => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, OccupancyError>;
