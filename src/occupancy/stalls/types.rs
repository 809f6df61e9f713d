//! Stall geometry types

/// Upper limit on stalls tracked in one session.
pub const MAX_STALLS: usize = 50;

/// Center of a stall in image coordinates, 0-indexed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StallPoint {
    pub row: usize,
    pub col: usize,
}

impl StallPoint {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Half-open sampling window `[row_start, row_end) x [col_start, col_end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StallBounds {
    pub row_start: usize,
    pub col_start: usize,
    pub row_end: usize,
    pub col_end: usize,
}

impl StallBounds {
    pub fn height(&self) -> usize {
        self.row_end.saturating_sub(self.row_start)
    }

    pub fn width(&self) -> usize {
        self.col_end.saturating_sub(self.col_start)
    }

    pub fn is_empty(&self) -> bool {
        self.height() == 0 || self.width() == 0
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.row_start..self.row_end).contains(&row) && (self.col_start..self.col_end).contains(&col)
    }
}
