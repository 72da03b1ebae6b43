//! Board storage and win detection

use serde::Serialize;

pub const COLUMNS: usize = 7;
pub const ROWS: usize = 6;

/// Discs needed in a line to win
const LINE: usize = 4;

/// Search directions as (column step, row step); the opposite direction is
/// walked as well
const AXES: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Disc {
    /// Always moves first; the human in one-player mode
    First,
    /// The computer opponent in one-player mode
    Second,
}

impl Disc {
    pub fn other(self) -> Self {
        match self {
            Disc::First => Disc::Second,
            Disc::Second => Disc::First,
        }
    }

    /// Display color (0xRRGGBB)
    pub fn color(self) -> u32 {
        match self {
            Disc::First => 0x1a7329,
            Disc::Second => 0x731a1a,
        }
    }
}

/// Column-major grid; row 0 is the bottom
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Disc>; ROWS]; COLUMNS],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: usize, row: usize) -> Option<Disc> {
        self.cells.get(column)?.get(row).copied().flatten()
    }

    /// First free row from the bottom, `None` for a full or unknown column
    pub fn lowest_empty_row(&self, column: usize) -> Option<usize> {
        self.cells.get(column)?.iter().position(Option::is_none)
    }

    /// Drop `disc` into `column`, returning the row it rests on
    pub fn place(&mut self, column: usize, disc: Disc) -> Option<usize> {
        let row = self.lowest_empty_row(column)?;
        self.cells[column][row] = Some(disc);
        Some(row)
    }

    /// Columns that can still take a disc, in ascending order
    pub fn open_columns(&self) -> Vec<usize> {
        (0..COLUMNS)
            .filter(|&c| self.lowest_empty_row(c).is_some())
            .collect()
    }

    /// Does a line of four or more through (column, row) belong to `disc`
    pub fn is_win_at(&self, column: usize, row: usize, disc: Disc) -> bool {
        if self.get(column, row) != Some(disc) {
            return false;
        }
        AXES.iter().any(|&(dc, dr)| {
            1 + self.run(column, row, dc, dr, disc) + self.run(column, row, -dc, -dr, disc) >= LINE
        })
    }

    /// Draw condition: the top row is occupied in every column
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|col| col[ROWS - 1].is_some())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn disc_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Same-disc cells walking away from (column, row), excluding the start
    fn run(&self, column: usize, row: usize, dc: isize, dr: isize, disc: Disc) -> usize {
        let mut count = 0;
        let mut c = column as isize + dc;
        let mut r = row as isize + dr;
        while c >= 0 && r >= 0 && self.get(c as usize, r as usize) == Some(disc) {
            count += 1;
            c += dc;
            r += dr;
        }
        count
    }
}
