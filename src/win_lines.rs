//! Precomputed table of every line a player could win with

use crate::config::validate_dimensions;
use crate::Result;

/// Orientation of a win line, given as its (row, column) step
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Direction {
    Horizontal,
    Vertical,
    /// Up and to the right
    DiagonalUp,
    /// Down and to the right
    DiagonalDown,
}

impl Direction {
    pub fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalUp => (1, 1),
            Direction::DiagonalDown => (-1, 1),
        }
    }
}

/// `connect` aligned cells, as (row, column) pairs ordered along the direction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WinLine {
    pub direction: Direction,
    pub cells: Vec<(usize, usize)>,
}

/// Closed-form number of win lines on a board, valid when `connect <= min(rows, cols)`
pub const fn line_count(rows: usize, cols: usize, connect: usize) -> usize {
    let (r, c, k) = (rows as i64, cols as i64, connect as i64);
    (4 * r * c - 3 * r * k - 3 * c * k + 3 * r + 3 * c - 4 * k + 2 * k * k + 2) as usize
}

/// Every win line of a board configuration, and the lines passing through each cell
///
/// Built once per configuration and never mutated afterwards.
#[derive(Clone, Debug)]
pub struct WinLineIndex {
    rows: usize,
    cols: usize,
    connect: usize,
    lines: Vec<WinLine>,
    // line ids through each cell, indexed like the board: column + cols * row
    through_cell: Vec<Vec<usize>>,
}

impl WinLineIndex {
    pub fn new(rows: usize, cols: usize, connect: usize) -> Result<Self> {
        validate_dimensions(rows, cols, connect)?;

        let mut index = Self {
            rows,
            cols,
            connect,
            lines: Vec::with_capacity(line_count(rows, cols, connect)),
            through_cell: vec![Vec::new(); rows * cols],
        };

        // horizontal
        for row in 0..rows {
            for column in 0..=cols - connect {
                index.push_line(Direction::Horizontal, row, column);
            }
        }
        // vertical
        for row in 0..=rows - connect {
            for column in 0..cols {
                index.push_line(Direction::Vertical, row, column);
            }
        }
        // diagonal /, starting from the bottom left end
        for row in 0..=rows - connect {
            for column in 0..=cols - connect {
                index.push_line(Direction::DiagonalUp, row, column);
            }
        }
        // diagonal \, starting from the top left end
        for row in connect - 1..rows {
            for column in 0..=cols - connect {
                index.push_line(Direction::DiagonalDown, row, column);
            }
        }

        Ok(index)
    }

    fn push_line(&mut self, direction: Direction, row: usize, column: usize) {
        let id = self.lines.len();
        let (dr, dc) = direction.step();
        let cells: Vec<(usize, usize)> = (0..self.connect as isize)
            .map(|i| {
                (
                    (row as isize + dr * i) as usize,
                    (column as isize + dc * i) as usize,
                )
            })
            .collect();
        for &(r, c) in cells.iter() {
            self.through_cell[c + self.cols * r].push(id);
        }
        self.lines.push(WinLine { direction, cells });
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn connect(&self) -> usize {
        self.connect
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[WinLine] {
        &self.lines
    }

    /// Ids of the lines that pass through (row, column)
    pub fn lines_through(&self, row: usize, column: usize) -> &[usize] {
        &self.through_cell[column + self.cols * row]
    }
}
