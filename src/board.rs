//! The gravity board: cell occupancy, column heights and piece count

use std::fmt;

use crate::config::validate_dimensions;
use crate::{EngineError, Result};

/// One of the two sides of a game
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Index of this player's slot in per-player tables
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "Player 1"),
            Player::Two => write!(f, "Player 2"),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    PlayerOne,
    PlayerTwo,
    Empty,
}

impl Cell {
    pub fn player(&self) -> Option<Player> {
        match self {
            Cell::PlayerOne => Some(Player::One),
            Cell::PlayerTwo => Some(Player::Two),
            Cell::Empty => None,
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }
}

/// A rows × cols grid where pieces fall to the lowest empty row of a column
///
/// Row 0 is the bottom row. A cell can only be occupied if every cell below it
/// in the same column is occupied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Cell>, // cells are stored left-to-right, bottom-to-top
    heights: Vec<usize>,
    rows: usize,
    cols: usize,
    connect: usize,
    num_pieces: usize,
}

impl Board {
    pub fn new(rows: usize, cols: usize, connect: usize) -> Result<Self> {
        validate_dimensions(rows, cols, connect)?;
        Ok(Self {
            cells: vec![Cell::Empty; rows * cols],
            heights: vec![0; cols],
            rows,
            cols,
            connect,
            num_pieces: 0,
        })
    }

    /// Builds a board from a string of 1-indexed column digits, players alternating
    /// from `Player::One`
    pub fn from_moves<S: AsRef<str>>(rows: usize, cols: usize, connect: usize, moves: S) -> Result<Self> {
        let mut board = Self::new(rows, cols, connect)?;
        let mut player = Player::One;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column) if column >= 1 => {
                    board.drop(player, column - 1)?;
                    player = player.other();
                }
                _ => return Err(EngineError::UnparsableMove(column_char)),
            }
        }
        Ok(board)
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

    pub fn num_pieces(&self) -> usize {
        self.num_pieces
    }

    /// Number of pieces currently stacked in `column`
    pub fn height(&self, column: usize) -> usize {
        self.heights[column]
    }

    pub fn get(&self, row: usize, column: usize) -> Cell {
        self.cells[column + self.cols * row]
    }

    pub fn is_full(&self) -> bool {
        self.num_pieces == self.rows * self.cols
    }

    /// A column is playable iff its top row is empty
    pub fn playable(&self, column: usize) -> bool {
        column < self.cols && self.heights[column] < self.rows
    }

    pub fn legal_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.cols).filter(move |&column| self.playable(column))
    }

    /// Checks that a drop into `column` would succeed, without touching the board
    pub fn check_column(&self, column: usize) -> Result<()> {
        if column >= self.cols {
            return Err(EngineError::InvalidColumn {
                column,
                cols: self.cols,
            });
        }
        if self.heights[column] >= self.rows {
            return Err(EngineError::ColumnFull { column });
        }
        Ok(())
    }

    /// Drops a piece for `player` into `column`, returning the row it lands on
    pub fn drop(&mut self, player: Player, column: usize) -> Result<usize> {
        self.check_column(column)?;

        let row = self.heights[column];
        self.cells[column + self.cols * row] = player.into();
        self.heights[column] += 1;
        self.num_pieces += 1;
        Ok(row)
    }

    /// Removes the top piece of `column`
    ///
    /// # Panics
    /// Panics if the column is empty; only a matching earlier `drop` may be undone.
    pub fn undo_drop(&mut self, column: usize) {
        assert!(
            self.heights[column] > 0,
            "undo_drop on empty column {}",
            column
        );
        self.heights[column] -= 1;
        let row = self.heights[column];
        self.cells[column + self.cols * row] = Cell::Empty;
        self.num_pieces -= 1;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.rows).rev() {
            for column in 0..self.cols {
                let symbol = match self.get(row, column) {
                    Cell::PlayerOne => 'X',
                    Cell::PlayerTwo => 'O',
                    Cell::Empty => '.',
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
