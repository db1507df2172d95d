//! Authoritative end-of-game detection by a full board scan

use crate::board::{Board, Player};

/// Final result of a game
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// The winner and the cells of the line they completed, as (row, column)
    Win(Player, Vec<(usize, usize)>),
    Tie,
}

// right, up, up-right, up-left
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Scans every cell in row-major order from the bottom row for `connect` aligned
/// pieces, trying the directions right, up, up-right then up-left
///
/// Returns the first line found, `Tie` if the board is full without one, or `None`
/// while the game can continue.
pub fn check(board: &Board) -> Option<GameResult> {
    let connect = board.connect() as isize;
    let (rows, cols) = (board.rows() as isize, board.cols() as isize);

    for row in 0..rows {
        for column in 0..cols {
            let cell = board.get(row as usize, column as usize);
            let player = match cell.player() {
                Some(player) => player,
                None => continue,
            };

            for &(dr, dc) in DIRECTIONS.iter() {
                let (end_row, end_column) = (row + dr * (connect - 1), column + dc * (connect - 1));
                if end_row < 0 || end_row >= rows || end_column < 0 || end_column >= cols {
                    continue;
                }
                let aligned = (1..connect).all(|i| {
                    board.get((row + dr * i) as usize, (column + dc * i) as usize) == cell
                });
                if aligned {
                    let coords = (0..connect)
                        .map(|i| ((row + dr * i) as usize, (column + dc * i) as usize))
                        .collect();
                    return Some(GameResult::Win(player, coords));
                }
            }
        }
    }

    if board.is_full() {
        Some(GameResult::Tie)
    } else {
        None
    }
}
