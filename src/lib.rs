//! A move-decision engine for playing the board game 'Connect 4'
//!
//! The engine works on any N-row by M-column gravity board with a configurable
//! connect-length. Moves are chosen by a depth-limited minimax search with
//! alpha-beta pruning over an incrementally maintained line-weight heuristic,
//! blended with random moves according to a difficulty level.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_engine::{game::Game, board::Player};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut game = Game::new(6, 7, 4)?;
//! game.make_move(Player::One, 3)?;
//! let reply = game.smart_move(Player::Two)?;
//!
//! assert!(reply.column < 7);
//! assert_eq!(game.moves().len(), 2);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod board;

pub mod win_lines;

pub mod scorer;

pub mod detector;

pub mod search;

pub mod selector;

pub mod events;

pub mod config;

pub mod game;


pub use error::{EngineError, Result};

/// The width of the default game board in tiles
pub const WIDTH: usize = 7;

/// The height of the default game board in tiles
pub const HEIGHT: usize = 6;

/// The number of aligned tiles needed to win on the default board
pub const CONNECT: usize = 4;

/// The longest supported connect-length
///
/// Line counters reach `2^connect`, and a board's summed counters must fit in an `i64`
pub const MAX_CONNECT: usize = 32;

const_assert!(CONNECT >= 2);
const_assert!(CONNECT <= WIDTH && CONNECT <= HEIGHT);
const_assert!(MAX_CONNECT < 63);
