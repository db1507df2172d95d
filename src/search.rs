//! Depth-limited minimax search with alpha-beta pruning

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use log::trace;
use rayon::prelude::*;

use crate::board::{Board, Player};
use crate::config::MIN_DEPTH;
use crate::scorer::IncrementalScorer;
use crate::win_lines::WinLineIndex;
use crate::{EngineError, Result};

/// Score of a position where a line is complete, before the remaining-depth bonus
///
/// Larger than any heuristic total so forced wins dominate positional play.
pub const WIN_SCORE: i64 = i64::MAX / 2;

/// Returns the columns ordered from the middle outwards, as the middle
/// columns take part in more lines and are often better moves
pub fn move_order(cols: usize) -> Vec<usize> {
    // the left of the two middle columns comes first on even widths
    let center = (cols - 1) / 2;
    (0..cols)
        .map(|i| center + (i % 2) * (i / 2 + 1) - (1 - i % 2) * (i / 2))
        .collect()
}

/// A board together with the scorer tracking it
///
/// Search mutates both in place. Every simulated placement goes through
/// [`Position::simulate`], whose guard undoes it on every exit path.
#[derive(Clone, Debug)]
pub struct Position {
    board: Board,
    scorer: IncrementalScorer,
}

impl Position {
    pub fn new(rows: usize, cols: usize, connect: usize) -> Result<Self> {
        let board = Board::new(rows, cols, connect)?;
        let index = Arc::new(WinLineIndex::new(rows, cols, connect)?);
        Ok(Self {
            board,
            scorer: IncrementalScorer::new(index),
        })
    }

    /// Builds a position from a string of 1-indexed column digits, players alternating
    /// from `Player::One`
    pub fn from_moves<S: AsRef<str>>(rows: usize, cols: usize, connect: usize, moves: S) -> Result<Self> {
        let replay = Board::from_moves(rows, cols, connect, moves)?;
        let mut position = Self::new(rows, cols, connect)?;
        // replay bottom-up so every piece lands on the cell it occupies in `replay`
        for row in 0..rows {
            for column in 0..cols {
                if let Some(player) = replay.get(row, column).player() {
                    position.commit(player, column)?;
                }
            }
        }
        Ok(position)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn scorer(&self) -> &IncrementalScorer {
        &self.scorer
    }

    /// Plays a real move on both the board and the scorer, returning its row
    pub fn commit(&mut self, player: Player, column: usize) -> Result<usize> {
        let row = self.board.drop(player, column)?;
        self.scorer.apply(row, column, player);
        Ok(row)
    }

    /// Plays a move that is undone when the returned guard goes out of scope
    ///
    /// A failed drop leaves both the board and the scorer untouched.
    pub fn simulate(&mut self, player: Player, column: usize) -> Result<Simulated<'_>> {
        let row = self.board.drop(player, column)?;
        self.scorer.occupy(row, column, player);
        Ok(Simulated {
            position: self,
            column,
        })
    }
}

/// A simulated placement, reverted on drop
pub struct Simulated<'a> {
    position: &'a mut Position,
    column: usize,
}

impl Deref for Simulated<'_> {
    type Target = Position;

    fn deref(&self) -> &Self::Target {
        self.position
    }
}

impl DerefMut for Simulated<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.position
    }
}

impl Drop for Simulated<'_> {
    fn drop(&mut self) {
        self.position.board.undo_drop(self.column);
        self.position.scorer.undo();
    }
}

/// Minimax agent searching a fixed number of plies
///
/// The depth counts the candidate move itself, so the opponent's replies are
/// only searched from a depth of [`MIN_DEPTH`] upwards. Shallower depths are raised
/// to it.
#[derive(Clone, Debug)]
pub struct SearchEngine {
    depth: usize,
    parallel: bool,

    /// The number of nodes searched by this `SearchEngine` so far (for diagnostics only)
    pub node_count: usize,
}

impl SearchEngine {
    pub fn new(depth: usize) -> Self {
        Self {
            depth: depth.max(MIN_DEPTH),
            parallel: false,
            node_count: 0,
        }
    }

    /// Explores the top-level columns on the rayon thread pool, each on its own
    /// copy of the position
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Scores the position for `maximizer` at `depth` plies, `player` to move
    #[allow(clippy::too_many_arguments)]
    fn minimax(
        &mut self,
        position: &mut Position,
        order: &[usize],
        player: Player,
        maximizer: Player,
        depth: usize,
        mut alpha: i64,
        mut beta: i64,
    ) -> i64 {
        self.node_count += 1;

        let evaluation = position.scorer.evaluate(maximizer);
        // nearer wins score higher, further losses score higher
        match evaluation.winner {
            Some(winner) if winner == maximizer => return WIN_SCORE + depth as i64,
            Some(_) => return -(WIN_SCORE + depth as i64),
            None => {}
        }
        if depth == 0 || position.board.is_full() {
            return evaluation.score;
        }

        if player == maximizer {
            let mut best = i64::MIN;
            for &column in order.iter() {
                let mut child = match position.simulate(player, column) {
                    Ok(child) => child,
                    Err(_) => continue,
                };
                let score = self.minimax(&mut child, order, player.other(), maximizer, depth - 1, alpha, beta);
                best = best.max(score);
                alpha = alpha.max(best);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = i64::MAX;
            for &column in order.iter() {
                let mut child = match position.simulate(player, column) {
                    Ok(child) => child,
                    Err(_) => continue,
                };
                let score = self.minimax(&mut child, order, player.other(), maximizer, depth - 1, alpha, beta);
                best = best.min(score);
                beta = beta.min(best);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }

    /// Scores the move of `player` into `column` by searching the reply tree below it
    fn score_column(
        &mut self,
        position: &mut Position,
        order: &[usize],
        player: Player,
        column: usize,
        alpha: i64,
    ) -> Result<i64> {
        let depth = self.depth - 1;
        let mut child = position.simulate(player, column)?;
        Ok(self.minimax(&mut child, order, player.other(), player, depth, alpha, i64::MAX))
    }

    /// Finds the best column for `player`
    ///
    /// Returns `None` if no column scored better than the impossible minimum, in
    /// which case the caller should fall back to a random legal move.
    pub fn best_move(&mut self, position: &mut Position, player: Player) -> Result<Option<usize>> {
        let order = move_order(position.board.cols());
        let columns: Vec<usize> = order
            .iter()
            .copied()
            .filter(|&column| position.board.playable(column))
            .collect();
        if columns.is_empty() {
            return Err(EngineError::NoLegalMove);
        }

        let scores = if self.parallel {
            let depth = self.depth;
            let root: &Position = position;
            let order = &order;
            let results: Vec<(Result<i64>, usize)> = columns
                .par_iter()
                .map(|&column| {
                    let mut position = root.clone();
                    let mut engine = SearchEngine::new(depth);
                    let score = engine.score_column(&mut position, order, player, column, i64::MIN);
                    (score, engine.node_count)
                })
                .collect();

            let mut scores = Vec::with_capacity(results.len());
            for (score, nodes) in results {
                self.node_count += nodes;
                scores.push(score?);
            }
            scores
        } else {
            let mut scores = Vec::with_capacity(columns.len());
            let mut alpha = i64::MIN;
            for &column in columns.iter() {
                let score = self.score_column(position, &order, player, column, alpha)?;
                alpha = alpha.max(score);
                scores.push(score);
            }
            scores
        };

        // first best column in center-out order
        let mut best_score = i64::MIN;
        let mut best_move = None;
        for (&column, &score) in columns.iter().zip(scores.iter()) {
            trace!("{} column {} scored {}", player, column, score);
            if score > best_score {
                best_score = score;
                best_move = Some(column);
            }
        }
        Ok(best_move)
    }
}
