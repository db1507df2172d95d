//! Blends searched and random moves according to a difficulty level

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Board, Player};
use crate::config::DifficultyTable;
use crate::search::{Position, SearchEngine};
use crate::{EngineError, Result};

/// How a move was chosen
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Strategy {
    Search,
    Random,
}

/// Picks a uniformly random legal column
///
/// The columns are shuffled and scanned for the first playable one, which selects
/// uniformly among the legal columns only.
pub fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Result<usize> {
    let mut columns: Vec<usize> = (0..board.cols()).collect();
    columns.shuffle(rng);
    columns
        .into_iter()
        .find(|&column| board.playable(column))
        .ok_or(EngineError::NoLegalMove)
}

#[derive(Clone, Debug)]
pub struct MoveSelector {
    search: SearchEngine,
    difficulty: DifficultyTable,
}

impl MoveSelector {
    pub fn new(search: SearchEngine, difficulty: DifficultyTable) -> Self {
        Self { search, difficulty }
    }

    pub fn search(&self) -> &SearchEngine {
        &self.search
    }

    /// Decides whether a move at `level` is searched or random
    ///
    /// Draws from `1..=99` and searches when the draw exceeds the level's weight.
    pub fn strategy<R: Rng + ?Sized>(&self, level: usize, rng: &mut R) -> Strategy {
        let draw = rng.gen_range(1..=99);
        if draw > self.difficulty.weight(level) {
            Strategy::Search
        } else {
            Strategy::Random
        }
    }

    /// Picks the best column found by search, or a random one if search
    /// finds nothing better than the impossible minimum
    pub fn smart_move<R: Rng + ?Sized>(
        &mut self,
        position: &mut Position,
        player: Player,
        rng: &mut R,
    ) -> Result<usize> {
        match self.search.best_move(position, player)? {
            Some(column) => Ok(column),
            None => {
                debug!("search found no move for {}, playing randomly", player);
                random_move(position.board(), rng)
            }
        }
    }

    pub fn choose_move<R: Rng + ?Sized>(
        &mut self,
        position: &mut Position,
        player: Player,
        level: usize,
        rng: &mut R,
    ) -> Result<(usize, Strategy)> {
        let strategy = self.strategy(level, rng);
        let column = match strategy {
            Strategy::Search => self.smart_move(position, player, rng)?,
            Strategy::Random => random_move(position.board(), rng)?,
        };
        debug!(
            "{} chose column {} by {:?} at level {}",
            player, column, strategy, level
        );
        Ok((column, strategy))
    }
}
