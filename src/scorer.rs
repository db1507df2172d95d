//! Incremental line-weight heuristic
//!
//! Every win line carries one counter per player, starting at 1. Placing a piece
//! doubles the placing player's counter on every line through that cell and zeroes
//! the opponent's, so a counter is always 0 or a power of two no larger than
//! `2^connect`. A counter of exactly `2^connect` means the line is fully owned.

use std::sync::Arc;

use crate::board::Player;
use crate::win_lines::WinLineIndex;

/// Heuristic value of a position from a fixed player's perspective
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Evaluation {
    /// Sum of the perspective player's counters minus the opponent's
    pub score: i64,
    /// A player owning a complete line, if any
    pub winner: Option<Player>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Snapshot {
    counters: [Vec<u64>; 2],
    totals: [i64; 2],
    captured: Option<Player>,
}

#[derive(Clone, Debug)]
pub struct IncrementalScorer {
    index: Arc<WinLineIndex>,
    counters: [Vec<u64>; 2],
    totals: [i64; 2],
    captured: Option<Player>,
    full_line: u64,
    history: Vec<Snapshot>,
}

impl IncrementalScorer {
    pub fn new(index: Arc<WinLineIndex>) -> Self {
        let lines = index.len();
        let full_line = 1u64 << index.connect();
        Self {
            index,
            counters: [vec![1; lines], vec![1; lines]],
            totals: [lines as i64, lines as i64],
            captured: None,
            full_line,
            history: Vec::new(),
        }
    }

    pub fn counters(&self, player: Player) -> &[u64] {
        &self.counters[player.index()]
    }

    pub fn total(&self, player: Player) -> i64 {
        self.totals[player.index()]
    }

    /// Number of simulated placements that have not been undone
    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// Records a snapshot, then places `player`'s piece at (row, column)
    pub fn occupy(&mut self, row: usize, column: usize, player: Player) {
        self.history.push(Snapshot {
            counters: self.counters.clone(),
            totals: self.totals,
            captured: self.captured,
        });
        self.apply(row, column, player);
    }

    /// Places `player`'s piece at (row, column) without recording a snapshot
    ///
    /// Used for committed moves, which are never undone.
    pub fn apply(&mut self, row: usize, column: usize, player: Player) {
        let (own, opp) = (player.index(), player.other().index());
        for &id in self.index.lines_through(row, column) {
            let counter = self.counters[own][id];
            self.counters[own][id] = counter << 1;
            self.totals[own] += counter as i64;
            if counter << 1 == self.full_line && self.captured.is_none() {
                self.captured = Some(player);
            }

            self.totals[opp] -= self.counters[opp][id] as i64;
            self.counters[opp][id] = 0;
        }
    }

    /// Restores the state from before the most recent `occupy`
    ///
    /// # Panics
    /// Panics if there is no matching `occupy`.
    pub fn undo(&mut self) {
        let snapshot = self
            .history
            .pop()
            .expect("scorer undo without a matching occupy");
        self.counters = snapshot.counters;
        self.totals = snapshot.totals;
        self.captured = snapshot.captured;
    }

    pub fn evaluate(&self, perspective: Player) -> Evaluation {
        Evaluation {
            score: self.totals[perspective.index()] - self.totals[perspective.other().index()],
            winner: self.captured,
        }
    }
}

impl PartialEq for IncrementalScorer {
    fn eq(&self, other: &Self) -> bool {
        self.counters == other.counters
            && self.totals == other.totals
            && self.captured == other.captured
            && self.history == other.history
    }
}
