//! Per-game move notifications

use std::sync::mpsc::Sender;

use anyhow::Result;
use log::warn;

use crate::board::Player;
use crate::detector::GameResult;

/// A notification delivered to listeners of a game
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    MoveStart { player: Player, column: usize },
    MoveEnd { player: Player, column: usize, row: usize },
    GameOver(GameResult),
}

/// Receives the events of a game, synchronously and in order
///
/// Every method defaults to doing nothing. An error only affects the listener that
/// returned it: it is logged and counted, and delivery to other listeners continues.
pub trait GameListener {
    /// Called immediately before a validated move is committed
    fn on_move_start(&mut self, _player: Player, _column: usize) -> Result<()> {
        Ok(())
    }

    /// Called immediately after a move is committed
    fn on_move_end(&mut self, _player: Player, _column: usize, _row: usize) -> Result<()> {
        Ok(())
    }

    /// Called once, after the `on_move_end` of the move that ended the game
    fn on_game_over(&mut self, _result: &GameResult) -> Result<()> {
        Ok(())
    }
}

/// Forwards events into a channel
impl GameListener for Sender<GameEvent> {
    fn on_move_start(&mut self, player: Player, column: usize) -> Result<()> {
        self.send(GameEvent::MoveStart { player, column })?;
        Ok(())
    }

    fn on_move_end(&mut self, player: Player, column: usize, row: usize) -> Result<()> {
        self.send(GameEvent::MoveEnd {
            player,
            column,
            row,
        })?;
        Ok(())
    }

    fn on_game_over(&mut self, result: &GameResult) -> Result<()> {
        self.send(GameEvent::GameOver(result.clone()))?;
        Ok(())
    }
}

/// Handle returned by [`Listeners::subscribe`]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ListenerId(usize);

/// The listeners of one game, in subscription order
#[derive(Default)]
pub struct Listeners {
    entries: Vec<(ListenerId, Box<dyn GameListener>)>,
    next_id: usize,
    failed_deliveries: usize,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Box<dyn GameListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    /// Returns false if no listener had this id
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let len = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != len
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of events a listener failed to handle so far
    pub fn failed_deliveries(&self) -> usize {
        self.failed_deliveries
    }

    pub fn publish(&mut self, event: &GameEvent) {
        for (id, listener) in self.entries.iter_mut() {
            let delivered = match event {
                GameEvent::MoveStart { player, column } => listener.on_move_start(*player, *column),
                GameEvent::MoveEnd {
                    player,
                    column,
                    row,
                } => listener.on_move_end(*player, *column, *row),
                GameEvent::GameOver(result) => listener.on_game_over(result),
            };
            if let Err(err) = delivered {
                warn!("listener {:?} failed to handle {:?}: {}", id, event, err);
                self.failed_deliveries += 1;
            }
        }
    }
}
