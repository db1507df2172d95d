//! A single game: committed moves, the move log, the result and its listeners

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::board::{Board, Player};
use crate::config::EngineConfig;
use crate::detector::{self, GameResult};
use crate::events::{GameEvent, GameListener, ListenerId, Listeners};
use crate::search::{Position, SearchEngine};
use crate::selector::{self, MoveSelector, Strategy};
use crate::{EngineError, Result};

/// A committed move
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub player: Player,
    pub row: usize,
    pub column: usize,
}

/// What happened when a move was committed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub player: Player,
    pub column: usize,
    pub row: usize,
    /// Set if this move ended the game
    pub result: Option<GameResult>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    NotStarted,
    InProgress,
    Won(Player),
    Tied,
}

pub struct Game {
    position: Position,
    selector: MoveSelector,
    moves: Vec<MoveRecord>,
    result: Option<GameResult>,
    listeners: Listeners,
    rng: StdRng,
}

impl Game {
    /// Creates a game on a `rows` × `cols` board with the default engine settings
    pub fn new(rows: usize, cols: usize, connect: usize) -> Result<Self> {
        Self::with_config(EngineConfig {
            rows,
            cols,
            connect,
            ..EngineConfig::default()
        })
    }

    pub fn with_config(config: EngineConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a game whose random choices are reproducible
    pub fn with_seed(config: EngineConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: EngineConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;
        let position = Position::new(config.rows, config.cols, config.connect)?;
        let search = SearchEngine::new(config.depth).with_parallel(config.parallel);
        let selector = MoveSelector::new(search, config.difficulty);
        Ok(Self {
            position,
            selector,
            moves: Vec::new(),
            result: None,
            listeners: Listeners::new(),
            rng,
        })
    }

    pub fn board(&self) -> &Board {
        self.position.board()
    }

    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    /// Number of moves `player` has committed
    pub fn moves_by(&self, player: Player) -> usize {
        self.moves.iter().filter(|record| record.player == player).count()
    }

    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    pub fn winner(&self) -> Option<Player> {
        match &self.result {
            Some(GameResult::Win(player, _)) => Some(*player),
            _ => None,
        }
    }

    /// Cells of the winning line, empty unless the game was won
    pub fn winning_coords(&self) -> &[(usize, usize)] {
        match &self.result {
            Some(GameResult::Win(_, coords)) => coords.as_slice(),
            _ => &[],
        }
    }

    pub fn status(&self) -> GameStatus {
        match &self.result {
            Some(GameResult::Win(player, _)) => GameStatus::Won(*player),
            Some(GameResult::Tie) => GameStatus::Tied,
            None if self.moves.is_empty() => GameStatus::NotStarted,
            None => GameStatus::InProgress,
        }
    }

    /// Number of search nodes visited by this game's engine so far
    pub fn node_count(&self) -> usize {
        self.selector.search().node_count
    }

    pub fn subscribe(&mut self, listener: Box<dyn GameListener>) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    /// Commits a move of `player` into `column`
    ///
    /// Fails without notifying listeners if the game is over or the column cannot
    /// take a piece.
    pub fn make_move(&mut self, player: Player, column: usize) -> Result<MoveOutcome> {
        self.ensure_playing()?;
        self.position.board().check_column(column)?;

        self.listeners
            .publish(&GameEvent::MoveStart { player, column });

        let row = self.position.commit(player, column)?;
        self.moves.push(MoveRecord {
            player,
            row,
            column,
        });
        self.result = detector::check(self.position.board());
        debug!("{} played column {}, row {}", player, column, row);

        self.listeners.publish(&GameEvent::MoveEnd {
            player,
            column,
            row,
        });
        if let Some(result) = &self.result {
            info!("game over after {} moves: {:?}", self.moves.len(), result);
            self.listeners.publish(&GameEvent::GameOver(result.clone()));
        }

        Ok(MoveOutcome {
            player,
            column,
            row,
            result: self.result.clone(),
        })
    }

    fn ensure_playing(&self) -> Result<()> {
        if self.result.is_some() {
            return Err(EngineError::GameOver);
        }
        Ok(())
    }

    /// Commits a uniformly random legal move for `player`
    pub fn random_move(&mut self, player: Player) -> Result<MoveOutcome> {
        self.ensure_playing()?;
        let column = selector::random_move(self.position.board(), &mut self.rng)?;
        self.make_move(player, column)
    }

    /// Returns the column the search engine finds best for `player`, leaving the
    /// game untouched
    pub fn suggest_move(&mut self, player: Player) -> Result<usize> {
        self.ensure_playing()?;
        self.selector
            .smart_move(&mut self.position, player, &mut self.rng)
    }

    /// Commits the move the search engine finds best for `player`
    pub fn smart_move(&mut self, player: Player) -> Result<MoveOutcome> {
        let column = self.suggest_move(player)?;
        self.make_move(player, column)
    }

    /// Commits a move for `player` chosen at difficulty `level`
    pub fn play_level(&mut self, player: Player, level: usize) -> Result<(MoveOutcome, Strategy)> {
        self.ensure_playing()?;
        let (column, strategy) =
            self.selector
                .choose_move(&mut self.position, player, level, &mut self.rng)?;
        Ok((self.make_move(player, column)?, strategy))
    }
}
