//! Game and engine configuration

use crate::{EngineError, Result, CONNECT, HEIGHT, MAX_CONNECT, WIDTH};

/// The search depth used when none is configured
pub const DEFAULT_DEPTH: usize = 5;

/// The shallowest useful search: the candidate move plus the opponent's reply
pub const MIN_DEPTH: usize = 2;

/// Checks that a board of `rows` × `cols` can hold at least one line of `connect` in
/// every direction
pub fn validate_dimensions(rows: usize, cols: usize, connect: usize) -> Result<()> {
    if connect < 2 {
        return Err(EngineError::InvalidConfig(format!(
            "connect-length must be at least 2, got {}",
            connect
        )));
    }
    if connect > MAX_CONNECT {
        return Err(EngineError::InvalidConfig(format!(
            "connect-length must be at most {}, got {}",
            MAX_CONNECT, connect
        )));
    }
    if connect > rows || connect > cols {
        return Err(EngineError::InvalidConfig(format!(
            "a {}x{} board cannot fit a line of {}",
            rows, cols, connect
        )));
    }
    Ok(())
}

/// Maps a difficulty level to the bias weight of the move selector
///
/// A move is chosen by search when a uniform draw from `1..=99` exceeds the weight,
/// so a weight of 0 always searches and a weight of 99 or more always plays randomly.
/// Weights never increase with the level. Levels past the end of the table always search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DifficultyTable {
    weights: Vec<u32>,
}

impl DifficultyTable {
    pub fn new(weights: Vec<u32>) -> Result<Self> {
        if let Some(&weight) = weights.iter().find(|&&w| w > 100) {
            return Err(EngineError::InvalidConfig(format!(
                "difficulty weight {} is above 100",
                weight
            )));
        }
        if weights.windows(2).any(|pair| pair[1] > pair[0]) {
            return Err(EngineError::InvalidConfig(
                "difficulty weights must not increase with the level".to_string(),
            ));
        }
        Ok(Self { weights })
    }

    pub fn weight(&self, level: usize) -> u32 {
        self.weights.get(level).copied().unwrap_or(0)
    }

    pub fn levels(&self) -> usize {
        self.weights.len()
    }
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            weights: vec![50, 50, 30, 30, 10, 10, 5, 5],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    pub rows: usize,
    pub cols: usize,
    pub connect: usize,
    /// Plies searched from the current position, the candidate move included
    pub depth: usize,
    pub difficulty: DifficultyTable,
    /// Explore top-level columns on the rayon thread pool
    pub parallel: bool,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        validate_dimensions(self.rows, self.cols, self.connect)?;
        if self.depth < MIN_DEPTH {
            return Err(EngineError::InvalidConfig(format!(
                "search depth must be at least {}, got {}",
                MIN_DEPTH, self.depth
            )));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: HEIGHT,
            cols: WIDTH,
            connect: CONNECT,
            depth: DEFAULT_DEPTH,
            difficulty: DifficultyTable::default(),
            parallel: false,
        }
    }
}
