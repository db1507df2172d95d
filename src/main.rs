use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use std::io::{stdin, stdout, Write};

use connect4_engine::{
    board::Player,
    config::{EngineConfig, DEFAULT_DEPTH},
    detector::GameResult,
    game::Game,
    CONNECT, HEIGHT, WIDTH,
};

mod display;
mod simulate;

/// Difficulty used when none is given
const DEFAULT_LEVEL: usize = 7;

#[derive(Parser)]
#[command(about = "Play Connect 4 against a minimax engine")]
struct Cli {
    #[command(flatten)]
    engine: EngineArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Args)]
struct EngineArgs {
    /// Number of rows on the board
    #[arg(long, default_value_t = HEIGHT, global = true)]
    rows: usize,
    /// Number of columns on the board
    #[arg(long, default_value_t = WIDTH, global = true)]
    cols: usize,
    /// Number of aligned pieces needed to win
    #[arg(long, default_value_t = CONNECT, global = true)]
    connect: usize,
    /// Plies searched per engine move
    #[arg(long, default_value_t = DEFAULT_DEPTH, global = true)]
    depth: usize,
    /// Search top-level columns in parallel
    #[arg(long, global = true)]
    parallel: bool,
}

impl EngineArgs {
    fn config(&self) -> EngineConfig {
        EngineConfig {
            rows: self.rows,
            cols: self.cols,
            connect: self.connect,
            depth: self.depth,
            parallel: self.parallel,
            ..EngineConfig::default()
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Play against the engine (the default)
    Play {
        /// Engine difficulty, odd levels let the engine move first
        #[arg(long, default_value_t = DEFAULT_LEVEL)]
        level: usize,
    },
    /// Play the engine against itself
    Simulate {
        #[arg(long, default_value_t = 100)]
        games: usize,
        #[arg(long, default_value_t = DEFAULT_LEVEL)]
        level_one: usize,
        #[arg(long, default_value_t = DEFAULT_LEVEL)]
        level_two: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let config = cli.engine.config();

    match cli.command.unwrap_or(Command::Play {
        level: DEFAULT_LEVEL,
    }) {
        Command::Play { level } => play(config, level),
        Command::Simulate {
            games,
            level_one,
            level_two,
            seed,
        } => {
            let tally = simulate::run(config, (level_one, level_two), games, seed)?;
            println!(
                "Player 1 wins: {}, Player 2 wins: {}, Draws: {}",
                tally.player_one, tally.player_two, tally.ties
            );
            Ok(())
        }
    }
}

fn play(config: EngineConfig, level: usize) -> Result<()> {
    let mut game = Game::with_config(config)?;
    let stdin = stdin();

    println!("Welcome to Connect 4, type \"hint\" for a suggested move\n");

    // the engine plays the second player unless the level is odd
    let engine = if level % 2 == 1 { Player::One } else { Player::Two };
    let mut player = Player::One;

    // game loop
    loop {
        display::draw(game.board(), game.winning_coords())?;

        match game.result() {
            None => {
                if player == engine {
                    println!("AI is thinking...");
                    stdout().flush().expect("Failed to flush to stdout!");

                    let (outcome, strategy) = game.play_level(player, level)?;
                    println!("AI played {} ({:?})", outcome.column + 1, strategy);
                } else {
                    print!("Move input > ");
                    stdout().flush().expect("Failed to flush to stdout!");
                    let mut input_str = String::new();
                    stdin.read_line(&mut input_str)?;

                    if input_str.trim() == "hint" {
                        println!("Try column {}", game.suggest_move(player)? + 1);
                        continue;
                    }

                    let column = match input_str.trim().parse::<usize>() {
                        Ok(column) if column >= 1 => column - 1,
                        _ => {
                            println!("Invalid number: {}", input_str.trim());
                            continue;
                        }
                    };
                    if let Err(err) = game.make_move(player, column) {
                        println!("{}", err);
                        // try the move again
                        continue;
                    }
                }
                player = player.other();
            }

            // end states
            Some(GameResult::Win(winner, _)) => {
                println!("{} wins!", winner);
                break;
            }
            Some(GameResult::Tie) => {
                println!("Draw!");
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn play_is_the_default_command() {
        let cli = Cli::parse_from(["connect4"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.engine.depth, DEFAULT_DEPTH);

        match Cli::parse_from(["connect4", "play"]).command {
            Some(Command::Play { level }) => assert_eq!(level, DEFAULT_LEVEL),
            _ => panic!("expected the play command"),
        }
    }

    #[test]
    fn simulate_levels_default_to_play_level() {
        match Cli::parse_from(["connect4", "--rows", "5", "simulate", "--games", "3"]).command {
            Some(Command::Simulate {
                games,
                level_one,
                level_two,
                ..
            }) => assert_eq!((games, level_one, level_two), (3, DEFAULT_LEVEL, DEFAULT_LEVEL)),
            _ => panic!("expected the simulate command"),
        }
    }
}
