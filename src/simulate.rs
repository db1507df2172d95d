use anyhow::{anyhow, Result};
use indicatif::*;
use log::info;
use rayon::prelude::*;

use std::sync::mpsc::*;
use std::thread;
use std::time::Instant;

use connect4_engine::{
    board::Player,
    config::EngineConfig,
    game::{Game, GameStatus},
};

#[derive(Copy, Clone, Debug, Default)]
pub struct Tally {
    pub player_one: usize,
    pub player_two: usize,
    pub ties: usize,
}

/// Plays one engine-vs-engine game, `Player::One` opening
fn play_out(config: EngineConfig, levels: (usize, usize), seed: u64) -> Result<GameStatus> {
    let mut game = Game::with_seed(config, seed)?;
    let mut player = Player::One;

    while !game.is_over() {
        let level = match player {
            Player::One => levels.0,
            Player::Two => levels.1,
        };
        game.play_level(player, level)?;
        player = player.other();
    }
    Ok(game.status())
}

/// Plays `games` engine-vs-engine games on the rayon thread pool
pub fn run(config: EngineConfig, levels: (usize, usize), games: usize, seed: u64) -> Result<Tally> {
    let start = Instant::now();
    let (tx, rx) = channel();

    thread::spawn(move || {
        (0..games)
            .into_par_iter()
            .for_each_with(tx, |tx, game| {
                let status = play_out(config.clone(), levels, seed.wrapping_add(game as u64));
                // the receiver only hangs up once it has stopped counting
                let _ = tx.send(status);
            });
    });

    let progress = ProgressBar::new(games as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Simulating games: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    let mut tally = Tally::default();
    for status in rx.iter().take(games) {
        match status? {
            GameStatus::Won(Player::One) => tally.player_one += 1,
            GameStatus::Won(Player::Two) => tally.player_two += 1,
            GameStatus::Tied => tally.ties += 1,
            status => return Err(anyhow!("game ended unfinished: {:?}", status)),
        }
        progress.inc(1);
    }
    progress.finish();

    info!("simulated {} games in {:?}", games, start.elapsed());
    Ok(tally)
}
