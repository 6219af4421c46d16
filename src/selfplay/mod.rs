use crate::board::{Board, ClosingRule, Player, COLS, ROWS};
use crate::config::AiConfig;
use crate::error::Result;
use crate::game::{Game, Outcome, ScoringMode};
use crate::policy::{Difficulty, Engine};
use crate::search::noise::center_weighted;
use log::{info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

#[derive(Clone, Debug)]
pub struct SelfPlayParams {
    pub games: usize,
    pub red: Difficulty,
    pub blue: Difficulty,
    pub seed: u64,
    /// Stop a game after this many drops; 0 plays until no column is left.
    pub max_plies: usize,
    pub rows: usize,
    pub cols: usize,
    pub scoring: ScoringMode,
    pub closing: ClosingRule,
    /// Center-weighted random drops before the engines take over, so seeded
    /// games do not all start the same way.
    pub opening_plies: usize,
    pub config: AiConfig,
    /// Worker threads; 0 uses rayon's default pool.
    pub threads: usize,
}

impl Default for SelfPlayParams {
    fn default() -> Self {
        Self {
            games: 10,
            red: Difficulty::Medium,
            blue: Difficulty::Advanced,
            seed: 42,
            max_plies: 0,
            rows: ROWS,
            cols: COLS,
            scoring: ScoringMode::Classic,
            closing: ClosingRule::SamePlayer,
            opening_plies: 2,
            config: AiConfig::default(),
            threads: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub index: usize,
    pub seed: u64,
    pub red: Difficulty,
    pub blue: Difficulty,
    pub scoring: ScoringMode,
    pub moves: Vec<usize>,
    pub red_score: u32,
    pub blue_score: u32,
    pub closings: usize,
    /// `None` when the ply limit cut the game short.
    pub outcome: Option<Outcome>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub red_wins: usize,
    pub blue_wins: usize,
    pub ties: usize,
    pub unfinished: usize,
}

pub fn summarize(records: &[GameRecord]) -> Summary {
    let mut s = Summary::default();
    for r in records {
        match r.outcome {
            Some(Outcome::RedWins) => s.red_wins += 1,
            Some(Outcome::BlueWins) => s.blue_wins += 1,
            Some(Outcome::Tie) => s.ties += 1,
            None => s.unfinished += 1,
        }
    }
    s
}

fn game_seed(base: u64, index: usize) -> u64 {
    base ^ (index as u64).wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Plays game `index` of a match. Each side gets its own engine, seeded from
/// the match seed and the game index.
pub fn play_game(params: &SelfPlayParams, index: usize) -> Result<GameRecord> {
    let seed = game_seed(params.seed, index);
    let board = Board::new(params.rows, params.cols)?.with_closing_rule(params.closing);
    let mut game = Game::new(board, params.scoring);
    let mut red = Engine::with_config(seed.rotate_left(21), params.config.clone());
    let mut blue = Engine::with_config(seed.rotate_left(42), params.config.clone());
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut closings = 0;

    while !game.is_over() && (params.max_plies == 0 || game.moves().len() < params.max_plies) {
        let col = if game.moves().len() < params.opening_plies {
            center_weighted(game.board(), &game.board().legal_columns(), &mut rng)
        } else {
            match game.to_move() {
                Player::Red => red.choose_move_for(game.board(), Player::Red, params.red),
                Player::Blue => blue.choose_move(game.board(), params.blue),
            }
        };
        let Some(col) = col else { break };
        if game.drop_piece(col)?.closed.is_some() { closings += 1; }
    }

    Ok(GameRecord {
        index,
        seed,
        red: params.red,
        blue: params.blue,
        scoring: params.scoring,
        moves: game.moves().to_vec(),
        red_score: game.score(Player::Red),
        blue_score: game.score(Player::Blue),
        closings,
        outcome: game.outcome(),
    })
}

/// Plays `params.games` games in parallel; results come back in game order.
/// `on_game` runs once per finished game, from whichever worker finished it.
pub fn generate_games<F>(params: &SelfPlayParams, on_game: F) -> Result<Vec<GameRecord>>
where
    F: Fn(&GameRecord) + Sync,
{
    let run = || {
        (0..params.games)
            .into_par_iter()
            .map(|i| {
                let rec = play_game(params, i)?;
                on_game(&rec);
                Ok(rec)
            })
            .collect::<Result<Vec<_>>>()
    };
    let records = if params.threads > 0 {
        match rayon::ThreadPoolBuilder::new().num_threads(params.threads).build() {
            Ok(pool) => pool.install(run),
            Err(e) => {
                warn!("thread pool unavailable ({e}); using the global pool");
                run()
            }
        }
    } else {
        run()
    }?;
    let s = summarize(&records);
    info!(
        "{} ({}) vs {} ({}): red {} blue {} ties {} unfinished {}",
        Player::Red, params.red, Player::Blue, params.blue, s.red_wins, s.blue_wins, s.ties, s.unfinished
    );
    Ok(records)
}

/// One JSON object per line.
pub fn write_records<P: AsRef<Path>>(path: P, records: &[GameRecord]) -> Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    for r in records {
        serde_json::to_writer(&mut w, r)?;
        w.write_all(b"\n")?;
    }
    w.flush()?;
    Ok(())
}

pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<GameRecord>> {
    let reader = BufReader::new(File::open(path)?);
    let mut out = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        out.push(serde_json::from_str(&line)?);
    }
    Ok(out)
}
