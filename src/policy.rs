//! Difficulty tiers. Each tier runs the same pipeline of tactical checks and
//! search, parameterized by its `TierConfig`.

use crate::board::{Board, Cell, Player};
use crate::config::{AiConfig, TierConfig};
use crate::error::{Error, Result};
use crate::search::noise::{center_weighted, pick_blended};
use crate::search::ordering::ordered_candidates;
use crate::search::safety::{filter_root, hands_opponent_close};
use crate::search::threat::{find_immediate_threat, find_immediate_win, find_open_two_block};
use crate::search::{Position, Searcher};
use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    #[default]
    Medium,
    Advanced,
    Impossible,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [Difficulty::Beginner, Difficulty::Medium, Difficulty::Advanced, Difficulty::Impossible];

    /// Lenient label lookup: missing or unrecognized labels mean medium.
    pub fn from_label(label: Option<&str>) -> Self {
        label.and_then(|l| l.parse().ok()).unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Medium => "medium",
            Difficulty::Advanced => "advanced",
            Difficulty::Impossible => "impossible",
        }
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "medium" => Ok(Difficulty::Medium),
            "advanced" => Ok(Difficulty::Advanced),
            "impossible" => Ok(Difficulty::Impossible),
            _ => Err(Error::UnknownDifficulty(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// A computer player: search context, random source and tier settings.
/// The transposition table carries over between moves of the same game.
pub struct Engine {
    searcher: Searcher,
    rng: SmallRng,
    config: AiConfig,
}

impl Engine {
    pub fn new(seed: u64) -> Self { Self::with_config(seed, AiConfig::default()) }

    pub fn with_config(seed: u64, config: AiConfig) -> Self {
        Self { searcher: Searcher::new(), rng: SmallRng::seed_from_u64(seed), config }
    }

    pub fn from_entropy(config: AiConfig) -> Self {
        Self { searcher: Searcher::new(), rng: SmallRng::from_entropy(), config }
    }

    pub fn config(&self) -> &AiConfig { &self.config }

    pub fn searcher_mut(&mut self) -> &mut Searcher { &mut self.searcher }

    /// Forgets cached search results, e.g. between games.
    pub fn reset(&mut self) { self.searcher.clear(); }

    fn tier(&self, difficulty: Difficulty) -> TierConfig {
        match difficulty {
            Difficulty::Beginner => self.config.beginner.clone(),
            Difficulty::Medium => self.config.medium.clone(),
            Difficulty::Advanced => self.config.advanced.clone(),
            Difficulty::Impossible => self.config.impossible.clone(),
        }
    }

    fn roll(&mut self, prob: f64) -> bool { self.rng.gen::<f64>() < prob }

    /// Column for Blue to play, or `None` when no column can take a piece.
    /// The returned column is always droppable.
    pub fn choose_move(&mut self, board: &Board, difficulty: Difficulty) -> Option<usize> {
        if !board.has_legal_move() { return None; }
        let cfg = self.tier(difficulty);
        if let Some(col) = find_immediate_win(board, Player::Blue) {
            debug!("{difficulty}: closing at column {col}");
            return Some(col);
        }
        let col = match difficulty {
            Difficulty::Beginner => self.beginner(board, &cfg),
            Difficulty::Medium => self.medium(board, &cfg),
            Difficulty::Advanced => self.advanced(board, &cfg),
            Difficulty::Impossible => self.impossible(board, &cfg),
        };
        col.filter(|&c| board.can_drop(c)).or_else(|| most_central(board))
    }

    /// Answers for either colour by mirroring the board when `player` is Red.
    pub fn choose_move_for(&mut self, board: &Board, player: Player, difficulty: Difficulty) -> Option<usize> {
        match player {
            Player::Blue => self.choose_move(board, difficulty),
            Player::Red => self.choose_move(&board.swapped(), difficulty),
        }
    }

    fn beginner(&mut self, board: &Board, cfg: &TierConfig) -> Option<usize> {
        if self.roll(cfg.block_prob) {
            if let Some(col) = find_immediate_threat(board, Player::Red) {
                debug!("beginner: blocking column {col}");
                return Some(col);
            }
        }
        let mut pos = Position::new(board.clone());
        let legal = board.legal_columns();
        let safe: Vec<usize> = legal.iter().copied().filter(|&c| !hands_opponent_close(&mut pos, c, Player::Blue)).collect();
        let pool = if safe.is_empty() { &legal } else { &safe };
        center_weighted(board, pool, &mut self.rng)
    }

    fn medium(&mut self, board: &Board, cfg: &TierConfig) -> Option<usize> {
        if let Some(col) = safe_open_two_block(board) {
            if self.roll(cfg.open_two_prob) {
                debug!("medium: blocking open two at column {col}");
                return Some(col);
            }
        }
        if let Some(col) = find_immediate_threat(board, Player::Red) {
            debug!("medium: blocking column {col}");
            return Some(col);
        }
        let ranked = self.ranked_search(board, cfg);
        ranked.first().copied()
    }

    fn advanced(&mut self, board: &Board, cfg: &TierConfig) -> Option<usize> {
        if let Some(col) = find_immediate_threat(board, Player::Red) {
            debug!("advanced: blocking column {col}");
            return Some(col);
        }
        if let Some(col) = safe_open_two_block(board) {
            if self.roll(cfg.open_two_prob) {
                debug!("advanced: blocking open two at column {col}");
                return Some(col);
            }
        }
        let ranked = self.ranked_search(board, cfg);
        pick_blended(&ranked, &cfg.pick_splits, &mut self.rng)
    }

    /// Scores the root window (minus moves that hand Red a close, unless every
    /// move does), adds the center bonus and returns columns best first.
    fn ranked_search(&mut self, board: &Board, cfg: &TierConfig) -> Vec<usize> {
        let depth = effective_depth(board, cfg.depth, cfg.max_depth);
        let mut pos = Position::new(board.clone());
        let candidates = ordered_candidates(board, cfg.candidate_limit, None, None);
        let filter = filter_root(&mut pos, &candidates, Player::Blue, false);
        let set = if filter.safe.is_empty() { candidates } else { filter.safe };
        let mut scored = self.searcher.score_root(&mut pos, &set, cfg.search_params(depth));
        for (col, score) in scored.iter_mut() {
            *score += cfg.center_bonus(*col, board.cols());
        }
        // stable: equal scores keep center-out order
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        debug!("depth {depth} ranking {scored:?}");
        scored.into_iter().map(|(c, _)| c).collect()
    }

    fn impossible(&mut self, board: &Board, cfg: &TierConfig) -> Option<usize> {
        if let Some(col) = find_immediate_threat(board, Player::Red) {
            debug!("impossible: blocking column {col}");
            return Some(col);
        }
        if let Some(col) = safe_open_two_block(board) {
            if self.roll(cfg.open_two_prob) {
                debug!("impossible: blocking open two at column {col}");
                return Some(col);
            }
        }
        let cap = effective_depth(board, cfg.depth, cfg.max_depth);
        let mut pos = Position::new(board.clone());
        let candidates = ordered_candidates(board, cfg.candidate_limit, None, None);
        let filter = filter_root(&mut pos, &candidates, Player::Blue, cfg.check_forks);
        let params = cfg.search_params(cap);
        let result = if filter.safe.is_empty() {
            debug!("impossible: every candidate is unsafe {:?}", filter.hazards);
            let penalty = |col: usize| filter.hazard_of(col).map_or(0, |h| h.penalty());
            self.searcher.iterate(&mut pos, &candidates, params, 2, &penalty)
        } else {
            self.searcher.iterate(&mut pos, &filter.safe, params, 2, &|_| 0)
        };
        debug!(
            "impossible: col {:?} score {} depth {} nodes {}",
            result.best, result.score, result.depth, result.nodes
        );
        result.best.or_else(|| filter.safe.first().copied()).or_else(|| filter.least_bad())
    }
}

/// Base depth, one shallower while the board is nearly empty and one deeper
/// (up to `max`) once it is crowded. Thresholds scale with the board: 20 and
/// 280 live pieces on the 600-cell board.
pub fn effective_depth(board: &Board, base: u32, max: u32) -> u32 {
    let cells = board.rows() * board.cols();
    let filled = board.live_piece_count();
    if filled < cells / 30 {
        base.saturating_sub(1).max(2)
    } else if filled > cells * 7 / 15 {
        (base + 1).min(max.max(base))
    } else {
        base
    }
}

/// Flank column that blocks Red's open two, unless dropping there would let
/// Red close straight away; then the search decides instead.
fn safe_open_two_block(board: &Board) -> Option<usize> {
    let col = find_open_two_block(board, Player::Red)?;
    let mut pos = Position::new(board.clone());
    if hands_opponent_close(&mut pos, col, Player::Blue) {
        debug!("open-two block at column {col} would hand Red a close");
        return None;
    }
    Some(col)
}

/// Droppable column nearest the middle, leftmost on ties.
fn most_central(board: &Board) -> Option<usize> {
    let cols = board.cols() as i64;
    board.legal_columns().into_iter().min_by_key(|&c| (2 * c as i64 - cols).abs())
}

/// One-shot decision from caller-owned state: a rectangular grid, the blocked
/// cells and a tier label (missing or unknown labels mean medium). Builds a
/// fresh engine, so nothing carries over between calls.
pub fn choose_move<I>(grid: &[Vec<Cell>], blocked: I, difficulty: Option<&str>) -> Result<Option<usize>>
where
    I: IntoIterator<Item = (usize, usize)>,
{
    let board = Board::from_grid(grid, blocked)?;
    let mut engine = Engine::from_entropy(AiConfig::default());
    Ok(engine.choose_move(&board, Difficulty::from_label(difficulty)))
}
