//! A game between two sides: turn order, closings and score keeping.

use crate::board::{Board, Player, Rect};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    /// One point per closing.
    #[default]
    Classic,
    /// One point per closed cell; closing over an opponent's cells takes them over.
    Area,
}

impl FromStr for ScoringMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        match s.to_ascii_lowercase().as_str() {
            "classic" => Ok(ScoringMode::Classic),
            "area" => Ok(ScoringMode::Area),
            other => Err(format!("unknown scoring mode {other:?} (expected classic or area)")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosedRegion {
    pub rect: Rect,
    /// The four-or-more line that triggered the closing, from its negative end.
    pub line: Vec<(usize, usize)>,
    /// Cells that became blocked with this closing.
    pub newly_blocked: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropOutcome {
    pub row: usize,
    pub col: usize,
    pub player: Player,
    pub closed: Option<ClosedRegion>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    RedWins,
    BlueWins,
    Tie,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self { Outcome::RedWins => "Red wins", Outcome::BlueWins => "Blue wins", Outcome::Tie => "Tie" })
    }
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    to_move: Player,
    scores: [u32; 2],
    scoring: ScoringMode,
    owner: Vec<Option<Player>>,
    moves: Vec<usize>,
    last: Option<(usize, usize)>,
}

impl Default for Game {
    fn default() -> Self { Self::new(Board::standard(), ScoringMode::Classic) }
}

impl Game {
    /// Red moves first.
    pub fn new(board: Board, scoring: ScoringMode) -> Self {
        let owner = vec![None; board.rows() * board.cols()];
        Self { board, to_move: Player::Red, scores: [0; 2], scoring, owner, moves: Vec::new(), last: None }
    }

    pub fn board(&self) -> &Board { &self.board }
    pub fn to_move(&self) -> Player { self.to_move }
    pub fn score(&self, player: Player) -> u32 { self.scores[player.index()] }
    pub fn scoring(&self) -> ScoringMode { self.scoring }
    pub fn moves(&self) -> &[usize] { &self.moves }
    pub fn last_move(&self) -> Option<(usize, usize)> { self.last }

    /// Who holds a closed cell under area scoring.
    pub fn owner(&self, r: usize, c: usize) -> Option<Player> {
        if r >= self.board.rows() || c >= self.board.cols() { return None; }
        self.owner[r * self.board.cols() + c]
    }

    /// Drops a piece for the side to move, closes a section if it connects
    /// four, updates the score and passes the turn.
    pub fn drop_piece(&mut self, col: usize) -> Result<DropOutcome> {
        if self.is_over() { return Err(Error::GameOver); }
        let row = self.board.drop_row(col).ok_or(Error::ColumnUnavailable(col))?;
        let player = self.to_move;
        self.board.set_cell(row, col, player.into());
        self.moves.push(col);
        self.last = Some((row, col));

        let mut closed = None;
        if let Some(line) = self.board.winning_line(row, col, player) {
            if let Some((rect, newly)) = self.board.close_region(&line, player) {
                self.score_closing(rect, player);
                closed = Some(ClosedRegion { rect, line, newly_blocked: newly.len() });
            }
        }
        self.to_move = player.opponent();
        Ok(DropOutcome { row, col, player, closed })
    }

    fn score_closing(&mut self, rect: Rect, player: Player) {
        match self.scoring {
            ScoringMode::Classic => self.scores[player.index()] += 1,
            ScoringMode::Area => {
                let cols = self.board.cols();
                for r in rect.top..=rect.bottom {
                    for c in rect.left..=rect.right {
                        let slot = &mut self.owner[r * cols + c];
                        if *slot == Some(player) { continue; }
                        if let Some(prev) = slot.replace(player) {
                            self.scores[prev.index()] = self.scores[prev.index()].saturating_sub(1);
                        }
                        self.scores[player.index()] += 1;
                    }
                }
            }
        }
    }

    pub fn is_over(&self) -> bool { !self.board.has_legal_move() }

    /// Final result, or `None` while moves remain.
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.is_over() { return None; }
        let (red, blue) = (self.score(Player::Red), self.score(Player::Blue));
        Some(match red.cmp(&blue) {
            std::cmp::Ordering::Greater => Outcome::RedWins,
            std::cmp::Ordering::Less => Outcome::BlueWins,
            std::cmp::Ordering::Equal => Outcome::Tie,
        })
    }
}
