use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod rules;

pub use rules::Rect;

pub const ROWS: usize = 20;
pub const COLS: usize = 30;
/// Largest supported extent on either axis (bounded by the Zobrist table).
pub const MAX_DIM: usize = 64;

/// Line directions: right, down, down-right, down-left.
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Red,
    Blue,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self { Player::Red => Player::Blue, Player::Blue => Player::Red }
    }

    pub fn index(self) -> usize {
        match self { Player::Red => 0, Player::Blue => 1 }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self { Player::Red => "Red", Player::Blue => "Blue" })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Red,
    Blue,
}

impl Cell {
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Red => Some(Player::Red),
            Cell::Blue => Some(Player::Blue),
        }
    }

    pub fn is_empty(self) -> bool { self == Cell::Empty }
}

impl From<Player> for Cell {
    fn from(p: Player) -> Self {
        match p { Player::Red => Cell::Red, Player::Blue => Cell::Blue }
    }
}

/// Which cells the closing flood fill may walk through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClosingRule {
    /// Only pieces of the player who connected four.
    #[default]
    SamePlayer,
    /// Any occupied cell, regardless of colour.
    AnyPiece,
}

/// Grid of cells plus the parallel blocked mask. Row 0 is the top row;
/// pieces fall towards `rows - 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    blocked: Vec<bool>,
    closing: ClosingRule,
}

impl Default for Board {
    fn default() -> Self { Self::standard() }
}

impl Board {
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 || rows > MAX_DIM || cols > MAX_DIM {
            return Err(Error::InvalidDimensions { rows, cols, max: MAX_DIM });
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
            blocked: vec![false; rows * cols],
            closing: ClosingRule::default(),
        })
    }

    /// Empty 20x30 board.
    pub fn standard() -> Self {
        Self {
            rows: ROWS,
            cols: COLS,
            cells: vec![Cell::Empty; ROWS * COLS],
            blocked: vec![false; ROWS * COLS],
            closing: ClosingRule::default(),
        }
    }

    /// Builds a board from caller-owned state. The grid must be rectangular and
    /// every blocked coordinate must lie on it.
    pub fn from_grid<I>(grid: &[Vec<Cell>], blocked: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let rows = grid.len();
        let cols = grid.first().map_or(0, |r| r.len());
        let mut board = Self::new(rows, cols)?;
        for (r, line) in grid.iter().enumerate() {
            if line.len() != cols {
                return Err(Error::RaggedGrid { row: r, len: line.len(), expected: cols });
            }
            for (c, &cell) in line.iter().enumerate() {
                board.set_cell(r, c, cell);
            }
        }
        for (r, c) in blocked {
            if r >= rows || c >= cols {
                return Err(Error::CellOutOfBounds { row: r, col: c, rows, cols });
            }
            board.set_blocked(r, c, true);
        }
        Ok(board)
    }

    /// Parses the text form printed by `Display`: `.` empty, `R`/`B` pieces,
    /// `#` blocked empty cell, `r`/`b` blocked pieces.
    pub fn from_rows(lines: &[&str]) -> Result<Self> {
        let rows = lines.len();
        let cols = lines.first().map_or(0, |l| l.chars().count());
        let mut board = Self::new(rows, cols)?;
        for (r, line) in lines.iter().enumerate() {
            let len = line.chars().count();
            if len != cols {
                return Err(Error::RaggedGrid { row: r, len, expected: cols });
            }
            for (c, ch) in line.chars().enumerate() {
                let (cell, blocked) = match ch {
                    '.' => (Cell::Empty, false),
                    'R' => (Cell::Red, false),
                    'B' => (Cell::Blue, false),
                    '#' => (Cell::Empty, true),
                    'r' => (Cell::Red, true),
                    'b' => (Cell::Blue, true),
                    _ => return Err(Error::InvalidCellChar { ch, row: r }),
                };
                board.set_cell(r, c, cell);
                board.set_blocked(r, c, blocked);
            }
        }
        Ok(board)
    }

    pub fn with_closing_rule(mut self, rule: ClosingRule) -> Self {
        self.closing = rule;
        self
    }

    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }
    pub fn closing_rule(&self) -> ClosingRule { self.closing }
    pub fn center_col(&self) -> usize { self.cols / 2 }

    #[inline]
    pub fn idx(&self, r: usize, c: usize) -> usize { r * self.cols + c }

    #[inline]
    pub fn in_bounds(&self, r: isize, c: isize) -> bool {
        r >= 0 && c >= 0 && (r as usize) < self.rows && (c as usize) < self.cols
    }

    #[inline]
    pub fn cell(&self, r: usize, c: usize) -> Cell { self.cells[self.idx(r, c)] }

    #[inline]
    pub fn is_blocked(&self, r: usize, c: usize) -> bool { self.blocked[self.idx(r, c)] }

    #[inline]
    pub(crate) fn cell_at(&self, idx: usize) -> Cell { self.cells[idx] }

    #[inline]
    pub(crate) fn blocked_at(&self, idx: usize) -> bool { self.blocked[idx] }

    /// # Panics
    /// Panics if `(r, c)` is off the board.
    pub fn set_cell(&mut self, r: usize, c: usize, cell: Cell) {
        let i = self.idx(r, c);
        self.cells[i] = cell;
    }

    /// # Panics
    /// Panics if `(r, c)` is off the board.
    pub fn set_blocked(&mut self, r: usize, c: usize, blocked: bool) {
        let i = self.idx(r, c);
        self.blocked[i] = blocked;
    }

    #[inline]
    pub(crate) fn set_blocked_at(&mut self, idx: usize, blocked: bool) { self.blocked[idx] = blocked; }

    /// `(row, col)` of every blocked cell, row-major.
    pub fn blocked_cells(&self) -> Vec<(usize, usize)> {
        self.blocked
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b)
            .map(|(i, _)| (i / self.cols, i % self.cols))
            .collect()
    }

    pub fn blocked_count(&self) -> usize { self.blocked.iter().filter(|&&b| b).count() }

    /// Pieces still in play (placed and not blocked).
    pub fn live_piece_count(&self) -> usize {
        self.cells
            .iter()
            .zip(&self.blocked)
            .filter(|&(c, &b)| !c.is_empty() && !b)
            .count()
    }

    /// Same board with Red and Blue exchanged, so the Blue-side engine can
    /// answer for Red.
    pub fn swapped(&self) -> Self {
        let mut out = self.clone();
        for cell in &mut out.cells {
            *cell = match *cell {
                Cell::Red => Cell::Blue,
                Cell::Blue => Cell::Red,
                Cell::Empty => Cell::Empty,
            };
        }
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            for c in 0..self.cols {
                let ch = match (self.cell(r, c), self.is_blocked(r, c)) {
                    (Cell::Empty, false) => '.',
                    (Cell::Red, false) => 'R',
                    (Cell::Blue, false) => 'B',
                    (Cell::Empty, true) => '#',
                    (Cell::Red, true) => 'r',
                    (Cell::Blue, true) => 'b',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
