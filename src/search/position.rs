use crate::board::{Board, Player};
use crate::search::zobrist;
use std::ops::{Deref, DerefMut};

/// Everything needed to take a simulated drop back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub row: usize,
    pub col: usize,
    pub player: Player,
    /// Flat indices that flipped to blocked because this drop closed a section.
    pub newly_closed: Vec<usize>,
    pub closed: bool,
    /// Hash after the drop.
    pub hash: u64,
}

/// Search-side view of a board: the working copy, its incremental hash, and
/// a tally of sections closed since the position was created.
#[derive(Clone, Debug)]
pub struct Position {
    board: Board,
    hash: u64,
    closed: [u32; 2],
}

impl Position {
    pub fn new(board: Board) -> Self {
        let hash = zobrist::compute(&board);
        Self { board, hash, closed: [0; 2] }
    }

    pub fn board(&self) -> &Board { &self.board }
    pub fn into_board(self) -> Board { self.board }
    pub fn hash(&self) -> u64 { self.hash }

    /// Sections `player` closed since this position was created.
    pub fn closings(&self, player: Player) -> u32 { self.closed[player.index()] }

    /// Drops `player` into `col`, closing a section if four connect. The side
    /// key is toggled so the same placement with the other side to move hashes
    /// differently.
    pub fn apply(&mut self, col: usize, player: Player) -> Option<MoveRecord> {
        let row = self.board.drop_row(col)?;
        self.board.set_cell(row, col, player.into());
        let mut hash = self.hash ^ zobrist::piece_key(row, col, player) ^ zobrist::side_key();
        let mut newly_closed = Vec::new();
        let mut closed = false;
        if let Some(line) = self.board.winning_line(row, col, player) {
            if let Some((_, cells)) = self.board.close_region(&line, player) {
                let cols = self.board.cols();
                for &i in &cells { hash ^= zobrist::block_key(i / cols, i % cols); }
                newly_closed = cells;
                closed = true;
                self.closed[player.index()] += 1;
            }
        }
        self.hash = hash;
        Some(MoveRecord { row, col, player, newly_closed, closed, hash })
    }

    /// Reverses `apply` by replaying the same XOR mask; nothing is recomputed.
    pub fn undo(&mut self, mv: MoveRecord) {
        let cols = self.board.cols();
        let mut hash = mv.hash;
        for &i in &mv.newly_closed {
            self.board.set_blocked_at(i, false);
            hash ^= zobrist::block_key(i / cols, i % cols);
        }
        if mv.closed { self.closed[mv.player.index()] -= 1; }
        self.board.set_cell(mv.row, mv.col, crate::board::Cell::Empty);
        self.hash = hash ^ zobrist::piece_key(mv.row, mv.col, mv.player) ^ zobrist::side_key();
    }

    /// Scoped drop: the returned guard derefs to the child position and undoes
    /// the move when it goes out of scope, on every exit path.
    pub fn play(&mut self, col: usize, player: Player) -> Option<Played<'_>> {
        let mv = self.apply(col, player)?;
        Some(Played { pos: self, mv: Some(mv) })
    }
}

pub struct Played<'a> {
    pos: &'a mut Position,
    mv: Option<MoveRecord>,
}

impl Played<'_> {
    pub fn record(&self) -> Option<&MoveRecord> { self.mv.as_ref() }
}

impl Deref for Played<'_> {
    type Target = Position;
    fn deref(&self) -> &Position { self.pos }
}

impl DerefMut for Played<'_> {
    fn deref_mut(&mut self) -> &mut Position { self.pos }
}

impl Drop for Played<'_> {
    fn drop(&mut self) {
        if let Some(mv) = self.mv.take() { self.pos.undo(mv); }
    }
}
