//! Gravity drops, line detection and section closing.

use super::{Board, Cell, ClosingRule, Player, DIRECTIONS};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Inclusive rectangle of cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub top: usize,
    pub bottom: usize,
    pub left: usize,
    pub right: usize,
}

impl Rect {
    pub fn contains(&self, r: usize, c: usize) -> bool {
        (self.top..=self.bottom).contains(&r) && (self.left..=self.right).contains(&c)
    }

    pub fn area(&self) -> usize { (self.bottom - self.top + 1) * (self.right - self.left + 1) }
}

impl Board {
    /// Lowest empty, unblocked row of `col`, scanning bottom-up.
    pub fn drop_row(&self, col: usize) -> Option<usize> {
        if col >= self.cols { return None; }
        (0..self.rows).rev().find(|&r| {
            let i = self.idx(r, col);
            self.cell_at(i).is_empty() && !self.blocked_at(i)
        })
    }

    pub fn can_drop(&self, col: usize) -> bool { self.drop_row(col).is_some() }

    /// Empty, unblocked, on the board, and reachable by gravity in one move.
    pub fn is_playable_cell(&self, r: isize, c: isize) -> bool {
        if !self.in_bounds(r, c) { return false; }
        let (r, c) = (r as usize, c as usize);
        if self.is_blocked(r, c) || !self.cell(r, c).is_empty() { return false; }
        self.drop_row(c) == Some(r)
    }

    pub fn legal_columns(&self) -> Vec<usize> { (0..self.cols).filter(|&c| self.can_drop(c)).collect() }

    pub fn has_legal_move(&self) -> bool { (0..self.cols).any(|c| self.can_drop(c)) }

    #[inline]
    fn holds_live(&self, r: isize, c: isize, player: Player) -> bool {
        if !self.in_bounds(r, c) { return false; }
        let i = self.idx(r as usize, c as usize);
        self.cell_at(i) == Cell::from(player) && !self.blocked_at(i)
    }

    /// Maximal run of live `player` cells through `(r, c)` along `(dr, dc)`,
    /// ordered from the negative end. The seed is always part of the run, so
    /// this can be asked about a cell before the piece is placed.
    pub fn extract_line(&self, r: usize, c: usize, dr: isize, dc: isize, player: Player) -> Vec<(usize, usize)> {
        let mut back = Vec::new();
        let (mut rr, mut cc) = (r as isize - dr, c as isize - dc);
        while self.holds_live(rr, cc, player) {
            back.push((rr as usize, cc as usize));
            rr -= dr;
            cc -= dc;
        }
        back.reverse();
        back.push((r, c));
        let (mut rr, mut cc) = (r as isize + dr, c as isize + dc);
        while self.holds_live(rr, cc, player) {
            back.push((rr as usize, cc as usize));
            rr += dr;
            cc += dc;
        }
        back
    }

    /// Length of the run `extract_line` would return, without allocating.
    pub fn run_length(&self, r: usize, c: usize, dr: isize, dc: isize, player: Player) -> usize {
        let mut n = 1;
        for s in [-1isize, 1] {
            let (mut rr, mut cc) = (r as isize + dr * s, c as isize + dc * s);
            while self.holds_live(rr, cc, player) {
                n += 1;
                rr += dr * s;
                cc += dc * s;
            }
        }
        n
    }

    pub fn has_four_in_a_row(&self, r: usize, c: usize, player: Player) -> bool {
        DIRECTIONS.iter().any(|&(dr, dc)| self.run_length(r, c, dr, dc, player) >= 4)
    }

    /// First line of four or more through `(r, c)` in direction order.
    pub fn winning_line(&self, r: usize, c: usize, player: Player) -> Option<Vec<(usize, usize)>> {
        DIRECTIONS
            .iter()
            .find(|&&(dr, dc)| self.run_length(r, c, dr, dc, player) >= 4)
            .map(|&(dr, dc)| self.extract_line(r, c, dr, dc, player))
    }

    /// True if dropping `player` into `col` would connect four.
    pub fn drop_wins(&self, col: usize, player: Player) -> bool {
        self.drop_row(col).is_some_and(|r| self.has_four_in_a_row(r, col, player))
    }

    /// Bounding rectangle of the 8-connected component grown from `line`.
    /// Which cells join the component is decided by the board's `ClosingRule`.
    pub fn closing_rect(&self, line: &[(usize, usize)], player: Player) -> Option<Rect> {
        let mut seen = vec![false; self.rows * self.cols];
        let mut queue = VecDeque::new();
        for &(r, c) in line {
            let i = self.idx(r, c);
            if !self.blocked_at(i) && !seen[i] {
                seen[i] = true;
                queue.push_back((r, c));
            }
        }
        let mut rect: Option<Rect> = None;
        while let Some((r, c)) = queue.pop_front() {
            rect = Some(match rect {
                None => Rect { top: r, bottom: r, left: c, right: c },
                Some(b) => Rect { top: b.top.min(r), bottom: b.bottom.max(r), left: b.left.min(c), right: b.right.max(c) },
            });
            for dr in -1isize..=1 {
                for dc in -1isize..=1 {
                    if dr == 0 && dc == 0 { continue; }
                    let (nr, nc) = (r as isize + dr, c as isize + dc);
                    if !self.in_bounds(nr, nc) { continue; }
                    let i = self.idx(nr as usize, nc as usize);
                    if seen[i] || self.blocked_at(i) { continue; }
                    let joins = match self.closing {
                        ClosingRule::SamePlayer => self.cell_at(i) == Cell::from(player),
                        ClosingRule::AnyPiece => !self.cell_at(i).is_empty(),
                    };
                    if joins {
                        seen[i] = true;
                        queue.push_back((nr as usize, nc as usize));
                    }
                }
            }
        }
        rect
    }

    /// Blocks every cell of the closing rectangle (not just the component).
    /// Returns the rectangle and the flat indices that changed, for undo.
    pub fn close_region(&mut self, line: &[(usize, usize)], player: Player) -> Option<(Rect, Vec<usize>)> {
        let rect = self.closing_rect(line, player)?;
        let mut newly = Vec::with_capacity(rect.area());
        for r in rect.top..=rect.bottom {
            for c in rect.left..=rect.right {
                let i = self.idx(r, c);
                if !self.blocked_at(i) {
                    self.set_blocked_at(i, true);
                    newly.push(i);
                }
            }
        }
        Some((rect, newly))
    }
}
