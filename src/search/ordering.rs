//! Column enumeration and ordering: center-outward window, principal-variation
//! hint, killer moves and the history heuristic.

use crate::board::Board;
use std::cmp::Reverse;

/// Cutoff credit per column, weighted by depth squared.
#[derive(Clone, Debug, Default)]
pub struct HistoryTable {
    scores: Vec<i32>,
}

impl HistoryTable {
    pub fn new(cols: usize) -> Self { Self { scores: vec![0; cols] } }

    pub fn get(&self, col: usize) -> i32 { self.scores.get(col).copied().unwrap_or(0) }

    pub fn reward(&mut self, col: usize, depth: u32) {
        if col >= self.scores.len() { self.scores.resize(col + 1, 0); }
        let d = depth as i32;
        self.scores[col] = self.scores[col].saturating_add(d * d);
    }

    pub fn clear(&mut self) { self.scores.iter_mut().for_each(|s| *s = 0); }
}

/// Two most recent cutoff columns per ply, newest first.
#[derive(Clone, Debug, Default)]
pub struct KillerTable {
    slots: Vec<[Option<usize>; 2]>,
}

impl KillerTable {
    pub fn new(max_ply: usize) -> Self { Self { slots: vec![[None, None]; max_ply] } }

    pub fn get(&self, ply: usize) -> [Option<usize>; 2] { self.slots.get(ply).copied().unwrap_or([None, None]) }

    pub fn record(&mut self, ply: usize, col: usize) {
        if ply >= self.slots.len() { self.slots.resize(ply + 1, [None, None]); }
        let slot = &mut self.slots[ply];
        if slot[0] != Some(col) { *slot = [Some(col), slot[0]]; }
    }

    pub fn clear(&mut self) { self.slots.iter_mut().for_each(|s| *s = [None, None]); }
}

/// Every column, center first then alternating left/right outwards.
pub fn center_out(cols: usize) -> impl Iterator<Item = usize> {
    let center = cols / 2;
    let reach = center.max(cols.saturating_sub(1 + center));
    (0..=reach).flat_map(move |off| {
        let left = center.checked_sub(off);
        let right = if off == 0 { None } else { Some(center + off).filter(|&r| r < cols) };
        left.into_iter().chain(right)
    })
}

/// Up to `limit` droppable columns in center-outward order. A droppable
/// `pv_hint` always comes first; the rest are re-sorted by history score
/// when a table is given (stable, so centrality breaks ties).
pub fn ordered_candidates(board: &Board, limit: usize, pv_hint: Option<usize>, history: Option<&HistoryTable>) -> Vec<usize> {
    let limit = limit.max(1);
    let mut out = Vec::with_capacity(limit);
    let hint = pv_hint.filter(|&c| board.can_drop(c));
    if let Some(h) = hint { out.push(h); }
    for c in center_out(board.cols()) {
        if out.len() >= limit { break; }
        if Some(c) != hint && board.can_drop(c) { out.push(c); }
    }
    if let Some(h) = history {
        let start = usize::from(hint.is_some());
        out[start..].sort_by_key(|&c| Reverse(h.get(c)));
    }
    out
}

/// Moves `col` to the front if present, or inserts it there if droppable.
pub fn promote(order: &mut Vec<usize>, col: usize, board: &Board) {
    if let Some(pos) = order.iter().position(|&c| c == col) {
        let c = order.remove(pos);
        order.insert(0, c);
    } else if board.can_drop(col) {
        order.insert(0, col);
    }
}
