use crate::board::Board;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// Picks from `ranked` (best first) with cumulative thresholds: with splits
/// `[0.85, 0.97]` the best move is played 85% of the time, the second 12%,
/// the third 3%. Missing ranks fall back to the last available move.
pub fn pick_blended<R: Rng>(ranked: &[usize], splits: &[f64], rng: &mut R) -> Option<usize> {
    let last = *ranked.last()?;
    let roll: f64 = rng.gen();
    let rank = splits.iter().position(|&s| roll < s).unwrap_or(splits.len());
    Some(ranked.get(rank).copied().unwrap_or(last))
}

/// Triangular falloff from the center: weight 4 near the middle, never below 1.
pub fn center_weight(board: &Board, col: usize) -> u32 {
    // |2c - cols| / 6 == floor(distance / 3)
    let falloff = (2 * col as i64 - board.cols() as i64).unsigned_abs() / 6;
    4u64.saturating_sub(falloff).max(1) as u32
}

/// Random column from `cols`, weighted towards the center.
pub fn center_weighted<R: Rng>(board: &Board, cols: &[usize], rng: &mut R) -> Option<usize> {
    if cols.is_empty() { return None; }
    let weights: Vec<u32> = cols.iter().map(|&c| center_weight(board, c)).collect();
    let dist = WeightedIndex::new(&weights).ok()?;
    Some(cols[dist.sample(rng)])
}
