//! Static evaluation from Blue's point of view.
//!
//! Scores are integers in tenths of a point. Blue's contributions are added at
//! full weight, Red's subtracted at a slightly reduced weight, which leans the
//! engine towards attacking lines.

use crate::board::{Board, Cell, Player, DIRECTIONS};
use crate::search::position::Position;
use serde::{Deserialize, Serialize};

pub const POINT: i32 = 10;
/// Larger than any reachable evaluation.
pub const INF: i32 = 1_000_000_000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvalTier {
    /// Line bands, position and connectivity.
    #[default]
    Simple,
    /// Steeper bands plus immediate-close and mobility terms.
    Advanced,
}

struct Weights {
    bands: [i32; 6],
    run_cap: usize,
    red_line: i32,
    red_pos: i32,
    red_conn: i32,
    closing: i32,
}

// bands: four, open three, closed three, open two, half-open two, single
const SIMPLE: Weights = Weights {
    bands: [1000 * POINT, 60 * POINT, 30 * POINT, 15 * POINT, 8 * POINT, 2 * POINT],
    run_cap: 4,
    red_line: 9,
    red_pos: 8,
    red_conn: 9,
    closing: 1000 * POINT,
};

const ADVANCED: Weights = Weights {
    bands: [4500 * POINT, 420 * POINT, 110 * POINT, 55 * POINT, 22 * POINT, 5 * POINT],
    run_cap: 5,
    red_line: 10,
    red_pos: 9,
    red_conn: 9,
    closing: 4500 * POINT,
};

const BLUE_CLOSE_NOW: i32 = 700 * POINT;
const RED_CLOSE_NOW: i32 = 800 * POINT;
const MOBILITY: i32 = 2 * POINT;

pub fn evaluate(pos: &Position, tier: EvalTier) -> i32 {
    evaluate_board(pos.board(), tier) + banked_closings(pos, tier)
}

/// Value of the sections closed since `pos` was created. Their cells are
/// blocked, so the board scan no longer sees the lines that closed them.
pub fn banked_closings(pos: &Position, tier: EvalTier) -> i32 {
    let closed = pos.closings(Player::Blue) as i32 - pos.closings(Player::Red) as i32;
    closed * weights(tier).closing
}

/// Evaluation of the board alone, ignoring sections closed during search.
pub fn evaluate_board(board: &Board, tier: EvalTier) -> i32 {
    match tier {
        EvalTier::Simple => scan(board, &SIMPLE, tier),
        EvalTier::Advanced => scan(board, &ADVANCED, tier) + tactical_terms(board),
    }
}

fn weights(tier: EvalTier) -> &'static Weights {
    match tier { EvalTier::Simple => &SIMPLE, EvalTier::Advanced => &ADVANCED }
}

#[inline]
fn signed(v: i32, player: Player, red_tenths: i32) -> i32 {
    match player { Player::Blue => v, Player::Red => -(v * red_tenths / 10) }
}

fn scan(board: &Board, w: &Weights, tier: EvalTier) -> i32 {
    let mut score = 0;
    for r in 0..board.rows() {
        for c in 0..board.cols() {
            if board.is_blocked(r, c) { continue; }
            let Some(p) = board.cell(r, c).player() else { continue };
            let mut lines = 0;
            for &(dr, dc) in &DIRECTIONS {
                lines += line_band(board, r, c, dr, dc, p, tier);
            }
            score += signed(lines, p, w.red_line);
            score += signed(positional(board, r, c, tier), p, w.red_pos);
            let conn = connectivity(board, r, c, p);
            let conn = match tier { EvalTier::Simple => conn * 3, EvalTier::Advanced => conn * 2 * POINT };
            score += signed(conn, p, w.red_conn);
        }
    }
    score
}

#[inline]
fn open_at(board: &Board, r: isize, c: isize) -> bool {
    board.in_bounds(r, c) && {
        let (r, c) = (r as usize, c as usize);
        board.cell(r, c).is_empty() && !board.is_blocked(r, c)
    }
}

#[inline]
fn live(board: &Board, r: isize, c: isize, player: Player) -> bool {
    board.in_bounds(r, c) && {
        let (r, c) = (r as usize, c as usize);
        board.cell(r, c) == Cell::from(player) && !board.is_blocked(r, c)
    }
}

/// Band score for the run starting at `(r, c)`; zero unless `(r, c)` is the
/// first cell of its run, so each run is counted once.
pub fn line_band(board: &Board, r: usize, c: usize, dr: isize, dc: isize, player: Player, tier: EvalTier) -> i32 {
    let w = weights(tier);
    let (r0, c0) = (r as isize, c as isize);
    if live(board, r0 - dr, c0 - dc, player) { return 0; }
    let mut count = 1;
    let (mut rr, mut cc) = (r0 + dr, c0 + dc);
    while count < w.run_cap && live(board, rr, cc, player) {
        count += 1;
        rr += dr;
        cc += dc;
    }
    let open = usize::from(open_at(board, rr, cc)) + usize::from(open_at(board, r0 - dr, c0 - dc));
    let b = &w.bands;
    match count {
        n if n >= 4 => b[0],
        3 => if open > 0 { b[1] } else { b[2] },
        2 => if open > 1 { b[3] } else { b[4] },
        _ => b[5],
    }
}

/// Closer to the center column and to the bottom row scores higher.
fn positional(board: &Board, r: usize, c: usize, tier: EvalTier) -> i32 {
    // ten times the distance from the (possibly fractional) center
    let dist10 = (10 * c as i32 - 5 * board.cols() as i32).abs();
    let height = (board.rows() - r) as i32;
    match tier {
        EvalTier::Simple => (8 * POINT - dist10).max(0) + height * POINT / 2,
        EvalTier::Advanced => (15 * POINT - 2 * dist10).max(0) + height * 2 * POINT,
    }
}

/// Sum over directions of the potential line length through `(r, c)`, walking
/// up to three cells each way through empty or own cells. Only potentials of
/// three or more count.
pub fn connectivity(board: &Board, r: usize, c: usize, player: Player) -> i32 {
    let mut total = 0;
    for &(dr, dc) in &DIRECTIONS {
        let mut potential = 1;
        for s in [-1isize, 1] {
            let (mut rr, mut cc) = (r as isize + dr * s, c as isize + dc * s);
            let mut steps = 0;
            while steps < 3 && board.in_bounds(rr, cc) {
                let (ur, uc) = (rr as usize, cc as usize);
                if board.is_blocked(ur, uc) { break; }
                match board.cell(ur, uc) {
                    Cell::Empty => {}
                    cell if cell == Cell::from(player) => potential += 1,
                    _ => break,
                }
                rr += dr * s;
                cc += dc * s;
                steps += 1;
            }
        }
        if potential >= 3 { total += potential; }
    }
    total
}

/// Immediate closes available to each side, and mobility: droppable columns
/// whose next cell up is not a closing cell for the opponent.
fn tactical_terms(board: &Board) -> i32 {
    let (mut close_b, mut close_r, mut mob_b, mut mob_r) = (0, 0, 0, 0);
    for col in 0..board.cols() {
        let Some(row) = board.drop_row(col) else { continue };
        if board.has_four_in_a_row(row, col, Player::Blue) { close_b += 1; }
        if board.has_four_in_a_row(row, col, Player::Red) { close_r += 1; }
        let above = row.checked_sub(1).filter(|&a| open_at(board, a as isize, col as isize));
        let poisoned_for = |p: Player| above.is_some_and(|a| board.has_four_in_a_row(a, col, p.opponent()));
        if !poisoned_for(Player::Blue) { mob_b += 1; }
        if !poisoned_for(Player::Red) { mob_r += 1; }
    }
    close_b * BLUE_CLOSE_NOW - close_r * RED_CLOSE_NOW + (mob_b - mob_r) * MOBILITY
}
