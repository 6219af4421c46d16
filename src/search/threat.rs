//! Immediate tactical threats: closes available right now and open twos.

use crate::board::{Board, Cell, Player, DIRECTIONS};

/// Columns where `player` would connect four with a single drop, left to right.
pub fn winning_columns(board: &Board, player: Player) -> Vec<usize> {
    (0..board.cols()).filter(|&c| board.drop_wins(c, player)).collect()
}

pub fn can_close_now(board: &Board, player: Player) -> bool {
    (0..board.cols()).any(|c| board.drop_wins(c, player))
}

/// First column (left-to-right) where `player` closes immediately.
pub fn find_immediate_win(board: &Board, player: Player) -> Option<usize> {
    (0..board.cols()).find(|&c| board.drop_wins(c, player))
}

/// First column (left-to-right) where `opponent` would close next turn, i.e.
/// the column that must be blocked.
pub fn find_immediate_threat(board: &Board, opponent: Player) -> Option<usize> {
    find_immediate_win(board, opponent)
}

/// Looks for adjacent pairs of live `opponent` pieces whose two flanking cells
/// are both directly playable, and returns the flank column nearest the
/// center. Ties keep scan order.
pub fn find_open_two_block(board: &Board, opponent: Player) -> Option<usize> {
    let own = Cell::from(opponent);
    let mut flanks = Vec::new();
    for r in 0..board.rows() {
        for c in 0..board.cols() {
            if board.cell(r, c) != own || board.is_blocked(r, c) { continue; }
            for &(dr, dc) in &DIRECTIONS {
                let (r2, c2) = (r as isize + dr, c as isize + dc);
                if !board.in_bounds(r2, c2) { continue; }
                let (ur2, uc2) = (r2 as usize, c2 as usize);
                if board.cell(ur2, uc2) != own || board.is_blocked(ur2, uc2) { continue; }
                let (lr, lc) = (r as isize - dr, c as isize - dc);
                let (rr, rc) = (r2 + dr, c2 + dc);
                if board.is_playable_cell(lr, lc) && board.is_playable_cell(rr, rc) {
                    flanks.push(lc as usize);
                    flanks.push(rc as usize);
                }
            }
        }
    }
    let cols = board.cols() as isize;
    flanks.into_iter().min_by_key(|&c| (2 * c as isize - cols).abs())
}
