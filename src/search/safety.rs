use crate::board::Player;
use crate::search::eval::POINT;
use crate::search::position::Position;
use crate::search::threat::{can_close_now, winning_columns};

/// Why a root move is unsafe, least severe first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Hazard {
    /// Lets the opponent make a quiet move that leaves two closing columns.
    Fork,
    /// Lets the opponent close on the very next move.
    HandsClose,
}

impl Hazard {
    /// Score handicap applied when an unsafe move has to be searched anyway.
    pub fn penalty(self) -> i32 {
        match self { Hazard::HandsClose => 999 * POINT, Hazard::Fork => 500 * POINT }
    }
}

/// Returns true if playing `col` for `us` leaves the opponent an immediate close.
pub fn hands_opponent_close(pos: &mut Position, col: usize, us: Player) -> bool {
    let Some(child) = pos.play(col, us) else { return false };
    can_close_now(child.board(), us.opponent())
}

/// Returns true if, after `us` plays `col`, the opponent either closes at once
/// or has a quiet reply after which it holds two or more closing columns.
pub fn creates_opponent_fork(pos: &mut Position, col: usize, us: Player) -> bool {
    let them = us.opponent();
    let Some(mut child) = pos.play(col, us) else { return false };
    if can_close_now(child.board(), them) { return true; }
    for reply in 0..child.board().cols() {
        let Some(grand) = child.play(reply, them) else { continue };
        if winning_columns(grand.board(), them).len() >= 2 { return true; }
    }
    false
}

pub fn classify(pos: &mut Position, col: usize, us: Player, check_forks: bool) -> Option<Hazard> {
    if hands_opponent_close(pos, col, us) { return Some(Hazard::HandsClose); }
    if check_forks && creates_opponent_fork(pos, col, us) { return Some(Hazard::Fork); }
    None
}

/// Root candidates split by safety, each list keeping the input order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RootFilter {
    pub safe: Vec<usize>,
    pub hazards: Vec<(usize, Hazard)>,
}

impl RootFilter {
    pub fn hazard_of(&self, col: usize) -> Option<Hazard> {
        self.hazards.iter().find(|(c, _)| *c == col).map(|&(_, h)| h)
    }

    /// Least severe unsafe move, earliest in candidate order among equals.
    pub fn least_bad(&self) -> Option<usize> {
        self.hazards.iter().min_by_key(|&&(_, h)| h).map(|&(c, _)| c)
    }
}

pub fn filter_root(pos: &mut Position, candidates: &[usize], us: Player, check_forks: bool) -> RootFilter {
    let mut out = RootFilter::default();
    for &col in candidates {
        match classify(pos, col, us, check_forks) {
            None => out.safe.push(col),
            Some(h) => out.hazards.push((col, h)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn stacking_under_an_open_cell_hands_a_close() {
        // Red needs (2,3) for a horizontal four; Blue dropping in column 3
        // makes that cell the next drop.
        let board = Board::from_rows(&[
            "......",
            "......",
            "RRR...",
            "BRB...",
        ]).unwrap();
        let mut pos = Position::new(board.clone());
        assert!(hands_opponent_close(&mut pos, 3, Player::Blue));
        assert!(!hands_opponent_close(&mut pos, 5, Player::Blue));
        assert_eq!(classify(&mut pos, 3, Player::Blue, true), Some(Hazard::HandsClose));
        assert_eq!(pos.board(), &board);
    }
}
