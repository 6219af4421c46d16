use pretty_assertions::assert_eq;
use squarewars::{Board, Error, Game, Outcome, Player, ScoringMode};

// Red closes column 0 (rows 2-5). Blue then answers at (1,0), completing the
// diagonal (1,0)-(4,3); its box (rows 1-5, columns 0-3) covers Red's cells.
const OVERLAP: [&str; 6] = [
    "......",
    "......",
    ".B....",
    "RBB...",
    "RBRB..",
    "RBRR..",
];

#[test]
fn classic_scores_one_point_per_closing() {
    let mut g = Game::new(Board::from_rows(&OVERLAP).unwrap(), ScoringMode::Classic);
    assert_eq!(g.to_move(), Player::Red);
    assert!(g.drop_piece(0).unwrap().closed.is_some());
    assert_eq!(g.to_move(), Player::Blue, "turn passes after a closing");
    let out = g.drop_piece(0).unwrap();
    assert_eq!((out.row, out.col, out.player), (1, 0, Player::Blue));
    assert!(out.closed.is_some());
    assert_eq!((g.score(Player::Red), g.score(Player::Blue)), (1, 1));
    assert_eq!(g.moves(), &[0, 0]);
    assert_eq!(g.last_move(), Some((1, 0)));
}

#[test]
fn area_reclosing_transfers_ownership() {
    let mut g = Game::new(Board::from_rows(&OVERLAP).unwrap(), ScoringMode::Area);
    g.drop_piece(0).unwrap();
    assert_eq!((g.score(Player::Red), g.score(Player::Blue)), (4, 0));
    assert_eq!(g.owner(3, 0), Some(Player::Red));

    let region = g.drop_piece(0).unwrap().closed.expect("blue diagonal closes");
    assert_eq!((region.rect.top, region.rect.bottom, region.rect.left, region.rect.right), (1, 5, 0, 3));
    assert_eq!((g.score(Player::Red), g.score(Player::Blue)), (0, 20));
    assert_eq!(g.owner(3, 0), Some(Player::Blue));
    assert_eq!(g.owner(0, 0), None);
}

#[test]
fn full_board_ends_the_game() {
    let mut g = Game::new(Board::from_rows(&["...."]).unwrap(), ScoringMode::Classic);
    assert_eq!(g.outcome(), None);
    for c in 0..4 {
        assert!(g.drop_piece(c).unwrap().closed.is_none());
    }
    assert!(g.is_over());
    assert_eq!(g.outcome(), Some(Outcome::Tie));
    assert!(matches!(g.drop_piece(0), Err(Error::GameOver)));
}

#[test]
fn unavailable_column_is_rejected() {
    let mut g = Game::new(Board::from_rows(&["..", "R."]).unwrap(), ScoringMode::Classic);
    g.drop_piece(0).unwrap();
    assert!(matches!(g.drop_piece(0), Err(Error::ColumnUnavailable(0))));
    assert!(matches!(g.drop_piece(7), Err(Error::ColumnUnavailable(7))));
    assert_eq!(g.to_move(), Player::Blue, "a rejected drop keeps the turn");
}

#[test]
fn higher_score_wins() {
    let mut g = Game::new(Board::from_rows(&["....", "RRR."]).unwrap(), ScoringMode::Classic);
    g.drop_piece(3).unwrap();
    // Row 1 is closed; Blue and Red fill the top row
    for c in 0..4 {
        if !g.is_over() { g.drop_piece(c).unwrap(); }
    }
    assert_eq!(g.outcome(), Some(Outcome::RedWins));
}
