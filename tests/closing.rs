use pretty_assertions::assert_eq;
use squarewars::{Board, ClosingRule, Game, Rect, ScoringMode};

// Red's L: column 0 rows 3-5 plus row 5 columns 1-2. Dropping into column 0
// connects four vertically.
const L_SHAPE: [&str; 6] = [
    "......",
    "......",
    "......",
    "R.....",
    "R.B...",
    "RRR.B.",
];

fn rect_cells(top: usize, bottom: usize, left: usize, right: usize) -> Vec<(usize, usize)> {
    let mut v = Vec::new();
    for r in top..=bottom {
        for c in left..=right { v.push((r, c)); }
    }
    v
}

#[test]
fn closing_blocks_the_bounding_box_of_the_cluster() {
    let mut game = Game::new(Board::from_rows(&L_SHAPE).unwrap(), ScoringMode::Classic);
    let out = game.drop_piece(0).unwrap();
    let region = out.closed.expect("four in a row closes");
    assert_eq!(region.rect, Rect { top: 2, bottom: 5, left: 0, right: 2 });
    assert_eq!(region.line, vec![(2, 0), (3, 0), (4, 0), (5, 0)]);
    // The blue piece inside the box is blocked too; the one outside is not.
    assert_eq!(game.board().blocked_cells(), rect_cells(2, 5, 0, 2));
    assert_eq!(region.newly_blocked, 12);
    assert!(!game.board().is_blocked(5, 4));
}

#[test]
fn any_piece_rule_grows_through_opponent_pieces() {
    let rows = [
        "......",
        "......",
        "......",
        "R.....",
        "R.....",
        "RRRB..",
    ];
    let same = Board::from_rows(&rows).unwrap();
    let any = same.clone().with_closing_rule(ClosingRule::AnyPiece);

    let mut g = Game::new(same, ScoringMode::Classic);
    assert_eq!(g.drop_piece(0).unwrap().closed.map(|c| c.rect), Some(Rect { top: 2, bottom: 5, left: 0, right: 2 }));

    let mut g = Game::new(any, ScoringMode::Classic);
    assert_eq!(g.drop_piece(0).unwrap().closed.map(|c| c.rect), Some(Rect { top: 2, bottom: 5, left: 0, right: 3 }));
}

#[test]
fn blocked_cells_end_lines_and_drops() {
    let mut game = Game::new(Board::from_rows(&L_SHAPE).unwrap(), ScoringMode::Classic);
    game.drop_piece(0).unwrap();
    let b = game.board();
    assert_eq!(b.drop_row(0), Some(1));
    assert_eq!(b.drop_row(1), Some(1));
    assert_eq!(b.drop_row(3), Some(5));
    assert_eq!(b.live_piece_count(), 1);
}
