use pretty_assertions::assert_eq;
use squarewars::{choose_move, Cell, Difficulty, Error};

const NO_BLOCKS: [(usize, usize); 0] = [];

#[test]
fn labels_fall_back_to_medium() {
    assert_eq!(Difficulty::from_label(None), Difficulty::Medium);
    assert_eq!(Difficulty::from_label(Some("nightmare")), Difficulty::Medium);
    assert_eq!(Difficulty::from_label(Some("Impossible")), Difficulty::Impossible);
    for d in Difficulty::ALL {
        assert_eq!(d.as_str().parse::<Difficulty>().unwrap(), d);
        assert_eq!(d.to_string(), d.as_str());
    }
    assert!(matches!("nightmare".parse::<Difficulty>(), Err(Error::UnknownDifficulty(_))));
}

#[test]
fn full_grid_has_no_move() {
    let grid = vec![
        vec![Cell::Red, Cell::Blue, Cell::Red],
        vec![Cell::Blue, Cell::Red, Cell::Blue],
    ];
    assert_eq!(choose_move(&grid, NO_BLOCKS, Some("impossible")).unwrap(), None);
}

#[test]
fn caller_state_is_validated() {
    let ragged = vec![vec![Cell::Empty; 4], vec![Cell::Empty; 3]];
    assert!(matches!(choose_move(&ragged, NO_BLOCKS, None), Err(Error::RaggedGrid { row: 1, .. })));
    let grid = vec![vec![Cell::Empty; 4]; 4];
    assert!(matches!(choose_move(&grid, [(4, 0)], None), Err(Error::CellOutOfBounds { .. })));
    let col = choose_move(&grid, [(3, 0)], Some("beginner")).unwrap();
    assert!(matches!(col, Some(c) if c < 4));
}

#[test]
fn empty_label_and_unknown_label_pick_a_column() {
    let grid = vec![vec![Cell::Empty; 7]; 6];
    for label in [None, Some(""), Some("???")] {
        assert!(matches!(choose_move(&grid, NO_BLOCKS, label).unwrap(), Some(c) if c < 7));
    }
}
