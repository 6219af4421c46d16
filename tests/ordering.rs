use pretty_assertions::assert_eq;
use squarewars::search::ordering::{ordered_candidates, promote, HistoryTable};
use squarewars::Board;

#[test]
fn center_first_with_limit() {
    let b = Board::new(6, 9).unwrap();
    assert_eq!(ordered_candidates(&b, 5, None, None), vec![4, 3, 5, 2, 6]);
    assert_eq!(ordered_candidates(&b, 0, None, None), vec![4]);
}

#[test]
fn hint_leads_and_full_columns_are_skipped() {
    let b = Board::from_rows(&["R.....", "B.....", "R....."]).unwrap();
    assert_eq!(ordered_candidates(&b, 3, Some(5), None), vec![5, 3, 2]);
    // A full column is never a candidate, even as the hint.
    assert_eq!(ordered_candidates(&b, 6, Some(0), None), vec![3, 2, 4, 1, 5]);
}

#[test]
fn history_reorders_after_the_hint() {
    let b = Board::new(4, 7).unwrap();
    let mut h = HistoryTable::new(7);
    h.reward(0, 3);
    h.reward(6, 2);
    assert_eq!(ordered_candidates(&b, 7, None, Some(&h)), vec![0, 6, 3, 2, 4, 1, 5]);
    assert_eq!(ordered_candidates(&b, 7, Some(1), Some(&h)), vec![1, 0, 6, 3, 2, 4, 5]);
}

#[test]
fn promote_moves_or_inserts() {
    let b = Board::new(4, 7).unwrap();
    let mut order = vec![3, 2, 4];
    promote(&mut order, 4, &b);
    assert_eq!(order, vec![4, 3, 2]);
    promote(&mut order, 6, &b);
    assert_eq!(order, vec![6, 4, 3, 2]);
}
