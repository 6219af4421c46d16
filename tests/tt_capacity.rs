use squarewars::search::tt::{Bound, Entry, Tt};

#[test]
fn tt_capacity_enforced() {
    let mut tt = Tt::new();
    tt.set_capacity_entries(8);
    for i in 0..64u64 {
        tt.put(Entry::new(i, (i % 4) as u32, i as i32, None, Bound::Exact));
    }
    assert!(tt.len() <= 8, "tt size {} exceeds capacity", tt.len());
    assert_eq!(tt.capacity(), 8);
}

#[test]
fn tt_depth_preferred_on_eviction() {
    let mut tt = Tt::new();
    tt.set_capacity_entries(4);
    tt.put(Entry::new(1, 6, 0, None, Bound::Exact));
    for k in 2..=4u64 {
        tt.put(Entry::new(k, 1, 0, None, Bound::Exact));
    }
    tt.put(Entry::new(5, 1, 0, None, Bound::Exact));
    assert!(tt.get(1).is_some(), "deep entry evicted unexpectedly");
    assert!(tt.get(5).is_some());
}

#[test]
fn cleared_table_forgets_entries() {
    let mut tt = Tt::with_capacity_entries(16);
    tt.put(Entry::new(7, 2, 11, Some(3), Bound::Lower));
    assert_eq!(tt.get(7).map(|e| (e.score, e.best, e.bound)), Some((11, Some(3), Bound::Lower)));
    tt.clear();
    assert!(tt.is_empty());
    assert!(tt.get(7).is_none());
}

#[test]
fn capacity_in_mb_is_bounded() {
    let mut tt = Tt::new();
    tt.set_capacity_mb(1);
    let cap = tt.capacity();
    assert!(cap > 1000 && cap <= 1024 * 1024, "unexpected capacity {cap}");
}
