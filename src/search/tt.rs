use crate::search::zobrist::{fingerprint, verifier};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Clone, Copy, Debug)]
pub struct Entry {
    /// 32-bit fingerprint of the position.
    pub key: u32,
    /// Verification word; a fingerprint match with a different check is a collision.
    pub check: u32,
    pub depth: u32,
    pub score: i32,
    pub best: Option<usize>,
    pub bound: Bound,
    pub gen: u32,
}

impl Entry {
    pub fn new(hash: u64, depth: u32, score: i32, best: Option<usize>, bound: Bound) -> Self {
        Self { key: fingerprint(hash), check: verifier(hash), depth, score, best, bound, gen: 0 }
    }
}

const DEFAULT_WAYS: usize = 4;
pub const DEFAULT_ENTRIES: usize = 1 << 18;

#[derive(Default, Clone, Copy)]
struct Bucket {
    slots: [Option<Entry>; DEFAULT_WAYS],
}

/// Bounded, bucketed transposition table. The search is single-threaded so
/// buckets are plain values.
#[derive(Default)]
pub struct Tt {
    buckets: Vec<Bucket>,
    gen: u32,
}

impl Tt {
    pub fn new() -> Self { Self { buckets: Vec::new(), gen: 0 } }

    pub fn with_capacity_entries(cap: usize) -> Self {
        let mut t = Self::new();
        t.set_capacity_entries(cap);
        t
    }

    pub fn clear(&mut self) {
        for b in &mut self.buckets { *b = Bucket::default(); }
        self.gen = 0;
    }

    fn bucket_index(&self, key: u32) -> usize {
        let mixed = key ^ (key >> 16);
        (mixed as usize) % self.buckets.len().max(1)
    }

    pub fn get(&self, hash: u64) -> Option<Entry> {
        if self.buckets.is_empty() { return None; }
        let (key, check) = (fingerprint(hash), verifier(hash));
        let b = &self.buckets[self.bucket_index(key)];
        b.slots.iter().flatten().find(|e| e.key == key && e.check == check).copied()
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(|b| b.slots.iter().flatten().count()).sum()
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn capacity(&self) -> usize { self.buckets.len() * DEFAULT_WAYS }

    pub fn set_capacity_entries(&mut self, cap: usize) {
        let entries = cap.max(DEFAULT_WAYS);
        let buckets = (entries + DEFAULT_WAYS - 1) / DEFAULT_WAYS;
        self.buckets.clear();
        self.buckets.resize(buckets, Bucket::default());
    }

    pub fn set_capacity_mb(&mut self, mb: usize) {
        let per_entry = std::mem::size_of::<Option<Entry>>().max(1);
        let entries = (mb.saturating_mul(1024 * 1024) / per_entry).max(DEFAULT_WAYS);
        self.set_capacity_entries(entries);
    }

    pub fn put(&mut self, e: Entry) {
        if self.buckets.is_empty() { return; }
        let idx = self.bucket_index(e.key);
        let gen = self.gen;
        let bucket = &mut self.buckets[idx];
        let e = Entry { gen, ..e };
        // Same position: keep the deeper result
        for slot in bucket.slots.iter_mut() {
            if let Some(cur) = *slot {
                if cur.key == e.key && cur.check == e.check {
                    if e.depth >= cur.depth { *slot = Some(e); }
                    return;
                }
            }
        }
        if let Some(slot) = bucket.slots.iter_mut().find(|s| s.is_none()) {
            *slot = Some(e);
            return;
        }
        // Evict the shallowest entry, oldest first among equals
        let mut victim = 0usize;
        let mut best_key = (u32::MAX, u32::MAX);
        for (i, slot) in bucket.slots.iter().enumerate() {
            if let Some(cur) = slot {
                let key = (cur.depth, cur.gen);
                if key < best_key { best_key = key; victim = i; }
            }
        }
        bucket.slots[victim] = Some(e);
    }

    pub fn bump_generation(&mut self) { self.gen = self.gen.wrapping_add(1); }
}
