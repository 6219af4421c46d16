use crate::board::{Board, Player, MAX_DIM};
use std::sync::OnceLock;

// Keys are laid out on a fixed MAX_DIM x MAX_DIM grid so a cell keeps its key
// regardless of board width: [red, blue, blocked] per cell.
const KINDS: usize = 3;

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

static TABLE: OnceLock<Vec<u64>> = OnceLock::new();
static SIDE_KEY: OnceLock<u64> = OnceLock::new();

fn init_table() -> &'static [u64] {
    TABLE.get_or_init(|| {
        let mut t = vec![0u64; MAX_DIM * MAX_DIM * KINDS];
        let mut seed = 0x5A0A_12E5_F00D_CAFE;
        for v in &mut t {
            seed = splitmix64(seed);
            *v = seed;
        }
        t
    })
}

#[inline]
fn slot(r: usize, c: usize, kind: usize) -> usize { (r * MAX_DIM + c) * KINDS + kind }

#[inline]
pub fn piece_key(r: usize, c: usize, player: Player) -> u64 { init_table()[slot(r, c, player.index())] }

#[inline]
pub fn block_key(r: usize, c: usize) -> u64 { init_table()[slot(r, c, 2)] }

/// Toggled on every simulated ply.
#[inline]
pub fn side_key() -> u64 { *SIDE_KEY.get_or_init(|| splitmix64(0x0123_4567_89AB_CDEF)) }

/// Full recomputation over pieces and the blocked mask, Blue to move.
pub fn compute(board: &Board) -> u64 {
    let mut key = 0u64;
    for r in 0..board.rows() {
        for c in 0..board.cols() {
            if let Some(p) = board.cell(r, c).player() { key ^= piece_key(r, c, p); }
            if board.is_blocked(r, c) { key ^= block_key(r, c); }
        }
    }
    key
}

/// 32-bit fingerprint used to index the transposition table.
#[inline]
pub fn fingerprint(hash: u64) -> u32 { hash as u32 }

/// Independent upper half, stored alongside an entry to reject fingerprint collisions.
#[inline]
pub fn verifier(hash: u64) -> u32 { (hash >> 32) as u32 }
