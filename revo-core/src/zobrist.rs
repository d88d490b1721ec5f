//! Zobrist keys for incremental position hashing
//!
//! One 64-bit key per (square, side) pair, drawn once from a
//! fixed-seed ChaCha8 stream so every board in the process hashes
//! identically. The hash of a position is the XOR of the keys of its
//! occupied squares; placing or flipping a disc toggles keys in and
//! out without rescanning the board.

use std::sync::OnceLock;

use rand::RngCore;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::board::Side;

/// Seed for the key stream; arbitrary but frozen
const KEY_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

static KEYS: OnceLock<[[u64; 2]; 64]> = OnceLock::new();

fn keys() -> &'static [[u64; 2]; 64] {
    KEYS.get_or_init(|| {
        let mut rng = ChaCha8Rng::seed_from_u64(KEY_SEED);
        let mut table = [[0u64; 2]; 64];
        for square in table.iter_mut() {
            for slot in square.iter_mut() {
                *slot = rng.next_u64();
            }
        }
        table
    })
}

/// Key for a disc of `side` on square `sq`
pub fn key(sq: u8, side: Side) -> u64 {
    keys()[sq as usize][side as usize]
}
