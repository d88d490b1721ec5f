//! Transposition cache for search results
//!
//! A fixed-capacity, direct-mapped table. The bucket index is the low
//! bits of the position hash XORed with the active-player bit, so the
//! index space is far smaller than the state space and collisions are
//! routine. Every entry therefore carries a snapshot of both occupancy
//! masks, and a hit is trusted only after the snapshot matches the
//! query position exactly; a mismatch downgrades to a no-prune result.
//! Writes overwrite their bucket unconditionally; there is no
//! chaining and no replacement policy.

use crate::board::Board;

/// Classification of a stored score
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    /// Score is the exact value of the position at the stored depth
    Exact,
    /// Score is a lower bound (the search failed high)
    Lower,
    /// Score is an upper bound (no move raised alpha)
    Upper,
}

/// One cached search result
#[derive(Clone, Copy, Debug)]
struct CacheEntry {
    black: u64,
    white: u64,
    bound: Bound,
    best: Option<u8>,
    score: i32,
    depth: u32,
}

/// Outcome of probing the cache
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Probe {
    /// The stored result settles this node within the given window
    Cutoff { best: Option<u8>, score: i32 },
    /// No usable score; `hint` is the stored move, if any, offered for
    /// ordering only; callers must validate it against the legal set
    Miss { hint: Option<u8> },
}

/// Direct-mapped transposition table
pub struct TranspositionTable {
    buckets: Vec<Option<CacheEntry>>,
    mask: u64,
}

impl TranspositionTable {
    /// Create a table with `capacity` buckets.
    ///
    /// Capacity must be a power of two and at least 2 (the player bit
    /// needs the lowest index bit); violating that is a configuration
    /// programming error.
    pub fn new(capacity: usize) -> Self {
        assert!(
            capacity.is_power_of_two() && capacity >= 2,
            "cache capacity must be a power of two >= 2, got {capacity}"
        );
        Self {
            buckets: vec![None; capacity],
            mask: capacity as u64 - 1,
        }
    }

    /// Number of buckets
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Drop every entry; call between search sessions that must not
    /// see each other's results
    pub fn clear(&mut self) {
        self.buckets.fill(None);
    }

    fn index(&self, board: &Board) -> usize {
        ((board.hash() & self.mask) ^ board.to_move() as u64) as usize
    }

    /// Record a search result for `board`, overwriting the bucket
    pub fn insert(
        &mut self,
        board: &Board,
        bound: Bound,
        best: Option<u8>,
        score: i32,
        depth: u32,
    ) {
        let index = self.index(board);
        self.buckets[index] = Some(CacheEntry {
            black: board.black(),
            white: board.white(),
            bound,
            best,
            score,
            depth,
        });
    }

    /// Look up `board` against an (alpha, beta) window at `depth`.
    ///
    /// Returns `Miss` when the bucket is empty, holds a different
    /// position, or was recorded at a shallower depth. Otherwise an
    /// Exact bound settles the node outright; an Upper bound prunes
    /// when `alpha >= stored` (returning alpha) and a Lower bound when
    /// `beta <= stored` (returning beta).
    pub fn probe(&self, board: &Board, alpha: i32, beta: i32, depth: u32) -> Probe {
        let Some(entry) = self.buckets[self.index(board)] else {
            return Probe::Miss { hint: None };
        };

        if entry.black != board.black() || entry.white != board.white() || entry.depth < depth {
            return Probe::Miss { hint: entry.best };
        }

        match entry.bound {
            Bound::Exact => Probe::Cutoff {
                best: entry.best,
                score: entry.score,
            },
            Bound::Upper if alpha >= entry.score => Probe::Cutoff {
                best: entry.best,
                score: alpha,
            },
            Bound::Lower if beta <= entry.score => Probe::Cutoff {
                best: entry.best,
                score: beta,
            },
            _ => Probe::Miss { hint: entry.best },
        }
    }
}
