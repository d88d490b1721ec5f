//! Bitboard position and move machinery
//!
//! The board is a pair of 64-bit occupancy masks, one per side, with
//! square 0 at the top-left corner and square 63 at the bottom-right,
//! row-major. Legal-move generation and disc flipping work on whole
//! masks via directional shifts, never per-square scans.

use crate::eval::positional_table;
use crate::zobrist;

/// Board width in squares
pub const BOARD_WIDTH: u8 = 8;

/// Total number of squares
pub const BOARD_SQUARES: u8 = 64;

/// Last ply of the early game; the positional table switches after this
pub const EARLY_PLY_LIMIT: u16 = 25;

/// Mask of squares with a west neighbor (everything but the a-file)
const NOT_FILE_A: u64 = 0xfefe_fefe_fefe_fefe;

/// Mask of squares with an east neighbor (everything but the h-file)
const NOT_FILE_H: u64 = 0x7f7f_7f7f_7f7f_7f7f;

fn north(x: u64) -> u64 {
    x >> 8
}
fn south(x: u64) -> u64 {
    x << 8
}
fn west(x: u64) -> u64 {
    (x & NOT_FILE_A) >> 1
}
fn east(x: u64) -> u64 {
    (x & NOT_FILE_H) << 1
}
fn northwest(x: u64) -> u64 {
    north(west(x))
}
fn northeast(x: u64) -> u64 {
    north(east(x))
}
fn southwest(x: u64) -> u64 {
    south(west(x))
}
fn southeast(x: u64) -> u64 {
    south(east(x))
}

/// Whole-board shift per compass direction
const SHIFTS: [fn(u64) -> u64; 8] = [
    north, south, west, east, northwest, northeast, southwest, southeast,
];

/// Convert (row, col) to a square index
pub const fn square(row: u8, col: u8) -> u8 {
    row * BOARD_WIDTH + col
}

/// Iterator over the set squares of a bitmask, lowest index first
pub struct Squares(u64);

impl Iterator for Squares {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.0 == 0 {
            return None;
        }
        let sq = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Some(sq)
    }
}

/// Iterate the set squares of a bitmask
pub fn squares(mask: u64) -> Squares {
    Squares(mask)
}

/// Disc color; black moves first
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Black = 0,
    White = 1,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }
}

/// Game position
///
/// Carries three incrementally maintained values alongside the masks:
/// the phase-weighted positional accumulator (always from the mover's
/// perspective), the Zobrist hash, and the consecutive-pass counter.
/// The accumulator and hash must equal values recomputed from scratch
/// after every mutation; `apply_move` rescores the accumulator when a
/// move crosses the phase-table boundary to keep that law intact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    discs: [u64; 2],
    to_move: Side,
    positional: i32,
    passes: u8,
    ply: u16,
    hash: u64,
}

impl Board {
    /// Starting position: black on d5/e4, white on d4/e5, black to move
    pub fn new() -> Self {
        let black = (1u64 << square(3, 4)) | (1u64 << square(4, 3));
        let white = (1u64 << square(3, 3)) | (1u64 << square(4, 4));

        let mut hash = 0u64;
        for sq in squares(black) {
            hash ^= zobrist::key(sq, Side::Black);
        }
        for sq in squares(white) {
            hash ^= zobrist::key(sq, Side::White);
        }

        let mut board = Self {
            discs: [black, white],
            to_move: Side::Black,
            positional: 0,
            passes: 0,
            ply: 0,
            hash,
        };
        board.rescore();
        board
    }

    /// Occupancy mask for one side
    pub fn discs(&self, side: Side) -> u64 {
        self.discs[side as usize]
    }

    /// Black's occupancy mask
    pub fn black(&self) -> u64 {
        self.discs[Side::Black as usize]
    }

    /// White's occupancy mask
    pub fn white(&self) -> u64 {
        self.discs[Side::White as usize]
    }

    /// Mask of empty squares
    pub fn empties(&self) -> u64 {
        !(self.black() | self.white())
    }

    /// Side to move
    pub fn to_move(&self) -> Side {
        self.to_move
    }

    /// Number of moves applied so far (passes excluded)
    pub fn ply(&self) -> u16 {
        self.ply
    }

    /// Incremental Zobrist hash of the disc configuration
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Phase-weighted positional accumulator, mover-relative
    pub fn positional_score(&self) -> i32 {
        self.positional
    }

    /// Disc count for one side
    pub fn disc_count(&self, side: Side) -> u32 {
        self.discs(side).count_ones()
    }

    /// Bitmask of legal moves for the side to move
    ///
    /// A square is legal when some direction holds a contiguous run of
    /// opponent discs between it and a mover disc. Computed by flooding
    /// mover discs through opponent discs in each direction; five
    /// extension steps cover the longest possible interior run.
    pub fn legal_moves(&self) -> u64 {
        let my = self.discs[self.to_move as usize];
        let opp = self.discs[self.to_move.opponent() as usize];
        let empty = self.empties();

        let mut moves = 0u64;
        for shift in SHIFTS {
            let mut run = shift(my) & opp;
            for _ in 0..5 {
                run |= shift(run) & opp;
            }
            moves |= shift(run) & empty;
        }
        moves
    }

    /// Place a disc for the side to move and flip every bracketed run.
    ///
    /// The square must be empty and reachable; violating that is a
    /// programming error and fails an assertion. Updates the positional
    /// accumulator and hash incrementally, resets the pass counter, and
    /// hands the move to the opponent.
    pub fn apply_move(&mut self, sq: u8) {
        let bit = 1u64 << sq;
        assert!(self.legal_moves() & bit != 0, "illegal move on square {sq}");

        let mover = self.to_move;
        let opp = mover.opponent();
        let next_ply = self.ply + 1;
        let table = positional_table(next_ply);

        self.discs[mover as usize] |= bit;
        self.hash ^= zobrist::key(sq, mover);
        self.positional += table[sq as usize];

        for shift in SHIFTS {
            let mut run = shift(bit);
            let mut span = 0u64;
            while run & self.discs[opp as usize] != 0 {
                span |= run;
                run = shift(run);
            }
            if span != 0 && run & self.discs[mover as usize] != 0 {
                self.discs[mover as usize] ^= span;
                self.discs[opp as usize] ^= span;
                for flipped in squares(span) {
                    // each flip moves one disc across the differential
                    self.positional += 2 * table[flipped as usize];
                    self.hash ^= zobrist::key(flipped, opp);
                    self.hash ^= zobrist::key(flipped, mover);
                }
            }
        }

        self.passes = 0;
        self.ply = next_ply;
        if self.ply == EARLY_PLY_LIMIT + 1 {
            // crossing into the late phase invalidates the early-table sums
            self.rescore();
        }
        self.switch_side();
    }

    /// Forfeit the turn; only valid when no legal move exists
    pub fn pass(&mut self) {
        assert!(self.legal_moves() == 0, "pass with legal moves available");
        self.passes += 1;
        self.switch_side();
    }

    /// True after two consecutive passes or a full board
    pub fn is_terminal(&self) -> bool {
        self.passes >= 2 || self.empties() == 0
    }

    fn switch_side(&mut self) {
        self.to_move = self.to_move.opponent();
        self.positional = -self.positional;
    }

    /// Recompute the positional accumulator from the full board
    fn rescore(&mut self) {
        let table = positional_table(self.ply);
        let mut total = 0i32;
        for sq in squares(self.discs[self.to_move as usize]) {
            total += table[sq as usize];
        }
        for sq in squares(self.discs[self.to_move.opponent() as usize]) {
            total -= table[sq as usize];
        }
        self.positional = total;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
