//! Position evaluation

use serde::{Deserialize, Serialize};

use crate::board::{squares, Board, EARLY_PLY_LIMIT};

/// Saturating score bound; terminal results sit just inside it so they
/// always dominate heuristic scores yet stay within any (alpha, beta)
/// window opened at the full range.
pub const SCORE_INF: i32 = 1_000_000_000;

/// Corner squares (a1, h1, a8, h8)
const CORNERS: u64 = 0x8100_0000_0000_0081;

/// Positional weights for the opening and midgame
pub const EARLY_POSITION: [i32; 64] = [
    20, -20, 3, -15, -15, 3, -20, 20, //
    -20, -5, -10, -2, -2, -10, -5, -20, //
    3, -10, 11, 6, 6, 11, -10, 3, //
    -15, -2, 6, 1, 1, 6, -2, -15, //
    -15, -2, 6, 1, 1, 6, -2, -15, //
    3, -10, 11, 6, 6, 11, -10, 3, //
    -20, -5, -10, -2, -2, -10, -5, -20, //
    20, -20, 3, -15, -15, 3, -20, 20,
];

/// Positional weights once the endgame approaches
pub const LATE_POSITION: [i32; 64] = [
    30, -2, -15, -5, -5, -15, -2, 30, //
    -2, 7, -12, -10, -10, -12, 7, -2, //
    -15, -12, 3, -7, -7, 3, -12, -15, //
    -5, -10, -7, 5, 5, -7, -10, -5, //
    -5, -10, -7, 5, 5, -7, -10, -5, //
    -15, -12, 3, -7, -7, 3, -12, -15, //
    -2, 7, -12, -10, -10, -12, 7, -2, //
    30, -2, -15, -5, -5, -15, -2, 30,
];

/// Positional table in effect at the given ply
pub fn positional_table(ply: u16) -> &'static [i32; 64] {
    if ply <= EARLY_PLY_LIMIT {
        &EARLY_POSITION
    } else {
        &LATE_POSITION
    }
}

/// Evaluation weight vector, the unit the genetic optimizer evolves.
///
/// Four unsigned coefficients with a lossless byte view; the genetic
/// operators cut and flip the byte representation directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weights {
    /// Coefficient on the phase-weighted positional accumulator
    pub material: u8,
    /// Coefficient on corner ownership
    pub stability: u8,
    /// Coefficient on the mover's legal-move count
    pub mobility: u8,
    /// Coefficient on the raw disc differential
    pub disc_diff: u8,
}

impl Weights {
    pub const fn new(material: u8, stability: u8, mobility: u8, disc_diff: u8) -> Self {
        Self {
            material,
            stability,
            mobility,
            disc_diff,
        }
    }

    /// Byte view, field order: material, stability, mobility, disc_diff
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.material, self.stability, self.mobility, self.disc_diff]
    }

    /// Rebuild from the byte view
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }
}

impl Default for Weights {
    /// Hand-tuned weights used for plain (non-training) play
    fn default() -> Self {
        Self::new(2, 255, 98, 16)
    }
}

/// Score a position from the mover's perspective.
///
/// Terminal positions collapse to a saturating win/loss score decided
/// by the disc differential; a dead-even finish counts against the
/// mover. Otherwise the score is the weighted sum of the positional
/// accumulator, corner ownership, mobility, and disc differential.
pub fn evaluate(board: &Board, weights: &Weights) -> i32 {
    let mover = board.to_move();
    let opp = mover.opponent();
    let disc_diff = board.disc_count(mover) as i32 - board.disc_count(opp) as i32;

    if board.is_terminal() {
        return if disc_diff > 0 {
            SCORE_INF - 1
        } else {
            -(SCORE_INF - 1)
        };
    }

    let corners = (board.discs(mover) & CORNERS).count_ones() as i32
        - (board.discs(opp) & CORNERS).count_ones() as i32;
    let mobility = board.legal_moves().count_ones() as i32;

    i32::from(weights.material) * board.positional_score()
        + i32::from(weights.stability) * corners
        + i32::from(weights.mobility) * mobility
        + i32::from(weights.disc_diff) * disc_diff
}
