//! REVO Core - Reversi engine and AI
//!
//! This crate provides the core game logic for REVO:
//! - Bitboard position with incremental scoring and hashing
//! - Legal-move generation via directional mask shifts
//! - Weighted position evaluation driven by an evolvable weight vector
//! - Transposition-cached negamax alpha-beta search

pub mod ai;
pub mod board;
pub mod cache;
pub mod eval;
mod zobrist;

// Re-exports for convenient access
pub use ai::{SearchAgent, SearchConfig};
pub use board::{square, squares, Board, Side, Squares, BOARD_SQUARES, EARLY_PLY_LIMIT};
pub use cache::{Bound, Probe, TranspositionTable};
pub use eval::{evaluate, positional_table, Weights, SCORE_INF};
