//! REVO Tournament - Fitness evaluation through self-play
//!
//! This crate turns a population of evaluation-weight chromosomes
//! into fitness scores by playing them against each other:
//! - Seat-swapped two-game matches between weight vectors
//! - Bracket (stride-doubling) and all-pairs match scheduling
//! - Fork-join parallelism over a bounded worker pool

mod config;
mod fitness;
mod match_play;

pub use config::{ConfigError, EvalConfig, MatchSchedule};
pub use fitness::TournamentEvaluator;
pub use match_play::{pair_score, play_game, GameOutcome};
