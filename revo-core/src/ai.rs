//! Alpha-beta search agent
//!
//! Fixed-depth negamax over [`Board`] with a transposition cache. The
//! agent owns its cache and its evaluation weights, so any number of
//! agents can search concurrently without sharing state; `reset`
//! clears the cache between games that must not see each other's
//! results.

use crate::board::{squares, Board};
use crate::cache::{Bound, Probe, TranspositionTable};
use crate::eval::{evaluate, Weights, SCORE_INF};

/// Search depths and cache sizing
#[derive(Clone, Copy, Debug)]
pub struct SearchConfig {
    /// Depth bound through the opening and midgame
    pub midgame_depth: u32,
    /// Depth bound once the endgame threshold is passed
    pub endgame_depth: u32,
    /// Ply after which the endgame depth applies
    pub endgame_start: u16,
    /// Transposition-table bucket count (power of two)
    pub cache_capacity: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            midgame_depth: 6,
            endgame_depth: 8,
            endgame_start: 45,
            cache_capacity: 1 << 16,
        }
    }
}

impl SearchConfig {
    /// Depth bound for a position at the given ply
    fn depth_for(&self, ply: u16) -> u32 {
        if ply > self.endgame_start {
            self.endgame_depth
        } else {
            self.midgame_depth
        }
    }
}

/// Negamax alpha-beta player
pub struct SearchAgent {
    weights: Weights,
    config: SearchConfig,
    cache: TranspositionTable,
}

impl SearchAgent {
    /// Create an agent with its own cache.
    ///
    /// Panics if the configured cache capacity is not a power of two;
    /// configurations are validated before agents are built, so this
    /// is a programming error rather than a recoverable condition.
    pub fn new(weights: Weights, config: SearchConfig) -> Self {
        Self {
            weights,
            config,
            cache: TranspositionTable::new(config.cache_capacity),
        }
    }

    /// Agent with default depths and cache sizing
    pub fn with_weights(weights: Weights) -> Self {
        Self::new(weights, SearchConfig::default())
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Forget all cached results
    pub fn reset(&mut self) {
        self.cache.clear();
    }

    /// Best move for the side to move, searched at the
    /// phase-appropriate depth.
    ///
    /// Callers must have confirmed `board.legal_moves()` is nonempty;
    /// a position with no legal move is the caller's cue to `pass`.
    pub fn search(&mut self, board: &Board) -> u8 {
        assert!(
            board.legal_moves() != 0,
            "search requires at least one legal move"
        );

        let depth = self.config.depth_for(board.ply());
        match self.negamax(board, depth, -SCORE_INF, SCORE_INF) {
            (Some(best), _) => best,
            // A full-width root window always raises alpha at least once
            (None, _) => unreachable!("root search produced no move"),
        }
    }

    fn negamax(&mut self, board: &Board, depth: u32, mut alpha: i32, beta: i32) -> (Option<u8>, i32) {
        if board.is_terminal() || depth == 0 {
            return (None, evaluate(board, &self.weights));
        }

        let hint = match self.cache.probe(board, alpha, beta, depth) {
            Probe::Cutoff { best, score } => return (best, score),
            Probe::Miss { hint } => hint,
        };

        let moves = board.legal_moves();
        if moves == 0 {
            // forced pass: same node from the opponent's seat
            let mut child = board.clone();
            child.pass();
            let (_, score) = self.negamax(&child, depth - 1, -beta, -alpha);
            return (None, -score);
        }

        let mut order: Vec<u8> = squares(moves).collect();
        if let Some(hint) = hint {
            // a remembered best move tightens the window fastest
            if let Some(at) = order.iter().position(|&sq| sq == hint) {
                order.swap(0, at);
            }
        }

        let mut best = None;
        let mut bound = Bound::Upper;
        for sq in order {
            let mut child = board.clone();
            child.apply_move(sq);
            let (_, child_score) = self.negamax(&child, depth - 1, -beta, -alpha);
            let score = -child_score;

            if score >= beta {
                self.cache.insert(board, Bound::Lower, Some(sq), beta, depth);
                return (Some(sq), beta);
            }
            if score > alpha {
                alpha = score;
                best = Some(sq);
                bound = Bound::Exact;
            }
        }

        self.cache.insert(board, bound, best, alpha, depth);
        (best, alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::square;

    fn shallow_agent() -> SearchAgent {
        SearchAgent::new(
            Weights::default(),
            SearchConfig {
                midgame_depth: 3,
                endgame_depth: 4,
                endgame_start: 45,
                cache_capacity: 1 << 10,
            },
        )
    }

    #[test]
    fn test_search_opening_returns_canonical_move() {
        let board = Board::new();
        let mut agent = shallow_agent();

        let best = agent.search(&board);
        let canonical = [
            square(2, 3),
            square(3, 2),
            square(4, 5),
            square(5, 4),
        ];
        assert!(
            canonical.contains(&best),
            "opening move {best} is not one of the four legal squares"
        );
    }

    #[test]
    fn test_search_returns_legal_moves_throughout_a_game() {
        let mut board = Board::new();
        let mut black = shallow_agent();
        let mut white = shallow_agent();

        while !board.is_terminal() {
            let moves = board.legal_moves();
            if moves == 0 {
                board.pass();
                continue;
            }
            let agent = match board.to_move() {
                crate::board::Side::Black => &mut black,
                crate::board::Side::White => &mut white,
            };
            let sq = agent.search(&board);
            assert!(moves & (1u64 << sq) != 0, "search returned illegal move {sq}");
            board.apply_move(sq);
        }
    }

    #[test]
    fn test_search_is_deterministic() {
        let board = Board::new();
        let mut a = shallow_agent();
        let mut b = shallow_agent();
        assert_eq!(a.search(&board), b.search(&board));
    }

    #[test]
    fn test_cached_search_repeats_result() {
        let board = Board::new();
        let mut agent = shallow_agent();

        let first = agent.search(&board);
        // second search answers from the cache; same move either way
        let second = agent.search(&board);
        assert_eq!(first, second);

        agent.reset();
        assert_eq!(agent.search(&board), first);
    }

    #[test]
    #[should_panic(expected = "at least one legal move")]
    fn test_search_rejects_stuck_positions() {
        // Exhaust a game, then ask for a move at the terminal position.
        use rand::prelude::*;
        use rand_chacha::ChaCha8Rng;
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut board = Board::new();
        while !board.is_terminal() {
            let moves = board.legal_moves();
            if moves == 0 {
                board.pass();
                continue;
            }
            let choices: Vec<u8> = squares(moves).collect();
            board.apply_move(choices[rng.gen_range(0..choices.len())]);
        }
        shallow_agent().search(&board);
    }
}
