//! Match play - self-play games between two weight vectors
//!
//! A match is one seat-swapped pair of games, so first-move advantage
//! cancels out of the score. Each seat gets its own [`SearchAgent`]
//! with its own transposition cache; nothing is shared between the
//! sides or across games.

use revo_core::{Board, SearchAgent, SearchConfig, Side, Weights};

/// Result of a single game
#[derive(Clone, Copy, Debug)]
pub struct GameOutcome {
    /// Winning side, or `None` on a dead-even disc count
    pub winner: Option<Side>,
    /// Black's final disc count
    pub black_discs: u32,
    /// White's final disc count
    pub white_discs: u32,
    /// Moves played (passes excluded)
    pub plies: u16,
}

impl GameOutcome {
    /// Match points for the player seated on `seat`
    pub fn value_for(&self, seat: Side) -> i32 {
        match self.winner {
            Some(winner) if winner == seat => 1,
            Some(_) => -1,
            None => 0,
        }
    }
}

/// Play one game to completion.
///
/// `black` moves first. Each side searches with its own weights and
/// its own cache; turns alternate with a forced pass whenever the
/// mover has no legal square.
pub fn play_game(black: &Weights, white: &Weights, search: &SearchConfig) -> GameOutcome {
    let mut board = Board::new();
    let mut black_agent = SearchAgent::new(*black, *search);
    let mut white_agent = SearchAgent::new(*white, *search);

    while !board.is_terminal() {
        if board.legal_moves() == 0 {
            board.pass();
            continue;
        }
        let agent = match board.to_move() {
            Side::Black => &mut black_agent,
            Side::White => &mut white_agent,
        };
        let sq = agent.search(&board);
        board.apply_move(sq);
    }

    let black_discs = board.disc_count(Side::Black);
    let white_discs = board.disc_count(Side::White);
    let winner = match black_discs.cmp(&white_discs) {
        std::cmp::Ordering::Greater => Some(Side::Black),
        std::cmp::Ordering::Less => Some(Side::White),
        std::cmp::Ordering::Equal => None,
    };

    GameOutcome {
        winner,
        black_discs,
        white_discs,
        plies: board.ply(),
    }
}

/// Net match score between two contestants over a seat-swapped pair
/// of games, from the first contestant's perspective: +1 per win, -1
/// per loss. The caller applies the net with opposite signs to the
/// two fitness accumulators.
pub fn pair_score(first: &Weights, second: &Weights, search: &SearchConfig) -> i32 {
    let opening = play_game(first, second, search);
    let rematch = play_game(second, first, search);
    opening.value_for(Side::Black) + rematch.value_for(Side::White)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_search() -> SearchConfig {
        SearchConfig {
            midgame_depth: 2,
            endgame_depth: 2,
            endgame_start: 45,
            cache_capacity: 1 << 8,
        }
    }

    #[test]
    fn test_play_game_reaches_terminal_state() {
        let weights = Weights::default();
        let outcome = play_game(&weights, &weights, &quick_search());

        assert!(outcome.black_discs + outcome.white_discs <= 64);
        assert!(outcome.plies > 0);
    }

    #[test]
    fn test_outcome_value_per_seat() {
        let outcome = GameOutcome {
            winner: Some(Side::Black),
            black_discs: 40,
            white_discs: 24,
            plies: 60,
        };
        assert_eq!(outcome.value_for(Side::Black), 1);
        assert_eq!(outcome.value_for(Side::White), -1);

        let draw = GameOutcome {
            winner: None,
            black_discs: 32,
            white_discs: 32,
            plies: 60,
        };
        assert_eq!(draw.value_for(Side::Black), 0);
        assert_eq!(draw.value_for(Side::White), 0);
    }

    #[test]
    fn test_identical_weights_score_zero() {
        // The search is deterministic, so the seat-swapped games are
        // mirror images and the match nets out to nothing.
        let weights = Weights::default();
        assert_eq!(pair_score(&weights, &weights, &quick_search()), 0);
    }

    #[test]
    fn test_pair_score_is_antisymmetric() {
        let a = Weights::new(2, 255, 98, 16);
        let b = Weights::new(200, 3, 10, 120);
        let search = quick_search();
        assert_eq!(
            pair_score(&a, &b, &search),
            -pair_score(&b, &a, &search)
        );
    }
}
