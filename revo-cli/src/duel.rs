//! Duel command - pit two weight vectors against each other
//!
//! Plays the same seat-swapped two-game match the tournament uses and
//! prints both outcomes plus the net score.

use anyhow::{Context, Result};
use clap::Args;

use revo_core::{SearchConfig, Side, Weights};
use revo_tournament::{play_game, GameOutcome};

#[derive(Args)]
pub struct DuelArgs {
    /// First contestant as four comma-separated bytes
    /// (material,stability,mobility,disc-diff)
    #[arg(long, value_name = "WEIGHTS")]
    pub first: String,

    /// Second contestant in the same format
    #[arg(long, value_name = "WEIGHTS")]
    pub second: String,

    /// Search depth through the opening and midgame
    #[arg(long, default_value = "6")]
    pub depth: u32,

    /// Search depth once the endgame threshold is passed
    #[arg(long, default_value = "8")]
    pub endgame_depth: u32,
}

/// Run the duel
pub fn run(args: DuelArgs) -> Result<()> {
    let first = parse_weights(&args.first).context("invalid --first weights")?;
    let second = parse_weights(&args.second).context("invalid --second weights")?;

    let search = SearchConfig {
        midgame_depth: args.depth,
        endgame_depth: args.endgame_depth,
        ..SearchConfig::default()
    };

    tracing::info!(
        "Duel: {:?} vs {:?} (depth {}/{})",
        first.to_bytes(),
        second.to_bytes(),
        args.depth,
        args.endgame_depth
    );

    let opening = play_game(&first, &second, &search);
    let rematch = play_game(&second, &first, &search);

    print_game(1, &opening, "first", "second");
    print_game(2, &rematch, "second", "first");

    let net = opening.value_for(Side::Black) + rematch.value_for(Side::White);
    match net {
        n if n > 0 => println!("Net: first contestant wins the match ({n:+})"),
        n if n < 0 => println!("Net: second contestant wins the match ({n:+})"),
        _ => println!("Net: drawn match"),
    }

    Ok(())
}

/// Parse "a,b,c,d" into a weight vector
fn parse_weights(spec: &str) -> Result<Weights> {
    let parts: Vec<&str> = spec.split(',').collect();
    anyhow::ensure!(
        parts.len() == 4,
        "expected four comma-separated bytes, got {}",
        parts.len()
    );

    let mut bytes = [0u8; 4];
    for (slot, part) in bytes.iter_mut().zip(&parts) {
        *slot = part
            .trim()
            .parse()
            .with_context(|| format!("weight '{}' is not a byte", part.trim()))?;
    }
    Ok(Weights::from_bytes(bytes))
}

/// One line per game, discs from black's side of the table
fn print_game(number: u32, outcome: &GameOutcome, black_name: &str, white_name: &str) {
    let verdict = match outcome.winner {
        Some(Side::Black) => format!("{black_name} wins"),
        Some(Side::White) => format!("{white_name} wins"),
        None => "draw".to_string(),
    };
    println!(
        "Game {number}: {black_name} (black) {}-{} {white_name} (white), {verdict} in {} plies",
        outcome.black_discs, outcome.white_discs, outcome.plies
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weights_round_trip() {
        let weights = parse_weights("2,253,98,16").unwrap();
        assert_eq!(weights.to_bytes(), [2, 253, 98, 16]);
    }

    #[test]
    fn test_parse_weights_tolerates_spaces() {
        let weights = parse_weights(" 2, 253 ,98,16 ").unwrap();
        assert_eq!(weights.to_bytes(), [2, 253, 98, 16]);
    }

    #[test]
    fn test_parse_weights_rejects_wrong_arity() {
        assert!(parse_weights("1,2,3").is_err());
        assert!(parse_weights("1,2,3,4,5").is_err());
    }

    #[test]
    fn test_parse_weights_rejects_out_of_range() {
        assert!(parse_weights("1,2,3,300").is_err());
        assert!(parse_weights("1,2,3,x").is_err());
    }
}
