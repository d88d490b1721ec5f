//! REVO CLI - Command-line interface
//!
//! Commands:
//! - train: evolve evaluation weights through self-play tournaments
//! - duel: play a seat-swapped pair of games between two weight vectors

mod duel;
mod train;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "revo")]
#[command(about = "REVO evolutionary Reversi trainer")]
struct Cli {
    /// RNG seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evolve evaluation weights
    Train(train::TrainArgs),
    /// Play one seat-swapped match between two weight vectors
    Duel(duel::DuelArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => train::run(args, cli.seed),
        Commands::Duel(args) => duel::run(args),
    }
}
