//! Train command - run the genetic optimizer
//!
//! Wires the tournament evaluator into the evolution loop and reports
//! per-generation progress through the logging facade. Nothing is
//! written to disk; the optional JSON summary goes to stdout.

use anyhow::Result;
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use revo_core::{SearchConfig, Weights};
use revo_evolve::{
    evolve_with_callback, seed_population, EvolutionConfig, EvolutionResult, Generation,
    ParentBias,
};
use revo_tournament::{EvalConfig, MatchSchedule, TournamentEvaluator};

#[derive(Args)]
pub struct TrainArgs {
    /// Population size (power of two)
    #[arg(long, default_value = "128")]
    pub population: usize,

    /// Number of generations to run
    #[arg(long, default_value = "1000")]
    pub generations: usize,

    /// Elite chromosomes preserved verbatim each generation
    #[arg(long, default_value = "32")]
    pub chosen: usize,

    /// Fraction of offspring hit by a single-bit mutation
    #[arg(long, default_value = "1.0")]
    pub mutation_rate: f32,

    /// Bias parent sampling toward fitter chromosomes
    #[arg(long)]
    pub biased_parents: bool,

    /// Play every pair instead of bracket rounds
    #[arg(long)]
    pub all_pairs: bool,

    /// Worker-pool size for match play
    #[arg(long, default_value = "8")]
    pub workers: usize,

    /// Search depth through the opening and midgame
    #[arg(long, default_value = "6")]
    pub depth: u32,

    /// Search depth once the endgame threshold is passed
    #[arg(long, default_value = "8")]
    pub endgame_depth: u32,

    /// Output a JSON summary on stdout
    #[arg(long)]
    pub json: bool,
}

/// Run training
///
/// 1. Validate configuration and build the evaluator
/// 2. Seed the initial population
/// 3. Run the generational loop
/// 4. Report the champion
pub fn run(args: TrainArgs, seed: Option<u64>) -> Result<()> {
    let evolution = build_evolution_config(&args);
    evolution.validate()?;

    let evaluator = TournamentEvaluator::new(build_eval_config(&args))?;
    let mut rng = create_rng(seed);
    let initial = seed_population(evolution.population_size, &mut rng);

    tracing::info!(
        "Starting training: pop={}, gen={}, depth={}/{}, workers={}",
        args.population,
        args.generations,
        args.depth,
        args.endgame_depth,
        args.workers
    );

    let callback = |generation: &Generation| {
        tracing::info!(
            "Generation {}: spread={}, best={:?}, worst={:?}",
            generation.index + 1,
            generation.spread,
            generation.best.weights.to_bytes(),
            generation.worst.weights.to_bytes()
        );
    };

    let result = evolve_with_callback(
        initial,
        &evolution,
        |population| evaluator.evaluate(population),
        callback,
        &mut rng,
    );

    report(&result, &args)
}

/// Map command arguments onto the optimizer configuration
fn build_evolution_config(args: &TrainArgs) -> EvolutionConfig {
    EvolutionConfig {
        population_size: args.population,
        generations: args.generations,
        chosen: args.chosen,
        mutation_rate: args.mutation_rate,
        parent_bias: if args.biased_parents {
            ParentBias::SquareRoot
        } else {
            ParentBias::Uniform
        },
    }
}

/// Map command arguments onto the evaluator configuration
fn build_eval_config(args: &TrainArgs) -> EvalConfig {
    let search = SearchConfig {
        midgame_depth: args.depth,
        endgame_depth: args.endgame_depth,
        ..SearchConfig::default()
    };
    EvalConfig::default()
        .with_search(search)
        .with_workers(args.workers)
        .with_schedule(if args.all_pairs {
            MatchSchedule::AllPairs
        } else {
            MatchSchedule::Bracket
        })
}

/// Create RNG from seed or entropy
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Print the final summary
fn report(result: &EvolutionResult, args: &TrainArgs) -> Result<()> {
    if args.json {
        print_json_summary(result)?;
        return Ok(());
    }

    println!("\n=== Training Complete ===");
    println!("Generations: {}", result.spread_history.len());
    println!("Champion:    {:?}", result.champion().to_bytes());
    println!(
        "Final spread: {}",
        result.spread_history.last().copied().unwrap_or(0)
    );
    Ok(())
}

/// Print a machine-readable summary to stdout
fn print_json_summary(result: &EvolutionResult) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonOutput {
        champion: Weights,
        champion_fitness: i32,
        generations_run: usize,
        final_spread: i32,
    }

    let output = JsonOutput {
        champion: result.champion(),
        champion_fitness: result.fitness.last().copied().unwrap_or(0),
        generations_run: result.spread_history.len(),
        final_spread: result.spread_history.last().copied().unwrap_or(0),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_args() -> TrainArgs {
        TrainArgs {
            population: 4,
            generations: 2,
            chosen: 1,
            mutation_rate: 1.0,
            biased_parents: false,
            all_pairs: false,
            workers: 2,
            depth: 1,
            endgame_depth: 1,
            json: false,
        }
    }

    #[test]
    fn test_build_evolution_config() {
        let config = build_evolution_config(&quick_args());
        assert_eq!(config.population_size, 4);
        assert_eq!(config.chosen, 1);
        assert_eq!(config.parent_bias, ParentBias::Uniform);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_biased_parents_flag() {
        let mut args = quick_args();
        args.biased_parents = true;
        let config = build_evolution_config(&args);
        assert_eq!(config.parent_bias, ParentBias::SquareRoot);
    }

    #[test]
    fn test_build_eval_config() {
        let mut args = quick_args();
        args.all_pairs = true;
        let config = build_eval_config(&args);
        assert_eq!(config.schedule, MatchSchedule::AllPairs);
        assert_eq!(config.workers, 2);
        assert_eq!(config.search.midgame_depth, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_create_rng_is_reproducible() {
        use rand::Rng;
        let mut a = create_rng(Some(42));
        let mut b = create_rng(Some(42));
        assert_eq!(a.gen::<u64>(), b.gen::<u64>());
    }

    #[test]
    fn test_tiny_training_run() {
        let args = quick_args();
        let evolution = build_evolution_config(&args);
        let evaluator = TournamentEvaluator::new(build_eval_config(&args)).unwrap();
        let mut rng = create_rng(Some(7));
        let initial = seed_population(evolution.population_size, &mut rng);

        let result = evolve_with_callback(
            initial,
            &evolution,
            |population| evaluator.evaluate(population),
            |_| {},
            &mut rng,
        );

        assert_eq!(result.population.len(), 4);
        assert_eq!(result.spread_history.len(), 2);
    }
}
