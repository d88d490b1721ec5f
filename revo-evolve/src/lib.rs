//! REVO Evolution - Genetic optimization of evaluation weights
//!
//! This crate provides the generational loop:
//! - Chromosome operators (crossover, mutation, seeding)
//! - Parent-sampling policies over the fitness-sorted population
//! - The evaluate / select / crossover / mutate cycle
//!
//! Fitness itself is supplied by the caller as a closure (in practice
//! the tournament evaluator), keeping this crate free of any game
//! knowledge beyond the weight vector.

mod chromosome;
mod selection;

pub use chromosome::{
    crossover, crossover_at, mutate, seed_population, spawn, SEED_WEIGHTS,
};
pub use selection::{sample_parent, ParentBias};

use rand::Rng;
use revo_core::Weights;
use thiserror::Error;

/// Rejected optimizer configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("population size must be a power of two >= 2, got {0}")]
    PopulationSize(usize),
    #[error("elite count must be smaller than the population, got {chosen} of {population}")]
    EliteCount { chosen: usize, population: usize },
    #[error("mutation rate must lie in [0, 1], got {0}")]
    MutationRate(f32),
}

/// Optimizer configuration
#[derive(Clone, Copy, Debug)]
pub struct EvolutionConfig {
    /// Number of chromosomes per generation (power of two, for the
    /// bracket evaluator)
    pub population_size: usize,
    /// Number of generations to run; there is no early exit
    pub generations: usize,
    /// Fittest chromosomes carried over verbatim each generation
    pub chosen: usize,
    /// Fraction of offspring hit by a single-bit mutation
    pub mutation_rate: f32,
    /// Parent-sampling policy for crossover
    pub parent_bias: ParentBias,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 128,
            generations: 1000,
            chosen: 32,
            mutation_rate: 1.0,
            parent_bias: ParentBias::Uniform,
        }
    }
}

impl EvolutionConfig {
    /// Reject impossible sizing before any evaluation starts
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.population_size.is_power_of_two() || self.population_size < 2 {
            return Err(ConfigError::PopulationSize(self.population_size));
        }
        if self.chosen >= self.population_size {
            return Err(ConfigError::EliteCount {
                chosen: self.chosen,
                population: self.population_size,
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::MutationRate(self.mutation_rate));
        }
        Ok(())
    }
}

/// A chromosome paired with its tournament fitness
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scored {
    pub weights: Weights,
    pub fitness: i32,
}

/// Snapshot handed to the per-generation callback
#[derive(Clone, Copy, Debug)]
pub struct Generation {
    /// Zero-based generation index
    pub index: usize,
    /// Fitness spread (best minus worst), a monitoring signal only,
    /// never a termination condition
    pub spread: i32,
    /// Fittest chromosome of this generation
    pub best: Scored,
    /// Least fit chromosome of this generation
    pub worst: Scored,
}

/// Outcome of a finished run
#[derive(Clone, Debug)]
pub struct EvolutionResult {
    /// Final evaluated population, ascending by fitness (best last)
    pub population: Vec<Weights>,
    /// Fitness values aligned with `population`
    pub fitness: Vec<i32>,
    /// Per-generation fitness spread
    pub spread_history: Vec<i32>,
}

impl EvolutionResult {
    /// Fittest chromosome of the final generation
    pub fn champion(&self) -> Weights {
        self.population[self.population.len() - 1]
    }
}

/// Run the generational loop.
///
/// `evaluate` maps a population to index-aligned fitness values; the
/// callback observes each evaluated generation. The configuration
/// must have been validated; sizing violations are programming
/// errors here.
///
/// Each generation: evaluate, sort ascending by fitness, copy the top
/// `chosen` verbatim into the tail of the next population, fill the
/// rest with boundary crossovers of sampled parents, and mutate a
/// `mutation_rate` fraction of the offspring. The returned result
/// holds the last evaluated generation, not the bred successor.
pub fn evolve_with_callback<E, C, R>(
    initial: Vec<Weights>,
    config: &EvolutionConfig,
    mut evaluate: E,
    mut callback: C,
    rng: &mut R,
) -> EvolutionResult
where
    E: FnMut(&[Weights]) -> Vec<i32>,
    C: FnMut(&Generation),
    R: Rng,
{
    assert!(config.validate().is_ok(), "unvalidated evolution config");
    assert_eq!(
        initial.len(),
        config.population_size,
        "initial population does not match the configured size"
    );
    assert!(config.generations > 0, "at least one generation required");

    let mut population = initial;
    let mut spread_history = Vec::with_capacity(config.generations);

    for index in 0..config.generations {
        let fitness = evaluate(&population);
        assert_eq!(fitness.len(), population.len());

        let mut scored: Vec<Scored> = population
            .iter()
            .zip(&fitness)
            .map(|(&weights, &fitness)| Scored { weights, fitness })
            .collect();
        scored.sort_by_key(|s| s.fitness);

        let best = scored[scored.len() - 1];
        let worst = scored[0];
        let spread = best.fitness - worst.fitness;
        spread_history.push(spread);

        callback(&Generation {
            index,
            spread,
            best,
            worst,
        });

        if index + 1 == config.generations {
            return EvolutionResult {
                population: scored.iter().map(|s| s.weights).collect(),
                fitness: scored.iter().map(|s| s.fitness).collect(),
                spread_history,
            };
        }

        population = next_population(&scored, config, rng);
    }

    unreachable!("generation loop always returns on its final pass");
}

/// Run the generational loop without observing progress
pub fn evolve<E, R>(
    initial: Vec<Weights>,
    config: &EvolutionConfig,
    evaluate: E,
    rng: &mut R,
) -> EvolutionResult
where
    E: FnMut(&[Weights]) -> Vec<i32>,
    R: Rng,
{
    evolve_with_callback(initial, config, evaluate, |_| {}, rng)
}

/// Breed the next generation from a fitness-sorted population
fn next_population<R: Rng>(
    scored: &[Scored],
    config: &EvolutionConfig,
    rng: &mut R,
) -> Vec<Weights> {
    let size = config.population_size;
    let mut next = Vec::with_capacity(size);

    for _ in 0..size - config.chosen {
        let pa = scored[sample_parent(size, config.parent_bias, rng)].weights;
        let pb = scored[sample_parent(size, config.parent_bias, rng)].weights;
        let mut child = crossover(&pa, &pb, rng);
        if rng.gen::<f32>() < config.mutation_rate {
            child = mutate(&child, rng);
        }
        next.push(child);
    }

    // elitism: the fittest survive unchanged, keeping their tail slots
    for survivor in &scored[size - config.chosen..] {
        next.push(survivor.weights);
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Fitness stub: read the material byte, so fitness is a fixed,
    /// distinct function of each chromosome
    fn stub_fitness(population: &[Weights]) -> Vec<i32> {
        population.iter().map(|w| i32::from(w.material)).collect()
    }

    fn distinct_population(size: usize) -> Vec<Weights> {
        (0..size)
            .map(|i| Weights::new(10 + i as u8, 0, 0, 0))
            .collect()
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(EvolutionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_sizing() {
        let mut config = EvolutionConfig::default();
        config.population_size = 100;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PopulationSize(100))
        ));

        let mut config = EvolutionConfig::default();
        config.chosen = config.population_size;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EliteCount { .. })
        ));

        let mut config = EvolutionConfig::default();
        config.mutation_rate = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MutationRate(_))
        ));
    }

    #[test]
    fn test_elite_survive_into_next_population() {
        let config = EvolutionConfig {
            population_size: 8,
            generations: 2,
            chosen: 2,
            mutation_rate: 0.0,
            parent_bias: ParentBias::Uniform,
        };
        let initial = distinct_population(8);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let mut generations: Vec<Vec<Weights>> = Vec::new();
        let evaluate = |population: &[Weights]| {
            generations.push(population.to_vec());
            stub_fitness(population)
        };

        evolve(initial.clone(), &config, evaluate, &mut rng);

        // The second evaluation saw the bred population; its tail must
        // hold the two fittest of the first generation, byte for byte,
        // in ascending fitness order.
        assert_eq!(generations.len(), 2);
        let bred = &generations[1];
        let mut sorted = initial;
        sorted.sort_by_key(|w| i32::from(w.material));
        assert_eq!(bred[6].to_bytes(), sorted[6].to_bytes());
        assert_eq!(bred[7].to_bytes(), sorted[7].to_bytes());
    }

    #[test]
    fn test_offspring_are_boundary_splits_of_parents() {
        let config = EvolutionConfig {
            population_size: 4,
            generations: 2,
            chosen: 1,
            mutation_rate: 0.0,
            parent_bias: ParentBias::Uniform,
        };
        // Parents share bytes except the material field, so any
        // boundary split of any two parents keeps the other fields.
        let initial: Vec<Weights> = (0..4).map(|i| Weights::new(i, 7, 9, 11)).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let mut generations: Vec<Vec<Weights>> = Vec::new();
        let evaluate = |population: &[Weights]| {
            generations.push(population.to_vec());
            stub_fitness(population)
        };

        evolve(initial, &config, evaluate, &mut rng);

        for child in &generations[1][..3] {
            let bytes = child.to_bytes();
            assert_eq!(&bytes[1..], &[7, 9, 11]);
            assert!(bytes[0] < 4);
        }
    }

    #[test]
    fn test_result_is_sorted_ascending() {
        let config = EvolutionConfig {
            population_size: 8,
            generations: 3,
            chosen: 2,
            mutation_rate: 1.0,
            parent_bias: ParentBias::SquareRoot,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let initial = seed_population(8, &mut rng);

        let result = evolve(initial, &config, stub_fitness, &mut rng);

        assert_eq!(result.population.len(), 8);
        assert_eq!(result.spread_history.len(), 3);
        assert!(result.fitness.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(
            result.champion().to_bytes(),
            result.population[7].to_bytes()
        );
    }

    #[test]
    fn test_callback_sees_every_generation() {
        let config = EvolutionConfig {
            population_size: 4,
            generations: 5,
            chosen: 1,
            mutation_rate: 0.5,
            parent_bias: ParentBias::Uniform,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let initial = seed_population(4, &mut rng);

        let mut seen = Vec::new();
        evolve_with_callback(
            initial,
            &config,
            stub_fitness,
            |generation| {
                seen.push(generation.index);
                assert!(generation.best.fitness >= generation.worst.fitness);
                assert_eq!(
                    generation.spread,
                    generation.best.fitness - generation.worst.fitness
                );
            },
            &mut rng,
        );

        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    }
}
