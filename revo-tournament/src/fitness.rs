//! Fitness evaluation over a chromosome population
//!
//! Matches are scheduled in elimination-style rounds: the stride
//! doubles each round (2, 4, 8, ... up to the population size) and a
//! ranking permutation decides which indices meet. A loser's slot is
//! swapped below its winner's, so later rounds pit progressively
//! better-sorted contestants against each other while the total match
//! count stays at n-1 per generation.
//!
//! Rounds are fork-join: pair outcomes are computed on the bounded
//! worker pool with no shared mutable state, then folded into the
//! fitness and ranking arrays after the barrier; round k's ranking
//! is round k+1's input, so the join is load-bearing.

use rayon::prelude::*;
use revo_core::Weights;

use crate::config::{ConfigError, EvalConfig, MatchSchedule};
use crate::match_play::pair_score;

/// Parallel self-play fitness evaluator.
///
/// Owns its worker pool; build once and reuse across generations.
pub struct TournamentEvaluator {
    config: EvalConfig,
    pool: rayon::ThreadPool,
}

impl TournamentEvaluator {
    /// Validate the configuration and build the worker pool
    pub fn new(config: EvalConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .build()?;
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Fitness accumulator per chromosome, index-aligned with the
    /// population.
    ///
    /// Bracket scheduling requires a power-of-two population of at
    /// least 2; callers validate population sizing up front, so a bad
    /// size here is a programming error.
    pub fn evaluate(&self, population: &[Weights]) -> Vec<i32> {
        let n = population.len();
        assert!(n >= 2, "population must hold at least two chromosomes");

        let mut fitness = vec![0i32; n];
        match self.config.schedule {
            MatchSchedule::Bracket => self.run_bracket(population, &mut fitness),
            MatchSchedule::AllPairs => self.run_all_pairs(population, &mut fitness),
        }
        fitness
    }

    /// Stride-doubling rounds over a mutable ranking permutation
    fn run_bracket(&self, population: &[Weights], fitness: &mut [i32]) {
        let n = population.len();
        assert!(
            n.is_power_of_two(),
            "bracket scheduling requires a power-of-two population, got {n}"
        );

        let mut ranking: Vec<usize> = (0..n).collect();
        let mut stride = 2;
        while stride <= n {
            let pairs = round_pairs(n, stride);

            let scores: Vec<i32> = {
                let ranking: &[usize] = &ranking;
                self.pool.install(|| {
                    pairs
                        .par_iter()
                        .map(|&(a, b)| {
                            pair_score(
                                &population[ranking[a]],
                                &population[ranking[b]],
                                &self.config.search,
                            )
                        })
                        .collect()
                })
            };

            // Barrier passed: fold the round into the shared arrays
            for (&(a, b), &score) in pairs.iter().zip(&scores) {
                fitness[ranking[a]] += score;
                fitness[ranking[b]] -= score;
                if score < 0 {
                    ranking.swap(a, b);
                }
            }

            stride *= 2;
        }
    }

    /// Every pair meets once; no ranking refinement
    fn run_all_pairs(&self, population: &[Weights], fitness: &mut [i32]) {
        let n = population.len();
        let pairs: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .collect();

        let scores: Vec<i32> = self.pool.install(|| {
            pairs
                .par_iter()
                .map(|&(i, j)| pair_score(&population[i], &population[j], &self.config.search))
                .collect()
        });

        for (&(i, j), &score) in pairs.iter().zip(&scores) {
            fitness[i] += score;
            fitness[j] -= score;
        }
    }
}

/// Ranking slots compared in one round: each pair is `stride` apart
/// in blocks of `stride`
fn round_pairs(n: usize, stride: usize) -> Vec<(usize, usize)> {
    (0..n).step_by(stride).map(|i| (i, i + stride / 2)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use revo_core::SearchConfig;

    fn quick_evaluator(schedule: MatchSchedule) -> TournamentEvaluator {
        let config = EvalConfig::default()
            .with_search(SearchConfig {
                midgame_depth: 1,
                endgame_depth: 1,
                endgame_start: 45,
                cache_capacity: 1 << 8,
            })
            .with_schedule(schedule)
            .with_workers(2);
        TournamentEvaluator::new(config).unwrap()
    }

    fn sample_population(n: usize) -> Vec<Weights> {
        (0..n)
            .map(|i| Weights::new(2 + i as u8, 255 - i as u8, 98, 16))
            .collect()
    }

    #[test]
    fn test_round_pairs_cover_n_minus_one_matches() {
        let n = 8;
        let mut total = 0;
        let mut stride = 2;
        while stride <= n {
            let pairs = round_pairs(n, stride);
            assert_eq!(pairs.len(), n / stride);
            total += pairs.len();
            stride *= 2;
        }
        assert_eq!(total, n - 1);
    }

    #[test]
    fn test_round_pairs_slots_are_disjoint() {
        for stride in [2, 4, 8] {
            let pairs = round_pairs(8, stride);
            let mut seen = std::collections::HashSet::new();
            for (a, b) in pairs {
                assert!(seen.insert(a));
                assert!(seen.insert(b));
            }
        }
    }

    #[test]
    fn test_bracket_fitness_is_zero_sum() {
        let evaluator = quick_evaluator(MatchSchedule::Bracket);
        let population = sample_population(4);
        let fitness = evaluator.evaluate(&population);

        assert_eq!(fitness.len(), 4);
        assert_eq!(fitness.iter().sum::<i32>(), 0);
    }

    #[test]
    fn test_all_pairs_fitness_is_zero_sum() {
        let evaluator = quick_evaluator(MatchSchedule::AllPairs);
        let population = sample_population(4);
        let fitness = evaluator.evaluate(&population);

        assert_eq!(fitness.iter().sum::<i32>(), 0);
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let evaluator = quick_evaluator(MatchSchedule::Bracket);
        let population = sample_population(4);

        assert_eq!(
            evaluator.evaluate(&population),
            evaluator.evaluate(&population)
        );
    }

    #[test]
    #[should_panic(expected = "power-of-two population")]
    fn test_bracket_rejects_odd_population() {
        let evaluator = quick_evaluator(MatchSchedule::Bracket);
        let population = sample_population(6);
        evaluator.evaluate(&population);
    }
}
