//! Configuration for fitness evaluation

use revo_core::SearchConfig;
use thiserror::Error;

/// Rejected evaluator configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("worker count must be at least 1")]
    NoWorkers,
    #[error("search depths must be at least 1")]
    ZeroDepth,
    #[error("cache capacity must be a power of two >= 2, got {0}")]
    CacheCapacity(usize),
    #[error("failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// How matches are scheduled within a generation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchSchedule {
    /// Stride-doubling elimination-style rounds; O(n log n) matches,
    /// with a ranking permutation refined by winner/loser swaps
    Bracket,
    /// Every pair meets once; O(n^2) matches
    AllPairs,
}

impl Default for MatchSchedule {
    fn default() -> Self {
        MatchSchedule::Bracket
    }
}

/// Evaluator configuration
#[derive(Clone, Copy, Debug)]
pub struct EvalConfig {
    /// Search settings for every agent in every match
    pub search: SearchConfig,
    /// Match scheduling strategy
    pub schedule: MatchSchedule,
    /// Worker-pool size for parallel match play
    pub workers: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            schedule: MatchSchedule::default(),
            workers: 8,
        }
    }
}

impl EvalConfig {
    /// Set search settings
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Set the scheduling strategy
    pub fn with_schedule(mut self, schedule: MatchSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Set the worker-pool size
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Reject impossible fixed-size resources before any work starts
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        if self.search.midgame_depth == 0 || self.search.endgame_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if !self.search.cache_capacity.is_power_of_two() || self.search.cache_capacity < 2 {
            return Err(ConfigError::CacheCapacity(self.search.cache_capacity));
        }
        Ok(())
    }
}
