//! Benchmark configuration.

use crate::error::KnapsackError;
use crate::solver::{Algorithm, SolveConfig};
use std::time::Duration;

/// Configuration for [`BenchmarkRunner`](super::BenchmarkRunner).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_knapsack::benchmark::BenchmarkConfig;
/// use u_knapsack::solver::Algorithm;
///
/// let config = BenchmarkConfig::default()
///     .with_repetitions(3)
///     .with_timeout(Duration::from_secs(5))
///     .with_algorithms(vec![Algorithm::Dp, Algorithm::BranchAndBound]);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BenchmarkConfig {
    /// Solves per instance and algorithm. Repetitions stop at the first
    /// run that does not complete.
    pub repetitions: usize,

    /// Algorithms to run, in order.
    pub algorithms: Vec<Algorithm>,

    /// Settings for every solve, including the per-solve time limit.
    pub solve: SolveConfig,

    /// Process instances concurrently on the rayon pool.
    ///
    /// Each solve still runs single-threaded with its own state. Ignored
    /// unless the `parallel` feature is enabled.
    pub parallel: bool,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            repetitions: 10,
            algorithms: Algorithm::ALL.to_vec(),
            solve: SolveConfig::default().with_timeout(Duration::from_secs(120)),
            parallel: false,
        }
    }
}

impl BenchmarkConfig {
    pub fn with_repetitions(mut self, n: usize) -> Self {
        self.repetitions = n;
        self
    }

    pub fn with_algorithms(mut self, algorithms: Vec<Algorithm>) -> Self {
        self.algorithms = algorithms;
        self
    }

    /// Sets the per-solve time limit.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.solve.timeout = Some(timeout);
        self
    }

    /// Runs every solve without a time limit.
    pub fn without_timeout(mut self) -> Self {
        self.solve.timeout = None;
        self
    }

    pub fn with_solve_config(mut self, solve: SolveConfig) -> Self {
        self.solve = solve;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), KnapsackError> {
        if self.repetitions == 0 {
            return Err(KnapsackError::InvalidConfig(
                "repetitions must be positive".into(),
            ));
        }
        if self.algorithms.is_empty() {
            return Err(KnapsackError::InvalidConfig(
                "at least one algorithm is required".into(),
            ));
        }
        self.solve.validate()
    }
}
