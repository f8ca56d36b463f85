//! Facade execution and the timeout boundary.

use super::config::SolveConfig;
use super::types::{Algorithm, Solution, SolveResult};
use crate::cancel::CancelToken;
use crate::error::KnapsackError;
use crate::instance::{Instance, Item, Selection};
use log::{debug, warn};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Runs any solver behind one entry point and normalizes its output.
///
/// # Timeout
///
/// Without a timeout the solver runs on the calling thread. With one, the
/// solve runs on its own worker thread and the facade waits on a channel
/// with a deadline. When the deadline passes the facade returns a result
/// with `completed == false` right away, raises the worker's cancel token
/// and stops listening; the worker drops its search state at its next poll.
///
/// Solver errors (invalid instance, out of memory) are returned as `Err`,
/// never as a timeout, and a panic inside the worker is re-raised on the
/// caller.
///
/// # Usage
///
/// ```
/// use std::time::Duration;
/// use u_knapsack::instance::Instance;
/// use u_knapsack::solver::{Algorithm, SolveConfig, SolverRunner};
///
/// let instance = Instance::from_tuples(10, 10, &[(5, 5, 40), (4, 4, 30), (6, 3, 50)]);
/// let config = SolveConfig::default().with_timeout(Duration::from_secs(10));
/// let result = SolverRunner::solve(Algorithm::BranchAndBound, &instance, &config).unwrap();
/// assert!(result.completed);
/// assert_eq!(result.best_value, 80);
/// ```
pub struct SolverRunner;

impl SolverRunner {
    /// Solves `instance` with `algorithm`.
    ///
    /// With a timeout, the instance is cloned once so the worker can own it;
    /// use [`SolverRunner::solve_shared`] to avoid the copy.
    pub fn solve(
        algorithm: Algorithm,
        instance: &Instance,
        config: &SolveConfig,
    ) -> Result<SolveResult, KnapsackError> {
        Self::prepare(algorithm, instance, config)?;
        match config.timeout {
            None => Self::solve_inline(algorithm, instance, config),
            Some(timeout) => {
                Self::solve_on_worker(algorithm, Arc::new(instance.clone()), config, timeout)
            }
        }
    }

    /// Same as [`SolverRunner::solve`] for an instance that is already shared.
    pub fn solve_shared(
        algorithm: Algorithm,
        instance: Arc<Instance>,
        config: &SolveConfig,
    ) -> Result<SolveResult, KnapsackError> {
        Self::prepare(algorithm, &instance, config)?;
        match config.timeout {
            None => Self::solve_inline(algorithm, &instance, config),
            Some(timeout) => Self::solve_on_worker(algorithm, instance, config, timeout),
        }
    }

    /// Rejects bad input before any search work starts.
    fn prepare(
        algorithm: Algorithm,
        instance: &Instance,
        config: &SolveConfig,
    ) -> Result<(), KnapsackError> {
        config.validate()?;
        instance.validate()?;
        debug!(
            "solving n={} W={} V={} with {algorithm} (timeout {:?})",
            instance.num_items(),
            instance.capacity_weight,
            instance.capacity_volume,
            config.timeout
        );
        Ok(())
    }

    fn solve_inline(
        algorithm: Algorithm,
        instance: &Instance,
        config: &SolveConfig,
    ) -> Result<SolveResult, KnapsackError> {
        let (solution, elapsed) = timed(algorithm, instance, config, None);
        let solution = solution?;
        debug!(
            "{algorithm} finished in {elapsed:?} with value {}",
            solution.best_value
        );
        Ok(SolveResult::completed(algorithm, solution, elapsed))
    }

    fn solve_on_worker(
        algorithm: Algorithm,
        instance: Arc<Instance>,
        config: &SolveConfig,
        timeout: Duration,
    ) -> Result<SolveResult, KnapsackError> {
        let cancel: CancelToken = Arc::new(AtomicBool::new(false));
        let (tx, rx) = mpsc::channel();

        let mut builder = thread::Builder::new().name(format!("knapsack-{algorithm}"));
        if let Some(bytes) = config.stack_size {
            builder = builder.stack_size(bytes);
        }

        let worker_cancel = Arc::clone(&cancel);
        let worker_config = config.clone();
        let started = Instant::now();
        let handle = builder.spawn(move || {
            let outcome = timed(algorithm, &instance, &worker_config, Some(worker_cancel));
            // The receiver is gone once the facade has given up.
            let _ = tx.send(outcome);
        })?;

        match rx.recv_timeout(timeout) {
            Ok((solution, elapsed)) => {
                // The worker has already sent; joining only reaps the thread.
                let _ = handle.join();
                let solution = solution?;
                debug!(
                    "{algorithm} finished in {elapsed:?} with value {}",
                    solution.best_value
                );
                Ok(SolveResult::completed(algorithm, solution, elapsed))
            }
            Err(RecvTimeoutError::Timeout) => {
                cancel.store(true, Ordering::Relaxed);
                let waited = started.elapsed();
                warn!("{algorithm} timed out after {waited:?} (limit {timeout:?})");
                Ok(SolveResult::timed_out(algorithm, waited))
            }
            Err(RecvTimeoutError::Disconnected) => {
                // The sender only drops unsent when the solver panicked.
                if let Err(payload) = handle.join() {
                    panic::resume_unwind(payload);
                }
                Err(KnapsackError::Cancelled)
            }
        }
    }
}

fn timed(
    algorithm: Algorithm,
    instance: &Instance,
    config: &SolveConfig,
    cancel: Option<CancelToken>,
) -> (Result<Solution, KnapsackError>, Duration) {
    let start = Instant::now();
    let solution = algorithm.solver().solve(instance, config, cancel);
    (solution, start.elapsed())
}

/// Solves with dynamic programming. Returns the optimal value and selection.
pub fn solve_dp(
    capacity_weight: u64,
    capacity_volume: u64,
    items: &[Item],
) -> Result<(u64, Selection), KnapsackError> {
    solve_plain(Algorithm::Dp, capacity_weight, capacity_volume, items)
}

/// Solves with exhaustive backtracking. Returns the optimal value and selection.
pub fn solve_backtracking(
    capacity_weight: u64,
    capacity_volume: u64,
    items: &[Item],
) -> Result<(u64, Selection), KnapsackError> {
    solve_plain(Algorithm::Backtracking, capacity_weight, capacity_volume, items)
}

/// Solves with branch-and-bound. Returns the optimal value and selection.
pub fn solve_branch_and_bound(
    capacity_weight: u64,
    capacity_volume: u64,
    items: &[Item],
) -> Result<(u64, Selection), KnapsackError> {
    solve_plain(Algorithm::BranchAndBound, capacity_weight, capacity_volume, items)
}

/// Solves with `algorithm` under an optional wall-clock limit.
pub fn solve_with_timeout(
    algorithm: Algorithm,
    capacity_weight: u64,
    capacity_volume: u64,
    items: &[Item],
    timeout: Option<Duration>,
) -> Result<SolveResult, KnapsackError> {
    let instance = Arc::new(Instance::new(capacity_weight, capacity_volume, items.to_vec()));
    let config = SolveConfig::default().with_optional_timeout(timeout);
    SolverRunner::solve_shared(algorithm, instance, &config)
}

fn solve_plain(
    algorithm: Algorithm,
    capacity_weight: u64,
    capacity_volume: u64,
    items: &[Item],
) -> Result<(u64, Selection), KnapsackError> {
    let instance = Instance::new(capacity_weight, capacity_volume, items.to_vec());
    let solution = algorithm
        .solver()
        .solve(&instance, &SolveConfig::default(), None)?;
    Ok((solution.best_value, solution.selection))
}
