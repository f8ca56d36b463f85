//! Algorithm choice, solver trait and normalized results.

use super::config::SolveConfig;
use crate::backtracking::BacktrackingSolver;
use crate::bnb::BnbSolver;
use crate::cancel::CancelToken;
use crate::dp::DpSolver;
use crate::error::KnapsackError;
use crate::instance::{Instance, Selection};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// The exact algorithms behind the facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Dynamic programming over the `(j, w, v)` value table.
    Dp,
    /// Exhaustive include/exclude search, feasibility pruning only.
    Backtracking,
    /// Include/exclude search with fractional bound pruning.
    BranchAndBound,
}

impl Algorithm {
    /// All algorithms, in benchmark order.
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Dp,
        Algorithm::Backtracking,
        Algorithm::BranchAndBound,
    ];

    /// Stable lowercase name, also accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Dp => "dp",
            Algorithm::Backtracking => "backtracking",
            Algorithm::BranchAndBound => "branch_and_bound",
        }
    }

    /// The solver implementing this algorithm.
    pub fn solver(self) -> &'static dyn KnapsackSolver {
        match self {
            Algorithm::Dp => &DpSolver,
            Algorithm::Backtracking => &BacktrackingSolver,
            Algorithm::BranchAndBound => &BnbSolver,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = KnapsackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "dp" | "dynamic" | "dynamic_programming" => Ok(Algorithm::Dp),
            "bt" | "backtracking" => Ok(Algorithm::Backtracking),
            "bnb" | "b&b" | "branch_and_bound" => Ok(Algorithm::BranchAndBound),
            _ => Err(KnapsackError::InvalidConfig(format!("unknown algorithm '{s}'"))),
        }
    }
}

/// Search effort counters. Fields a solver does not track stay at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Tree nodes visited.
    pub nodes: u64,
    /// Complete assignments evaluated.
    pub leaves: u64,
    /// Nodes cut by the bound.
    pub pruned: u64,
    /// DP table cells allocated.
    pub cells: usize,
    /// Bound at the root (branch-and-bound only).
    pub root_bound: Option<u64>,
}

/// Value, selection and counters produced by one [`KnapsackSolver::solve`].
#[derive(Debug, Clone)]
pub struct Solution {
    pub best_value: u64,
    pub selection: Selection,
    pub stats: SearchStats,
}

/// Uniform interface over the exact solvers.
///
/// Implementors own all search state for the duration of one call; nothing
/// is kept between calls, so one solver value can serve any number of
/// concurrent solves.
pub trait KnapsackSolver: Send + Sync {
    /// Which algorithm this is.
    fn algorithm(&self) -> Algorithm;

    /// Solves `instance`, stopping with [`KnapsackError::Cancelled`] once
    /// `cancel` is raised.
    fn solve(
        &self,
        instance: &Instance,
        config: &SolveConfig,
        cancel: Option<CancelToken>,
    ) -> Result<Solution, KnapsackError>;
}

impl KnapsackSolver for DpSolver {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Dp
    }

    fn solve(
        &self,
        instance: &Instance,
        config: &SolveConfig,
        cancel: Option<CancelToken>,
    ) -> Result<Solution, KnapsackError> {
        let result = DpSolver::run_with_cancel(instance, &config.dp, cancel)?;
        Ok(Solution {
            best_value: result.best_value,
            selection: result.selection,
            stats: SearchStats {
                cells: result.cells,
                ..SearchStats::default()
            },
        })
    }
}

impl KnapsackSolver for BacktrackingSolver {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Backtracking
    }

    fn solve(
        &self,
        instance: &Instance,
        _config: &SolveConfig,
        cancel: Option<CancelToken>,
    ) -> Result<Solution, KnapsackError> {
        let result = BacktrackingSolver::run_with_cancel(instance, cancel)?;
        Ok(Solution {
            best_value: result.best_value,
            selection: result.selection,
            stats: SearchStats {
                nodes: result.nodes,
                leaves: result.leaves,
                ..SearchStats::default()
            },
        })
    }
}

impl KnapsackSolver for BnbSolver {
    fn algorithm(&self) -> Algorithm {
        Algorithm::BranchAndBound
    }

    fn solve(
        &self,
        instance: &Instance,
        config: &SolveConfig,
        cancel: Option<CancelToken>,
    ) -> Result<Solution, KnapsackError> {
        let result = BnbSolver::run_with_cancel(instance, &config.bnb, cancel)?;
        Ok(Solution {
            best_value: result.best_value,
            selection: result.selection,
            stats: SearchStats {
                nodes: result.nodes,
                leaves: result.leaves,
                pruned: result.pruned,
                root_bound: Some(result.root_bound),
                ..SearchStats::default()
            },
        })
    }
}

/// Normalized outcome of a facade call.
///
/// When `completed` is `false` the time limit expired: `best_value` is 0 and
/// `selection` is empty, and neither carries any meaning. Check `completed`
/// before trusting a zero value.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveResult {
    pub algorithm: Algorithm,
    pub best_value: u64,
    pub selection: Selection,
    /// Wall-clock time of the solve, or the time waited before giving up.
    pub elapsed: Duration,
    pub completed: bool,
    pub stats: SearchStats,
}

impl SolveResult {
    pub(crate) fn completed(algorithm: Algorithm, solution: Solution, elapsed: Duration) -> Self {
        Self {
            algorithm,
            best_value: solution.best_value,
            selection: solution.selection,
            elapsed,
            completed: true,
            stats: solution.stats,
        }
    }

    pub(crate) fn timed_out(algorithm: Algorithm, elapsed: Duration) -> Self {
        Self {
            algorithm,
            best_value: 0,
            selection: Vec::new(),
            elapsed,
            completed: false,
            stats: SearchStats::default(),
        }
    }
}
