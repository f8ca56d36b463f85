//! Solver facade.
//!
//! One entry point for the three exact solvers:
//!
//! - [`Algorithm`]: which solver to run, parseable from its name
//! - [`KnapsackSolver`]: the trait the solvers implement
//! - [`SolveConfig`]: timeout, worker stack size and per-solver settings
//! - [`SolverRunner`]: validation, timing and the timeout boundary
//! - [`SolveResult`]: normalized value, selection, elapsed time, `completed`
//!
//! The free functions [`solve_dp`], [`solve_backtracking`],
//! [`solve_branch_and_bound`] and [`solve_with_timeout`] take capacities
//! and an item slice directly.

mod config;
mod runner;
mod types;

#[cfg(test)]
mod properties;

pub use config::SolveConfig;
pub use runner::{
    solve_backtracking, solve_branch_and_bound, solve_dp, solve_with_timeout, SolverRunner,
};
pub use types::{Algorithm, KnapsackSolver, SearchStats, Solution, SolveResult};
