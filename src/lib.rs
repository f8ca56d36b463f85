//! Exact solvers for the two-constraint 0-1 knapsack problem.
//!
//! Every item has a weight, a volume and a value. A selection is feasible
//! when its total weight and total volume stay within the two capacities;
//! the solvers return a feasible selection of maximum total value.
//!
//! - **Dynamic programming (DP)**: fills the `(item, weight, volume)` value
//!   table and traces the selection back. Pseudo-polynomial in both
//!   capacities, with an admission limit on table size.
//! - **Backtracking**: exhaustive depth-first enumeration of every
//!   feasible subset.
//! - **Branch-and-bound (B&B)**: the same depth-first search over items
//!   sorted by density, pruned by a fractional surrogate bound.
//!
//! The [`solver`] facade runs any of them with an optional time limit and
//! reports whether the run completed. [`instance`] reads, writes and
//! generates instances, and [`benchmark`] times the solvers over a suite.
//!
//! # Example
//!
//! ```
//! use u_knapsack::{Algorithm, Instance, SolveConfig, SolverRunner};
//!
//! let instance = Instance::from_tuples(10, 10, &[(5, 5, 40), (4, 4, 30), (6, 3, 50)]);
//! let result = SolverRunner::solve(Algorithm::Dp, &instance, &SolveConfig::default()).unwrap();
//! assert!(result.completed);
//! assert_eq!(result.best_value, 80);
//! assert_eq!(result.selection, vec![false, true, true]);
//! ```

pub mod backtracking;
pub mod benchmark;
pub mod bnb;
mod cancel;
pub mod dp;
pub mod error;
pub mod instance;
mod search;
pub mod solver;

pub use cancel::CancelToken;
pub use error::KnapsackError;
pub use instance::{Instance, Item, Selection};
pub use solver::{
    solve_backtracking, solve_branch_and_bound, solve_dp, solve_with_timeout, Algorithm,
    SolveConfig, SolveResult, SolverRunner,
};
