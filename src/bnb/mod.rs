//! Branch-and-bound solver.
//!
//! The same include-first tree as [`backtracking`](crate::backtracking),
//! with two changes:
//!
//! - items are visited in descending density `value / (weight / W + volume / V)`,
//!   and the selection is mapped back to input order before returning;
//! - every node computes a fractional upper bound and is abandoned when the
//!   bound does not exceed the best value found so far.
//!
//! # Bound
//!
//! Greedy filling with per-dimension fit checks is not an upper bound once
//! two budgets interact. The bound used here relaxes the two budgets into
//! their normalized sum (a surrogate constraint) and solves the LP
//! relaxation of that single-budget knapsack: whole items in density order,
//! then one fractional item.
//!
//! # References
//!
//! - Martello & Toth (1990), *Knapsack Problems: Algorithms and Computer
//!   Implementations*, ch. 2
//! - Glover (1968), "Surrogate Constraints", *Operations Research* 16(4)

mod bound;
mod config;
mod runner;

pub use config::BnbConfig;
pub use runner::{root_bound, BnbResult, BnbSolver};
