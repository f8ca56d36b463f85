//! Dynamic programming solver.
//!
//! Builds the value table `T[j][w][v]` (best value from the first `j`
//! items within budgets `w`, `v`) with the recurrence
//!
//! ```text
//! T[j][w][v] = T[j-1][w][v]                                   if item j does not fit
//!            = max(T[j-1][w][v], value_j + T[j-1][w-w_j][v-v_j])  otherwise
//! ```
//!
//! and recovers the selection by walking the layers backwards. Pseudo-polynomial:
//! `O(n * W * V)` time and memory, independent of how the items interact.
//!
//! # References
//!
//! - Kellerer, Pferschy & Pisinger (2004), *Knapsack Problems*, ch. 9
//!   (multidimensional knapsack)

mod config;
mod runner;

pub use config::DpConfig;
pub use runner::{DpResult, DpSolver};
