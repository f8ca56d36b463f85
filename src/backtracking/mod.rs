//! Backtracking solver.
//!
//! Depth-first enumeration of the include/exclude decision for every item,
//! in input order, pruning only assignments that break a budget. There is
//! no bound: the search is exponential by construction and serves as the
//! baseline for branch-and-bound.

mod runner;

pub use runner::{BacktrackingResult, BacktrackingSolver};
