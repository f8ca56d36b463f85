//! Error taxonomy shared by every solver and loader.

use thiserror::Error;

/// Errors returned by the knapsack solvers, the instance loader and the
/// configuration validators.
///
/// A timeout is not an error: the facade reports it as a
/// [`SolveResult`](crate::solver::SolveResult) with `completed == false`.
#[derive(Error, Debug)]
pub enum KnapsackError {
    /// The instance is rejected before any search work starts.
    #[error("invalid instance: {0}")]
    InvalidInstance(String),

    /// The dynamic programming table cannot be allocated.
    #[error("dynamic programming table of {cells} cells exceeds available memory")]
    OutOfMemory {
        /// Requested number of table cells (saturated at `usize::MAX`).
        cells: usize,
    },

    /// A line of an instance file could not be parsed.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Reading or writing an instance file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A configuration struct failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The solver observed its cancel token and discarded its state.
    #[error("search cancelled")]
    Cancelled,
}
