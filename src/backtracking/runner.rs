//! Exhaustive backtracking search.

use crate::cancel::CancelToken;
use crate::error::KnapsackError;
use crate::instance::{Instance, Selection};
use crate::search::{self, Exhaustive};

/// Result of a backtracking solve.
#[derive(Debug, Clone)]
pub struct BacktrackingResult {
    /// Best total value.
    pub best_value: u64,

    /// First optimal selection in include-first traversal order.
    pub selection: Selection,

    /// Search nodes visited, leaves included.
    pub nodes: u64,

    /// Complete assignments evaluated.
    pub leaves: u64,
}

/// Enumerates every feasible include/exclude assignment.
///
/// Worst case `O(2^n)` nodes. This is the unpruned baseline the other
/// solvers are measured against.
pub struct BacktrackingSolver;

impl BacktrackingSolver {
    /// Solves the instance.
    pub fn run(instance: &Instance) -> Result<BacktrackingResult, KnapsackError> {
        Self::run_with_cancel(instance, None)
    }

    /// Solves the instance with an optional cancellation token.
    pub fn run_with_cancel(
        instance: &Instance,
        cancel: Option<CancelToken>,
    ) -> Result<BacktrackingResult, KnapsackError> {
        instance.validate()?;

        if instance.has_zero_capacity() {
            return Ok(BacktrackingResult {
                best_value: 0,
                selection: vec![false; instance.num_items()],
                nodes: 0,
                leaves: 0,
            });
        }

        let outcome = search::depth_first(
            &instance.items,
            instance.capacity_weight,
            instance.capacity_volume,
            &Exhaustive,
            None,
            &cancel,
        )?;

        Ok(BacktrackingResult {
            best_value: outcome.best_value,
            selection: outcome.selection,
            nodes: outcome.nodes,
            leaves: outcome.leaves,
        })
    }
}
