//! Depth-first include/exclude search shared by the tree solvers.
//!
//! The recursion over items is unrolled onto an explicit frame stack, so
//! the search depth (one level per item) never grows the thread stack.

use crate::cancel::{self, CancelToken};
use crate::error::KnapsackError;
use crate::instance::{Item, Selection};

/// Node-level pruning rule plugged into [`depth_first`].
pub(crate) trait NodeBound {
    /// Whether the subtree rooted at `depth` with the given accumulated
    /// totals can be abandoned because it cannot beat `best_value`.
    fn prune(&self, depth: usize, weight: u64, volume: u64, value: u64, best_value: u64) -> bool;
}

/// Feasibility pruning only: every subtree is explored.
pub(crate) struct Exhaustive;

impl NodeBound for Exhaustive {
    #[inline]
    fn prune(&self, _: usize, _: u64, _: u64, _: u64, _: u64) -> bool {
        false
    }
}

/// Best leaf found and counters, in the order of the searched items.
#[derive(Debug, Clone)]
pub(crate) struct SearchOutcome {
    pub best_value: u64,
    pub selection: Selection,
    pub nodes: u64,
    pub leaves: u64,
    pub pruned: u64,
}

#[derive(Debug, Clone, Copy)]
enum Branch {
    Include,
    Exclude,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    depth: usize,
    weight: u64,
    volume: u64,
    value: u64,
    next: Branch,
}

impl Frame {
    fn enter(depth: usize, weight: u64, volume: u64, value: u64) -> Self {
        Self {
            depth,
            weight,
            volume,
            value,
            next: Branch::Include,
        }
    }
}

/// Explores the include/exclude tree over `items` in order.
///
/// At every node the include branch is tried first when it keeps both
/// budgets, then the exclude branch. A leaf replaces the incumbent only on
/// strict improvement, so among equal optima the first one reached wins.
/// `incumbent` seeds the best value and selection; without it the search
/// starts from the empty selection with value 0.
pub(crate) fn depth_first<B: NodeBound>(
    items: &[Item],
    capacity_weight: u64,
    capacity_volume: u64,
    bound: &B,
    incumbent: Option<(u64, Selection)>,
    cancel: &Option<CancelToken>,
) -> Result<SearchOutcome, KnapsackError> {
    let n = items.len();
    let (mut best_value, mut best) = incumbent.unwrap_or_else(|| (0, vec![false; n]));
    let mut partial = vec![false; n];
    let mut nodes = 0u64;
    let mut leaves = 0u64;
    let mut pruned = 0u64;

    let mut stack = Vec::with_capacity(n + 1);
    stack.push(Frame::enter(0, 0, 0, 0));

    while let Some(frame) = stack.last_mut() {
        match frame.next {
            Branch::Include => {
                nodes += 1;
                if cancel::should_stop(cancel, nodes) {
                    return Err(KnapsackError::Cancelled);
                }

                if frame.depth == n {
                    leaves += 1;
                    if frame.value > best_value {
                        best_value = frame.value;
                        best.copy_from_slice(&partial);
                    }
                    stack.pop();
                    continue;
                }

                if bound.prune(frame.depth, frame.weight, frame.volume, frame.value, best_value) {
                    pruned += 1;
                    stack.pop();
                    continue;
                }

                frame.next = Branch::Exclude;
                let item = &items[frame.depth];
                let weight = frame.weight + item.weight;
                let volume = frame.volume + item.volume;
                if weight <= capacity_weight && volume <= capacity_volume {
                    partial[frame.depth] = true;
                    let child = Frame::enter(frame.depth + 1, weight, volume, frame.value + item.value);
                    stack.push(child);
                }
            }
            Branch::Exclude => {
                // Nothing is left to do at this node after the exclude
                // subtree, so the child takes over the frame.
                partial[frame.depth] = false;
                *frame = Frame::enter(frame.depth + 1, frame.weight, frame.volume, frame.value);
            }
        }
    }

    Ok(SearchOutcome {
        best_value,
        selection: best,
        nodes,
        leaves,
        pruned,
    })
}
