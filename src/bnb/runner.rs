//! Branch-and-bound execution.

use super::bound::{density_order, SurrogateBound};
use super::config::BnbConfig;
use crate::cancel::CancelToken;
use crate::error::KnapsackError;
use crate::instance::{Instance, Item, Selection};
use crate::search;

/// Result of a branch-and-bound solve.
#[derive(Debug, Clone)]
pub struct BnbResult {
    /// Best total value.
    pub best_value: u64,

    /// Optimal selection, indexed by original item position.
    pub selection: Selection,

    /// Search nodes visited, leaves and pruned nodes included.
    pub nodes: u64,

    /// Complete assignments evaluated.
    pub leaves: u64,

    /// Nodes abandoned because their bound could not beat the incumbent.
    pub pruned: u64,

    /// Bound at the root node.
    pub root_bound: u64,
}

/// Depth-first search over items in density order, pruning every node whose
/// fractional surrogate bound does not exceed the incumbent.
pub struct BnbSolver;

impl BnbSolver {
    /// Solves the instance.
    pub fn run(instance: &Instance, config: &BnbConfig) -> Result<BnbResult, KnapsackError> {
        Self::run_with_cancel(instance, config, None)
    }

    /// Solves the instance with an optional cancellation token.
    pub fn run_with_cancel(
        instance: &Instance,
        config: &BnbConfig,
        cancel: Option<CancelToken>,
    ) -> Result<BnbResult, KnapsackError> {
        instance.validate()?;

        let n = instance.num_items();
        if instance.has_zero_capacity() {
            return Ok(BnbResult {
                best_value: 0,
                selection: vec![false; n],
                nodes: 0,
                leaves: 0,
                pruned: 0,
                root_bound: 0,
            });
        }

        let order = density_order(instance);
        let sorted: Vec<Item> = order.iter().map(|&i| instance.items[i]).collect();
        let bound = SurrogateBound::new(
            &sorted,
            instance.capacity_weight,
            instance.capacity_volume,
        );
        let root_bound = bound.upper_bound(0, 0, 0, 0);
        log::trace!("branch-and-bound root bound {root_bound} over {n} items");

        let incumbent = config.greedy_warm_start.then(|| bound.greedy());
        let outcome = search::depth_first(
            &sorted,
            instance.capacity_weight,
            instance.capacity_volume,
            &bound,
            incumbent,
            &cancel,
        )?;

        let mut selection = vec![false; n];
        for (pos, &original) in order.iter().enumerate() {
            selection[original] = outcome.selection[pos];
        }

        Ok(BnbResult {
            best_value: outcome.best_value,
            selection,
            nodes: outcome.nodes,
            leaves: outcome.leaves,
            pruned: outcome.pruned,
            root_bound,
        })
    }
}

/// Fractional surrogate bound at the root of the search tree.
///
/// Never below the optimal value of `instance`. Zero when a capacity is zero.
pub fn root_bound(instance: &Instance) -> u64 {
    if instance.has_zero_capacity() {
        return 0;
    }
    let sorted: Vec<Item> = density_order(instance)
        .into_iter()
        .map(|i| instance.items[i])
        .collect();
    SurrogateBound::new(&sorted, instance.capacity_weight, instance.capacity_volume)
        .upper_bound(0, 0, 0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve(instance: &Instance) -> BnbResult {
        BnbSolver::run(instance, &BnbConfig::default()).unwrap()
    }

    #[test]
    fn test_bnb_three_item_scenario() {
        let instance = Instance::from_tuples(10, 10, &[(5, 5, 40), (4, 4, 30), (6, 3, 50)]);
        let result = solve(&instance);

        assert_eq!(result.best_value, 80);
        assert_eq!(result.selection, vec![false, true, true]);
        assert!(result.root_bound >= 80);
    }

    #[test]
    fn test_bnb_two_dimensional_trap() {
        // Greedy by density with per-dimension fit checks would bound this
        // instance at 16.4 and miss {0, 2}.
        let instance = Instance::from_tuples(10, 10, &[(6, 1, 10), (5, 5, 8), (1, 6, 9)]);
        let result = solve(&instance);

        assert_eq!(result.best_value, 19);
        assert_eq!(result.selection, vec![true, false, true]);
        assert!(root_bound(&instance) >= 19);
    }

    #[test]
    fn test_bnb_values_beyond_f64_precision() {
        // 2^54 and 2^54 + 2 round to the same f64; only one item fits.
        let big = 1u64 << 54;
        let instance = Instance::from_tuples(1, 1, &[(1, 1, big), (1, 1, big + 2)]);
        let result = solve(&instance);

        assert_eq!(result.best_value, big + 2);
        assert_eq!(result.selection, vec![false, true]);
        assert_eq!(
            crate::backtracking::BacktrackingSolver::run(&instance)
                .unwrap()
                .best_value,
            result.best_value
        );
    }

    #[test]
    fn test_bnb_selection_mapped_to_input_order() {
        // Ascending density in input order; the search runs reversed.
        let instance = Instance::from_tuples(4, 4, &[(2, 2, 1), (2, 2, 2), (2, 2, 9)]);
        let result = solve(&instance);

        assert_eq!(result.best_value, 11);
        assert_eq!(result.selection, vec![false, true, true]);
    }

    #[test]
    fn test_bnb_prunes_ties() {
        let instance = Instance::from_tuples(1, 1, &[(1, 1, 5), (1, 1, 5)]);
        let result = solve(&instance);

        assert_eq!(result.best_value, 5);
        assert_eq!(result.selection, vec![true, false]);
        assert!(result.pruned > 0);
    }

    #[test]
    fn test_bnb_warm_start_same_value() {
        let instance = Instance::from_tuples(
            20,
            15,
            &[(5, 3, 12), (7, 6, 20), (3, 4, 9), (9, 2, 18), (4, 5, 11), (6, 6, 15)],
        );
        let cold = solve(&instance);
        let warm = BnbSolver::run(&instance, &BnbConfig::default().with_greedy_warm_start(true))
            .unwrap();

        assert_eq!(cold.best_value, warm.best_value);
        assert!(instance.is_feasible(&warm.selection));
        assert_eq!(instance.selection_value(&warm.selection), warm.best_value);
    }

    #[test]
    fn test_bnb_zero_capacity() {
        let instance = Instance::from_tuples(10, 0, &[(1, 0, 3)]);
        let result = solve(&instance);
        assert_eq!(result.best_value, 0);
        assert_eq!(result.selection, vec![false]);
        assert_eq!(root_bound(&instance), 0);
    }

    #[test]
    fn test_bnb_no_items() {
        let result = solve(&Instance::new(3, 3, vec![]));
        assert_eq!(result.best_value, 0);
        assert!(result.selection.is_empty());
        assert_eq!(result.root_bound, 0);
    }
}
