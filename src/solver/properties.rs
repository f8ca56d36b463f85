//! Property tests across the three solvers.

use super::*;
use crate::bnb::{root_bound, BnbConfig};
use crate::instance::Instance;
use proptest::prelude::*;

fn arb_instance() -> impl Strategy<Value = Instance> {
    (
        0u64..=30,
        0u64..=30,
        prop::collection::vec((0u64..=15, 0u64..=15, 0u64..=50), 0..=12),
    )
        .prop_map(|(w, v, items)| Instance::from_tuples(w, v, &items))
}

/// Optimal value by enumerating every subset.
fn brute_force(instance: &Instance) -> u64 {
    if instance.has_zero_capacity() {
        return 0;
    }
    let n = instance.num_items();
    (0u32..1 << n)
        .map(|mask| (0..n).map(|i| mask & (1 << i) != 0).collect::<Vec<_>>())
        .filter(|selection| instance.is_feasible(selection))
        .map(|selection| instance.selection_value(&selection))
        .max()
        .unwrap_or(0)
}

fn run_all(instance: &Instance) -> Vec<Solution> {
    let warm = SolveConfig::default().with_bnb(BnbConfig::default().with_greedy_warm_start(true));
    let mut solutions: Vec<Solution> = Algorithm::ALL
        .iter()
        .map(|a| a.solver().solve(instance, &SolveConfig::default(), None).unwrap())
        .collect();
    solutions.push(
        Algorithm::BranchAndBound
            .solver()
            .solve(instance, &warm, None)
            .unwrap(),
    );
    solutions
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn test_solvers_agree_with_brute_force(instance in arb_instance()) {
        let expected = brute_force(&instance);
        for solution in run_all(&instance) {
            prop_assert_eq!(solution.best_value, expected);
        }
    }

    #[test]
    fn test_selections_are_feasible_and_consistent(instance in arb_instance()) {
        for solution in run_all(&instance) {
            prop_assert!(instance.is_feasible(&solution.selection));
            prop_assert_eq!(instance.selection_value(&solution.selection), solution.best_value);
        }
    }

    #[test]
    fn test_raising_a_value_never_lowers_the_optimum(
        instance in arb_instance(),
        pick in any::<prop::sample::Index>(),
        delta in 1u64..=20,
    ) {
        prop_assume!(instance.num_items() > 0);
        let before = solve_dp(instance.capacity_weight, instance.capacity_volume, &instance.items)
            .unwrap()
            .0;

        let mut items = instance.items.clone();
        let idx = pick.index(items.len());
        items[idx].value += delta;
        let after_dp = solve_dp(instance.capacity_weight, instance.capacity_volume, &items).unwrap().0;
        let after_bnb =
            solve_branch_and_bound(instance.capacity_weight, instance.capacity_volume, &items)
                .unwrap()
                .0;

        prop_assert!(after_dp >= before);
        prop_assert_eq!(after_bnb, after_dp);
    }

    #[test]
    fn test_root_bound_is_admissible(instance in arb_instance()) {
        let optimum = solve_dp(instance.capacity_weight, instance.capacity_volume, &instance.items)
            .unwrap()
            .0;
        prop_assert!(root_bound(&instance) >= optimum);
    }

    #[test]
    fn test_zero_capacity_packs_nothing(
        instance in arb_instance(),
        zero_weight in any::<bool>(),
    ) {
        let instance = if zero_weight {
            Instance::new(0, instance.capacity_volume, instance.items)
        } else {
            Instance::new(instance.capacity_weight, 0, instance.items)
        };
        for solution in run_all(&instance) {
            prop_assert_eq!(solution.best_value, 0);
            prop_assert!(solution.selection.iter().all(|&picked| !picked));
        }
    }

    #[test]
    fn test_large_values_agree(
        base in (1u64 << 53)..(1u64 << 56),
        deltas in prop::collection::vec(0u64..=8, 1..=6),
    ) {
        // Every item alone fills the knapsack, so the optimum is the largest value.
        let items: Vec<(u64, u64, u64)> = deltas.iter().map(|&d| (1, 1, base + d)).collect();
        let instance = Instance::from_tuples(1, 1, &items);
        let expected = base + deltas.iter().copied().max().unwrap_or(0);
        for solution in run_all(&instance) {
            prop_assert_eq!(solution.best_value, expected);
        }
    }

    #[test]
    fn test_exact_fit_single_item_is_taken(w in 1u64..=50, v in 1u64..=50, value in 1u64..=100) {
        let instance = Instance::from_tuples(w, v, &[(w, v, value)]);
        for solution in run_all(&instance) {
            prop_assert_eq!(solution.best_value, value);
            prop_assert_eq!(solution.selection.clone(), vec![true]);
        }
    }
}

#[test]
fn test_empty_instance_yields_zero() {
    for solution in run_all(&Instance::new(10, 10, vec![])) {
        assert_eq!(solution.best_value, 0);
        assert!(solution.selection.is_empty());
    }
}

#[test]
fn test_backtracking_and_bnb_share_tie_break() {
    // Equal densities keep input order in branch-and-bound, so both tree
    // solvers reach the same first optimum.
    let instance = Instance::from_tuples(2, 2, &[(1, 1, 3), (1, 1, 3), (1, 1, 3)]);
    let bt = solve_backtracking(2, 2, &instance.items).unwrap();
    let bnb = solve_branch_and_bound(2, 2, &instance.items).unwrap();
    assert_eq!(bt, (6, vec![true, true, false]));
    assert_eq!(bnb, bt);
}
