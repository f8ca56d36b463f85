//! Density ordering and the fractional surrogate bound.

use crate::instance::{Instance, Item, Selection};
use crate::search::NodeBound;

/// Slack on the whole-item fit test, so an item that exactly fills the
/// surrogate budget is not lost to rounding. It can only raise the bound.
const FIT_TOLERANCE: f64 = 1e-9;

/// Resource footprint of `item` as a share of the two budgets,
/// `weight / W + volume / V`.
fn surrogate_size(item: &Item, capacity_weight: u64, capacity_volume: u64) -> f64 {
    item.weight as f64 / capacity_weight as f64 + item.volume as f64 / capacity_volume as f64
}

/// Item positions sorted by descending density `value / surrogate_size`.
///
/// Zero-size items come first. The sort is stable, so equal densities keep
/// input order. Both capacities must be positive.
pub(crate) fn density_order(instance: &Instance) -> Vec<usize> {
    let density: Vec<f64> = instance
        .items
        .iter()
        .map(|item| {
            let size = surrogate_size(item, instance.capacity_weight, instance.capacity_volume);
            if size > 0.0 {
                item.value as f64 / size
            } else {
                f64::INFINITY
            }
        })
        .collect();

    let mut order: Vec<usize> = (0..instance.num_items()).collect();
    order.sort_by(|&a, &b| density[b].total_cmp(&density[a]));
    order
}

/// Fractional bound over items already sorted by [`density_order`].
///
/// The two constraints are merged into the surrogate constraint
/// `sum(w / W + v / V) <= p_rest / W + v_rest / V`, which every feasible
/// completion satisfies. Filling that single budget greedily by density,
/// with one fractional item at the end, is the LP optimum of the
/// surrogate problem and therefore never below the best completion.
pub(crate) struct SurrogateBound<'a> {
    items: &'a [Item],
    sizes: Vec<f64>,
    capacity_weight: u64,
    capacity_volume: u64,
}

impl<'a> SurrogateBound<'a> {
    pub(crate) fn new(sorted_items: &'a [Item], capacity_weight: u64, capacity_volume: u64) -> Self {
        let sizes = sorted_items
            .iter()
            .map(|item| surrogate_size(item, capacity_weight, capacity_volume))
            .collect();
        Self {
            items: sorted_items,
            sizes,
            capacity_weight,
            capacity_volume,
        }
    }

    /// Upper bound on the value reachable from the node at `depth` with
    /// the given accumulated weight, volume and value.
    ///
    /// Whole items are summed exactly. Only the fractional item goes
    /// through `f64`, rounded down with a small relative slack: the integral
    /// optimum never exceeds the floor of the LP value.
    pub(crate) fn upper_bound(&self, depth: usize, weight: u64, volume: u64, value: u64) -> u64 {
        let mut remaining = (self.capacity_weight - weight) as f64 / self.capacity_weight as f64
            + (self.capacity_volume - volume) as f64 / self.capacity_volume as f64;
        let mut bound = value;

        for (item, &size) in self.items[depth..].iter().zip(&self.sizes[depth..]) {
            if size <= remaining + FIT_TOLERANCE {
                bound += item.value;
                remaining = (remaining - size).max(0.0);
            } else {
                let fraction = (remaining / size).min(1.0);
                let item_value = item.value as f64;
                let partial = (fraction * item_value + FIT_TOLERANCE * item_value).floor() as u64;
                bound += partial.min(item.value);
                break;
            }
        }
        bound
    }

    /// Whole items taken greedily in density order while they fit both
    /// budgets. Returns the value and the selection in sorted order.
    pub(crate) fn greedy(&self) -> (u64, Selection) {
        let mut selection = vec![false; self.items.len()];
        let (mut weight, mut volume, mut value) = (0u64, 0u64, 0u64);
        for (pos, item) in self.items.iter().enumerate() {
            if weight + item.weight <= self.capacity_weight
                && volume + item.volume <= self.capacity_volume
            {
                weight += item.weight;
                volume += item.volume;
                value += item.value;
                selection[pos] = true;
            }
        }
        (value, selection)
    }
}

impl NodeBound for SurrogateBound<'_> {
    #[inline]
    fn prune(&self, depth: usize, weight: u64, volume: u64, value: u64, best_value: u64) -> bool {
        self.upper_bound(depth, weight, volume, value) <= best_value
    }
}
