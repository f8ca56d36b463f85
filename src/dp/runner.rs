//! DP table construction and traceback.

use super::config::DpConfig;
use crate::cancel::{self, CancelToken};
use crate::error::KnapsackError;
use crate::instance::{Instance, Selection};

/// Result of a dynamic programming solve.
#[derive(Debug, Clone)]
pub struct DpResult {
    /// Optimal value `T[n][W][V]`.
    pub best_value: u64,

    /// Selection recovered by the traceback.
    pub selection: Selection,

    /// Number of table cells allocated (0 when no table was needed).
    pub cells: usize,
}

/// Exact solver over the value table `T[j][w][v]`: best value using the
/// first `j` items within weight budget `w` and volume budget `v`.
///
/// Runs in `O(n * W * V)` time and space. The full table is kept so the
/// selection can be traced back.
pub struct DpSolver;

impl DpSolver {
    /// Solves the instance.
    pub fn run(instance: &Instance, config: &DpConfig) -> Result<DpResult, KnapsackError> {
        Self::run_with_cancel(instance, config, None)
    }

    /// Solves the instance with an optional cancellation token, polled once
    /// per item layer.
    pub fn run_with_cancel(
        instance: &Instance,
        config: &DpConfig,
        cancel: Option<CancelToken>,
    ) -> Result<DpResult, KnapsackError> {
        config.validate()?;
        instance.validate()?;

        let n = instance.num_items();
        if n == 0 || instance.has_zero_capacity() {
            return Ok(DpResult {
                best_value: 0,
                selection: vec![false; n],
                cells: 0,
            });
        }

        let mut table = Table::allocate(instance, config)?;
        let layer = table.layer;
        let volumes = table.volumes;

        // Layer 0 is all zeros from the allocation.
        for (i, item) in instance.items.iter().enumerate() {
            let j = i + 1;
            if cancel::is_raised(&cancel) {
                return Err(KnapsackError::Cancelled);
            }

            let (done, rest) = table.cells.split_at_mut(j * layer);
            let prev = &done[(j - 1) * layer..];
            let cur = &mut rest[..layer];

            for (idx, slot) in cur.iter_mut().enumerate() {
                let w = (idx / volumes) as u64;
                let v = (idx % volumes) as u64;
                let without = prev[idx];
                *slot = if item.weight > w || item.volume > v {
                    without
                } else {
                    let rest_idx = table_index(w - item.weight, v - item.volume, volumes);
                    without.max(item.value + prev[rest_idx])
                };
            }
        }

        let selection = table.traceback(instance);
        let best_value = table.get(n, instance.capacity_weight, instance.capacity_volume);

        Ok(DpResult {
            best_value,
            selection,
            cells: table.cells.len(),
        })
    }
}

/// Flat `(n + 1) x (W + 1) x (V + 1)` table, item layer outermost.
struct Table {
    cells: Vec<u64>,
    /// Cells per item layer, `(W + 1) * (V + 1)`.
    layer: usize,
    /// Row length, `V + 1`.
    volumes: usize,
}

impl Table {
    fn allocate(instance: &Instance, config: &DpConfig) -> Result<Self, KnapsackError> {
        let dim = |capacity: u64| usize::try_from(capacity).ok()?.checked_add(1);

        let volumes = dim(instance.capacity_volume);
        let layer = dim(instance.capacity_weight)
            .zip(volumes)
            .and_then(|(w, v)| w.checked_mul(v));
        let total = layer.and_then(|l| l.checked_mul(instance.num_items() + 1));

        let (Some(volumes), Some(layer), Some(total)) = (volumes, layer, total) else {
            return Err(KnapsackError::OutOfMemory { cells: usize::MAX });
        };
        if total > config.max_cells {
            return Err(KnapsackError::OutOfMemory { cells: total });
        }

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(total)
            .map_err(|_| KnapsackError::OutOfMemory { cells: total })?;
        cells.resize(total, 0);

        Ok(Self {
            cells,
            layer,
            volumes,
        })
    }

    fn get(&self, j: usize, w: u64, v: u64) -> u64 {
        self.cells[j * self.layer + table_index(w, v, self.volumes)]
    }

    /// Walks `j = n..1`; item `j` is packed iff `T[j][w][v] != T[j-1][w][v]`.
    /// Equal layers mean the item was not needed, so ties resolve to
    /// exclusion.
    fn traceback(&self, instance: &Instance) -> Selection {
        let mut selection = vec![false; instance.num_items()];
        let mut w = instance.capacity_weight;
        let mut v = instance.capacity_volume;

        for j in (1..=instance.num_items()).rev() {
            if self.get(j, w, v) != self.get(j - 1, w, v) {
                let item = &instance.items[j - 1];
                selection[j - 1] = true;
                w -= item.weight;
                v -= item.volume;
            }
        }
        selection
    }
}

#[inline]
fn table_index(w: u64, v: u64, volumes: usize) -> usize {
    w as usize * volumes + v as usize
}
