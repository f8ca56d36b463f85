//! DP configuration.

use crate::error::KnapsackError;

/// Configuration for the dynamic programming solver.
///
/// # Examples
///
/// ```
/// use u_knapsack::dp::DpConfig;
///
/// let config = DpConfig::default().with_max_cells(1 << 20);
/// assert_eq!(config.max_cells, 1 << 20);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DpConfig {
    /// Largest table, in `u64` cells, the solver may allocate.
    ///
    /// A table of `(n + 1) * (W + 1) * (V + 1)` cells above this limit is
    /// refused with [`KnapsackError::OutOfMemory`] before allocation.
    pub max_cells: usize,
}

impl Default for DpConfig {
    fn default() -> Self {
        Self {
            // 1 GiB of u64 cells
            max_cells: 1 << 27,
        }
    }
}

impl DpConfig {
    pub fn with_max_cells(mut self, cells: usize) -> Self {
        self.max_cells = cells;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), KnapsackError> {
        if self.max_cells == 0 {
            return Err(KnapsackError::InvalidConfig(
                "max_cells must be positive".into(),
            ));
        }
        Ok(())
    }
}
