//! Branch-and-bound configuration.

/// Configuration for the branch-and-bound solver.
///
/// # Examples
///
/// ```
/// use u_knapsack::bnb::BnbConfig;
///
/// let config = BnbConfig::default().with_greedy_warm_start(true);
/// assert!(config.greedy_warm_start);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BnbConfig {
    /// Seed the incumbent with the greedy whole-item solution in density
    /// order, so pruning is active from the first node.
    ///
    /// Off by default: the search then starts from value 0 and returns the
    /// first optimum in traversal order.
    pub greedy_warm_start: bool,
}

impl BnbConfig {
    pub fn with_greedy_warm_start(mut self, enabled: bool) -> Self {
        self.greedy_warm_start = enabled;
        self
    }
}
