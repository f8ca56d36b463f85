//! Facade configuration.

use crate::bnb::BnbConfig;
use crate::dp::DpConfig;
use crate::error::KnapsackError;
use std::time::Duration;

/// Configuration for [`SolverRunner`](super::SolverRunner).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_knapsack::solver::SolveConfig;
///
/// let config = SolveConfig::default()
///     .with_timeout(Duration::from_secs(5))
///     .with_stack_size(8 << 20);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveConfig {
    /// Wall-clock limit. `None` runs the solver on the calling thread with
    /// no limit.
    pub timeout: Option<Duration>,

    /// Stack size of the worker thread used when a timeout is set.
    /// `None` keeps the platform default.
    pub stack_size: Option<usize>,

    /// Dynamic programming settings.
    pub dp: DpConfig,

    /// Branch-and-bound settings.
    pub bnb: BnbConfig,
}

impl SolveConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets or clears the time limit.
    pub fn with_optional_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = Some(bytes);
        self
    }

    pub fn with_dp(mut self, dp: DpConfig) -> Self {
        self.dp = dp;
        self
    }

    pub fn with_bnb(mut self, bnb: BnbConfig) -> Self {
        self.bnb = bnb;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), KnapsackError> {
        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(KnapsackError::InvalidConfig(
                "timeout must be positive".into(),
            ));
        }
        if self.stack_size == Some(0) {
            return Err(KnapsackError::InvalidConfig(
                "stack_size must be positive".into(),
            ));
        }
        self.dp.validate()
    }
}
