//! Random instance generation.

use super::types::{Instance, Item};
use crate::error::KnapsackError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::{Path, PathBuf};

/// Parameters for random instance generation.
///
/// Weights are drawn from `1..=max(2, W / 2)`, volumes from
/// `1..=max(2, V / 2)` and values from `value_min..=value_max`.
///
/// # Examples
///
/// ```
/// use u_knapsack::instance::GeneratorConfig;
///
/// let config = GeneratorConfig::new(20, 50, 100)
///     .with_value_range(1, 10)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratorConfig {
    /// Number of items per instance.
    pub num_items: usize,
    /// Weight budget `W`.
    pub capacity_weight: u64,
    /// Volume budget `V`.
    pub capacity_volume: u64,
    /// Smallest item value (inclusive).
    pub value_min: u64,
    /// Largest item value (inclusive).
    pub value_max: u64,
    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new(20, 50, 100)
    }
}

impl GeneratorConfig {
    pub fn new(num_items: usize, capacity_weight: u64, capacity_volume: u64) -> Self {
        Self {
            num_items,
            capacity_weight,
            capacity_volume,
            value_min: 10,
            value_max: 100,
            seed: None,
        }
    }

    pub fn with_num_items(mut self, n: usize) -> Self {
        self.num_items = n;
        self
    }

    pub fn with_capacities(mut self, capacity_weight: u64, capacity_volume: u64) -> Self {
        self.capacity_weight = capacity_weight;
        self.capacity_volume = capacity_volume;
        self
    }

    pub fn with_value_range(mut self, min: u64, max: u64) -> Self {
        self.value_min = min;
        self.value_max = max;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), KnapsackError> {
        if self.value_min > self.value_max {
            return Err(KnapsackError::InvalidConfig(format!(
                "value_min ({}) must not exceed value_max ({})",
                self.value_min, self.value_max
            )));
        }
        Ok(())
    }

    /// Directory name used by [`InstanceGenerator::generate_suite`].
    pub fn suite_name(&self) -> String {
        format!(
            "n{}_W{}_V{}",
            self.num_items, self.capacity_weight, self.capacity_volume
        )
    }
}

/// Draws random instances from a [`GeneratorConfig`].
pub struct InstanceGenerator;

impl InstanceGenerator {
    /// Generates one instance.
    pub fn generate(config: &GeneratorConfig) -> Result<Instance, KnapsackError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Ok(Self::draw(config, &mut rng))
    }

    /// Generates `count` instances and writes them as
    /// `dir/<suite_name>/instance_<i>.txt` (1-based), creating directories
    /// as needed. Returns the written paths.
    ///
    /// With a seed the whole suite is reproducible; instance `i` does not
    /// share its random stream with any other.
    pub fn generate_suite(
        config: &GeneratorConfig,
        count: usize,
        dir: impl AsRef<Path>,
    ) -> Result<Vec<PathBuf>, KnapsackError> {
        config.validate()?;
        let suite_dir = dir.as_ref().join(config.suite_name());
        fs::create_dir_all(&suite_dir)?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let mut paths = Vec::with_capacity(count);
        for i in 1..=count {
            let instance = Self::draw(config, &mut rng);
            let path = suite_dir.join(format!("instance_{i}.txt"));
            instance.save(&path)?;
            paths.push(path);
        }
        log::info!(
            "generated {count} instances in {}",
            suite_dir.display()
        );
        Ok(paths)
    }

    fn draw<R: Rng>(config: &GeneratorConfig, rng: &mut R) -> Instance {
        let max_weight = (config.capacity_weight / 2).max(2);
        let max_volume = (config.capacity_volume / 2).max(2);
        let items = (0..config.num_items)
            .map(|_| {
                Item::new(
                    rng.random_range(1..=max_weight),
                    rng.random_range(1..=max_volume),
                    rng.random_range(config.value_min..=config.value_max),
                )
            })
            .collect();
        Instance::new(config.capacity_weight, config.capacity_volume, items)
    }
}
