//! Item and instance data model.

use crate::error::KnapsackError;

/// Inclusion vector indexed by original item position.
///
/// `selection[i] == true` iff item `i` is packed.
pub type Selection = Vec<bool>;

/// A single item with its two resource demands and its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub weight: u64,
    pub volume: u64,
    pub value: u64,
}

impl Item {
    pub fn new(weight: u64, volume: u64, value: u64) -> Self {
        Self {
            weight,
            volume,
            value,
        }
    }
}

impl From<(u64, u64, u64)> for Item {
    fn from((weight, volume, value): (u64, u64, u64)) -> Self {
        Self::new(weight, volume, value)
    }
}

/// One knapsack problem: the two capacities and the ordered item list.
///
/// Instances are never mutated by the solvers. Item order matters for the
/// tree search solvers, which branch on items in this order.
///
/// # Examples
///
/// ```
/// use u_knapsack::instance::{Instance, Item};
///
/// let instance = Instance::new(10, 10, vec![Item::new(5, 5, 40), Item::new(4, 4, 30)]);
/// assert_eq!(instance.num_items(), 2);
/// assert!(instance.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance {
    /// Weight budget `W`.
    pub capacity_weight: u64,
    /// Volume budget `V`.
    pub capacity_volume: u64,
    /// Items in input order.
    pub items: Vec<Item>,
}

impl Instance {
    pub fn new(capacity_weight: u64, capacity_volume: u64, items: Vec<Item>) -> Self {
        Self {
            capacity_weight,
            capacity_volume,
            items,
        }
    }

    /// Builds an instance from `(weight, volume, value)` tuples.
    pub fn from_tuples(
        capacity_weight: u64,
        capacity_volume: u64,
        items: &[(u64, u64, u64)],
    ) -> Self {
        Self::new(
            capacity_weight,
            capacity_volume,
            items.iter().copied().map(Item::from).collect(),
        )
    }

    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    /// Whether one of the budgets is zero, in which case nothing is packed.
    pub fn has_zero_capacity(&self) -> bool {
        self.capacity_weight == 0 || self.capacity_volume == 0
    }

    /// Checks that all totals fit in `u64`, so the solvers can accumulate
    /// weights, volumes and values without overflow.
    pub fn validate(&self) -> Result<(), KnapsackError> {
        let mut weight = 0u64;
        let mut volume = 0u64;
        let mut value = 0u64;
        for (i, item) in self.items.iter().enumerate() {
            weight = weight.checked_add(item.weight).ok_or_else(|| {
                KnapsackError::InvalidInstance(format!("total weight overflows at item {i}"))
            })?;
            volume = volume.checked_add(item.volume).ok_or_else(|| {
                KnapsackError::InvalidInstance(format!("total volume overflows at item {i}"))
            })?;
            value = value.checked_add(item.value).ok_or_else(|| {
                KnapsackError::InvalidInstance(format!("total value overflows at item {i}"))
            })?;
        }
        Ok(())
    }

    /// Total weight of the selected items.
    pub fn selection_weight(&self, selection: &[bool]) -> u64 {
        self.selected(selection).map(|item| item.weight).sum()
    }

    /// Total volume of the selected items.
    pub fn selection_volume(&self, selection: &[bool]) -> u64 {
        self.selected(selection).map(|item| item.volume).sum()
    }

    /// Total value of the selected items.
    pub fn selection_value(&self, selection: &[bool]) -> u64 {
        self.selected(selection).map(|item| item.value).sum()
    }

    /// Whether `selection` has one entry per item and respects both budgets.
    pub fn is_feasible(&self, selection: &[bool]) -> bool {
        selection.len() == self.items.len()
            && self.selection_weight(selection) <= self.capacity_weight
            && self.selection_volume(selection) <= self.capacity_volume
    }

    fn selected<'a>(&'a self, selection: &'a [bool]) -> impl Iterator<Item = &'a Item> + 'a {
        self.items
            .iter()
            .zip(selection)
            .filter(|(_, &picked)| picked)
            .map(|(item, _)| item)
    }
}
