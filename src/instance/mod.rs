//! Problem instances.
//!
//! An [`Instance`] holds the two capacities (weight `W`, volume `V`) and the
//! ordered list of [`Item`]s. Instances are created once, from code, from an
//! instance file ([`Instance::load`]) or from the random
//! [`InstanceGenerator`], and are never mutated by the solvers.

mod generator;
mod io;
mod types;

pub use generator::{GeneratorConfig, InstanceGenerator};
pub use types::{Instance, Item, Selection};
