//! Benchmark harness.
//!
//! Solves every instance with every configured algorithm several times
//! under a per-solve time limit, and summarizes time and value as mean and
//! sample standard deviation. [`write_table`] renders the records as a
//! comma-separated table.

mod config;
mod runner;

pub use config::BenchmarkConfig;
pub use runner::{write_table, BenchmarkRecord, BenchmarkRunner};
