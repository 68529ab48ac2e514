//! Aggregation over simulation results.

pub mod aggregator;

pub use aggregator::*;
