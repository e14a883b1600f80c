//! Cost Estimator
//!
//! Command-line surface over the pricing engine: load a service
//! configuration, price it on every provider, and print the comparison.

pub mod config;
pub mod report;
