//! Ant Colony Optimization for shortest closed tours.
//!
//! Given a square matrix of positive edge costs, approximates the shortest
//! tour that leaves a start node, visits every other node exactly once and
//! returns. This is a heuristic: no optimality guarantee is made.
//!
//! - [`aco`]: distance/pheromone matrices, tour construction and the
//!   colony runner.
//! - [`geo`]: great-circle distance matrices for latitude/longitude points.
//!
//! # Architecture
//!
//! The crate only consumes a ready distance matrix. Where the coordinates
//! come from and how tours are displayed is left to callers. Randomness is
//! seeded explicitly so runs are reproducible, including when ants are
//! built in parallel (`parallel` feature, on by default).
//!
//! Progress is reported through [`tracing`] events; install a subscriber
//! to see them.

pub mod aco;
mod error;
pub mod geo;

pub use error::{AcoError, Result};
