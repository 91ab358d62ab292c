//! Precedence graph and dependency tracking.
//!
//! - [`PrecedenceGraph`]: immutable, validated task DAG.
//! - [`PrecedenceTracker`]: per-schedule done/candidate/available state.

mod graph;
mod tracker;

pub use graph::{GraphParts, PrecedenceGraph};
pub use tracker::PrecedenceTracker;
