//! Monte Carlo Tree Search.
//!
//! Generic over any [`Environment`](crate::env::Environment). Priors are
//! uniform and rollouts pick actions uniformly at random; there is no
//! learned policy or value model.
//!
//! # Selection
//!
//! `score = Q + c·P·sqrt(N_parent) / (1 + N)`
//!
//! # Reference
//! Silver et al. (2017), "Mastering the game of Go without human knowledge"
//! (PUCT selection); Browne et al. (2012), "A Survey of Monte Carlo Tree
//! Search Methods"

mod config;
mod node;
mod search;
mod tree;

pub use config::{MctsConfig, DEFAULT_ROLLOUT_LIMIT};
pub use node::{Node, NodeId};
pub use search::Mcts;
pub use tree::Tree;
