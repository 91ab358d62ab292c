//! Mixed-team task scheduling with Monte Carlo Tree Search.
//!
//! Assigns precedence-constrained construction tasks to a team of humanoid
//! and robot agents. A search engine explores a time-advancing scheduling
//! environment by cloning it per playout and picks, decision by decision,
//! which task the next idle agent should start.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `TaskId`, `Agent`, `AgentPool`, `Timeline`
//! - **`precedence`**: Validated task DAG and done/candidate/available tracking
//! - **`validation`**: Graph integrity checks (unknown tasks, mismatched relations, cycles)
//! - **`env`**: The `Environment` contract, `ScheduleEnv` and heterogeneous turn scheduling
//! - **`mcts`**: Arena-based MCTS generic over `Environment`
//! - **`scheduler`**: `Planner` (one full schedule) and `ScheduleKpi`
//! - **`config`**: Team, duration and search configuration (TOML)
//! - **`error`**: `ScheduleError`
//!
//! # Example
//!
//! ```
//! use u_crew::config::PlannerConfig;
//! use u_crew::precedence::PrecedenceGraph;
//! use u_crew::scheduler::Planner;
//!
//! let graph = PrecedenceGraph::from_table_str("A1, C1\nC1, D1").unwrap();
//! let mut planner = Planner::seeded(PlannerConfig::default(), 7).unwrap();
//! let kpi = planner.run(graph).unwrap();
//! assert_eq!(kpi.makespan, 5 + 4 + 8);
//! ```
//!
//! # References
//!
//! - Browne et al. (2012), "A Survey of Monte Carlo Tree Search Methods"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod config;
pub mod env;
pub mod error;
pub mod mcts;
pub mod models;
pub mod precedence;
pub mod scheduler;
pub mod validation;

pub use error::{Result, ScheduleError};
