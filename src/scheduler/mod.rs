//! Schedule planning and KPI evaluation.
//!
//! `Planner` builds one complete schedule by asking the MCTS engine for every
//! decision. `ScheduleKpi` summarizes the result: makespan, idle accounting,
//! utilization and the assignment order.
//!
//! The outer driver that repeats plans and aggregates statistics is left to
//! callers.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 1
//! - Browne et al. (2012), "A Survey of Monte Carlo Tree Search Methods"

mod kpi;
mod planner;

pub use kpi::ScheduleKpi;
pub use planner::Planner;
