//! Schedule quality metrics (KPIs).
//!
//! Computes the indicators reported for one completed schedule.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | Elapsed ticks until the last task completes |
//! | Total idle | Agent-ticks without assignment (working ticks only) |
//! | Average idle | Total idle / agent count |
//! | Category idle | Idle agent-ticks per agent of the category |
//! | Utilization | 1 − average idle / makespan |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::env::ScheduleEnv;
use crate::models::{IdleReport, TaskId};

/// Schedule performance indicators.
///
/// All time values are in ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleKpi {
    /// Elapsed ticks.
    pub makespan: u64,
    /// Idle accounting.
    pub idle: IdleReport,
    /// Team utilization (0.0..1.0).
    pub utilization: f64,
    /// Per-agent utilization.
    pub utilization_by_agent: BTreeMap<usize, f64>,
    /// Tasks in the order they were assigned.
    pub history: Vec<TaskId>,
}

impl ScheduleKpi {
    /// Computes KPIs from the state of a (normally finished) environment.
    pub fn calculate(env: &ScheduleEnv) -> Self {
        let makespan = env.clock();
        let idle = env.idle_report();

        let ratio = |idle_ticks: f64| {
            if makespan == 0 {
                0.0
            } else {
                1.0 - idle_ticks / makespan as f64
            }
        };

        let utilization = ratio(idle.average_idle);
        let utilization_by_agent = idle
            .per_agent
            .iter()
            .map(|(&id, &ticks)| (id, ratio(ticks as f64)))
            .collect();

        Self {
            makespan,
            utilization,
            utilization_by_agent,
            history: env.history().to_vec(),
            idle,
        }
    }

    /// Whether the schedule meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_makespan: u64, min_utilization: f64) -> bool {
        self.makespan <= max_makespan && self.utilization >= min_utilization
    }
}
