//! Tick-by-tick work record.
//!
//! Every simulated tick that passes while at least one agent is busy is
//! recorded as a map from task to the agent working on it. The record is
//! used only for idle and utilization accounting.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{AgentCategory, AgentPool, TaskId};

/// Work performed during one tick: task → acting agent id.
pub type TickRecord = BTreeMap<TaskId, usize>;

/// Sequence of tick records; the position is the tick number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    ticks: Vec<TickRecord>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `count` identical tick records.
    pub fn record(&mut self, entry: TickRecord, count: u32) {
        for _ in 0..count {
            self.ticks.push(entry.clone());
        }
    }

    /// Number of recorded ticks.
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Record at a given tick.
    pub fn at(&self, tick: usize) -> Option<&TickRecord> {
        self.ticks.get(tick)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TickRecord> {
        self.ticks.iter()
    }

    /// Counts idle agent-ticks over the recorded ticks.
    ///
    /// Ticks during which nobody worked are not counted.
    pub fn idle_report(&self, pool: &AgentPool) -> IdleReport {
        let agent_count = pool.len();
        let humanoids = pool.count(AgentCategory::Humanoid);
        let robots = pool.count(AgentCategory::Robot);

        let mut per_agent: BTreeMap<usize, u64> = pool.iter().map(|a| (a.id(), 0)).collect();
        let mut total = 0u64;
        let mut humanoid_total = 0u64;
        let mut robot_total = 0u64;

        for tick in self.ticks.iter().filter(|t| !t.is_empty()) {
            for agent in pool.iter() {
                let working = tick.values().any(|&id| id == agent.id());
                if working {
                    continue;
                }
                total += 1;
                *per_agent.entry(agent.id()).or_insert(0) += 1;
                match agent.category() {
                    AgentCategory::Humanoid => humanoid_total += 1,
                    AgentCategory::Robot => robot_total += 1,
                }
            }
        }

        let average = |idle: u64, count: usize| {
            if count == 0 {
                None
            } else {
                Some(idle as f64 / count as f64)
            }
        };

        IdleReport {
            total,
            average_idle: average(total, agent_count).unwrap_or(0.0),
            humanoid_total,
            robot_total,
            humanoid_average: average(humanoid_total, humanoids),
            robot_average: average(robot_total, robots),
            per_agent,
        }
    }
}

/// Idle-time totals for a schedule.
///
/// Averages are idle ticks per agent; a category with no agents has no
/// average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdleReport {
    /// Idle agent-ticks over the whole team.
    pub total: u64,
    /// `total / agent_count`.
    pub average_idle: f64,
    pub humanoid_total: u64,
    pub robot_total: u64,
    pub humanoid_average: Option<f64>,
    pub robot_average: Option<f64>,
    /// Idle ticks per agent id.
    pub per_agent: BTreeMap<usize, u64>,
}
