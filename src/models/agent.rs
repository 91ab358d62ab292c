//! Agent model and agent pool.
//!
//! Agents are the team members that perform tasks. Each agent belongs to
//! a category, holds at most one task at a time, and counts down the
//! remaining duration of that task as simulated time advances.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::TaskId;

/// Agent classification.
///
/// Determines which task categories an agent may perform
/// (see [`TeamConfig`](crate::config::TeamConfig)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentCategory {
    /// Category 0: dexterous, general-purpose agents.
    Humanoid,
    /// Category 1: transport robots.
    Robot,
}

impl AgentCategory {
    /// Both categories, in category-index order.
    pub const ALL: [AgentCategory; 2] = [AgentCategory::Humanoid, AgentCategory::Robot];
}

impl fmt::Display for AgentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentCategory::Humanoid => f.write_str("humanoid"),
            AgentCategory::Robot => f.write_str("robot"),
        }
    }
}

/// A single team member.
///
/// Remaining duration is strictly positive while a task is assigned and
/// exactly zero while idle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    id: usize,
    category: AgentCategory,
    task: Option<TaskId>,
    remaining: u32,
}

impl Agent {
    /// Creates an idle agent.
    pub fn new(id: usize, category: AgentCategory) -> Self {
        Self {
            id,
            category,
            task: None,
            remaining: 0,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn category(&self) -> AgentCategory {
        self.category
    }

    /// Task currently being worked on.
    pub fn current_task(&self) -> Option<TaskId> {
        self.task
    }

    /// Ticks left on the current task (0 when idle).
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_idle(&self) -> bool {
        self.remaining == 0
    }

    /// Starts working on `task` for `duration` ticks.
    ///
    /// A zero duration leaves the agent idle.
    pub fn assign(&mut self, task: TaskId, duration: u32) {
        if duration == 0 {
            self.task = None;
            self.remaining = 0;
        } else {
            self.task = Some(task);
            self.remaining = duration;
        }
    }

    /// Works for `ticks`, clamped at zero.
    ///
    /// Returns the task that was finished by this step, if any.
    pub fn advance(&mut self, ticks: u32) -> Option<TaskId> {
        if self.is_idle() {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(ticks);
        if self.remaining == 0 {
            self.task.take()
        } else {
            None
        }
    }
}

/// Number of idle agents per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdleCounts {
    pub humanoid: usize,
    pub robot: usize,
}

impl IdleCounts {
    /// Idle count for one category.
    pub fn of(&self, category: AgentCategory) -> usize {
        match category {
            AgentCategory::Humanoid => self.humanoid,
            AgentCategory::Robot => self.robot,
        }
    }
}

/// The whole team, indexed by agent id.
///
/// Humanoids receive ids `0..humanoids`, robots the ids after them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentPool {
    agents: Vec<Agent>,
}

impl AgentPool {
    /// Builds a pool of idle agents from per-category counts.
    pub fn from_counts(humanoids: usize, robots: usize) -> Self {
        let agents = (0..humanoids)
            .map(|id| Agent::new(id, AgentCategory::Humanoid))
            .chain((humanoids..humanoids + robots).map(|id| Agent::new(id, AgentCategory::Robot)))
            .collect();
        Self { agents }
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&Agent> {
        self.agents.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    /// Number of agents in a category.
    pub fn count(&self, category: AgentCategory) -> usize {
        self.agents.iter().filter(|a| a.category == category).count()
    }

    /// Ids of idle agents of one category, ascending.
    pub fn idle_ids(&self, category: AgentCategory) -> Vec<usize> {
        self.agents
            .iter()
            .filter(|a| a.category == category && a.is_idle())
            .map(|a| a.id)
            .collect()
    }

    pub fn idle_counts(&self) -> IdleCounts {
        let mut counts = IdleCounts::default();
        for agent in self.agents.iter().filter(|a| a.is_idle()) {
            match agent.category {
                AgentCategory::Humanoid => counts.humanoid += 1,
                AgentCategory::Robot => counts.robot += 1,
            }
        }
        counts
    }

    pub fn has_busy(&self) -> bool {
        self.agents.iter().any(|a| !a.is_idle())
    }

    /// Smallest remaining duration among busy agents.
    pub fn min_busy_remaining(&self) -> Option<u32> {
        self.agents
            .iter()
            .filter(|a| !a.is_idle())
            .map(|a| a.remaining)
            .min()
    }

    /// Busy agents as `(task, agent id)` pairs.
    pub fn busy_assignments(&self) -> impl Iterator<Item = (TaskId, usize)> + '_ {
        self.agents
            .iter()
            .filter_map(|a| a.task.map(|task| (task, a.id)))
    }

    /// Assigns a task to an agent. Returns `false` for an unknown id.
    pub fn assign(&mut self, id: usize, task: TaskId, duration: u32) -> bool {
        match self.agents.get_mut(id) {
            Some(agent) => {
                agent.assign(task, duration);
                true
            }
            None => false,
        }
    }

    /// Advances every busy agent by `ticks`.
    ///
    /// Returns the tasks completed by this step in agent id order.
    pub fn advance(&mut self, ticks: u32) -> Vec<TaskId> {
        self.agents
            .iter_mut()
            .filter_map(|a| a.advance(ticks))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(s: &str) -> TaskId {
        s.parse().unwrap()
    }

    #[test]
    fn test_agent_assign_and_advance() {
        let mut agent = Agent::new(0, AgentCategory::Robot);
        assert!(agent.is_idle());

        agent.assign(task("A1"), 5);
        assert!(!agent.is_idle());
        assert_eq!(agent.current_task(), Some(task("A1")));
        assert_eq!(agent.remaining(), 5);

        assert_eq!(agent.advance(3), None);
        assert_eq!(agent.remaining(), 2);

        // Overshoot is clamped.
        assert_eq!(agent.advance(10), Some(task("A1")));
        assert_eq!(agent.remaining(), 0);
        assert!(agent.is_idle());
        assert_eq!(agent.current_task(), None);
    }

    #[test]
    fn test_advance_idle_agent_is_noop() {
        let mut agent = Agent::new(0, AgentCategory::Humanoid);
        assert_eq!(agent.advance(4), None);
        assert_eq!(agent.remaining(), 0);
    }

    #[test]
    fn test_zero_duration_keeps_agent_idle() {
        let mut agent = Agent::new(0, AgentCategory::Humanoid);
        agent.assign(task("C1"), 0);
        assert!(agent.is_idle());
        assert_eq!(agent.current_task(), None);
    }

    #[test]
    fn test_pool_ids_by_category() {
        let pool = AgentPool::from_counts(2, 3);
        assert_eq!(pool.len(), 5);
        assert_eq!(pool.count(AgentCategory::Humanoid), 2);
        assert_eq!(pool.count(AgentCategory::Robot), 3);
        assert_eq!(pool.idle_ids(AgentCategory::Humanoid), vec![0, 1]);
        assert_eq!(pool.idle_ids(AgentCategory::Robot), vec![2, 3, 4]);
    }

    #[test]
    fn test_pool_advance_completes_shortest() {
        let mut pool = AgentPool::from_counts(2, 1);
        pool.assign(0, task("C1"), 4);
        pool.assign(2, task("A1"), 5);

        assert!(pool.has_busy());
        assert_eq!(pool.min_busy_remaining(), Some(4));
        assert_eq!(
            pool.idle_counts(),
            IdleCounts {
                humanoid: 1,
                robot: 0
            }
        );

        let done = pool.advance(4);
        assert_eq!(done, vec![task("C1")]);
        assert_eq!(pool.get(2).unwrap().remaining(), 1);
        assert_eq!(pool.busy_assignments().collect::<Vec<_>>(), vec![(task("A1"), 2)]);
    }

    #[test]
    fn test_pool_assign_unknown_agent() {
        let mut pool = AgentPool::from_counts(1, 0);
        assert!(!pool.assign(7, task("A1"), 3));
    }
}
