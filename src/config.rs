//! Injected configuration.
//!
//! Task durations, agent eligibility and team composition are passed in
//! explicitly rather than read from globals. A [`PlannerConfig`] can be
//! built in code or loaded from TOML:
//!
//! ```toml
//! reuse_tree = true
//!
//! [team]
//! humanoids = 5
//! robots = 3
//! humanoid_tasks = ["C", "D", "F", "H"]
//! robot_tasks = ["A", "B", "E", "G"]
//!
//! [team.durations]
//! A = 5
//! B = 10
//!
//! [search]
//! c_puct = 10.0
//! playouts = 10
//! rollout_limit = 1000
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use tracing::info;

use crate::error::{Result, ScheduleError};
use crate::mcts::MctsConfig;
use crate::models::AgentCategory;

/// Team composition, task durations and eligibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamConfig {
    /// Number of humanoid agents.
    pub humanoids: usize,
    /// Number of robot agents.
    pub robots: usize,
    /// Task category → duration in ticks.
    pub durations: BTreeMap<char, u32>,
    /// Task categories humanoids may perform.
    pub humanoid_tasks: BTreeSet<char>,
    /// Task categories robots may perform.
    pub robot_tasks: BTreeSet<char>,
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            humanoids: 5,
            robots: 3,
            durations: default_durations(),
            humanoid_tasks: ['C', 'D', 'F', 'H'].into_iter().collect(),
            robot_tasks: ['A', 'B', 'E', 'G'].into_iter().collect(),
        }
    }
}

fn default_durations() -> BTreeMap<char, u32> {
    [
        ('A', 5),
        ('B', 10),
        ('C', 4),
        ('D', 8),
        ('E', 5),
        ('F', 20),
        ('G', 10),
        ('H', 5),
    ]
    .into_iter()
    .collect()
}

impl TeamConfig {
    /// Mixed team with the default duration and eligibility tables.
    pub fn mixed(humanoids: usize, robots: usize) -> Self {
        Self {
            humanoids,
            robots,
            ..Default::default()
        }
    }

    /// Single-category team: `agents` humanoids eligible for every
    /// configured task category.
    pub fn homogeneous(agents: usize) -> Self {
        let durations = default_durations();
        Self {
            humanoids: agents,
            robots: 0,
            humanoid_tasks: durations.keys().copied().collect(),
            robot_tasks: BTreeSet::new(),
            durations,
        }
    }

    /// Replaces the duration table.
    pub fn with_durations(mut self, durations: impl IntoIterator<Item = (char, u32)>) -> Self {
        self.durations = durations.into_iter().collect();
        self
    }

    /// Sets the task categories an agent category may perform.
    pub fn with_eligibility(
        mut self,
        category: AgentCategory,
        tasks: impl IntoIterator<Item = char>,
    ) -> Self {
        let set = tasks.into_iter().collect();
        match category {
            AgentCategory::Humanoid => self.humanoid_tasks = set,
            AgentCategory::Robot => self.robot_tasks = set,
        }
        self
    }

    /// Number of agents of a category.
    pub fn count(&self, category: AgentCategory) -> usize {
        match category {
            AgentCategory::Humanoid => self.humanoids,
            AgentCategory::Robot => self.robots,
        }
    }

    /// Task categories an agent category may perform.
    pub fn eligible_tasks(&self, category: AgentCategory) -> &BTreeSet<char> {
        match category {
            AgentCategory::Humanoid => &self.humanoid_tasks,
            AgentCategory::Robot => &self.robot_tasks,
        }
    }

    pub fn is_eligible(&self, agent: AgentCategory, task_category: char) -> bool {
        self.eligible_tasks(agent).contains(&task_category)
    }

    /// Duration of a task category.
    ///
    /// # Errors
    /// [`ScheduleError::UnknownDuration`] if the category is not configured.
    pub fn duration(&self, task_category: char) -> Result<u32> {
        self.durations
            .get(&task_category)
            .copied()
            .ok_or(ScheduleError::UnknownDuration(task_category))
    }

    /// Checks that the team can work at all.
    pub fn validate(&self) -> Result<()> {
        if self.humanoids + self.robots == 0 {
            return Err(ScheduleError::InvalidConfig(
                "team must contain at least one agent".into(),
            ));
        }
        if let Some((category, _)) = self.durations.iter().find(|&(_, &d)| d == 0) {
            return Err(ScheduleError::InvalidConfig(format!(
                "duration of task category '{category}' must be >= 1"
            )));
        }
        Ok(())
    }

    /// Checks that every task category in `categories` has a duration and
    /// at least one present agent eligible for it.
    pub fn check_coverage(&self, categories: &BTreeSet<char>) -> Result<()> {
        for &category in categories {
            self.duration(category)?;
            let covered = AgentCategory::ALL
                .iter()
                .any(|&agent| self.count(agent) > 0 && self.is_eligible(agent, category));
            if !covered {
                return Err(ScheduleError::NoEligibleAgent(category));
            }
        }
        Ok(())
    }
}

/// Complete planner configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub team: TeamConfig,
    pub search: MctsConfig,
    /// Keep the searched subtree after each real decision instead of
    /// starting every decision from a fresh root.
    pub reuse_tree: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            team: TeamConfig::default(),
            search: MctsConfig::default(),
            reuse_tree: true,
        }
    }
}

impl PlannerConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: PlannerConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        info!(
            path = %path.display(),
            humanoids = config.team.humanoids,
            robots = config.team.robots,
            playouts = config.search.playouts,
            "loaded planner config"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.team.validate()?;
        self.search.validate()
    }
}
