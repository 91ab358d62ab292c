//! Heterogeneous turn scheduling.
//!
//! Decides which agent acts next when agents of different categories may
//! perform different task categories.
//!
//! 1. [`fit`] classifies which categories have an idle agent paired with
//!    an eligible available task.
//! 2. [`candidate_pool`] lists the idle agents of those categories.
//! 3. [`choose_actor`] draws one of them uniformly at random.
//! 4. [`actor_view`] restricts the available tasks to what the actor may do.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::TeamConfig;
use crate::models::{AgentCategory, AgentPool, IdleCounts, TaskId};

/// Which agent categories currently have an eligible idle-agent/task pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FitMarker {
    /// No pairing: time must advance.
    None,
    HumanoidOnly,
    RobotOnly,
    Both,
}

impl FitMarker {
    /// Agent categories allowed to act under this marker.
    pub fn categories(self) -> &'static [AgentCategory] {
        match self {
            FitMarker::None => &[],
            FitMarker::HumanoidOnly => &[AgentCategory::Humanoid],
            FitMarker::RobotOnly => &[AgentCategory::Robot],
            FitMarker::Both => &AgentCategory::ALL,
        }
    }

    pub fn is_none(self) -> bool {
        self == FitMarker::None
    }
}

/// Classifies the current pairing between idle agents and available tasks.
///
/// A category participates when it has at least one idle agent and at
/// least one available task falls into its eligible set.
pub fn fit(available: &[TaskId], idle: IdleCounts, team: &TeamConfig) -> FitMarker {
    let pairs = |category: AgentCategory| {
        idle.of(category) > 0
            && available
                .iter()
                .any(|t| team.is_eligible(category, t.category()))
    };

    match (pairs(AgentCategory::Humanoid), pairs(AgentCategory::Robot)) {
        (false, false) => FitMarker::None,
        (true, false) => FitMarker::HumanoidOnly,
        (false, true) => FitMarker::RobotOnly,
        (true, true) => FitMarker::Both,
    }
}

/// Idle agent ids allowed to act under `marker`, humanoids first.
pub fn candidate_pool(marker: FitMarker, pool: &AgentPool) -> Vec<usize> {
    marker
        .categories()
        .iter()
        .flat_map(|&category| pool.idle_ids(category))
        .collect()
}

/// Draws the next actor uniformly from the candidate pool.
///
/// Returns `None` when the pool is empty.
pub fn choose_actor<R: Rng + ?Sized>(
    marker: FitMarker,
    pool: &AgentPool,
    rng: &mut R,
) -> Option<usize> {
    candidate_pool(marker, pool).choose(rng).copied()
}

/// Available tasks an agent of `category` may perform, order preserved.
pub fn actor_view(available: &[TaskId], category: AgentCategory, team: &TeamConfig) -> Vec<TaskId> {
    available
        .iter()
        .copied()
        .filter(|t| team.is_eligible(category, t.category()))
        .collect()
}
