//! MCTS-driven schedule construction.
//!
//! # Algorithm
//!
//! 1. Build a settled [`ScheduleEnv`] for the graph.
//! 2. Ask the search for the next task on the current state.
//! 3. Apply it to the real environment (time may fast-forward).
//! 4. Re-root the tree on the played task, or drop it when tree reuse is
//!    disabled.
//! 5. Repeat until every task is done, then compute the KPIs.

use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use super::ScheduleKpi;
use crate::config::{PlannerConfig, TeamConfig};
use crate::env::{Environment, ScheduleEnv};
use crate::error::Result;
use crate::mcts::Mcts;
use crate::precedence::PrecedenceGraph;

/// Plans complete schedules one decision at a time.
///
/// # Example
///
/// ```
/// use u_crew::config::{PlannerConfig, TeamConfig};
/// use u_crew::precedence::PrecedenceGraph;
/// use u_crew::scheduler::Planner;
///
/// let graph = PrecedenceGraph::from_table_str("A1, C1\nA2, C1\nC1, B1").unwrap();
/// let config = PlannerConfig {
///     team: TeamConfig::mixed(2, 2),
///     ..Default::default()
/// };
///
/// let mut planner = Planner::seeded(config, 42).unwrap();
/// let kpi = planner.run(graph).unwrap();
/// assert_eq!(kpi.history.len(), 4);
/// assert!(kpi.makespan >= 5 + 4 + 10);
/// ```
pub struct Planner<R> {
    config: PlannerConfig,
    team: Arc<TeamConfig>,
    search: Mcts<ScheduleEnv, R>,
    rng: R,
}

impl Planner<ChaCha8Rng> {
    /// Planner with reproducible randomness derived from `seed`.
    pub fn seeded(config: PlannerConfig, seed: u64) -> Result<Self> {
        Self::new(
            config,
            ChaCha8Rng::seed_from_u64(seed),
            ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)),
        )
    }
}

impl<R: Rng> Planner<R> {
    /// Creates a planner.
    ///
    /// `search_rng` drives rollouts and simulated actor draws; `env_rng`
    /// drives actor draws on the real schedule.
    pub fn new(config: PlannerConfig, search_rng: R, env_rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            team: Arc::new(config.team.clone()),
            search: Mcts::new(config.search.clone(), search_rng),
            rng: env_rng,
            config,
        })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plans one complete schedule for `graph`.
    ///
    /// # Errors
    /// Construction errors of [`ScheduleEnv::new`] and any error raised
    /// while searching or applying a decision.
    pub fn run(&mut self, graph: impl Into<Arc<PrecedenceGraph>>) -> Result<ScheduleKpi> {
        let env = self.plan(graph)?;
        let kpi = ScheduleKpi::calculate(&env);
        info!(
            makespan = kpi.makespan,
            tasks = kpi.history.len(),
            idle = kpi.idle.total,
            utilization = kpi.utilization,
            "schedule complete"
        );
        Ok(kpi)
    }

    /// Plans one complete schedule and returns the final environment.
    pub fn plan(&mut self, graph: impl Into<Arc<PrecedenceGraph>>) -> Result<ScheduleEnv> {
        self.search.reset();
        let mut env = ScheduleEnv::new(graph, Arc::clone(&self.team), &mut self.rng)?;

        while !env.is_terminal() {
            let task = self.search.get_move(&env)?;
            env.apply(task, &mut self.rng)?;
            debug!(%task, tick = env.clock(), done = env.tracker().done().len(), "decision applied");

            if self.config.reuse_tree {
                self.search.update_with_move(task);
            } else {
                self.search.reset();
            }
        }
        Ok(env)
    }
}
