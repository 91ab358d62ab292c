//! The scheduling environment.
//!
//! A [`ScheduleEnv`] couples the precedence tracker, the agent pool and the
//! simulated clock. Every state handed to the search is *settled*: either the
//! schedule is complete, or some idle agent (the actor) has at least one
//! eligible task to pick.
//!
//! # Time advancement
//!
//! While no idle agent can take an available task, the clock jumps to the
//! next completion: the smallest remaining duration among busy agents is
//! subtracted from all of them, each passed tick is recorded in the
//! timeline, and finished tasks unlock their successors.

use std::sync::Arc;

use rand::Rng;
use tracing::debug;

use super::turn::{actor_view, choose_actor, fit, FitMarker};
use super::Environment;
use crate::config::TeamConfig;
use crate::error::{Result, ScheduleError};
use crate::models::{AgentPool, IdleReport, TaskId, TickRecord, Timeline};
use crate::precedence::{PrecedenceGraph, PrecedenceTracker};

/// Mutable schedule state explored by the search.
///
/// Cloning is a structural deep copy of the tracker, pool and timeline; the
/// graph and team configuration are immutable and shared.
#[derive(Debug, Clone)]
pub struct ScheduleEnv {
    team: Arc<TeamConfig>,
    tracker: PrecedenceTracker,
    pool: AgentPool,
    timeline: Timeline,
    clock: u64,
    actor: Option<usize>,
    marker: FitMarker,
    view: Vec<TaskId>,
}

impl ScheduleEnv {
    /// Builds a settled environment at tick 0.
    ///
    /// # Errors
    /// - [`ScheduleError::InvalidConfig`] for an empty team or zero duration
    /// - [`ScheduleError::UnknownDuration`] for a task category without duration
    /// - [`ScheduleError::NoEligibleAgent`] for a task category no present
    ///   agent may perform
    pub fn new<R: Rng + ?Sized>(
        graph: impl Into<Arc<PrecedenceGraph>>,
        team: impl Into<Arc<TeamConfig>>,
        rng: &mut R,
    ) -> Result<Self> {
        let graph = graph.into();
        let team = team.into();
        team.validate()?;
        team.check_coverage(&graph.categories())?;

        let mut env = Self {
            pool: AgentPool::from_counts(team.humanoids, team.robots),
            tracker: PrecedenceTracker::new(graph),
            team,
            timeline: Timeline::new(),
            clock: 0,
            actor: None,
            marker: FitMarker::None,
            view: Vec::new(),
        };
        env.settle(rng)?;
        Ok(env)
    }

    pub fn team(&self) -> &TeamConfig {
        &self.team
    }

    pub fn tracker(&self) -> &PrecedenceTracker {
        &self.tracker
    }

    pub fn pool(&self) -> &AgentPool {
        &self.pool
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Elapsed ticks.
    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// Agent that takes the next decision (`None` once terminal).
    pub fn actor(&self) -> Option<usize> {
        self.actor
    }

    /// Fit marker the current actor was drawn under.
    pub fn marker(&self) -> FitMarker {
        self.marker
    }

    /// Tasks assigned so far, in order.
    pub fn history(&self) -> &[TaskId] {
        self.tracker.history()
    }

    /// Idle accounting over the recorded timeline.
    pub fn idle_report(&self) -> IdleReport {
        self.timeline.idle_report(&self.pool)
    }

    fn settle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        loop {
            if self.tracker.is_complete() {
                self.actor = None;
                self.marker = FitMarker::None;
                self.view.clear();
                return Ok(());
            }

            let marker = fit(self.tracker.available(), self.pool.idle_counts(), &self.team);
            if !marker.is_none() {
                return self.pick_actor(marker, rng);
            }
            self.advance_time()?;
        }
    }

    fn pick_actor<R: Rng + ?Sized>(&mut self, marker: FitMarker, rng: &mut R) -> Result<()> {
        let agent = choose_actor(marker, &self.pool, rng)
            .and_then(|id| self.pool.get(id))
            .ok_or_else(|| self.exhausted())?;
        let (id, category) = (agent.id(), agent.category());

        self.view = actor_view(self.tracker.available(), category, &self.team);
        self.actor = Some(id);
        self.marker = marker;
        debug!(tick = self.clock, actor = id, %category, ?marker, options = self.view.len(), "actor chosen");
        Ok(())
    }

    fn advance_time(&mut self) -> Result<()> {
        let step = self
            .pool
            .min_busy_remaining()
            .ok_or_else(|| self.exhausted())?;

        let entry: TickRecord = self.pool.busy_assignments().collect();
        self.timeline.record(entry, step);
        self.clock += u64::from(step);

        let finished = self.pool.advance(step);
        for &task in &finished {
            self.tracker.complete(task);
        }
        debug!(tick = self.clock, step, ?finished, "time advanced");
        Ok(())
    }

    fn exhausted(&self) -> ScheduleError {
        ScheduleError::ExhaustedOptions {
            tick: self.clock,
            remaining: self.tracker.remaining().len(),
        }
    }
}

impl Environment for ScheduleEnv {
    type Action = TaskId;

    /// The current actor's view of the available tasks.
    fn available_actions(&self) -> &[TaskId] {
        &self.view
    }

    fn apply<R: Rng + ?Sized>(&mut self, task: TaskId, rng: &mut R) -> Result<()> {
        let actor = match self.actor {
            Some(actor) if self.view.contains(&task) => actor,
            _ => return Err(ScheduleError::IllegalAction(task)),
        };
        let duration = self.team.duration(task.category())?;

        self.tracker.assign(task)?;
        self.pool.assign(actor, task, duration);
        debug!(tick = self.clock, %task, actor, duration, "task assigned");

        self.settle(rng)
    }

    fn is_terminal(&self) -> bool {
        self.tracker.is_complete()
    }

    fn cost(&self) -> f64 {
        self.clock as f64
    }
}
