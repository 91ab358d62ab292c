//! Dependency bookkeeping for a schedule in progress.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::trace;

use super::PrecedenceGraph;
use crate::error::{Result, ScheduleError};
use crate::models::TaskId;

/// Done / candidate / remaining / available bookkeeping over a shared graph.
///
/// Invariants:
/// - `done ∩ remaining = ∅` and `remaining = universe − done`
/// - a task is promoted to `available` only when all its prerequisites
///   are done, and at most once over its lifetime
#[derive(Debug, Clone)]
pub struct PrecedenceTracker {
    graph: Arc<PrecedenceGraph>,
    done: BTreeSet<TaskId>,
    candidate: BTreeSet<TaskId>,
    remaining: BTreeSet<TaskId>,
    available: Vec<TaskId>,
    history: Vec<TaskId>,
    released: BTreeSet<TaskId>,
}

impl PrecedenceTracker {
    /// Starts a fresh schedule with the graph's initial tasks available.
    pub fn new(graph: Arc<PrecedenceGraph>) -> Self {
        let available = graph.initial().to_vec();
        let released = available.iter().copied().collect();
        let remaining = graph.universe().clone();
        Self {
            graph,
            done: BTreeSet::new(),
            candidate: BTreeSet::new(),
            remaining,
            available,
            history: Vec::new(),
            released,
        }
    }

    pub fn graph(&self) -> &PrecedenceGraph {
        &self.graph
    }

    pub fn done(&self) -> &BTreeSet<TaskId> {
        &self.done
    }

    /// Unlocked tasks whose prerequisites are not all done yet.
    pub fn candidate(&self) -> &BTreeSet<TaskId> {
        &self.candidate
    }

    pub fn remaining(&self) -> &BTreeSet<TaskId> {
        &self.remaining
    }

    /// Currently assignable tasks, in promotion order.
    pub fn available(&self) -> &[TaskId] {
        &self.available
    }

    /// Every task assigned so far, in order.
    pub fn history(&self) -> &[TaskId] {
        &self.history
    }

    pub fn is_complete(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Takes `task` out of the available list and appends it to history.
    ///
    /// # Errors
    /// [`ScheduleError::IllegalAction`] if `task` is not available.
    pub fn assign(&mut self, task: TaskId) -> Result<()> {
        let pos = self
            .available
            .iter()
            .position(|&t| t == task)
            .ok_or(ScheduleError::IllegalAction(task))?;
        self.available.remove(pos);
        self.history.push(task);
        Ok(())
    }

    /// Marks `task` done and promotes every candidate that became ready.
    ///
    /// Returns the newly available tasks.
    pub fn complete(&mut self, task: TaskId) -> Vec<TaskId> {
        self.done.insert(task);
        self.remaining.remove(&task);
        self.candidate.remove(&task);

        let graph = Arc::clone(&self.graph);
        for succ in graph.successors(task) {
            if !self.done.contains(&succ) && !self.released.contains(&succ) {
                self.candidate.insert(succ);
            }
        }

        let ready: Vec<TaskId> = self
            .candidate
            .iter()
            .copied()
            .filter(|t| self.prerequisites_done(*t))
            .collect();

        for &t in &ready {
            self.candidate.remove(&t);
            self.released.insert(t);
            self.available.push(t);
            trace!(task = %t, "task released");
        }
        ready
    }

    fn prerequisites_done(&self, task: TaskId) -> bool {
        self.graph
            .prerequisites(task)
            .is_none_or(|p| p.is_subset(&self.done))
    }
}
