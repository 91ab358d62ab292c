//! Precedence graph over tasks.
//!
//! Immutable after construction. Built either from the four-part structure
//! produced by an external loader ([`GraphParts`]) or from a successor
//! table where each row names a task followed by the tasks it unlocks.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Result, ScheduleError};
use crate::models::TaskId;
use crate::validation::validate_graph;

/// Raw graph data as handed over by an ingestion layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphParts {
    /// Task → tasks it unlocks.
    pub forward: BTreeMap<TaskId, BTreeSet<TaskId>>,
    /// Task → its prerequisites.
    pub backward: BTreeMap<TaskId, BTreeSet<TaskId>>,
    /// Tasks assignable at the start, in order.
    pub initial: Vec<TaskId>,
    /// Every task of the job.
    pub universe: BTreeSet<TaskId>,
}

/// A validated directed acyclic precedence graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecedenceGraph {
    forward: BTreeMap<TaskId, BTreeSet<TaskId>>,
    backward: BTreeMap<TaskId, BTreeSet<TaskId>>,
    initial: Vec<TaskId>,
    universe: BTreeSet<TaskId>,
}

impl PrecedenceGraph {
    /// Validates and wraps the four-part graph structure.
    ///
    /// # Errors
    /// [`ScheduleError::InvalidGraph`] with every detected inconsistency.
    pub fn from_parts(parts: GraphParts) -> Result<Self> {
        validate_graph(&parts).map_err(ScheduleError::InvalidGraph)?;
        let GraphParts {
            forward,
            backward,
            initial,
            universe,
        } = parts;
        Ok(Self {
            forward,
            backward,
            initial,
            universe,
        })
    }

    /// Builds a graph from successor rows.
    ///
    /// The first cell of each row is a task id; the remaining non-empty
    /// cells are the tasks it immediately unlocks. Tasks without any
    /// prerequisite become initially available, in order of first
    /// appearance.
    pub fn from_rows<I, R, S>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parts = GraphParts::default();
        let mut seen_order = Vec::new();

        for row in rows {
            let mut cells = row
                .into_iter()
                .filter(|c| !c.as_ref().trim().is_empty())
                .map(|c| c.as_ref().parse::<TaskId>());

            let Some(head) = cells.next() else {
                continue;
            };
            let head = head?;
            if parts.universe.insert(head) {
                seen_order.push(head);
            }
            let successors = parts.forward.entry(head).or_default();
            let mut linked = Vec::new();
            for cell in cells {
                let succ = cell?;
                successors.insert(succ);
                linked.push(succ);
            }
            for succ in linked {
                parts.backward.entry(succ).or_default().insert(head);
                if parts.universe.insert(succ) {
                    seen_order.push(succ);
                }
            }
        }

        parts.initial = seen_order
            .into_iter()
            .filter(|t| parts.backward.get(t).is_none_or(|p| p.is_empty()))
            .collect();

        Self::from_parts(parts)
    }

    /// Parses a successor table from text.
    ///
    /// One row per line, cells separated by commas, semicolons, tabs or
    /// spaces. Blank lines and lines starting with `#` are skipped.
    pub fn from_table_str(text: &str) -> Result<Self> {
        let rows = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(|l| {
                l.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            });
        Self::from_rows(rows)
    }

    /// Tasks unlocked by `task`.
    pub fn successors(&self, task: TaskId) -> impl Iterator<Item = TaskId> + '_ {
        self.forward.get(&task).into_iter().flatten().copied()
    }

    /// Prerequisites of `task` (empty for roots).
    pub fn prerequisites(&self, task: TaskId) -> Option<&BTreeSet<TaskId>> {
        self.backward.get(&task)
    }

    /// Initially available tasks, in order.
    pub fn initial(&self) -> &[TaskId] {
        &self.initial
    }

    /// All tasks.
    pub fn universe(&self) -> &BTreeSet<TaskId> {
        &self.universe
    }

    /// Distinct task categories present in the graph.
    pub fn categories(&self) -> BTreeSet<char> {
        self.universe.iter().map(|t| t.category()).collect()
    }

    pub fn len(&self) -> usize {
        self.universe.len()
    }

    pub fn is_empty(&self) -> bool {
        self.universe.is_empty()
    }
}
