//! Input validation for precedence graphs.
//!
//! Checks structural integrity of a precedence graph before it is used to
//! drive a schedule. Detects:
//! - Duplicate initial tasks
//! - References to tasks outside the universe
//! - Forward/backward relations that disagree
//! - Circular precedence dependencies (DAG validation)
//! - Tasks that can never become available
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use std::collections::{BTreeMap, BTreeSet};

use crate::models::TaskId;
use crate::precedence::GraphParts;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A task is listed twice among the initially available tasks.
    DuplicateId,
    /// A relation or the initial set references a task outside the universe.
    UnknownTask,
    /// `a → b` in the forward relation without `b ← a` in the backward one, or vice versa.
    MismatchedRelation,
    /// Precedence graph contains a cycle.
    CyclicDependency,
    /// A task without prerequisites is not initially available.
    UnreachableTask,
    /// An initially available task has prerequisites.
    PrematureTask,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the four-part structure of a precedence graph.
///
/// Checks:
/// 1. No duplicate initial tasks
/// 2. All initial tasks and relation endpoints belong to the universe
/// 3. Forward and backward relations mirror each other
/// 4. Every task without prerequisites is initially available
/// 5. No initially available task has prerequisites
/// 6. No circular precedence dependencies
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_graph(parts: &GraphParts) -> ValidationResult {
    let mut errors = Vec::new();

    // Initial tasks
    let mut initial = BTreeSet::new();
    for task in &parts.initial {
        if !initial.insert(*task) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Task '{task}' is listed twice as initially available"),
            ));
        }
        if !parts.universe.contains(task) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownTask,
                format!("Initial task '{task}' is not part of the task universe"),
            ));
        }
    }

    // Relation endpoints
    check_references(&parts.forward, &parts.universe, "successor", &mut errors);
    check_references(&parts.backward, &parts.universe, "prerequisite", &mut errors);

    // Mirror check
    for (from, successors) in &parts.forward {
        for to in successors {
            let mirrored = parts.backward.get(to).is_some_and(|p| p.contains(from));
            if !mirrored {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MismatchedRelation,
                    format!("'{from}' unlocks '{to}' but '{to}' does not list '{from}' as prerequisite"),
                ));
            }
        }
    }
    for (to, prerequisites) in &parts.backward {
        for from in prerequisites {
            let mirrored = parts.forward.get(from).is_some_and(|s| s.contains(to));
            if !mirrored {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MismatchedRelation,
                    format!("'{to}' requires '{from}' but '{from}' does not unlock '{to}'"),
                ));
            }
        }
    }

    // Reachability of roots
    for task in &parts.universe {
        let has_prerequisites = parts.backward.get(task).is_some_and(|p| !p.is_empty());
        match (has_prerequisites, initial.contains(task)) {
            (false, false) => errors.push(ValidationError::new(
                ValidationErrorKind::UnreachableTask,
                format!("Task '{task}' has no prerequisites but is not initially available"),
            )),
            (true, true) => errors.push(ValidationError::new(
                ValidationErrorKind::PrematureTask,
                format!("Task '{task}' is initially available but has prerequisites"),
            )),
            _ => {}
        }
    }

    // Check for cycles in the forward relation (DFS-based)
    if let Some(cycle_err) = detect_cycles(&parts.forward, &parts.universe) {
        errors.push(cycle_err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_references(
    relation: &BTreeMap<TaskId, BTreeSet<TaskId>>,
    universe: &BTreeSet<TaskId>,
    role: &str,
    errors: &mut Vec<ValidationError>,
) {
    for (task, linked) in relation {
        if !universe.contains(task) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownTask,
                format!("Relation entry '{task}' is not part of the task universe"),
            ));
        }
        for other in linked {
            if !universe.contains(other) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownTask,
                    format!("Task '{task}' references unknown {role} '{other}'"),
                ));
            }
        }
    }
}

/// Detects cycles in the precedence graph using DFS.
///
/// # Algorithm
/// Topological sort via DFS. If a back-edge is found (visiting a node
/// currently in the recursion stack), a cycle exists.
///
/// # Reference
/// Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4
fn detect_cycles(
    forward: &BTreeMap<TaskId, BTreeSet<TaskId>>,
    universe: &BTreeSet<TaskId>,
) -> Option<ValidationError> {
    let mut visited = BTreeSet::new();
    let mut in_stack = BTreeSet::new();

    for &node in universe.iter().chain(forward.keys()) {
        if !visited.contains(&node) && has_cycle_dfs(node, forward, &mut visited, &mut in_stack) {
            return Some(ValidationError::new(
                ValidationErrorKind::CyclicDependency,
                format!("Circular dependency detected involving task '{node}'"),
            ));
        }
    }

    None
}

fn has_cycle_dfs(
    node: TaskId,
    forward: &BTreeMap<TaskId, BTreeSet<TaskId>>,
    visited: &mut BTreeSet<TaskId>,
    in_stack: &mut BTreeSet<TaskId>,
) -> bool {
    visited.insert(node);
    in_stack.insert(node);

    if let Some(neighbors) = forward.get(&node) {
        for &next in neighbors {
            if in_stack.contains(&next) {
                return true; // Back edge → cycle
            }
            if !visited.contains(&next) && has_cycle_dfs(next, forward, visited, in_stack) {
                return true;
            }
        }
    }

    in_stack.remove(&node);
    false
}
