//! Crate-wide error type.

use thiserror::Error;

use crate::models::TaskId;
use crate::validation::ValidationError;

/// Errors raised while building or running a schedule search.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("invalid task id: {0:?}")]
    InvalidTaskId(String),

    #[error("inconsistent precedence graph: {}", join_messages(.0))]
    InvalidGraph(Vec<ValidationError>),

    #[error("no duration configured for task category '{0}'")]
    UnknownDuration(char),

    #[error("no agent in the team is eligible for task category '{0}'")]
    NoEligibleAgent(char),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("task {0} is not a legal action in the current state")]
    IllegalAction(TaskId),

    #[error("exhausted options at tick {tick}: {remaining} tasks remain but no agent can make progress")]
    ExhaustedOptions { tick: u64, remaining: usize },

    #[error("no legal actions available")]
    NoLegalActions,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Convenience result alias.
pub type Result<T> = std::result::Result<T, ScheduleError>;
