//! Task identifier model.
//!
//! A task is named by a category letter followed by an instance index,
//! e.g. `A12` is the twelfth task of category `A`. The category decides
//! the task's duration and which agent categories may perform it; both
//! are looked up in the injected [`TeamConfig`](crate::config::TeamConfig).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ScheduleError;

/// Identifier of a construction task.
///
/// Ordered by category, then by index, so ordered collections of tasks
/// iterate deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId {
    category: char,
    index: u32,
}

impl TaskId {
    /// Creates a task id from its parts.
    pub fn new(category: char, index: u32) -> Self {
        Self { category, index }
    }

    /// Task category letter.
    pub fn category(&self) -> char {
        self.category
    }

    /// Instance index within the category.
    pub fn index(&self) -> u32 {
        self.index
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.category, self.index)
    }
}

impl FromStr for TaskId {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let category = chars
            .next()
            .filter(|c| c.is_ascii_alphabetic())
            .ok_or_else(|| ScheduleError::InvalidTaskId(s.to_string()))?;
        let index = chars
            .as_str()
            .parse::<u32>()
            .map_err(|_| ScheduleError::InvalidTaskId(s.to_string()))?;
        Ok(Self::new(category.to_ascii_uppercase(), index))
    }
}

impl TryFrom<String> for TaskId {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let id: TaskId = "A12".parse().unwrap();
        assert_eq!(id.category(), 'A');
        assert_eq!(id.index(), 12);
        assert_eq!(id.to_string(), "A12");
    }

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        let id: TaskId = " e3 ".parse().unwrap();
        assert_eq!(id, TaskId::new('E', 3));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("".parse::<TaskId>().is_err());
        assert!("7".parse::<TaskId>().is_err());
        assert!("A".parse::<TaskId>().is_err());
        assert!("Ax".parse::<TaskId>().is_err());
    }

    #[test]
    fn test_ordering_category_then_index() {
        let mut ids = vec![
            TaskId::new('B', 1),
            TaskId::new('A', 10),
            TaskId::new('A', 2),
        ];
        ids.sort();
        assert_eq!(
            ids,
            vec![TaskId::new('A', 2), TaskId::new('A', 10), TaskId::new('B', 1)]
        );
    }

    #[test]
    fn test_serde_as_string() {
        let id = TaskId::new('D', 4);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"D4\"");
        let back: TaskId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
