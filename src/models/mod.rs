mod due;
mod task;

pub use due::{format_due, parse_due, DUE_DATE_FORMAT, DUE_DATE_TIME_FORMAT};
pub use task::{Subtask, Task, TaskStats};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Workflow state shared by tasks and subtasks.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Done];

    pub fn is_done(self) -> bool {
        self == Status::Done
    }

    /// Glyph shown in front of a task row.
    pub fn icon(self) -> &'static str {
        match self {
            Status::Todo => "☐",
            Status::InProgress => "…",
            Status::Done => "✔",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Todo => "To Do",
            Status::InProgress => "In Progress",
            Status::Done => "Done",
        })
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Suffix marker appended to titles; low priority has none.
    pub fn marker(self) -> Option<&'static str> {
        match self {
            Priority::Low => None,
            Priority::Medium => Some("(!)"),
            Priority::High => Some("(!!)"),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"in-progress\""
        );
        let parsed: Status = serde_json::from_str("\"done\"").unwrap();
        assert_eq!(parsed, Status::Done);
    }

    #[test]
    fn priority_markers() {
        assert_eq!(Priority::Low.marker(), None);
        assert_eq!(Priority::Medium.marker(), Some("(!)"));
        assert_eq!(Priority::High.marker(), Some("(!!)"));
        assert!(Priority::High > Priority::Low);
    }
}
