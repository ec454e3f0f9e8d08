use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{Priority, Status};

/// Read-only snapshot of a task handed to the view layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,

    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub status: Status,

    #[serde(default)]
    pub priority: Priority,

    #[serde(
        default,
        with = "super::due",
        skip_serializing_if = "Option::is_none"
    )]
    pub due: Option<NaiveDateTime>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<Subtask>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    pub title: String,

    #[serde(default)]
    pub status: Status,

    #[serde(default)]
    pub priority: Priority,
}

impl Task {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            status: Status::Todo,
            priority: Priority::Medium,
            due: None,
            subtasks: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_due(mut self, due: NaiveDateTime) -> Self {
        self.due = Some(due);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_subtask(mut self, title: impl Into<String>, status: Status) -> Self {
        self.subtasks.push(Subtask {
            title: title.into(),
            status,
            priority: Priority::Medium,
        });
        self
    }

    pub fn subtask_count(&self) -> usize {
        self.subtasks.len()
    }

    pub fn completed_subtasks(&self) -> usize {
        self.subtasks.iter().filter(|s| s.status.is_done()).count()
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due.map(|d| d.date())
    }

    /// Overdue means due on a calendar day before `today` and not done.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.status.is_done() && self.due_date().is_some_and(|d| d < today)
    }
}

/// Completion counters over a collection of tasks.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub todo: usize,
    pub in_progress: usize,
    pub done: usize,
    pub percent: u32,
}

impl TaskStats {
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut stats = TaskStats::default();
        for task in tasks {
            stats.total += 1;
            match task.status {
                Status::Todo => stats.todo += 1,
                Status::InProgress => stats.in_progress += 1,
                Status::Done => stats.done += 1,
            }
        }
        stats.percent = if stats.total == 0 {
            0
        } else {
            (stats.done * 100 / stats.total) as u32
        };
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn subtask_counters() {
        let task = Task::new(1, "Ship release")
            .with_subtask("Changelog", Status::Done)
            .with_subtask("Tag", Status::Todo)
            .with_subtask("Announce", Status::Done);
        assert_eq!(task.subtask_count(), 3);
        assert_eq!(task.completed_subtasks(), 2);
    }

    #[test]
    fn overdue_ignores_done_tasks_and_today() {
        let today = date(2025, 6, 10);
        let yesterday = date(2025, 6, 9).and_hms_opt(18, 0, 0).unwrap();
        let this_morning = today.and_hms_opt(8, 0, 0).unwrap();

        assert!(Task::new(1, "a").with_due(yesterday).is_overdue(today));
        assert!(!Task::new(2, "b").with_due(this_morning).is_overdue(today));
        assert!(!Task::new(3, "c")
            .with_due(yesterday)
            .with_status(Status::Done)
            .is_overdue(today));
        assert!(!Task::new(4, "d").is_overdue(today));
    }

    #[test]
    fn stats_percent_rounds_down() {
        let tasks = vec![
            Task::new(1, "a").with_status(Status::Done),
            Task::new(2, "b").with_status(Status::InProgress),
            Task::new(3, "c"),
        ];
        let stats = TaskStats::from_tasks(&tasks);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.done, 1);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.todo, 1);
        assert_eq!(stats.percent, 33);
        assert_eq!(TaskStats::from_tasks(&Vec::<Task>::new()).percent, 0);
    }

    #[test]
    fn deserializes_minimal_and_display_formatted_due() {
        let json = r#"[
            {"id": 1, "title": "Minimal"},
            {"id": 2, "title": "Due", "status": "in-progress", "priority": "high",
             "due": "2025-06-01 14:30",
             "subtasks": [{"title": "part", "status": "done"}]},
            {"id": 3, "title": "Iso", "due": "2025-06-02T09:15:00"}
        ]"#;
        let tasks: Vec<Task> = serde_json::from_str(json).unwrap();
        assert_eq!(tasks[0].status, Status::Todo);
        assert_eq!(tasks[0].priority, Priority::Medium);
        assert!(tasks[0].due.is_none());
        assert_eq!(tasks[1].priority, Priority::High);
        assert_eq!(
            tasks[1].due,
            Some(date(2025, 6, 1).and_hms_opt(14, 30, 0).unwrap())
        );
        assert_eq!(tasks[1].completed_subtasks(), 1);
        assert_eq!(
            tasks[2].due,
            Some(date(2025, 6, 2).and_hms_opt(9, 15, 0).unwrap())
        );
    }

    #[test]
    fn rejects_malformed_due() {
        let json = r#"{"id": 1, "title": "Bad", "due": "tomorrow"}"#;
        assert!(serde_json::from_str::<Task>(json).is_err());
    }
}
