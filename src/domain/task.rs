//! Task domain model.
//!
//! Tasks are owned by the server: the client never invents an id and never
//! patches a record in place. It reads them through the list endpoint and
//! writes them back as a full [`TaskRequest`] (create/replace) or a
//! [`StatusUpdate`] (status only).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Every status in display order.
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Done];

    /// The status the toggle control moves to.
    ///
    /// The cycle is fixed: `TODO -> IN_PROGRESS -> DONE -> TODO`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Todo => Self::InProgress,
            Self::InProgress => Self::Done,
            Self::Done => Self::Todo,
        }
    }

    /// Wire name, also used as the `status` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::InProgress => "IN_PROGRESS",
            Self::Done => "DONE",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }

    /// One-cell indicator drawn in front of a task title.
    #[must_use]
    pub const fn indicator(self) -> &'static str {
        match self {
            Self::Todo => "[ ]",
            Self::InProgress => "[~]",
            Self::Done => "[x]",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Every priority, lowest first.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The assignee summary embedded in a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    pub id: i64,
    pub name: String,
}

/// A task as returned by the server.
///
/// Fields the dashboard does not use (`createdAt`, `updatedAt`, the
/// assignee's email) are ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub assigned_to: Option<Assignee>,
}

impl Task {
    /// Short human label for the due date relative to `today`.
    ///
    /// - Done tasks show the plain date
    /// - Otherwise: "due today", "due tomorrow", "due in Nd" or "overdue Nd"
    #[must_use]
    pub fn due_label(&self, today: NaiveDate) -> Option<String> {
        let due = self.due_date?;

        if self.status == TaskStatus::Done {
            return Some(format!("due {due}"));
        }

        let days = (due - today).num_days();
        Some(match days {
            0 => "due today".to_string(),
            1 => "due tomorrow".to_string(),
            d if d > 1 => format!("due in {d}d"),
            d => format!("overdue {}d", -d),
        })
    }
}

/// Body of `POST /tasks` and `PUT /tasks/{id}`.
///
/// Serialized with every key present: an empty due date or assignee is sent
/// as `null`, an empty description as `""`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub assigned_to_id: Option<i64>,
}

/// Body of `PATCH /tasks/{id}/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: TaskStatus,
}

/// Server-side filters for the task list.
///
/// `None` means "all". Changing a filter re-fetches tasks only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
}

impl TaskFilter {
    /// Advances the status filter: All -> TODO -> IN_PROGRESS -> DONE -> All.
    pub fn cycle_status(&mut self) {
        self.status = cycle(self.status, &TaskStatus::ALL);
    }

    /// Advances the priority filter: All -> LOW -> MEDIUM -> HIGH -> All.
    pub fn cycle_priority(&mut self) {
        self.priority = cycle(self.priority, &Priority::ALL);
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none()
    }

    /// Query parameters for `GET /tasks`, status first.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, &'static str)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str()));
        }
        if let Some(priority) = self.priority {
            pairs.push(("priority", priority.as_str()));
        }
        pairs
    }
}

fn cycle<T: Copy + PartialEq>(current: Option<T>, all: &[T]) -> Option<T> {
    match current {
        None => all.first().copied(),
        Some(value) => all
            .iter()
            .position(|v| *v == value)
            .and_then(|idx| all.get(idx + 1))
            .copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_cycle_visits_only_three_states() {
        let mut status = TaskStatus::Todo;
        let mut seen = Vec::new();
        for _ in 0..9 {
            status = status.next();
            seen.push(status);
        }
        assert_eq!(
            &seen[..3],
            &[TaskStatus::InProgress, TaskStatus::Done, TaskStatus::Todo]
        );
        assert_eq!(&seen[..3], &seen[3..6]);
        assert_eq!(&seen[3..6], &seen[6..9]);
    }

    #[test]
    fn decodes_server_task_with_extra_fields() {
        let json = r#"{
            "id": 7,
            "title": "Design API",
            "description": null,
            "status": "IN_PROGRESS",
            "priority": "HIGH",
            "dueDate": "2024-05-01",
            "createdAt": "2024-04-01T10:00:00",
            "updatedAt": "2024-04-02T10:00:00",
            "assignedTo": {"id": 3, "name": "Ada", "email": "ada@example.com"}
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, 7);
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(task.assigned_to.unwrap().name, "Ada");
    }

    #[test]
    fn request_sends_nulls_for_empty_optionals() {
        let body = TaskRequest {
            title: "Write docs".to_string(),
            description: String::new(),
            status: TaskStatus::Todo,
            priority: Priority::Low,
            due_date: None,
            assigned_to_id: None,
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "title": "Write docs",
                "description": "",
                "status": "TODO",
                "priority": "LOW",
                "dueDate": null,
                "assignedToId": null
            })
        );
    }

    #[test]
    fn filter_cycles_back_to_all() {
        let mut filter = TaskFilter::default();
        filter.cycle_status();
        assert_eq!(filter.status, Some(TaskStatus::Todo));
        filter.cycle_status();
        filter.cycle_status();
        assert_eq!(filter.status, Some(TaskStatus::Done));
        filter.cycle_status();
        assert_eq!(filter.status, None);

        filter.cycle_priority();
        assert_eq!(filter.query_pairs(), vec![("priority", "LOW")]);
    }

    #[test]
    fn due_label_is_relative_to_today() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let mut task = Task {
            id: 1,
            title: "Ship".to_string(),
            description: None,
            status: TaskStatus::Todo,
            priority: Priority::Medium,
            due_date: NaiveDate::from_ymd_opt(2024, 5, 13),
            assigned_to: None,
        };
        assert_eq!(task.due_label(today).as_deref(), Some("due in 3d"));

        task.due_date = NaiveDate::from_ymd_opt(2024, 5, 8);
        assert_eq!(task.due_label(today).as_deref(), Some("overdue 2d"));

        task.status = TaskStatus::Done;
        assert_eq!(task.due_label(today).as_deref(), Some("due 2024-05-08"));
    }
}
