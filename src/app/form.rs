//! Task and user forms.
//!
//! Both forms live in the same modal slot ([`Modal`]); opening one replaces
//! the other. A form only checks that required fields are filled in and that
//! the due date is a real date. Everything else is left to the server, whose
//! validation message is shown when it rejects a submission.

use crate::domain::{NewUser, Priority, Task, TaskRequest, TaskStatus, User};
use crate::worker::RequestId;
use chrono::NaiveDate;

/// Input format of the due date field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fields of the task form in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Title,
    Description,
    Status,
    Priority,
    DueDate,
    Assignee,
}

impl TaskField {
    pub const ALL: [Self; 6] = [
        Self::Title,
        Self::Description,
        Self::Status,
        Self::Priority,
        Self::DueDate,
        Self::Assignee,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::Status => "Status",
            Self::Priority => "Priority",
            Self::DueDate => "Due date",
            Self::Assignee => "Assign to",
        }
    }

    /// Whether the field is a fixed list of options rather than free text.
    #[must_use]
    pub const fn is_choice(self) -> bool {
        matches!(self, Self::Status | Self::Priority | Self::Assignee)
    }
}

/// Fields of the user form in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Name,
    Email,
}

impl UserField {
    pub const ALL: [Self; 2] = [Self::Name, Self::Email];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
        }
    }
}

fn step<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let len = all.len();
    let idx = all.iter().position(|v| *v == current).unwrap_or(0);
    let next = if forward {
        (idx + 1) % len
    } else {
        (idx + len - 1) % len
    };
    all[next]
}

/// State of the create/edit task form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    /// `None` creates a task, `Some(id)` replaces task `id`.
    pub task_id: Option<i64>,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    /// Raw due date text, `YYYY-MM-DD` or empty.
    pub due_date: String,
    /// Chosen user id, `None` for unassigned.
    pub assignee: Option<i64>,
    pub focus: TaskField,
    /// Local validation message, cleared on the next edit.
    pub error: Option<String>,
    /// Request id of the submission in flight.
    pub pending: Option<RequestId>,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            task_id: None,
            title: String::new(),
            description: String::new(),
            status: TaskStatus::Todo,
            priority: Priority::Medium,
            due_date: String::new(),
            assignee: None,
            focus: TaskField::Title,
            error: None,
            pending: None,
        }
    }
}

impl TaskForm {
    /// An empty form for a new task.
    #[must_use]
    pub fn create() -> Self {
        Self::default()
    }

    /// A form pre-populated from `task`.
    #[must_use]
    pub fn edit(task: &Task) -> Self {
        Self {
            task_id: Some(task.id),
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            status: task.status,
            priority: task.priority,
            due_date: task
                .due_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            assignee: task.assigned_to.as_ref().map(|a| a.id),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn heading(&self) -> &'static str {
        if self.task_id.is_some() {
            "Edit Task"
        } else {
            "Create Task"
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = step(&TaskField::ALL, self.focus, true);
    }

    pub fn focus_prev(&mut self) {
        self.focus = step(&TaskField::ALL, self.focus, false);
    }

    /// Types `c` into the focused text field. Choice fields ignore it.
    pub fn insert_char(&mut self, c: char) {
        let Some(field) = self.text_field_mut() else {
            return;
        };
        field.push(c);
        self.error = None;
    }

    pub fn backspace(&mut self) {
        let Some(field) = self.text_field_mut() else {
            return;
        };
        field.pop();
        self.error = None;
    }

    fn text_field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            TaskField::Title => Some(&mut self.title),
            TaskField::Description => Some(&mut self.description),
            TaskField::DueDate => Some(&mut self.due_date),
            TaskField::Status | TaskField::Priority | TaskField::Assignee => None,
        }
    }

    /// Moves the focused choice field to its next or previous option.
    ///
    /// The assignee options are "Unassigned" followed by `users` in order. A
    /// chosen id that is no longer listed restarts from "Unassigned".
    pub fn cycle_choice(&mut self, forward: bool, users: &[User]) {
        match self.focus {
            TaskField::Status => self.status = step(&TaskStatus::ALL, self.status, forward),
            TaskField::Priority => self.priority = step(&Priority::ALL, self.priority, forward),
            TaskField::Assignee => {
                let options: Vec<Option<i64>> = std::iter::once(None)
                    .chain(users.iter().map(|u| Some(u.id)))
                    .collect();
                let current = if options.contains(&self.assignee) {
                    self.assignee
                } else {
                    None
                };
                self.assignee = step(&options, current, forward);
            }
            TaskField::Title | TaskField::Description | TaskField::DueDate => return,
        }
        self.error = None;
    }

    /// Text shown for the chosen assignee.
    #[must_use]
    pub fn assignee_label(&self, users: &[User]) -> String {
        match self.assignee {
            None => "Unassigned".to_string(),
            Some(id) => users
                .iter()
                .find(|u| u.id == id)
                .map_or_else(|| format!("User #{id}"), |u| u.name.clone()),
        }
    }

    /// Builds the request body.
    ///
    /// # Errors
    ///
    /// Returns the message to show when the title is blank or the due date
    /// is not a valid `YYYY-MM-DD` date.
    pub fn to_request(&self) -> Result<TaskRequest, String> {
        if self.title.trim().is_empty() {
            return Err("Title is required".to_string());
        }

        let due = self.due_date.trim();
        let due_date = if due.is_empty() {
            None
        } else {
            Some(
                NaiveDate::parse_from_str(due, DATE_FORMAT)
                    .map_err(|_| "Due date must be a date (YYYY-MM-DD)".to_string())?,
            )
        };

        Ok(TaskRequest {
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
            priority: self.priority,
            due_date,
            assigned_to_id: self.assignee,
        })
    }
}

/// State of the create user form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub focus: UserField,
    pub error: Option<String>,
    pub pending: Option<RequestId>,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            focus: UserField::Name,
            error: None,
            pending: None,
        }
    }
}

impl UserForm {
    pub fn focus_next(&mut self) {
        self.focus = step(&UserField::ALL, self.focus, true);
    }

    pub fn focus_prev(&mut self) {
        self.focus = step(&UserField::ALL, self.focus, false);
    }

    fn field_mut(&mut self) -> &mut String {
        match self.focus {
            UserField::Name => &mut self.name,
            UserField::Email => &mut self.email,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.field_mut().push(c);
        self.error = None;
    }

    pub fn backspace(&mut self) {
        self.field_mut().pop();
        self.error = None;
    }

    /// Builds the request body.
    ///
    /// # Errors
    ///
    /// Returns the message to show when name or email is blank.
    pub fn to_request(&self) -> Result<NewUser, String> {
        if self.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        if self.email.trim().is_empty() {
            return Err("Email is required".to_string());
        }
        Ok(NewUser {
            name: self.name.clone(),
            email: self.email.clone(),
        })
    }
}

/// The modal overlay; at most one form is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    Task(TaskForm),
    User(UserForm),
}

impl Modal {
    #[must_use]
    pub const fn pending(&self) -> Option<RequestId> {
        match self {
            Self::Task(form) => form.pending,
            Self::User(form) => form.pending,
        }
    }

    pub fn set_pending(&mut self, pending: Option<RequestId>) {
        match self {
            Self::Task(form) => form.pending = pending,
            Self::User(form) => form.pending = pending,
        }
    }

    pub fn set_error(&mut self, error: Option<String>) {
        match self {
            Self::Task(form) => form.error = error,
            Self::User(form) => form.error = error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Assignee;

    fn users() -> Vec<User> {
        vec![
            User {
                id: 10,
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            },
            User {
                id: 20,
                name: "Grace".to_string(),
                email: "grace@example.com".to_string(),
            },
        ]
    }

    #[test]
    fn edit_prepopulates_from_task() {
        let task = Task {
            id: 3,
            title: "Design API".to_string(),
            description: None,
            status: TaskStatus::InProgress,
            priority: Priority::High,
            due_date: NaiveDate::from_ymd_opt(2024, 6, 1),
            assigned_to: Some(Assignee {
                id: 20,
                name: "Grace".to_string(),
            }),
        };

        let form = TaskForm::edit(&task);

        assert_eq!(form.heading(), "Edit Task");
        assert_eq!(form.description, "");
        assert_eq!(form.due_date, "2024-06-01");
        assert_eq!(form.assignee, Some(20));
        assert_eq!(form.assignee_label(&users()), "Grace");
    }

    #[test]
    fn blank_title_blocks_submission() {
        let mut form = TaskForm::create();
        form.title = "   ".to_string();
        assert_eq!(form.to_request().unwrap_err(), "Title is required");
    }

    #[test]
    fn invalid_due_date_blocks_submission() {
        let mut form = TaskForm::create();
        form.title = "Ship".to_string();
        form.due_date = "2024-02-30".to_string();
        assert!(form.to_request().is_err());

        form.due_date = "2024-02-29".to_string();
        let body = form.to_request().unwrap();
        assert_eq!(body.due_date, NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(body.assigned_to_id, None);
    }

    #[test]
    fn assignee_cycles_through_unassigned_and_users() {
        let users = users();
        let mut form = TaskForm::create();
        form.focus = TaskField::Assignee;

        form.cycle_choice(true, &users);
        assert_eq!(form.assignee, Some(10));
        form.cycle_choice(true, &users);
        assert_eq!(form.assignee, Some(20));
        form.cycle_choice(true, &users);
        assert_eq!(form.assignee, None);
        form.cycle_choice(false, &users);
        assert_eq!(form.assignee, Some(20));
    }

    #[test]
    fn typing_into_choice_field_is_ignored() {
        let mut form = TaskForm::create();
        form.focus = TaskField::Status;
        form.insert_char('x');
        assert_eq!(form, TaskForm::create_focused(TaskField::Status));
    }

    #[test]
    fn user_form_requires_both_fields() {
        let mut form = UserForm::default();
        form.insert_char('A');
        assert_eq!(form.to_request().unwrap_err(), "Email is required");

        form.focus_next();
        for c in "a@b.c".chars() {
            form.insert_char(c);
        }
        assert_eq!(
            form.to_request().unwrap(),
            NewUser {
                name: "A".to_string(),
                email: "a@b.c".to_string()
            }
        );
    }

    impl TaskForm {
        fn create_focused(focus: TaskField) -> Self {
            Self {
                focus,
                ..Self::default()
            }
        }
    }
}
