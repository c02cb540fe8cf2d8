//! View model types representing renderable UI state.
//!
//! View models are computed from `AppState` by `compute_viewmodel` and
//! consumed by the renderer. They carry display-ready text and flags only;
//! rendering never looks back at the state.

use crate::app::notifications::NotificationKind;
use crate::domain::{Priority, TaskStatus};

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub body: BodyViewModel,
    /// Present while search mode is active.
    pub search_bar: Option<SearchBarInfo>,
    /// Present only when the query is non-empty and has at least one match.
    pub search_results: Option<Vec<SearchResultItem>>,
    pub modal: Option<ModalViewModel>,
    pub confirm: Option<ConfirmInfo>,
    pub notifications: Vec<NotificationItem>,
    pub footer: FooterInfo,
}

/// Tab bar plus status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub tabs: Vec<TabInfo>,
    /// Active task filters, shown on the tasks view.
    pub filter_label: Option<String>,
    /// A refresh is in flight.
    pub loading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabInfo {
    pub title: String,
    pub is_active: bool,
}

/// The main area for the active view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyViewModel {
    Dashboard {
        stats: StatsInfo,
        tasks: TaskListInfo,
        users: UserListInfo,
    },
    Tasks {
        tasks: TaskListInfo,
    },
    Users {
        users: UserListInfo,
    },
}

/// Counters from the last completed full refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsInfo {
    pub todo: usize,
    pub in_progress: usize,
    pub done: usize,
    pub users: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListInfo {
    pub title: String,
    pub cards: Vec<TaskCard>,
    /// Placeholder text when `cards` is empty.
    pub empty_message: Option<String>,
}

/// One task row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCard {
    pub id: i64,
    pub status: TaskStatus,
    pub indicator: String,
    pub title: String,
    pub priority: Priority,
    pub assignee: Option<String>,
    pub due: Option<String>,
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserListInfo {
    pub title: String,
    pub items: Vec<UserItem>,
    pub empty_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserItem {
    pub name: String,
    pub email: String,
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    /// Keys go to the query (as opposed to the results panel).
    pub is_typing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResultItem {
    pub label: String,
    /// Character ranges of `label` to highlight.
    pub highlight_ranges: Vec<(usize, usize)>,
    pub is_selected: bool,
}

/// An open form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalViewModel {
    pub title: String,
    pub fields: Vec<FormFieldView>,
    pub error: Option<String>,
    pub submitting: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldView {
    pub label: String,
    pub value: String,
    pub is_focused: bool,
    /// Cycled with left/right instead of typed.
    pub is_choice: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmInfo {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationItem {
    pub message: String,
    pub kind: NotificationKind,
}

/// Keybinding hints for the current mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}
