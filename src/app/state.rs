//! Application state and view model computation.
//!
//! [`AppState`] is the single source of truth for the UI. The two collections
//! it holds are verbatim snapshots of the last accepted server responses; no
//! record is ever patched locally. Everything on screen is derived from this
//! struct by [`AppState::compute_viewmodel`].
//!
//! # Request sequencing
//!
//! Each outgoing fetch gets a fresh request id, and the state remembers the
//! latest id issued per collection. A response only updates a collection when
//! its id is still the latest one for that collection, so a slow answer to an
//! old filter can never overwrite a newer one.

use super::form::{Modal, TaskField, UserField};
use super::modes::{InputMode, SearchFocus, View};
use super::notifications::{NotificationKind, Notifications};
use super::search::{search, SearchHit};
use crate::domain::{Task, TaskFilter, TaskStatus, User};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    BodyViewModel, ConfirmInfo, FooterInfo, FormFieldView, HeaderInfo, ModalViewModel,
    NotificationItem, SearchBarInfo, SearchResultItem, StatsInfo, TabInfo, TaskCard,
    TaskListInfo, UIViewModel, UserItem, UserListInfo,
};
use crate::worker::{RequestId, WorkerMessage};
use chrono::NaiveDate;
use std::time::Instant;

/// Number of tasks and users shown on the dashboard.
pub const DASHBOARD_LIMIT: usize = 5;

/// Rows taken by the tab bar, list borders and footer.
const CHROME_ROWS: usize = 6;
/// Extra rows taken by the search bar.
const SEARCH_BAR_ROWS: usize = 3;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Users from the last accepted users fetch, in server order.
    pub users: Vec<User>,

    /// Tasks from the last accepted tasks fetch, in server order.
    pub tasks: Vec<Task>,

    pub view: View,

    /// Server-side filters applied to every tasks fetch.
    pub filter: TaskFilter,

    /// Counters, recomputed only when a full refresh completes.
    pub stats: StatsInfo,

    /// Cursor within the task list of the current view (or the user list on
    /// the users view).
    pub selected_index: usize,

    pub input_mode: InputMode,

    pub search_query: String,

    /// Cursor within the search results panel.
    pub search_selected: usize,

    pub modal: Option<Modal>,

    pub notifications: Notifications,

    pub theme: Theme,

    /// Reference date for due labels.
    pub today: NaiveDate,

    /// Time of the last tick; notifications are stamped with it.
    pub now: Instant,

    /// A full refresh is in flight.
    pub loading: bool,

    next_request_id: RequestId,
    latest_users_request: Option<RequestId>,
    latest_tasks_request: Option<RequestId>,
    latest_refresh: Option<RequestId>,
}

impl AppState {
    /// Creates an empty state; data arrives with the first refresh.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            users: Vec::new(),
            tasks: Vec::new(),
            view: View::Dashboard,
            filter: TaskFilter::default(),
            stats: StatsInfo::default(),
            selected_index: 0,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            search_selected: 0,
            modal: None,
            notifications: Notifications::default(),
            theme,
            today: chrono::Local::now().date_naive(),
            now: Instant::now(),
            loading: false,
            next_request_id: 0,
            latest_users_request: None,
            latest_tasks_request: None,
            latest_refresh: None,
        }
    }

    fn next_request_id(&mut self) -> RequestId {
        self.next_request_id += 1;
        self.next_request_id
    }

    /// Allocates ids for a full refresh and returns the message to post.
    pub fn begin_refresh(&mut self) -> WorkerMessage {
        let id = self.next_request_id();
        self.latest_users_request = Some(id);
        self.latest_tasks_request = Some(id);
        self.latest_refresh = Some(id);
        self.loading = true;
        tracing::debug!(request_id = id, filter = ?self.filter, "starting full refresh");
        WorkerMessage::refresh(id, self.filter)
    }

    /// Allocates an id for a tasks-only fetch and returns the message to post.
    pub fn begin_fetch_tasks(&mut self) -> WorkerMessage {
        let id = self.next_request_id();
        self.latest_tasks_request = Some(id);
        tracing::debug!(request_id = id, filter = ?self.filter, "fetching tasks");
        WorkerMessage::fetch_tasks(id, self.filter)
    }

    /// Allocates an id for a write request.
    pub fn begin_mutation(&mut self) -> RequestId {
        self.next_request_id()
    }

    #[must_use]
    pub fn is_latest_users(&self, request_id: RequestId) -> bool {
        self.latest_users_request == Some(request_id)
    }

    #[must_use]
    pub fn is_latest_tasks(&self, request_id: RequestId) -> bool {
        self.latest_tasks_request == Some(request_id)
    }

    #[must_use]
    pub fn is_latest_refresh(&self, request_id: RequestId) -> bool {
        self.latest_refresh == Some(request_id)
    }

    /// Marks a full refresh as settled and recomputes the counters.
    pub fn finish_refresh(&mut self) {
        self.loading = false;
        self.stats = StatsInfo {
            todo: self.count_status(TaskStatus::Todo),
            in_progress: self.count_status(TaskStatus::InProgress),
            done: self.count_status(TaskStatus::Done),
            users: self.users.len(),
        };
        tracing::debug!(stats = ?self.stats, "refresh completed");
    }

    fn count_status(&self, status: TaskStatus) -> usize {
        self.tasks.iter().filter(|t| t.status == status).count()
    }

    pub fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        let now = self.now;
        self.notifications.push(kind, message, now);
    }

    /// Tasks the current view lists, in display order.
    #[must_use]
    pub fn visible_tasks(&self) -> &[Task] {
        match self.view {
            View::Dashboard => &self.tasks[..self.tasks.len().min(DASHBOARD_LIMIT)],
            View::Tasks => &self.tasks,
            View::Users => &[],
        }
    }

    fn selectable_len(&self) -> usize {
        match self.view {
            View::Users => self.users.len(),
            View::Dashboard | View::Tasks => self.visible_tasks().len(),
        }
    }

    /// The task under the cursor, when the view lists tasks.
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_tasks().get(self.selected_index)
    }

    #[must_use]
    pub fn task(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Moves the cursor down, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let len = self.selectable_len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves the cursor up, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let len = self.selectable_len();
        if len == 0 {
            return;
        }
        self.selected_index = if self.selected_index == 0 {
            len - 1
        } else {
            self.selected_index - 1
        };
    }

    /// Keeps the cursor inside the current list after data or view changes.
    pub fn clamp_selection(&mut self) {
        let len = self.selectable_len();
        self.selected_index = if len == 0 {
            0
        } else {
            self.selected_index.min(len - 1)
        };
    }

    /// Current search results.
    #[must_use]
    pub fn search_hits(&self) -> Vec<SearchHit> {
        search(&self.search_query, &self.tasks, &self.users)
    }

    pub fn clamp_search_selection(&mut self) {
        let len = self.search_hits().len();
        self.search_selected = if len == 0 {
            0
        } else {
            self.search_selected.min(len - 1)
        };
    }

    /// Computes the view model for a terminal `rows` high.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize) -> UIViewModel {
        let _span = tracing::trace_span!("compute_viewmodel", view = ?self.view).entered();

        UIViewModel {
            header: self.compute_header(),
            body: self.compute_body(rows),
            search_bar: self.compute_search_bar(),
            search_results: self.compute_search_results(),
            modal: self.compute_modal(),
            confirm: self.compute_confirm(),
            notifications: self
                .notifications
                .iter()
                .map(|n| NotificationItem {
                    message: n.message.clone(),
                    kind: n.kind,
                })
                .collect(),
            footer: self.compute_footer(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let tabs = View::ALL
            .iter()
            .enumerate()
            .map(|(idx, view)| TabInfo {
                title: format!("{} {}", idx + 1, view.title()),
                is_active: *view == self.view,
            })
            .collect();

        let filter_label = (self.view == View::Tasks).then(|| {
            format!(
                "status: {}  priority: {}",
                self.filter.status.map_or("All", |s| s.as_str()),
                self.filter.priority.map_or("All", |p| p.as_str()),
            )
        });

        HeaderInfo {
            tabs,
            filter_label,
            loading: self.loading,
        }
    }

    fn compute_body(&self, rows: usize) -> BodyViewModel {
        match self.view {
            View::Dashboard => BodyViewModel::Dashboard {
                stats: self.stats,
                tasks: self.compute_task_list("Recent Tasks", 0, self.visible_tasks().len()),
                users: self.compute_user_list(
                    "Team Members",
                    0,
                    self.users.len().min(DASHBOARD_LIMIT),
                    false,
                ),
            },
            View::Tasks => {
                let (start, end) =
                    visible_window(self.selected_index, self.tasks.len(), self.list_rows(rows));
                BodyViewModel::Tasks {
                    tasks: self.compute_task_list(
                        &format!("Tasks ({})", self.tasks.len()),
                        start,
                        end,
                    ),
                }
            }
            View::Users => {
                let (start, end) =
                    visible_window(self.selected_index, self.users.len(), self.list_rows(rows));
                BodyViewModel::Users {
                    users: self.compute_user_list(
                        &format!("Users ({})", self.users.len()),
                        start,
                        end,
                        true,
                    ),
                }
            }
        }
    }

    const fn list_rows(&self, rows: usize) -> usize {
        let chrome = match self.input_mode {
            InputMode::Search(_) => CHROME_ROWS + SEARCH_BAR_ROWS,
            _ => CHROME_ROWS,
        };
        let available = rows.saturating_sub(chrome);
        if available == 0 {
            1
        } else {
            available
        }
    }

    fn compute_task_list(&self, title: &str, start: usize, end: usize) -> TaskListInfo {
        let cards: Vec<TaskCard> = self.tasks[start..end]
            .iter()
            .enumerate()
            .map(|(offset, task)| TaskCard {
                id: task.id,
                status: task.status,
                indicator: task.status.indicator().to_string(),
                title: task.title.clone(),
                priority: task.priority,
                assignee: task.assigned_to.as_ref().map(|a| a.name.clone()),
                due: task.due_label(self.today),
                is_selected: start + offset == self.selected_index,
            })
            .collect();

        TaskListInfo {
            title: title.to_string(),
            empty_message: cards.is_empty().then(|| "No tasks found".to_string()),
            cards,
        }
    }

    fn compute_user_list(
        &self,
        title: &str,
        start: usize,
        end: usize,
        selectable: bool,
    ) -> UserListInfo {
        let items: Vec<UserItem> = self.users[start..end]
            .iter()
            .enumerate()
            .map(|(offset, user)| UserItem {
                name: user.name.clone(),
                email: user.email.clone(),
                is_selected: selectable && start + offset == self.selected_index,
            })
            .collect();

        UserListInfo {
            title: title.to_string(),
            empty_message: items.is_empty().then(|| "No users found".to_string()),
            items,
        }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        match self.input_mode {
            InputMode::Search(focus) => Some(SearchBarInfo {
                query: self.search_query.clone(),
                is_typing: focus == SearchFocus::Typing,
            }),
            _ => None,
        }
    }

    /// The results panel is hidden for an empty query and for a query
    /// without matches.
    fn compute_search_results(&self) -> Option<Vec<SearchResultItem>> {
        if !matches!(self.input_mode, InputMode::Search(_)) {
            return None;
        }

        let navigating = self.input_mode == InputMode::Search(SearchFocus::Navigating);
        let items: Vec<SearchResultItem> = self
            .search_hits()
            .into_iter()
            .enumerate()
            .map(|(idx, hit)| SearchResultItem {
                label: hit.label,
                highlight_ranges: hit.ranges,
                is_selected: navigating && idx == self.search_selected,
            })
            .collect();

        (!items.is_empty()).then_some(items)
    }

    fn compute_modal(&self) -> Option<ModalViewModel> {
        match self.modal.as_ref()? {
            Modal::Task(form) => {
                let fields = TaskField::ALL
                    .iter()
                    .map(|field| FormFieldView {
                        label: field.label().to_string(),
                        value: match field {
                            TaskField::Title => form.title.clone(),
                            TaskField::Description => form.description.clone(),
                            TaskField::Status => form.status.label().to_string(),
                            TaskField::Priority => form.priority.as_str().to_string(),
                            TaskField::DueDate => form.due_date.clone(),
                            TaskField::Assignee => form.assignee_label(&self.users),
                        },
                        is_focused: *field == form.focus,
                        is_choice: field.is_choice(),
                    })
                    .collect();

                Some(ModalViewModel {
                    title: form.heading().to_string(),
                    fields,
                    error: form.error.clone(),
                    submitting: form.pending.is_some(),
                })
            }
            Modal::User(form) => {
                let fields = UserField::ALL
                    .iter()
                    .map(|field| FormFieldView {
                        label: field.label().to_string(),
                        value: match field {
                            UserField::Name => form.name.clone(),
                            UserField::Email => form.email.clone(),
                        },
                        is_focused: *field == form.focus,
                        is_choice: false,
                    })
                    .collect();

                Some(ModalViewModel {
                    title: "Add User".to_string(),
                    fields,
                    error: form.error.clone(),
                    submitting: form.pending.is_some(),
                })
            }
        }
    }

    fn compute_confirm(&self) -> Option<ConfirmInfo> {
        let InputMode::ConfirmDelete { task_id } = self.input_mode else {
            return None;
        };

        let title = self
            .task(task_id)
            .map_or_else(|| format!("#{task_id}"), |t| format!("\"{}\"", t.title));
        Some(ConfirmInfo {
            message: format!("Are you sure you want to delete {title}? (y/n)"),
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.input_mode, self.view) {
            (InputMode::Search(SearchFocus::Typing), _) => {
                "Esc: exit search  Tab/Down: results  Enter: open  Type to search"
            }
            (InputMode::Search(SearchFocus::Navigating), _) => {
                "Esc: exit search  /: edit query  j/k: navigate  Enter: open"
            }
            (InputMode::Form, _) => {
                "Tab/S-Tab: field  Left/Right: change option  Enter: save  Esc: cancel"
            }
            (InputMode::ConfirmDelete { .. }, _) => "y: delete  n/Esc: cancel",
            (InputMode::Normal, View::Dashboard) => {
                "1-3: views  j/k: navigate  space: toggle  e: edit  d: delete  n: new task  u: new user  /: search  r: refresh  q: quit"
            }
            (InputMode::Normal, View::Tasks) => {
                "1-3: views  j/k: navigate  space: toggle  e: edit  d: delete  n: new  f/p: filter  x: clear  /: search  q: quit"
            }
            (InputMode::Normal, View::Users) => {
                "1-3: views  j/k: navigate  u: new user  /: search  r: refresh  q: quit"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Window `[start, end)` of a list of `len` rows, `available` rows high,
/// keeping `selected` near the middle.
fn visible_window(selected: usize, len: usize, available: usize) -> (usize, usize) {
    let mut start = selected.saturating_sub(available / 2);
    let end = (start + available).min(len);
    if end - start.min(end) < available && len >= available {
        start = end.saturating_sub(available);
    }
    (start.min(end), end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Priority;

    fn task(id: i64, title: &str, status: TaskStatus) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: None,
            status,
            priority: Priority::Medium,
            due_date: None,
            assigned_to: None,
        }
    }

    fn user(id: i64, name: &str) -> User {
        User {
            id,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
        }
    }

    #[test]
    fn dashboard_shows_first_five_in_server_order() {
        let mut state = AppState::new(Theme::default());
        state.tasks = (1..=8)
            .map(|id| task(id, &format!("Task {id}"), TaskStatus::Todo))
            .collect();
        state.users = (1..=7).map(|id| user(id, &format!("User{id}"))).collect();

        let vm = state.compute_viewmodel(40);

        let BodyViewModel::Dashboard { tasks, users, .. } = vm.body else {
            panic!("expected dashboard body");
        };
        let ids: Vec<i64> = tasks.cards.iter().map(|c| c.id).collect();
        assert_eq!(ids, [1, 2, 3, 4, 5]);
        assert_eq!(users.items.len(), 5);
        assert_eq!(users.items[0].name, "User1");
    }

    #[test]
    fn empty_lists_show_placeholders() {
        let state = AppState::new(Theme::default());

        let BodyViewModel::Dashboard { tasks, users, .. } = state.compute_viewmodel(40).body
        else {
            panic!("expected dashboard body");
        };
        assert_eq!(tasks.empty_message.as_deref(), Some("No tasks found"));
        assert_eq!(users.empty_message.as_deref(), Some("No users found"));
    }

    #[test]
    fn stats_only_change_when_refresh_finishes() {
        let mut state = AppState::new(Theme::default());
        state.tasks = vec![
            task(1, "a", TaskStatus::Todo),
            task(2, "b", TaskStatus::Done),
            task(3, "c", TaskStatus::Done),
        ];
        state.users = vec![user(1, "Ada")];
        assert_eq!(state.stats, StatsInfo::default());

        state.finish_refresh();

        assert_eq!(
            state.stats,
            StatsInfo {
                todo: 1,
                in_progress: 0,
                done: 2,
                users: 1
            }
        );
    }

    #[test]
    fn request_ids_are_tracked_per_collection() {
        let mut state = AppState::new(Theme::default());

        let refresh = state.begin_refresh().request_id();
        let fetch = state.begin_fetch_tasks().request_id();

        assert!(fetch > refresh);
        assert!(state.is_latest_users(refresh));
        assert!(!state.is_latest_tasks(refresh));
        assert!(state.is_latest_tasks(fetch));
    }

    #[test]
    fn results_panel_hidden_without_matches() {
        let mut state = AppState::new(Theme::default());
        state.tasks = vec![task(1, "Design API", TaskStatus::Todo)];
        state.input_mode = InputMode::Search(SearchFocus::Typing);

        assert!(state.compute_viewmodel(40).search_results.is_none());

        state.search_query = "zzz".to_string();
        let vm = state.compute_viewmodel(40);
        assert!(vm.search_results.is_none());
        assert_eq!(vm.search_bar.unwrap().query, "zzz");

        state.search_query = "api".to_string();
        let results = state.compute_viewmodel(40).search_results.unwrap();
        assert_eq!(results[0].label, "Task: Design API");
    }

    #[test]
    fn window_follows_selection() {
        assert_eq!(visible_window(0, 3, 10), (0, 3));
        assert_eq!(visible_window(0, 30, 10), (0, 10));
        assert_eq!(visible_window(15, 30, 10), (10, 20));
        assert_eq!(visible_window(29, 30, 10), (20, 30));
    }
}
