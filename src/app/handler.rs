//! Event handling and state transition logic.
//!
//! Every input (a key mapped by the event loop, a clock tick, or a worker
//! response) becomes an [`Event`]. [`handle_event`] applies it to the
//! [`AppState`] and returns whether the screen must be redrawn together with
//! the side effects to run.
//!
//! Writes follow one protocol: post the request, and when it succeeds report
//! it and run a full refresh. Nothing is changed locally before the server
//! has answered.

use super::form::{Modal, TaskForm, UserForm};
use super::modes::{InputMode, SearchFocus, View};
use super::notifications::NotificationKind;
use super::search::SearchTarget;
use crate::app::{Action, AppState};
use crate::domain::{ApiFailure, Result, Task, TaskFilter, User};
use crate::worker::{Mutation, RequestId, WorkerMessage, WorkerResponse};
use std::time::Instant;

/// Events triggered by user input, the clock, or worker responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// First event of the session; loads both collections.
    Init,

    /// Shows a view and refreshes everything.
    SwitchView(View),
    NextView,
    PrevView,

    /// Moves the cursor of the focused list.
    SelectNext,
    SelectPrev,

    /// Advances the selected task's status (TODO -> IN_PROGRESS -> DONE -> TODO).
    ToggleStatus,
    /// Opens the edit form for the selected task.
    EditSelected,
    /// Asks for confirmation before deleting the selected task.
    RequestDelete,
    ConfirmDelete,
    CancelDelete,

    NewTask,
    NewUser,

    CycleStatusFilter,
    CyclePriorityFilter,
    ClearFilters,

    Refresh,

    /// Enters search mode with an empty query.
    SearchMode,
    /// Moves focus from the results panel back to the query.
    FocusSearchBar,
    /// Moves focus from the query to the results panel.
    FocusResults,
    /// Leaves search mode and clears the query.
    ExitSearch,
    /// Opens the highlighted search result.
    OpenSearchResult,

    /// Text input for the query or the focused form field.
    Char(char),
    Backspace,

    NextField,
    PrevField,
    /// Changes the focused choice field of the task form.
    CycleChoice {
        forward: bool,
    },
    SubmitForm,
    CloseModal,

    /// Clock tick from the event loop; expires notifications.
    Tick(Instant),

    Quit,

    /// A response from the API worker.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates application state, and returns
/// `(needs_render, actions)`.
///
/// # Errors
///
/// Currently infallible; the signature leaves room for handlers that fail.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Init | Event::Refresh => Ok((true, vec![refresh(state)])),

        Event::SwitchView(view) => Ok(switch_view(state, *view)),
        Event::NextView | Event::PrevView => {
            let view = if matches!(event, Event::NextView) {
                state.view.next()
            } else {
                state.view.prev()
            };
            Ok(switch_view(state, view))
        }

        Event::SelectNext | Event::SelectPrev => {
            let down = matches!(event, Event::SelectNext);
            match state.input_mode {
                InputMode::Search(SearchFocus::Navigating) => {
                    let len = state.search_hits().len();
                    if len > 0 {
                        state.search_selected = if down {
                            (state.search_selected + 1) % len
                        } else {
                            (state.search_selected + len - 1) % len
                        };
                    }
                }
                InputMode::Normal if down => state.move_selection_down(),
                InputMode::Normal => state.move_selection_up(),
                _ => return Ok((false, vec![])),
            }
            Ok((true, vec![]))
        }

        Event::ToggleStatus => {
            if state.input_mode != InputMode::Normal {
                return Ok((false, vec![]));
            }
            let Some(task) = state.selected_task() else {
                tracing::debug!("no task selected to toggle");
                return Ok((false, vec![]));
            };
            let (id, status) = (task.id, task.status.next());
            tracing::debug!(task_id = id, next_status = %status, "toggling task status");

            let request_id = state.begin_mutation();
            Ok((
                false,
                vec![Action::PostToWorker(WorkerMessage::patch_task_status(
                    request_id, id, status,
                ))],
            ))
        }

        Event::EditSelected => {
            if state.input_mode != InputMode::Normal {
                return Ok((false, vec![]));
            }
            let Some(task) = state.selected_task() else {
                return Ok((false, vec![]));
            };
            let form = TaskForm::edit(task);
            open_modal(state, Modal::Task(form));
            Ok((true, vec![]))
        }

        Event::RequestDelete => {
            if state.input_mode != InputMode::Normal {
                return Ok((false, vec![]));
            }
            let Some(task_id) = state.selected_task().map(|t| t.id) else {
                return Ok((false, vec![]));
            };
            state.input_mode = InputMode::ConfirmDelete { task_id };
            Ok((true, vec![]))
        }

        Event::ConfirmDelete => {
            let InputMode::ConfirmDelete { task_id } = state.input_mode else {
                return Ok((false, vec![]));
            };
            state.input_mode = InputMode::Normal;
            tracing::debug!(task_id, "deleting task");

            let request_id = state.begin_mutation();
            Ok((
                true,
                vec![Action::PostToWorker(WorkerMessage::delete_task(
                    request_id, task_id,
                ))],
            ))
        }

        Event::CancelDelete => {
            if !matches!(state.input_mode, InputMode::ConfirmDelete { .. }) {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }

        Event::NewTask => {
            if state.input_mode != InputMode::Normal {
                return Ok((false, vec![]));
            }
            open_modal(state, Modal::Task(TaskForm::create()));
            Ok((true, vec![]))
        }

        Event::NewUser => {
            if state.input_mode != InputMode::Normal {
                return Ok((false, vec![]));
            }
            open_modal(state, Modal::User(UserForm::default()));
            Ok((true, vec![]))
        }

        Event::CycleStatusFilter | Event::CyclePriorityFilter | Event::ClearFilters => {
            if state.input_mode != InputMode::Normal || state.view != View::Tasks {
                return Ok((false, vec![]));
            }
            match event {
                Event::CycleStatusFilter => state.filter.cycle_status(),
                Event::CyclePriorityFilter => state.filter.cycle_priority(),
                _ if state.filter.is_empty() => return Ok((false, vec![])),
                _ => state.filter = TaskFilter::default(),
            }
            state.selected_index = 0;
            Ok((true, vec![Action::PostToWorker(state.begin_fetch_tasks())]))
        }

        Event::SearchMode => {
            if state.input_mode != InputMode::Normal {
                return Ok((false, vec![]));
            }
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            state.search_query.clear();
            state.search_selected = 0;
            Ok((true, vec![]))
        }

        Event::FocusSearchBar => {
            if !matches!(state.input_mode, InputMode::Search(_)) {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }

        Event::FocusResults => {
            if !matches!(state.input_mode, InputMode::Search(_)) || state.search_hits().is_empty()
            {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Search(SearchFocus::Navigating);
            state.clamp_search_selection();
            Ok((true, vec![]))
        }

        Event::ExitSearch => {
            if !matches!(state.input_mode, InputMode::Search(_)) {
                return Ok((false, vec![]));
            }
            tracing::debug!(query = %state.search_query, "exiting search mode");
            exit_search(state);
            Ok((true, vec![]))
        }

        Event::OpenSearchResult => {
            if !matches!(state.input_mode, InputMode::Search(_)) {
                return Ok((false, vec![]));
            }
            let hit = state.search_hits().into_iter().nth(state.search_selected);
            match hit.map(|h| h.target) {
                Some(SearchTarget::Task(id)) => {
                    let Some(form) = state.task(id).map(TaskForm::edit) else {
                        return Ok((false, vec![]));
                    };
                    exit_search(state);
                    open_modal(state, Modal::Task(form));
                    Ok((true, vec![]))
                }
                Some(SearchTarget::User(id)) => {
                    tracing::debug!(user_id = id, "user results have no action");
                    Ok((false, vec![]))
                }
                None => Ok((false, vec![])),
            }
        }

        Event::Char(c) => match (state.input_mode, state.modal.as_mut()) {
            (InputMode::Search(SearchFocus::Typing), _) => {
                state.search_query.push(*c);
                state.search_selected = 0;
                tracing::trace!(query = %state.search_query, "search query updated");
                Ok((true, vec![]))
            }
            (InputMode::Form, Some(Modal::Task(form))) => {
                form.insert_char(*c);
                Ok((true, vec![]))
            }
            (InputMode::Form, Some(Modal::User(form))) => {
                form.insert_char(*c);
                Ok((true, vec![]))
            }
            _ => Ok((false, vec![])),
        },

        Event::Backspace => match (state.input_mode, state.modal.as_mut()) {
            (InputMode::Search(SearchFocus::Typing), _) => {
                state.search_query.pop();
                state.search_selected = 0;
                Ok((true, vec![]))
            }
            (InputMode::Form, Some(Modal::Task(form))) => {
                form.backspace();
                Ok((true, vec![]))
            }
            (InputMode::Form, Some(Modal::User(form))) => {
                form.backspace();
                Ok((true, vec![]))
            }
            _ => Ok((false, vec![])),
        },

        Event::NextField | Event::PrevField => {
            let forward = matches!(event, Event::NextField);
            match state.modal.as_mut() {
                Some(Modal::Task(form)) if forward => form.focus_next(),
                Some(Modal::Task(form)) => form.focus_prev(),
                Some(Modal::User(form)) if forward => form.focus_next(),
                Some(Modal::User(form)) => form.focus_prev(),
                None => return Ok((false, vec![])),
            }
            Ok((true, vec![]))
        }

        Event::CycleChoice { forward } => {
            let Some(Modal::Task(form)) = state.modal.as_mut() else {
                return Ok((false, vec![]));
            };
            form.cycle_choice(*forward, &state.users);
            Ok((true, vec![]))
        }

        Event::SubmitForm => Ok(submit_form(state)),

        Event::CloseModal => {
            if state.modal.is_none() {
                return Ok((false, vec![]));
            }
            close_modal(state);
            Ok((true, vec![]))
        }

        Event::Tick(now) => {
            state.now = *now;
            state.today = chrono::Local::now().date_naive();
            Ok((state.notifications.prune(*now), vec![]))
        }

        Event::Quit => Ok((false, vec![Action::Quit])),

        Event::WorkerResponse(response) => Ok(handle_response(state, response)),
    }
}

fn refresh(state: &mut AppState) -> Action {
    Action::PostToWorker(state.begin_refresh())
}

fn switch_view(state: &mut AppState, view: View) -> (bool, Vec<Action>) {
    if state.input_mode != InputMode::Normal {
        return (false, vec![]);
    }
    tracing::debug!(from = ?state.view, to = ?view, "switching view");
    state.view = view;
    state.selected_index = 0;
    (true, vec![refresh(state)])
}

fn open_modal(state: &mut AppState, modal: Modal) {
    state.modal = Some(modal);
    state.input_mode = InputMode::Form;
}

fn close_modal(state: &mut AppState) {
    state.modal = None;
    if state.input_mode == InputMode::Form {
        state.input_mode = InputMode::Normal;
    }
}

fn exit_search(state: &mut AppState) {
    state.input_mode = InputMode::Normal;
    state.search_query.clear();
    state.search_selected = 0;
}

fn submit_form(state: &mut AppState) -> (bool, Vec<Action>) {
    match state.modal.as_ref().map(Modal::pending) {
        None => return (false, vec![]),
        Some(Some(request_id)) => {
            tracing::debug!(request_id, "form submission already in flight");
            return (false, vec![]);
        }
        Some(None) => {}
    }

    let request_id = state.begin_mutation();
    let Some(modal) = state.modal.as_mut() else {
        return (false, vec![]);
    };

    let outcome = match &*modal {
        Modal::Task(form) => form.to_request().map(|body| match form.task_id {
            Some(id) => WorkerMessage::update_task(request_id, id, body),
            None => WorkerMessage::create_task(request_id, body),
        }),
        Modal::User(form) => form
            .to_request()
            .map(|body| WorkerMessage::create_user(request_id, body)),
    };

    match outcome {
        Ok(message) => {
            modal.set_error(None);
            modal.set_pending(Some(request_id));
            (true, vec![Action::PostToWorker(message)])
        }
        Err(reason) => {
            tracing::debug!(%reason, "form blocked by required fields");
            modal.set_error(Some(reason));
            (true, vec![])
        }
    }
}

fn handle_response(state: &mut AppState, response: &WorkerResponse) -> (bool, Vec<Action>) {
    match response {
        WorkerResponse::Refreshed {
            request_id,
            users,
            tasks,
        } => {
            let request_id = *request_id;
            let mut changed = false;

            if state.is_latest_users(request_id) {
                apply_users(state, users);
                changed = true;
            } else {
                tracing::debug!(request_id, "dropping stale users response");
            }

            if state.is_latest_tasks(request_id) {
                apply_tasks(state, tasks);
                changed = true;
            } else {
                tracing::debug!(request_id, "dropping superseded tasks response");
            }

            if state.is_latest_refresh(request_id) {
                state.finish_refresh();
                changed = true;
            }

            (changed, vec![])
        }

        WorkerResponse::TasksFetched { request_id, tasks } => {
            if !state.is_latest_tasks(*request_id) {
                tracing::debug!(request_id, "dropping stale tasks response");
                return (false, vec![]);
            }
            apply_tasks(state, tasks);
            (true, vec![])
        }

        WorkerResponse::MutationCompleted {
            request_id,
            mutation,
            outcome,
        } => mutation_completed(state, *request_id, *mutation, outcome),
    }
}

fn apply_users(state: &mut AppState, users: &std::result::Result<Vec<User>, ApiFailure>) {
    match users {
        Ok(users) => {
            tracing::debug!(count = users.len(), "users loaded");
            state.users.clone_from(users);
            state.clamp_selection();
            state.clamp_search_selection();
        }
        Err(failure) => {
            state.notify(
                NotificationKind::Error,
                failure.user_message("Error fetching users"),
            );
        }
    }
}

fn apply_tasks(state: &mut AppState, tasks: &std::result::Result<Vec<Task>, ApiFailure>) {
    match tasks {
        Ok(tasks) => {
            tracing::debug!(count = tasks.len(), "tasks loaded");
            state.tasks.clone_from(tasks);
            state.clamp_selection();
            state.clamp_search_selection();
        }
        Err(failure) => {
            state.notify(
                NotificationKind::Error,
                failure.user_message("Error fetching tasks"),
            );
        }
    }
}

fn mutation_completed(
    state: &mut AppState,
    request_id: RequestId,
    mutation: Mutation,
    outcome: &std::result::Result<(), ApiFailure>,
) -> (bool, Vec<Action>) {
    tracing::debug!(request_id, ?mutation, ok = outcome.is_ok(), "mutation completed");

    match mutation {
        Mutation::CreateTask | Mutation::UpdateTask { .. } | Mutation::CreateUser => {
            let owns_form = state
                .modal
                .as_ref()
                .is_some_and(|m| m.pending() == Some(request_id));

            match outcome {
                Ok(()) => {
                    let message = match mutation {
                        Mutation::CreateTask => "Task created successfully!",
                        Mutation::UpdateTask { .. } => "Task updated successfully!",
                        _ => "User created successfully!",
                    };
                    state.notify(NotificationKind::Success, message);
                    if owns_form {
                        close_modal(state);
                    }
                    (true, vec![refresh(state)])
                }
                Err(failure) => {
                    state.notify(
                        NotificationKind::Error,
                        failure.form_message("Validation failed", "Operation failed"),
                    );
                    if let Some(modal) = state.modal.as_mut().filter(|_| owns_form) {
                        modal.set_pending(None);
                    }
                    (true, vec![])
                }
            }
        }

        Mutation::ToggleStatus { .. } => match outcome {
            Ok(()) => (false, vec![refresh(state)]),
            Err(failure) => {
                state.notify(
                    NotificationKind::Error,
                    failure.user_message("Status update failed"),
                );
                (true, vec![])
            }
        },

        Mutation::DeleteTask { .. } => match outcome {
            Ok(()) => {
                state.notify(NotificationKind::Success, "Task deleted");
                (true, vec![refresh(state)])
            }
            Err(failure) => {
                state.notify(NotificationKind::Error, failure.user_message("Delete failed"));
                (true, vec![])
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Priority, TaskStatus};
    use crate::ui::Theme;
    use std::time::Duration;

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

    fn posted(actions: &[Action]) -> Vec<&WorkerMessage> {
        actions
            .iter()
            .filter_map(|a| match a {
                Action::PostToWorker(msg) => Some(msg),
                Action::Quit => None,
            })
            .collect()
    }

    /// Runs `Init` and answers it with `users` and `tasks`.
    fn loaded(users: Vec<User>, tasks: Vec<Task>) -> AppState {
        let mut state = AppState::new(Theme::default());
        let (_, actions) = handle_event(&mut state, &Event::Init).unwrap();
        let request_id = posted(&actions)[0].request_id();
        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::Refreshed {
                request_id,
                users: Ok(users),
                tasks: Ok(tasks),
            }),
        )
        .unwrap();
        state
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_event(state, &Event::Char(c)).unwrap();
        }
    }

    #[test]
    fn init_requests_full_refresh() {
        let mut state = AppState::new(Theme::default());
        let (render, actions) = handle_event(&mut state, &Event::Init).unwrap();

        assert!(render);
        assert!(matches!(
            posted(&actions)[..],
            [WorkerMessage::Refresh { .. }]
        ));
        assert!(state.loading);
    }

    #[test]
    fn toggle_posts_next_status() {
        let mut state = loaded(vec![], vec![task(7, "Ship", TaskStatus::Done)]);

        let (_, actions) = handle_event(&mut state, &Event::ToggleStatus).unwrap();

        match posted(&actions)[..] {
            [WorkerMessage::PatchTaskStatus { id, status, .. }] => {
                assert_eq!(*id, 7);
                assert_eq!(*status, TaskStatus::Todo);
            }
            ref other => panic!("unexpected messages: {other:?}"),
        }
        // Nothing changes until the server answers.
        assert_eq!(state.tasks[0].status, TaskStatus::Done);
    }

    #[test]
    fn new_task_form_posts_and_edit_form_puts() {
        let mut state = loaded(vec![], vec![task(4, "Design API", TaskStatus::Todo)]);

        handle_event(&mut state, &Event::NewTask).unwrap();
        type_text(&mut state, "Write docs");
        let (_, actions) = handle_event(&mut state, &Event::SubmitForm).unwrap();
        match posted(&actions)[..] {
            [WorkerMessage::CreateTask { body, .. }] => assert_eq!(body.title, "Write docs"),
            ref other => panic!("expected POST, got {other:?}"),
        }

        handle_event(&mut state, &Event::CloseModal).unwrap();
        handle_event(&mut state, &Event::EditSelected).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::SubmitForm).unwrap();
        match posted(&actions)[..] {
            [WorkerMessage::UpdateTask { id, body, .. }] => {
                assert_eq!(*id, 4);
                assert_eq!(body.title, "Design API");
            }
            ref other => panic!("expected PUT, got {other:?}"),
        }
    }

    #[test]
    fn blank_form_is_not_sent() {
        let mut state = loaded(vec![], vec![]);
        handle_event(&mut state, &Event::NewUser).unwrap();

        let (render, actions) = handle_event(&mut state, &Event::SubmitForm).unwrap();

        assert!(render);
        assert!(actions.is_empty());
        let vm = state.compute_viewmodel(40);
        assert_eq!(vm.modal.unwrap().error.as_deref(), Some("Name is required"));
    }

    #[test]
    fn successful_submit_closes_form_and_refreshes() {
        let mut state = loaded(vec![user(1, "Ada")], vec![]);
        handle_event(&mut state, &Event::NewUser).unwrap();
        type_text(&mut state, "Grace");
        handle_event(&mut state, &Event::NextField).unwrap();
        type_text(&mut state, "grace@example.com");
        let (_, actions) = handle_event(&mut state, &Event::SubmitForm).unwrap();
        let request_id = posted(&actions)[0].request_id();

        let (_, actions) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::MutationCompleted {
                request_id,
                mutation: Mutation::CreateUser,
                outcome: Ok(()),
            }),
        )
        .unwrap();

        assert!(state.modal.is_none());
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(matches!(
            posted(&actions)[..],
            [WorkerMessage::Refresh { .. }]
        ));
        let messages: Vec<_> = state.notifications.iter().map(|n| n.message.clone()).collect();
        assert_eq!(messages, ["User created successfully!"]);
    }

    #[test]
    fn rejected_submit_keeps_form_open_with_server_message() {
        let mut state = loaded(vec![], vec![]);
        handle_event(&mut state, &Event::NewTask).unwrap();
        type_text(&mut state, "ab");
        let (_, actions) = handle_event(&mut state, &Event::SubmitForm).unwrap();
        let request_id = posted(&actions)[0].request_id();

        let (_, actions) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::MutationCompleted {
                request_id,
                mutation: Mutation::CreateTask,
                outcome: Err(ApiFailure::Rejected {
                    status: 400,
                    message: Some("Title must be between 3 and 100 characters".to_string()),
                }),
            }),
        )
        .unwrap();

        assert!(actions.is_empty());
        assert!(matches!(state.modal, Some(Modal::Task(ref f)) if f.pending.is_none()));
        let messages: Vec<_> = state.notifications.iter().map(|n| n.message.clone()).collect();
        assert_eq!(messages, ["Title must be between 3 and 100 characters"]);
    }

    #[test]
    fn failed_task_fetch_keeps_users_and_previous_tasks() {
        let mut state = loaded(vec![user(1, "Ada")], vec![task(1, "Old", TaskStatus::Todo)]);
        let (_, actions) = handle_event(&mut state, &Event::Refresh).unwrap();
        let request_id = posted(&actions)[0].request_id();

        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::Refreshed {
                request_id,
                users: Ok(vec![user(1, "Ada"), user(2, "Grace")]),
                tasks: Err(ApiFailure::Transport("connection refused".to_string())),
            }),
        )
        .unwrap();

        assert_eq!(state.users.len(), 2);
        assert_eq!(state.tasks[0].title, "Old");
        assert_eq!(state.notifications.len(), 1);
        assert_eq!(
            state.notifications.iter().next().unwrap().message,
            "Error fetching tasks"
        );
        assert!(!state.loading);
    }

    #[test]
    fn stale_tasks_response_is_dropped() {
        let mut state = loaded(vec![], vec![]);
        let (_, actions) = handle_event(&mut state, &Event::SwitchView(View::Tasks)).unwrap();
        assert!(matches!(
            posted(&actions)[..],
            [WorkerMessage::Refresh { .. }]
        ));
        let (_, actions) = handle_event(&mut state, &Event::Refresh).unwrap();
        let refresh_id = posted(&actions)[0].request_id();
        let (_, actions) = handle_event(&mut state, &Event::CycleStatusFilter).unwrap();
        let fetch_id = posted(&actions)[0].request_id();

        // The filtered fetch answers first, the older refresh arrives late.
        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::TasksFetched {
                request_id: fetch_id,
                tasks: Ok(vec![task(1, "Todo only", TaskStatus::Todo)]),
            }),
        )
        .unwrap();
        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::Refreshed {
                request_id: refresh_id,
                users: Ok(vec![user(3, "Linus")]),
                tasks: Ok(vec![
                    task(1, "Todo only", TaskStatus::Todo),
                    task(2, "Done too", TaskStatus::Done),
                ]),
            }),
        )
        .unwrap();

        assert_eq!(state.tasks.len(), 1);
        assert_eq!(state.users[0].name, "Linus");
        assert_eq!(state.stats.todo, 1);
        assert_eq!(state.stats.users, 1);
    }

    #[test]
    fn filter_change_fetches_tasks_only() {
        let mut state = loaded(vec![], vec![]);
        handle_event(&mut state, &Event::SwitchView(View::Tasks)).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::CyclePriorityFilter).unwrap();

        match posted(&actions)[..] {
            [WorkerMessage::FetchTasks { filter, .. }] => {
                assert_eq!(filter.priority, Some(Priority::Low));
            }
            ref other => panic!("unexpected messages: {other:?}"),
        }
    }

    #[test]
    fn search_opens_matching_task_for_editing() {
        let mut state = loaded(
            vec![],
            vec![
                task(1, "Design API", TaskStatus::Todo),
                task(2, "Write docs", TaskStatus::Todo),
            ],
        );

        handle_event(&mut state, &Event::SearchMode).unwrap();
        type_text(&mut state, "design");
        let hits = state.search_hits();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].target, SearchTarget::Task(1));

        handle_event(&mut state, &Event::OpenSearchResult).unwrap();

        assert_eq!(state.input_mode, InputMode::Form);
        assert!(state.search_query.is_empty());
        assert!(matches!(state.modal, Some(Modal::Task(ref f)) if f.task_id == Some(1)));
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut state = loaded(vec![], vec![task(9, "Obsolete", TaskStatus::Todo)]);

        let (_, actions) = handle_event(&mut state, &Event::RequestDelete).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.input_mode, InputMode::ConfirmDelete { task_id: 9 });

        handle_event(&mut state, &Event::CancelDelete).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);

        handle_event(&mut state, &Event::RequestDelete).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::ConfirmDelete).unwrap();
        assert!(matches!(
            posted(&actions)[..],
            [WorkerMessage::DeleteTask { id: 9, .. }]
        ));
    }

    #[test]
    fn delete_failure_uses_fallback_text() {
        let mut state = loaded(vec![], vec![]);

        let (_, actions) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::MutationCompleted {
                request_id: 99,
                mutation: Mutation::DeleteTask { id: 1 },
                outcome: Err(ApiFailure::Rejected {
                    status: 404,
                    message: None,
                }),
            }),
        )
        .unwrap();

        assert!(actions.is_empty());
        assert_eq!(
            state.notifications.iter().next().unwrap().message,
            "Delete failed"
        );
    }

    #[test]
    fn switching_view_refreshes_everything() {
        let mut state = loaded(vec![], vec![]);

        let (render, actions) =
            handle_event(&mut state, &Event::SwitchView(View::Users)).unwrap();

        assert!(render);
        assert_eq!(state.view, View::Users);
        assert!(matches!(
            posted(&actions)[..],
            [WorkerMessage::Refresh { .. }]
        ));
        assert!(state.loading);
    }

    #[test]
    fn toggle_success_refreshes_silently() {
        let mut state = loaded(vec![], vec![task(7, "Ship", TaskStatus::Todo)]);
        let (_, actions) = handle_event(&mut state, &Event::ToggleStatus).unwrap();
        let request_id = posted(&actions)[0].request_id();

        let (_, actions) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::MutationCompleted {
                request_id,
                mutation: Mutation::ToggleStatus {
                    id: 7,
                    status: TaskStatus::InProgress,
                },
                outcome: Ok(()),
            }),
        )
        .unwrap();

        assert!(matches!(
            posted(&actions)[..],
            [WorkerMessage::Refresh { .. }]
        ));
        assert!(state.notifications.is_empty());
    }

    #[test]
    fn delete_success_notifies_and_refreshes() {
        let mut state = loaded(vec![], vec![task(9, "Obsolete", TaskStatus::Todo)]);
        handle_event(&mut state, &Event::RequestDelete).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::ConfirmDelete).unwrap();
        let request_id = posted(&actions)[0].request_id();

        let (render, actions) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::MutationCompleted {
                request_id,
                mutation: Mutation::DeleteTask { id: 9 },
                outcome: Ok(()),
            }),
        )
        .unwrap();

        assert!(render);
        assert!(matches!(
            posted(&actions)[..],
            [WorkerMessage::Refresh { .. }]
        ));
        assert_eq!(
            state.notifications.iter().next().unwrap().message,
            "Task deleted"
        );
    }

    #[test]
    fn tick_expires_notifications() {
        let mut state = loaded(vec![], vec![]);
        let start = Instant::now();
        handle_event(&mut state, &Event::Tick(start)).unwrap();
        state.notify(NotificationKind::Success, "Task deleted");

        let (render, _) =
            handle_event(&mut state, &Event::Tick(start + Duration::from_secs(1))).unwrap();
        assert!(!render);

        let (render, _) =
            handle_event(&mut state, &Event::Tick(start + Duration::from_secs(3))).unwrap();
        assert!(render);
        assert!(state.notifications.is_empty());
    }

    #[test]
    fn identical_refreshes_render_identically() {
        let users = vec![user(1, "Ada")];
        let tasks = vec![task(1, "Design API", TaskStatus::InProgress)];
        let mut state = loaded(users.clone(), tasks.clone());
        let first = state.compute_viewmodel(40);

        let (_, actions) = handle_event(&mut state, &Event::Refresh).unwrap();
        let request_id = posted(&actions)[0].request_id();
        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::Refreshed {
                request_id,
                users: Ok(users),
                tasks: Ok(tasks),
            }),
        )
        .unwrap();

        assert_eq!(state.compute_viewmodel(40), first);
    }
}
