//! API worker: runs backend calls off the UI thread.
//!
//! The UI thread never awaits. It posts [`WorkerMessage`]s into an unbounded
//! channel; a dedicated thread drives a tokio runtime that handles every
//! message in its own task, so independent calls overlap. Answers come back
//! over a std channel that the UI drains once per loop tick.

use crate::api::TaskBackend;
use crate::domain::{ApiFailure, Result, TaskdeckError};
use crate::worker::messages::{Mutation, TraceContext, WorkerMessage, WorkerResponse};
use futures_util::future::join;
use std::sync::{mpsc, Arc};
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tracing::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Executes worker messages against a [`TaskBackend`].
#[derive(Clone)]
pub struct ApiWorker {
    backend: Arc<dyn TaskBackend>,
}

impl ApiWorker {
    #[must_use]
    pub fn new(backend: Arc<dyn TaskBackend>) -> Self {
        Self { backend }
    }

    /// Converts a backend result, logging the outcome under `operation`.
    fn settle<T>(operation: &str, result: Result<T>) -> std::result::Result<T, ApiFailure> {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "api call succeeded");
                Ok(value)
            }
            Err(e) => {
                tracing::debug!(operation = operation, error = %e, "api call failed");
                Err(ApiFailure::from(e))
            }
        }
    }

    /// Handles one message and produces its response.
    ///
    /// The span for the call is parented on the UI span recorded in the
    /// message, when there is one.
    pub async fn handle_message(&self, message: WorkerMessage) -> WorkerResponse {
        let span = tracing::debug_span!(
            "worker_handle_message",
            message_type = message.kind(),
            request_id = message.request_id(),
        );
        if let Some(parent) = message
            .trace_context()
            .and_then(TraceContext::to_parent_context)
        {
            span.set_parent(parent);
        }

        self.dispatch(message).instrument(span).await
    }

    async fn dispatch(&self, message: WorkerMessage) -> WorkerResponse {
        let backend = self.backend.as_ref();

        match message {
            WorkerMessage::Refresh {
                request_id, filter, ..
            } => {
                let (users, tasks) =
                    join(backend.list_users(), backend.list_tasks(filter)).await;
                WorkerResponse::Refreshed {
                    request_id,
                    users: Self::settle("list users", users),
                    tasks: Self::settle("list tasks", tasks),
                }
            }

            WorkerMessage::FetchTasks {
                request_id, filter, ..
            } => WorkerResponse::TasksFetched {
                request_id,
                tasks: Self::settle("list tasks", backend.list_tasks(filter).await),
            },

            WorkerMessage::CreateTask {
                request_id, body, ..
            } => WorkerResponse::MutationCompleted {
                request_id,
                mutation: Mutation::CreateTask,
                outcome: Self::settle("create task", backend.create_task(&body).await).map(drop),
            },

            WorkerMessage::UpdateTask {
                request_id,
                id,
                body,
                ..
            } => WorkerResponse::MutationCompleted {
                request_id,
                mutation: Mutation::UpdateTask { id },
                outcome: Self::settle("update task", backend.update_task(id, &body).await)
                    .map(drop),
            },

            WorkerMessage::PatchTaskStatus {
                request_id,
                id,
                status,
                ..
            } => WorkerResponse::MutationCompleted {
                request_id,
                mutation: Mutation::ToggleStatus { id, status },
                outcome: Self::settle(
                    "patch task status",
                    backend.patch_task_status(id, status).await,
                )
                .map(drop),
            },

            WorkerMessage::DeleteTask { request_id, id, .. } => {
                WorkerResponse::MutationCompleted {
                    request_id,
                    mutation: Mutation::DeleteTask { id },
                    outcome: Self::settle("delete task", backend.delete_task(id).await),
                }
            }

            WorkerMessage::CreateUser {
                request_id, body, ..
            } => WorkerResponse::MutationCompleted {
                request_id,
                mutation: Mutation::CreateUser,
                outcome: Self::settle("create user", backend.create_user(&body).await).map(drop),
            },
        }
    }
}

/// Owning handle to the worker thread.
///
/// Dropping the handle closes the request channel and joins the thread.
pub struct WorkerHandle {
    requests: Option<UnboundedSender<WorkerMessage>>,
    responses: mpsc::Receiver<WorkerResponse>,
    thread: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    /// Starts the worker thread with its own multi-threaded runtime.
    ///
    /// # Errors
    ///
    /// Returns [`TaskdeckError::Worker`] if the runtime or the thread cannot
    /// be created.
    pub fn spawn(backend: Arc<dyn TaskBackend>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("taskdeck-api")
            .enable_all()
            .build()
            .map_err(|e| TaskdeckError::Worker(format!("failed to build runtime: {e}")))?;

        let (request_tx, mut request_rx) = unbounded_channel::<WorkerMessage>();
        let (response_tx, response_rx) = mpsc::channel::<WorkerResponse>();
        let worker = ApiWorker::new(backend);

        let thread = std::thread::Builder::new()
            .name("taskdeck-worker".to_string())
            .spawn(move || {
                runtime.block_on(async move {
                    while let Some(message) = request_rx.recv().await {
                        let worker = worker.clone();
                        let response_tx = response_tx.clone();
                        tokio::spawn(async move {
                            let response = worker.handle_message(message).await;
                            if response_tx.send(response).is_err() {
                                tracing::debug!("ui side gone, dropping worker response");
                            }
                        });
                    }
                });
                runtime.shutdown_timeout(Duration::from_millis(500));
                tracing::debug!("api worker stopped");
            })
            .map_err(|e| TaskdeckError::Worker(format!("failed to spawn worker thread: {e}")))?;

        Ok(Self {
            requests: Some(request_tx),
            responses: response_rx,
            thread: Some(thread),
        })
    }

    /// Queues a message for the worker.
    ///
    /// # Errors
    ///
    /// Returns [`TaskdeckError::Worker`] if the worker has stopped.
    pub fn post(&self, message: WorkerMessage) -> Result<()> {
        let sender = self
            .requests
            .as_ref()
            .ok_or_else(|| TaskdeckError::Worker("worker already shut down".to_string()))?;

        tracing::debug!(
            message_type = message.kind(),
            request_id = message.request_id(),
            "posting message to worker"
        );
        sender
            .send(message)
            .map_err(|_| TaskdeckError::Worker("worker channel closed".to_string()))
    }

    /// Takes every response that has arrived so far, without blocking.
    pub fn drain(&self) -> Vec<WorkerResponse> {
        self.responses.try_iter().collect()
    }

    /// Waits up to `timeout` for the next response.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<WorkerResponse> {
        self.responses.recv_timeout(timeout).ok()
    }

    /// Stops accepting work and joins the worker thread.
    pub fn shutdown(&mut self) {
        self.requests.take();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::warn!("api worker thread panicked");
            }
        }
    }
}

impl Drop for WorkerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        NewUser, Priority, Task, TaskFilter, TaskRequest, TaskStatus, User,
    };
    use futures_util::future::BoxFuture;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeBackend {
        fail_tasks: bool,
        calls: Mutex<Vec<String>>,
    }

    impl FakeBackend {
        fn record(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }

        fn task(id: i64) -> Task {
            Task {
                id,
                title: format!("Task {id}"),
                description: None,
                status: TaskStatus::Todo,
                priority: Priority::Medium,
                due_date: None,
                assigned_to: None,
            }
        }
    }

    impl TaskBackend for FakeBackend {
        fn list_users(&self) -> BoxFuture<'_, Result<Vec<User>>> {
            self.record("list_users");
            Box::pin(async {
                Ok(vec![User {
                    id: 1,
                    name: "Ada".to_string(),
                    email: "ada@example.com".to_string(),
                }])
            })
        }

        fn list_tasks(&self, filter: TaskFilter) -> BoxFuture<'_, Result<Vec<Task>>> {
            self.record(format!("list_tasks {:?}", filter.query_pairs()));
            let fail = self.fail_tasks;
            Box::pin(async move {
                if fail {
                    Err(TaskdeckError::Rejected {
                        status: 500,
                        message: None,
                    })
                } else {
                    Ok(vec![Self::task(1), Self::task(2)])
                }
            })
        }

        fn create_task<'a>(&'a self, body: &'a TaskRequest) -> BoxFuture<'a, Result<Task>> {
            self.record(format!("create_task {}", body.title));
            Box::pin(async { Ok(Self::task(3)) })
        }

        fn update_task<'a>(&'a self, id: i64, _body: &'a TaskRequest) -> BoxFuture<'a, Result<Task>> {
            self.record(format!("update_task {id}"));
            Box::pin(async move { Ok(Self::task(id)) })
        }

        fn patch_task_status(&self, id: i64, status: TaskStatus) -> BoxFuture<'_, Result<Task>> {
            self.record(format!("patch_task_status {id} {status}"));
            Box::pin(async move {
                Err(TaskdeckError::Transport("connection refused".to_string()))
            })
        }

        fn delete_task(&self, id: i64) -> BoxFuture<'_, Result<()>> {
            self.record(format!("delete_task {id}"));
            Box::pin(async { Ok(()) })
        }

        fn create_user<'a>(&'a self, body: &'a NewUser) -> BoxFuture<'a, Result<User>> {
            self.record(format!("create_user {}", body.email));
            Box::pin(async {
                Err(TaskdeckError::Rejected {
                    status: 409,
                    message: Some("Email already exists".to_string()),
                })
            })
        }
    }

    #[tokio::test]
    async fn refresh_reports_each_collection_separately() {
        let backend = Arc::new(FakeBackend {
            fail_tasks: true,
            ..FakeBackend::default()
        });
        let worker = ApiWorker::new(backend.clone());

        let response = worker
            .handle_message(WorkerMessage::refresh(5, TaskFilter::default()))
            .await;

        match response {
            WorkerResponse::Refreshed {
                request_id,
                users,
                tasks,
            } => {
                assert_eq!(request_id, 5);
                assert_eq!(users.unwrap().len(), 1);
                assert!(matches!(tasks, Err(ApiFailure::Rejected { status: 500, .. })));
            }
            other => panic!("unexpected response: {other:?}"),
        }

        let calls = backend.calls.lock().unwrap();
        assert!(calls.contains(&"list_users".to_string()));
        assert!(calls.contains(&"list_tasks []".to_string()));
    }

    #[tokio::test]
    async fn mutation_failures_keep_server_message() {
        let worker = ApiWorker::new(Arc::new(FakeBackend::default()));

        let response = worker
            .handle_message(WorkerMessage::create_user(
                9,
                NewUser {
                    name: "Ada".to_string(),
                    email: "ada@example.com".to_string(),
                },
            ))
            .await;

        assert_eq!(
            response,
            WorkerResponse::MutationCompleted {
                request_id: 9,
                mutation: Mutation::CreateUser,
                outcome: Err(ApiFailure::Rejected {
                    status: 409,
                    message: Some("Email already exists".to_string()),
                }),
            }
        );
    }

    #[tokio::test]
    async fn toggle_reports_target_status() {
        let worker = ApiWorker::new(Arc::new(FakeBackend::default()));

        let response = worker
            .handle_message(WorkerMessage::patch_task_status(3, 11, TaskStatus::Done))
            .await;

        match response {
            WorkerResponse::MutationCompleted {
                mutation, outcome, ..
            } => {
                assert_eq!(
                    mutation,
                    Mutation::ToggleStatus {
                        id: 11,
                        status: TaskStatus::Done
                    }
                );
                assert!(matches!(outcome, Err(ApiFailure::Transport(_))));
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn handle_round_trips_through_thread() {
        let backend = Arc::new(FakeBackend::default());
        let mut handle = WorkerHandle::spawn(backend.clone()).unwrap();

        handle.post(WorkerMessage::delete_task(1, 4)).unwrap();
        let response = handle
            .recv_timeout(Duration::from_secs(5))
            .expect("worker answered");

        assert_eq!(
            response,
            WorkerResponse::MutationCompleted {
                request_id: 1,
                mutation: Mutation::DeleteTask { id: 4 },
                outcome: Ok(()),
            }
        );
        assert!(handle.drain().is_empty());

        handle.shutdown();
        assert!(handle.post(WorkerMessage::delete_task(2, 4)).is_err());
        assert_eq!(backend.calls.lock().unwrap().as_slice(), ["delete_task 4"]);
    }
}
