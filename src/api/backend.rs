//! Backend abstraction for the task API.
//!
//! The [`TaskBackend`] trait lists exactly the seven calls the dashboard makes.
//! The worker only talks to this trait, so the HTTP client can be swapped for
//! an in-memory fake in tests.

use crate::domain::{NewUser, Result, Task, TaskFilter, TaskRequest, TaskStatus, User};
use futures_util::future::BoxFuture;

/// Remote operations available to the dashboard.
///
/// Every method issues exactly one request. Lists are capped at
/// [`PAGE_SIZE`](crate::api::PAGE_SIZE) items.
pub trait TaskBackend: Send + Sync {
    /// `GET /users?size=100`.
    fn list_users(&self) -> BoxFuture<'_, Result<Vec<User>>>;

    /// `GET /tasks?size=100[&status=S][&priority=P]`.
    fn list_tasks(&self, filter: TaskFilter) -> BoxFuture<'_, Result<Vec<Task>>>;

    /// `POST /tasks`.
    fn create_task<'a>(&'a self, body: &'a TaskRequest) -> BoxFuture<'a, Result<Task>>;

    /// `PUT /tasks/{id}`: full replace.
    fn update_task<'a>(&'a self, id: i64, body: &'a TaskRequest) -> BoxFuture<'a, Result<Task>>;

    /// `PATCH /tasks/{id}/status`.
    fn patch_task_status(&self, id: i64, status: TaskStatus) -> BoxFuture<'_, Result<Task>>;

    /// `DELETE /tasks/{id}`.
    fn delete_task(&self, id: i64) -> BoxFuture<'_, Result<()>>;

    /// `POST /users`.
    fn create_user<'a>(&'a self, body: &'a NewUser) -> BoxFuture<'a, Result<User>>;
}
