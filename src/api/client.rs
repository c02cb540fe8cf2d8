//! HTTP implementation of [`TaskBackend`] on top of `reqwest`.
//!
//! Every request carries the same two default headers, `Content-Type:
//! application/json` and `X-API-KEY`. A non-2xx answer becomes
//! [`TaskdeckError::Rejected`], keeping the `message` field of the JSON error
//! body when there is one; nothing else in an error body is inspected.

use crate::api::backend::TaskBackend;
use crate::api::PAGE_SIZE;
use crate::domain::{
    NewUser, Page, Result, StatusUpdate, Task, TaskFilter, TaskRequest, TaskStatus, TaskdeckError,
    User,
};
use futures_util::future::BoxFuture;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::Instrument;

/// Name of the API key header (header names are case-insensitive).
pub const API_KEY_HEADER: &str = "x-api-key";

/// Error body returned by the backend on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// REST client for the task manager API.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for `base_url` (e.g. `http://localhost:8080/api`).
    ///
    /// # Errors
    ///
    /// Returns [`TaskdeckError::Config`] if the API key is not a valid header
    /// value or the HTTP client cannot be built.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let key = HeaderValue::from_str(api_key)
            .map_err(|e| TaskdeckError::Config(format!("invalid API key: {e}")))?;
        headers.insert(HeaderName::from_static(API_KEY_HEADER), key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| TaskdeckError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sends a request and maps non-2xx answers to [`TaskdeckError::Rejected`].
    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let request = request.build()?;
        let span = tracing::debug_span!(
            "api_request",
            http.method = %request.method(),
            http.path = %request.url().path(),
            http.status_code = tracing::field::Empty,
        );

        async move {
            let response = self.http.execute(request).await.map_err(|e| {
                tracing::warn!(error = %e, "request failed before a response arrived");
                TaskdeckError::Transport(e.to_string())
            })?;

            let status = response.status();
            tracing::Span::current().record("http.status_code", status.as_u16());

            if status.is_success() {
                return Ok(response);
            }

            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message);

            tracing::warn!(status = status.as_u16(), message = ?message, "request rejected");
            Err(TaskdeckError::Rejected {
                status: status.as_u16(),
                message,
            })
        }
        .instrument(span)
        .await
    }

    async fn json<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = self.execute(request).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| TaskdeckError::Decode(e.to_string()))
    }

    /// Lists users (first page of [`PAGE_SIZE`]).
    ///
    /// # Errors
    ///
    /// Transport, rejection or decode failures.
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let request = self.http.get(self.url("/users")).query(&[("size", PAGE_SIZE)]);
        let page: Page<User> = self.json(request).await?;
        Ok(page.into_content())
    }

    /// Lists tasks matching `filter` (first page of [`PAGE_SIZE`]).
    ///
    /// # Errors
    ///
    /// Transport, rejection or decode failures.
    pub async fn list_tasks(&self, filter: TaskFilter) -> Result<Vec<Task>> {
        let request = self
            .http
            .get(self.url("/tasks"))
            .query(&[("size", PAGE_SIZE)])
            .query(&filter.query_pairs());
        let page: Page<Task> = self.json(request).await?;
        Ok(page.into_content())
    }

    /// Creates a task.
    ///
    /// # Errors
    ///
    /// Transport, rejection (validation) or decode failures.
    pub async fn create_task(&self, body: &TaskRequest) -> Result<Task> {
        self.json(self.http.post(self.url("/tasks")).json(body)).await
    }

    /// Replaces task `id` with `body`.
    ///
    /// # Errors
    ///
    /// Transport, rejection (validation, unknown id) or decode failures.
    pub async fn update_task(&self, id: i64, body: &TaskRequest) -> Result<Task> {
        self.json(self.http.put(self.url(&format!("/tasks/{id}"))).json(body))
            .await
    }

    /// Sets the status of task `id`.
    ///
    /// # Errors
    ///
    /// Transport, rejection or decode failures.
    pub async fn patch_task_status(&self, id: i64, status: TaskStatus) -> Result<Task> {
        let request = self
            .http
            .patch(self.url(&format!("/tasks/{id}/status")))
            .json(&StatusUpdate { status });
        self.json(request).await
    }

    /// Deletes task `id`. The (empty) response body is ignored.
    ///
    /// # Errors
    ///
    /// Transport or rejection failures.
    pub async fn delete_task(&self, id: i64) -> Result<()> {
        self.execute(self.http.delete(self.url(&format!("/tasks/{id}"))))
            .await
            .map(drop)
    }

    /// Creates a user.
    ///
    /// # Errors
    ///
    /// Transport, rejection (validation, duplicate email) or decode failures.
    pub async fn create_user(&self, body: &NewUser) -> Result<User> {
        self.json(self.http.post(self.url("/users")).json(body)).await
    }
}

impl TaskBackend for ApiClient {
    fn list_users(&self) -> BoxFuture<'_, Result<Vec<User>>> {
        Box::pin(Self::list_users(self))
    }

    fn list_tasks(&self, filter: TaskFilter) -> BoxFuture<'_, Result<Vec<Task>>> {
        Box::pin(Self::list_tasks(self, filter))
    }

    fn create_task<'a>(&'a self, body: &'a TaskRequest) -> BoxFuture<'a, Result<Task>> {
        Box::pin(Self::create_task(self, body))
    }

    fn update_task<'a>(&'a self, id: i64, body: &'a TaskRequest) -> BoxFuture<'a, Result<Task>> {
        Box::pin(Self::update_task(self, id, body))
    }

    fn patch_task_status(&self, id: i64, status: TaskStatus) -> BoxFuture<'_, Result<Task>> {
        Box::pin(Self::patch_task_status(self, id, status))
    }

    fn delete_task(&self, id: i64) -> BoxFuture<'_, Result<()>> {
        Box::pin(Self::delete_task(self, id))
    }

    fn create_user<'a>(&'a self, body: &'a NewUser) -> BoxFuture<'a, Result<User>> {
        Box::pin(Self::create_user(self, body))
    }
}
