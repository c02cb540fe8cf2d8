//! Request/response protocol between the UI thread and the API worker.
//!
//! Every request carries a `request_id` that the UI allocates and the worker
//! echoes back, so the UI can discard answers that were overtaken by a newer
//! request for the same collection. Requests also carry the caller's trace
//! context so worker spans link to the UI span that caused them.

use crate::domain::{ApiFailure, NewUser, Task, TaskFilter, TaskRequest, TaskStatus, User};
use serde::{Deserialize, Serialize};

/// Identifier the UI assigns to a request; strictly increasing per session.
pub type RequestId = u64;

/// OpenTelemetry trace and span ids captured on the UI thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// Trace id as 32 hex digits.
    pub trace_id: String,

    /// Span id of the UI span, as 16 hex digits.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the context of the active span, if it is a valid one.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Rebuilds a remote parent context for spans on the worker side.
    ///
    /// Returns `None` when either id is not valid hex.
    #[must_use]
    pub fn to_parent_context(&self) -> Option<opentelemetry::Context> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;
        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(opentelemetry::Context::new().with_remote_span_context(span_context))
    }
}

/// Generates `WorkerMessage` constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Creates a `", stringify!($variant), "` message carrying the current trace context.")]
                #[must_use]
                pub fn $builder_name(request_id: RequestId, $($field: $ty),*) -> Self {
                    Self::$variant {
                        request_id,
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    refresh(Refresh { filter: TaskFilter }),
    fetch_tasks(FetchTasks { filter: TaskFilter }),
    create_task(CreateTask { body: TaskRequest }),
    update_task(UpdateTask { id: i64, body: TaskRequest }),
    patch_task_status(PatchTaskStatus { id: i64, status: TaskStatus }),
    delete_task(DeleteTask { id: i64 }),
    create_user(CreateUser { body: NewUser }),
}

/// Requests sent from the UI thread to the API worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerMessage {
    /// Fetch users and tasks concurrently.
    Refresh {
        request_id: RequestId,
        filter: TaskFilter,
        trace_context: Option<TraceContext>,
    },

    /// Fetch tasks only (filter changes).
    FetchTasks {
        request_id: RequestId,
        filter: TaskFilter,
        trace_context: Option<TraceContext>,
    },

    /// `POST /tasks`.
    CreateTask {
        request_id: RequestId,
        body: TaskRequest,
        trace_context: Option<TraceContext>,
    },

    /// `PUT /tasks/{id}`.
    UpdateTask {
        request_id: RequestId,
        id: i64,
        body: TaskRequest,
        trace_context: Option<TraceContext>,
    },

    /// `PATCH /tasks/{id}/status`.
    PatchTaskStatus {
        request_id: RequestId,
        id: i64,
        status: TaskStatus,
        trace_context: Option<TraceContext>,
    },

    /// `DELETE /tasks/{id}`.
    DeleteTask {
        request_id: RequestId,
        id: i64,
        trace_context: Option<TraceContext>,
    },

    /// `POST /users`.
    CreateUser {
        request_id: RequestId,
        body: NewUser,
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    #[must_use]
    pub const fn request_id(&self) -> RequestId {
        match self {
            Self::Refresh { request_id, .. }
            | Self::FetchTasks { request_id, .. }
            | Self::CreateTask { request_id, .. }
            | Self::UpdateTask { request_id, .. }
            | Self::PatchTaskStatus { request_id, .. }
            | Self::DeleteTask { request_id, .. }
            | Self::CreateUser { request_id, .. } => *request_id,
        }
    }

    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::Refresh { trace_context, .. }
            | Self::FetchTasks { trace_context, .. }
            | Self::CreateTask { trace_context, .. }
            | Self::UpdateTask { trace_context, .. }
            | Self::PatchTaskStatus { trace_context, .. }
            | Self::DeleteTask { trace_context, .. }
            | Self::CreateUser { trace_context, .. } => trace_context.as_ref(),
        }
    }

    /// Short name used as a span field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Refresh { .. } => "refresh",
            Self::FetchTasks { .. } => "fetch_tasks",
            Self::CreateTask { .. } => "create_task",
            Self::UpdateTask { .. } => "update_task",
            Self::PatchTaskStatus { .. } => "patch_task_status",
            Self::DeleteTask { .. } => "delete_task",
            Self::CreateUser { .. } => "create_user",
        }
    }
}

/// Which write a [`WorkerResponse::MutationCompleted`] reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    CreateTask,
    UpdateTask { id: i64 },
    ToggleStatus { id: i64, status: TaskStatus },
    DeleteTask { id: i64 },
    CreateUser,
}

/// Answers sent from the API worker back to the UI thread.
///
/// Each collection result is independent: a refresh where only one call
/// failed still delivers the other collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerResponse {
    /// Both halves of a refresh have settled.
    Refreshed {
        request_id: RequestId,
        users: Result<Vec<User>, ApiFailure>,
        tasks: Result<Vec<Task>, ApiFailure>,
    },

    /// A tasks-only fetch has settled.
    TasksFetched {
        request_id: RequestId,
        tasks: Result<Vec<Task>, ApiFailure>,
    },

    /// A create, update, status or delete call has settled.
    MutationCompleted {
        request_id: RequestId,
        mutation: Mutation,
        outcome: Result<(), ApiFailure>,
    },
}

impl WorkerResponse {
    #[must_use]
    pub const fn request_id(&self) -> RequestId {
        match self {
            Self::Refreshed { request_id, .. }
            | Self::TasksFetched { request_id, .. }
            | Self::MutationCompleted { request_id, .. } => *request_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_keep_request_id() {
        let msg = WorkerMessage::delete_task(42, 7);
        assert_eq!(msg.request_id(), 42);
        assert_eq!(msg.kind(), "delete_task");
        // No subscriber is installed, so there is no span to capture.
        assert!(msg.trace_context().is_none());
    }

    #[test]
    fn every_response_carries_its_request_id() {
        let refreshed = WorkerResponse::Refreshed {
            request_id: 3,
            users: Ok(vec![]),
            tasks: Ok(vec![]),
        };
        let fetched = WorkerResponse::TasksFetched {
            request_id: 4,
            tasks: Ok(vec![]),
        };
        let completed = WorkerResponse::MutationCompleted {
            request_id: 5,
            mutation: Mutation::DeleteTask { id: 1 },
            outcome: Ok(()),
        };

        assert_eq!(refreshed.request_id(), 3);
        assert_eq!(fetched.request_id(), 4);
        assert_eq!(completed.request_id(), 5);
    }

    #[test]
    fn parent_context_rejects_bad_hex() {
        let bad = TraceContext {
            trace_id: "not-hex".to_string(),
            parent_span_id: "00f067aa0ba902b7".to_string(),
        };
        assert!(bad.to_parent_context().is_none());

        let good = TraceContext {
            trace_id: "4bf92f3577b34da6a3ce929d0e0e4736".to_string(),
            parent_span_id: "00f067aa0ba902b7".to_string(),
        };
        assert!(good.to_parent_context().is_some());
    }
}
