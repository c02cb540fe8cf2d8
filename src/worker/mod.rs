//! Background worker for REST calls.
//!
//! The UI thread only ever posts messages and drains responses; all network
//! I/O happens on the worker's tokio runtime. Messages carry the caller's
//! trace context so worker spans join the UI trace.
//!
//! # Architecture
//!
//! - `messages`: request/response protocol with request ids and trace context
//! - `handler`: [`ApiWorker`] message processing and the [`WorkerHandle`] thread

pub mod handler;
pub mod messages;

pub use handler::{ApiWorker, WorkerHandle};
pub use messages::{Mutation, RequestId, TraceContext, WorkerMessage, WorkerResponse};
