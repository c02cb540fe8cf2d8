//! Domain layer: the server-owned records the dashboard displays and the
//! error types shared across the crate.
//!
//! - [`error`]: error types and result alias
//! - [`task`]: tasks, statuses, priorities, filters and request bodies
//! - [`user`]: users and the paged list envelope

pub mod error;
pub mod task;
pub mod user;

pub use error::{ApiFailure, Result, TaskdeckError};
pub use task::{Assignee, Priority, StatusUpdate, Task, TaskFilter, TaskRequest, TaskStatus};
pub use user::{NewUser, Page, User};
