//! Access to the task manager REST API.
//!
//! - [`backend`]: the [`TaskBackend`] trait the worker is written against
//! - [`client`]: the `reqwest` implementation, [`ApiClient`]

pub mod backend;
pub mod client;

pub use backend::TaskBackend;
pub use client::{ApiClient, API_KEY_HEADER};

/// Fixed page size for both list endpoints.
pub const PAGE_SIZE: u32 = 100;
