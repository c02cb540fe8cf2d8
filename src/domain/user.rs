//! User domain model and the list envelope shared by both collections.

use serde::{Deserialize, Serialize};

/// A user as returned by the server. The dashboard only lists and creates
/// users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Body of `POST /users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// Paged list envelope returned by `GET /users` and `GET /tasks`.
///
/// Only `content` is used; the paging counters are decoded when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default)]
    pub content: Option<Vec<T>>,
    #[serde(default)]
    pub page_number: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub total_elements: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

impl<T> Page<T> {
    /// The page items; a missing or `null` `content` is an empty list.
    #[must_use]
    pub fn into_content(self) -> Vec<T> {
        self.content.unwrap_or_default()
    }
}
