//! Error types for taskdeck.
//!
//! [`TaskdeckError`] is the crate-wide error, built with `thiserror`. API
//! errors additionally have a cloneable summary, [`ApiFailure`], because they
//! have to cross the channel between the API worker and the UI thread, where
//! they are turned into notifications.

use thiserror::Error;

/// The main error type for taskdeck operations.
#[derive(Debug, Error)]
pub enum TaskdeckError {
    /// The request never produced an HTTP response (connection refused, DNS,
    /// timeout, TLS).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    ///
    /// `message` is the `message` field of the JSON error body, when the body
    /// had one.
    #[error("Request rejected with status {status}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Server supplied validation message.
        message: Option<String>,
    },

    /// A 2xx response body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or could not be read.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The API worker could not be started or reached.
    #[error("Worker communication error: {0}")]
    Worker(String),
}

impl From<reqwest::Error> for TaskdeckError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

/// A specialized `Result` type for taskdeck operations.
pub type Result<T> = std::result::Result<T, TaskdeckError>;

/// Cloneable summary of a failed API call.
///
/// Produced on the worker thread from a [`TaskdeckError`] and shipped to the UI
/// thread inside a worker response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFailure {
    /// No response was received.
    Transport(String),
    /// Non-2xx response, with the optional server message.
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Server supplied `message` field.
        message: Option<String>,
    },
    /// The response body was not what the client expected.
    Malformed(String),
}

impl ApiFailure {
    /// Text shown to the user for this failure.
    ///
    /// A server supplied message always wins. Otherwise the operation's
    /// fallback text is used; there is no distinction between 4xx and 5xx.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Rejected {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }

    /// Same as [`user_message`](Self::user_message), but with a separate
    /// fallback for rejections that carry no message.
    ///
    /// Form submissions use this: a bare rejection reads "Validation failed"
    /// while a dropped connection reads "Operation failed".
    #[must_use]
    pub fn form_message(&self, rejected_fallback: &str, failed_fallback: &str) -> String {
        match self {
            Self::Rejected { .. } => self.user_message(rejected_fallback),
            Self::Transport(_) | Self::Malformed(_) => failed_fallback.to_string(),
        }
    }
}

impl From<&TaskdeckError> for ApiFailure {
    fn from(e: &TaskdeckError) -> Self {
        match e {
            TaskdeckError::Rejected { status, message } => Self::Rejected {
                status: *status,
                message: message.clone(),
            },
            TaskdeckError::Transport(msg) => Self::Transport(msg.clone()),
            other => Self::Malformed(other.to_string()),
        }
    }
}

impl From<TaskdeckError> for ApiFailure {
    fn from(e: TaskdeckError) -> Self {
        Self::from(&e)
    }
}
