//! Side effects requested by the event handler.
//!
//! [`handle_event`](super::handle_event) only mutates [`AppState`](super::AppState);
//! anything that leaves the process is returned as an [`Action`] and carried
//! out by the event loop in `main.rs`.

use crate::worker::WorkerMessage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hand a request to the API worker.
    PostToWorker(WorkerMessage),

    /// Leave the event loop and restore the terminal.
    Quit,
}
