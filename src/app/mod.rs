//! Application layer coordinating state, events, and actions.
//!
//! Data flows one way:
//!
//! ```text
//! key / tick / worker response → Event → handle_event → AppState → Actions
//!                                                          │
//!                                                  compute_viewmodel → ui
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effects returned by the handler
//! - [`handler`]: event processing and the refresh protocol
//! - [`modes`]: view and input mode types
//! - [`state`]: the state container and view model computation
//! - [`form`]: task and user forms
//! - [`search`]: client-side search
//! - [`notifications`]: timed notifications

pub mod actions;
pub mod form;
pub mod handler;
pub mod modes;
pub mod notifications;
pub mod search;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{InputMode, SearchFocus, View};
pub use state::AppState;
