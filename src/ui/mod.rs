//! Terminal user interface built on ratatui.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → Frame
//! ```
//!
//! - [`viewmodel`]: display-ready data for one frame
//! - [`renderer`]: entry point used by the event loop
//! - [`components`]: one ratatui drawing function per screen part
//! - [`helpers`]: highlighting, truncation and centering
//! - [`theme`]: color themes loaded from TOML

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_viewmodel};
pub use theme::Theme;
pub use viewmodel::{BodyViewModel, UIViewModel};
