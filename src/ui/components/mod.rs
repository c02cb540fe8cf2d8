//! Composable UI components.
//!
//! Each component draws one part of the view model into the area it is
//! given. Layout is decided by [`render_layout`], which is the only place
//! that knows how the parts are arranged:
//!
//! ```text
//! ┌ tabs ──────────────────────────── filters / loading ┐
//! │ search bar (search mode only)                       │
//! │ results panel (only with matches)                   │
//! │ body: dashboard | task list | user list             │
//! └ footer ─────────────────────────────────────────────┘
//!   + modal / confirm dialog / notifications on top
//! ```

mod empty;
mod footer;
mod header;
mod modal;
mod notifications;
mod search;
mod stats;
mod table;

use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BodyViewModel, UIViewModel};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::Frame;

const SEARCH_BAR_HEIGHT: u16 = 3;
const STATS_HEIGHT: u16 = 3;
/// Upper bound for the results panel, borders included.
const RESULTS_MAX_HEIGHT: u16 = 10;

/// Draws the whole view model into `area`.
pub fn render_layout(frame: &mut Frame, area: Rect, vm: &UIViewModel, theme: &Theme) {
    let search_height = if vm.search_bar.is_some() {
        SEARCH_BAR_HEIGHT
    } else {
        0
    };
    let results_height = vm.search_results.as_ref().map_or(0, |items| {
        u16::try_from(items.len() + 2)
            .unwrap_or(RESULTS_MAX_HEIGHT)
            .min(RESULTS_MAX_HEIGHT)
    });

    let [header_area, search_area, results_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(header::HEIGHT),
        Constraint::Length(search_height),
        Constraint::Length(results_height),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    header::render_header(frame, header_area, &vm.header, theme);

    if let Some(search) = &vm.search_bar {
        search::render_search_bar(frame, search_area, search, theme);
    }
    if let Some(results) = &vm.search_results {
        search::render_results(frame, results_area, results, theme);
    }

    render_body(frame, body_area, &vm.body, theme);
    footer::render_footer(frame, footer_area, &vm.footer, theme);

    if let Some(modal) = &vm.modal {
        modal::render_form(frame, area, modal, theme);
    }
    if let Some(confirm) = &vm.confirm {
        modal::render_confirm(frame, area, confirm, theme);
    }
    notifications::render_notifications(frame, area, &vm.notifications, theme);
}

fn render_body(frame: &mut Frame, area: Rect, body: &BodyViewModel, theme: &Theme) {
    match body {
        BodyViewModel::Dashboard {
            stats,
            tasks,
            users,
        } => {
            let [stats_area, lists_area] =
                Layout::vertical([Constraint::Length(STATS_HEIGHT), Constraint::Min(0)])
                    .areas(area);
            let [tasks_area, users_area] =
                Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
                    .areas(lists_area);

            stats::render_stats(frame, stats_area, stats, theme);
            table::render_task_list(frame, tasks_area, tasks, theme);
            table::render_user_list(frame, users_area, users, theme);
        }
        BodyViewModel::Tasks { tasks } => table::render_task_list(frame, area, tasks, theme),
        BodyViewModel::Users { users } => table::render_user_list(frame, area, users, theme),
    }
}
