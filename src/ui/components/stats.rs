//! Dashboard counters.

use crate::domain::TaskStatus;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatsInfo;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

pub fn render_stats(frame: &mut Frame, area: Rect, stats: &StatsInfo, theme: &Theme) {
    let counters = [
        ("To Do", stats.todo, theme.status(TaskStatus::Todo)),
        (
            "In Progress",
            stats.in_progress,
            theme.status(TaskStatus::InProgress),
        ),
        ("Done", stats.done, theme.status(TaskStatus::Done)),
        ("Users", stats.users, theme.text()),
    ];

    let areas = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);
    for ((label, count, style), cell) in counters.into_iter().zip(areas.iter()) {
        render_counter(frame, *cell, label, count, style, theme);
    }
}

fn render_counter(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    count: usize,
    style: Style,
    theme: &Theme,
) {
    let line = Line::from(vec![
        Span::styled(count.to_string(), style.add_modifier(Modifier::BOLD)),
        Span::styled(format!(" {label}"), theme.dim()),
    ]);
    frame.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(Block::bordered().border_style(theme.border())),
        area,
    );
}
