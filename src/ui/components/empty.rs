//! Placeholder for an empty list.

use crate::ui::theme::Theme;
use ratatui::layout::{Alignment, Rect};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Draws `message` centered on the first line of `area`.
pub fn render_empty_state(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    frame.render_widget(
        Paragraph::new(message.to_string())
            .style(Theme::fg(&theme.colors.empty_state_fg))
            .alignment(Alignment::Center),
        area,
    );
}
