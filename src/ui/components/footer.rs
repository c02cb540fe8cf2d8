//! Keybinding hints.

use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;
use ratatui::layout::Rect;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub fn render_footer(frame: &mut Frame, area: Rect, footer: &FooterInfo, theme: &Theme) {
    frame.render_widget(
        Paragraph::new(format!(" {}", footer.keybindings)).style(theme.dim()),
        area,
    );
}
