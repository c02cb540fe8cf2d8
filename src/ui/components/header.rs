//! Tab bar with the active filters and a loading marker.

use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub const HEIGHT: u16 = 2;

pub fn render_header(frame: &mut Frame, area: Rect, header: &HeaderInfo, theme: &Theme) {
    let mut spans = vec![Span::styled(" taskdeck ", theme.header())];
    for tab in &header.tabs {
        spans.push(Span::raw(" "));
        let style = if tab.is_active {
            Theme::fg(&theme.colors.tab_active).add_modifier(Modifier::BOLD)
        } else {
            theme.dim()
        };
        spans.push(Span::styled(format!("[{}]", tab.title), style));
    }

    let mut status = Vec::new();
    if let Some(filters) = &header.filter_label {
        status.push(Span::styled(filters.clone(), theme.dim()));
    }
    if header.loading {
        status.push(Span::styled("  loading… ", theme.dim()));
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(theme.border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
    frame.render_widget(
        Paragraph::new(Line::from(status)).alignment(Alignment::Right),
        inner,
    );
}
