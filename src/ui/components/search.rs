//! Search bar and results panel.

use crate::ui::helpers::highlighted_spans;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{SearchBarInfo, SearchResultItem};
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, Paragraph};
use ratatui::Frame;

pub fn render_search_bar(frame: &mut Frame, area: Rect, search: &SearchBarInfo, theme: &Theme) {
    let cursor = if search.is_typing { "▏" } else { "" };
    let line = Line::from(vec![
        Span::styled(" Search: ", theme.dim()),
        Span::styled(search.query.clone(), theme.text()),
        Span::styled(cursor, theme.text()),
    ]);

    let block = Block::bordered().border_style(Theme::fg(&theme.colors.search_bar_border));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// The results panel. Only called when there is at least one result.
pub fn render_results(frame: &mut Frame, area: Rect, results: &[SearchResultItem], theme: &Theme) {
    let items: Vec<ListItem> = results
        .iter()
        .map(|item| {
            ListItem::new(Line::from(highlighted_spans(
                &item.label,
                &item.highlight_ranges,
                theme,
                item.is_selected,
            )))
        })
        .collect();

    let block = Block::bordered()
        .title(format!(" Results ({}) ", results.len()))
        .border_style(Theme::fg(&theme.colors.search_bar_border));
    frame.render_widget(List::new(items).block(block), area);
}
