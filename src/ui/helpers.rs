//! Shared rendering utilities.

use crate::ui::theme::Theme;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Span;

/// Splits `text` into spans, highlighting the given character ranges.
///
/// Ranges are `(start, end)` character indices, end exclusive, sorted and
/// non-overlapping. When `is_selected` is set the whole text takes the
/// selection style and no match highlighting is applied, so the two
/// backgrounds never fight.
#[must_use]
pub fn highlighted_spans(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) -> Vec<Span<'static>> {
    let base = if is_selected {
        theme.selection()
    } else {
        theme.text()
    };

    if ranges.is_empty() || is_selected {
        return vec![Span::styled(text.to_string(), base)];
    }

    let chars: Vec<char> = text.chars().collect();
    let mut spans = Vec::with_capacity(ranges.len() * 2 + 1);
    let mut current = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current || start >= end {
            continue;
        }
        if start > current {
            spans.push(Span::styled(
                chars[current..start].iter().collect::<String>(),
                base,
            ));
        }
        spans.push(Span::styled(
            chars[start..end].iter().collect::<String>(),
            theme.match_highlight(),
        ));
        current = end;
    }

    if current < chars.len() {
        spans.push(Span::styled(chars[current..].iter().collect::<String>(), base));
    }

    spans
}

/// Shortens `text` to at most `max` characters, marking the cut with `…`.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}

/// A rectangle `width` columns wide and `height` rows high, centered in
/// `area` and clipped to it.
#[must_use]
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}

/// Style for a row, given whether it is selected.
#[must_use]
pub fn row_style(theme: &Theme, is_selected: bool) -> Style {
    if is_selected {
        theme.selection()
    } else {
        theme.text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(spans: &[Span<'_>]) -> Vec<String> {
        spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn splits_around_highlights() {
        let theme = Theme::default();
        let spans = highlighted_spans("Task: Design API", &[(6, 12)], &theme, false);

        assert_eq!(texts(&spans), ["Task: ", "Design", " API"]);
        assert_eq!(spans[1].style, theme.match_highlight());
    }

    #[test]
    fn selected_text_is_not_highlighted() {
        let theme = Theme::default();
        let spans = highlighted_spans("Design", &[(0, 3)], &theme, true);
        assert_eq!(texts(&spans), ["Design"]);
    }

    #[test]
    fn truncates_on_characters() {
        assert_eq!(truncate("Überweisung", 5), "Über…");
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn centered_rect_is_clipped() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(centered_rect(20, 4, area), Rect::new(10, 3, 20, 4));
        assert_eq!(centered_rect(80, 20, area), area);
    }
}
