//! Task and user lists.

use super::empty::render_empty_state;
use crate::ui::helpers::{row_style, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{TaskCard, TaskListInfo, UserItem, UserListInfo};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem};
use ratatui::Frame;

const TITLE_WIDTH: usize = 40;
const NAME_WIDTH: usize = 24;

pub fn render_task_list(frame: &mut Frame, area: Rect, list: &TaskListInfo, theme: &Theme) {
    let block = Block::bordered()
        .title(format!(" {} ", list.title))
        .border_style(theme.border());

    if list.cards.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if let Some(message) = &list.empty_message {
            render_empty_state(frame, inner, message, theme);
        }
        return;
    }

    let items: Vec<ListItem> = list
        .cards
        .iter()
        .map(|card| ListItem::new(task_line(card, theme)))
        .collect();
    frame.render_widget(List::new(items).block(block), area);
}

fn task_line(card: &TaskCard, theme: &Theme) -> Line<'static> {
    let base = row_style(theme, card.is_selected);
    let accent = |style: Style| if card.is_selected { base } else { style };

    let mut spans = vec![
        Span::styled(format!("{} ", card.indicator), accent(theme.status(card.status))),
        Span::styled(
            format!("{:<TITLE_WIDTH$}", truncate(&card.title, TITLE_WIDTH)),
            base,
        ),
        Span::styled(
            format!(" {:<6}", card.priority.as_str()),
            accent(theme.priority(card.priority)),
        ),
    ];

    if let Some(assignee) = &card.assignee {
        spans.push(Span::styled(format!("  @{assignee}"), accent(theme.dim())));
    }
    if let Some(due) = &card.due {
        spans.push(Span::styled(format!("  {due}"), accent(theme.dim())));
    }

    Line::from(spans)
}

pub fn render_user_list(frame: &mut Frame, area: Rect, list: &UserListInfo, theme: &Theme) {
    let block = Block::bordered()
        .title(format!(" {} ", list.title))
        .border_style(theme.border());

    if list.items.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if let Some(message) = &list.empty_message {
            render_empty_state(frame, inner, message, theme);
        }
        return;
    }

    let items: Vec<ListItem> = list
        .items
        .iter()
        .map(|user| ListItem::new(user_line(user, theme)))
        .collect();
    frame.render_widget(List::new(items).block(block), area);
}

fn user_line(user: &UserItem, theme: &Theme) -> Line<'static> {
    let base = row_style(theme, user.is_selected);
    let email_style = if user.is_selected { base } else { theme.dim() };

    Line::from(vec![
        Span::styled(
            format!("{:<NAME_WIDTH$}", truncate(&user.name, NAME_WIDTH)),
            base,
        ),
        Span::styled(format!("  {}", user.email), email_style),
    ])
}
