//! Form overlay and delete confirmation.

use crate::ui::helpers::centered_rect;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ConfirmInfo, FormFieldView, ModalViewModel};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};
use ratatui::Frame;

const FORM_WIDTH: u16 = 64;
const LABEL_WIDTH: usize = 12;
const CONFIRM_WIDTH: u16 = 50;

pub fn render_form(frame: &mut Frame, area: Rect, modal: &ModalViewModel, theme: &Theme) {
    let mut lines: Vec<Line> = modal
        .fields
        .iter()
        .map(|field| field_line(field, theme))
        .collect();

    lines.push(Line::default());
    if let Some(error) = &modal.error {
        lines.push(Line::styled(
            error.clone(),
            Theme::fg(&theme.colors.notify_error),
        ));
    }
    if modal.submitting {
        lines.push(Line::styled("Saving…", theme.dim()));
    }

    let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX);
    let rect = centered_rect(FORM_WIDTH, height, area);
    let block = Block::bordered()
        .title(format!(" {} ", modal.title))
        .border_style(Theme::fg(&theme.colors.modal_border));

    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

fn field_line(field: &FormFieldView, theme: &Theme) -> Line<'static> {
    let marker = if field.is_focused { "> " } else { "  " };
    let label_style = if field.is_focused {
        Theme::fg(&theme.colors.tab_active).add_modifier(Modifier::BOLD)
    } else {
        theme.dim()
    };
    let value = match (field.is_choice, field.is_focused) {
        (true, true) => format!("< {} >", field.value),
        (false, true) => format!("{}▏", field.value),
        _ => field.value.clone(),
    };

    Line::from(vec![
        Span::styled(marker, label_style),
        Span::styled(format!("{:<LABEL_WIDTH$}", field.label), label_style),
        Span::styled(value, theme.text()),
    ])
}

pub fn render_confirm(frame: &mut Frame, area: Rect, confirm: &ConfirmInfo, theme: &Theme) {
    let rect = centered_rect(CONFIRM_WIDTH, 5, area);
    let block = Block::bordered()
        .title(" Delete Task ")
        .border_style(Theme::fg(&theme.colors.notify_error));

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(confirm.message.clone())
            .style(theme.text())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        rect,
    );
}
