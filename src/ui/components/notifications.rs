//! Toasts stacked in the top-right corner, newest last.

use crate::app::notifications::NotificationKind;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::NotificationItem;
use ratatui::layout::Rect;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

const TOAST_HEIGHT: u16 = 3;
const MAX_WIDTH: u16 = 48;

pub fn render_notifications(
    frame: &mut Frame,
    area: Rect,
    notifications: &[NotificationItem],
    theme: &Theme,
) {
    let mut y = area.y + 1;
    for item in notifications {
        if y + TOAST_HEIGHT > area.bottom() {
            break;
        }

        let text_width = u16::try_from(item.message.chars().count()).unwrap_or(MAX_WIDTH);
        let width = (text_width + 4).min(MAX_WIDTH).min(area.width);
        let rect = Rect::new(area.right().saturating_sub(width + 1), y, width, TOAST_HEIGHT);

        let color = match item.kind {
            NotificationKind::Success => &theme.colors.notify_success,
            NotificationKind::Error => &theme.colors.notify_error,
        };

        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(item.message.clone())
                .style(Theme::fg(color))
                .block(Block::bordered().border_style(Theme::fg(color))),
            rect,
        );
        y += TOAST_HEIGHT;
    }
}
