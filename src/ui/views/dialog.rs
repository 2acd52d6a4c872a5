//! Modal dialog overlay.

use ratatui::{
    layout::{Constraint, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    domain::dialog::{Dialog, DialogKind},
    ui::styles,
};

use super::centered_rect;

const DIALOG_WIDTH: u16 = 50;
/// Borders plus the blank separator and the footer line.
const CHROME_ROWS: u16 = 4;

/// `pending` counts the dialogs queued behind this one.
pub fn render_dialog(frame: &mut Frame<'_>, dialog: &Dialog, pending: usize) {
    let width = DIALOG_WIDTH.min(frame.area().width);
    let height = dialog_height(&dialog.message, width.saturating_sub(2));
    let area = centered_rect(width, height, frame.area());
    let border_style = match dialog.kind {
        DialogKind::Info => styles::info_dialog_border_style(),
        DialogKind::Error => styles::error_dialog_border_style(),
    };

    let block = Block::default()
        .title(Span::styled(
            dialog_title(dialog, pending),
            styles::window_title_style(),
        ))
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    let [message_area, _, footer_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    frame.render_widget(Clear, area);
    frame.render_widget(block, area);
    frame.render_widget(
        Paragraph::new(dialog.message.clone()).wrap(Wrap { trim: false }),
        message_area,
    );
    frame.render_widget(Paragraph::new(footer_line(dialog)), footer_area);
}

/// Rows needed to show `message` wrapped at `inner_width`, plus the chrome.
/// The caller clamps the result to the frame.
fn dialog_height(message: &str, inner_width: u16) -> u16 {
    let inner_width = usize::from(inner_width.max(1));
    let rows: usize = message
        .split('\n')
        .map(|line| line.width().div_ceil(inner_width).max(1))
        .sum();

    u16::try_from(rows)
        .unwrap_or(u16::MAX)
        .saturating_add(CHROME_ROWS)
}

fn dialog_title(dialog: &Dialog, pending: usize) -> String {
    if pending == 0 {
        format!(" {} ", dialog.title())
    } else {
        format!(" {} (+{pending} more) ", dialog.title())
    }
}

fn footer_line(dialog: &Dialog) -> Line<'static> {
    Line::from(Span::styled(
        format!("{}  [Enter] OK", dialog.shown_at.format("%H:%M:%S")),
        styles::dialog_timestamp_style(),
    ))
}
