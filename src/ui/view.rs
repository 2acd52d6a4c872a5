use ratatui::Frame;

use super::{dialog_queue::DialogQueue, views::render_dialog, window_stack::WindowStack};

/// Draws every window bottom to top, then the front dialog over them.
pub fn render(frame: &mut Frame<'_>, windows: &WindowStack, dialogs: &DialogQueue) {
    let area = frame.area();
    let dialog = dialogs.front();
    let active_id = windows.active_id();

    for view in windows.iter() {
        let active = dialog.is_none() && Some(view.id()) == active_id;
        view.render(frame, area, active);
    }

    if let Some(dialog) = dialog {
        render_dialog(frame, &dialog, dialogs.len().saturating_sub(1));
    }
}
