//! Views: each renders one view-model and turns keys into view-model calls.

mod connection;
mod dialog;
mod input_line;
mod main_window;

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    Frame,
};

pub use connection::ConnectionView;
pub use dialog::render_dialog;
pub use main_window::MainWindowView;

use crate::{
    domain::{communication_params::CommunicationParams, events::KeyInput},
    view_models::ViewModelHandle,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub(crate) u32);

/// Identity of a window and of the window it was opened from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowInfo {
    pub id: WindowId,
    pub owner: Option<WindowId>,
}

/// What the shell should do after a view handled a key.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction {
    None,
    OpenConnection,
    Apply(CommunicationParams),
    Close,
}

pub enum View {
    MainWindow(MainWindowView),
    Connection(ConnectionView),
}

impl View {
    pub fn id(&self) -> WindowId {
        self.window().id
    }

    pub fn owner(&self) -> Option<WindowId> {
        self.window().owner
    }

    /// The view-model this view is bound to.
    pub fn context(&self) -> ViewModelHandle {
        match self {
            Self::MainWindow(view) => ViewModelHandle::MainWindow(view.context().clone()),
            Self::Connection(view) => ViewModelHandle::Connection(view.context().clone()),
        }
    }

    pub fn requery(&mut self) {
        match self {
            Self::MainWindow(view) => view.requery(),
            Self::Connection(view) => view.requery(),
        }
    }

    pub fn handle_key(&mut self, key: KeyInput) -> ViewAction {
        match self {
            Self::MainWindow(view) => view.handle_key(key),
            Self::Connection(view) => view.handle_key(key),
        }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, active: bool) {
        match self {
            Self::MainWindow(view) => view.render(frame, area, active),
            Self::Connection(view) => view.render(frame, area, active),
        }
    }

    fn window(&self) -> WindowInfo {
        match self {
            Self::MainWindow(view) => view.window(),
            Self::Connection(view) => view.window(),
        }
    }
}

/// A `width` x `height` rectangle centered in `area`, shrunk to fit.
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_centered() {
        let area = Rect::new(0, 0, 100, 40);

        assert_eq!(centered_rect(50, 10, area), Rect::new(25, 15, 50, 10));
    }

    #[test]
    fn centered_rect_shrinks_to_fit() {
        let area = Rect::new(0, 0, 20, 5);

        assert_eq!(centered_rect(50, 10, area), area);
    }
}
