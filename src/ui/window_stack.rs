//! Windows currently shown, bottom to top. The top window is the active one.

use crate::ui::views::{View, WindowId};

#[derive(Default)]
pub struct WindowStack {
    windows: Vec<View>,
    next_id: u32,
}

impl WindowStack {
    pub fn allocate_id(&mut self) -> WindowId {
        self.next_id += 1;
        WindowId(self.next_id)
    }

    pub fn active_id(&self) -> Option<WindowId> {
        self.windows.last().map(View::id)
    }

    pub fn active(&self) -> Option<&View> {
        self.windows.last()
    }

    pub fn active_mut(&mut self) -> Option<&mut View> {
        self.windows.last_mut()
    }

    pub fn get(&self, id: WindowId) -> Option<&View> {
        self.windows.iter().find(|view| view.id() == id)
    }

    pub fn show(&mut self, view: View) {
        self.windows.push(view);
        if let Some(view) = self.windows.last() {
            tracing::debug!(
                window = ?view.id(),
                kind = view.context().kind(),
                depth = self.len(),
                "window shown"
            );
        }
    }

    pub fn close_active(&mut self) -> Option<View> {
        let closed = self.windows.pop();
        if let Some(view) = &closed {
            tracing::debug!(window = ?view.id(), "window closed");
        }
        closed
    }

    pub fn iter(&self) -> impl Iterator<Item = &View> {
        self.windows.iter()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Re-evaluates the commands of every window whose view-model changed.
    pub fn requery_all(&mut self) {
        for view in &mut self.windows {
            view.requery();
        }
    }
}
