//! Resolves a view-model to the view that presents it.

use thiserror::Error;

use crate::{
    ui::{
        views::{ConnectionView, MainWindowView, View, WindowInfo},
        window_stack::WindowStack,
    },
    view_models::ViewModelHandle,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("invalid argument: {0} is required")]
    InvalidArgument(&'static str),
}

pub struct ViewFactory;

impl ViewFactory {
    /// Builds the view for `view_model`, bound to it and owned by the active
    /// window. The view is returned unshown.
    pub fn build(
        windows: &mut WindowStack,
        view_model: Option<ViewModelHandle>,
    ) -> Result<View, ResolveError> {
        let view_model = view_model.ok_or(ResolveError::InvalidArgument("view_model"))?;
        let window = WindowInfo {
            id: windows.allocate_id(),
            owner: windows.active_id(),
        };
        let kind = view_model.kind();

        let view = match view_model {
            ViewModelHandle::MainWindow(context) => {
                View::MainWindow(MainWindowView::new(window, context))
            }
            ViewModelHandle::Connection(context) => {
                View::Connection(ConnectionView::new(window, context))
            }
        };

        tracing::debug!(kind, window = ?window.id, owner = ?window.owner, "view resolved");
        Ok(view)
    }
}
