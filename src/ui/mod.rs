//! UI layer: terminal windows presenting the view-models.

mod controller;
mod dialog_queue;
mod event_source;
pub mod shell;
mod styles;
mod terminal;
mod view;
mod view_factory;
mod views;
mod window_stack;

pub(crate) use dialog_queue::DialogQueue;
pub(crate) use terminal::install_panic_hook;

/// Returns the UI module name for smoke checks.
pub fn module_name() -> &'static str {
    "ui"
}
