//! View-models presented by the shell.

pub mod connection;
pub mod main_window;

use std::{cell::RefCell, rc::Rc};

use connection::ConnectionViewModel;
use main_window::MainWindowViewModel;

use crate::mvvm::ViewModel;

/// Every view-model that can be presented, as shared presentation-thread handles.
#[derive(Clone)]
pub enum ViewModelHandle {
    MainWindow(Rc<RefCell<MainWindowViewModel>>),
    Connection(Rc<RefCell<ConnectionViewModel>>),
}

impl ViewModelHandle {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MainWindow(_) => "main_window",
            Self::Connection(_) => "connection",
        }
    }

    /// Disposes the view-model behind the handle; other handles see it disposed too.
    pub fn dispose(&self) {
        match self {
            Self::MainWindow(view_model) => view_model.borrow_mut().dispose(),
            Self::Connection(view_model) => view_model.borrow_mut().dispose(),
        }
    }

    /// True when both handles point at the same view-model instance.
    #[cfg(test)]
    pub fn is_same(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::MainWindow(left), Self::MainWindow(right)) => Rc::ptr_eq(left, right),
            (Self::Connection(left), Self::Connection(right)) => Rc::ptr_eq(left, right),
            _ => false,
        }
    }
}

impl From<MainWindowViewModel> for ViewModelHandle {
    fn from(view_model: MainWindowViewModel) -> Self {
        Self::MainWindow(Rc::new(RefCell::new(view_model)))
    }
}

impl From<ConnectionViewModel> for ViewModelHandle {
    fn from(view_model: ConnectionViewModel) -> Self {
        Self::Connection(Rc::new(RefCell::new(view_model)))
    }
}

impl std::fmt::Debug for ViewModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ViewModelHandle").field(&self.kind()).finish()
    }
}

/// Returns the view_models module name for smoke checks.
pub fn module_name() -> &'static str {
    "view_models"
}
