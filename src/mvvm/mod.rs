//! Observable view-model infrastructure: change notification, snapshots,
//! validation helpers and commands.

pub mod command;
pub mod error;
pub mod notifier;
pub mod observable;
pub mod snapshot;
pub mod validation;

pub use command::{BoundCommand, Command};
pub use error::{SerializationError, ValidationError};
pub use notifier::{PropertyChangedArgs, PropertyKey, Subscription};
pub use observable::{assign, DisposeGuard, Observable, ViewModel};

/// Returns the mvvm module name for smoke checks.
pub fn module_name() -> &'static str {
    "mvvm"
}
