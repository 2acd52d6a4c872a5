//! Domain layer: core entities and business rules.

pub mod communication_params;
pub mod dialog;
pub mod events;
pub mod shell_state;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
