//! Use case layer: message dispatch, input bindings, and composition.

pub mod bootstrap;
pub mod context;
pub mod contracts;
pub mod dispatcher;
pub mod shell;

/// Returns the usecases module name for smoke checks.
pub fn module_name() -> &'static str {
    "usecases"
}
