//! Domain layer: messages, connection lifecycle, and shell state.

pub mod connection;
pub mod events;
pub mod message;
pub mod message_input_state;
pub mod shell_state;
pub mod transcript;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
