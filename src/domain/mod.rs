//! Domain layer: message, chat and event shapes plus pure normalization rules.

pub mod chat;
pub mod events;
pub mod media;
pub mod message;
pub mod text;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
