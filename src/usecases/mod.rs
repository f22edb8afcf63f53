//! Use case layer: relay and command workflows over the automation client port.

pub mod bootstrap;
pub mod command_proxy;
pub mod context;
pub mod contracts;
pub mod extract_media;
pub mod list_chats;
pub mod list_contacts;
pub mod load_messages;
pub mod mark_read;
pub mod relay;
pub mod send_media;
pub mod send_message;

/// Returns the usecases module name for smoke checks.
pub fn module_name() -> &'static str {
    "usecases"
}
