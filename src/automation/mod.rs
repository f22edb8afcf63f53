//! Automation client integration: WhatsApp HTTP API adapter and event mapping.

pub mod waha;
pub mod webhook;
mod wire;

pub use waha::WahaClient;

/// Returns the automation module name for smoke checks.
pub fn module_name() -> &'static str {
    "automation"
}
