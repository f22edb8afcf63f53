//! Infrastructure layer: config, logging, errors and terminal output.

pub mod config;
pub mod contracts;
pub mod error;
pub mod logging;
pub mod terminal_qr;

/// Returns the infra module name for smoke checks.
pub fn module_name() -> &'static str {
    "infra"
}
