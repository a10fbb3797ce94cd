//! iRule validator driver.
//!
//! ```text
//! args ──► options ──► Command
//!                        │
//!          ┌─────────────┴─────────────┐
//!          ▼                           ▼
//!   check: read ─► parse ─► emit   repl: line ─► parse ─► eval
//! ```
//!
//! The `irule` binary is a thin `main` over this library so the option
//! parser and both commands can be tested against in-memory input.

pub mod commands;
mod error;
pub mod options;
pub mod tracing_setup;

pub use error::CliError;
pub use options::{CliOptions, Command};

/// `irule <version>`, printed by `-v`.
pub const VERSION: &str = concat!("irule ", env!("CARGO_PKG_VERSION"));
