//! Diagnostics for the iRule validator.
//!
//! Every problem the lexer or parser finds is a [`Diagnostic`] value: an
//! [`ErrorCode`], a message and the source line it was found on. Parsing
//! never aborts on a diagnostic; they are accumulated in discovery order
//! and handed to the driver, which decides what to print and which exit
//! code to return.
//!
//! The canonical one-line rendering (`Display`) is
//!
//! ```text
//!    line 3: invalid event 'HTTP_REQEST'
//! ```
//!
//! three spaces of indent, the line stamp when one is known, the message.

mod diagnostic;
pub mod emitter;
mod error_code;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
