//! The terminal emitter renders each diagnostic as its canonical line,
//! optionally coloured. Emitters implement [`DiagnosticEmitter`] so the
//! driver can write to stdout, stderr or an in-memory buffer in tests.

mod terminal;

pub use terminal::{ColorMode, TerminalEmitter};

use crate::Diagnostic;

/// Sink for diagnostics, one at a time.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    /// Emit multiple diagnostics, in order.
    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    fn flush(&mut self);
}
