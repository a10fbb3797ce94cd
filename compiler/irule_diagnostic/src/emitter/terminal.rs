//! Canonical diagnostic lines, with the line stamp in bold and the message
//! coloured by severity when colours are on.

use std::io::Write;

use crate::{Diagnostic, Severity};

use super::DiagnosticEmitter;

mod ansi {
    pub const RED_BOLD: &str = "\x1b[1;31m";
    pub const YELLOW_BOLD: &str = "\x1b[1;33m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// When to colour output (`--color`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Colour only when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve to a boolean; `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }

    /// Parse a `--color` value.
    pub fn from_flag(value: &str) -> Option<ColorMode> {
        match value {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

/// Writes diagnostics to any `Write`: stdout in the CLI, a `Vec<u8>` in
/// tests.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl<W: Write> TerminalEmitter<W> {
    /// `is_tty` is whether `writer` is a terminal; the caller knows, the
    /// emitter cannot.
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
        }
    }

    fn paint(&mut self, text: &str, style: &str) {
        let _ = if self.colors {
            write!(self.writer, "{style}{text}{}", ansi::RESET)
        } else {
            self.writer.write_all(text.as_bytes())
        };
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let _ = self.writer.write_all(b"   ");
        if let Some(line) = diagnostic.line {
            self.paint(&format!("line {line}:"), ansi::BOLD);
            let _ = self.writer.write_all(b" ");
        }
        let style = match diagnostic.severity {
            Severity::Error => ansi::RED_BOLD,
            Severity::Warning => ansi::YELLOW_BOLD,
        };
        self.paint(&diagnostic.message, style);
        let _ = writeln!(self.writer);
        for note in &diagnostic.notes {
            let _ = writeln!(self.writer, "     = note: {note}");
        }
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}
