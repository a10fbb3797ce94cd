//! The `check` command: validate one iRule file.

use std::io::{self, IsTerminal, Read, Write};
use std::path::Path;

use irule_diagnostic::emitter::{DiagnosticEmitter, TerminalEmitter};
use irule_lexer::lex;
use irule_parse::parse;
use tracing::{debug, debug_span};

use super::write_tokens;
use crate::{CliError, CliOptions};

/// Result of checking one source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckOutcome {
    pub diagnostics: usize,
}

impl CheckOutcome {
    pub fn is_clean(self) -> bool {
        self.diagnostics == 0
    }

    /// 0 when clean, 1 otherwise.
    pub fn exit_code(self) -> u8 {
        u8::from(!self.is_clean())
    }
}

/// Check the file at `path` (`-` reads stdin), printing to stdout.
pub fn check_file(path: &Path, options: &CliOptions) -> Result<CheckOutcome, CliError> {
    let source = read_source(path)?;
    let stdout = io::stdout();
    let is_tty = stdout.is_terminal();
    let mut out = stdout.lock();
    Ok(check_source(&source, options, &mut out, is_tty)?)
}

fn read_source(path: &Path) -> Result<String, CliError> {
    let result = if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).map(|_| text)
    } else {
        std::fs::read_to_string(path)
    };
    result.map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse `source` and report. Diagnostics are written only with
/// `print_errors`; the outcome counts them either way.
pub fn check_source(
    source: &str,
    options: &CliOptions,
    out: &mut impl Write,
    is_tty: bool,
) -> io::Result<CheckOutcome> {
    let _span = debug_span!("check", bytes = source.len()).entered();
    if options.debug {
        writeln!(out, "tokens:")?;
        write_tokens(out, &lex(source))?;
    }

    let output = parse(source);
    if options.debug {
        writeln!(out, "program:")?;
        writeln!(out, "{}", output.program)?;
    }
    debug!(diagnostics = output.diagnostics.len(), "checked");

    if options.print_errors && !output.diagnostics.is_empty() {
        let mut emitter = TerminalEmitter::with_color_mode(&mut *out, options.color, is_tty);
        emitter.emit_all(&output.diagnostics);
        emitter.flush();
    }
    Ok(CheckOutcome {
        diagnostics: output.diagnostics.len(),
    })
}
