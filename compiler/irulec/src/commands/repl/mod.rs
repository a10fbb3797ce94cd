//! Interactive session: validate each line, then evaluate it.
//!
//! Variables declared on earlier lines stay declared, both for the
//! validator and the evaluator.

use std::io::{self, BufRead, Write};

use irule_diagnostic::emitter::{DiagnosticEmitter, TerminalEmitter};
use irule_diagnostic::Diagnostic;
use irule_eval::{Interpreter, Value};
use irule_lexer::{lex, Lexer};
use irule_parse::Parser;
use rustc_hash::FxHashSet;
use tracing::debug;

use super::write_tokens;
use crate::CliOptions;

pub const PROMPT: &str = ">> ";

/// Read lines from `input` until end of input or `exit`.
pub fn run_repl<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    options: &CliOptions,
    is_tty: bool,
) -> io::Result<()> {
    let mut session = Session::default();
    let mut lines = input.lines();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;
        let Some(line) = lines.next().transpose()? else {
            writeln!(out)?;
            return Ok(());
        };
        let line = line.trim();
        if line == "exit" {
            return Ok(());
        }
        if !line.is_empty() {
            session.run_line(line, options, out, is_tty)?;
        }
    }
}

#[derive(Default)]
struct Session {
    interpreter: Interpreter,
    declared: FxHashSet<String>,
}

impl Session {
    fn run_line<W: Write>(
        &mut self,
        line: &str,
        options: &CliOptions,
        out: &mut W,
        is_tty: bool,
    ) -> io::Result<()> {
        if options.debug {
            write_tokens(out, &lex(line))?;
        }

        let mut parser = Parser::new(Lexer::new(line))
            .with_declared_variables(self.declared.iter().cloned());
        let program = parser.parse_program();
        self.declared.extend(parser.declared_variables().iter().cloned());
        if options.debug {
            writeln!(out, "{program}")?;
        }

        let diagnostics = parser.into_diagnostics();
        if !diagnostics.is_empty() {
            debug!(count = diagnostics.len(), "line rejected");
            emit(out, &diagnostics, options, is_tty);
            return Ok(());
        }

        match self.interpreter.eval_program(&program) {
            Ok(Value::Empty) => Ok(()),
            Ok(value) => writeln!(out, "{value}"),
            Err(err) => {
                emit(out, &[err.into_diagnostic(0)], options, is_tty);
                Ok(())
            }
        }
    }
}

fn emit<W: Write>(out: &mut W, diagnostics: &[Diagnostic], options: &CliOptions, is_tty: bool) {
    let mut emitter = TerminalEmitter::with_color_mode(out, options.color, is_tty);
    emitter.emit_all(diagnostics);
    emitter.flush();
}

#[cfg(test)]
mod tests;
