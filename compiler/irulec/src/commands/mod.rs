//! Command handlers for the `irule` CLI.
//!
//! Each submodule implements one command. They write to caller-supplied
//! writers so tests can capture output.

mod check;
mod repl;

pub use check::{check_file, check_source, CheckOutcome};
pub use repl::{run_repl, PROMPT};

use std::io::{self, Write};

use irule_ir::Token;

/// One line per token: line number, kind and literal.
pub(crate) fn write_tokens(out: &mut impl Write, tokens: &[Token]) -> io::Result<()> {
    for token in tokens {
        writeln!(out, "{:>4}  {:<16} {:?}", token.line, token.kind, token.literal)?;
    }
    Ok(())
}
