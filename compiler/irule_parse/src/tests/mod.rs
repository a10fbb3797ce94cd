//! Parser tests.
//!
//! Tests are organized into modules by category:
//! - `statements`: `set`, `if`, `when`, `switch`, `foreach`, `return`, `ltm rule`
//! - `expressions`: Pratt expressions, operand checks and interpolation
//! - `commands`: namespaced commands, `string`, `class`, `regsub`, `pool`/`node`
//! - `validation`: identifier, variable, brace and ordering diagnostics
//! - `properties`: totality, brace balance and canonical-text round trips

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod commands;
mod statements;
mod validation;

use irule_diagnostic::ErrorCode;
use irule_ir::ast::ExpressionStatement;
use irule_ir::{Expression, Statement};

use crate::{parse, ParseOutput};

/// Parse `source` and fail the test on any diagnostic.
fn parse_clean(source: &str) -> ParseOutput {
    let output = parse(source);
    assert!(
        !output.has_errors(),
        "unexpected diagnostics for {source:?}:\n{}",
        output.errors().join("\n")
    );
    output
}

/// The only top-level statement of a clean parse.
fn only_statement(source: &str) -> Statement {
    let mut output = parse_clean(source);
    assert_eq!(
        output.program.statements.len(),
        1,
        "expected one statement in {source:?}"
    );
    output.program.statements.remove(0)
}

/// The expression of a single expression statement.
fn only_expression(source: &str) -> Expression {
    match only_statement(source) {
        Statement::Expression(ExpressionStatement { expression, .. }) => expression,
        other => panic!("expected an expression statement, got {}", other.kind_name()),
    }
}

/// The codes of every diagnostic, in discovery order.
fn codes(source: &str) -> Vec<ErrorCode> {
    parse(source).diagnostics.iter().map(|d| d.code).collect()
}

/// Whether any diagnostic message contains `needle`.
fn has_message(output: &ParseOutput, needle: &str) -> bool {
    output.diagnostics.iter().any(|d| d.message.contains(needle))
}
