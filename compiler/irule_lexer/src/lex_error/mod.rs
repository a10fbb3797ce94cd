//! Lexer error types.
//!
//! Every lexical problem is reported twice over: as an `ILLEGAL` token in
//! the stream (its literal is the message) and as a [`LexError`] kept on
//! the lexer. The parser turns the tokens into diagnostics; the error list
//! carries the classification.

use irule_diagnostic::{Diagnostic, ErrorCode};
use irule_ir::Span;
use thiserror::Error;

/// A lexical error and where it happened.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
    /// 1-based line where the offending text starts.
    pub line: u32,
}

/// What kind of lexical error occurred.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
pub enum LexErrorKind {
    /// Missing closing `"`.
    #[error("unterminated string")]
    UnterminatedString,
    /// A character that cannot start any token.
    #[error("illegal character '{ch}'")]
    IllegalCharacter { ch: char },
    /// `]` or `}` at depth zero.
    #[error("Closing '{closer}' without opening one")]
    StrayCloser { closer: char },
    /// Digits with dots that do not form a dotted quad.
    #[error("invalid number literal '{text}'")]
    InvalidNumber { text: String },
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span, line: u32) -> Self {
        LexError { kind, span, line }
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            LexErrorKind::UnterminatedString => ErrorCode::E0001,
            LexErrorKind::IllegalCharacter { .. } => ErrorCode::E0002,
            LexErrorKind::StrayCloser { .. } => ErrorCode::E0003,
            LexErrorKind::InvalidNumber { .. } => ErrorCode::E0004,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code())
            .with_message(self.message())
            .at_line(self.line)
            .with_span(self.span)
    }
}

#[cfg(test)]
mod tests;
