//! Token types for the iRule lexer.

mod flags;
mod kind;

pub use flags::TokenFlags;
pub use kind::{CommandFamily, TokenKind};

use std::fmt;

use crate::Span;

/// A token: kind, the text that produced it, and where it came from.
///
/// `line` is 1-based. For `STRING` tokens the literal is the body between
/// the quotes; `span` still covers the quotes.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub line: u32,
    pub span: Span,
    pub flags: TokenFlags,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, literal: impl Into<String>, line: u32, span: Span) -> Self {
        Token {
            kind,
            literal: literal.into(),
            line,
            span,
            flags: TokenFlags::empty(),
        }
    }

    /// Token for synthesized nodes and tests.
    pub fn dummy(kind: TokenKind, literal: impl Into<String>) -> Self {
        Token::new(kind, literal, 1, Span::DUMMY)
    }

    #[must_use]
    pub fn with_flags(mut self, flags: TokenFlags) -> Self {
        self.flags = flags;
        self
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Whether this is the lexer's `+`, emitted as an identifier.
    #[inline]
    pub fn is_plus_word(&self) -> bool {
        self.kind == TokenKind::Ident && self.literal == "+"
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?}) @ line {}", self.kind, self.literal, self.line)
    }
}

#[cfg(test)]
mod tests;
