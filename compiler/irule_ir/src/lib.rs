//! iRule IR - tokens, AST and language tables.
//!
//! This crate holds the data shared by every stage of the validator:
//! - Spans and line-stamped tokens produced by the lexer
//! - The AST node catalog with a canonical textual rendering
//! - Immutable language tables (events, headers, `string` operations, ...)
//!
//! Nothing here performs I/O or keeps mutable global state; the tables are
//! plain `static` data and safe to read from independent parses.

/// Compile-time assertion that a type has a specific size.
///
/// Used to keep frequently-cloned types from silently growing.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
pub mod builtins;
mod span;
mod token;

pub use ast::{Expression, Node, Program, Statement};
pub use span::Span;
pub use token::{CommandFamily, Token, TokenFlags, TokenKind};
