//! AST node catalog.
//!
//! The tree is owned top-down: a [`Program`] owns its statements, every node
//! owns its children. Each node keeps the token it started at so
//! diagnostics and the [`Node`] capability can report a line.
//!
//! # Canonical text
//!
//! Every node implements `Display` with a canonical rendering. The
//! rendering drops comments, layout and redundant quoting but is stable:
//! parsing the rendered text of an accepted program and rendering it again
//! yields the same text.
//!
//! # Module Structure
//!
//! - `stmt`: statements (`set`, `if`, `switch`, `foreach`, blocks, ...)
//! - `expr`: expressions, command forms and patterns

/// Implements [`Node`] for structs with a `token` field.
macro_rules! impl_node {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::ast::Node for $ty {
                #[inline]
                fn token(&self) -> &$crate::Token {
                    &self.token
                }
            }
        )*
    };
}
pub(crate) use impl_node;

mod expr;
mod stmt;

pub use expr::{
    ArrayLiteral, BooleanLiteral, CallExpression, ClassCommand, CommandInvocation,
    CommandSubstitution, Expression, GlobPattern, HashLiteral, Identifier, IndexExpression,
    InfixExpression, InterpolatedString, InvalidIdentifier, IpAddressLiteral, ListLiteral,
    MapLiteral, MultiPattern, NamespacedCommand, NodeStatement, NumberLiteral,
    ParenthesizedExpression, PrefixExpression, RegexPattern, RegsubExpression,
    BracketExpression, StringLiteral, StringOperation, TargetKind, WhenExpression,
};
pub use stmt::{
    BlockStatement, CaseStatement, ExpressionStatement, ForEachStatement, IfStatement, LtmRule,
    ReturnStatement, SetStatement, Statement, SwitchFlags, SwitchStatement,
};

use std::fmt;

use crate::Token;

/// Capabilities shared by every node.
pub trait Node {
    /// The originating token.
    fn token(&self) -> &Token;

    /// Literal text of the originating token.
    fn token_literal(&self) -> &str {
        &self.token().literal
    }

    /// 1-based source line of the originating token.
    fn line(&self) -> u32 {
        self.token().line
    }
}

/// Root of a parsed source file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Literal of the first statement's token, or empty for an empty program.
    pub fn token_literal(&self) -> &str {
        self.statements.first().map_or("", |stmt| stmt.token_literal())
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_lines(f, &self.statements)
    }
}

/// Writes `items` separated by `sep`.
pub(crate) fn write_joined<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    sep: &str,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Writes one item per line, with no trailing newline.
pub(crate) fn write_lines<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    write_joined(f, items, "\n")
}
