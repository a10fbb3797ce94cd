//! Binding power of infix operators.

use irule_ir::{Token, TokenKind};

/// Operator precedence, weakest first.
///
/// `&&`/`||` and `contains` bind tighter than comparison. Scripts rarely mix
/// them without brackets, and the canonical rendering never adds
/// parentheses, so the order only has to be stable, not conventional.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    Lowest = 1,
    /// `==`, `!=`, `eq`, `ne`, `starts_with`, `ends_with`, `matches`, ...
    Equals = 2,
    /// `<`, `>`, `<=`, `>=`
    LessGreater = 3,
    /// `+`, `-`
    Sum = 4,
    /// `*`, `/`, `%`
    Product = 5,
    /// Unary `-`, `!`, `*`
    Prefix = 6,
    /// `name(args)`
    Call = 7,
    /// `&&`, `||`
    Logical = 8,
    Contains = 9,
}

impl Precedence {
    /// Infix binding power of `token`; `Lowest` when it is not an operator.
    pub fn of(token: &Token) -> Precedence {
        if token.is_plus_word() {
            return Precedence::Sum;
        }
        match token.kind {
            TokenKind::Eq
            | TokenKind::NotEq
            | TokenKind::StrEq
            | TokenKind::StrNe
            | TokenKind::Equals
            | TokenKind::StartsWith
            | TokenKind::EndsWith
            | TokenKind::Matches
            | TokenKind::MatchesGlob
            | TokenKind::MatchesRegex
            | TokenKind::In => Precedence::Equals,
            TokenKind::Lt | TokenKind::Gt | TokenKind::LtEq | TokenKind::GtEq => {
                Precedence::LessGreater
            }
            TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
            TokenKind::Asterisk | TokenKind::Slash | TokenKind::Percent => Precedence::Product,
            // Only `name(` is a call; a spaced `(` starts a new operand.
            TokenKind::LParen if token.flags.is_adjacent() => Precedence::Call,
            TokenKind::And | TokenKind::Or => Precedence::Logical,
            TokenKind::Contains => Precedence::Contains,
            _ => Precedence::Lowest,
        }
    }

    /// Whether `token` may follow a command name as an infix operator,
    /// turning the statement into an expression (`x + 1`, `$a eq $b`).
    ///
    /// `-`, `/`, `*` and `%` are excluded: after a command name they begin
    /// arguments (`log -noname`, `HTTP::path /new`).
    pub fn is_statement_operator(token: &Token) -> bool {
        !matches!(
            token.kind,
            TokenKind::Minus
                | TokenKind::Asterisk
                | TokenKind::Slash
                | TokenKind::Percent
                | TokenKind::LParen
        ) && Precedence::of(token) > Precedence::Lowest
    }
}
