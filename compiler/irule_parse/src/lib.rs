//! Parser and integrated static validator for F5 iRules.
//!
//! A Pratt parser over the on-demand token stream of [`Lexer`]. Statements
//! with their own shape (`when`, `if`, `switch`, `foreach`, `set`,
//! `return`) have dedicated parsers; everything else is a Tcl command whose
//! words are parsed one at a time, or an expression when an operator
//! follows its first word.
//!
//! Validation happens while parsing. Every problem becomes a
//! [`Diagnostic`] and parsing carries on, so [`Parser::parse_program`]
//! always returns a [`Program`].
//!
//! # Module Structure
//!
//! - `grammar`: statement, command, expression and pattern productions
//! - `validate`: identifier and operator predicates
//! - `symbols`: per-scope mutually exclusive commands
//! - `precedence`: infix binding powers

mod grammar;
mod precedence;
mod symbols;
mod validate;

pub use precedence::Precedence;
pub use symbols::{Conflict, SymbolKind, SymbolTable};
pub use validate::{
    is_valid_header_name, is_valid_irule_identifier, is_valid_operator_for_types,
    is_valid_variable_name, IdentContext, OperandClass,
};

use irule_diagnostic::{Diagnostic, ErrorCode};
use irule_ir::{Program, Span, Token, TokenKind};
use irule_lexer::{LexError, Lexer};
use rustc_hash::FxHashSet;
use tracing::debug;

/// How a newline is read at the current point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Nesting {
    /// Script body: a newline ends the command.
    Script,
    /// Inside `[...]`.
    Bracket,
    /// Inside an expression brace, parentheses or a `switch` body.
    Expr,
    /// Inside the `(key)` of `$arr(key)`; `)` is not glued to words.
    Index,
}

/// Parser state for one source string.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    source: &'a str,
    cur_token: Token,
    peek_token: Token,
    prev_token: Token,
    /// `{` minus `}` that have become the current token so far.
    brace_count: i64,
    diagnostics: Vec<Diagnostic>,
    declared_variables: FxHashSet<String>,
    symbols: SymbolTable,
    nesting: Vec<Nesting>,
    /// Report `$name` references that no `set` introduced.
    check_variables: bool,
}

impl<'a> Parser<'a> {
    pub fn new(lexer: Lexer<'a>) -> Self {
        let source = lexer.source();
        let mut parser = Parser {
            lexer,
            source,
            cur_token: Token::dummy(TokenKind::Eof, ""),
            peek_token: Token::dummy(TokenKind::Eof, ""),
            prev_token: Token::dummy(TokenKind::Eof, ""),
            brace_count: 0,
            diagnostics: Vec::new(),
            declared_variables: FxHashSet::default(),
            symbols: SymbolTable::new(),
            nesting: vec![Nesting::Script],
            check_variables: true,
        };
        parser.next_token();
        parser.next_token();
        parser
    }

    /// Treat `names` as already declared, e.g. by earlier REPL input.
    #[must_use]
    pub fn with_declared_variables(mut self, names: impl IntoIterator<Item = String>) -> Self {
        self.declared_variables.extend(names);
        self
    }

    /// Parser for a snippet of this parser's input that starts on `line`.
    ///
    /// Undeclared-variable checks are off in snippets: they are brace
    /// lists and string substitutions, where references are exempt.
    fn embedded<'b>(snippet: &'b str, line: u32, nesting: Nesting) -> Parser<'b> {
        let mut parser = Parser::new(Lexer::new(snippet).starting_at_line(line));
        parser.nesting = vec![nesting];
        parser.check_variables = false;
        parser
    }

    /// Take over the findings of a finished snippet parser.
    fn absorb(&mut self, snippet: Parser<'_>) {
        self.diagnostics.extend(snippet.diagnostics);
        self.declared_variables.extend(snippet.declared_variables);
    }

    /// Parse the whole input.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::new();
        while !self.cur_is(TokenKind::Eof) {
            if let Some(statement) = self.parse_statement() {
                program.statements.push(statement);
            }
            self.next_token();
        }
        if self.brace_count != 0 {
            let line = self.cur_token.line;
            self.error_at(
                ErrorCode::E1004,
                line,
                format!(
                    "Unbalanced braces: depth at end of parsing is {}",
                    self.brace_count
                ),
            );
        }
        debug!(
            statements = program.statements.len(),
            diagnostics = self.diagnostics.len(),
            "parsed program"
        );
        program
    }

    /// Rendered diagnostic lines, in discovery order.
    pub fn errors(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Names introduced by `set`, `foreach` and friends so far.
    pub fn declared_variables(&self) -> &FxHashSet<String> {
        &self.declared_variables
    }

    /// Current `{` nesting as seen by the parser.
    pub fn brace_count(&self) -> i64 {
        self.brace_count
    }

    // === Token navigation ===

    fn next_token(&mut self) {
        let next = self.lexer.next_token();
        let peek = std::mem::replace(&mut self.peek_token, next);
        self.prev_token = std::mem::replace(&mut self.cur_token, peek);
        match self.cur_token.kind {
            TokenKind::LBrace => self.brace_count += 1,
            TokenKind::RBrace => self.brace_count -= 1,
            _ => {}
        }
    }

    #[inline]
    fn cur_is(&self, kind: TokenKind) -> bool {
        self.cur_token.kind == kind
    }

    #[inline]
    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek_token.kind == kind
    }

    /// The byte right after the peek token, if any.
    fn byte_after_peek(&self) -> Option<u8> {
        self.source
            .as_bytes()
            .get(self.peek_token.span.end as usize)
            .copied()
    }

    /// Source text of `span`; empty when the span is out of range.
    fn slice(&self, span: Span) -> &'a str {
        self.source.get(span.to_range()).unwrap_or_default()
    }

    #[inline]
    fn newline_ends_command(&self) -> bool {
        matches!(self.nesting.last(), None | Some(Nesting::Script))
    }

    /// Whether the current command ends before the peek token.
    fn peek_ends_command(&self) -> bool {
        let peek = &self.peek_token;
        peek.kind.is_terminator() || (peek.flags.starts_line() && self.newline_ends_command())
    }

    /// `-word` or `--` ahead: a Tcl option word.
    fn peek_is_option_word(&self) -> bool {
        self.peek_is(TokenKind::Minus)
            && self
                .byte_after_peek()
                .is_some_and(|b| b.is_ascii_alphabetic() || b == b'-')
    }

    /// A free-standing `-`, as between fall-through `switch` patterns.
    fn peek_is_lone_dash(&self) -> bool {
        self.peek_is(TokenKind::Minus)
            && self
                .byte_after_peek()
                .map_or(true, |b| b.is_ascii_whitespace())
    }

    /// Whether the peek token continues the current word.
    fn peek_glues(&self) -> bool {
        let peek = &self.peek_token;
        if !peek.flags.is_adjacent() || peek.kind.is_terminator() || peek.is(TokenKind::LBrace) {
            return false;
        }
        !(peek.is(TokenKind::RParen) && self.nesting.last() == Some(&Nesting::Index))
    }

    // === Diagnostics ===

    fn error_at(&mut self, code: ErrorCode, line: u32, message: impl Into<String>) {
        let diagnostic = Diagnostic::error(code).with_message(message).at_line(line);
        debug!(code = %code, line, message = %diagnostic.message, "diagnostic");
        self.diagnostics.push(diagnostic);
    }

    fn error(&mut self, code: ErrorCode, message: impl Into<String>) {
        let line = self.cur_token.line;
        self.error_at(code, line, message);
    }

    /// Report the current `ILLEGAL` token with the lexer's message.
    fn report_illegal(&mut self) {
        let token = &self.cur_token;
        let diagnostic = self
            .lexer
            .error_at(token.span)
            .map_or_else(
                || {
                    Diagnostic::error(ErrorCode::E0002)
                        .with_message(token.literal.clone())
                        .at_line(token.line)
                },
                LexError::to_diagnostic,
            );
        self.diagnostics.push(diagnostic);
    }

    /// `'text'` for a token, or `end of input`.
    fn describe(token: &Token) -> String {
        match token.kind {
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::String => format!("\"{}\"", token.literal),
            _ => format!("'{}'", token.literal),
        }
    }

    /// Report a wrong token where `expected` should be, at the peek line.
    fn peek_error(&mut self, code: ErrorCode, expected: &str) {
        let found = Self::describe(&self.peek_token);
        let line = self.peek_token.line;
        self.error_at(code, line, format!("expected {expected}, got {found}"));
    }
}

/// A parsed program together with its diagnostics.
#[derive(Clone, Debug)]
pub struct ParseOutput {
    pub program: Program,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Rendered diagnostic lines, in discovery order.
    pub fn errors(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }
}

/// Lex and parse `source` in one go.
pub fn parse(source: &str) -> ParseOutput {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    ParseOutput {
        program,
        diagnostics: parser.into_diagnostics(),
    }
}

#[cfg(test)]
mod tests;
