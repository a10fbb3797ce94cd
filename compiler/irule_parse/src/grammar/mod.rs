//! Grammar productions.
//!
//! Each module extends `Parser` with methods for one family of constructs:
//!
//! - [`stmt`]: `set`, `return`, `if`, `foreach`, `ltm rule`
//! - [`irule`]: `when` event handlers
//! - [`switch`]: `switch` with its options and patterns
//! - [`command`]: command words, namespaced commands, `string`, `class`,
//!   `regsub`, `pool`/`node`
//! - [`expr`]: Pratt expression parsing
//! - [`interpolate`]: `$var` and `[cmd]` embeddings in quoted strings
//!
//! Every production starts with the current token on its first token and
//! leaves the current token on its last one.

mod command;
mod expr;
mod interpolate;
mod irule;
mod stmt;
mod switch;

use irule_diagnostic::ErrorCode;
use irule_ir::ast::{BlockStatement, ExpressionStatement};
use irule_ir::{Span, Statement, Token, TokenKind};
use irule_lexer::RawBraced;
use irule_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::{Nesting, Parser};

impl<'a> Parser<'a> {
    /// Parse one command or control structure.
    ///
    /// Returns `None` for empty commands and for commands too broken to
    /// keep; in both cases the rest of the command has been consumed.
    pub(crate) fn parse_statement(&mut self) -> Option<Statement> {
        ensure_sufficient_stack(|| {
            trace!(kind = %self.cur_token.kind, line = self.cur_token.line, "statement");
            let statement = match self.cur_token.kind {
                TokenKind::Semicolon => return None,
                TokenKind::Illegal => {
                    self.report_illegal();
                    None
                }
                TokenKind::RBrace | TokenKind::RBracket => {
                    let found = Self::describe(&self.cur_token);
                    self.error(ErrorCode::E1001, format!("unexpected {found}"));
                    None
                }
                TokenKind::Set => self.parse_set_statement(),
                TokenKind::Return => self.parse_return_statement(),
                TokenKind::If => self.parse_if_statement(),
                TokenKind::Switch => self.parse_switch_statement(),
                TokenKind::Foreach => self.parse_foreach_statement(),
                TokenKind::Ltm if self.peek_is(TokenKind::Rule) => self.parse_ltm_rule(),
                TokenKind::LBrace => Some(Statement::Block(self.parse_block_statement())),
                _ => self.parse_expression_statement(),
            };
            self.finish_command(statement.is_some());
            statement
        })
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let token = self.cur_token.clone();
        let expression = self.parse_command_or_expression()?;
        Some(Statement::Expression(ExpressionStatement { token, expression }))
    }

    /// Consume whatever is left of the current command. Leftover words
    /// after a complete statement are reported.
    fn finish_command(&mut self, complete: bool) {
        if self.peek_ends_command() {
            return;
        }
        if complete {
            let found = Self::describe(&self.peek_token);
            let line = self.peek_token.line;
            self.error_at(
                ErrorCode::E1001,
                line,
                format!("unexpected {found} after end of command"),
            );
        }
        self.skip_to_command_end();
    }

    /// `{ statements }` with the current token on `{`. Ends on the matching
    /// `}`. The block is its own symbol scope.
    pub(crate) fn parse_block_statement(&mut self) -> BlockStatement {
        let token = self.cur_token.clone();
        let mut statements = Vec::new();
        self.nesting.push(Nesting::Script);
        self.symbols.push_scope();
        self.next_token();
        while !self.cur_is(TokenKind::RBrace) {
            if self.cur_is(TokenKind::Eof) {
                self.error_at(
                    ErrorCode::E1003,
                    token.line,
                    format!(
                        "missing closing brace for block opened on line {}",
                        token.line
                    ),
                );
                break;
            }
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
            self.next_token();
        }
        self.symbols.pop_scope();
        self.nesting.pop();
        BlockStatement { token, statements }
    }

    /// Step onto a `{` that must follow `what`; reports E1005 otherwise.
    fn expect_block_open(&mut self, what: &str) -> bool {
        if self.peek_is(TokenKind::LBrace) {
            self.next_token();
            return true;
        }
        let found = Self::describe(&self.peek_token);
        let line = self.peek_token.line;
        self.error_at(
            ErrorCode::E1005,
            line,
            format!("expected '{{' after {what}, got {found}"),
        );
        false
    }

    /// Take the `{` word under the cursor verbatim.
    ///
    /// On success the current token becomes its closing `}` and the
    /// lookahead is rescanned after it. Without a matching `}` the rest of
    /// the input is consumed and `None` returned.
    fn capture_raw_brace(&mut self) -> Option<RawBraced<'a>> {
        let open = self.cur_token.clone();
        let Some(raw) = self.lexer.capture_braced(&open) else {
            self.error_at(
                ErrorCode::E1003,
                open.line,
                format!(
                    "missing closing brace for '{{' opened on line {}",
                    open.line
                ),
            );
            while !self.peek_is(TokenKind::Eof) {
                self.next_token();
            }
            return None;
        };
        self.brace_count -= 1;
        let close = Token::new(
            TokenKind::RBrace,
            "}",
            self.lexer.line(),
            Span::new(raw.span.end.saturating_sub(1), raw.span.end),
        );
        self.prev_token = std::mem::replace(&mut self.cur_token, close);
        self.peek_token = self.lexer.next_token();
        Some(raw)
    }

    /// Skip to the last token of the current command. `[...]` groups are
    /// skipped whole and `{...}` words are captured unparsed.
    fn skip_to_command_end(&mut self) {
        let mut depth = 0usize;
        loop {
            if self.peek_is(TokenKind::Eof) || self.peek_is(TokenKind::RBrace) {
                return;
            }
            if depth == 0 && self.peek_ends_command() {
                return;
            }
            self.next_token();
            match self.cur_token.kind {
                TokenKind::LBracket => depth += 1,
                TokenKind::RBracket => depth = depth.saturating_sub(1),
                TokenKind::LBrace => {
                    self.capture_raw_brace();
                }
                _ => {}
            }
        }
    }

    /// Skip to the token before the enclosing `}`, capturing nested
    /// `{...}` words unparsed.
    fn skip_to_close_brace(&mut self) {
        while !self.peek_is(TokenKind::RBrace) && !self.peek_is(TokenKind::Eof) {
            self.next_token();
            if self.cur_is(TokenKind::LBrace) {
                self.capture_raw_brace();
            }
        }
    }

    /// Consume the current word without interpreting it and return its
    /// source text. Adjacent pieces and whole `[...]` groups are included.
    fn raw_word_text(&mut self) -> &'a str {
        let start = self.cur_token.span.start;
        let mut depth = usize::from(self.cur_is(TokenKind::LBracket));
        while depth > 0 || self.peek_glues() {
            if self.peek_is(TokenKind::Eof) || self.peek_is(TokenKind::RBrace) {
                break;
            }
            self.next_token();
            match self.cur_token.kind {
                TokenKind::LBracket => depth += 1,
                TokenKind::RBracket => depth = depth.saturating_sub(1),
                TokenKind::LBrace => {
                    self.capture_raw_brace();
                }
                _ => {}
            }
        }
        self.slice(Span::new(start, self.cur_token.span.end))
    }
}
