//! `set`, `return`, `if`, `foreach` and `ltm rule`.

use irule_diagnostic::ErrorCode;
use irule_ir::ast::{
    BracketExpression, ForEachStatement, Identifier, IfStatement, InvalidIdentifier, ListLiteral,
    LtmRule, ReturnStatement, SetStatement,
};
use irule_ir::{Expression, Span, Statement, Token, TokenKind};

use crate::validate::{array_base, is_valid_variable_name};
use crate::{Nesting, Parser, Precedence};

impl Parser<'_> {
    /// `set name value`
    pub(crate) fn parse_set_statement(&mut self) -> Option<Statement> {
        let token = self.cur_token.clone();
        let (name, value) = self.parse_set_parts()?;
        Some(Statement::Set(SetStatement { token, name, value }))
    }

    /// Target and value of a `set`. The target is declared once the value
    /// has been parsed, so `set x $x` still reports an undeclared `x`.
    pub(crate) fn parse_set_parts(&mut self) -> Option<(Expression, Expression)> {
        if self.peek_ends_command() {
            self.error(
                ErrorCode::E3001,
                "wrong # args: should be \"set varName newValue\"",
            );
            return None;
        }
        self.next_token();
        let (name, declared) = self.parse_set_target()?;
        if self.peek_ends_command() {
            self.error(
                ErrorCode::E3001,
                format!("wrong # args: 'set {name}' is missing a value"),
            );
            return None;
        }
        self.next_token();
        let value = self.parse_word()?;
        if !self.peek_ends_command() {
            let line = self.peek_token.line;
            self.error_at(
                ErrorCode::E3001,
                line,
                format!("wrong # args: extra words after 'set {name} {value}'"),
            );
            self.skip_to_command_end();
        }
        if let Some(declared) = declared {
            self.declared_variables.insert(declared);
        }
        Some((name, value))
    }

    /// The name word of `set`, and the variable it declares if it is a
    /// literal name.
    fn parse_set_target(&mut self) -> Option<(Expression, Option<String>)> {
        match self.cur_token.kind {
            TokenKind::LBracket => {
                let token = self.cur_token.clone();
                let inner = self.parse_bracket_command()?;
                let name = Expression::Bracket(BracketExpression {
                    token,
                    inner: Box::new(inner),
                });
                Some((name, None))
            }
            TokenKind::Variable | TokenKind::String => Some((self.parse_word()?, None)),
            _ => {
                let token = self.cur_token.clone();
                let text = self.raw_word_text();
                Some(self.variable_target(token, text))
            }
        }
    }

    /// Validate a literal variable name in target position.
    pub(super) fn variable_target(
        &mut self,
        token: Token,
        text: &str,
    ) -> (Expression, Option<String>) {
        if is_valid_variable_name(text) {
            let declared = array_base(text).to_string();
            (
                Expression::Identifier(Identifier::new(token, text)),
                Some(declared),
            )
        } else {
            self.error_at(
                ErrorCode::E2002,
                token.line,
                format!("invalid variable name '{text}'"),
            );
            let name = Expression::InvalidIdentifier(InvalidIdentifier {
                token,
                value: text.to_string(),
            });
            (name, None)
        }
    }

    /// `return [value]`
    pub(crate) fn parse_return_statement(&mut self) -> Option<Statement> {
        let token = self.cur_token.clone();
        let value = if self.peek_ends_command() {
            None
        } else {
            self.next_token();
            Some(self.parse_word()?)
        };
        Some(Statement::Return(ReturnStatement { token, value }))
    }

    /// `if cond ?then? body ?elseif cond ?then? body ...? ?else body?`
    pub(crate) fn parse_if_statement(&mut self) -> Option<Statement> {
        let token = self.cur_token.clone();
        let condition = self.parse_condition()?;
        if self.peek_token.literal == "then" && self.peek_is(TokenKind::Ident) {
            self.next_token();
        }
        if !self.expect_block_open("if condition") {
            return None;
        }
        let consequence = self.parse_block_statement();

        // `else`/`elseif` may sit on the line after the closing brace.
        let alternative = match self.peek_token.kind {
            TokenKind::ElseIf => {
                self.next_token();
                self.parse_if_statement().map(Box::new)
            }
            TokenKind::Else => {
                self.next_token();
                if self.peek_is(TokenKind::If) {
                    self.next_token();
                    self.parse_if_statement().map(Box::new)
                } else if self.expect_block_open("else") {
                    Some(Box::new(Statement::Block(self.parse_block_statement())))
                } else {
                    None
                }
            }
            _ => None,
        };

        Some(Statement::If(IfStatement {
            token,
            condition,
            consequence,
            alternative,
        }))
    }

    /// Condition of an `if`/`elseif`, braced or as a single word. Ends on
    /// the closing `}` of a braced condition.
    fn parse_condition(&mut self) -> Option<Expression> {
        if self.peek_ends_command() {
            self.peek_error(ErrorCode::E1002, "a condition");
            return None;
        }
        self.next_token();
        if !self.cur_is(TokenKind::LBrace) {
            return self.parse_word();
        }

        let open = self.cur_token.clone();
        if self.peek_is(TokenKind::RBrace) {
            self.error(ErrorCode::E1002, "empty condition");
            self.next_token();
            return None;
        }
        self.nesting.push(Nesting::Expr);
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest);
        if !self.peek_is(TokenKind::RBrace) && !self.peek_is(TokenKind::Eof) {
            let found = Self::describe(&self.peek_token);
            let line = self.peek_token.line;
            self.error_at(
                ErrorCode::E1001,
                line,
                format!("unexpected {found} in condition"),
            );
            self.skip_to_close_brace();
        }
        self.nesting.pop();
        if self.peek_is(TokenKind::RBrace) {
            self.next_token();
        } else {
            self.error_at(
                ErrorCode::E1003,
                open.line,
                format!(
                    "missing closing brace for condition opened on line {}",
                    open.line
                ),
            );
            return None;
        }
        condition
    }

    /// `foreach var list body` or `foreach {a b} list body`.
    pub(crate) fn parse_foreach_statement(&mut self) -> Option<Statement> {
        let token = self.cur_token.clone();
        if self.peek_ends_command() {
            self.peek_error(ErrorCode::E3001, "a loop variable");
            return None;
        }
        self.next_token();
        let variable = match self.cur_token.kind {
            TokenKind::LBrace => {
                let open = self.cur_token.clone();
                let raw = self.capture_raw_brace()?;
                let elements = raw
                    .body
                    .split_whitespace()
                    .map(|name| {
                        let name_token = Token::new(TokenKind::Ident, name, open.line, Span::DUMMY);
                        self.loop_variable(name_token, name)
                    })
                    .collect();
                Expression::List(ListLiteral {
                    token: open,
                    elements,
                })
            }
            TokenKind::Variable | TokenKind::LBracket => self.parse_word()?,
            _ => {
                let name_token = self.cur_token.clone();
                let text = self.raw_word_text();
                self.loop_variable(name_token, text)
            }
        };

        if self.peek_ends_command() {
            self.peek_error(ErrorCode::E3001, "a list to iterate");
            return None;
        }
        self.next_token();
        let list = self.parse_word()?;
        if !self.expect_block_open("foreach list") {
            return None;
        }
        let body = self.parse_block_statement();
        Some(Statement::ForEach(ForEachStatement {
            token,
            variable,
            list,
            body,
        }))
    }

    /// A loop variable, declared on the spot.
    fn loop_variable(&mut self, token: Token, name: &str) -> Expression {
        let (expression, declared) = self.variable_target(token, name);
        if let Some(declared) = declared {
            self.declared_variables.insert(declared);
        }
        expression
    }

    /// `ltm rule name { body }`
    pub(crate) fn parse_ltm_rule(&mut self) -> Option<Statement> {
        let token = self.cur_token.clone();
        self.next_token();
        if self.peek_ends_command() || self.peek_is(TokenKind::LBrace) {
            self.peek_error(ErrorCode::E1001, "a rule name");
            return None;
        }
        self.next_token();
        let name_token = self.cur_token.clone();
        let text = self.raw_word_text();
        let name = Expression::Identifier(Identifier::new(name_token, text));
        if !self.expect_block_open("rule name") {
            return None;
        }
        let body = self.parse_block_statement();
        Some(Statement::LtmRule(LtmRule { token, name, body }))
    }
}
