//! Pratt expression parsing.
//!
//! Used for `if` conditions and for statements whose second token is an
//! operator. Operands are the same words commands take, except that
//! operators never glue onto them.

use irule_diagnostic::ErrorCode;
use irule_ir::ast::{
    CallExpression, Identifier, InfixExpression, NamespacedCommand, ParenthesizedExpression,
    PrefixExpression,
};
use irule_ir::{Expression, Span, Token, TokenKind};
use irule_stack::ensure_sufficient_stack;

use crate::validate::{is_valid_operator_for_types, OperandClass};
use crate::{Nesting, Parser, Precedence};

impl Parser<'_> {
    /// Parse an expression binding tighter than `precedence`.
    pub(crate) fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        ensure_sufficient_stack(|| {
            let left = self.parse_prefix()?;
            self.parse_infix_chain(left, precedence)
        })
    }

    /// Fold infix operators binding tighter than `precedence` onto `left`.
    fn parse_infix_chain(
        &mut self,
        mut left: Expression,
        precedence: Precedence,
    ) -> Option<Expression> {
        while !self.peek_ends_command() {
            if self.peek_is_glued_negative() {
                if precedence >= Precedence::Sum {
                    break;
                }
                self.next_token();
                left = self.parse_split_subtraction(left)?;
                continue;
            }
            if precedence >= Precedence::of(&self.peek_token) {
                break;
            }
            self.next_token();
            left = self.parse_infix(left)?;
        }
        Some(left)
    }

    /// `-3` right after an operand, as in `5-3` or `$a-1`. The lexer reads
    /// it as a negative number; here it is a subtraction.
    fn peek_is_glued_negative(&self) -> bool {
        let peek = &self.peek_token;
        peek.is(TokenKind::Number) && peek.flags.is_adjacent() && peek.literal.starts_with('-')
    }

    /// Cursor on a glued negative number: split it into `-` and the
    /// magnitude, which then takes operators binding tighter than `-`.
    fn parse_split_subtraction(&mut self, left: Expression) -> Option<Expression> {
        let number = self.cur_token.clone();
        let Span { start, end } = number.span;
        let operator = Token::new(TokenKind::Minus, "-", number.line, Span::new(start, start + 1))
            .with_flags(number.flags);
        let magnitude = number.literal.get(1..).unwrap_or_default();
        self.cur_token =
            Token::new(TokenKind::Number, magnitude, number.line, Span::new(start + 1, end));
        let first = self.parse_number_literal();
        let right = self.parse_infix_chain(first, Precedence::Sum)?;
        Some(self.finish_infix(operator, left, right))
    }

    fn parse_prefix(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        match token.kind {
            TokenKind::Number | TokenKind::IpAddress | TokenKind::True | TokenKind::False => {
                self.parse_word_piece()
            }
            TokenKind::String | TokenKind::Variable | TokenKind::LBracket => self.parse_operand(),
            TokenKind::LParen => self.parse_grouped_expression(),
            TokenKind::LBrace => self.parse_brace_word(),
            TokenKind::Bang | TokenKind::Minus | TokenKind::Asterisk => {
                self.parse_prefix_expression()
            }
            TokenKind::When => self.parse_when_expression(),
            TokenKind::Set | TokenKind::Switch => self.parse_command(),
            TokenKind::Default => {
                let mut ident = Identifier::new(token.clone(), token.literal);
                ident.is_reserved = true;
                Some(Expression::Identifier(ident))
            }
            TokenKind::Ident if !token.is_plus_word() => {
                // `abs(` is a math function; its name is not validated.
                if self.peek_is(TokenKind::LParen) && self.peek_token.flags.is_adjacent() {
                    let name = token.literal.clone();
                    return Some(Expression::Identifier(Identifier::new(token, name)));
                }
                Some(self.standalone_word(token))
            }
            TokenKind::StringCmd
            | TokenKind::Regsub
            | TokenKind::Class
            | TokenKind::Pool
            | TokenKind::Node
            | TokenKind::Log => {
                let name = token.literal.clone();
                Some(Expression::Identifier(Identifier::new(token, name)))
            }
            TokenKind::Illegal => {
                self.report_illegal();
                None
            }
            kind => match kind.command_family() {
                Some(family) => Some(Expression::namespaced(NamespacedCommand {
                    command: token.literal.clone(),
                    token,
                    family,
                    args: Vec::new(),
                })),
                None => {
                    self.error(
                        ErrorCode::E1002,
                        format!("no prefix parse function for {kind} found"),
                    );
                    None
                }
            },
        }
    }

    /// `-x`, `!x`, `*x`
    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let operator = token.literal.clone();
        if self.peek_ends_command() {
            self.error(
                ErrorCode::E1002,
                format!("expected an operand after '{operator}'"),
            );
            return None;
        }
        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;
        Some(Expression::Prefix(PrefixExpression {
            token,
            operator,
            right: Box::new(right),
        }))
    }

    /// `( expr )`
    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        if self.peek_is(TokenKind::RParen) {
            self.error(ErrorCode::E1002, "empty parentheses");
            self.next_token();
            return None;
        }
        self.nesting.push(Nesting::Expr);
        self.next_token();
        let inner = self.parse_expression(Precedence::Lowest);
        self.nesting.pop();
        if self.peek_is(TokenKind::RParen) {
            self.next_token();
        } else {
            self.error_at(
                ErrorCode::E1006,
                token.line,
                format!("missing ')' for '(' opened on line {}", token.line),
            );
        }
        Some(Expression::Parenthesized(ParenthesizedExpression {
            token,
            inner: Box::new(inner?),
        }))
    }

    fn parse_infix(&mut self, left: Expression) -> Option<Expression> {
        let token = self.cur_token.clone();
        if token.is(TokenKind::LParen) {
            return self.parse_call_expression(left);
        }
        let precedence = Precedence::of(&token);
        let operator = token.literal.clone();
        if self.peek_ends_command() {
            self.error(
                ErrorCode::E1002,
                format!("expected an operand after '{operator}'"),
            );
            return None;
        }
        self.next_token();
        let right = self.parse_expression(precedence)?;
        Some(self.finish_infix(token, left, right))
    }

    /// Build `left <op> right`, checking the operand classes.
    fn finish_infix(&mut self, token: Token, left: Expression, right: Expression) -> Expression {
        let operator = token.literal.clone();
        if !is_valid_operator_for_types(&operator, &left, &right) {
            self.error_at(
                ErrorCode::E4001,
                token.line,
                format!(
                    "invalid operands for '{operator}': {} and {}",
                    OperandClass::of(&left).name(),
                    OperandClass::of(&right).name()
                ),
            );
        }
        Expression::Infix(InfixExpression {
            token,
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    /// `name(arg, ...)` with the cursor on `(`.
    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let token = self.cur_token.clone();
        let mut arguments = Vec::new();
        self.nesting.push(Nesting::Expr);
        if self.peek_is(TokenKind::RParen) {
            self.next_token();
        } else {
            loop {
                self.next_token();
                if let Some(argument) = self.parse_expression(Precedence::Lowest) {
                    arguments.push(argument);
                }
                if !self.peek_is(TokenKind::Comma) {
                    break;
                }
                self.next_token();
            }
            if self.peek_is(TokenKind::RParen) {
                self.next_token();
            } else {
                self.error_at(
                    ErrorCode::E1006,
                    token.line,
                    format!("missing ')' for call opened on line {}", token.line),
                );
            }
        }
        self.nesting.pop();
        Some(Expression::Call(CallExpression {
            token,
            function: Box::new(function),
            arguments,
        }))
    }
}
