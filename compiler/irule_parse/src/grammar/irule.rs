//! `when EVENT [priority N] { body }`

use irule_diagnostic::ErrorCode;
use irule_ir::ast::{Identifier, InvalidIdentifier, WhenExpression};
use irule_ir::builtins::is_valid_event;
use irule_ir::{Expression, TokenKind};
use tracing::debug;

use crate::Parser;

impl Parser<'_> {
    pub(crate) fn parse_when_expression(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        if self.peek_ends_command() || self.peek_is(TokenKind::LBrace) {
            self.peek_error(ErrorCode::E2005, "an event name");
            return None;
        }
        self.next_token();
        let event_token = self.cur_token.clone();
        let name = event_token.literal.clone();
        let event = if is_valid_event(&name) {
            Expression::Identifier(Identifier::new(event_token, name))
        } else {
            self.error(ErrorCode::E2005, format!("invalid event '{name}'"));
            Expression::InvalidIdentifier(InvalidIdentifier {
                token: event_token,
                value: name,
            })
        };

        let mut priority = None;
        if self.peek_token.literal == "priority" && !self.peek_ends_command() {
            self.next_token();
            if self.peek_is(TokenKind::Number) {
                self.next_token();
                priority = self.cur_token.literal.parse().ok();
            } else {
                self.peek_error(ErrorCode::E3001, "a priority number");
            }
        }

        if !self.expect_block_open("event name") {
            return None;
        }
        debug!(event = %event, line = token.line, "event handler");
        let body = self.parse_block_statement();
        Some(Expression::When(WhenExpression {
            token,
            event: Box::new(event),
            priority,
            body,
        }))
    }
}
