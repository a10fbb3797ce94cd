//! `switch ?options? ?--? value { pattern body ... }`
//!
//! Patterns are never parsed as code. Braced patterns are captured
//! verbatim; quoted and bare patterns keep their text. Under `-regex` or
//! `-glob` every pattern becomes a `RegexPattern` or `GlobPattern`;
//! otherwise braced patterns are globs and the rest are plain strings.

use irule_diagnostic::ErrorCode;
use irule_ir::ast::{
    CaseStatement, GlobPattern, MultiPattern, RegexPattern, StringLiteral, SwitchFlags,
    SwitchStatement,
};
use irule_ir::{Expression, Statement, Token, TokenKind};

use crate::{Nesting, Parser};

/// Pattern text as the switch's matching mode sees it.
fn classify_pattern(token: Token, text: String, flags: SwitchFlags, braced: bool) -> Expression {
    if flags.contains(SwitchFlags::REGEX) {
        Expression::Regex(RegexPattern {
            token,
            pattern: text,
        })
    } else if braced || flags.contains(SwitchFlags::GLOB) {
        Expression::Glob(GlobPattern {
            token,
            pattern: text,
        })
    } else {
        Expression::String(StringLiteral { token, value: text })
    }
}

impl Parser<'_> {
    pub(crate) fn parse_switch_statement(&mut self) -> Option<Statement> {
        let token = self.cur_token.clone();
        let mut flags = SwitchFlags::empty();
        while self.peek_is_option_word() {
            self.next_token();
            let option = self.raw_word_text();
            if option == "--" {
                break;
            }
            match SwitchFlags::from_option(option) {
                Some(flag) => flags |= flag,
                None => self.error(
                    ErrorCode::E3002,
                    format!("invalid switch option '{option}'"),
                ),
            }
        }

        if self.peek_ends_command() {
            self.peek_error(ErrorCode::E3001, "a value to switch on");
            return None;
        }
        self.next_token();
        let value = self.parse_word()?;
        if !self.expect_block_open("switch value") {
            return None;
        }
        let cases = self.parse_switch_body(flags);
        Some(Statement::Switch(SwitchStatement {
            token,
            flags,
            value,
            cases,
        }))
    }

    /// Cases up to the closing `}` of the body opened at the current token.
    fn parse_switch_body(&mut self, flags: SwitchFlags) -> Vec<CaseStatement> {
        let open = self.cur_token.clone();
        let mut cases = Vec::new();
        self.nesting.push(Nesting::Expr);
        loop {
            match self.peek_token.kind {
                TokenKind::RBrace => {
                    self.next_token();
                    break;
                }
                TokenKind::Eof => {
                    self.error_at(
                        ErrorCode::E1003,
                        open.line,
                        format!(
                            "missing closing brace for switch body opened on line {}",
                            open.line
                        ),
                    );
                    break;
                }
                _ => {}
            }
            self.next_token();
            match self.parse_case(flags) {
                Some(case) => cases.push(case),
                None => self.skip_case_line(),
            }
        }
        self.nesting.pop();
        cases
    }

    /// One `pattern ?- pattern ...? body` or `default body` arm.
    fn parse_case(&mut self, flags: SwitchFlags) -> Option<CaseStatement> {
        let token = self.cur_token.clone();
        let pattern = if self.cur_is(TokenKind::Default) {
            None
        } else {
            let mut patterns = vec![self.parse_case_pattern(flags)?];
            // `-` as a body falls through to the next pattern.
            while self.peek_is_lone_dash() {
                self.next_token();
                if self.peek_is(TokenKind::RBrace) || self.peek_is(TokenKind::Eof) {
                    self.error(
                        ErrorCode::E1005,
                        "no body after fall-through '-' in last switch case",
                    );
                    return None;
                }
                self.next_token();
                patterns.push(self.parse_case_pattern(flags)?);
            }
            if patterns.len() == 1 {
                patterns.pop()
            } else {
                Some(Expression::MultiPattern(MultiPattern {
                    token: token.clone(),
                    patterns,
                }))
            }
        };
        if !self.expect_block_open("switch pattern") {
            return None;
        }
        let body = self.parse_block_statement();
        Some(CaseStatement {
            token,
            pattern,
            body,
        })
    }

    fn parse_case_pattern(&mut self, flags: SwitchFlags) -> Option<Expression> {
        let token = self.cur_token.clone();
        match token.kind {
            TokenKind::LBrace => {
                let raw = self.capture_raw_brace()?;
                Some(classify_pattern(token, raw.body.to_string(), flags, true))
            }
            TokenKind::String => {
                let text = token.literal.clone();
                Some(classify_pattern(token, text, flags, false))
            }
            TokenKind::Illegal => {
                self.report_illegal();
                None
            }
            kind if kind.is_terminator() => {
                let found = Self::describe(&token);
                self.error(ErrorCode::E1001, format!("unexpected {found} in switch body"));
                None
            }
            _ => {
                let text = self.raw_word_text().to_string();
                Some(classify_pattern(token, text, flags, false))
            }
        }
    }

    /// Recover from a broken arm by dropping the rest of its line.
    fn skip_case_line(&mut self) {
        while !self.peek_token.flags.starts_line()
            && !self.peek_is(TokenKind::RBrace)
            && !self.peek_is(TokenKind::Eof)
        {
            self.next_token();
            if self.cur_is(TokenKind::LBrace) {
                self.capture_raw_brace();
            }
        }
    }
}
