//! Commands and their words.
//!
//! A Tcl command is a name followed by whitespace-separated words. A word
//! is one or more adjacent pieces: bare text, `$var`, `"..."`, `[...]` or a
//! single `{...}`. Commands with a known shape (`string`, `class`,
//! `regsub`, `pool`, `node`, namespaced commands) get a dedicated node and
//! argument checks; every other command is a `CommandInvocation`.

use irule_diagnostic::ErrorCode;
use irule_ir::ast::{
    ArrayLiteral, BooleanLiteral, ClassCommand, CommandInvocation, CommandSubstitution, HashLiteral,
    Identifier, IndexExpression, InterpolatedString, InvalidIdentifier, IpAddressLiteral,
    ListLiteral, MapLiteral, NamespacedCommand, NodeStatement, NumberLiteral, RegexPattern,
    RegsubExpression, StringLiteral, StringOperation, TargetKind,
};
use irule_ir::builtins::{
    is_class_match_operator, is_class_subcommand, is_http_header_subcommand, is_regsub_flag,
    string_operation_arity, CLASS_OPTIONS,
};
use irule_ir::{CommandFamily, Expression, Node, Span, Token, TokenKind};
use irule_stack::ensure_sufficient_stack;

use crate::symbols::SymbolKind;
use crate::validate::{
    array_base, is_valid_header_name, is_valid_irule_identifier, is_valid_variable_name,
    IdentContext,
};
use crate::{Nesting, Parser, Precedence};

/// Tokens that begin a command rather than an expression.
fn starts_command(token: &Token) -> bool {
    match token.kind {
        TokenKind::Ident => !token.is_plus_word(),
        TokenKind::StringCmd
        | TokenKind::Regsub
        | TokenKind::Class
        | TokenKind::Pool
        | TokenKind::Node
        | TokenKind::Log
        | TokenKind::When
        | TokenKind::Set
        | TokenKind::If
        | TokenKind::Switch
        | TokenKind::Foreach
        | TokenKind::Return => true,
        kind => kind.command_family().is_some(),
    }
}

/// `-name` option words; `-1` is a number, not an option.
fn is_option_word(expr: &Expression) -> bool {
    expr.word_text().is_some_and(|text| {
        let mut bytes = text.bytes();
        bytes.next() == Some(b'-')
            && bytes
                .next()
                .is_some_and(|b| b.is_ascii_alphabetic() || b == b'-')
    })
}

/// Positional (non-option) arguments.
fn positional(args: &[Expression]) -> impl Iterator<Item = &Expression> {
    args.iter().filter(|arg| !is_option_word(arg))
}

/// Pieces that contribute plain text to a word.
fn is_literal_piece(piece: &Expression) -> bool {
    piece.word_text().is_some()
}

impl<'a> Parser<'a> {
    /// A command, or an expression when an operator follows the first
    /// word (`$a eq "x"`, `5 + true`). Words after an expression make it
    /// the name of a command (`$handler arg`).
    pub(crate) fn parse_command_or_expression(&mut self) -> Option<Expression> {
        if starts_command(&self.cur_token)
            && (self.peek_ends_command() || !Precedence::is_statement_operator(&self.peek_token))
        {
            return self.parse_command();
        }
        let expression = self.parse_expression(Precedence::Lowest)?;
        if self.peek_ends_command() {
            return Some(expression);
        }
        let token = expression.token().clone();
        let args = self.parse_args();
        Some(Expression::Command(CommandInvocation {
            token,
            name: Box::new(expression),
            args,
        }))
    }

    pub(crate) fn parse_command(&mut self) -> Option<Expression> {
        let kind = self.cur_token.kind;
        if let Some(family) = kind.command_family() {
            return Some(self.parse_namespaced_command(family));
        }
        if kind == TokenKind::Ident {
            // Unlisted `HTTP::`, `SSL::` and `LB::` commands are accepted by
            // prefix; `IP::` names outside the keyword table are not.
            match CommandFamily::of_name(&self.cur_token.literal) {
                Some(CommandFamily::Ip) | None => {}
                Some(family) => return Some(self.parse_namespaced_command(family)),
            }
        }
        match kind {
            TokenKind::When => self.parse_when_expression(),
            TokenKind::StringCmd => self.parse_string_operation(),
            TokenKind::Class => self.parse_class_command(),
            TokenKind::Regsub => Some(self.parse_regsub_expression()),
            TokenKind::Pool => Some(self.parse_node_statement(TargetKind::Pool)),
            TokenKind::Node => Some(self.parse_node_statement(TargetKind::Node)),
            TokenKind::Set => self.parse_set_command(),
            _ => Some(self.parse_generic_command()),
        }
    }

    /// Arguments up to the end of the current command.
    pub(crate) fn parse_args(&mut self) -> Vec<Expression> {
        let mut args = Vec::new();
        while !self.peek_ends_command() {
            self.next_token();
            if let Some(arg) = self.parse_word() {
                args.push(arg);
            }
        }
        args
    }

    fn declare_symbol(&mut self, kind: SymbolKind, line: u32) {
        if let Err(conflict) = self.symbols.declare(kind) {
            self.error_at(ErrorCode::E5001, line, conflict.message());
        }
    }

    // === Namespaced commands ===

    fn parse_namespaced_command(&mut self, family: CommandFamily) -> Expression {
        let token = self.cur_token.clone();
        let command = token.literal.clone();
        let line = token.line;
        let args = self.parse_args();
        match command.as_str() {
            "HTTP::header" => self.check_header_args(&args, line),
            "HTTP::redirect" => self.declare_symbol(SymbolKind::HTTP_REDIRECT, line),
            "HTTP::respond" => self.declare_symbol(SymbolKind::HTTP_RESPOND, line),
            _ => {}
        }
        Expression::namespaced(NamespacedCommand {
            token,
            family,
            command,
            args,
        })
    }

    /// The header name of `HTTP::header [subcommand] name ...`.
    fn check_header_args(&mut self, args: &[Expression], line: u32) {
        let mut words = positional(args);
        let Some(first) = words.next() else {
            return;
        };
        let name = match first.word_text() {
            Some(sub) if is_http_header_subcommand(sub) => words.next(),
            _ => Some(first),
        };
        let Some(text) = name.and_then(Expression::word_text) else {
            return;
        };
        if !is_valid_header_name(text) {
            self.error_at(
                ErrorCode::E2003,
                line,
                format!("invalid header name '{text}'"),
            );
        }
    }

    // === string ===

    fn parse_string_operation(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        if self.peek_ends_command() {
            self.error(ErrorCode::E3004, "missing string operation");
            return None;
        }
        self.next_token();
        let operation = self.cur_token.literal.clone();
        let arity = string_operation_arity(&operation);
        if arity.is_none() {
            self.error(
                ErrorCode::E3004,
                format!("invalid string operation '{operation}'"),
            );
        }
        let mut args = self.parse_args();
        if operation == "map" {
            to_map_literal(&mut args);
        }
        let given = positional(&args).count();
        if let Some(min) = arity.filter(|&min| given < min) {
            self.error_at(
                ErrorCode::E3001,
                token.line,
                format!(
                    "wrong # args: 'string {operation}' needs at least {min} argument(s), got {given}"
                ),
            );
        }
        Some(Expression::StringOp(StringOperation {
            token,
            operation,
            args,
        }))
    }

    // === class ===

    fn parse_class_command(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        if self.peek_ends_command() {
            self.error(ErrorCode::E3005, "missing class subcommand");
            return None;
        }
        self.next_token();
        let subcommand = self.cur_token.literal.clone();
        if !is_class_subcommand(&subcommand) {
            self.error(
                ErrorCode::E3005,
                format!("invalid class subcommand '{subcommand}'"),
            );
        }

        let mut options = Vec::new();
        while self.peek_is_option_word() {
            self.next_token();
            let option = self.raw_word_text().to_string();
            if !CLASS_OPTIONS.contains(&option.as_str()) {
                self.error(ErrorCode::E3005, format!("invalid class option '{option}'"));
            }
            let last = option == "--";
            options.push(option);
            if last {
                break;
            }
        }

        let args = self.parse_args();
        if matches!(subcommand.as_str(), "match" | "search") {
            if let [_, operator, _] = args.as_slice() {
                if let Some(op) = operator.word_text() {
                    if !is_class_match_operator(op) {
                        self.error_at(
                            ErrorCode::E3005,
                            token.line,
                            format!("invalid class {subcommand} operator '{op}'"),
                        );
                    }
                }
            } else {
                self.error_at(
                    ErrorCode::E3001,
                    token.line,
                    format!(
                        "wrong # args: 'class {subcommand}' takes item, operator and class, got {} argument(s)",
                        args.len()
                    ),
                );
            }
        }
        Some(Expression::Class(ClassCommand {
            token,
            subcommand,
            options,
            args,
        }))
    }

    // === regsub ===

    fn parse_regsub_expression(&mut self) -> Expression {
        let token = self.cur_token.clone();
        let mut flags = Vec::new();
        while self.peek_is_option_word() {
            self.next_token();
            let flag = self.raw_word_text().to_string();
            if flag == "--" {
                break;
            }
            if !is_regsub_flag(flag.trim_start_matches('-')) {
                self.error(ErrorCode::E3003, format!("invalid regsub flag '{flag}'"));
            }
            flags.push(flag);
        }

        let mut args = Vec::new();
        while !self.peek_ends_command() {
            self.next_token();
            let arg = if args.is_empty() && self.cur_is(TokenKind::LBrace) {
                let open = self.cur_token.clone();
                self.capture_raw_brace().map(|raw| {
                    Expression::Regex(RegexPattern {
                        token: open,
                        pattern: raw.body.to_string(),
                    })
                })
            } else {
                self.parse_word()
            };
            args.extend(arg);
        }

        let given = args.len();
        let [pattern, input, replacement, result_var]: [Expression; 4] = match args.try_into() {
            Ok(args) => args,
            Err(args) => {
                self.error_at(
                    ErrorCode::E3001,
                    token.line,
                    format!(
                        "wrong # args: regsub takes pattern, input, replacement and result variable, got {given}"
                    ),
                );
                let mut words: Vec<Expression> = flags
                    .into_iter()
                    .map(|flag| {
                        Expression::Identifier(Identifier::new(
                            Token::new(TokenKind::Ident, flag.clone(), token.line, Span::DUMMY),
                            flag,
                        ))
                    })
                    .collect();
                words.extend(args);
                let name = Identifier::new(token.clone(), token.literal.clone());
                return Expression::Command(CommandInvocation {
                    token,
                    name: Box::new(Expression::Identifier(name)),
                    args: words,
                });
            }
        };

        let result_var = match result_var {
            Expression::Identifier(ident) if !ident.is_variable => {
                let (target, declared) = self.variable_target(ident.token, &ident.value);
                if let Some(declared) = declared {
                    self.declared_variables.insert(declared);
                }
                target
            }
            other => other,
        };

        Expression::Regsub(RegsubExpression {
            token,
            flags,
            pattern: Box::new(pattern),
            input: Box::new(input),
            replacement: Box::new(replacement),
            result_var: Box::new(result_var),
        })
    }

    // === pool / node ===

    fn parse_node_statement(&mut self, kind: TargetKind) -> Expression {
        let token = self.cur_token.clone();
        let args = self.parse_args();
        if args.is_empty() {
            self.error(
                ErrorCode::E3001,
                format!("wrong # args: '{}' needs a target", kind.keyword()),
            );
        }
        let symbol = match kind {
            TargetKind::Pool => SymbolKind::POOL,
            TargetKind::Node => SymbolKind::NODE,
        };
        self.declare_symbol(symbol, token.line);
        Expression::NodeStatement(NodeStatement { token, kind, args })
    }

    // === set in command position ===

    /// `[set name value]`: a command that still declares its target.
    fn parse_set_command(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let (name, value) = self.parse_set_parts()?;
        let keyword = Identifier::new(token.clone(), token.literal.clone());
        Some(Expression::Command(CommandInvocation {
            token,
            name: Box::new(Expression::Identifier(keyword)),
            args: vec![name, value],
        }))
    }

    // === generic commands ===

    fn parse_generic_command(&mut self) -> Expression {
        let token = self.cur_token.clone();
        let name = self.standalone_word(token.clone());
        let args = self.parse_args();
        self.declare_assigned(&token.literal, &args);
        Expression::Command(CommandInvocation {
            token,
            name: Box::new(name),
            args,
        })
    }

    /// A bare word validated as a standalone identifier.
    pub(crate) fn standalone_word(&mut self, token: Token) -> Expression {
        let name = token.literal.clone();
        if is_valid_irule_identifier(&name, IdentContext::Standalone, &self.declared_variables) {
            let mut ident = Identifier::new(token, name);
            ident.is_reserved = ident.token.kind.is_reserved_word();
            Expression::Identifier(ident)
        } else {
            self.error_at(
                ErrorCode::E2001,
                token.line,
                format!("invalid identifier '{name}'"),
            );
            Expression::InvalidIdentifier(InvalidIdentifier { token, value: name })
        }
    }

    /// Variables written by core commands that take a variable name.
    fn declare_assigned(&mut self, command: &str, args: &[Expression]) {
        let skip = match command {
            "incr" | "append" | "lappend" | "lset" => {
                let first = positional(args).next().and_then(Expression::word_text);
                if let Some(name) = first {
                    self.declared_variables.insert(array_base(name).to_string());
                }
                return;
            }
            "regexp" | "scan" => 2,
            "lassign" | "catch" => 1,
            _ => return,
        };
        let names: Vec<String> = positional(args)
            .skip(skip)
            .filter_map(Expression::word_text)
            .filter(|name| is_valid_variable_name(name))
            .map(|name| array_base(name).to_string())
            .collect();
        self.declared_variables.extend(names);
    }

    // === Words ===

    /// One word, gluing adjacent pieces.
    pub(crate) fn parse_word(&mut self) -> Option<Expression> {
        self.parse_glued(Self::peek_glues)
    }

    /// One operand inside an expression. Operators never glue here, nor
    /// does a negative number, so `$a-1` is a subtraction rather than a
    /// word.
    pub(crate) fn parse_operand(&mut self) -> Option<Expression> {
        self.parse_glued(|parser| {
            parser.peek_glues()
                && !(parser.peek_is(TokenKind::Number)
                    && parser.peek_token.literal.starts_with('-'))
                && matches!(
                    parser.peek_token.kind,
                    TokenKind::Variable
                        | TokenKind::LBracket
                        | TokenKind::String
                        | TokenKind::Number
                        | TokenKind::Colon
                        | TokenKind::DoubleColon
                        | TokenKind::Dollar
                        | TokenKind::Ident
                )
                && !parser.peek_token.is_plus_word()
        })
    }

    fn parse_glued(&mut self, glues: fn(&Self) -> bool) -> Option<Expression> {
        let token = self.cur_token.clone();
        let start = token.span.start;
        let first = self.parse_word_piece()?;
        if !glues(self) {
            return Some(first);
        }

        let mut pieces = vec![(first, Span::new(start, self.cur_token.span.end))];
        while glues(self) {
            self.next_token();
            let piece_start = self.cur_token.span.start;
            if let Some(piece) = self.parse_word_piece() {
                pieces.push((piece, Span::new(piece_start, self.cur_token.span.end)));
            }
        }
        let raw = self.slice(Span::new(start, self.cur_token.span.end));
        if pieces.iter().all(|(piece, _)| is_literal_piece(piece)) {
            return Some(Expression::Identifier(Identifier::new(token, raw)));
        }
        let parts = self.word_parts(pieces);
        Some(Expression::Interpolated(InterpolatedString {
            token,
            raw: raw.to_string(),
            parts,
        }))
    }

    /// Merge runs of literal pieces into `StringLiteral` parts.
    fn word_parts(&self, pieces: Vec<(Expression, Span)>) -> Vec<Expression> {
        let mut parts = Vec::new();
        let mut text: Option<(Token, Span)> = None;
        for (piece, span) in pieces {
            if is_literal_piece(&piece) {
                text = Some(match text {
                    Some((token, run)) => (token, run.merge(span)),
                    None => (piece.token().clone(), span),
                });
                continue;
            }
            if let Some((token, run)) = text.take() {
                parts.push(self.text_part(token, run));
            }
            parts.push(match piece {
                Expression::Array(array) => Expression::CommandSubstitution(CommandSubstitution {
                    token: array.token,
                    commands: array.elements,
                }),
                other => other,
            });
        }
        if let Some((token, run)) = text {
            parts.push(self.text_part(token, run));
        }
        parts
    }

    fn text_part(&self, token: Token, span: Span) -> Expression {
        Expression::String(StringLiteral {
            token,
            value: self.slice(span).to_string(),
        })
    }

    /// A single word piece under the cursor.
    pub(super) fn parse_word_piece(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        match token.kind {
            TokenKind::LBracket => self.parse_bracket_command(),
            TokenKind::LBrace => self.parse_brace_word(),
            TokenKind::String => Some(self.parse_interpolated(&token)),
            TokenKind::Variable => self.parse_variable_reference(),
            TokenKind::Number => Some(self.parse_number_literal()),
            TokenKind::IpAddress => Some(Expression::IpAddress(IpAddressLiteral {
                value: token.literal.clone(),
                token,
            })),
            TokenKind::True | TokenKind::False => Some(Expression::Boolean(BooleanLiteral {
                value: token.kind == TokenKind::True,
                token,
            })),
            TokenKind::Illegal => {
                self.report_illegal();
                None
            }
            _ => {
                let mut ident = Identifier::new(token.clone(), token.literal);
                ident.is_reserved = token.kind.is_reserved_word();
                Some(Expression::Identifier(ident))
            }
        }
    }

    pub(crate) fn parse_number_literal(&mut self) -> Expression {
        let token = self.cur_token.clone();
        match token.literal.parse::<i64>() {
            Ok(value) => Expression::Number(NumberLiteral { token, value }),
            Err(_) => {
                self.error(
                    ErrorCode::E0004,
                    format!("integer literal '{}' is out of range", token.literal),
                );
                Expression::InvalidIdentifier(InvalidIdentifier {
                    value: token.literal.clone(),
                    token,
                })
            }
        }
    }

    /// `$name`, `${name}` or `$name(key)`.
    fn parse_variable_reference(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let name = variable_name(&token.literal).to_string();
        self.check_declared(&name, token.line);
        let variable = Expression::Identifier(Identifier::variable(token.clone(), name));
        if !(self.peek_is(TokenKind::LParen) && self.peek_token.flags.is_adjacent()) {
            return Some(variable);
        }

        self.next_token();
        let open = self.cur_token.clone();
        if self.peek_is(TokenKind::RParen) {
            self.error(ErrorCode::E1002, "empty array index");
            self.next_token();
            return Some(variable);
        }
        self.nesting.push(Nesting::Index);
        self.next_token();
        let index = self.parse_word();
        self.nesting.pop();
        if self.peek_is(TokenKind::RParen) {
            self.next_token();
        } else {
            self.error_at(
                ErrorCode::E1006,
                open.line,
                format!("missing ')' for array index opened on line {}", open.line),
            );
        }
        Some(Expression::Index(IndexExpression {
            token,
            left: Box::new(variable),
            index: Box::new(index?),
        }))
    }

    /// Report `$name` when nothing has declared it. Namespaced names
    /// (`static::x`, `::x`) live outside the rule and are never reported.
    fn check_declared(&mut self, name: &str, line: u32) {
        if !self.check_variables || name.contains("::") {
            return;
        }
        if !self.declared_variables.contains(name) {
            self.error_at(
                ErrorCode::E2004,
                line,
                format!("undeclared variable '${name}'"),
            );
        }
    }

    /// `[cmd ...; cmd ...]` with the cursor on `[`. Ends on `]`.
    pub(crate) fn parse_bracket_command(&mut self) -> Option<Expression> {
        ensure_sufficient_stack(|| {
            let token = self.cur_token.clone();
            let mut elements = Vec::new();
            self.nesting.push(Nesting::Bracket);
            loop {
                match self.peek_token.kind {
                    TokenKind::RBracket => {
                        self.next_token();
                        break;
                    }
                    TokenKind::Eof | TokenKind::RBrace => {
                        self.error_at(
                            ErrorCode::E1006,
                            token.line,
                            format!("missing close-bracket for '[' opened on line {}", token.line),
                        );
                        break;
                    }
                    TokenKind::Semicolon => {
                        self.next_token();
                        continue;
                    }
                    _ => {}
                }
                self.next_token();
                if let Some(element) = self.parse_command_or_expression() {
                    elements.push(element);
                }
                self.finish_command(true);
            }
            self.nesting.pop();
            Some(Expression::Array(ArrayLiteral { token, elements }))
        })
    }

    /// A `{...}` word: a list of words, or a hash when the first word is
    /// followed by `:`. The body is parsed in a quiet sub-parser; when it
    /// does not parse cleanly the word is kept as one raw element.
    pub(super) fn parse_brace_word(&mut self) -> Option<Expression> {
        let open = self.cur_token.clone();
        let raw = self.capture_raw_brace()?;
        ensure_sufficient_stack(|| Some(self.brace_list(open, raw.body)))
    }

    fn brace_list(&mut self, open: Token, body: &str) -> Expression {
        let mut sub = Parser::embedded(body, open.line, Nesting::Expr);
        sub.declared_variables.clone_from(&self.declared_variables);
        let parsed = sub.parse_list_items(open.clone());
        if sub.diagnostics.is_empty() {
            self.absorb(sub);
            return parsed;
        }
        let text = Identifier::new(
            Token::new(TokenKind::Ident, body, open.line, open.span),
            body,
        );
        Expression::List(ListLiteral {
            token: open,
            elements: vec![Expression::Identifier(text)],
        })
    }

    /// All items of a brace body, this parser being the sub-parser.
    fn parse_list_items(&mut self, open: Token) -> Expression {
        let hash_shaped = !self.cur_is(TokenKind::Eof)
            && self.peek_is(TokenKind::Colon)
            && self.peek_token.flags.is_adjacent();
        if hash_shaped {
            return Expression::Hash(HashLiteral {
                token: open,
                pairs: self.parse_hash_pairs(),
            });
        }
        let mut elements = Vec::new();
        while !self.cur_is(TokenKind::Eof) {
            if let Some(element) = self.parse_word() {
                elements.push(element);
            }
            self.next_token();
        }
        Expression::List(ListLiteral {
            token: open,
            elements,
        })
    }

    /// `key: value, key: value`
    fn parse_hash_pairs(&mut self) -> Vec<(Expression, Expression)> {
        let mut pairs = Vec::new();
        loop {
            let Some(key) = self.parse_word_piece() else {
                break;
            };
            if !self.peek_is(TokenKind::Colon) {
                self.peek_error(ErrorCode::E1001, "':' after hash key");
                break;
            }
            self.next_token();
            if self.peek_is(TokenKind::Eof) || self.peek_is(TokenKind::Comma) {
                self.peek_error(ErrorCode::E1002, "a hash value");
                break;
            }
            self.next_token();
            let Some(value) = self.parse_word_piece() else {
                break;
            };
            pairs.push((key, value));
            if !self.peek_is(TokenKind::Comma) {
                if !self.peek_is(TokenKind::Eof) {
                    self.peek_error(ErrorCode::E1001, "',' or end of hash");
                }
                break;
            }
            self.next_token();
            if self.peek_is(TokenKind::Eof) {
                break;
            }
            self.next_token();
        }
        pairs
    }
}

/// Name of a `$name` or `${name}` token.
fn variable_name(literal: &str) -> &str {
    let name = literal.strip_prefix('$').unwrap_or(literal);
    name.strip_prefix('{')
        .and_then(|inner| inner.strip_suffix('}'))
        .unwrap_or(name)
}

/// `string map {a b c d}` takes its first list as pairs.
fn to_map_literal(args: &mut [Expression]) {
    let Some(slot) = args
        .iter_mut()
        .find(|arg| matches!(arg, Expression::List(_)))
    else {
        return;
    };
    let Expression::List(list) = slot else {
        return;
    };
    if list.elements.len() % 2 != 0 {
        return;
    }
    let token = list.token.clone();
    let mut elements = std::mem::take(&mut list.elements).into_iter();
    let mut pairs = Vec::new();
    while let (Some(from), Some(to)) = (elements.next(), elements.next()) {
        pairs.push((from, to));
    }
    *slot = Expression::Map(MapLiteral { token, pairs });
}
