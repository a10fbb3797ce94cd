//! Lexer for F5 iRules.
//!
//! A byte-by-byte scanner producing tokens on demand. Whitespace and `#`
//! comments are not tokens; instead every token carries [`TokenFlags`]
//! saying whether spaces or a newline separated it from its predecessor,
//! which is what Tcl's word and command boundaries are made of.
//!
//! The lexer never fails. Lexical problems become `ILLEGAL` tokens whose
//! literal is the message, and are also recorded in [`Lexer::errors`].

mod cursor;
mod keywords;
mod lex_error;

pub use cursor::Cursor;
pub use keywords::{lookup as lookup_keyword, HTTP_KEYWORDS, IP_KEYWORDS, LB_KEYWORDS, SSL_KEYWORDS};
pub use lex_error::{LexError, LexErrorKind};

use irule_ir::{Span, Token, TokenFlags, TokenKind};
use tracing::trace;

/// Scanner state, restorable for raw brace capture.
#[derive(Clone, Copy, Debug)]
struct Checkpoint {
    pos: u32,
    line: u32,
    brace_depth: u32,
    bracket_depth: u32,
    errors: usize,
}

/// The verbatim body of a `{...}` word, captured without tokenizing it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawBraced<'a> {
    /// Text between the braces.
    pub body: &'a str,
    /// Span of the whole word, braces included.
    pub span: Span,
}

/// Lexer over one source string.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    source: &'a str,
    line: u32,
    /// Open `{` not yet closed.
    brace_depth: u32,
    /// Open `[` not yet closed.
    bracket_depth: u32,
    errors: Vec<LexError>,
    /// State before the most recent token was scanned.
    before_last: Checkpoint,
}

#[inline]
fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

#[inline]
fn is_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Bytes that continue a bare identifier besides `::`.
#[inline]
fn is_ident_continue(b: u8) -> bool {
    is_name_char(b) || b == b'.' || b == b'-'
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut lexer = Lexer {
            cursor: Cursor::new(source),
            source,
            line: 1,
            brace_depth: 0,
            bracket_depth: 0,
            errors: Vec::new(),
            before_last: Checkpoint {
                pos: 0,
                line: 1,
                brace_depth: 0,
                bracket_depth: 0,
                errors: 0,
            },
        };
        lexer.before_last = lexer.checkpoint();
        lexer
    }

    /// Start line numbering at `line` instead of 1.
    ///
    /// Used for snippets lifted out of a larger source, such as command
    /// substitutions inside a string.
    #[must_use]
    pub fn starting_at_line(mut self, line: u32) -> Self {
        self.line = line.max(1);
        self.before_last = self.checkpoint();
        self
    }

    /// Current line number.
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// The full source text.
    #[inline]
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Accumulated lexical errors, in source order.
    #[inline]
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    /// The error recorded for an `ILLEGAL` token starting at `span.start`.
    pub fn error_at(&self, span: Span) -> Option<&LexError> {
        self.errors.iter().find(|err| err.span.start == span.start)
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.cursor.pos(),
            line: self.line,
            brace_depth: self.brace_depth,
            bracket_depth: self.bracket_depth,
            errors: self.errors.len(),
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.cursor.set_pos(checkpoint.pos);
        self.line = checkpoint.line;
        self.brace_depth = checkpoint.brace_depth;
        self.bracket_depth = checkpoint.bracket_depth;
        self.errors.truncate(checkpoint.errors);
    }

    /// Scan the next token. After the end of input every call returns `EOF`.
    pub fn next_token(&mut self) -> Token {
        self.before_last = self.checkpoint();
        let flags = self.skip_trivia();
        let start = self.cursor.pos();
        let line = self.line;
        let (kind, literal) = self.scan(start, line);
        let span = Span::new(start, self.cursor.pos());
        trace!(kind = %kind, line, start, "token");
        Token::new(kind, literal, line, span).with_flags(flags)
    }

    /// Skip whitespace, line continuations and comments.
    fn skip_trivia(&mut self) -> TokenFlags {
        let mut flags = TokenFlags::empty();
        loop {
            match self.cursor.current() {
                b' ' | b'\t' | b'\r' | b'\x0c' if !self.cursor.is_eof() => {
                    self.cursor.advance();
                    flags |= TokenFlags::SPACE_BEFORE;
                }
                b'\n' => {
                    self.cursor.advance();
                    self.line += 1;
                    flags |= TokenFlags::NEWLINE_BEFORE;
                }
                b'\\' if self.cursor.peek() == b'\n' => {
                    self.cursor.advance_n(2);
                    self.line += 1;
                    flags |= TokenFlags::SPACE_BEFORE;
                }
                b'\\' if self.cursor.peek() == b'\r' && self.cursor.peek2() == b'\n' => {
                    self.cursor.advance_n(3);
                    self.line += 1;
                    flags |= TokenFlags::SPACE_BEFORE;
                }
                b'#' => {
                    self.cursor.eat_until_newline_or_eof();
                    flags |= TokenFlags::TRIVIA_BEFORE;
                }
                _ => return flags,
            }
        }
    }

    fn scan(&mut self, start: u32, line: u32) -> (TokenKind, String) {
        if self.cursor.is_eof() {
            return (TokenKind::Eof, String::new());
        }
        let c = self.cursor.current();
        let next = self.cursor.peek();
        match c {
            b'{' => {
                self.brace_depth += 1;
                self.single(TokenKind::LBrace, "{")
            }
            b'}' => self.closer(start, line, '}'),
            b'[' => {
                self.bracket_depth += 1;
                self.single(TokenKind::LBracket, "[")
            }
            b']' => self.closer(start, line, ']'),
            b'(' => self.single(TokenKind::LParen, "("),
            b')' => self.single(TokenKind::RParen, ")"),
            b',' => self.single(TokenKind::Comma, ","),
            b';' => self.single(TokenKind::Semicolon, ";"),
            b':' if next == b':' => self.double(TokenKind::DoubleColon, "::"),
            b':' => self.single(TokenKind::Colon, ":"),
            b'$' => self.scan_variable(start),
            b'"' => self.scan_string(start, line),
            // `+` stays a word so it can be a command argument; the parser
            // reads it as PLUS in expression position.
            b'+' => self.single(TokenKind::Ident, "+"),
            b'-' if next.is_ascii_digit() => self.scan_number(start, line),
            b'-' => self.single(TokenKind::Minus, "-"),
            b'*' => self.single(TokenKind::Asterisk, "*"),
            b'/' => self.single(TokenKind::Slash, "/"),
            b'%' => self.single(TokenKind::Percent, "%"),
            b'^' => self.single(TokenKind::Caret, "^"),
            b'!' if next == b'=' => self.double(TokenKind::NotEq, "!="),
            b'!' => self.single(TokenKind::Bang, "!"),
            b'<' if next == b'=' => self.double(TokenKind::LtEq, "<="),
            b'<' => self.single(TokenKind::Lt, "<"),
            b'>' if next == b'=' => self.double(TokenKind::GtEq, ">="),
            b'>' => self.single(TokenKind::Gt, ">"),
            b'=' if next == b'=' => self.double(TokenKind::Eq, "=="),
            b'&' if next == b'&' => self.double(TokenKind::And, "&&"),
            b'|' if next == b'|' => self.double(TokenKind::Or, "||"),
            b'0'..=b'9' => self.scan_number(start, line),
            b if is_ident_start(b) => self.scan_ident(start),
            b'\\' => {
                // Backslash escape outside quotes: a one-character word piece.
                self.cursor.advance();
                if !self.cursor.is_eof() {
                    self.cursor.advance_char();
                }
                (TokenKind::Ident, self.cursor.slice_from(start).to_string())
            }
            _ => {
                let ch = self.cursor.current_char();
                self.cursor.advance_char();
                self.illegal(LexErrorKind::IllegalCharacter { ch }, start, line)
            }
        }
    }

    #[inline]
    fn single(&mut self, kind: TokenKind, literal: &str) -> (TokenKind, String) {
        self.cursor.advance();
        (kind, literal.to_string())
    }

    #[inline]
    fn double(&mut self, kind: TokenKind, literal: &str) -> (TokenKind, String) {
        self.cursor.advance_n(2);
        (kind, literal.to_string())
    }

    fn illegal(&mut self, kind: LexErrorKind, start: u32, line: u32) -> (TokenKind, String) {
        let err = LexError::new(kind, Span::new(start, self.cursor.pos()), line);
        let message = err.message();
        self.errors.push(err);
        (TokenKind::Illegal, message)
    }

    fn closer(&mut self, start: u32, line: u32, closer: char) -> (TokenKind, String) {
        self.cursor.advance();
        let is_brace = closer == '}';
        let depth = if is_brace {
            self.brace_depth
        } else {
            self.bracket_depth
        };
        if depth == 0 {
            return self.illegal(LexErrorKind::StrayCloser { closer }, start, line);
        }
        if is_brace {
            self.brace_depth -= 1;
            (TokenKind::RBrace, "}".to_string())
        } else {
            self.bracket_depth -= 1;
            (TokenKind::RBracket, "]".to_string())
        }
    }

    /// `$name`, `$ns::name`, `$::name` or `${any text}`.
    ///
    /// A `$` without a well-formed name is a lone `DOLLAR`.
    fn scan_variable(&mut self, start: u32) -> (TokenKind, String) {
        self.cursor.advance();
        if self.cursor.current() == b'{' {
            let body_start = self.cursor.pos() + 1;
            let rest = self.cursor.slice(body_start, self.cursor.source_len());
            let close = rest.find(['}', '\n']);
            if let Some(offset) = close.filter(|&i| rest.as_bytes()[i] == b'}' && i > 0) {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "offset < source_len which fits in u32"
                )]
                self.cursor.set_pos(body_start + offset as u32 + 1);
                return (TokenKind::Variable, self.cursor.slice_from(start).to_string());
            }
            return (TokenKind::Dollar, "$".to_string());
        }
        loop {
            let b = self.cursor.current();
            if is_name_char(b) && !self.cursor.is_eof() {
                self.cursor.advance();
            } else if b == b':' && self.cursor.peek() == b':' {
                self.cursor.advance_n(2);
            } else {
                break;
            }
        }
        if self.cursor.pos() == start + 1 {
            return (TokenKind::Dollar, "$".to_string());
        }
        (TokenKind::Variable, self.cursor.slice_from(start).to_string())
    }

    /// Quoted string. The literal is the body, verbatim; a backslash keeps
    /// the following character from closing the string. A `[` whose
    /// substitution closes opens a nested command, and quotes inside it
    /// belong to that command; a `[` that never closes is plain text.
    fn scan_string(&mut self, start: u32, line: u32) -> (TokenKind, String) {
        self.cursor.advance();
        let body_start = self.cursor.pos();
        loop {
            let (found, newlines) = self.cursor.eat_string_run(false);
            self.line += newlines;
            match found {
                Some(b'"') => {
                    let body = self.cursor.slice_from(body_start).to_string();
                    self.cursor.advance();
                    return (TokenKind::String, body);
                }
                Some(b'[') => {
                    self.cursor.advance();
                    let mut checkpoint = self.cursor;
                    if let Some(newlines) = skip_substitution(&mut checkpoint) {
                        self.cursor = checkpoint;
                        self.line += newlines;
                    }
                }
                Some(_) => {
                    self.cursor.advance();
                    if self.cursor.current() == b'\n' {
                        self.line += 1;
                    }
                    if !self.cursor.is_eof() {
                        self.cursor.advance_char();
                    }
                }
                None => return self.illegal(LexErrorKind::UnterminatedString, start, line),
            }
        }
    }

    /// Digits, optionally negative; a dotted quad is an `IP_ADDRESS`.
    fn scan_number(&mut self, start: u32, line: u32) -> (TokenKind, String) {
        if self.cursor.current() == b'-' {
            self.cursor.advance();
        }
        self.cursor.eat_while(|b| b.is_ascii_digit());
        let mut dots = 0;
        while self.cursor.current() == b'.' && self.cursor.peek().is_ascii_digit() {
            self.cursor.advance();
            self.cursor.eat_while(|b| b.is_ascii_digit());
            dots += 1;
        }
        let text = self.cursor.slice_from(start);
        if dots == 0 {
            return (TokenKind::Number, text.to_string());
        }
        let is_quad = dots == 3
            && !text.starts_with('-')
            && text.split('.').all(|octet| octet.parse::<u8>().is_ok());
        if is_quad {
            (TokenKind::IpAddress, text.to_string())
        } else {
            let text = text.to_string();
            self.illegal(LexErrorKind::InvalidNumber { text }, start, line)
        }
    }

    /// Identifier, possibly namespaced (`HTTP::uri`), dotted
    /// (`local0.info`) or hyphenated (`X-Forwarded-For`).
    fn scan_ident(&mut self, start: u32) -> (TokenKind, String) {
        loop {
            let b = self.cursor.current();
            if is_ident_continue(b) && !self.cursor.is_eof() {
                self.cursor.advance();
            } else if b == b':'
                && (self.cursor.peek() == b':' || is_name_char(self.cursor.peek()))
            {
                let n = if self.cursor.peek() == b':' { 2 } else { 1 };
                self.cursor.advance_n(n);
            } else {
                break;
            }
        }
        let text = self.cursor.slice_from(start);
        let kind = keywords::lookup(text).unwrap_or(TokenKind::Ident);
        (kind, text.to_string())
    }

    /// Capture the body of the `{` word `open` verbatim.
    ///
    /// Must be called right after the token following `open` was scanned
    /// (the parser's one-token lookahead). That token is discarded and
    /// scanning resumes after the matching `}`. Nested braces are matched;
    /// a backslash escapes the next character. Returns `None`, leaving the
    /// lexer untouched, when no matching `}` exists.
    pub fn capture_braced(&mut self, open: &Token) -> Option<RawBraced<'a>> {
        if open.kind != TokenKind::LBrace || self.before_last.pos != open.span.end {
            return None;
        }
        let bytes = self.source.as_bytes();
        let body_start = open.span.end as usize;
        let mut depth = 1u32;
        let mut newlines = 0u32;
        let mut i = body_start;
        while i < bytes.len() {
            match bytes[i] {
                b'\\' => {
                    if bytes.get(i + 1) == Some(&b'\n') {
                        newlines += 1;
                    }
                    i += 1;
                }
                b'\n' => newlines += 1,
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
            i += 1;
        }
        if depth != 0 || i >= bytes.len() {
            return None;
        }
        let body = self.source.get(body_start..i)?;
        self.restore(self.before_last);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "i < source_len which fits in u32"
        )]
        let close_end = i as u32 + 1;
        self.cursor.set_pos(close_end);
        self.line = open.line + newlines;
        self.brace_depth = self.brace_depth.saturating_sub(1);
        Some(RawBraced {
            body,
            span: Span::new(open.span.start, close_end),
        })
    }
}

/// Move `cursor`, just past a `[` inside a string, to just past its
/// matching `]`. Returns the newlines crossed, or `None` when the input
/// ends first. Quotes inside the substitution open nested words.
fn skip_substitution(cursor: &mut Cursor<'_>) -> Option<u32> {
    let mut pending = vec![b']'];
    let mut newlines = 0;
    loop {
        let in_bracket = pending.last() == Some(&b']');
        let (found, crossed) = cursor.eat_string_run(in_bracket);
        newlines += crossed;
        match found? {
            b'"' => {
                if pending.last() == Some(&b'"') {
                    pending.pop();
                } else {
                    pending.push(b'"');
                }
                cursor.advance();
            }
            b'[' => {
                if in_bracket {
                    pending.push(b']');
                }
                cursor.advance();
            }
            b']' => {
                pending.pop();
                cursor.advance();
                if pending.is_empty() {
                    return Some(newlines);
                }
            }
            _ => {
                cursor.advance();
                if cursor.current() == b'\n' {
                    newlines += 1;
                }
                if !cursor.is_eof() {
                    cursor.advance_char();
                }
            }
        }
    }
}

/// Tokenize a whole source string, `EOF` included.
pub fn lex(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}
