//! Embedded `$name`, `${name}` and `[command]` in quoted strings.
//!
//! The lexer hands over the raw body of a string. Here it is split into
//! literal runs and embeddings; each `[...]` is parsed by a snippet parser.
//! A `$` or `[` that does not start a well-formed embedding stays text, and
//! so does a `[...]` whose contents do not parse cleanly: regular
//! expressions such as `"^/[a-z]+$"` are common in quoted strings.

use irule_ir::ast::{CommandSubstitution, Identifier, InterpolatedString, StringLiteral};
use irule_ir::{Expression, Token, TokenKind};
use irule_stack::ensure_sufficient_stack;

use crate::{Nesting, Parser};

/// A piece of a string body.
#[derive(Debug, PartialEq, Eq)]
enum Segment<'s> {
    Text(&'s str),
    Variable(&'s str),
    /// Script between the brackets, and the byte offset of its `[`.
    Command(&'s str, usize),
}

/// Split a string body into text and embedding candidates.
fn segments(body: &str) -> Vec<Segment<'_>> {
    let bytes = body.as_bytes();
    let mut segments = Vec::new();
    let mut text_start = 0;
    let mut i = 0;
    while i < bytes.len() {
        let found = match bytes[i] {
            b'\\' => {
                i += 2;
                continue;
            }
            b'$' => variable_at(body, i),
            b'[' => command_at(body, i),
            _ => None,
        };
        let Some((segment, end)) = found else {
            i += 1;
            continue;
        };
        if text_start < i {
            segments.push(Segment::Text(body.get(text_start..i).unwrap_or_default()));
        }
        segments.push(segment);
        i = end;
        text_start = end;
    }
    if text_start < bytes.len() {
        segments.push(Segment::Text(body.get(text_start..).unwrap_or_default()));
    }
    segments
}

/// `$name`, `$ns::name` or `${any text}` starting at `start`.
fn variable_at(body: &str, start: usize) -> Option<(Segment<'_>, usize)> {
    let bytes = body.as_bytes();
    let name_start = start + 1;
    if bytes.get(name_start) == Some(&b'{') {
        let close = name_start + 1 + memchr::memchr(b'}', bytes.get(name_start + 1..)?)?;
        let name = body.get(name_start + 1..close)?;
        return (!name.is_empty()).then_some((Segment::Variable(name), close + 1));
    }

    let mut end = name_start;
    let mut has_word_char = false;
    loop {
        match bytes.get(end) {
            Some(b) if b.is_ascii_alphanumeric() || *b == b'_' => {
                has_word_char = true;
                end += 1;
            }
            Some(b':') if bytes.get(end + 1) == Some(&b':') => end += 2,
            _ => break,
        }
    }
    if !has_word_char {
        return None;
    }
    Some((Segment::Variable(body.get(name_start..end)?), end))
}

/// `[script]` starting at `start`, with nested brackets and quotes
/// balanced the way the lexer balances them.
fn command_at(body: &str, start: usize) -> Option<(Segment<'_>, usize)> {
    let bytes = body.as_bytes();
    let first = *bytes.get(start + 1)?;
    if !(first.is_ascii_alphabetic() || first == b':' || first == b'[') {
        return None;
    }
    let mut pending = vec![b']'];
    let mut i = start + 1;
    while let Some(&b) = bytes.get(i) {
        match b {
            b'\\' => i += 1,
            b'"' if pending.last() == Some(&b'"') => {
                pending.pop();
            }
            b'"' => pending.push(b'"'),
            b'[' if pending.last() != Some(&b'"') => pending.push(b']'),
            b']' if pending.last() == Some(&b']') => {
                pending.pop();
                if pending.is_empty() {
                    let script = body.get(start + 1..i)?;
                    return Some((Segment::Command(script, start), i + 1));
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Line of byte `offset` in a body that starts on `line`.
fn line_of(body: &str, line: u32, offset: usize) -> u32 {
    let before = body.as_bytes().get(..offset).unwrap_or_default();
    let newlines = memchr::memchr_iter(b'\n', before).count();
    line.saturating_add(u32::try_from(newlines).unwrap_or(u32::MAX))
}

/// Append literal text, merging it into a preceding literal part.
fn push_text(parts: &mut Vec<Expression>, token: &Token, text: &str) {
    if let Some(Expression::String(last)) = parts.last_mut() {
        last.value.push_str(text);
        return;
    }
    parts.push(Expression::String(StringLiteral {
        token: token.clone(),
        value: text.to_string(),
    }));
}

impl Parser<'_> {
    /// A `StringLiteral`, or an `InterpolatedString` when the body embeds
    /// variables or commands.
    pub(super) fn parse_interpolated(&mut self, token: &Token) -> Expression {
        let body = token.literal.as_str();
        let mut parts = Vec::new();
        for segment in segments(body) {
            match segment {
                Segment::Text(text) => push_text(&mut parts, token, text),
                Segment::Variable(name) => {
                    parts.push(Expression::Identifier(Identifier::variable(
                        token.clone(),
                        name,
                    )));
                }
                Segment::Command(script, offset) => {
                    let line = line_of(body, token.line, offset);
                    match self.parse_substitution(token, script, line) {
                        Some(substitution) => parts.push(substitution),
                        None => push_text(&mut parts, token, &format!("[{script}]")),
                    }
                }
            }
        }

        if parts.iter().all(|part| matches!(part, Expression::String(_))) {
            return Expression::String(StringLiteral {
                token: token.clone(),
                value: body.to_string(),
            });
        }
        Expression::Interpolated(InterpolatedString {
            token: token.clone(),
            raw: body.to_string(),
            parts,
        })
    }

    /// The commands of one `[script]`, or `None` when they do not parse
    /// cleanly.
    fn parse_substitution(
        &mut self,
        token: &Token,
        script: &str,
        line: u32,
    ) -> Option<Expression> {
        ensure_sufficient_stack(|| {
            let mut sub = Parser::embedded(script, line, Nesting::Bracket);
            sub.declared_variables.clone_from(&self.declared_variables);
            let mut commands = Vec::new();
            while !sub.cur_is(TokenKind::Eof) {
                if !sub.cur_is(TokenKind::Semicolon) {
                    if let Some(command) = sub.parse_command_or_expression() {
                        commands.push(command);
                    }
                    sub.finish_command(true);
                }
                sub.next_token();
            }
            if commands.is_empty() || !sub.diagnostics.is_empty() {
                return None;
            }
            self.absorb(sub);
            let mut token = token.clone();
            token.line = line;
            Some(Expression::CommandSubstitution(CommandSubstitution {
                token,
                commands,
            }))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{segments, Segment};
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_text_is_one_segment() {
        assert_eq!(segments("hello world"), vec![Segment::Text("hello world")]);
    }

    #[test]
    fn variables_and_commands() {
        assert_eq!(
            segments("host $h:${p} [HTTP::uri]!"),
            vec![
                Segment::Text("host "),
                Segment::Variable("h"),
                Segment::Text(":"),
                Segment::Variable("p"),
                Segment::Text(" "),
                Segment::Command("HTTP::uri", 13),
                Segment::Text("!"),
            ]
        );
    }

    #[test]
    fn namespaced_variable() {
        assert_eq!(
            segments("$static::pool_name"),
            vec![Segment::Variable("static::pool_name")]
        );
    }

    #[test]
    fn lone_dollar_and_bracket_stay_text() {
        assert_eq!(segments("cost: $ 5"), vec![Segment::Text("cost: $ 5")]);
        assert_eq!(segments("a [ b"), vec![Segment::Text("a [ b")]);
        assert_eq!(segments("${}"), vec![Segment::Text("${}")]);
    }

    #[test]
    fn escaped_dollar_stays_text() {
        assert_eq!(segments(r"\$x"), vec![Segment::Text(r"\$x")]);
    }

    #[test]
    fn nested_brackets_and_quotes() {
        assert_eq!(
            segments(r#"[string tolower [HTTP::header value "X-]"]]"#),
            vec![Segment::Command(
                r#"string tolower [HTTP::header value "X-]"]"#,
                0
            )]
        );
    }

    #[test]
    fn unclosed_bracket_stays_text() {
        assert_eq!(segments("[HTTP::uri"), vec![Segment::Text("[HTTP::uri")]);
    }
}
