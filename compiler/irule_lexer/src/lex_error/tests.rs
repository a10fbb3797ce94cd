use pretty_assertions::assert_eq;

use super::*;

#[test]
fn messages() {
    let stray = LexError::new(LexErrorKind::StrayCloser { closer: ']' }, Span::new(0, 1), 1);
    assert_eq!(stray.message(), "Closing ']' without opening one");
    assert_eq!(stray.code(), ErrorCode::E0003);

    let illegal = LexError::new(LexErrorKind::IllegalCharacter { ch: '@' }, Span::new(3, 4), 2);
    assert_eq!(illegal.message(), "illegal character '@'");
}

#[test]
fn diagnostic_keeps_line_and_code() {
    let err = LexError::new(LexErrorKind::UnterminatedString, Span::new(4, 10), 3);
    let diag = err.to_diagnostic();
    assert_eq!(diag.code, ErrorCode::E0001);
    assert_eq!(diag.to_string(), "   line 3: unterminated string");
}
