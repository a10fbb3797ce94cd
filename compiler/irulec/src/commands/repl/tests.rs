#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;

fn session(input: &str) -> String {
    session_with(input, &CliOptions::default())
}

fn session_with(input: &str, options: &CliOptions) -> String {
    let mut out = Vec::new();
    run_repl(input.as_bytes(), &mut out, options, false).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_state_persists_between_lines() {
    assert_eq!(session("set x 5\n$x + 1\nexit\n"), ">> 5\n>> 6\n>> ");
}

#[test]
fn test_end_of_input_ends_session() {
    assert_eq!(session("7 * 6"), ">> 42\n>> \n");
}

#[test]
fn test_blank_lines_are_skipped() {
    assert_eq!(session("\n   \nexit\n"), ">> >> >> ");
}

#[test]
fn test_runtime_error_is_reported_without_line() {
    assert_eq!(
        session("5 + true\nexit\n"),
        ">>    type mismatch: NUMBER + BOOLEAN\n>> "
    );
}

#[test]
fn test_parse_errors_skip_evaluation() {
    let output = session("set x\nexit\n");
    assert!(output.starts_with(">>    line 1: "), "{output}");
    assert!(output.ends_with("\n>> "));
}

#[test]
fn test_undeclared_variable_is_rejected() {
    let output = session("$y + 1\nexit\n");
    assert_eq!(output, ">>    line 1: undeclared variable '$y'\n>> ");
}

#[test]
fn test_debug_echoes_program() {
    let options = CliOptions {
        debug: true,
        ..CliOptions::default()
    };
    let output = session_with("set x 5\nexit\n", &options);
    assert!(output.contains("\nset x 5\n5\n"), "{output}");
}
