//! Diagnostics of the integrated validator.

use irule_diagnostic::ErrorCode;
use irule_lexer::Lexer;
use pretty_assertions::assert_eq;

use super::{codes, has_message, parse_clean};
use crate::{parse, Parser};

#[test]
fn test_undeclared_variable() {
    let output = parse("log local0. $missing");
    assert_eq!(output.errors(), vec!["   line 1: undeclared variable '$missing'"]);
}

#[test]
fn test_self_reference_in_set_is_undeclared() {
    assert_eq!(codes("set x $x"), vec![ErrorCode::E2004]);
}

#[test]
fn test_namespaced_variables_are_exempt() {
    parse_clean("log local0. $static::pool_name");
    parse_clean("log local0. $::global_count");
}

#[test]
fn test_declarations_outlive_event_handlers() {
    parse_clean("when RULE_INIT { set limit 10 }\nwhen HTTP_REQUEST { log local0. $limit }");
}

#[test]
fn test_references_in_strings_and_braces_are_exempt() {
    parse_clean("log local0. \"value: $nope\"");
    parse_clean("set l {$nope}");
}

#[test]
fn test_declared_variables_are_exposed() {
    let mut parser = Parser::new(Lexer::new("set a 1\nforeach b {1 2} { }\nincr c"));
    parser.parse_program();
    let mut names: Vec<&str> = parser
        .declared_variables()
        .iter()
        .map(String::as_str)
        .collect();
    names.sort_unstable();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn test_line_numbers() {
    let output = parse("set x 1\n\nlog local0. $y");
    assert_eq!(output.diagnostics[0].line, Some(3));
    assert_eq!(output.errors(), vec!["   line 3: undeclared variable '$y'"]);
}

#[test]
fn test_unterminated_string() {
    let output = parse("set x \"abc");
    assert_eq!(output.diagnostics[0].code, ErrorCode::E0001);
    assert!(has_message(&output, "unterminated string"));
}

#[test]
fn test_stray_close_brace() {
    let output = parse("set x 1\n}");
    assert_eq!(output.diagnostics[0].code, ErrorCode::E0003);
}

#[test]
fn test_unbalanced_braces_at_end() {
    let mut parser = Parser::new(Lexer::new("when HTTP_REQUEST {\n  set x 1\n"));
    parser.parse_program();
    assert_eq!(parser.brace_count(), 1);
    let diagnostics = parser.diagnostics();
    assert!(diagnostics.iter().any(|d| d.code == ErrorCode::E1003));
    assert!(diagnostics
        .iter()
        .any(|d| d.message == "Unbalanced braces: depth at end of parsing is 1"));
}

#[test]
fn test_balanced_program_has_zero_depth() {
    let mut parser = Parser::new(Lexer::new("when HTTP_REQUEST {\n  if {1 == 1} { return }\n}"));
    parser.parse_program();
    assert_eq!(parser.brace_count(), 0);
    assert!(parser.diagnostics().is_empty());
}

#[test]
fn test_diagnostics_in_discovery_order() {
    assert_eq!(
        codes("frobnicate 1\nset y\nlog local0. $z"),
        vec![ErrorCode::E2001, ErrorCode::E3001, ErrorCode::E2004]
    );
}

#[test]
fn test_integer_out_of_range() {
    let output = parse("set x 99999999999999999999");
    assert_eq!(output.diagnostics[0].code, ErrorCode::E0004);
}

#[test]
fn test_words_after_complete_command() {
    let output = parse("return 1 2");
    assert!(has_message(&output, "unexpected '2' after end of command"));
}

#[test]
fn test_parsing_continues_after_errors() {
    let output = parse("frobnicate 1\nset ok 2");
    assert_eq!(output.program.statements.len(), 2);
    assert_eq!(output.diagnostics.len(), 1);
}

#[test]
fn test_seeded_declarations() {
    let mut parser = Parser::new(Lexer::new("log local0. $count"))
        .with_declared_variables(["count".to_string()]);
    parser.parse_program();
    assert!(parser.diagnostics().is_empty(), "{:?}", parser.errors());
}

#[test]
fn test_catch_declares_result_variable() {
    parse_clean("when HTTP_REQUEST { if { [catch {foo} res] } { log local0. $res } }");
    parse_clean("catch {foo} err\nlog local0. $err");
}
