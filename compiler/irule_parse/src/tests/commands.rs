//! Command parsing tests.

use irule_diagnostic::ErrorCode;
use irule_ir::ast::TargetKind;
use irule_ir::{Expression, Statement};
use pretty_assertions::assert_eq;

use super::{codes, has_message, only_expression, parse_clean};
use crate::parse;

#[test]
fn test_header_value_lookup() {
    let Expression::Http(command) = only_expression(r#"HTTP::header value "X-Forwarded-For""#)
    else {
        panic!("expected an HTTP command");
    };
    assert_eq!(command.command, "HTTP::header");
    assert_eq!(command.short_name(), "header");
    assert_eq!(command.args.len(), 2);
}

#[test]
fn test_header_insert_and_common_names() {
    parse_clean("HTTP::header insert X-Custom \"v\"");
    parse_clean("HTTP::header remove Cookie");
    parse_clean("HTTP::header Host");
}

#[test]
fn test_invalid_header_name() {
    let output = parse("HTTP::header value foo");
    assert_eq!(codes("HTTP::header value foo"), vec![ErrorCode::E2003]);
    assert!(has_message(&output, "invalid header name 'foo'"));
}

#[test]
fn test_unlisted_namespaced_command() {
    let expression = only_expression("HTTP::fallback \"http://example.com\"");
    assert!(matches!(expression, Expression::Http(ref c) if c.command == "HTTP::fallback"));
}

#[test]
fn test_string_operation() {
    let Expression::StringOp(op) = only_expression(r#"string tolower "ABC""#) else {
        panic!("expected a string operation");
    };
    assert_eq!(op.operation, "tolower");
    assert_eq!(op.args.len(), 1);
}

#[test]
fn test_invalid_string_operation() {
    let output = parse(r#"string frobnicate "x""#);
    assert_eq!(output.diagnostics[0].code, ErrorCode::E3004);
    assert!(has_message(&output, "invalid string operation 'frobnicate'"));
}

#[test]
fn test_string_operation_arity() {
    let output = parse(r#"string range "abc" 1"#);
    assert!(has_message(
        &output,
        "'string range' needs at least 3 argument(s), got 2"
    ));
}

#[test]
fn test_string_map_takes_pairs() {
    let Expression::StringOp(op) = only_expression(r#"string map {a b c d} "abcd""#) else {
        panic!("expected a string operation");
    };
    let Expression::Map(map) = &op.args[0] else {
        panic!("expected a map literal");
    };
    assert_eq!(map.pairs.len(), 2);
    assert_eq!(op.args[0].to_string(), "{a b c d}");
}

#[test]
fn test_class_match() {
    let Expression::Class(class) =
        only_expression("class match [HTTP::uri] starts_with uri_list")
    else {
        panic!("expected a class command");
    };
    assert_eq!(class.subcommand, "match");
    assert_eq!(class.args.len(), 3);
}

#[test]
fn test_class_options() {
    let Expression::Class(class) =
        only_expression("class match -value -- [HTTP::uri] equals uri_list")
    else {
        panic!("expected a class command");
    };
    assert_eq!(class.options, vec!["-value".to_string(), "--".to_string()]);
    assert_eq!(class.args.len(), 3);
}

#[test]
fn test_class_invalid_operator() {
    let output = parse("set x 1\nclass match $x likes dg");
    assert_eq!(output.diagnostics[0].code, ErrorCode::E3005);
    assert!(has_message(&output, "invalid class match operator 'likes'"));
}

#[test]
fn test_class_invalid_subcommand() {
    let output = parse("class frob dg");
    assert!(has_message(&output, "invalid class subcommand 'frob'"));
}

#[test]
fn test_class_match_arity() {
    let output = parse("class match [HTTP::uri]");
    assert_eq!(output.diagnostics[0].code, ErrorCode::E3001);
}

#[test]
fn test_regsub_declares_result() {
    let output = parse_clean("set input \"x\"\nregsub -all \"a\" $input \"b\" out\nlog local0. $out");
    let Statement::Expression(stmt) = &output.program.statements[1] else {
        panic!("expected an expression statement");
    };
    let Expression::Regsub(regsub) = &stmt.expression else {
        panic!("expected a regsub expression");
    };
    assert_eq!(regsub.flags, vec!["-all".to_string()]);
    assert_eq!(regsub.result_var.to_string(), "out");
}

#[test]
fn test_regsub_braced_pattern_is_raw() {
    let output = parse_clean("set input \"x\"\nregsub {^/old/(.*)$} $input {/new/\\1} out");
    let Statement::Expression(stmt) = &output.program.statements[1] else {
        panic!("expected an expression statement");
    };
    let Expression::Regsub(regsub) = &stmt.expression else {
        panic!("expected a regsub expression");
    };
    assert!(matches!(*regsub.pattern, Expression::Regex(ref r) if r.pattern == "^/old/(.*)$"));
}

#[test]
fn test_regsub_wrong_arity() {
    let output = parse(r#"regsub "a" "b""#);
    assert_eq!(output.diagnostics[0].code, ErrorCode::E3001);
    assert!(matches!(
        output.program.statements[0],
        Statement::Expression(ref s) if matches!(s.expression, Expression::Command(_))
    ));
}

#[test]
fn test_regsub_invalid_flag() {
    let output = parse(r#"regsub -bogus "a" "b" "c" out"#);
    assert_eq!(output.diagnostics[0].code, ErrorCode::E3003);
    assert!(has_message(&output, "invalid regsub flag '-bogus'"));
}

#[test]
fn test_pool_target() {
    let Expression::NodeStatement(node) = only_expression("pool web_pool") else {
        panic!("expected a pool statement");
    };
    assert_eq!(node.kind, TargetKind::Pool);
    assert_eq!(node.args.len(), 1);
}

#[test]
fn test_pool_without_target() {
    let output = parse("pool");
    assert!(has_message(&output, "'pool' needs a target"));
}

#[test]
fn test_pool_and_node_conflict() {
    let source = "when HTTP_REQUEST {\n  pool web\n  node 10.0.0.1 80\n}";
    assert_eq!(codes(source), vec![ErrorCode::E5001]);
}

#[test]
fn test_redirect_and_respond_conflict() {
    let source = "when HTTP_REQUEST {\n  HTTP::redirect \"/x\"\n  HTTP::respond 200\n}";
    assert_eq!(codes(source), vec![ErrorCode::E5001]);
}

#[test]
fn test_nested_bracket_commands() {
    let output = parse_clean("set u [string tolower [HTTP::uri]]");
    let Statement::Set(set) = &output.program.statements[0] else {
        panic!("expected a set statement");
    };
    let Expression::Array(array) = &set.value else {
        panic!("expected a bracketed command");
    };
    assert_eq!(array.elements.len(), 1);
    assert!(matches!(array.elements[0], Expression::StringOp(_)));
}

#[test]
fn test_unclosed_bracket() {
    let output = parse("set u [HTTP::uri");
    assert!(has_message(&output, "missing close-bracket for '[' opened on line 1"));
}

#[test]
fn test_incr_declares_variable() {
    parse_clean("incr counter\nlog local0. $counter");
}

#[test]
fn test_unknown_command_name() {
    let output = parse("frobnicate 1");
    assert_eq!(output.diagnostics[0].code, ErrorCode::E2001);
    assert!(has_message(&output, "invalid identifier 'frobnicate'"));
}

#[test]
fn test_brace_hash_argument() {
    let output = parse_clean("table set {key: value, other: thing}");
    let Statement::Expression(stmt) = &output.program.statements[0] else {
        panic!("expected an expression statement");
    };
    let Expression::Command(command) = &stmt.expression else {
        panic!("expected a command");
    };
    assert!(matches!(command.args[1], Expression::Hash(ref h) if h.pairs.len() == 2));
}

#[test]
fn test_tcl_only_string_operations_are_rejected() {
    for op in ["first", "totitle"] {
        let output = parse(&format!("string {op} a abc"));
        assert_eq!(output.diagnostics[0].code, ErrorCode::E3004);
        assert!(has_message(&output, &format!("invalid string operation '{op}'")));
    }
}
