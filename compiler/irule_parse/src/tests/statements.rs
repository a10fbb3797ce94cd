//! Statement parsing tests.

use irule_diagnostic::ErrorCode;
use irule_ir::ast::{ExpressionStatement, SwitchFlags};
use irule_ir::{Expression, Statement};
use pretty_assertions::assert_eq;

use super::{codes, has_message, only_expression, only_statement, parse_clean};
use crate::parse;

#[test]
fn test_set_number() {
    let Statement::Set(set) = only_statement("set x 5") else {
        panic!("expected a set statement");
    };
    let name = set.name.as_identifier().unwrap();
    assert_eq!(name.value, "x");
    assert!(!name.is_variable);
    assert!(matches!(set.value, Expression::Number(ref n) if n.value == 5));
}

#[test]
fn test_set_string_body() {
    let Statement::Set(set) = only_statement(r#"set greeting "hello world""#) else {
        panic!("expected a set statement");
    };
    assert!(matches!(set.value, Expression::String(ref s) if s.value == "hello world"));
}

#[test]
fn test_lone_string_literal() {
    let expression = only_expression(r#""hello world""#);
    assert!(matches!(expression, Expression::String(ref s) if s.value == "hello world"));
}

#[test]
fn test_set_declares_variable() {
    let output = parse_clean("set host [HTTP::host]\nlog local0. $host");
    assert_eq!(output.program.statements.len(), 2);
}

#[test]
fn test_set_without_value() {
    let output = parse("set x");
    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.diagnostics[0].code, ErrorCode::E3001);
    assert!(has_message(&output, "'set x' is missing a value"));
    assert!(output.program.is_empty());
}

#[test]
fn test_set_without_arguments() {
    let output = parse("set");
    assert!(has_message(&output, "should be \"set varName newValue\""));
}

#[test]
fn test_set_with_extra_words() {
    let output = parse("set x 1 2");
    assert_eq!(codes("set x 1 2"), vec![ErrorCode::E3001]);
    assert!(has_message(&output, "extra words after 'set x 1'"));
}

#[test]
fn test_set_invalid_variable_name() {
    let output = parse("set a.b 1");
    assert_eq!(output.diagnostics[0].code, ErrorCode::E2002);
    assert!(has_message(&output, "invalid variable name 'a.b'"));
}

#[test]
fn test_return_with_and_without_value() {
    let Statement::Return(bare) = only_statement("return") else {
        panic!("expected a return statement");
    };
    assert!(bare.value.is_none());

    let Statement::Return(valued) = only_statement("return 5") else {
        panic!("expected a return statement");
    };
    assert!(matches!(valued.value, Some(Expression::Number(_))));
}

#[test]
fn test_unclosed_if_body() {
    let output = parse("if {1 + 1 == 2} {");
    assert!(
        has_message(&output, "missing closing brace") || has_message(&output, "Unbalanced braces"),
        "{:?}",
        output.errors()
    );
}

#[test]
fn test_when_with_if_else() {
    let source = r#"when HTTP_REQUEST {
  if { [HTTP::uri] starts_with "/api" } { pool api_pool }
  else { pool default_pool }
}"#;
    let Statement::Expression(ExpressionStatement { expression, .. }) = only_statement(source)
    else {
        panic!("expected an expression statement");
    };
    let Expression::When(when) = expression else {
        panic!("expected a when expression");
    };
    assert_eq!(when.event.to_string(), "HTTP_REQUEST");
    assert_eq!(when.priority, None);
    assert_eq!(when.body.statements.len(), 1);

    let Statement::If(if_stmt) = &when.body.statements[0] else {
        panic!("expected an if statement");
    };
    assert!(matches!(if_stmt.condition, Expression::Infix(ref i) if i.operator == "starts_with"));
    assert_eq!(if_stmt.consequence.statements.len(), 1);
    assert!(matches!(
        if_stmt.alternative.as_deref(),
        Some(Statement::Block(block)) if block.statements.len() == 1
    ));
}

#[test]
fn test_when_priority() {
    let Expression::When(when) = only_expression("when CLIENT_ACCEPTED priority 100 { }") else {
        panic!("expected a when expression");
    };
    assert_eq!(when.priority, Some(100));
    assert!(when.body.is_empty());
}

#[test]
fn test_when_invalid_event() {
    let output = parse("when HTTP_NOPE { }");
    assert_eq!(output.diagnostics[0].code, ErrorCode::E2005);
    assert!(has_message(&output, "invalid event 'HTTP_NOPE'"));
}

#[test]
fn test_when_missing_body() {
    let output = parse("when HTTP_REQUEST");
    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.diagnostics[0].code, ErrorCode::E1005);
    assert!(has_message(&output, "expected '{' after event name, got end of input"));
}

#[test]
fn test_elseif_chain() {
    let source = "set a 1\nif {$a == 1} { return 1 } elseif {$a == 2} { return 2 } else { return 3 }";
    let output = parse_clean(source);
    let Statement::If(first) = &output.program.statements[1] else {
        panic!("expected an if statement");
    };
    let Some(Statement::If(second)) = first.alternative.as_deref() else {
        panic!("expected an elseif branch");
    };
    assert!(matches!(second.alternative.as_deref(), Some(Statement::Block(_))));
}

#[test]
fn test_else_if_words() {
    let source = "set a 1\nif {$a == 1} { return 1 } else if {$a == 2} { return 2 }";
    let output = parse_clean(source);
    let Statement::If(first) = &output.program.statements[1] else {
        panic!("expected an if statement");
    };
    assert!(matches!(first.alternative.as_deref(), Some(Statement::If(_))));
}

#[test]
fn test_if_then_keyword() {
    parse_clean("if {1 == 1} then { return 1 }");
}

#[test]
fn test_if_empty_condition() {
    let output = parse("if {} { return 1 }");
    assert_eq!(output.diagnostics[0].code, ErrorCode::E1002);
    assert!(has_message(&output, "empty condition"));
}

#[test]
fn test_switch_regex() {
    let source = r#"switch -regex [string tolower [HTTP::uri]] {
  "^api/(user$|user/.*)" { HTTP::respond 200 }
  default { HTTP::respond 404 }
}"#;
    let Statement::Switch(switch) = only_statement(source) else {
        panic!("expected a switch statement");
    };
    assert!(switch.flags.contains(SwitchFlags::REGEX));
    assert_eq!(switch.cases.len(), 2);
    assert!(matches!(switch.cases[0].pattern, Some(Expression::Regex(_))));
    assert!(switch.cases[1].pattern.is_none());
}

#[test]
fn test_switch_glob_fall_through() {
    let source = r#"set host [HTTP::host]
switch -glob $host {
  "*.example.com" -
  "example.com" { pool web }
  default { drop }
}"#;
    let output = parse_clean(source);
    let Statement::Switch(switch) = &output.program.statements[1] else {
        panic!("expected a switch statement");
    };
    assert!(switch.flags.contains(SwitchFlags::GLOB));
    assert_eq!(switch.cases.len(), 2);
    let Some(Expression::MultiPattern(multi)) = &switch.cases[0].pattern else {
        panic!("expected a multi pattern");
    };
    assert_eq!(multi.patterns.len(), 2);
    assert!(multi
        .patterns
        .iter()
        .all(|pattern| matches!(pattern, Expression::Glob(_))));
}

#[test]
fn test_switch_pattern_kinds_without_options() {
    let source = "set p [HTTP::path]\nswitch $p {\n  {/img*} { pool images }\n  /api { pool api }\n}";
    let output = parse_clean(source);
    let Statement::Switch(switch) = &output.program.statements[1] else {
        panic!("expected a switch statement");
    };
    assert!(matches!(&switch.cases[0].pattern, Some(Expression::Glob(g)) if g.pattern == "/img*"));
    assert!(matches!(&switch.cases[1].pattern, Some(Expression::String(s)) if s.value == "/api"));
}

#[test]
fn test_switch_invalid_option() {
    let output = parse("set x 1\nswitch -bogus $x { }");
    assert_eq!(codes("set x 1\nswitch -bogus $x { }"), vec![ErrorCode::E3002]);
    assert!(has_message(&output, "invalid switch option '-bogus'"));
}

#[test]
fn test_switch_dangling_fall_through() {
    let output = parse("set x 1\nswitch $x {\n  a -\n}");
    assert!(output.diagnostics.iter().any(|d| d.code == ErrorCode::E1005));
}

#[test]
fn test_foreach_declares_variable() {
    let Statement::ForEach(foreach) =
        only_statement("foreach item {a b c} { log local0. $item }")
    else {
        panic!("expected a foreach statement");
    };
    assert_eq!(foreach.variable.as_identifier().unwrap().value, "item");
    assert!(matches!(foreach.list, Expression::List(ref l) if l.elements.len() == 3));
    assert_eq!(foreach.body.statements.len(), 1);
}

#[test]
fn test_foreach_variable_list() {
    let Statement::ForEach(foreach) =
        only_statement("foreach {k v} {a 1 b 2} { log local0. \"$k=$v\" }")
    else {
        panic!("expected a foreach statement");
    };
    assert!(matches!(foreach.variable, Expression::List(ref l) if l.elements.len() == 2));
}

#[test]
fn test_ltm_rule() {
    let Statement::LtmRule(rule) =
        only_statement("ltm rule my_rule {\n  when HTTP_REQUEST { }\n}")
    else {
        panic!("expected an ltm rule");
    };
    assert_eq!(rule.name.to_string(), "my_rule");
    assert_eq!(rule.body.statements.len(), 1);
}

#[test]
fn test_semicolons_separate_commands() {
    let output = parse_clean("set a 1; set b 2");
    assert_eq!(output.program.statements.len(), 2);
}

#[test]
fn test_comment_lines_are_skipped() {
    let output = parse_clean("# routing\nset a 1");
    assert_eq!(output.program.statements.len(), 1);
}

#[test]
fn test_lone_bracket_in_string_is_text() {
    let Statement::Set(set) = only_statement(r#"set x "a [ b""#) else {
        panic!("expected a set statement");
    };
    assert!(matches!(set.value, Expression::String(ref s) if s.value == "a [ b"));

    let output = parse_clean("log local0. \"got [ bracket\"\nset y 1");
    assert_eq!(output.program.statements.len(), 2);
}
