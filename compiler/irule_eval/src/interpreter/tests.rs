#![allow(clippy::unwrap_used, clippy::expect_used)]

use irule_diagnostic::ErrorCode;
use irule_parse::parse;
use pretty_assertions::assert_eq;

use super::*;

/// Evaluate `source` in a fresh interpreter. Validator diagnostics are
/// ignored: the evaluator runs whatever tree the parser built.
fn eval(source: &str) -> EvalResult {
    Interpreter::new().eval_program(&parse(source).program)
}

fn eval_err(source: &str) -> String {
    eval(source).unwrap_err().to_string()
}

#[test]
fn test_number_plus_boolean_is_a_type_mismatch() {
    assert_eq!(eval_err("5 + true"), "type mismatch: NUMBER + BOOLEAN");
}

#[test]
fn test_minus_boolean_is_an_invalid_command() {
    assert_eq!(eval_err("-true"), "invalid command name '-true'");
}

#[test]
fn test_boolean_arithmetic_is_unknown() {
    assert_eq!(eval_err("true + false"), "unknown operator: BOOLEAN + BOOLEAN");
}

#[test]
fn test_division_by_zero() {
    let err = eval("if {10 / 0 > 1} { return 1 }").unwrap_err();
    assert_eq!(err, EvalError::DivisionByZero);
    assert_eq!(err.code(), ErrorCode::E6004);
}

#[test]
fn test_arithmetic() {
    assert_eq!(eval("1 + 2 * 3").unwrap(), Value::Int(7));
    assert_eq!(eval("(1 + 2) * 3").unwrap(), Value::Int(9));
}

#[test]
fn test_division_rounds_down() {
    assert_eq!(eval("if {-7 / 2 == -4} { return 1 }").unwrap(), Value::Int(1));
    assert_eq!(eval("if {-7 % 2 == 1} { return 1 }").unwrap(), Value::Int(1));
}

#[test]
fn test_unset_variable() {
    assert_eq!(eval_err("$missing + 1"), "can't read \"missing\": no such variable");
}

#[test]
fn test_if_else() {
    let source = "set x 5\nif {$x > 3} { return \"big\" } else { return \"small\" }";
    assert_eq!(eval(source).unwrap(), Value::str("big"));
    let source = "set x 1\nif {$x > 3} { return \"big\" } else { return \"small\" }";
    assert_eq!(eval(source).unwrap(), Value::str("small"));
}

#[test]
fn test_elseif() {
    let source =
        "set x 2\nif {$x == 1} { return 1 } elseif {$x == 2} { return 2 } else { return 3 }";
    assert_eq!(eval(source).unwrap(), Value::Int(2));
}

#[test]
fn test_state_persists_between_programs() {
    let mut interpreter = Interpreter::new();
    interpreter.eval_program(&parse("set x 5").program).unwrap();
    let value = interpreter.eval_program(&parse("$x + 2").program).unwrap();
    assert_eq!(value, Value::Int(7));
    assert_eq!(interpreter.env().names(), vec!["x"]);
}

#[test]
fn test_interpolation() {
    let source = "set name \"world\"\nset greeting \"hello $name\"\nreturn $greeting";
    assert_eq!(eval(source).unwrap(), Value::str("hello world"));
}

#[test]
fn test_foreach_with_incr() {
    let source = "set total 0\nforeach n {1 2 3} { incr total $n }\nreturn $total";
    assert_eq!(eval(source).unwrap(), Value::Int(6));
}

#[test]
fn test_foreach_pairs() {
    let source = "set out \"\"\nforeach {k v} {a 1 b 2} { set out \"$out$k=$v;\" }\nreturn $out";
    assert_eq!(eval(source).unwrap(), Value::str("a=1;b=2;"));
}

#[test]
fn test_switch_glob() {
    let source = r#"set p "/img/a.png"
switch -glob $p {
  "/img*" { return "images" }
  default { return "other" }
}"#;
    assert_eq!(eval(source).unwrap(), Value::str("images"));
}

#[test]
fn test_switch_exact_and_default() {
    let source = "set p \"/api\"\nswitch $p {\n  /api { return 1 }\n  default { return 2 }\n}";
    assert_eq!(eval(source).unwrap(), Value::Int(1));
    let source = "set p \"/web\"\nswitch $p {\n  /api { return 1 }\n  default { return 2 }\n}";
    assert_eq!(eval(source).unwrap(), Value::Int(2));
}

#[test]
fn test_switch_fall_through() {
    let source = r#"set h "example.com"
switch -glob $h {
  "*.example.com" -
  "example.com" { return "ours" }
  default { return "theirs" }
}"#;
    assert_eq!(eval(source).unwrap(), Value::str("ours"));
}

#[test]
fn test_logical_short_circuit() {
    let source = "set x 0\nif {false && [incr x]} { }\nreturn $x";
    assert_eq!(eval(source).unwrap(), Value::Int(0));
}

#[test]
fn test_math_functions() {
    let source = "set x -5\nif {abs($x) == 5} { return \"yes\" }";
    assert_eq!(eval(source).unwrap(), Value::str("yes"));
    assert_eq!(eval("if {max(1, 7, 3) == 7} { return 1 }").unwrap(), Value::Int(1));
}

#[test]
fn test_runtime_commands_are_unsupported() {
    let err = eval("HTTP::uri").unwrap_err();
    assert_eq!(err.code(), ErrorCode::E6008);
    assert_eq!(err.to_string(), "'HTTP::uri' is not supported by the evaluator");
}

#[test]
fn test_error_line() {
    let program = parse("set a 1\nset b [HTTP::host]").program;
    let (err, line) = Interpreter::new().eval_program_at_lines(&program).unwrap_err();
    assert_eq!(line, 2);
    assert_eq!(
        err.into_diagnostic(line).to_string(),
        "   line 2: 'HTTP::host' is not supported by the evaluator"
    );
}

#[test]
fn test_string_comparison() {
    assert_eq!(eval("set a \"x\"\n$a eq \"x\"").unwrap(), Value::Bool(true));
    assert_eq!(eval("set a 5\n$a eq \"5\"").unwrap(), Value::Bool(true));
}

#[test]
fn test_glued_subtraction() {
    assert_eq!(eval("set a 4\nif {$a-1 == 3} { return 1 }").unwrap(), Value::Int(1));
    assert_eq!(eval("5-3*2").unwrap(), Value::Int(-1));
}
