//! Tests for binary operator implementations and glob matching.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use crate::operators::{evaluate_binary, glob_match};
use crate::{EvalError, Value};

fn int(n: i64) -> Value {
    Value::Int(n)
}

#[test]
fn test_int_operations() {
    assert_eq!(evaluate_binary(&int(2), "+", &int(3)).unwrap(), int(5));
    assert_eq!(evaluate_binary(&int(5), "-", &int(3)).unwrap(), int(2));
    assert_eq!(evaluate_binary(&int(2), "*", &int(3)).unwrap(), int(6));
    assert_eq!(evaluate_binary(&int(7), "/", &int(2)).unwrap(), int(3));
    assert_eq!(evaluate_binary(&int(7), "%", &int(2)).unwrap(), int(1));
}

#[test]
fn test_int_division_floors() {
    assert_eq!(evaluate_binary(&int(-7), "/", &int(2)).unwrap(), int(-4));
    assert_eq!(evaluate_binary(&int(7), "/", &int(-2)).unwrap(), int(-4));
    assert_eq!(evaluate_binary(&int(-7), "%", &int(2)).unwrap(), int(1));
    assert_eq!(evaluate_binary(&int(7), "%", &int(-2)).unwrap(), int(-1));
}

#[test]
fn test_int_division_by_zero() {
    assert_eq!(evaluate_binary(&int(1), "/", &int(0)), Err(EvalError::DivisionByZero));
    assert_eq!(evaluate_binary(&int(1), "%", &int(0)), Err(EvalError::DivisionByZero));
}

#[test]
fn test_int_overflow() {
    let err = evaluate_binary(&int(i64::MAX), "+", &int(1)).unwrap_err();
    assert_eq!(err.to_string(), "integer overflow in '+'");
    assert!(evaluate_binary(&int(i64::MIN), "/", &int(-1)).is_err());
}

#[test]
fn test_int_comparisons() {
    assert_eq!(evaluate_binary(&int(1), "<", &int(2)).unwrap(), Value::Bool(true));
    assert_eq!(evaluate_binary(&int(2), "<=", &int(2)).unwrap(), Value::Bool(true));
    assert_eq!(evaluate_binary(&int(1), "==", &int(2)).unwrap(), Value::Bool(false));
    assert_eq!(evaluate_binary(&int(1), "!=", &int(2)).unwrap(), Value::Bool(true));
}

#[test]
fn test_string_operators() {
    let uri = Value::str("/api/users");
    let yes = Value::Bool(true);
    assert_eq!(evaluate_binary(&uri, "starts_with", &Value::str("/api")).unwrap(), yes);
    assert_eq!(evaluate_binary(&uri, "ends_with", &Value::str("users")).unwrap(), yes);
    assert_eq!(evaluate_binary(&uri, "contains", &Value::str("/us")).unwrap(), yes);
    assert_eq!(evaluate_binary(&uri, "equals", &Value::str("/api/users")).unwrap(), yes);
    assert_eq!(evaluate_binary(&uri, "matches_glob", &Value::str("/api/*")).unwrap(), yes);
}

#[test]
fn test_string_arithmetic_is_unknown() {
    let err = evaluate_binary(&Value::str("a"), "+", &Value::str("b")).unwrap_err();
    assert_eq!(err.to_string(), "unknown operator: STRING + STRING");
}

#[test]
fn test_mixed_types_mismatch() {
    let err = evaluate_binary(&int(5), "+", &Value::Bool(true)).unwrap_err();
    assert_eq!(err.to_string(), "type mismatch: NUMBER + BOOLEAN");
    let err = evaluate_binary(&Value::str("5"), "<", &int(5)).unwrap_err();
    assert_eq!(err.to_string(), "type mismatch: STRING < NUMBER");
}

#[test]
fn test_eq_compares_string_forms() {
    assert_eq!(evaluate_binary(&int(5), "eq", &Value::str("5")).unwrap(), Value::Bool(true));
    let same = evaluate_binary(&Value::Bool(true), "ne", &Value::str("true")).unwrap();
    assert_eq!(same, Value::Bool(false));
}

#[test]
fn test_logical_accepts_numbers_and_booleans() {
    assert_eq!(evaluate_binary(&Value::Bool(true), "&&", &int(5)).unwrap(), Value::Bool(true));
    assert_eq!(evaluate_binary(&int(0), "||", &Value::Bool(false)).unwrap(), Value::Bool(false));
    assert!(evaluate_binary(&Value::str("x"), "&&", &Value::Bool(true)).is_err());
}

#[test]
fn test_glob_match() {
    assert!(glob_match("*.example.com", "www.example.com"));
    assert!(!glob_match("*.example.com", "example.com"));
    assert!(glob_match("/img*", "/img/a.png"));
    assert!(glob_match("a?c", "abc"));
    assert!(glob_match("[a-c]x", "bx"));
    assert!(!glob_match("[a-c]x", "dx"));
    assert!(glob_match("\\*", "*"));
    assert!(!glob_match("\\*", "a"));
    assert!(glob_match("*", ""));
    assert!(!glob_match("a*", "b"));
    assert!(glob_match("*a*b", "xxaxxb"));
}
