use super::{
    array_base, is_valid_irule_identifier, is_valid_operator_for_types, IdentContext,
    OperandClass,
};
use irule_ir::ast::{BooleanLiteral, Identifier, NumberLiteral, PrefixExpression, StringLiteral};
use irule_ir::{Expression, Token, TokenKind};
use rustc_hash::FxHashSet;

fn valid(name: &str, context: IdentContext) -> bool {
    is_valid_irule_identifier(name, context, &FxHashSet::default())
}

fn number(value: i64) -> Expression {
    Expression::Number(NumberLiteral {
        token: Token::dummy(TokenKind::Number, value.to_string()),
        value,
    })
}

fn boolean(value: bool) -> Expression {
    Expression::Boolean(BooleanLiteral {
        token: Token::dummy(TokenKind::True, value.to_string()),
        value,
    })
}

fn string(value: &str) -> Expression {
    Expression::String(StringLiteral {
        token: Token::dummy(TokenKind::String, value),
        value: value.to_string(),
    })
}

fn variable(name: &str) -> Expression {
    Expression::Identifier(Identifier::variable(
        Token::dummy(TokenKind::Variable, format!("${name}")),
        name,
    ))
}

// === Variable context ===

#[test]
fn variable_names() {
    for name in ["x", "_tmp", "uri_path2", "static::limit", "::global", "arr(key)"] {
        assert!(valid(name, IdentContext::Variable), "{name}");
    }
    for name in ["1abc", "a-b", "", "::", "ns::", "if", "switch", "(key)"] {
        assert!(!valid(name, IdentContext::Variable), "{name}");
    }
}

#[test]
fn array_base_strips_element() {
    assert_eq!(array_base("arr(key)"), "arr");
    assert_eq!(array_base("plain"), "plain");
    assert_eq!(array_base("odd(x"), "odd(x");
}

// === Header context ===

#[test]
fn header_names() {
    for name in ["Host", "content-type", "X-Forwarded-For", "x-custom", "My-Header"] {
        assert!(valid(name, IdentContext::Header), "{name}");
    }
    for name in ["Hostname", "Foo", "x"] {
        assert!(!valid(name, IdentContext::Header), "{name}");
    }
}

// === Standalone context ===

#[test]
fn standalone_words() {
    for name in ["log", "drop", "local0.", "local7.info", "TCP::client_port", "x", "else"] {
        assert!(valid(name, IdentContext::Standalone), "{name}");
    }
    for name in ["frobnicate", "IP::bogus", "local8.", "ab"] {
        assert!(!valid(name, IdentContext::Standalone), "{name}");
    }
}

#[test]
fn declared_variables_are_standalone_words() {
    let mut declared = FxHashSet::default();
    declared.insert("counter".to_string());
    assert!(is_valid_irule_identifier(
        "counter",
        IdentContext::Standalone,
        &declared
    ));
}

// === Operators ===

#[test]
fn operand_classes() {
    assert_eq!(OperandClass::of(&number(1)), OperandClass::Number);
    assert_eq!(OperandClass::of(&boolean(true)), OperandClass::Boolean);
    assert_eq!(OperandClass::of(&string("a")), OperandClass::String);
    assert_eq!(OperandClass::of(&variable("x")), OperandClass::Dynamic);

    let negative = Expression::Prefix(PrefixExpression {
        token: Token::dummy(TokenKind::Minus, "-"),
        operator: "-".to_string(),
        right: Box::new(number(3)),
    });
    assert_eq!(OperandClass::of(&negative), OperandClass::Number);
}

#[test]
fn string_match_operators_need_strings() {
    assert!(is_valid_operator_for_types("starts_with", &variable("u"), &string("/api")));
    assert!(is_valid_operator_for_types("contains", &string("a"), &string("b")));
    assert!(!is_valid_operator_for_types("contains", &variable("u"), &number(5)));
    assert!(!is_valid_operator_for_types("ends_with", &boolean(true), &string("x")));
}

#[test]
fn equality_accepts_anything() {
    assert!(is_valid_operator_for_types("==", &number(1), &string("1")));
    assert!(is_valid_operator_for_types("eq", &boolean(false), &number(0)));
}

#[test]
fn ordering_needs_matching_literals() {
    assert!(is_valid_operator_for_types("<", &number(1), &number(2)));
    assert!(is_valid_operator_for_types(">=", &string("a"), &string("b")));
    assert!(is_valid_operator_for_types("<", &variable("x"), &boolean(true)));
    assert!(!is_valid_operator_for_types("<", &number(1), &string("b")));
    assert!(!is_valid_operator_for_types(">", &boolean(true), &boolean(false)));
}

#[test]
fn arithmetic_admits_booleans_but_not_strings() {
    assert!(is_valid_operator_for_types("+", &number(5), &boolean(true)));
    assert!(is_valid_operator_for_types("*", &variable("n"), &number(2)));
    assert!(!is_valid_operator_for_types("+", &string("a"), &number(1)));
}

#[test]
fn logical_needs_one_boolean_or_dynamic_side() {
    assert!(is_valid_operator_for_types("&&", &boolean(true), &number(1)));
    assert!(is_valid_operator_for_types("||", &number(1), &variable("x")));
    assert!(!is_valid_operator_for_types("&&", &number(1), &number(2)));
    assert!(!is_valid_operator_for_types("||", &string("a"), &string("b")));
}

#[test]
fn unknown_operators_pass() {
    assert!(is_valid_operator_for_types("^", &string("a"), &boolean(true)));
}
