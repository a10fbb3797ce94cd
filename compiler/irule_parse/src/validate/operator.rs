//! Operand compatibility of infix operators.
//!
//! Only literals have a static type. Variables, bracketed commands and the
//! results of other operators are [`OperandClass::Dynamic`] and fit any
//! operator; literal operands are checked against the operator's class.

use irule_ir::Expression;

/// Static type of an operand.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OperandClass {
    Number,
    Boolean,
    String,
    Dynamic,
}

impl OperandClass {
    pub fn of(expr: &Expression) -> OperandClass {
        match expr {
            Expression::Number(_) => OperandClass::Number,
            Expression::Prefix(prefix)
                if prefix.operator == "-" && matches!(*prefix.right, Expression::Number(_)) =>
            {
                OperandClass::Number
            }
            Expression::Boolean(_) => OperandClass::Boolean,
            Expression::String(_)
            | Expression::Interpolated(_)
            | Expression::IpAddress(_)
            | Expression::Glob(_)
            | Expression::Regex(_) => OperandClass::String,
            Expression::Parenthesized(inner) => OperandClass::of(&inner.inner),
            _ => OperandClass::Dynamic,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OperandClass::Number => "NUMBER",
            OperandClass::Boolean => "BOOLEAN",
            OperandClass::String => "STRING",
            OperandClass::Dynamic => "DYNAMIC",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum OperatorClass {
    StringMatch,
    Equality,
    Ordering,
    Arithmetic,
    Logical,
}

fn operator_class(operator: &str) -> Option<OperatorClass> {
    match operator {
        "contains" | "starts_with" | "ends_with" | "equals" | "matches" | "matches_glob"
        | "matches_regex" => Some(OperatorClass::StringMatch),
        "eq" | "ne" | "==" | "!=" | "in" => Some(OperatorClass::Equality),
        "<" | ">" | "<=" | ">=" => Some(OperatorClass::Ordering),
        "+" | "-" | "*" | "/" | "%" => Some(OperatorClass::Arithmetic),
        "&&" | "||" => Some(OperatorClass::Logical),
        _ => None,
    }
}

/// Whether `operator` accepts `left` and `right`. Unknown operators are
/// accepted.
pub fn is_valid_operator_for_types(operator: &str, left: &Expression, right: &Expression) -> bool {
    use OperandClass::{Boolean, Dynamic, Number, String};

    let (l, r) = (OperandClass::of(left), OperandClass::of(right));
    match operator_class(operator) {
        None | Some(OperatorClass::Equality) => true,
        Some(OperatorClass::StringMatch) => {
            [l, r].iter().all(|class| matches!(class, String | Dynamic))
        }
        Some(OperatorClass::Ordering) => {
            l == Dynamic || r == Dynamic || (l == r && matches!(l, Number | String))
        }
        Some(OperatorClass::Arithmetic) => [l, r]
            .iter()
            .all(|class| matches!(class, Number | Boolean | Dynamic)),
        Some(OperatorClass::Logical) => [l, r].iter().any(|class| matches!(class, Boolean | Dynamic)),
    }
}
