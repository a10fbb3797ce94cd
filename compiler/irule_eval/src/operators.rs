//! Binary operator implementations.
//!
//! Dispatch is a match on the operand pair: the value set is closed, so
//! every combination is visible here. Operands of different types are a
//! type mismatch; a type the operator does not accept is an unknown
//! operator.

use crate::errors::{overflow, type_mismatch, unknown_operator, unsupported};
use crate::{EvalError, EvalResult, Value};

/// Apply `operator` to two evaluated operands.
///
/// `&&`/`||` arrive here only when the interpreter could not short-circuit.
pub fn evaluate_binary(left: &Value, operator: &str, right: &Value) -> EvalResult {
    match operator {
        // `eq`/`ne` compare string forms of any two values.
        "eq" => return Ok(Value::Bool(left.to_string() == right.to_string())),
        "ne" => return Ok(Value::Bool(left.to_string() != right.to_string())),
        "&&" if left.is_logical() && right.is_logical() => {
            return Ok(Value::Bool(left.is_truthy() && right.is_truthy()));
        }
        "||" if left.is_logical() && right.is_logical() => {
            return Ok(Value::Bool(left.is_truthy() || right.is_truthy()));
        }
        _ => {}
    }

    match (left, right) {
        (Value::Int(a), Value::Int(b)) => eval_int(*a, operator, *b),
        (Value::Str(a), Value::Str(b)) => eval_str(a, operator, b),
        (Value::Bool(a), Value::Bool(b)) => match operator {
            "==" => Ok(Value::Bool(a == b)),
            "!=" => Ok(Value::Bool(a != b)),
            _ => Err(unknown_operator(left, operator, right)),
        },
        (Value::Empty, Value::Empty) => Err(unknown_operator(left, operator, right)),
        _ => Err(type_mismatch(left, operator, right)),
    }
}

fn eval_int(a: i64, operator: &str, b: i64) -> EvalResult {
    let checked = |result: Option<i64>| result.map(Value::Int).ok_or_else(|| overflow(operator));
    match operator {
        "+" => checked(a.checked_add(b)),
        "-" => checked(a.checked_sub(b)),
        "*" => checked(a.checked_mul(b)),
        "/" => {
            if b == 0 {
                return Err(EvalError::DivisionByZero);
            }
            checked(floor_div(a, b))
        }
        "%" => {
            if b == 0 {
                return Err(EvalError::DivisionByZero);
            }
            checked(floor_mod(a, b))
        }
        "<" => Ok(Value::Bool(a < b)),
        ">" => Ok(Value::Bool(a > b)),
        "<=" => Ok(Value::Bool(a <= b)),
        ">=" => Ok(Value::Bool(a >= b)),
        "==" => Ok(Value::Bool(a == b)),
        "!=" => Ok(Value::Bool(a != b)),
        _ => Err(unknown_operator(&Value::Int(a), operator, &Value::Int(b))),
    }
}

/// Quotient rounded toward negative infinity, as Tcl does.
fn floor_div(a: i64, b: i64) -> Option<i64> {
    let quotient = a.checked_div(b)?;
    if a % b != 0 && (a < 0) != (b < 0) {
        quotient.checked_sub(1)
    } else {
        Some(quotient)
    }
}

/// Remainder with the sign of the divisor.
fn floor_mod(a: i64, b: i64) -> Option<i64> {
    let remainder = a.checked_rem(b)?;
    if remainder != 0 && (remainder < 0) != (b < 0) {
        remainder.checked_add(b)
    } else {
        Some(remainder)
    }
}

fn eval_str(a: &str, operator: &str, b: &str) -> EvalResult {
    let result = match operator {
        "==" | "equals" => a == b,
        "!=" => a != b,
        "<" => a < b,
        ">" => a > b,
        "<=" => a <= b,
        ">=" => a >= b,
        "contains" => a.contains(b),
        "starts_with" => a.starts_with(b),
        "ends_with" => a.ends_with(b),
        "matches_glob" => glob_match(b, a),
        "matches" | "matches_regex" => return Err(unsupported(operator)),
        _ => return Err(unknown_operator(&Value::str(a), operator, &Value::str(b))),
    };
    Ok(Value::Bool(result))
}

/// Tcl `string match` globbing: `*`, `?`, `[a-z]` sets and `\` escapes.
pub(crate) fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    let (mut pi, mut ti) = (0, 0);
    // Last `*` and the text position it has absorbed up to.
    let mut backtrack: Option<(usize, usize)> = None;

    while ti < text.len() {
        if pi < pattern.len() && pattern[pi] == '*' {
            backtrack = Some((pi, ti));
            pi += 1;
            continue;
        }
        if pi < pattern.len() {
            if let Some(next) = match_one(&pattern, pi, text[ti]) {
                pi = next;
                ti += 1;
                continue;
            }
        }
        let Some((star, absorbed)) = backtrack else {
            return false;
        };
        backtrack = Some((star, absorbed + 1));
        pi = star + 1;
        ti = absorbed + 1;
    }
    pattern[pi..].iter().all(|&c| c == '*')
}

/// Pattern index after the element at `pi`, if that element matches `c`.
fn match_one(pattern: &[char], pi: usize, c: char) -> Option<usize> {
    match pattern[pi] {
        '?' => Some(pi + 1),
        '\\' if pi + 1 < pattern.len() => (pattern[pi + 1] == c).then_some(pi + 2),
        '[' => match_set(pattern, pi + 1, c),
        literal => (literal == c).then_some(pi + 1),
    }
}

/// A `[...]` set whose body starts at `i`. An unclosed set never matches.
fn match_set(pattern: &[char], mut i: usize, c: char) -> Option<usize> {
    let mut matched = false;
    while i < pattern.len() && pattern[i] != ']' {
        let low = pattern[i];
        if i + 2 < pattern.len() && pattern[i + 1] == '-' && pattern[i + 2] != ']' {
            matched |= (low..=pattern[i + 2]).contains(&c);
            i += 3;
        } else {
            matched |= low == c;
            i += 1;
        }
    }
    (i < pattern.len() && matched).then_some(i + 1)
}
