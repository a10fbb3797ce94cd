//! Unary operator implementations.

use crate::errors::{overflow, unknown_prefix_operator};
use crate::{EvalError, EvalResult, Value};

/// Apply a prefix operator to an evaluated operand.
pub fn evaluate_unary(operator: &str, operand: &Value) -> EvalResult {
    match (operator, operand) {
        ("-", Value::Int(n)) => n.checked_neg().map(Value::Int).ok_or_else(|| overflow("-")),
        // `-word` on anything but a number is a command name to Tcl.
        ("-", _) => Err(EvalError::InvalidCommand(format!("-{operand}"))),
        ("!", Value::Bool(b)) => Ok(Value::Bool(!b)),
        ("!", Value::Int(n)) => Ok(Value::Bool(*n == 0)),
        _ => Err(unknown_prefix_operator(operator, operand)),
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;

    #[test]
    fn negation() {
        assert_eq!(evaluate_unary("-", &Value::Int(5)).unwrap(), Value::Int(-5));
        assert_eq!(evaluate_unary("-", &Value::Int(-5)).unwrap(), Value::Int(5));
    }

    #[test]
    fn negation_overflow() {
        assert_eq!(
            evaluate_unary("-", &Value::Int(i64::MIN)),
            Err(EvalError::Overflow("-".to_string()))
        );
    }

    #[test]
    fn negation_of_boolean_is_a_command_name() {
        let err = evaluate_unary("-", &Value::Bool(true)).unwrap_err();
        assert_eq!(err.to_string(), "invalid command name '-true'");
    }

    #[test]
    fn logical_not() {
        assert_eq!(evaluate_unary("!", &Value::Bool(true)).unwrap(), Value::Bool(false));
        assert_eq!(evaluate_unary("!", &Value::Int(0)).unwrap(), Value::Bool(true));
    }

    #[test]
    fn not_on_string() {
        let err = evaluate_unary("!", &Value::str("x")).unwrap_err();
        assert_eq!(err.to_string(), "unknown operator: !STRING");
    }
}
