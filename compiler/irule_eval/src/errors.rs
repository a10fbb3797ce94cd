//! Evaluation errors and their constructors.
//!
//! The variant is the kind; `Display` is the message the REPL prints.

use irule_diagnostic::{Diagnostic, ErrorCode};
use thiserror::Error;

use crate::Value;

pub type EvalResult = Result<Value, EvalError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Operands of different types.
    #[error("type mismatch: {left} {operator} {right}")]
    TypeMismatch {
        left: &'static str,
        operator: String,
        right: &'static str,
    },
    /// Operands of one type the operator does not accept.
    #[error("unknown operator: {left} {operator} {right}")]
    UnknownOperator {
        left: &'static str,
        operator: String,
        right: &'static str,
    },
    #[error("unknown operator: {operator}{operand}")]
    UnknownPrefixOperator {
        operator: String,
        operand: &'static str,
    },
    /// Tcl reads `-word` on a non-number as a command name.
    #[error("invalid command name '{0}'")]
    InvalidCommand(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("can't read \"{0}\": no such variable")]
    NoSuchVariable(String),
    #[error("integer overflow in '{0}'")]
    Overflow(String),
    #[error("wrong # args: should be \"{0}\"")]
    WrongArgs(&'static str),
    #[error("'{0}' is not supported by the evaluator")]
    Unsupported(String),
}

impl EvalError {
    pub fn code(&self) -> ErrorCode {
        match self {
            EvalError::TypeMismatch { .. } => ErrorCode::E6001,
            EvalError::UnknownOperator { .. } | EvalError::UnknownPrefixOperator { .. } => {
                ErrorCode::E6002
            }
            EvalError::InvalidCommand(_) => ErrorCode::E6003,
            EvalError::DivisionByZero => ErrorCode::E6004,
            EvalError::NoSuchVariable(_) => ErrorCode::E6005,
            EvalError::Overflow(_) => ErrorCode::E6006,
            EvalError::WrongArgs(_) => ErrorCode::E6007,
            EvalError::Unsupported(_) => ErrorCode::E6008,
        }
    }

    /// Diagnostic for the driver. Line 0 leaves the line unstamped.
    pub fn into_diagnostic(self, line: u32) -> Diagnostic {
        Diagnostic::error(self.code())
            .with_message(self.to_string())
            .at_line(line)
    }
}

#[cold]
pub fn type_mismatch(left: &Value, operator: &str, right: &Value) -> EvalError {
    EvalError::TypeMismatch {
        left: left.type_name(),
        operator: operator.to_string(),
        right: right.type_name(),
    }
}

#[cold]
pub fn unknown_operator(left: &Value, operator: &str, right: &Value) -> EvalError {
    EvalError::UnknownOperator {
        left: left.type_name(),
        operator: operator.to_string(),
        right: right.type_name(),
    }
}

#[cold]
pub fn unknown_prefix_operator(operator: &str, operand: &Value) -> EvalError {
    EvalError::UnknownPrefixOperator {
        operator: operator.to_string(),
        operand: operand.type_name(),
    }
}

#[cold]
pub fn no_such_variable(name: &str) -> EvalError {
    EvalError::NoSuchVariable(name.to_string())
}

#[cold]
pub fn overflow(operation: &str) -> EvalError {
    EvalError::Overflow(operation.to_string())
}

#[cold]
pub fn unsupported(what: impl Into<String>) -> EvalError {
    EvalError::Unsupported(what.into())
}
