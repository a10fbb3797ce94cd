//! Error codes for all validator diagnostics.
//!
//! Each code is a unique identifier (e.g. `E2005`) whose first digit names
//! the class of problem.

use std::fmt;

/// Error codes for all validator diagnostics.
///
/// Format: E#### where the first digit is the class:
/// - E0xxx: Lexical errors
/// - E1xxx: Structural errors
/// - E2xxx: Identifier errors
/// - E3xxx: Command shape errors
/// - E4xxx: Operator/operand compatibility
/// - E5xxx: Scope conflicts
/// - E6xxx: Evaluator errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexical (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Illegal character
    E0002,
    /// Closing `]` or `}` without an opening one
    E0003,
    /// Invalid number literal
    E0004,

    // Structural (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected an expression
    E1002,
    /// Missing closing brace
    E1003,
    /// Unbalanced braces at end of input
    E1004,
    /// Expected `{`
    E1005,
    /// Missing closing bracket or parenthesis
    E1006,

    // Identifier (E2xxx)
    /// Invalid identifier
    E2001,
    /// Invalid variable name
    E2002,
    /// Invalid header name
    E2003,
    /// Undeclared variable
    E2004,
    /// Invalid event name
    E2005,

    // Command shape (E3xxx)
    /// Wrong number of arguments
    E3001,
    /// Invalid switch option
    E3002,
    /// Invalid regsub flag
    E3003,
    /// Invalid string operation
    E3004,
    /// Invalid class subcommand or operator
    E3005,

    // Operators (E4xxx)
    /// Operator not valid for operand types
    E4001,

    // Scope (E5xxx)
    /// Mutually exclusive commands in one scope
    E5001,

    // Evaluator (E6xxx)
    /// Operand type mismatch
    E6001,
    /// Unknown operator for operand types
    E6002,
    /// Invalid command name
    E6003,
    /// Division by zero
    E6004,
    /// Read of an unset variable
    E6005,
    /// Integer arithmetic overflow
    E6006,
    /// Wrong argument count for a math function
    E6007,
    /// Construct outside the evaluator's subset
    E6008,
}

impl ErrorCode {
    /// All error code variants, for exhaustive testing.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
        ErrorCode::E3004,
        ErrorCode::E3005,
        ErrorCode::E4001,
        ErrorCode::E5001,
        ErrorCode::E6001,
        ErrorCode::E6002,
        ErrorCode::E6003,
        ErrorCode::E6004,
        ErrorCode::E6005,
        ErrorCode::E6006,
        ErrorCode::E6007,
        ErrorCode::E6008,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E3005 => "E3005",
            ErrorCode::E4001 => "E4001",
            ErrorCode::E5001 => "E5001",
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
            ErrorCode::E6006 => "E6006",
            ErrorCode::E6007 => "E6007",
            ErrorCode::E6008 => "E6008",
        }
    }

    /// One-line description of the problem class.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unterminated string literal",
            ErrorCode::E0002 => "illegal character",
            ErrorCode::E0003 => "closing delimiter without an opening one",
            ErrorCode::E0004 => "invalid number literal",
            ErrorCode::E1001 => "unexpected token",
            ErrorCode::E1002 => "expected an expression",
            ErrorCode::E1003 => "missing closing brace",
            ErrorCode::E1004 => "unbalanced braces",
            ErrorCode::E1005 => "expected `{`",
            ErrorCode::E1006 => "missing closing bracket or parenthesis",
            ErrorCode::E2001 => "invalid identifier",
            ErrorCode::E2002 => "invalid variable name",
            ErrorCode::E2003 => "invalid header name",
            ErrorCode::E2004 => "undeclared variable",
            ErrorCode::E2005 => "invalid event name",
            ErrorCode::E3001 => "wrong number of arguments",
            ErrorCode::E3002 => "invalid switch option",
            ErrorCode::E3003 => "invalid regsub flag",
            ErrorCode::E3004 => "invalid string operation",
            ErrorCode::E3005 => "invalid class subcommand or operator",
            ErrorCode::E4001 => "operator not valid for operand types",
            ErrorCode::E5001 => "mutually exclusive commands in one scope",
            ErrorCode::E6001 => "operand type mismatch",
            ErrorCode::E6002 => "unknown operator",
            ErrorCode::E6003 => "invalid command name",
            ErrorCode::E6004 => "division by zero",
            ErrorCode::E6005 => "no such variable",
            ErrorCode::E6006 => "integer overflow",
            ErrorCode::E6007 => "wrong number of arguments to a math function",
            ErrorCode::E6008 => "not supported by the evaluator",
        }
    }

    pub fn is_lexer_error(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    pub fn is_structural_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    pub fn is_identifier_error(&self) -> bool {
        self.as_str().starts_with("E2")
    }

    pub fn is_command_error(&self) -> bool {
        self.as_str().starts_with("E3")
    }

    pub fn is_operator_error(&self) -> bool {
        matches!(self, ErrorCode::E4001)
    }

    pub fn is_scope_error(&self) -> bool {
        matches!(self, ErrorCode::E5001)
    }

    pub fn is_eval_error(&self) -> bool {
        self.as_str().starts_with("E6")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2001"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
