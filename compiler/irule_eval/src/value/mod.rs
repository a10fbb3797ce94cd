//! Runtime values.

use std::fmt;

/// A value produced by evaluation.
///
/// Tcl is "everything is a string"; the evaluator keeps the three shapes
/// iRule expressions actually distinguish so operator errors can name them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Value {
    /// Result of commands without one (`foreach`, an empty `[]`).
    #[default]
    Empty,
    Int(i64),
    Bool(bool),
    Str(String),
}

impl Value {
    #[inline]
    pub fn str(text: impl Into<String>) -> Self {
        Value::Str(text.into())
    }

    /// A literal word: an integer when it reads as one, else a string.
    pub fn from_word(word: &str) -> Self {
        word.parse().map_or_else(|_| Value::str(word), Value::Int)
    }

    /// Type name used in operator errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Empty => "EMPTY",
            Value::Int(_) => "NUMBER",
            Value::Bool(_) => "BOOLEAN",
            Value::Str(_) => "STRING",
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Empty => false,
            Value::Int(n) => *n != 0,
            Value::Bool(b) => *b,
            Value::Str(s) => !s.is_empty(),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Whether this is an integer or a boolean, the operands `&&`/`||`
    /// and `!` accept.
    pub fn is_logical(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Bool(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => Ok(()),
            Value::Int(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}
