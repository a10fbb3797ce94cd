//! iRule Eval - a toy tree-walking evaluator.
//!
//! The validator never executes iRules. This crate exists so the REPL can
//! smoke-test arithmetic and control flow on parsed input: integers,
//! booleans and strings, `set`/`incr`, `$` reads, operators, `if`,
//! `foreach`, exact and glob `switch`, blocks and `return`.
//!
//! Anything that needs a live connection (`HTTP::*`, `pool`, `when`, ...)
//! is reported as unsupported rather than guessed at.
//!
//! # Architecture
//!
//! - `Value`: the runtime values
//! - `Environment`: the flat variable table
//! - `operators` / `unary_operators`: operator dispatch on value pairs
//! - `Interpreter`: statement and expression walking

mod environment;
pub mod errors;
mod interpreter;
mod operators;
mod unary_operators;
mod value;

pub use environment::Environment;
pub use errors::{EvalError, EvalResult};
pub use interpreter::Interpreter;
pub use operators::evaluate_binary;
pub use unary_operators::evaluate_unary;
pub use value::Value;

#[cfg(test)]
mod tests;
