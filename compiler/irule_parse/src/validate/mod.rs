//! Validation predicates applied while parsing.
//!
//! - [`identifier`]: legality of names by context (variable, header,
//!   standalone word)
//! - [`operator`]: operand compatibility of infix operators
//!
//! Both are pure functions of their inputs; the parser decides where they
//! apply and turns a `false` into a diagnostic.

mod identifier;
mod operator;

pub use identifier::{
    array_base, is_valid_header_name, is_valid_irule_identifier, is_valid_variable_name,
    IdentContext,
};
pub use operator::{is_valid_operator_for_types, OperandClass};

#[cfg(test)]
mod tests;
