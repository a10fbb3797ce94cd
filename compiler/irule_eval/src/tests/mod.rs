//! Tests for the operator tables, kept apart from the implementation.

mod operators_tests;
