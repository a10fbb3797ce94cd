//! Stack growth for deeply nested iRules.
//!
//! Brackets, braces and operator chains all recurse in the parser and the
//! evaluator. Input such as ten thousand nested `[list [list ...]]` words
//! would overflow a fixed thread stack, so every recursive entry point goes
//! through [`ensure_sufficient_stack`], which switches to a freshly
//! allocated segment when the current one runs low.
//!
//! On `wasm32` the guard is a plain call.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated segment.
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone is left.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
