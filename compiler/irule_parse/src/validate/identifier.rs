//! Identifier legality.

use irule_ir::builtins::{
    has_known_namespace, is_common_header, is_common_identifier, is_log_facility,
    is_reserved_keyword,
};
use rustc_hash::FxHashSet;

/// Where a name appears; each context has its own rules.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IdentContext {
    /// Target of `set`, `foreach` or `regsub`.
    Variable,
    /// Header argument of `HTTP::header`.
    Header,
    /// A bare word in command or expression position.
    Standalone,
}

/// Whether `name` is legal in `context`.
///
/// `declared` is consulted in standalone context only.
pub fn is_valid_irule_identifier(
    name: &str,
    context: IdentContext,
    declared: &FxHashSet<String>,
) -> bool {
    match context {
        IdentContext::Variable => is_valid_variable_name(name),
        IdentContext::Header => is_valid_header_name(name),
        IdentContext::Standalone => is_valid_standalone(name, declared),
    }
}

/// `name`, `ns::name`, `::name`, optionally with an array element suffix
/// `name(key)`. Reserved keywords are refused.
pub fn is_valid_variable_name(name: &str) -> bool {
    let base = array_base(name);
    let body = base.strip_prefix("::").unwrap_or(base);
    !body.is_empty() && body.split("::").all(is_simple_name) && !is_reserved_keyword(body)
}

/// The array name of `name(key)`, or `name` itself.
pub fn array_base(name: &str) -> &str {
    match name.find('(') {
        Some(open) if open > 0 && name.ends_with(')') => &name[..open],
        _ => name,
    }
}

fn is_simple_name(segment: &str) -> bool {
    let mut bytes = segment.bytes();
    bytes
        .next()
        .is_some_and(|b| b.is_ascii_alphabetic() || b == b'_')
        && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// A known header, an `X-` extension header, or any hyphenated name.
pub fn is_valid_header_name(name: &str) -> bool {
    is_common_header(name)
        || name
            .get(..2)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("x-"))
        || name.contains('-')
}

fn is_valid_standalone(name: &str, declared: &FxHashSet<String>) -> bool {
    is_common_identifier(name)
        || is_log_facility(name)
        || has_known_namespace(name)
        || declared.contains(name)
        || is_single_letter(name)
        || is_reserved_keyword(name)
}

fn is_single_letter(name: &str) -> bool {
    matches!(name.as_bytes(), [b] if b.is_ascii_alphabetic())
}
