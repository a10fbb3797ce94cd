//! Immutable language tables.
//!
//! Event names, well-known headers and command identifiers, `string`
//! operations and the option sets of `switch`, `regsub` and `class`.
//! These are part of the language definition: plain `static` data, with
//! hash-set indexes built once on first use.

use std::sync::OnceLock;

use rustc_hash::FxHashSet;

/// Events admissible after `when`.
pub const EVENTS: &[&str] = &[
    "HTTP_REQUEST",
    "HTTP_RESPONSE",
    "LB_SELECTED",
    "CLIENT_ACCEPTED",
    "SERVER_CONNECTED",
    "CLIENTSSL_HANDSHAKE",
    "SERVERSSL_HANDSHAKE",
    "TCP_REQUEST",
    "TCP_RESPONSE",
    "USER_REQUEST",
    "USER_RESPONSE",
    "RULE_INIT",
    "DNS_REQUEST",
    "DNS_RESPONSE",
    "SSL_CLIENTHELLO",
    "SSL_SERVERHELLO",
];

/// Flow-control words that can never name a variable.
pub const RESERVED_KEYWORDS: &[&str] = &[
    "when", "if", "else", "elseif", "then", "switch", "case", "default", "set", "foreach", "for",
    "while", "return", "break", "continue", "proc",
];

/// Header names recognised without a hyphen or `x-` prefix. Lower case.
pub const COMMON_HEADERS: &[&str] = &[
    "accept",
    "accept-charset",
    "accept-encoding",
    "accept-language",
    "accept-ranges",
    "age",
    "allow",
    "authorization",
    "cache-control",
    "connection",
    "content-disposition",
    "content-encoding",
    "content-language",
    "content-length",
    "content-location",
    "content-range",
    "content-security-policy",
    "content-type",
    "cookie",
    "date",
    "etag",
    "expect",
    "expires",
    "forwarded",
    "from",
    "host",
    "if-match",
    "if-modified-since",
    "if-none-match",
    "if-range",
    "if-unmodified-since",
    "keep-alive",
    "last-modified",
    "link",
    "location",
    "max-forwards",
    "origin",
    "pragma",
    "proxy-authenticate",
    "proxy-authorization",
    "range",
    "referer",
    "retry-after",
    "server",
    "set-cookie",
    "strict-transport-security",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "user-agent",
    "vary",
    "via",
    "warning",
    "www-authenticate",
];

/// Command words accepted in command position without further checks.
pub const COMMON_IDENTIFIERS: &[&str] = &[
    // Tcl core
    "after",
    "append",
    "array",
    "binary",
    "break",
    "catch",
    "clock",
    "concat",
    "continue",
    "error",
    "eval",
    "expr",
    "for",
    "format",
    "global",
    "incr",
    "info",
    "join",
    "lappend",
    "lindex",
    "linsert",
    "list",
    "llength",
    "lrange",
    "lreplace",
    "lsearch",
    "lsort",
    "proc",
    "puts",
    "regexp",
    "scan",
    "split",
    "subst",
    "unset",
    "upvar",
    "uplevel",
    "while",
    // iRule commands
    "active_members",
    "active_nodes",
    "b64decode",
    "b64encode",
    "call",
    "clientside",
    "crc32",
    "discard",
    "domain",
    "drop",
    "event",
    "findclass",
    "findstr",
    "forward",
    "getfield",
    "htonl",
    "htons",
    "ip_protocol",
    "lasthop",
    "log",
    "matchclass",
    "md5",
    "members",
    "nexthop",
    "ntohl",
    "ntohs",
    "peer",
    "persist",
    "priority",
    "rateclass",
    "recv",
    "reject",
    "send",
    "serverside",
    "session",
    "sha1",
    "sha256",
    "sha384",
    "sha512",
    "snat",
    "snatpool",
    "substr",
    "table",
    "timing",
    "use",
    "virtual",
    "whereis",
    // namespaced commands outside the HTTP/TCP/SSL/LB families
    "ACCESS::session",
    "ACCESS::policy",
    "AES::decrypt",
    "AES::encrypt",
    "AES::key",
    "CRYPTO::decrypt",
    "CRYPTO::encrypt",
    "CRYPTO::hash",
    "CRYPTO::sign",
    "CRYPTO::verify",
    "DNS::answer",
    "DNS::question",
    "DNS::rdata",
    "DNS::return",
    "HSL::open",
    "HSL::send",
    "RESOLV::lookup",
    "STATS::get",
    "STATS::incr",
    "STATS::set",
    "UDP::payload",
    "UDP::respond",
    "URI::basename",
    "URI::compare",
    "URI::decode",
    "URI::encode",
    "URI::host",
    "URI::path",
    "URI::port",
    "URI::protocol",
    "URI::query",
    "X509::cert_fields",
    "X509::extensions",
    "X509::issuer",
    "X509::subject",
    "X509::whole",
];

/// Namespaces whose commands are accepted in command position by prefix.
pub const KNOWN_NAMESPACES: &[&str] = &["HTTP", "TCP", "SSL", "LB"];

/// `string` operations with their minimum argument count. Anything else
/// after `string` is rejected.
pub const STRING_OPERATIONS: &[(&str, usize)] = &[
    ("compare", 2),
    ("contains", 2),
    ("equals", 2),
    ("findstr", 2),
    ("index", 2),
    ("last", 2),
    ("length", 1),
    ("map", 2),
    ("match", 2),
    ("range", 3),
    ("repeat", 2),
    ("replace", 3),
    ("reverse", 1),
    ("substring", 2),
    ("tolower", 1),
    ("toupper", 1),
    ("trim", 1),
];

/// `regsub` flags, without the leading `-`.
pub const REGSUB_FLAGS: &[&str] = &["all", "nocase"];

/// `class` subcommands.
pub const CLASS_SUBCOMMANDS: &[&str] = &[
    "anymore",
    "donesearch",
    "element",
    "exists",
    "get",
    "lookup",
    "match",
    "names",
    "nextelement",
    "search",
    "size",
    "startsearch",
    "type",
];

/// Option words accepted by `class match` and `class search`.
pub const CLASS_OPTIONS: &[&str] = &["-all", "-index", "-name", "-value", "-element", "--"];

/// Comparison operators accepted by `class match`.
pub const CLASS_MATCH_OPERATORS: &[&str] = &["equals", "starts_with", "ends_with", "contains"];

/// `HTTP::header` subcommands; any other first argument is a header name.
pub const HTTP_HEADER_SUBCOMMANDS: &[&str] = &[
    "at",
    "count",
    "exists",
    "insert",
    "insert_modssl_fields",
    "is_keepalive",
    "is_redirect",
    "lws",
    "names",
    "remove",
    "replace",
    "sanitize",
    "value",
    "values",
];

#[inline]
pub fn is_valid_event(name: &str) -> bool {
    EVENTS.contains(&name)
}

#[inline]
pub fn is_reserved_keyword(name: &str) -> bool {
    RESERVED_KEYWORDS.contains(&name)
}

/// Case-insensitive membership in [`COMMON_HEADERS`].
pub fn is_common_header(name: &str) -> bool {
    static INDEX: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    let index = INDEX.get_or_init(|| COMMON_HEADERS.iter().copied().collect());
    index.contains(name.to_ascii_lowercase().as_str())
}

pub fn is_common_identifier(name: &str) -> bool {
    static INDEX: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    INDEX
        .get_or_init(|| COMMON_IDENTIFIERS.iter().copied().collect())
        .contains(name)
}

/// `local0.` through `local7.`, optionally followed by a level.
pub fn is_log_facility(name: &str) -> bool {
    let Some(rest) = name.strip_prefix("local") else {
        return false;
    };
    let bytes = rest.as_bytes();
    bytes.len() >= 2 && (b'0'..=b'7').contains(&bytes[0]) && bytes[1] == b'.'
}

/// Whether `name` is `NS::rest` for one of [`KNOWN_NAMESPACES`].
pub fn has_known_namespace(name: &str) -> bool {
    name.split_once("::")
        .is_some_and(|(ns, rest)| !rest.is_empty() && KNOWN_NAMESPACES.contains(&ns))
}

/// Minimum argument count of a `string` operation, `None` if unknown.
pub fn string_operation_arity(op: &str) -> Option<usize> {
    STRING_OPERATIONS
        .iter()
        .find(|(name, _)| *name == op)
        .map(|&(_, arity)| arity)
}

#[inline]
pub fn is_regsub_flag(flag: &str) -> bool {
    REGSUB_FLAGS.contains(&flag)
}

#[inline]
pub fn is_class_subcommand(name: &str) -> bool {
    CLASS_SUBCOMMANDS.contains(&name)
}

#[inline]
pub fn is_class_match_operator(op: &str) -> bool {
    CLASS_MATCH_OPERATORS.contains(&op)
}

#[inline]
pub fn is_http_header_subcommand(name: &str) -> bool {
    HTTP_HEADER_SUBCOMMANDS.contains(&name)
}

#[cfg(test)]
mod tests;
