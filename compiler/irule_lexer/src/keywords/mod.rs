//! Keyword resolution.
//!
//! Two kinds of keywords:
//! 1. **Core words**: flow control, operator words and the core commands,
//!    resolved with a length-bucketed `match`.
//! 2. **Namespaced commands**: `HTTP::*`, `SSL::*`, `LB::*` and `IP::*`,
//!    one immutable table per namespace, indexed into a hash map on first
//!    use.
//!
//! Anything else is a plain `IDENT`.

use std::sync::OnceLock;

use irule_ir::TokenKind;
use rustc_hash::FxHashMap;

/// `HTTP::` commands with a dedicated token.
pub const HTTP_KEYWORDS: &[(&str, TokenKind)] = &[
    ("uri", TokenKind::HttpUri),
    ("path", TokenKind::HttpPath),
    ("query", TokenKind::HttpQuery),
    ("host", TokenKind::HttpHost),
    ("method", TokenKind::HttpMethod),
    ("header", TokenKind::HttpHeader),
    ("cookie", TokenKind::HttpCookie),
    ("respond", TokenKind::HttpRespond),
    ("redirect", TokenKind::HttpRedirect),
    ("status", TokenKind::HttpStatus),
    ("version", TokenKind::HttpVersion),
    ("payload", TokenKind::HttpPayload),
    ("collect", TokenKind::HttpCollect),
    ("release", TokenKind::HttpRelease),
    ("close", TokenKind::HttpClose),
    ("request", TokenKind::HttpRequest),
    ("username", TokenKind::HttpUsername),
    ("password", TokenKind::HttpPassword),
    ("is_keepalive", TokenKind::HttpIsKeepalive),
    ("is_redirect", TokenKind::HttpIsRedirect),
];

/// `SSL::` commands with a dedicated token.
pub const SSL_KEYWORDS: &[(&str, TokenKind)] = &[
    ("cert", TokenKind::SslCert),
    ("cipher", TokenKind::SslCipher),
    ("cipher_bits", TokenKind::SslCipherBits),
    ("sessionid", TokenKind::SslSessionId),
    ("verify_result", TokenKind::SslVerifyResult),
    ("mode", TokenKind::SslMode),
    ("renegotiate", TokenKind::SslRenegotiate),
    ("disable", TokenKind::SslDisable),
    ("enable", TokenKind::SslEnable),
    ("extensions", TokenKind::SslExtensions),
    ("protocol", TokenKind::SslProtocol),
];

/// `LB::` commands with a dedicated token.
pub const LB_KEYWORDS: &[(&str, TokenKind)] = &[
    ("select", TokenKind::LbSelect),
    ("server", TokenKind::LbServer),
    ("mode", TokenKind::LbMode),
    ("reselect", TokenKind::LbReselect),
    ("detach", TokenKind::LbDetach),
    ("status", TokenKind::LbStatus),
    ("snat", TokenKind::LbSnat),
    ("down", TokenKind::LbDown),
    ("up", TokenKind::LbUp),
    ("queue", TokenKind::LbQueue),
];

/// `IP::` commands with a dedicated token.
pub const IP_KEYWORDS: &[(&str, TokenKind)] = &[
    ("client_addr", TokenKind::IpClientAddr),
    ("server_addr", TokenKind::IpServerAddr),
    ("remote_addr", TokenKind::IpRemoteAddr),
    ("local_addr", TokenKind::IpLocalAddr),
    ("addr", TokenKind::IpAddr),
    ("protocol", TokenKind::IpProtocol),
    ("tos", TokenKind::IpTos),
    ("ttl", TokenKind::IpTtl),
    ("hops", TokenKind::IpHops),
    ("idle_timeout", TokenKind::IpIdleTimeout),
    ("stats", TokenKind::IpStats),
    ("version", TokenKind::IpVersion),
];

type NamespaceIndex = FxHashMap<&'static str, FxHashMap<&'static str, TokenKind>>;

fn namespace_index() -> &'static NamespaceIndex {
    static INDEX: OnceLock<NamespaceIndex> = OnceLock::new();
    INDEX.get_or_init(|| {
        [
            ("HTTP", HTTP_KEYWORDS),
            ("SSL", SSL_KEYWORDS),
            ("LB", LB_KEYWORDS),
            ("IP", IP_KEYWORDS),
        ]
        .into_iter()
        .map(|(ns, table)| (ns, table.iter().copied().collect()))
        .collect()
    })
}

/// Look up the token kind for an identifier's text.
///
/// Returns `None` for plain identifiers, including unknown commands in a
/// known namespace (`HTTP::fallback`).
pub fn lookup(text: &str) -> Option<TokenKind> {
    if let Some((ns, name)) = text.split_once("::") {
        return namespace_index().get(ns)?.get(name).copied();
    }
    lookup_core(text)
}

/// Core words. All are 2-13 chars of ASCII lower case or `_`.
fn lookup_core(text: &str) -> Option<TokenKind> {
    let len = text.len();
    if !(2..=13).contains(&len) || !text.as_bytes()[0].is_ascii_lowercase() {
        return None;
    }
    match len {
        2 => match text {
            "if" => Some(TokenKind::If),
            "in" => Some(TokenKind::In),
            "eq" => Some(TokenKind::StrEq),
            "ne" => Some(TokenKind::StrNe),
            _ => None,
        },
        3 => match text {
            "set" => Some(TokenKind::Set),
            "ltm" => Some(TokenKind::Ltm),
            "log" => Some(TokenKind::Log),
            _ => None,
        },
        4 => match text {
            "when" => Some(TokenKind::When),
            "else" => Some(TokenKind::Else),
            "case" => Some(TokenKind::Case),
            "true" => Some(TokenKind::True),
            "rule" => Some(TokenKind::Rule),
            "pool" => Some(TokenKind::Pool),
            "node" => Some(TokenKind::Node),
            _ => None,
        },
        5 => match text {
            "false" => Some(TokenKind::False),
            "class" => Some(TokenKind::Class),
            "match" => Some(TokenKind::Match),
            _ => None,
        },
        6 => match text {
            "elseif" => Some(TokenKind::ElseIf),
            "switch" => Some(TokenKind::Switch),
            "return" => Some(TokenKind::Return),
            "string" => Some(TokenKind::StringCmd),
            "regsub" => Some(TokenKind::Regsub),
            "equals" => Some(TokenKind::Equals),
            _ => None,
        },
        7 => match text {
            "default" => Some(TokenKind::Default),
            "foreach" => Some(TokenKind::Foreach),
            "matches" => Some(TokenKind::Matches),
            _ => None,
        },
        8 => match text {
            "contains" => Some(TokenKind::Contains),
            _ => None,
        },
        9 => match text {
            "ends_with" => Some(TokenKind::EndsWith),
            _ => None,
        },
        11 => match text {
            "starts_with" => Some(TokenKind::StartsWith),
            _ => None,
        },
        12 => match text {
            "matches_glob" => Some(TokenKind::MatchesGlob),
            _ => None,
        },
        13 => match text {
            "matches_regex" => Some(TokenKind::MatchesRegex),
            _ => None,
        },
        _ => None,
    }
}
