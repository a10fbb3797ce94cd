//! Token kinds for iRules.

use std::fmt;

/// Namespaced command families with a dedicated AST node each.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CommandFamily {
    /// `HTTP::*`
    Http,
    /// `SSL::*`
    Ssl,
    /// `LB::*`
    Lb,
    /// `IP::*`
    Ip,
}

impl CommandFamily {
    /// Namespace prefix including the trailing `::`.
    pub const fn prefix(self) -> &'static str {
        match self {
            CommandFamily::Http => "HTTP::",
            CommandFamily::Ssl => "SSL::",
            CommandFamily::Lb => "LB::",
            CommandFamily::Ip => "IP::",
        }
    }

    /// Family of a namespaced command name, recognised by prefix alone.
    pub fn of_name(name: &str) -> Option<CommandFamily> {
        [
            CommandFamily::Http,
            CommandFamily::Ssl,
            CommandFamily::Lb,
            CommandFamily::Ip,
        ]
        .into_iter()
        .find(|family| name.starts_with(family.prefix()) && name.len() > family.prefix().len())
    }
}

/// Closed set of token kinds.
///
/// Literal payloads live on [`Token::literal`](super::Token), so the kind
/// itself is a plain `Copy` discriminant.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    // === Structural ===
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Comma,
    Semicolon,
    Eof,
    /// Lexical error; the literal describes the problem.
    Illegal,

    // === Literals ===
    Number,
    String,
    Ident,
    /// `$name`, `${name}`, `$ns::name`
    Variable,
    IpAddress,

    // === Operators ===
    Plus,
    Minus,
    Asterisk,
    Slash,
    Bang,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Eq,
    NotEq,
    And,
    Or,
    Dollar,
    Percent,
    Caret,
    Colon,
    DoubleColon,

    // === Reserved words ===
    When,
    If,
    Else,
    ElseIf,
    Switch,
    Case,
    Default,
    Set,
    Foreach,
    In,
    Return,
    True,
    False,
    Ltm,
    Rule,
    Class,
    Match,
    Matches,
    MatchesGlob,
    MatchesRegex,
    Contains,
    StartsWith,
    EndsWith,
    Equals,
    /// `eq`
    StrEq,
    /// `ne`
    StrNe,

    // === Core commands ===
    StringCmd,
    Regsub,
    Pool,
    Node,
    Log,

    // === HTTP:: ===
    HttpUri,
    HttpPath,
    HttpQuery,
    HttpHost,
    HttpMethod,
    HttpHeader,
    HttpCookie,
    HttpRespond,
    HttpRedirect,
    HttpStatus,
    HttpVersion,
    HttpPayload,
    HttpCollect,
    HttpRelease,
    HttpClose,
    HttpRequest,
    HttpUsername,
    HttpPassword,
    HttpIsKeepalive,
    HttpIsRedirect,

    // === SSL:: ===
    SslCert,
    SslCipher,
    SslCipherBits,
    SslSessionId,
    SslVerifyResult,
    SslMode,
    SslRenegotiate,
    SslDisable,
    SslEnable,
    SslExtensions,
    SslProtocol,

    // === LB:: ===
    LbSelect,
    LbServer,
    LbMode,
    LbReselect,
    LbDetach,
    LbStatus,
    LbSnat,
    LbDown,
    LbUp,
    LbQueue,

    // === IP:: ===
    IpClientAddr,
    IpServerAddr,
    IpRemoteAddr,
    IpLocalAddr,
    IpAddr,
    IpProtocol,
    IpTos,
    IpTtl,
    IpHops,
    IpIdleTimeout,
    IpStats,
    IpVersion,
}

impl TokenKind {
    /// Upper-case kind name used in diagnostics and token dumps.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::LBracket => "LBRACKET",
            TokenKind::RBracket => "RBRACKET",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::Comma => "COMMA",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Eof => "EOF",
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Ident => "IDENT",
            TokenKind::Variable => "VARIABLE",
            TokenKind::IpAddress => "IP_ADDRESS",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Asterisk => "ASTERISK",
            TokenKind::Slash => "SLASH",
            TokenKind::Bang => "BANG",
            TokenKind::Lt => "LT",
            TokenKind::Gt => "GT",
            TokenKind::LtEq => "LT_EQ",
            TokenKind::GtEq => "GT_EQ",
            TokenKind::Eq => "EQ",
            TokenKind::NotEq => "NOT_EQ",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Dollar => "DOLLAR",
            TokenKind::Percent => "PERCENT",
            TokenKind::Caret => "CARET",
            TokenKind::Colon => "COLON",
            TokenKind::DoubleColon => "DOUBLE_COLON",
            TokenKind::When => "WHEN",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::ElseIf => "ELSEIF",
            TokenKind::Switch => "SWITCH",
            TokenKind::Case => "CASE",
            TokenKind::Default => "DEFAULT",
            TokenKind::Set => "SET",
            TokenKind::Foreach => "FOREACH",
            TokenKind::In => "IN",
            TokenKind::Return => "RETURN",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Ltm => "LTM",
            TokenKind::Rule => "RULE",
            TokenKind::Class => "CLASS",
            TokenKind::Match => "MATCH",
            TokenKind::Matches => "MATCHES",
            TokenKind::MatchesGlob => "MATCHES_GLOB",
            TokenKind::MatchesRegex => "MATCHES_REGEX",
            TokenKind::Contains => "CONTAINS",
            TokenKind::StartsWith => "STARTS_WITH",
            TokenKind::EndsWith => "ENDS_WITH",
            TokenKind::Equals => "EQUALS",
            TokenKind::StrEq => "STR_EQ",
            TokenKind::StrNe => "STR_NE",
            TokenKind::StringCmd => "STRING_CMD",
            TokenKind::Regsub => "REGSUB",
            TokenKind::Pool => "POOL",
            TokenKind::Node => "NODE",
            TokenKind::Log => "LOG",
            TokenKind::HttpUri => "HTTP_URI",
            TokenKind::HttpPath => "HTTP_PATH",
            TokenKind::HttpQuery => "HTTP_QUERY",
            TokenKind::HttpHost => "HTTP_HOST",
            TokenKind::HttpMethod => "HTTP_METHOD",
            TokenKind::HttpHeader => "HTTP_HEADER",
            TokenKind::HttpCookie => "HTTP_COOKIE",
            TokenKind::HttpRespond => "HTTP_RESPOND",
            TokenKind::HttpRedirect => "HTTP_REDIRECT",
            TokenKind::HttpStatus => "HTTP_STATUS",
            TokenKind::HttpVersion => "HTTP_VERSION",
            TokenKind::HttpPayload => "HTTP_PAYLOAD",
            TokenKind::HttpCollect => "HTTP_COLLECT",
            TokenKind::HttpRelease => "HTTP_RELEASE",
            TokenKind::HttpClose => "HTTP_CLOSE",
            TokenKind::HttpRequest => "HTTP_REQUEST",
            TokenKind::HttpUsername => "HTTP_USERNAME",
            TokenKind::HttpPassword => "HTTP_PASSWORD",
            TokenKind::HttpIsKeepalive => "HTTP_IS_KEEPALIVE",
            TokenKind::HttpIsRedirect => "HTTP_IS_REDIRECT",
            TokenKind::SslCert => "SSL_CERT",
            TokenKind::SslCipher => "SSL_CIPHER",
            TokenKind::SslCipherBits => "SSL_CIPHER_BITS",
            TokenKind::SslSessionId => "SSL_SESSIONID",
            TokenKind::SslVerifyResult => "SSL_VERIFY_RESULT",
            TokenKind::SslMode => "SSL_MODE",
            TokenKind::SslRenegotiate => "SSL_RENEGOTIATE",
            TokenKind::SslDisable => "SSL_DISABLE",
            TokenKind::SslEnable => "SSL_ENABLE",
            TokenKind::SslExtensions => "SSL_EXTENSIONS",
            TokenKind::SslProtocol => "SSL_PROTOCOL",
            TokenKind::LbSelect => "LB_SELECT",
            TokenKind::LbServer => "LB_SERVER",
            TokenKind::LbMode => "LB_MODE",
            TokenKind::LbReselect => "LB_RESELECT",
            TokenKind::LbDetach => "LB_DETACH",
            TokenKind::LbStatus => "LB_STATUS",
            TokenKind::LbSnat => "LB_SNAT",
            TokenKind::LbDown => "LB_DOWN",
            TokenKind::LbUp => "LB_UP",
            TokenKind::LbQueue => "LB_QUEUE",
            TokenKind::IpClientAddr => "IP_CLIENT_ADDR",
            TokenKind::IpServerAddr => "IP_SERVER_ADDR",
            TokenKind::IpRemoteAddr => "IP_REMOTE_ADDR",
            TokenKind::IpLocalAddr => "IP_LOCAL_ADDR",
            TokenKind::IpAddr => "IP_ADDR",
            TokenKind::IpProtocol => "IP_PROTOCOL",
            TokenKind::IpTos => "IP_TOS",
            TokenKind::IpTtl => "IP_TTL",
            TokenKind::IpHops => "IP_HOPS",
            TokenKind::IpIdleTimeout => "IP_IDLE_TIMEOUT",
            TokenKind::IpStats => "IP_STATS",
            TokenKind::IpVersion => "IP_VERSION",
        }
    }

    /// Family of a namespaced command token, if this is one.
    pub const fn command_family(self) -> Option<CommandFamily> {
        match self {
            TokenKind::HttpUri
            | TokenKind::HttpPath
            | TokenKind::HttpQuery
            | TokenKind::HttpHost
            | TokenKind::HttpMethod
            | TokenKind::HttpHeader
            | TokenKind::HttpCookie
            | TokenKind::HttpRespond
            | TokenKind::HttpRedirect
            | TokenKind::HttpStatus
            | TokenKind::HttpVersion
            | TokenKind::HttpPayload
            | TokenKind::HttpCollect
            | TokenKind::HttpRelease
            | TokenKind::HttpClose
            | TokenKind::HttpRequest
            | TokenKind::HttpUsername
            | TokenKind::HttpPassword
            | TokenKind::HttpIsKeepalive
            | TokenKind::HttpIsRedirect => Some(CommandFamily::Http),
            TokenKind::SslCert
            | TokenKind::SslCipher
            | TokenKind::SslCipherBits
            | TokenKind::SslSessionId
            | TokenKind::SslVerifyResult
            | TokenKind::SslMode
            | TokenKind::SslRenegotiate
            | TokenKind::SslDisable
            | TokenKind::SslEnable
            | TokenKind::SslExtensions
            | TokenKind::SslProtocol => Some(CommandFamily::Ssl),
            TokenKind::LbSelect
            | TokenKind::LbServer
            | TokenKind::LbMode
            | TokenKind::LbReselect
            | TokenKind::LbDetach
            | TokenKind::LbStatus
            | TokenKind::LbSnat
            | TokenKind::LbDown
            | TokenKind::LbUp
            | TokenKind::LbQueue => Some(CommandFamily::Lb),
            TokenKind::IpClientAddr
            | TokenKind::IpServerAddr
            | TokenKind::IpRemoteAddr
            | TokenKind::IpLocalAddr
            | TokenKind::IpAddr
            | TokenKind::IpProtocol
            | TokenKind::IpTos
            | TokenKind::IpTtl
            | TokenKind::IpHops
            | TokenKind::IpIdleTimeout
            | TokenKind::IpStats
            | TokenKind::IpVersion => Some(CommandFamily::Ip),
            _ => None,
        }
    }

    /// Reserved flow-control and operator words.
    ///
    /// These may still appear as plain words in command arguments, but never
    /// as variable names.
    pub const fn is_reserved_word(self) -> bool {
        matches!(
            self,
            TokenKind::When
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::ElseIf
                | TokenKind::Switch
                | TokenKind::Case
                | TokenKind::Default
                | TokenKind::Set
                | TokenKind::Foreach
                | TokenKind::In
                | TokenKind::Return
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Ltm
                | TokenKind::Rule
                | TokenKind::Class
                | TokenKind::Match
                | TokenKind::Matches
                | TokenKind::MatchesGlob
                | TokenKind::MatchesRegex
                | TokenKind::Contains
                | TokenKind::StartsWith
                | TokenKind::EndsWith
                | TokenKind::Equals
                | TokenKind::StrEq
                | TokenKind::StrNe
        )
    }

    /// Kinds whose literal is a word: identifiers, keywords and commands.
    ///
    /// In command-argument position any of these is just a bare word.
    pub const fn is_word(self) -> bool {
        matches!(
            self,
            TokenKind::Ident
                | TokenKind::StringCmd
                | TokenKind::Regsub
                | TokenKind::Pool
                | TokenKind::Node
                | TokenKind::Log
        ) || self.is_reserved_word()
            || self.command_family().is_some()
    }

    /// Closing delimiters and statement separators.
    pub const fn is_terminator(self) -> bool {
        matches!(
            self,
            TokenKind::RBrace | TokenKind::RBracket | TokenKind::Semicolon | TokenKind::Eof
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
