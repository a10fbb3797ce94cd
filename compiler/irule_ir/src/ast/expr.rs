//! Expression nodes: literals, operators, command forms and patterns.

use std::fmt;

use super::{impl_node, write_joined, BlockStatement, Node};
use crate::{CommandFamily, Token};

/// An expression or a command word.
///
/// Tcl blurs the line between the two: a bracketed command substitution is
/// an expression, and a command invocation at statement level is wrapped in
/// an `ExpressionStatement`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expression {
    Identifier(Identifier),
    InvalidIdentifier(InvalidIdentifier),
    Number(NumberLiteral),
    String(StringLiteral),
    Boolean(BooleanLiteral),
    IpAddress(IpAddressLiteral),
    Prefix(PrefixExpression),
    Infix(InfixExpression),
    Parenthesized(ParenthesizedExpression),
    Bracket(BracketExpression),
    Index(IndexExpression),
    Call(CallExpression),
    Command(CommandInvocation),
    Array(ArrayLiteral),
    List(ListLiteral),
    Hash(HashLiteral),
    Map(MapLiteral),
    When(WhenExpression),
    Http(NamespacedCommand),
    Ssl(NamespacedCommand),
    LoadBalancer(NamespacedCommand),
    Ip(NamespacedCommand),
    StringOp(StringOperation),
    Class(ClassCommand),
    Regsub(RegsubExpression),
    CommandSubstitution(CommandSubstitution),
    Interpolated(InterpolatedString),
    Glob(GlobPattern),
    Regex(RegexPattern),
    MultiPattern(MultiPattern),
    NodeStatement(NodeStatement),
}

/// Runs `$body` with `$e` bound to the payload of any variant.
macro_rules! each_variant {
    ($value:expr, $e:ident => $body:expr) => {
        match $value {
            Expression::Identifier($e) => $body,
            Expression::InvalidIdentifier($e) => $body,
            Expression::Number($e) => $body,
            Expression::String($e) => $body,
            Expression::Boolean($e) => $body,
            Expression::IpAddress($e) => $body,
            Expression::Prefix($e) => $body,
            Expression::Infix($e) => $body,
            Expression::Parenthesized($e) => $body,
            Expression::Bracket($e) => $body,
            Expression::Index($e) => $body,
            Expression::Call($e) => $body,
            Expression::Command($e) => $body,
            Expression::Array($e) => $body,
            Expression::List($e) => $body,
            Expression::Hash($e) => $body,
            Expression::Map($e) => $body,
            Expression::When($e) => $body,
            Expression::Http($e)
            | Expression::Ssl($e)
            | Expression::LoadBalancer($e)
            | Expression::Ip($e) => $body,
            Expression::StringOp($e) => $body,
            Expression::Class($e) => $body,
            Expression::Regsub($e) => $body,
            Expression::CommandSubstitution($e) => $body,
            Expression::Interpolated($e) => $body,
            Expression::Glob($e) => $body,
            Expression::Regex($e) => $body,
            Expression::MultiPattern($e) => $body,
            Expression::NodeStatement($e) => $body,
        }
    };
}

impl Expression {
    /// Variant name, used in debug dumps and test failures.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expression::Identifier(_) => "Identifier",
            Expression::InvalidIdentifier(_) => "InvalidIdentifier",
            Expression::Number(_) => "NumberLiteral",
            Expression::String(_) => "StringLiteral",
            Expression::Boolean(_) => "Boolean",
            Expression::IpAddress(_) => "IpAddressLiteral",
            Expression::Prefix(_) => "PrefixExpression",
            Expression::Infix(_) => "InfixExpression",
            Expression::Parenthesized(_) => "ParenthesizedExpression",
            Expression::Bracket(_) => "BracketExpression",
            Expression::Index(_) => "IndexExpression",
            Expression::Call(_) => "CallExpression",
            Expression::Command(_) => "CommandInvocation",
            Expression::Array(_) => "ArrayLiteral",
            Expression::List(_) => "ListLiteral",
            Expression::Hash(_) => "HashLiteral",
            Expression::Map(_) => "MapLiteral",
            Expression::When(_) => "WhenExpression",
            Expression::Http(_) => "HttpExpression",
            Expression::Ssl(_) => "SSLExpression",
            Expression::LoadBalancer(_) => "LoadBalancerExpression",
            Expression::Ip(_) => "IpExpression",
            Expression::StringOp(_) => "StringOperation",
            Expression::Class(_) => "ClassCommand",
            Expression::Regsub(_) => "RegsubExpression",
            Expression::CommandSubstitution(_) => "CommandSubstitution",
            Expression::Interpolated(_) => "InterpolatedString",
            Expression::Glob(_) => "GlobPattern",
            Expression::Regex(_) => "RegexPattern",
            Expression::MultiPattern(_) => "MultiPattern",
            Expression::NodeStatement(_) => "NodeStatement",
        }
    }

    /// Wraps a namespaced command in the variant for its family.
    pub fn namespaced(command: NamespacedCommand) -> Expression {
        match command.family {
            CommandFamily::Http => Expression::Http(command),
            CommandFamily::Ssl => Expression::Ssl(command),
            CommandFamily::Lb => Expression::LoadBalancer(command),
            CommandFamily::Ip => Expression::Ip(command),
        }
    }

    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Expression::Identifier(ident) => Some(ident),
            _ => None,
        }
    }

    /// Whether this is a `$` variable reference.
    pub fn is_variable(&self) -> bool {
        matches!(self, Expression::Identifier(ident) if ident.is_variable)
    }

    /// Whether this is a namespaced command of any family.
    pub fn is_namespaced_command(&self) -> bool {
        matches!(
            self,
            Expression::Http(_) | Expression::Ssl(_) | Expression::LoadBalancer(_) | Expression::Ip(_)
        )
    }

    /// Text of a word-like expression: bare words, literals and option words.
    pub fn word_text(&self) -> Option<&str> {
        match self {
            Expression::Identifier(ident) if !ident.is_variable => Some(&ident.value),
            Expression::InvalidIdentifier(ident) => Some(&ident.value),
            Expression::String(s) => Some(&s.value),
            Expression::IpAddress(ip) => Some(&ip.value),
            Expression::Number(n) => Some(&n.token.literal),
            Expression::Boolean(b) => Some(&b.token.literal),
            _ => None,
        }
    }
}

impl Node for Expression {
    fn token(&self) -> &Token {
        each_variant!(self, e => &e.token)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        each_variant!(self, e => fmt::Display::fmt(e, f))
    }
}

/// A name: a bare word, or a `$` variable reference when `is_variable`.
///
/// `value` never includes the `$` or the braces of `${name}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
    pub is_variable: bool,
    /// A reserved word used as a plain word (`default` as a pool name).
    pub is_reserved: bool,
}

impl Identifier {
    pub fn new(token: Token, value: impl Into<String>) -> Self {
        Identifier {
            token,
            value: value.into(),
            is_variable: false,
            is_reserved: false,
        }
    }

    pub fn variable(token: Token, name: impl Into<String>) -> Self {
        Identifier {
            is_variable: true,
            ..Identifier::new(token, name)
        }
    }

    /// Whether `value` renders as `$name` rather than `${name}`.
    fn is_plain_name(&self) -> bool {
        !self.value.is_empty()
            && self
                .value
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b':')
    }

    /// `${name}` form, used inside interpolated strings.
    pub fn braced(&self) -> String {
        format!("${{{}}}", self.value)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_variable {
            return f.write_str(&self.value);
        }
        if self.is_plain_name() {
            write!(f, "${}", self.value)
        } else {
            f.write_str(&self.braced())
        }
    }
}

/// A name that failed identifier validation. Kept in the tree so parsing
/// can continue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidIdentifier {
    pub token: Token,
    pub value: String,
}

impl fmt::Display for InvalidIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumberLiteral {
    pub token: Token,
    pub value: i64,
}

impl fmt::Display for NumberLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A quoted string without embeddings. `value` is the body, verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StringLiteral {
    pub token: Token,
    pub value: String,
}

impl fmt::Display for StringLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BooleanLiteral {
    pub token: Token,
    pub value: bool,
}

impl fmt::Display for BooleanLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.value { "true" } else { "false" })
    }
}

/// Dotted-quad address such as `10.0.0.1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IpAddressLiteral {
    pub token: Token,
    pub value: String,
}

impl fmt::Display for IpAddressLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// `-x` or `!x`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrefixExpression {
    pub token: Token,
    pub operator: String,
    pub right: Box<Expression>,
}

impl fmt::Display for PrefixExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `-5` would re-lex as a negative number literal.
        if self.operator == "-" && matches!(*self.right, Expression::Number(_)) {
            write!(f, "- {}", self.right)
        } else {
            write!(f, "{}{}", self.operator, self.right)
        }
    }
}

/// `left <op> right`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InfixExpression {
    pub token: Token,
    pub left: Box<Expression>,
    pub operator: String,
    pub right: Box<Expression>,
}

impl fmt::Display for InfixExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator, self.right)
    }
}

/// `( inner )`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParenthesizedExpression {
    pub token: Token,
    pub inner: Box<Expression>,
}

impl fmt::Display for ParenthesizedExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.inner)
    }
}

/// A bracketed command used where a name is expected: `set [name] value`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BracketExpression {
    pub token: Token,
    pub inner: Box<Expression>,
}

impl fmt::Display for BracketExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

/// Array element access: `$arr(key)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexExpression {
    pub token: Token,
    pub left: Box<Expression>,
    pub index: Box<Expression>,
}

impl fmt::Display for IndexExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.left, self.index)
    }
}

/// Math function call inside an expression: `abs($x)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallExpression {
    pub token: Token,
    pub function: Box<Expression>,
    pub arguments: Vec<Expression>,
}

impl fmt::Display for CallExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.function)?;
        write_joined(f, &self.arguments, ", ")?;
        f.write_str(")")
    }
}

/// A generic command: `name arg...`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandInvocation {
    pub token: Token,
    pub name: Box<Expression>,
    pub args: Vec<Expression>,
}

impl CommandInvocation {
    /// Command name text, for valid and invalid names alike.
    pub fn name_text(&self) -> &str {
        self.name.word_text().unwrap_or(&self.token.literal)
    }
}

impl fmt::Display for CommandInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.name, f)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Bracketed command substitution: `[cmd args...]`.
///
/// Each element is one command; more than one only with `;` separators.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayLiteral {
    pub token: Token,
    pub elements: Vec<Expression>,
}

impl fmt::Display for ArrayLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        write_joined(f, &self.elements, "; ")?;
        f.write_str("]")
    }
}

/// Brace-delimited list of words: `{a b c}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListLiteral {
    pub token: Token,
    pub elements: Vec<Expression>,
}

impl fmt::Display for ListLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        write_joined(f, &self.elements, " ")?;
        f.write_str("}")
    }
}

/// `{key: value, ...}`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashLiteral {
    pub token: Token,
    pub pairs: Vec<(Expression, Expression)>,
}

impl fmt::Display for HashLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        f.write_str("}")
    }
}

/// Mapping argument of `string map`: `{from to from to ...}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapLiteral {
    pub token: Token,
    pub pairs: Vec<(Expression, Expression)>,
}

impl fmt::Display for MapLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (from, to)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{from} {to}")?;
        }
        f.write_str("}")
    }
}

/// Event handler: `when EVENT [priority N] { ... }`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WhenExpression {
    pub token: Token,
    pub event: Box<Expression>,
    pub priority: Option<i64>,
    pub body: BlockStatement,
}

impl fmt::Display for WhenExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "when {}", self.event)?;
        if let Some(priority) = self.priority {
            write!(f, " priority {priority}")?;
        }
        write!(f, " {}", self.body)
    }
}

/// `HTTP::*`, `SSL::*`, `LB::*` and `IP::*` commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamespacedCommand {
    pub token: Token,
    pub family: CommandFamily,
    /// Full command name, e.g. `HTTP::header`.
    pub command: String,
    pub args: Vec<Expression>,
}

impl NamespacedCommand {
    /// Name without the family prefix: `header` for `HTTP::header`.
    pub fn short_name(&self) -> &str {
        self.command
            .strip_prefix(self.family.prefix())
            .unwrap_or(&self.command)
    }
}

impl fmt::Display for NamespacedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// `string <op> <args...>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StringOperation {
    pub token: Token,
    pub operation: String,
    pub args: Vec<Expression>,
}

impl fmt::Display for StringOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "string {}", self.operation)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// `class <subcommand> [options] [--] <args...>`
///
/// For `class match` the arguments are `item operator class`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassCommand {
    pub token: Token,
    pub subcommand: String,
    pub options: Vec<String>,
    pub args: Vec<Expression>,
}

impl fmt::Display for ClassCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class {}", self.subcommand)?;
        for option in &self.options {
            write!(f, " {option}")?;
        }
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// `regsub [flags] <pattern> <input> <replacement> <result-var>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegsubExpression {
    pub token: Token,
    /// Flag words including the leading `-`.
    pub flags: Vec<String>,
    pub pattern: Box<Expression>,
    pub input: Box<Expression>,
    pub replacement: Box<Expression>,
    pub result_var: Box<Expression>,
}

impl fmt::Display for RegsubExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("regsub")?;
        for flag in &self.flags {
            write!(f, " {flag}")?;
        }
        write!(
            f,
            " {} {} {} {}",
            self.pattern, self.input, self.replacement, self.result_var
        )
    }
}

/// A `[...]` embedded in a quoted string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandSubstitution {
    pub token: Token,
    pub commands: Vec<Expression>,
}

impl fmt::Display for CommandSubstitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        write_joined(f, &self.commands, "; ")?;
        f.write_str("]")
    }
}

/// A string with `$name`, `${name}` or `[cmd]` embeddings.
///
/// `parts` alternate between literal text (`StringLiteral`) and embedded
/// variables or command substitutions. `raw` keeps the original body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterpolatedString {
    pub token: Token,
    pub raw: String,
    pub parts: Vec<Expression>,
}

impl fmt::Display for InterpolatedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        for part in &self.parts {
            match part {
                Expression::String(text) => f.write_str(&text.value)?,
                Expression::Identifier(ident) if ident.is_variable => {
                    f.write_str(&ident.braced())?;
                }
                Expression::Identifier(word) => f.write_str(&word.value)?,
                other => write!(f, "{other}")?,
            }
        }
        f.write_str("\"")
    }
}

/// Glob switch pattern, stored verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlobPattern {
    pub token: Token,
    pub pattern: String,
}

impl fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.pattern)
    }
}

/// Regular-expression pattern, stored verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegexPattern {
    pub token: Token,
    pub pattern: String,
}

impl fmt::Display for RegexPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.pattern)
    }
}

/// Switch patterns sharing one body: `"a" - "b" { ... }`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiPattern {
    pub token: Token,
    pub patterns: Vec<Expression>,
}

impl fmt::Display for MultiPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.patterns, " - ")
    }
}

/// Load-balancing target kinds, mutually exclusive within one scope.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Pool,
    Node,
}

impl TargetKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            TargetKind::Pool => "pool",
            TargetKind::Node => "node",
        }
    }
}

/// `pool <name> [member <addr> [port]]` or `node <addr> [port]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeStatement {
    pub token: Token,
    pub kind: TargetKind,
    pub args: Vec<Expression>,
}

impl fmt::Display for NodeStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.keyword())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

impl_node!(
    Identifier,
    InvalidIdentifier,
    NumberLiteral,
    StringLiteral,
    BooleanLiteral,
    IpAddressLiteral,
    PrefixExpression,
    InfixExpression,
    ParenthesizedExpression,
    BracketExpression,
    IndexExpression,
    CallExpression,
    CommandInvocation,
    ArrayLiteral,
    ListLiteral,
    HashLiteral,
    MapLiteral,
    WhenExpression,
    NamespacedCommand,
    StringOperation,
    ClassCommand,
    RegsubExpression,
    CommandSubstitution,
    InterpolatedString,
    GlobPattern,
    RegexPattern,
    MultiPattern,
    NodeStatement,
);
