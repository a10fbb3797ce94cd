//! Statement nodes.

use std::fmt;

use bitflags::bitflags;

use super::{impl_node, write_lines, Expression, Node};
use crate::Token;

/// A statement: one Tcl command or control structure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Statement {
    Set(SetStatement),
    Return(ReturnStatement),
    Expression(ExpressionStatement),
    Block(BlockStatement),
    If(IfStatement),
    Switch(SwitchStatement),
    ForEach(ForEachStatement),
    LtmRule(LtmRule),
}

impl Statement {
    /// Variant name, used in debug dumps and test failures.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Statement::Set(_) => "SetStatement",
            Statement::Return(_) => "ReturnStatement",
            Statement::Expression(_) => "ExpressionStatement",
            Statement::Block(_) => "BlockStatement",
            Statement::If(_) => "IfStatement",
            Statement::Switch(_) => "SwitchStatement",
            Statement::ForEach(_) => "ForEachStatement",
            Statement::LtmRule(_) => "LtmRule",
        }
    }

    /// The wrapped expression of an expression statement.
    pub fn as_expression(&self) -> Option<&Expression> {
        match self {
            Statement::Expression(stmt) => Some(&stmt.expression),
            _ => None,
        }
    }
}

impl Node for Statement {
    fn token(&self) -> &Token {
        match self {
            Statement::Set(s) => &s.token,
            Statement::Return(s) => &s.token,
            Statement::Expression(s) => &s.token,
            Statement::Block(s) => &s.token,
            Statement::If(s) => &s.token,
            Statement::Switch(s) => &s.token,
            Statement::ForEach(s) => &s.token,
            Statement::LtmRule(s) => &s.token,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Set(s) => fmt::Display::fmt(s, f),
            Statement::Return(s) => fmt::Display::fmt(s, f),
            Statement::Expression(s) => fmt::Display::fmt(s, f),
            Statement::Block(s) => fmt::Display::fmt(s, f),
            Statement::If(s) => fmt::Display::fmt(s, f),
            Statement::Switch(s) => fmt::Display::fmt(s, f),
            Statement::ForEach(s) => fmt::Display::fmt(s, f),
            Statement::LtmRule(s) => fmt::Display::fmt(s, f),
        }
    }
}

/// `set <name> <value>`
///
/// `name` is an `Identifier`, an `InvalidIdentifier` or a
/// `BracketExpression` computing the name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetStatement {
    pub token: Token,
    pub name: Expression,
    pub value: Expression,
}

impl fmt::Display for SetStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "set {} {}", self.name, self.value)
    }
}

/// `return [<value>]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReturnStatement {
    pub token: Token,
    pub value: Option<Expression>,
}

impl fmt::Display for ReturnStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "return {value}"),
            None => f.write_str("return"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpressionStatement {
    pub token: Token,
    pub expression: Expression,
}

impl fmt::Display for ExpressionStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.expression, f)
    }
}

/// `{ <statements> }`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockStatement {
    pub token: Token,
    pub statements: Vec<Statement>,
}

impl BlockStatement {
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.statements.is_empty() {
            return f.write_str("{ }");
        }
        f.write_str("{\n")?;
        write_lines(f, &self.statements)?;
        f.write_str("\n}")
    }
}

/// `if {<cond>} {<then>} [elseif ...]* [else {<alt>}]`
///
/// An `elseif` chain is a nested `IfStatement` in `alternative`; a final
/// `else` is a `BlockStatement`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IfStatement {
    pub token: Token,
    pub condition: Expression,
    pub consequence: BlockStatement,
    pub alternative: Option<Box<Statement>>,
}

impl fmt::Display for IfStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "if {{{}}} {}", self.condition, self.consequence)?;
        match self.alternative.as_deref() {
            Some(Statement::If(nested)) => write!(f, " else{nested}"),
            Some(other) => write!(f, " else {other}"),
            None => Ok(()),
        }
    }
}

bitflags! {
    /// Matching options of a `switch`.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct SwitchFlags: u8 {
        const EXACT = 1 << 0;
        const GLOB = 1 << 1;
        const REGEX = 1 << 2;
        const NOCASE = 1 << 3;
    }
}

impl SwitchFlags {
    /// Option word for a single flag.
    pub fn from_option(option: &str) -> Option<SwitchFlags> {
        match option {
            "-exact" => Some(SwitchFlags::EXACT),
            "-glob" => Some(SwitchFlags::GLOB),
            "-regexp" | "-regex" => Some(SwitchFlags::REGEX),
            "-nocase" => Some(SwitchFlags::NOCASE),
            _ => None,
        }
    }
}

/// `switch [options] [--] <value> { <cases> }`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwitchStatement {
    pub token: Token,
    pub flags: SwitchFlags,
    pub value: Expression,
    pub cases: Vec<CaseStatement>,
}

impl SwitchStatement {
    #[inline]
    pub fn is_regex(&self) -> bool {
        self.flags.contains(SwitchFlags::REGEX)
    }

    #[inline]
    pub fn is_glob(&self) -> bool {
        self.flags.contains(SwitchFlags::GLOB)
    }

    #[inline]
    pub fn is_nocase(&self) -> bool {
        self.flags.contains(SwitchFlags::NOCASE)
    }

    /// The `default` arm, if any.
    pub fn default_case(&self) -> Option<&CaseStatement> {
        self.cases.iter().find(|case| case.is_default())
    }
}

impl fmt::Display for SwitchStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("switch")?;
        for (flag, word) in [
            (SwitchFlags::EXACT, "-exact"),
            (SwitchFlags::GLOB, "-glob"),
            (SwitchFlags::REGEX, "-regex"),
            (SwitchFlags::NOCASE, "-nocase"),
        ] {
            if self.flags.contains(flag) {
                write!(f, " {word}")?;
            }
        }
        write!(f, " {} {{", self.value)?;
        for case in &self.cases {
            write!(f, "\n{case}")?;
        }
        f.write_str("\n}")
    }
}

/// One arm of a `switch`. `pattern` is `None` for `default`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseStatement {
    pub token: Token,
    pub pattern: Option<Expression>,
    pub body: BlockStatement,
}

impl CaseStatement {
    #[inline]
    pub fn is_default(&self) -> bool {
        self.pattern.is_none()
    }
}

impl fmt::Display for CaseStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pattern {
            Some(pattern) => write!(f, "{pattern} {}", self.body),
            None => write!(f, "default {}", self.body),
        }
    }
}

/// `foreach <var> <list> { <body> }`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForEachStatement {
    pub token: Token,
    pub variable: Expression,
    pub list: Expression,
    pub body: BlockStatement,
}

impl fmt::Display for ForEachStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "foreach {} {} {}", self.variable, self.list, self.body)
    }
}

/// `ltm rule <name> { <body> }`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LtmRule {
    pub token: Token,
    pub name: Expression,
    pub body: BlockStatement,
}

impl fmt::Display for LtmRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ltm rule {} {}", self.name, self.body)
    }
}

impl_node!(
    SetStatement,
    ReturnStatement,
    ExpressionStatement,
    BlockStatement,
    IfStatement,
    SwitchStatement,
    CaseStatement,
    ForEachStatement,
    LtmRule,
);

