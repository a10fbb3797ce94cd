//! Tree-walking interpreter over the parsed AST.
//!
//! Statements yield a `Flow`: either the value of the last command or a
//! `return` unwinding to the program. Expressions yield values directly.

use irule_ir::ast::{
    CallExpression, CommandInvocation, ForEachStatement, IfStatement, ListLiteral,
    SetStatement, SwitchStatement,
};
use irule_ir::{Expression, Node, Program, Statement};
use irule_stack::ensure_sufficient_stack;
use tracing::{debug, trace};

use crate::errors::{no_such_variable, overflow, type_mismatch, unsupported};
use crate::operators::glob_match;
use crate::{evaluate_binary, evaluate_unary, Environment, EvalError, EvalResult, Value};

/// Control flow out of a statement.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Flow {
    Next(Value),
    Return(Value),
}

#[derive(Debug, Default)]
pub struct Interpreter {
    env: Environment,
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter::default()
    }

    /// Variables set so far. They persist across `eval_program` calls, so
    /// a REPL session accumulates state.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Evaluate every statement; the result is the last value produced or
    /// the value of the first `return`.
    pub fn eval_program(&mut self, program: &Program) -> EvalResult {
        self.eval_program_at_lines(program).map_err(|(err, _)| err)
    }

    /// Like [`Interpreter::eval_program`], with the line of the failing
    /// top-level statement attached to the error.
    pub fn eval_program_at_lines(&mut self, program: &Program) -> Result<Value, (EvalError, u32)> {
        debug!(statements = program.statements.len(), "evaluating program");
        let mut last = Value::Empty;
        for statement in &program.statements {
            match self.eval_statement(statement) {
                Ok(Flow::Next(value)) => last = value,
                Ok(Flow::Return(value)) => return Ok(value),
                Err(err) => {
                    let line = statement.line();
                    debug!(code = %err.code(), error = %err, line, "evaluation failed");
                    return Err((err, line));
                }
            }
        }
        Ok(last)
    }

    fn eval_statements(&mut self, statements: &[Statement]) -> Result<Flow, EvalError> {
        let mut last = Value::Empty;
        for statement in statements {
            match self.eval_statement(statement)? {
                Flow::Next(value) => last = value,
                flow @ Flow::Return(_) => return Ok(flow),
            }
        }
        Ok(Flow::Next(last))
    }

    fn eval_statement(&mut self, statement: &Statement) -> Result<Flow, EvalError> {
        trace!(kind = statement.kind_name(), line = statement.line(), "statement");
        match statement {
            Statement::Set(set) => self.eval_set(set).map(Flow::Next),
            Statement::Return(ret) => {
                let value = match &ret.value {
                    Some(value) => self.eval_expression(value)?,
                    None => Value::Empty,
                };
                Ok(Flow::Return(value))
            }
            Statement::Expression(stmt) => self.eval_expression(&stmt.expression).map(Flow::Next),
            Statement::Block(block) => self.eval_statements(&block.statements),
            Statement::If(if_stmt) => self.eval_if(if_stmt),
            Statement::Switch(switch) => self.eval_switch(switch),
            Statement::ForEach(foreach) => self.eval_foreach(foreach),
            Statement::LtmRule(_) => Err(unsupported("ltm rule")),
        }
    }

    fn eval_set(&mut self, set: &SetStatement) -> EvalResult {
        let name = self.target_name(&set.name)?;
        let value = self.eval_expression(&set.value)?;
        self.env.define(name, value.clone());
        Ok(value)
    }

    /// Variable name written by `set`, `incr` or `foreach`.
    fn target_name(&mut self, target: &Expression) -> Result<String, EvalError> {
        match target {
            Expression::Identifier(ident) if !ident.is_variable => Ok(ident.value.clone()),
            other => Ok(self.eval_expression(other)?.to_string()),
        }
    }

    fn eval_if(&mut self, if_stmt: &IfStatement) -> Result<Flow, EvalError> {
        if self.eval_expression(&if_stmt.condition)?.is_truthy() {
            self.eval_statements(&if_stmt.consequence.statements)
        } else if let Some(alternative) = &if_stmt.alternative {
            self.eval_statement(alternative)
        } else {
            Ok(Flow::Next(Value::Empty))
        }
    }

    /// `foreach` over a literal list or the words of any other value.
    /// Several loop variables take consecutive words; missing ones are
    /// empty on the last pass.
    fn eval_foreach(&mut self, foreach: &ForEachStatement) -> Result<Flow, EvalError> {
        let names: Vec<String> = match &foreach.variable {
            Expression::List(list) => list_words(list),
            other => vec![self.target_name(other)?],
        };
        let words: Vec<String> = match &foreach.list {
            Expression::List(list) => list_words(list),
            other => self
                .eval_expression(other)?
                .to_string()
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        };
        if names.is_empty() {
            return Ok(Flow::Next(Value::Empty));
        }

        for chunk in words.chunks(names.len()) {
            for (i, name) in names.iter().enumerate() {
                let word = chunk.get(i).cloned().unwrap_or_default();
                self.env.define(name.clone(), Value::from_word(&word));
            }
            if let flow @ Flow::Return(_) = self.eval_statements(&foreach.body.statements)? {
                return Ok(flow);
            }
        }
        Ok(Flow::Next(Value::Empty))
    }

    /// Exact and glob matching; the first matching arm runs, `default`
    /// only when nothing else matched.
    fn eval_switch(&mut self, switch: &SwitchStatement) -> Result<Flow, EvalError> {
        if switch.is_regex() {
            return Err(unsupported("switch -regex"));
        }
        let mut subject = self.eval_expression(&switch.value)?.to_string();
        if switch.is_nocase() {
            subject = subject.to_lowercase();
        }

        for case in &switch.cases {
            let Some(pattern) = &case.pattern else {
                continue;
            };
            if self.case_matches(pattern, &subject, switch)? {
                return self.eval_statements(&case.body.statements);
            }
        }
        match switch.default_case() {
            Some(default) => self.eval_statements(&default.body.statements),
            None => Ok(Flow::Next(Value::Empty)),
        }
    }

    fn case_matches(
        &mut self,
        pattern: &Expression,
        subject: &str,
        switch: &SwitchStatement,
    ) -> Result<bool, EvalError> {
        let text = match pattern {
            Expression::MultiPattern(multi) => {
                for alternative in &multi.patterns {
                    if self.case_matches(alternative, subject, switch)? {
                        return Ok(true);
                    }
                }
                return Ok(false);
            }
            Expression::Glob(glob) => glob.pattern.clone(),
            Expression::Regex(regex) => regex.pattern.clone(),
            other => match other.word_text() {
                Some(word) => word.to_string(),
                None => self.eval_expression(other)?.to_string(),
            },
        };
        let text = if switch.is_nocase() {
            text.to_lowercase()
        } else {
            text
        };
        Ok(if switch.is_glob() {
            glob_match(&text, subject)
        } else {
            text == subject
        })
    }

    /// Evaluate one expression.
    pub fn eval_expression(&mut self, expression: &Expression) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_expression_inner(expression))
    }

    fn eval_expression_inner(&mut self, expression: &Expression) -> EvalResult {
        match expression {
            Expression::Number(n) => Ok(Value::Int(n.value)),
            Expression::Boolean(b) => Ok(Value::Bool(b.value)),
            Expression::String(s) => Ok(Value::str(s.value.as_str())),
            Expression::IpAddress(ip) => Ok(Value::str(ip.value.as_str())),
            Expression::Identifier(ident) if ident.is_variable => self.read(&ident.value),
            Expression::Identifier(ident) => Ok(Value::str(ident.value.as_str())),
            Expression::InvalidIdentifier(ident) => Ok(Value::str(ident.value.as_str())),
            Expression::Prefix(prefix) => {
                let operand = self.eval_expression(&prefix.right)?;
                evaluate_unary(&prefix.operator, &operand)
            }
            Expression::Infix(infix) => {
                let left = self.eval_expression(&infix.left)?;
                // Short-circuit: the right side of a decided `&&`/`||` never runs.
                match (infix.operator.as_str(), left.is_logical()) {
                    ("&&", true) if !left.is_truthy() => return Ok(Value::Bool(false)),
                    ("||", true) if left.is_truthy() => return Ok(Value::Bool(true)),
                    _ => {}
                }
                let right = self.eval_expression(&infix.right)?;
                evaluate_binary(&left, &infix.operator, &right)
            }
            Expression::Parenthesized(paren) => self.eval_expression(&paren.inner),
            Expression::Bracket(bracket) => self.eval_expression(&bracket.inner),
            Expression::Array(array) => self.eval_sequence(&array.elements),
            Expression::CommandSubstitution(sub) => self.eval_sequence(&sub.commands),
            Expression::Index(index) => {
                let base = match index.left.as_ref() {
                    Expression::Identifier(ident) => ident.value.clone(),
                    other => self.eval_expression(other)?.to_string(),
                };
                let key = self.eval_expression(&index.index)?;
                self.read(&format!("{base}({key})"))
            }
            Expression::List(list) => Ok(Value::Str(list_words(list).join(" "))),
            Expression::Interpolated(string) => {
                let mut text = String::with_capacity(string.raw.len());
                for part in &string.parts {
                    text.push_str(&self.eval_expression(part)?.to_string());
                }
                Ok(Value::Str(text))
            }
            Expression::Call(call) => self.eval_call(call),
            Expression::Command(command) => self.eval_command(command),
            Expression::When(_) => Err(unsupported("when")),
            Expression::Http(command)
            | Expression::Ssl(command)
            | Expression::LoadBalancer(command)
            | Expression::Ip(command) => Err(unsupported(command.command.as_str())),
            Expression::StringOp(op) => Err(unsupported(format!("string {}", op.operation))),
            Expression::Class(class) => Err(unsupported(format!("class {}", class.subcommand))),
            Expression::Regsub(_) => Err(unsupported("regsub")),
            Expression::NodeStatement(node) => Err(unsupported(node.kind.keyword())),
            Expression::Hash(_)
            | Expression::Map(_)
            | Expression::Glob(_)
            | Expression::Regex(_)
            | Expression::MultiPattern(_) => Err(unsupported(expression.kind_name())),
        }
    }

    fn read(&self, name: &str) -> EvalResult {
        self.env
            .lookup(name)
            .cloned()
            .ok_or_else(|| no_such_variable(name))
    }

    /// Commands in order; the value is the last one's.
    fn eval_sequence(&mut self, commands: &[Expression]) -> EvalResult {
        let mut last = Value::Empty;
        for command in commands {
            last = self.eval_expression(command)?;
        }
        Ok(last)
    }

    /// `abs`, `min` and `max` math functions.
    fn eval_call(&mut self, call: &CallExpression) -> EvalResult {
        let name = call
            .function
            .word_text()
            .map_or_else(|| call.function.to_string(), str::to_string);
        let mut args = Vec::with_capacity(call.arguments.len());
        for argument in &call.arguments {
            let value = self.eval_expression(argument)?;
            let Some(n) = value.as_int() else {
                return Err(type_mismatch(&value, &name, &Value::Int(0)));
            };
            args.push(n);
        }

        match (name.as_str(), args.as_slice()) {
            ("abs", [n]) => n.checked_abs().map(Value::Int).ok_or_else(|| overflow("abs")),
            ("abs", _) => Err(EvalError::WrongArgs("abs(x)")),
            ("min", [first, rest @ ..]) => {
                Ok(Value::Int(rest.iter().fold(*first, |m, &n| m.min(n))))
            }
            ("max", [first, rest @ ..]) => {
                Ok(Value::Int(rest.iter().fold(*first, |m, &n| m.max(n))))
            }
            ("min", []) => Err(EvalError::WrongArgs("min(x, ...)")),
            ("max", []) => Err(EvalError::WrongArgs("max(x, ...)")),
            _ => Err(EvalError::InvalidCommand(name)),
        }
    }

    /// `set` in brackets and `incr`; every other command needs a runtime.
    fn eval_command(&mut self, command: &CommandInvocation) -> EvalResult {
        match (command.name_text(), command.args.as_slice()) {
            ("set", [name, value]) => {
                let name = self.target_name(name)?;
                let value = self.eval_expression(value)?;
                self.env.define(name, value.clone());
                Ok(value)
            }
            ("set", [name]) => {
                let name = self.target_name(name)?;
                self.read(&name)
            }
            ("incr", [name, amount @ ..]) if amount.len() <= 1 => {
                let name = self.target_name(name)?;
                let step = match amount.first() {
                    Some(amount) => self.eval_expression(amount)?,
                    None => Value::Int(1),
                };
                // An unset variable counts from zero.
                let current = self.env.lookup(&name).cloned().unwrap_or(Value::Int(0));
                let (Some(a), Some(b)) = (current.as_int(), step.as_int()) else {
                    return Err(type_mismatch(&current, "+", &step));
                };
                let next = a.checked_add(b).map(Value::Int).ok_or_else(|| overflow("incr"))?;
                self.env.define(name, next.clone());
                Ok(next)
            }
            (name, _) => Err(unsupported(name)),
        }
    }
}

/// Words of a brace list, taken literally.
fn list_words(list: &ListLiteral) -> Vec<String> {
    list.elements
        .iter()
        .map(|element| {
            element
                .word_text()
                .map_or_else(|| element.to_string(), str::to_string)
        })
        .collect()
}

#[cfg(test)]
mod tests;
