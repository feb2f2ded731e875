pub mod scope;
pub mod value;

use std::cell::RefCell;
use std::rc::Rc;

use crate::ast::*;
use crate::error::{CompileError, LangError};
use crate::grammar::Grammar;
use crate::interpreter::scope::Scope;
use crate::interpreter::value::Value;
use crate::parser::Parser;
use crate::scanner;
use crate::scanner::token::Token;

/// Tree-walking evaluator. Every word and operation binds its variable in
/// the root scope; the program's value is the value of the last statement.
pub struct Interpreter {
    scope: Rc<RefCell<Scope>>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_scope(Rc::new(RefCell::new(Scope::new())))
    }

    /// Evaluate into an existing scope, e.g. one seeded with bindings.
    pub fn with_scope(scope: Rc<RefCell<Scope>>) -> Self {
        Self { scope }
    }

    pub fn scope(&self) -> &Rc<RefCell<Scope>> {
        &self.scope
    }

    pub fn interpret(&mut self, program: &Program) -> Result<Value, CompileError> {
        let mut result = Value::Null;
        for stmt in &program.body {
            result = self.execute_stmt(stmt)?;
        }
        Ok(result)
    }

    fn execute_stmt(&mut self, stmt: &Stmt) -> Result<Value, CompileError> {
        match stmt {
            Stmt::Chains(chains) => {
                let mut result = Value::Null;
                for chain in &chains.body {
                    for word in &chain.body {
                        result = self.bind(&word.identifier, &word.rhs)?;
                    }
                }
                Ok(result)
            }
            Stmt::Sets(sets) => {
                let mut result = Value::Null;
                for set in &sets.body {
                    if let Some(last) = set.body.last() {
                        result = Value::Number(last.value);
                    }
                }
                Ok(result)
            }
            Stmt::Operation(op) => self.bind(&op.identifier, &op.rhs),
        }
    }

    fn bind(&mut self, identifier: &Token, rhs: &Expr) -> Result<Value, CompileError> {
        let value = self.evaluate_expr(rhs)?;
        self.scope.borrow_mut().declare(identifier, value)
    }

    fn evaluate_expr(&self, expr: &Expr) -> Result<Value, CompileError> {
        match expr {
            Expr::Integer(lit) => Ok(Value::Number(lit.value as f64)),
            Expr::Float(lit) => Ok(Value::Number(lit.value)),
            Expr::Identifier(id) => self.scope.borrow().lookup(&id.symbol),
            Expr::Unary(u) => {
                let operand = self.evaluate_expr(&u.operand)?;
                match u.operator {
                    UnaryOp::Negate => Ok(Value::Number(-operand.to_number(&u.token)?)),
                    UnaryOp::Not => Ok(Value::Boolean(!operand.to_boolean(&u.token)?)),
                }
            }
            Expr::Binary(b) => self.evaluate_binary(b),
            Expr::Function(f) => {
                let argument = self.evaluate_expr(&f.argument)?;
                Ok(Value::Number(f.function.apply(argument.to_number(&f.token)?)))
            }
        }
    }

    fn evaluate_binary(&self, b: &BinaryExpr) -> Result<Value, CompileError> {
        let lhs = self.evaluate_expr(&b.lhs)?;
        let rhs = self.evaluate_expr(&b.rhs)?;

        let result = match b.operator {
            BinaryOp::And => logic(lhs.to_boolean(&b.token)? && rhs.to_boolean(&b.token)?),
            BinaryOp::Or => logic(lhs.to_boolean(&b.token)? || rhs.to_boolean(&b.token)?),
            BinaryOp::Add => lhs.to_number(&b.token)? + rhs.to_number(&b.token)?,
            BinaryOp::Subtract => lhs.to_number(&b.token)? - rhs.to_number(&b.token)?,
            BinaryOp::Multiply => lhs.to_number(&b.token)? * rhs.to_number(&b.token)?,
            BinaryOp::Divide => {
                let divisor = rhs.to_number(&b.token)?;
                if divisor == 0.0 {
                    return Err(CompileError::new("division by zero", &b.token));
                }
                lhs.to_number(&b.token)? / divisor
            }
        };
        Ok(Value::Number(result))
    }
}

/// Logic results are re-encoded as numbers.
fn logic(result: bool) -> f64 {
    if result { 1.0 } else { 0.0 }
}

/// Evaluate a parsed program in `scope`.
pub fn evaluate(program: &Program, scope: Rc<RefCell<Scope>>) -> Result<Value, CompileError> {
    Interpreter::with_scope(scope).interpret(program)
}

/// Scan, parse and evaluate `source` in a fresh scope.
pub fn run(source: &str, grammar: Grammar) -> Result<Value, LangError> {
    let tokens = scanner::tokenize(source, grammar)?;
    let program = Parser::new(tokens, grammar).parse()?;
    Ok(Interpreter::new().interpret(&program)?)
}
