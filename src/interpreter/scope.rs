use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::CompileError;
use crate::interpreter::value::Value;
use crate::scanner::token::Token;

/// Variable bindings of one scope. A name is bound at most once per scope;
/// inner scopes may shadow their parents.
#[derive(Debug, Default)]
pub struct Scope {
    bindings: HashMap<String, Value>,
    parent: Option<Rc<RefCell<Scope>>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(parent: Rc<RefCell<Scope>>) -> Self {
        Self {
            bindings: HashMap::new(),
            parent: Some(parent),
        }
    }

    pub fn declare(&mut self, identifier: &Token, value: Value) -> Result<Value, CompileError> {
        if self.bindings.contains_key(&identifier.lexeme) {
            return Err(CompileError::new(
                format!("variable '{}' is already declared", identifier.lexeme),
                identifier,
            ));
        }
        self.bindings.insert(identifier.lexeme.clone(), value);
        Ok(value)
    }

    pub fn lookup(&self, identifier: &Token) -> Result<Value, CompileError> {
        self.get(&identifier.lexeme).ok_or_else(|| {
            CompileError::new(
                format!("variable '{}' is not declared", identifier.lexeme),
                identifier,
            )
        })
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.get(name) {
            return Some(*value);
        }
        self.parent.as_ref().and_then(|p| p.borrow().get(name))
    }
}
