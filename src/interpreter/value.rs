use std::fmt;

use crate::error::CompileError;
use crate::scanner::token::Token;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Boolean(bool),
    Null,
}

impl Value {
    /// `true` is 1 and `false` is 0. `token` is where a failed coercion is reported.
    pub fn to_number(self, token: &Token) -> Result<f64, CompileError> {
        match self {
            Self::Number(n) => Ok(n),
            Self::Boolean(b) => Ok(if b { 1.0 } else { 0.0 }),
            Self::Null => Err(cannot_coerce(token)),
        }
    }

    /// Any non-zero number is `true`.
    pub fn to_boolean(self, token: &Token) -> Result<bool, CompileError> {
        match self {
            Self::Boolean(b) => Ok(b),
            Self::Number(n) => Ok(n != 0.0),
            Self::Null => Err(cannot_coerce(token)),
        }
    }
}

fn cannot_coerce(token: &Token) -> CompileError {
    CompileError::new("cannot coerce to required type", token)
}

/// 2^53: whole numbers below this convert to `i64` exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => {
                if n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Null => write!(f, "null"),
        }
    }
}
