use std::str::FromStr;

use super::Parser;
use crate::ast::*;
use crate::error::CompileError;
use crate::scanner::token::{Token, TokenKind};

/// Innermost `[` groups allowed inside one another.
const MAX_BRACKET_DEPTH: usize = 2;
const MAX_PAREN_DEPTH: usize = 64;

impl Parser {
    /// `expression := ['-'] multiplication { additive multiplication }`
    pub(super) fn expression(&mut self) -> Result<Expr, CompileError> {
        let mut expr = self.leading_negation()?;
        while self.check(TokenKind::AdditiveOperator) {
            let token = self.consume();
            let rhs = self.multiplication()?;
            expr = binary(expr, &token, rhs)?;
        }
        Ok(expr)
    }

    /// Only the first operand of a sum may carry a unary minus.
    fn leading_negation(&mut self) -> Result<Expr, CompileError> {
        if self.check(TokenKind::AdditiveOperator) && self.peek(0).lexeme == "-" {
            let token = self.consume();
            let operand = self.multiplication()?;
            return Ok(Expr::Unary(UnaryExpr {
                operator: UnaryOp::Negate,
                operand: Box::new(operand),
                token,
            }));
        }
        self.multiplication()
    }

    fn multiplication(&mut self) -> Result<Expr, CompileError> {
        let mut expr = self.logic()?;
        while self.check(TokenKind::MultiplicativeOperator) {
            let token = self.consume();
            let rhs = self.logic()?;
            expr = binary(expr, &token, rhs)?;
        }
        Ok(expr)
    }

    fn logic(&mut self) -> Result<Expr, CompileError> {
        let mut expr = self.negation()?;
        while self.check(TokenKind::LogicOperator)
            && BinaryOp::from_lexeme(&self.peek(0).lexeme).is_some()
        {
            let token = self.consume();
            let rhs = self.negation()?;
            expr = binary(expr, &token, rhs)?;
        }
        Ok(expr)
    }

    fn negation(&mut self) -> Result<Expr, CompileError> {
        if self.check(TokenKind::LogicOperator)
            && UnaryOp::from_lexeme(&self.peek(0).lexeme) == Some(UnaryOp::Not)
        {
            let token = self.consume();
            let operand = self.function()?;
            return Ok(Expr::Unary(UnaryExpr {
                operator: UnaryOp::Not,
                operand: Box::new(operand),
                token,
            }));
        }
        self.function()
    }

    /// Functions nest to the right: `Синус Косинус 0` is `sin(cos(0))`.
    fn function(&mut self) -> Result<Expr, CompileError> {
        let mut pending = Vec::new();
        while self.check(TokenKind::Function) {
            pending.push(self.consume());
        }
        let mut expr = self.primary()?;
        while let Some(token) = pending.pop() {
            let function = Func::from_str(&token.lexeme).map_err(|_| {
                CompileError::new(format!("unknown function '{}'", token.lexeme), &token)
            })?;
            expr = Expr::Function(FunctionExpr {
                function,
                argument: Box::new(expr),
                token,
            });
        }
        Ok(expr)
    }

    fn primary(&mut self) -> Result<Expr, CompileError> {
        let next = self.peek(0);
        match next.kind {
            TokenKind::AdditiveOperator
            | TokenKind::MultiplicativeOperator
            | TokenKind::LogicOperator => {
                return Err(CompileError::new(
                    "two operators cannot follow each other",
                    next,
                ));
            }
            TokenKind::CloseParen | TokenKind::CloseBracket => {
                let message = if self.paren_depth + self.bracket_depth == 0 {
                    "a closing bracket must be preceded by an opening one"
                } else {
                    "brackets must contain an expression"
                };
                return Err(CompileError::new(message, next));
            }
            _ => {}
        }

        let after = self
            .last_consumed()
            .map(|t| t.lexeme.clone())
            .unwrap_or_default();
        let token = if self.grammar.allows_grouping() {
            self.expect(
                &format!("'{after}' must be followed by a variable, an integer or an opening bracket"),
                &[
                    TokenKind::Identifier,
                    TokenKind::Integer,
                    TokenKind::OpenParen,
                    TokenKind::OpenBracket,
                ],
            )?
        } else {
            self.expect(
                &format!("'{after}' must be followed by a variable or an integer"),
                &[TokenKind::Identifier, TokenKind::Integer],
            )?
        };

        match token.kind {
            TokenKind::Identifier => Ok(Expr::Identifier(IdentifierExpr { symbol: token })),
            TokenKind::Integer => integer(token),
            _ => self.group(token),
        }
    }

    /// A bracketed sub-expression; `token` is the opening bracket.
    fn group(&mut self, token: Token) -> Result<Expr, CompileError> {
        let close = if token.is(TokenKind::OpenBracket) {
            self.bracket_depth += 1;
            if self.bracket_depth > MAX_BRACKET_DEPTH {
                return Err(CompileError::new(
                    format!("square brackets may be nested at most {MAX_BRACKET_DEPTH} deep"),
                    &token,
                ));
            }
            TokenKind::CloseBracket
        } else {
            self.paren_depth += 1;
            if self.paren_depth > MAX_PAREN_DEPTH {
                return Err(CompileError::new(
                    format!("parentheses may be nested at most {MAX_PAREN_DEPTH} deep"),
                    &token,
                ));
            }
            TokenKind::CloseParen
        };

        let expr = self.expression()?;
        self.expect("missing closing bracket", &[close])?;

        if close == TokenKind::CloseBracket {
            self.bracket_depth -= 1;
        } else {
            self.paren_depth -= 1;
        }

        if self.check_any(&[TokenKind::OpenParen, TokenKind::OpenBracket]) {
            return Err(CompileError::new(
                "there must be an operation between brackets",
                self.peek(0),
            ));
        }
        Ok(expr)
    }
}

fn binary(lhs: Expr, token: &Token, rhs: Expr) -> Result<Expr, CompileError> {
    let operator = BinaryOp::from_lexeme(&token.lexeme)
        .ok_or_else(|| CompileError::new(format!("unknown operator '{}'", token.lexeme), token))?;
    Ok(Expr::Binary(BinaryExpr {
        lhs: Box::new(lhs),
        operator,
        rhs: Box::new(rhs),
        token: token.clone(),
    }))
}

fn integer(token: Token) -> Result<Expr, CompileError> {
    let value: i64 = token.lexeme.parse().map_err(|_| {
        CompileError::new(
            format!("integer literal '{}' is too large", token.lexeme),
            &token,
        )
    })?;
    Ok(Expr::Integer(IntegerLiteral { value, token }))
}
