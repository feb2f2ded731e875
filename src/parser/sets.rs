use super::Parser;
use crate::ast::*;
use crate::error::CompileError;
use crate::scanner::token::TokenKind;

impl Parser {
    /// `program := sets operation { NL operation }`
    pub(super) fn sets_program(&mut self) -> Result<Vec<Stmt>, CompileError> {
        let mut body = vec![Stmt::Sets(self.sets()?)];

        self.skip_newlines();
        if !self.check(TokenKind::Identifier) {
            return Err(CompileError::new(
                "a program must contain at least one operation",
                self.peek(0),
            ));
        }
        while self.check_statement(&[TokenKind::Identifier]) {
            self.expect_new_statement("each operation must start on a new line")?;
            body.push(Stmt::Operation(self.operation()?));
            if self.check_any(&[TokenKind::Integer, TokenKind::Function]) {
                return Err(CompileError::new(
                    format!("an operation is required before '{}'", self.peek(0).lexeme),
                    self.peek(0),
                ));
            }
        }
        Ok(body)
    }

    fn sets(&mut self) -> Result<Sets, CompileError> {
        self.skip_newlines();
        if !self.check_any(&[TokenKind::Execute, TokenKind::Save]) {
            return Err(CompileError::new(
                "a program must begin with at least one set",
                self.peek(0),
            ));
        }
        let mut body = Vec::new();
        while self.check_statement(&[TokenKind::Execute, TokenKind::Save]) {
            self.expect_new_statement("each set must start on a new line")?;
            body.push(self.set()?);
        }
        Ok(Sets { body })
    }

    /// `set := action ':' float { '.' float } ordinal`
    fn set(&mut self) -> Result<SetSingle, CompileError> {
        let action = self.expect(
            "a set must begin with 'Выполнить' or 'Сохранить'",
            &[TokenKind::Execute, TokenKind::Save],
        )?;
        self.expect("the action must be followed by ':'", &[TokenKind::Colon])?;

        let mut body = vec![self.float()?];
        while self.check(TokenKind::Dot) {
            self.consume();
            body.push(self.float()?);
        }

        let ordinal = self.expect(
            "a set must end with 'Первое' or 'Второе'",
            &[TokenKind::First, TokenKind::Second],
        )?;
        if !ordinal.preceded_by_space {
            return Err(CompileError::new(
                format!(
                    "'{}' must be separated from the numbers by a space",
                    ordinal.lexeme
                ),
                &ordinal,
            ));
        }
        Ok(SetSingle {
            action,
            body,
            ordinal,
        })
    }

    fn float(&mut self) -> Result<FloatLiteral, CompileError> {
        let token = self.expect("a set element must be a number", &[TokenKind::Integer])?;
        let value: f64 = token.lexeme.parse().map_err(|_| {
            CompileError::new(format!("invalid number '{}'", token.lexeme), &token)
        })?;
        Ok(FloatLiteral { value, token })
    }

    /// `operation := identifier '=' expression`
    fn operation(&mut self) -> Result<Operation, CompileError> {
        let identifier = self.expect(
            "an operation must begin with a variable",
            &[TokenKind::Identifier],
        )?;
        self.expect("a variable must be followed by '='", &[TokenKind::Equals])?;
        let rhs = self.expression()?;
        Ok(Operation { identifier, rhs })
    }
}
