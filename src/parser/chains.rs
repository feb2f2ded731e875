use super::Parser;
use crate::ast::*;
use crate::error::CompileError;
use crate::scanner::token::TokenKind;

impl Parser {
    /// `chains := chain { ';' chain } [';']`
    pub(super) fn chains(&mut self) -> Result<Chains, CompileError> {
        self.skip_newlines();
        if !self.check(TokenKind::Enter) {
            return Err(CompileError::new(
                "a program must contain at least one chain",
                self.peek(0),
            ));
        }

        let mut body = Vec::new();
        loop {
            body.push(self.chain()?);
            self.skip_newlines();
            if self.check(TokenKind::End) {
                break;
            }
            self.chain_separator()?;
            if self.check_statement(&[TokenKind::End, TokenKind::Eof]) {
                break;
            }
        }
        Ok(Chains { body })
    }

    fn chain_separator(&mut self) -> Result<(), CompileError> {
        let message = match self.peek(0).kind {
            TokenKind::Semicolon => {
                self.consume();
                return Ok(());
            }
            TokenKind::Eof => return Err(self.missing_end()),
            TokenKind::Integer | TokenKind::Identifier => {
                format!("an operation is required before '{}'", self.peek(0).lexeme)
            }
            TokenKind::CloseParen | TokenKind::CloseBracket => {
                "a closing bracket must be preceded by an opening one".to_string()
            }
            TokenKind::OpenParen | TokenKind::OpenBracket => {
                let after_group = self.last_consumed().is_some_and(|t| {
                    matches!(t.kind, TokenKind::CloseParen | TokenKind::CloseBracket)
                });
                if after_group {
                    "there must be an operation between brackets".to_string()
                } else {
                    format!("an operation is required before '{}'", self.peek(0).lexeme)
                }
            }
            _ => "chains must be separated by ';'".to_string(),
        };
        Err(CompileError::new(message, self.peek(0)))
    }

    /// `chain := 'Ввод' word { [':'] word }`
    ///
    /// The `':'` between words is optional when the next word's label
    /// follows directly.
    fn chain(&mut self) -> Result<ChainSingle, CompileError> {
        self.skip_newlines();
        let enter = self.expect("a chain must begin with 'Ввод'", &[TokenKind::Enter])?;
        let mut body = vec![self.word()?];
        loop {
            if self.check_statement(&[TokenKind::Colon]) {
                self.consume();
                body.push(self.word()?);
            } else if self.check(TokenKind::Integer) && self.peek(1).is(TokenKind::Colon) {
                body.push(self.word()?);
            } else {
                break;
            }
        }
        Ok(ChainSingle { enter, body })
    }

    /// `word := integer ':' identifier '=' expression`
    fn word(&mut self) -> Result<Word, CompileError> {
        self.skip_newlines();
        let label = self.expect("a word must begin with a label", &[TokenKind::Integer])?;
        self.expect("a label must be followed by ':'", &[TokenKind::Colon])?;
        let identifier = self.expect(
            "a label must be followed by a variable",
            &[TokenKind::Identifier],
        )?;
        self.expect("a variable must be followed by '='", &[TokenKind::Equals])?;
        let rhs = self.expression()?;
        Ok(Word {
            label,
            identifier,
            rhs,
        })
    }
}
