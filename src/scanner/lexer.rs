use winnow::error::ContextError;
use winnow::prelude::*;
use winnow::stream::{LocatingSlice, Location};
use winnow::token::{any, take_while};

use crate::error::SyntaxError;
use crate::grammar::Grammar;
use crate::scanner::classifier::Classifier;
use crate::scanner::token::{Span, Token, TokenKind};

type Input<'a> = LocatingSlice<&'a str>;

/// Cursor over the source. `offset` counts characters, the underlying
/// `LocatingSlice` tracks bytes.
struct Lexer<'a> {
    input: Input<'a>,
    classifier: &'static Classifier,
    offset: usize,
    preceded_by_space: bool,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str, grammar: Grammar) -> Self {
        Self {
            input: LocatingSlice::new(source),
            classifier: grammar.classifier(),
            offset: 0,
            preceded_by_space: false,
            tokens: Vec::new(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.chars().next()
    }

    fn byte_offset(&self) -> usize {
        self.input.current_token_start()
    }

    fn run(mut self) -> Result<Vec<Token>, SyntaxError> {
        let classifier = self.classifier;
        while let Some(c) = self.peek() {
            let mut buf = [0u8; 4];
            let symbol: &str = c.encode_utf8(&mut buf);

            if classifier.is_skippable(c) {
                self.advance()?;
                self.preceded_by_space = true;
            } else if c == '\n' {
                self.newline()?;
            } else if let Some(kind) = classifier.single_char_kind(c) {
                self.single(kind)?;
            } else if classifier.is_additive_operator(symbol) {
                self.single(TokenKind::AdditiveOperator)?;
            } else if classifier.is_multiplicative_operator(symbol) {
                self.single(TokenKind::MultiplicativeOperator)?;
            } else if classifier.is_logic_operator(symbol) && !classifier.is_alphanumeric(c) {
                self.single(TokenKind::LogicOperator)?;
            } else if classifier.is_logic_symbol(c) {
                self.logic_operator()?;
            } else if classifier.is_numeric(c) {
                self.integer()?;
            } else if classifier.is_alphanumeric(c) {
                self.word()?;
            } else {
                return Err(self.unknown_symbol());
            }
        }

        let eof = Token::eof(self.offset, self.byte_offset());
        self.tokens.push(eof);
        Ok(self.tokens)
    }

    fn advance(&mut self) -> Result<(char, usize, Span), SyntaxError> {
        let from = self.offset;
        let start = self.byte_offset();
        let c = any::<_, ContextError>
            .parse_next(&mut self.input)
            .map_err(|_| self.unexpected_end())?;
        self.offset += 1;
        Ok((c, from, Span::new(start, c.len_utf8())))
    }

    fn take_run(
        &mut self,
        predicate: impl Fn(char) -> bool,
    ) -> Result<(&'a str, usize, Span), SyntaxError> {
        let from = self.offset;
        let start = self.byte_offset();
        let text: &'a str = take_while::<_, _, ContextError>(1.., predicate)
            .parse_next(&mut self.input)
            .map_err(|_| self.unexpected_end())?;
        self.offset += text.chars().count();
        Ok((text, from, Span::new(start, text.len())))
    }

    fn push(&mut self, kind: TokenKind, lexeme: &str, from: usize, span: Span) {
        self.tokens.push(Token::new(
            kind,
            lexeme,
            from,
            span,
            self.preceded_by_space,
        ));
        self.preceded_by_space = false;
    }

    fn single(&mut self, kind: TokenKind) -> Result<(), SyntaxError> {
        let (c, from, span) = self.advance()?;
        let mut buf = [0u8; 4];
        self.push(kind, c.encode_utf8(&mut buf), from, span);
        Ok(())
    }

    /// Line breaks right after a block-opening keyword, at the start of the
    /// input, or after another line break are plain whitespace.
    fn newline(&mut self) -> Result<(), SyntaxError> {
        let significant = self
            .tokens
            .last()
            .is_some_and(|t| t.kind != TokenKind::NewLine && !t.kind.opens_block());
        if significant {
            self.single(TokenKind::NewLine)
        } else {
            self.advance()?;
            self.preceded_by_space = true;
            Ok(())
        }
    }

    fn logic_operator(&mut self) -> Result<(), SyntaxError> {
        let classifier = self.classifier;
        let (text, from, span) = self.take_run(|c| classifier.is_logic_symbol(c))?;
        match classifier.reserved_keyword(text) {
            Some(kind) => {
                self.push(kind, text, from, span);
                Ok(())
            }
            None => Err(SyntaxError::new(
                format!("unknown logic operator '{text}', allowed operators are '&&' and '||'"),
                from,
                self.offset - 1,
                span,
            )),
        }
    }

    fn integer(&mut self) -> Result<(), SyntaxError> {
        let classifier = self.classifier;
        let (text, from, span) = self.take_run(|c| classifier.is_numeric(c))?;
        self.push(TokenKind::Integer, text, from, span);
        Ok(())
    }

    fn word(&mut self) -> Result<(), SyntaxError> {
        let classifier = self.classifier;
        let (text, from, span) = self.take_run(|c| classifier.is_alphanumeric(c))?;
        if let Some(kind) = classifier.reserved_keyword(text) {
            self.push(kind, text, from, span);
        } else if classifier.is_identifier(text) {
            self.push(TokenKind::Identifier, text, from, span);
        } else {
            return Err(SyntaxError::new(
                format!("unknown character sequence '{text}'"),
                from,
                self.offset - 1,
                span,
            ));
        }
        Ok(())
    }

    fn unknown_symbol(&mut self) -> SyntaxError {
        match self.advance() {
            Ok((c, from, span)) => {
                SyntaxError::new(format!("unknown symbol {}", c as u32), from, from, span)
            }
            Err(e) => e,
        }
    }

    fn unexpected_end(&self) -> SyntaxError {
        SyntaxError::new(
            "unexpected end of input",
            self.offset,
            self.offset,
            Span::new(self.byte_offset(), 0),
        )
    }
}

/// Scan all tokens from source, ending with a zero-width `Eof` token.
pub fn tokenize(source: &str, grammar: Grammar) -> Result<Vec<Token>, SyntaxError> {
    Lexer::new(source, grammar).run()
}
