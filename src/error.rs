use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::scanner::token::{Span, Token};

// ============= Lexical errors =============

/// Raised by the lexer on the first character run it cannot classify.
///
/// `from` and `to` are inclusive character offsets, like token offsets.
#[derive(Error, Debug, Diagnostic)]
#[error("syntax error: {message}")]
#[diagnostic(code(kirlang::syntax))]
pub struct SyntaxError {
    pub message: String,
    pub from: usize,
    pub to: usize,
    #[label("here")]
    pub span: SourceSpan,
    #[source_code]
    src: NamedSource<String>,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, from: usize, to: usize, span: Span) -> Self {
        Self {
            message: message.into(),
            from,
            to,
            span: span.into(),
            src: NamedSource::new("input", String::new()),
        }
    }

    /// Attach source code for fancy miette diagnostics
    pub fn with_source_code(self, name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            src: NamedSource::new(name.into(), source.into()),
            ..self
        }
    }

    pub fn display_with_line(&self, source: &str) -> String {
        let line = offset_to_line(source, self.span.offset());
        format!("Error: line {}: {}", line, self.message)
    }
}

// ============= Compile-time errors =============

/// Raised by the parser and the evaluator, attached to the offending token.
#[derive(Error, Debug, Diagnostic)]
#[error("compile error: {message}")]
#[diagnostic(code(kirlang::compile))]
pub struct CompileError {
    pub message: String,
    pub token: Token,
    #[label("here")]
    span: SourceSpan,
    #[source_code]
    src: NamedSource<String>,
}

impl CompileError {
    pub fn new(message: impl Into<String>, token: &Token) -> Self {
        Self {
            message: message.into(),
            token: token.clone(),
            span: token.span.into(),
            src: NamedSource::new("input", String::new()),
        }
    }

    /// Attach source code for fancy miette diagnostics
    pub fn with_source_code(self, name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            src: NamedSource::new(name.into(), source.into()),
            ..self
        }
    }

    pub fn display_with_line(&self, source: &str) -> String {
        let line = offset_to_line(source, self.token.span.offset);
        format!("Error: line {}: {}", line, self.message)
    }
}

// ============= Either tier =============

#[derive(Error, Debug, Diagnostic)]
pub enum LangError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Compile(#[from] CompileError),
}

impl LangError {
    pub fn message(&self) -> &str {
        match self {
            Self::Syntax(e) => &e.message,
            Self::Compile(e) => &e.message,
        }
    }

    /// Inclusive character range the error points at.
    pub fn range(&self) -> (usize, usize) {
        match self {
            Self::Syntax(e) => (e.from, e.to),
            Self::Compile(e) => (e.token.from, e.token.to),
        }
    }

    pub fn with_source_code(self, name: impl Into<String>, source: impl Into<String>) -> Self {
        match self {
            Self::Syntax(e) => Self::Syntax(e.with_source_code(name, source)),
            Self::Compile(e) => Self::Compile(e.with_source_code(name, source)),
        }
    }

    pub fn display_with_line(&self, source: &str) -> String {
        match self {
            Self::Syntax(e) => e.display_with_line(source),
            Self::Compile(e) => e.display_with_line(source),
        }
    }
}

/// Calculate line number from byte offset in source
fn offset_to_line(source: &str, offset: usize) -> usize {
    source
        .as_bytes()
        .iter()
        .take(offset.min(source.len()))
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}

// ============= Tests =============
