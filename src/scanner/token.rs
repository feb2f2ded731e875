use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // Single-character tokens
    Colon,
    Semicolon,
    Equals,
    Dot,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    NewLine,

    // Operators
    AdditiveOperator,
    MultiplicativeOperator,
    LogicOperator,

    // Keywords
    Start,
    End,
    Enter,
    Execute,
    Save,
    First,
    Second,
    Function,

    // Literals
    Identifier,
    Integer,

    Eof,
}

impl TokenKind {
    /// Keywords after which a line break carries no meaning.
    pub fn opens_block(self) -> bool {
        matches!(self, Self::Start | Self::Enter)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Colon => write!(f, ":"),
            Self::Semicolon => write!(f, ";"),
            Self::Equals => write!(f, "="),
            Self::Dot => write!(f, "."),
            Self::OpenParen => write!(f, "("),
            Self::CloseParen => write!(f, ")"),
            Self::OpenBracket => write!(f, "["),
            Self::CloseBracket => write!(f, "]"),
            Self::NewLine => write!(f, "NEWLINE"),
            Self::AdditiveOperator => write!(f, "ADDITIVE"),
            Self::MultiplicativeOperator => write!(f, "MULTIPLICATIVE"),
            Self::LogicOperator => write!(f, "LOGIC"),
            Self::Start => write!(f, "Программа"),
            Self::End => write!(f, "Конец"),
            Self::Enter => write!(f, "Ввод"),
            Self::Execute => write!(f, "Выполнить"),
            Self::Save => write!(f, "Сохранить"),
            Self::First => write!(f, "Первое"),
            Self::Second => write!(f, "Второе"),
            Self::Function => write!(f, "FUNCTION"),
            Self::Identifier => write!(f, "IDENTIFIER"),
            Self::Integer => write!(f, "INTEGER"),
            Self::Eof => write!(f, "EOF"),
        }
    }
}

/// Byte range of a token, the unit `miette` labels are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub offset: usize,
    pub len: usize,
}

impl Span {
    pub fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        miette::SourceSpan::new(span.offset.into(), span.len)
    }
}

/// A lexed token.
///
/// `from` and `to` are inclusive character offsets into the source; `span`
/// covers the same text in bytes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub from: usize,
    pub to: usize,
    pub span: Span,
    pub preceded_by_space: bool,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        lexeme: impl Into<String>,
        from: usize,
        span: Span,
        preceded_by_space: bool,
    ) -> Self {
        let lexeme = lexeme.into();
        let width = lexeme.chars().count();
        Self {
            kind,
            lexeme,
            from,
            to: from + width.saturating_sub(1),
            span,
            preceded_by_space,
        }
    }

    pub fn eof(offset: usize, byte_offset: usize) -> Self {
        Self {
            kind: TokenKind::Eof,
            lexeme: String::new(),
            from: offset,
            to: offset,
            span: Span::new(byte_offset, 0),
            preceded_by_space: false,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lexeme = if self.kind == TokenKind::NewLine {
            "\\n"
        } else {
            &self.lexeme
        };
        write!(f, "{:?} '{}' @{}..={}", self.kind, lexeme, self.from, self.to)
    }
}
