pub mod printer;

use serde::Serialize;

use crate::scanner::token::Token;

/// Top-level program: the statements between `Программа` and `Конец`.
#[derive(Debug, Clone, Serialize)]
pub struct Program {
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Stmt {
    Chains(Chains),
    Sets(Sets),
    Operation(Operation),
}

// ============= Chains grammar =============

/// `;`-separated chains.
#[derive(Debug, Clone, Serialize)]
pub struct Chains {
    pub body: Vec<ChainSingle>,
}

/// One `Ввод` chain of labeled words.
#[derive(Debug, Clone, Serialize)]
pub struct ChainSingle {
    pub enter: Token,
    pub body: Vec<Word>,
}

/// `label: identifier = rhs`
#[derive(Debug, Clone, Serialize)]
pub struct Word {
    pub label: Token,
    pub identifier: Token,
    pub rhs: Expr,
}

// ============= Sets grammar =============

#[derive(Debug, Clone, Serialize)]
pub struct Sets {
    pub body: Vec<SetSingle>,
}

/// `action: f.f.f ordinal`
#[derive(Debug, Clone, Serialize)]
pub struct SetSingle {
    pub action: Token,
    pub body: Vec<FloatLiteral>,
    pub ordinal: Token,
}

/// `identifier = rhs`
#[derive(Debug, Clone, Serialize)]
pub struct Operation {
    pub identifier: Token,
    pub rhs: Expr,
}

// ============= Expressions =============

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Expr {
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Identifier(IdentifierExpr),
    Integer(IntegerLiteral),
    Float(FloatLiteral),
    Function(FunctionExpr),
}

#[derive(Debug, Clone, Serialize)]
pub struct BinaryExpr {
    pub lhs: Box<Expr>,
    pub operator: BinaryOp,
    pub rhs: Box<Expr>,
    pub token: Token,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
pub enum BinaryOp {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Subtract,
    #[strum(serialize = "*")]
    Multiply,
    #[strum(serialize = "/")]
    Divide,
    #[strum(serialize = "&&")]
    And,
    #[strum(serialize = "||")]
    Or,
}

impl BinaryOp {
    pub fn from_lexeme(lexeme: &str) -> Option<Self> {
        match lexeme {
            "+" => Some(Self::Add),
            "-" => Some(Self::Subtract),
            "*" => Some(Self::Multiply),
            "/" => Some(Self::Divide),
            "&&" | "И" => Some(Self::And),
            "||" | "ИЛИ" => Some(Self::Or),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UnaryExpr {
    pub operator: UnaryOp,
    pub operand: Box<Expr>,
    pub token: Token,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
pub enum UnaryOp {
    #[strum(serialize = "-")]
    Negate,
    #[strum(serialize = "!")]
    Not,
}

impl UnaryOp {
    pub fn from_lexeme(lexeme: &str) -> Option<Self> {
        match lexeme {
            "-" => Some(Self::Negate),
            "!" | "НЕ" => Some(Self::Not),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IdentifierExpr {
    pub symbol: Token,
}

#[derive(Debug, Clone, Serialize)]
pub struct IntegerLiteral {
    pub value: i64,
    pub token: Token,
}

#[derive(Debug, Clone, Serialize)]
pub struct FloatLiteral {
    pub value: f64,
    pub token: Token,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionExpr {
    pub function: Func,
    pub argument: Box<Expr>,
    pub token: Token,
}

/// Transcendental functions, parsed from their keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display, strum::EnumString)]
pub enum Func {
    #[strum(serialize = "Синус")]
    Sin,
    #[strum(serialize = "Косинус")]
    Cos,
    #[strum(serialize = "Тангенс")]
    Tan,
    #[strum(serialize = "Котангенс")]
    Cot,
}

impl Func {
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
            Self::Cot => 1.0 / x.tan(),
        }
    }
}
