pub mod ast;
pub mod error;
pub mod grammar;
pub mod interpreter;
pub mod parser;
pub mod scanner;

// Re-export error types for convenience
pub use error::{CompileError, LangError, SyntaxError};
pub use grammar::Grammar;
