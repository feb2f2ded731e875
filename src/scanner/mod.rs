pub mod classifier;
pub mod lexer;
pub mod token;

use crate::error::SyntaxError;
use crate::grammar::Grammar;
use token::Token;

/// Scan source code into a list of tokens.
pub fn tokenize(source: &str, grammar: Grammar) -> Result<Vec<Token>, SyntaxError> {
    lexer::tokenize(source, grammar)
}
