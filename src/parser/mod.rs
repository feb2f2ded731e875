mod chains;
mod expr;
mod sets;

use crate::ast::*;
use crate::error::CompileError;
use crate::grammar::Grammar;
use crate::scanner::token::{Token, TokenKind};

/// Recursive-descent parser over a token vector.
///
/// The parser stops at the first error. Line breaks are significant only
/// at statement boundaries; inside a construct a `NewLine` is an unexpected
/// token and the error points at the token before it.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    previous: Option<usize>,
    grammar: Grammar,
    paren_depth: usize,
    bracket_depth: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>, grammar: Grammar) -> Self {
        if tokens.last().is_none_or(|t| t.kind != TokenKind::Eof) {
            let (offset, byte_offset) = tokens
                .last()
                .map(|t| (t.to + 1, t.span.offset + t.span.len))
                .unwrap_or((0, 0));
            tokens.push(Token::eof(offset, byte_offset));
        }
        Self {
            tokens,
            current: 0,
            previous: None,
            grammar,
            paren_depth: 0,
            bracket_depth: 0,
        }
    }

    pub fn parse(mut self) -> Result<Program, CompileError> {
        self.skip_newlines();
        self.expect("a program must begin with 'Программа'", &[TokenKind::Start])?;
        let body = match self.grammar {
            Grammar::Chains => vec![Stmt::Chains(self.chains()?)],
            Grammar::Sets => self.sets_program()?,
        };
        self.skip_newlines();
        self.end_of_program()?;
        Ok(Program { body })
    }

    fn end_of_program(&mut self) -> Result<(), CompileError> {
        match self.peek(0).kind {
            TokenKind::End => {}
            TokenKind::Eof => return Err(self.missing_end()),
            _ => {
                return Err(CompileError::new(
                    "a program must end with 'Конец'",
                    self.peek(0),
                ));
            }
        }
        self.expect_new_statement("'Конец' must be on a new line")?;
        self.expect("a program must end with 'Конец'", &[TokenKind::End])?;
        self.skip_newlines();
        self.expect("nothing may follow 'Конец'", &[TokenKind::Eof])?;
        Ok(())
    }

    fn missing_end(&self) -> CompileError {
        CompileError::new(
            "unexpected end of program, 'Конец' is missing",
            self.peek(0),
        )
    }

    // --- Helper methods ---

    fn peek(&self, k: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.current + k).min(last)]
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek(0).kind == kind
    }

    fn check_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.peek(0).kind)
    }

    /// `check_any` at the start of the next statement.
    fn check_statement(&mut self, kinds: &[TokenKind]) -> bool {
        self.skip_newlines();
        self.check_any(kinds)
    }

    fn last_consumed(&self) -> Option<&Token> {
        self.previous.map(|i| &self.tokens[i])
    }

    fn consume(&mut self) -> Token {
        let index = self.current.min(self.tokens.len() - 1);
        if self.tokens[index].kind != TokenKind::Eof {
            self.current += 1;
        }
        self.previous = Some(index);
        self.tokens[index].clone()
    }

    fn expect(&mut self, message: &str, kinds: &[TokenKind]) -> Result<Token, CompileError> {
        let previous = self.previous;
        let token = self.consume();
        if kinds.contains(&token.kind) {
            return Ok(token);
        }
        match previous {
            Some(i) if token.kind == TokenKind::NewLine => {
                Err(CompileError::new(message, &self.tokens[i]))
            }
            _ => Err(CompileError::new(message, &token)),
        }
    }

    fn skip_newlines(&mut self) {
        while self.check(TokenKind::NewLine) {
            self.consume();
        }
    }

    /// The next statement must begin on a fresh line.
    fn expect_new_statement(&mut self, message: &str) -> Result<(), CompileError> {
        self.skip_newlines();
        match self.last_consumed() {
            Some(t) if t.kind != TokenKind::NewLine && !t.kind.opens_block() => {
                Err(CompileError::new(message, self.peek(0)))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::scanner;

    fn parse_ok(source: &str, grammar: Grammar) -> Program {
        let tokens = scanner::tokenize(source, grammar).expect("scan should succeed");
        Parser::new(tokens, grammar)
            .parse()
            .expect("parse should succeed")
    }

    fn parse_err(source: &str, grammar: Grammar) -> CompileError {
        let tokens = scanner::tokenize(source, grammar).expect("scan should succeed");
        Parser::new(tokens, grammar).parse().unwrap_err()
    }

    fn chains_sexp(body: &str) -> String {
        let source = format!("Программа\nВвод\n{body}\nКонец");
        crate::ast::printer::to_sexp(&parse_ok(&source, Grammar::Chains))
            .trim()
            .to_string()
    }

    fn rhs_sexp(expr: &str) -> String {
        let sexp = chains_sexp(&format!("0:Х={expr}"));
        sexp.strip_prefix("(chains (chain (word 0 Х ")
            .and_then(|rest| rest.strip_suffix(")))"))
            .expect("single word program")
            .to_string()
    }

    #[test]
    fn single_word_program() {
        let program = parse_ok("Программа\nВвод\n0:Х=2+3\nКонец", Grammar::Chains);
        assert_eq!(program.body.len(), 1);
        let Stmt::Chains(chains) = &program.body[0] else {
            panic!("expected chains");
        };
        assert_eq!(chains.body.len(), 1);
        assert_eq!(chains.body[0].body.len(), 1);
        let word = &chains.body[0].body[0];
        assert_eq!(word.label.lexeme, "0");
        assert_eq!(word.identifier.lexeme, "Х");
        assert!(matches!(
            &word.rhs,
            Expr::Binary(BinaryExpr { operator: BinaryOp::Add, .. })
        ));
    }

    #[rstest]
    #[case("1+2*3", "(+ 1 (* 2 3))")]
    #[case("1-2-3", "(- (- 1 2) 3)")]
    #[case("-1+2", "(+ (- 1) 2)")]
    #[case("-1*2", "(- (* 1 2))")]
    #[case("1*2&&3", "(* 1 (&& 2 3))")]
    #[case("1&&2||3", "(|| (&& 1 2) 3)")]
    #[case("НЕ 1 И 0", "(&& (! 1) 0)")]
    #[case("1 ИЛИ !Х", "(|| 1 (! Х))")]
    #[case("(1+2)*3", "(* (+ 1 2) 3)")]
    #[case("[1+[2-Х1]]/4", "(/ (+ 1 (- 2 Х1)) 4)")]
    #[case("-(-5)", "(- (- 5))")]
    fn expression_precedence(#[case] expr: &str, #[case] expected: &str) {
        assert_eq!(rhs_sexp(expr), expected);
    }

    #[test]
    fn chains_and_words() {
        assert_eq!(
            chains_sexp("0:Х=1\n1:У=Х:2:Б7=У;\nВвод 3:Ж=1"),
            "(chains (chain (word 0 Х 1) (word 1 У Х) (word 2 Б7 У)) (chain (word 3 Ж 1)))"
        );
    }

    #[test]
    fn trailing_semicolon_is_tolerated() {
        assert_eq!(chains_sexp("0:Х=1;"), "(chains (chain (word 0 Х 1)))");
    }

    #[test]
    fn sets_program() {
        let source = "Программа\nВыполнить: 1.2.3 Первое\nСохранить: 4 Второе\nАБ = Синус Косинус 0\nВГ=АБ+1\nКонец";
        let sexp = crate::ast::printer::to_sexp(&parse_ok(source, Grammar::Sets));
        assert_eq!(
            sexp,
            "(sets (set Выполнить 1 2 3 Первое) (set Сохранить 4 Второе))\n\
             (operation АБ (Синус (Косинус 0)))\n\
             (operation ВГ (+ АБ 1))\n"
        );
    }

    #[rstest]
    #[case("Ввод\n0:Х=1\nКонец", "a program must begin with 'Программа'", "Ввод")]
    #[case("Программа\n0:Х=1\nКонец", "a program must contain at least one chain", "0")]
    #[case("Программа\nВвод\n0:Х=1 Конец", "'Конец' must be on a new line", "Конец")]
    #[case("Программа\nВвод\n0:Х=1\nКонец\nВвод", "nothing may follow 'Конец'", "Ввод")]
    #[case("Программа\nВвод\n0:Х=1", "unexpected end of program, 'Конец' is missing", "")]
    #[case("Программа\nВвод\n0:Х=1;", "unexpected end of program, 'Конец' is missing", "")]
    #[case("Программа\nВвод\n0:Х=1 2\nКонец", "an operation is required before '2'", "2")]
    #[case("Программа\nВвод\n0:Х=1)\nКонец", "a closing bracket must be preceded by an opening one", ")")]
    #[case("Программа\nВвод\n0:Х=(1\nКонец", "missing closing bracket", "1")]
    #[case("Программа\nВвод\n0:Х=(1)(2)\nКонец", "there must be an operation between brackets", "(")]
    #[case("Программа\nВвод\n0:Х=[1][2]\nКонец", "there must be an operation between brackets", "[")]
    #[case("Программа\nВвод\n0:Х=()\nКонец", "brackets must contain an expression", ")")]
    #[case("Программа\nВвод\n0:Х=[[[1]]]\nКонец", "square brackets may be nested at most 2 deep", "[")]
    #[case("Программа\nВвод\n0:Х=1+*2\nКонец", "two operators cannot follow each other", "*")]
    #[case("Программа\nВвод\n0:Х=- -2\nКонец", "two operators cannot follow each other", "-")]
    #[case("Программа\nВвод\n0:Х=1 Ввод\nКонец", "chains must be separated by ';'", "Ввод")]
    #[case("Программа\nВвод\nХ=1\nКонец", "a word must begin with a label", "Х")]
    #[case("Программа\nВвод\n0:\nХ=1\nКонец", "a label must be followed by a variable", ":")]
    #[case("Программа\nВвод\n0:Х=\nКонец", "'=' must be followed by a variable, an integer or an opening bracket", "=")]
    fn chains_errors(#[case] source: &str, #[case] message: &str, #[case] lexeme: &str) {
        let err = parse_err(source, Grammar::Chains);
        assert_eq!(err.message, message);
        assert_eq!(err.token.lexeme, lexeme);
    }

    #[test]
    fn newline_errors_point_at_previous_token() {
        let err = parse_err("Программа\nВвод\n0:Х=1+\n2\nКонец", Grammar::Chains);
        assert_eq!(err.token.kind, TokenKind::AdditiveOperator);
        assert_eq!((err.token.from, err.token.to), (20, 20));
    }

    #[test]
    fn two_bracket_levels_are_allowed() {
        assert_eq!(rhs_sexp("[[1]]+[[2]]"), "(+ 1 2)");
        assert_eq!(rhs_sexp("((((1))))"), "1");
    }

    #[rstest]
    #[case("Программа\nАБ = 1\nКонец", "a program must begin with at least one set", "АБ")]
    #[case("Программа\nВыполнить: 1 Первое\nКонец", "a program must contain at least one operation", "Конец")]
    #[case("Программа\nВыполнить: 1Первое\nАБ=1\nКонец", "'Первое' must be separated from the numbers by a space", "Первое")]
    #[case("Программа\nВыполнить: 1 Второе Сохранить: 2 Первое\nАБ=1\nКонец", "each set must start on a new line", "Сохранить")]
    #[case("Программа\nВыполнить: 1 Первое\nАБ=1 ВГ=2\nКонец", "each operation must start on a new line", "ВГ")]
    #[case("Программа\nВыполнить: 1 Первое\nАБ=1 2\nКонец", "an operation is required before '2'", "2")]
    #[case("Программа\nВыполнить 1 Первое\nАБ=1\nКонец", "the action must be followed by ':'", "1")]
    #[case("Программа\nВыполнить: 1.\nАБ=1\nКонец", "a set element must be a number", ".")]
    #[case("Программа\nВыполнить: 1 2\nАБ=1\nКонец", "a set must end with 'Первое' or 'Второе'", "2")]
    #[case("Программа\nВыполнить: 1 Первое\nАБ=Синус\nКонец", "'Синус' must be followed by a variable or an integer", "Синус")]
    fn sets_errors(#[case] source: &str, #[case] message: &str, #[case] lexeme: &str) {
        let err = parse_err(source, Grammar::Sets);
        assert_eq!(err.message, message);
        assert_eq!(err.token.lexeme, lexeme);
    }

    #[test]
    fn oversized_integer_is_rejected() {
        let err = parse_err(
            "Программа\nВыполнить: 1 Первое\nАБ=99999999999999999999\nКонец",
            Grammar::Sets,
        );
        assert_eq!(err.message, "integer literal '99999999999999999999' is too large");
    }

    #[test]
    fn parenthesis_nesting_is_capped() {
        let nested = |depth: usize| format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(rhs_sexp(&nested(64)), "1");

        let source = format!("Программа\nВвод\n0:Х={}\nКонец", nested(100_000));
        let err = parse_err(&source, Grammar::Chains);
        assert_eq!(err.message, "parentheses may be nested at most 64 deep");
        assert_eq!(err.token.lexeme, "(");
        // `Программа\nВвод\n0:Х=` is 19 characters, the 65th `(` follows
        assert_eq!(err.token.from, 19 + 64);
    }

    #[test]
    fn trailing_newlines_after_end_are_allowed() {
        parse_ok("Программа\nВвод\n0:Х=1\nКонец\n\n", Grammar::Chains);
    }

    #[test]
    fn missing_eof_token_is_synthesized() {
        let mut tokens =
            scanner::tokenize("Программа\nВвод\n0:Х=1\nКонец", Grammar::Chains).unwrap();
        tokens.pop();
        let program = Parser::new(tokens, Grammar::Chains).parse();
        assert!(program.is_ok());
    }

    #[test]
    fn empty_token_stream_fails_cleanly() {
        let err = Parser::new(Vec::new(), Grammar::Chains).parse().unwrap_err();
        assert_eq!(err.message, "a program must begin with 'Программа'");
        assert_eq!(err.token.kind, TokenKind::Eof);
    }

    #[test]
    fn json_output_is_valid() {
        let program = parse_ok("Программа\nВвод\n0:Х=1\nКонец", Grammar::Chains);
        let json = crate::ast::printer::to_json(&program).expect("AST should be serializable");
        let _: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
    }
}
