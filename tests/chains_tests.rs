use kirlang::Grammar;
use kirlang::ast::Stmt;
use kirlang::interpreter::{self, value::Value};
use kirlang::parser::Parser;
use kirlang::scanner::{self, token::TokenKind};

fn run_fixture(source: &str) -> String {
    let value = interpreter::run(source, Grammar::Chains).expect("program should run");
    format!("{value}\n")
}

#[test]
fn fixture_sum() {
    let source = include_str!("../fixtures/sum.prog");
    let expected = include_str!("../fixtures/sum.expected");
    assert_eq!(run_fixture(source), expected);
}

#[test]
fn fixture_chains() {
    let source = include_str!("../fixtures/chains.prog");
    let expected = include_str!("../fixtures/chains.expected");
    assert_eq!(run_fixture(source), expected);
}

#[test]
fn sum_program_end_to_end() {
    let source = "Программа\nВвод\n0:Х=2+3\nКонец";

    let tokens = scanner::tokenize(source, Grammar::Chains).expect("scan should succeed");
    let kinds: Vec<_> = tokens.iter().map(|t| (t.kind, t.lexeme.as_str())).collect();
    assert_eq!(
        kinds,
        vec![
            (TokenKind::Start, "Программа"),
            (TokenKind::Enter, "Ввод"),
            (TokenKind::Integer, "0"),
            (TokenKind::Colon, ":"),
            (TokenKind::Identifier, "Х"),
            (TokenKind::Equals, "="),
            (TokenKind::Integer, "2"),
            (TokenKind::AdditiveOperator, "+"),
            (TokenKind::Integer, "3"),
            (TokenKind::NewLine, "\n"),
            (TokenKind::End, "Конец"),
            (TokenKind::Eof, ""),
        ]
    );

    let program = Parser::new(tokens, Grammar::Chains)
        .parse()
        .expect("parse should succeed");
    let [Stmt::Chains(chains)] = program.body.as_slice() else {
        panic!("expected a single chains statement");
    };
    assert_eq!(chains.body.len(), 1);
    assert_eq!(chains.body[0].body.len(), 1);

    let value = interpreter::evaluate(&program, Default::default()).expect("eval should succeed");
    assert_eq!(value, Value::Number(5.0));
}

#[test]
fn token_ranges_reproduce_lexemes() {
    let source = include_str!("../fixtures/chains.prog");
    let chars: Vec<char> = source.chars().collect();
    let tokens = scanner::tokenize(source, Grammar::Chains).expect("scan should succeed");
    for token in tokens.iter().filter(|t| t.kind != TokenKind::Eof) {
        let by_chars: String = chars[token.from..=token.to].iter().collect();
        assert_eq!(by_chars, token.lexeme, "char range of {token}");
        let by_bytes = &source[token.span.offset..token.span.offset + token.span.len];
        assert_eq!(by_bytes, token.lexeme, "byte span of {token}");
    }
}

#[test]
fn sexp_dump_of_fixture() {
    let source = include_str!("../fixtures/chains.prog");
    let tokens = scanner::tokenize(source, Grammar::Chains).expect("scan should succeed");
    let program = Parser::new(tokens, Grammar::Chains)
        .parse()
        .expect("parse should succeed");
    assert_eq!(
        kirlang::ast::printer::to_sexp(&program),
        "(chains \
         (chain (word 0 Х (+ 2 3)) (word 1 У (* Х (- Х 1))) (word 2 Б1 (/ (+ У Х) 5))) \
         (chain (word 3 Ж (&& (! 0) 1)) (word 4 Щ (- (* Б1 У) Ж))))\n"
    );
}
