use crate::grammar::Grammar;
use crate::scanner::token::TokenKind;

const SKIPPABLES: [char; 3] = [' ', '\t', '\r'];
const LOGIC_OPERATORS: [&str; 6] = ["&&", "||", "!", "И", "ИЛИ", "НЕ"];
const ADDITIVE_OPERATORS: [&str; 2] = ["+", "-"];
const MULTIPLICATIVE_OPERATORS: [&str; 2] = ["*", "/"];

/// Character predicates for one grammar.
///
/// Alphabetic and numeric characters are contiguous inclusive ranges.
/// Letters are compared by their uppercase form.
#[derive(Debug)]
pub struct Classifier {
    pub grammar: Grammar,
    pub first_letter: char,
    pub last_letter: char,
    pub first_digit: char,
    pub last_digit: char,
}

impl Classifier {
    pub const CHAINS: Self = Self {
        grammar: Grammar::Chains,
        first_letter: 'А',
        last_letter: 'Я',
        first_digit: '0',
        last_digit: '7',
    };

    pub const SETS: Self = Self {
        grammar: Grammar::Sets,
        first_letter: 'А',
        last_letter: 'Я',
        first_digit: '0',
        last_digit: '9',
    };

    pub fn is_alphabetic(&self, c: char) -> bool {
        let mut upper = c.to_uppercase();
        match (upper.next(), upper.next()) {
            (Some(u), None) => (self.first_letter..=self.last_letter).contains(&u),
            _ => false,
        }
    }

    pub fn is_numeric(&self, c: char) -> bool {
        (self.first_digit..=self.last_digit).contains(&c)
    }

    pub fn is_alphanumeric(&self, c: char) -> bool {
        self.is_numeric(c) || self.is_alphabetic(c)
    }

    pub fn is_skippable(&self, c: char) -> bool {
        SKIPPABLES.contains(&c)
    }

    /// `&` and `|` before they have been combined into an operator.
    pub fn is_logic_symbol(&self, c: char) -> bool {
        c == '&' || c == '|'
    }

    pub fn is_logic_operator(&self, s: &str) -> bool {
        LOGIC_OPERATORS.contains(&s)
    }

    pub fn is_additive_operator(&self, s: &str) -> bool {
        ADDITIVE_OPERATORS.contains(&s)
    }

    pub fn is_multiplicative_operator(&self, s: &str) -> bool {
        MULTIPLICATIVE_OPERATORS.contains(&s)
    }

    /// Structural characters that always form a token on their own.
    pub fn single_char_kind(&self, c: char) -> Option<TokenKind> {
        match (self.grammar, c) {
            (_, '=') => Some(TokenKind::Equals),
            (_, ':') => Some(TokenKind::Colon),
            (Grammar::Chains, ';') => Some(TokenKind::Semicolon),
            (Grammar::Chains, '(') => Some(TokenKind::OpenParen),
            (Grammar::Chains, ')') => Some(TokenKind::CloseParen),
            (Grammar::Chains, '[') => Some(TokenKind::OpenBracket),
            (Grammar::Chains, ']') => Some(TokenKind::CloseBracket),
            (Grammar::Sets, '.') => Some(TokenKind::Dot),
            _ => None,
        }
    }

    pub fn reserved_keyword(&self, s: &str) -> Option<TokenKind> {
        let shared = match s {
            "Программа" => Some(TokenKind::Start),
            "Конец" => Some(TokenKind::End),
            "И" | "ИЛИ" | "НЕ" | "&&" | "||" => Some(TokenKind::LogicOperator),
            _ => None,
        };
        shared.or_else(|| match self.grammar {
            Grammar::Chains => match s {
                "Ввод" => Some(TokenKind::Enter),
                _ => None,
            },
            Grammar::Sets => match s {
                "Выполнить" => Some(TokenKind::Execute),
                "Сохранить" => Some(TokenKind::Save),
                "Первое" => Some(TokenKind::First),
                "Второе" => Some(TokenKind::Second),
                "Синус" | "Косинус" | "Тангенс" | "Котангенс" => Some(TokenKind::Function),
                _ => None,
            },
        })
    }

    pub fn is_identifier(&self, s: &str) -> bool {
        let mut chars = s.chars();
        let Some(first) = chars.next() else {
            return false;
        };
        if !self.is_alphabetic(first) {
            return false;
        }
        match self.grammar {
            // a letter and up to three digits: `Х`, `А1`, `Б777`
            Grammar::Chains => {
                let rest: Vec<char> = chars.collect();
                rest.len() <= 3 && rest.iter().all(|&c| self.is_numeric(c))
            }
            Grammar::Sets => s.chars().count() > 1 && chars.all(|c| self.is_alphanumeric(c)),
        }
    }
}
