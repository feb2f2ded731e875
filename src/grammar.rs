use crate::scanner::classifier::Classifier;

/// The two statement-level grammars the language exists in.
///
/// Both share the token vocabulary, the expression grammar and the
/// evaluator; they differ in their alphabet, keyword table and the shape of a
/// program body.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Grammar {
    /// `Ввод` chains of integer-labeled words, brackets, digits `0`..=`7`.
    #[default]
    Chains,
    /// `Выполнить`/`Сохранить` sets followed by operations, transcendental
    /// functions, digits `0`..=`9`.
    Sets,
}

impl Grammar {
    pub fn classifier(self) -> &'static Classifier {
        match self {
            Self::Chains => &Classifier::CHAINS,
            Self::Sets => &Classifier::SETS,
        }
    }

    /// Whether `(...)` and `[...]` grouping is part of the expression grammar.
    pub fn allows_grouping(self) -> bool {
        matches!(self, Self::Chains)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn parses_from_cli_names() {
        assert_eq!(Grammar::from_str("chains").unwrap(), Grammar::Chains);
        assert_eq!(Grammar::from_str("Sets").unwrap(), Grammar::Sets);
        assert!(Grammar::from_str("lists").is_err());
    }

    #[test]
    fn displays_lowercase() {
        assert_eq!(Grammar::Chains.to_string(), "chains");
        assert_eq!(Grammar::Sets.to_string(), "sets");
    }

    #[test]
    fn chains_is_default() {
        assert_eq!(Grammar::default(), Grammar::Chains);
    }
}
