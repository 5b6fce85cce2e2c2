//! Character-level scanning of statements into lexemes.
//!
//! A maximal run of ASCII letters is always a single [`Lexeme::Word`]. Operator
//! words are therefore only ever recognized as whole words: a letter adjacent to
//! another letter belongs to the same word and can never start or end an
//! operator. Interpreting words is left to the [`normalizer`](crate::normalizer).

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::error::{Error, Result};

lazy_static! {
    static ref TOKENIZER: Regex = Regex::new(
        r"(?P<word>[A-Za-z]+)|(?P<symbol>=>|->|[*&+|'!~^=])|(?P<constant>[01])|(?P<open>\()|(?P<close>\))|(?P<space>\s+)|(?P<other>.)"
    )
    .expect("tokenizer pattern is valid");
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexemeKind {
    /// A maximal run of ASCII letters, as written.
    Word(String),
    /// An operator symbol, e.g. `*` or `=>`.
    Symbol(String),
    Constant(bool),
    OpenParen,
    CloseParen,
}

/// A lexeme together with the byte offset where it starts in the statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    pub kind: LexemeKind,
    pub position: usize,
}

impl Lexeme {
    const fn new(kind: LexemeKind, position: usize) -> Self {
        Self { kind, position }
    }
}

/// Splits `src` into lexemes, dropping whitespace.
///
/// Fails with [`Error::Lex`] on the first character that cannot start a lexeme.
pub fn tokenize(src: &str) -> Result<Vec<Lexeme>> {
    let mut result = Vec::new();

    for c in TOKENIZER.captures_iter(src) {
        if let Some(word) = c.name("word") {
            result.push(Lexeme::new(
                LexemeKind::Word(word.as_str().to_string()),
                word.start(),
            ));
        } else if let Some(symbol) = c.name("symbol") {
            result.push(Lexeme::new(
                LexemeKind::Symbol(symbol.as_str().to_string()),
                symbol.start(),
            ));
        } else if let Some(constant) = c.name("constant") {
            result.push(Lexeme::new(
                LexemeKind::Constant(constant.as_str() == "1"),
                constant.start(),
            ));
        } else if let Some(open) = c.name("open") {
            result.push(Lexeme::new(LexemeKind::OpenParen, open.start()));
        } else if let Some(close) = c.name("close") {
            result.push(Lexeme::new(LexemeKind::CloseParen, close.start()));
        } else if c.name("space").is_some() {
            continue;
        } else if let Some(other) = c.name("other") {
            return Err(Error::Lex {
                character: other.as_str().chars().next().unwrap_or_default(),
                position: other.start(),
            });
        }
    }

    debug!("tokenize({:?}) -> {} lexemes", src, result.len());

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn kinds(src: &str) -> Vec<LexemeKind> {
        tokenize(src)
            .expect("statement should tokenize")
            .into_iter()
            .map(|l| l.kind)
            .collect()
    }

    fn word(s: &str) -> LexemeKind {
        LexemeKind::Word(s.to_string())
    }

    fn symbol(s: &str) -> LexemeKind {
        LexemeKind::Symbol(s.to_string())
    }

    #[test]
    fn letter_runs_are_single_words() {
        assert_eq!(kinds("A AND B"), vec![word("A"), word("AND"), word("B")]);
        assert_eq!(kinds("mand"), vec![word("mand")]);
        assert_eq!(kinds("aANDb"), vec![word("aANDb")]);
    }

    #[test]
    fn symbols_break_words() {
        assert_eq!(
            kinds("(a)and(b)"),
            vec![
                LexemeKind::OpenParen,
                word("a"),
                LexemeKind::CloseParen,
                word("and"),
                LexemeKind::OpenParen,
                word("b"),
                LexemeKind::CloseParen,
            ]
        );
        assert_eq!(kinds("A*B"), vec![word("A"), symbol("*"), word("B")]);
    }

    #[test]
    fn multi_character_symbols() {
        assert_eq!(kinds("a=>b"), vec![word("a"), symbol("=>"), word("b")]);
        assert_eq!(kinds("a->b"), vec![word("a"), symbol("->"), word("b")]);
        assert_eq!(kinds("a=b"), vec![word("a"), symbol("="), word("b")]);
    }

    #[test]
    fn constants() {
        assert_eq!(
            kinds("1+0"),
            vec![
                LexemeKind::Constant(true),
                symbol("+"),
                LexemeKind::Constant(false)
            ]
        );
    }

    #[test]
    fn positions_are_byte_offsets() {
        let lexemes = tokenize("  a |  bc").expect("statement should tokenize");
        let positions: Vec<usize> = lexemes.iter().map(|l| l.position).collect();
        assert_eq!(positions, vec![2, 4, 7]);
    }

    #[test]
    fn unknown_characters_fail() {
        assert_eq!(
            tokenize("A % B"),
            Err(Error::Lex {
                character: '%',
                position: 2
            })
        );
        assert_eq!(
            tokenize("A - B"),
            Err(Error::Lex {
                character: '-',
                position: 2
            })
        );
        assert_eq!(
            tokenize("2"),
            Err(Error::Lex {
                character: '2',
                position: 0
            })
        );
    }

    #[test]
    fn empty_input() {
        assert_eq!(kinds(""), vec![]);
        assert_eq!(kinds(" \t\n"), vec![]);
    }
}
