//! Collapses the surface syntax of a statement into canonical tokens.
//!
//! Words and symbols are mapped onto one operator set, case-insensitively.
//! Only a whole [`Word`](LexemeKind::Word) can be an operator; any other word is
//! read as a run of single-letter variables.

use std::fmt;

use log::debug;

use crate::tokenizer::{Lexeme, LexemeKind};
use crate::Variable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    Not,
    And,
    Or,
    Implies,
    Nand,
    Nor,
    Xor,
}

impl OperatorKind {
    const WORDS: &'static [(&'static str, Self)] = &[
        ("NOT", Self::Not),
        ("AND", Self::And),
        ("OR", Self::Or),
        ("IMPLIES", Self::Implies),
        ("NAND", Self::Nand),
        ("NOR", Self::Nor),
        ("XOR", Self::Xor),
    ];

    /// Looks up an operator word, ignoring ASCII case.
    pub fn from_word(word: &str) -> Option<Self> {
        Self::WORDS
            .iter()
            .find(|(w, _)| w.eq_ignore_ascii_case(word))
            .map(|&(_, op)| op)
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "*" | "&" => Some(Self::And),
            "+" | "|" => Some(Self::Or),
            "'" | "!" | "~" => Some(Self::Not),
            "=" | "=>" | "->" => Some(Self::Implies),
            "^" => Some(Self::Xor),
            _ => None,
        }
    }

    /// The spelling used in normalized labels.
    pub const fn canonical(self) -> &'static str {
        match self {
            Self::Not => "'",
            Self::And => "*",
            Self::Or => "+",
            Self::Implies => "=",
            Self::Nand => "NAND",
            Self::Nor => "NOR",
            Self::Xor => "XOR",
        }
    }

    pub const fn is_binary(self) -> bool {
        !matches!(self, Self::Not)
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.canonical())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Variable(Variable),
    Constant(bool),
    Operator(OperatorKind),
    LeftParen,
    RightParen,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variable(v) => fmt::Display::fmt(v, f),
            Self::Constant(true) => f.pad("1"),
            Self::Constant(false) => f.pad("0"),
            Self::Operator(op) => fmt::Display::fmt(op, f),
            Self::LeftParen => f.pad("("),
            Self::RightParen => f.pad(")"),
        }
    }
}

/// A canonical token and the byte offset of the source text it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

/// The canonical token stream of a statement, plus its normalized label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub tokens: Vec<Token>,
    pub label: String,
}

impl Normalized {
    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.tokens.iter().filter_map(|t| match t.kind {
            TokenKind::Variable(v) => Some(v),
            _ => None,
        })
    }
}

pub fn normalize(lexemes: &[Lexeme]) -> Normalized {
    let mut tokens = Vec::with_capacity(lexemes.len());

    for lexeme in lexemes {
        let position = lexeme.position;
        match &lexeme.kind {
            LexemeKind::Word(word) => {
                if let Some(op) = OperatorKind::from_word(word) {
                    tokens.push(Token {
                        kind: TokenKind::Operator(op),
                        position,
                    });
                } else if word.eq_ignore_ascii_case("TRUE") || word.eq_ignore_ascii_case("FALSE") {
                    tokens.push(Token {
                        kind: TokenKind::Constant(word.eq_ignore_ascii_case("TRUE")),
                        position,
                    });
                } else {
                    // words are ASCII letters only, so byte and char offsets agree
                    tokens.extend(word.chars().enumerate().filter_map(|(i, c)| {
                        Variable::new(c).map(|v| Token {
                            kind: TokenKind::Variable(v),
                            position: position + i,
                        })
                    }));
                }
            }
            LexemeKind::Symbol(symbol) => {
                if let Some(op) = OperatorKind::from_symbol(symbol) {
                    tokens.push(Token {
                        kind: TokenKind::Operator(op),
                        position,
                    });
                }
            }
            LexemeKind::Constant(value) => tokens.push(Token {
                kind: TokenKind::Constant(*value),
                position,
            }),
            LexemeKind::OpenParen => tokens.push(Token {
                kind: TokenKind::LeftParen,
                position,
            }),
            LexemeKind::CloseParen => tokens.push(Token {
                kind: TokenKind::RightParen,
                position,
            }),
        }
    }

    let label = render_label(&tokens);
    debug!("normalize -> {:?}", label);

    Normalized { tokens, label }
}

/// Prints tokens canonically: binary operators surrounded by single spaces,
/// everything else written tightly.
fn render_label(tokens: &[Token]) -> String {
    let mut label = String::new();
    let mut previous: Option<TokenKind> = None;

    for token in tokens {
        let spaced = match (previous, token.kind) {
            (None, _) => false,
            (Some(TokenKind::Operator(op)), _) if op.is_binary() => true,
            (_, TokenKind::Operator(op)) if op.is_binary() => true,
            (Some(TokenKind::Operator(_) | TokenKind::LeftParen), _) => false,
            (_, TokenKind::RightParen) => false,
            // adjacent operands are kept apart so the label stays readable
            (_, _) => true,
        };
        if spaced {
            label.push(' ');
        }
        label.push_str(&token.kind.to_string());
        previous = Some(token.kind);
    }

    label
}
