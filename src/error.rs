//! Error types for statement parsing and truth-table construction.

use thiserror::Error;

use crate::Variable;

/// Errors produced while turning a statement into a truth table.
///
/// Every variant is recoverable: the statement is rejected as a whole and no
/// partial table is produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A character that is not a letter, operator, constant, parenthesis or whitespace.
    #[error("unrecognized character {character:?} at position {position}")]
    Lex { character: char, position: usize },

    /// A malformed token sequence.
    #[error("syntax error at position {position}: {message}")]
    Syntax { message: String, position: usize },

    /// A variable occurs in the expression but has no value in the assignment.
    #[error("no value assigned to variable {0}")]
    UnboundVariable(Variable),

    /// The statement uses more distinct variables than the configured limit.
    #[error("statement uses {count} variables, the limit is {limit}")]
    TooManyVariables { count: usize, limit: usize },

    /// The statement nests or chains operators beyond the configured depth.
    #[error("statement is nested deeper than {limit} levels at position {position}")]
    TooDeep { limit: usize, position: usize },

    /// The statement contains no variables.
    #[error("no valid variables found")]
    EmptyStatement,
}

impl Error {
    pub(crate) fn syntax(message: impl Into<String>, position: usize) -> Self {
        Self::Syntax {
            message: message.into(),
            position,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
