#![warn(clippy::disallowed_types)]

//! Truth tables for propositional statements.
//!
//! A statement such as `A AND NOT (B OR C)` (or `A * '(B + C)`) is tokenized,
//! normalized to one operator set, parsed into an [`Expr`] and evaluated for
//! every assignment of its variables:
//!
//! ```
//! let table = rstruth::compute_truth_table("a implies b")?;
//! let results: Vec<bool> = table.rows().iter().map(|r| r.output()).collect();
//! assert_eq!(results, vec![true, true, false, true]);
//! # Ok::<(), rstruth::Error>(())
//! ```

pub use error::{Error, Result};
pub use eval::Assignment;
pub use limits::Limits;
pub use parser::{Expr, ParsedStatement};
pub use symbols::Variable;
pub use truth_table::{TruthRow, TruthTable, TruthTableEntry};

pub mod combinations;
pub mod eval;
pub mod normalizer;
pub mod parser;
pub mod parser_io;
pub mod table_io;
pub mod tokenizer;

mod error;
mod limits;
mod symbols;
mod truth_table;

/// Builds the truth table of `statement` under the default [`Limits`].
pub fn compute_truth_table(statement: &str) -> Result<TruthTable> {
    compute_truth_table_with_limits(statement, &Limits::default())
}

pub fn compute_truth_table_with_limits(statement: &str, limits: &Limits) -> Result<TruthTable> {
    ParsedStatement::new(statement, limits)?.truth_table()
}
