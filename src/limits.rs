//! Resource limits for truth-table construction.

use crate::Variable;

/// Caps applied before a truth table is enumerated.
///
/// A statement with `n` distinct variables yields `2^n` rows, so the number of
/// variables is bounded to keep construction time and memory predictable.
/// Parsing and evaluation recurse over the expression, so its depth is bounded
/// as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of distinct variables in a statement.
    pub max_variables: usize,
    /// Maximum nesting of parentheses, negations and implications, and maximum
    /// height of the parsed expression tree.
    pub max_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_variables: 20,
            max_depth: 256,
        }
    }
}

impl Limits {
    /// Create limits with a custom variable cap.
    ///
    /// The cap is clamped to [`Variable::COUNT`], the number of distinct variables
    /// a statement can possibly contain.
    pub fn new(max_variables: usize) -> Self {
        Self {
            max_variables: max_variables.min(Variable::COUNT),
            ..Self::default()
        }
    }

    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
