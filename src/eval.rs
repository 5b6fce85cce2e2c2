//! Recursive evaluation of parsed expressions.

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::parser::{BinaryOperator, Expr};
use crate::Variable;

/// Truth values for a set of variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    values: FxHashMap<Variable, bool>,
}

impl Assignment {
    /// Pairs `vars` with `values` position by position.
    pub fn new(vars: &[Variable], values: &[bool]) -> Self {
        vars.iter().copied().zip(values.iter().copied()).collect()
    }

    pub fn get(&self, var: Variable) -> Option<bool> {
        self.values.get(&var).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(Variable, bool)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (Variable, bool)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl Expr {
    /// Evaluates the expression under `assignment`.
    ///
    /// Both operands of a binary node are always evaluated, so a missing
    /// variable is reported no matter which values the other variables take.
    pub fn eval(&self, assignment: &Assignment) -> Result<bool> {
        match self {
            Self::Constant(value) => Ok(*value),
            Self::Var(v) => assignment.get(*v).ok_or(Error::UnboundVariable(*v)),
            Self::Not(e) => Ok(!e.eval(assignment)?),
            Self::BinaryOp(op, l, r) => {
                let l = l.eval(assignment)?;
                let r = r.eval(assignment)?;

                match op {
                    BinaryOperator::And => Ok(l && r),
                    BinaryOperator::Or => Ok(l || r),
                    BinaryOperator::Xor => Ok(l != r),
                }
            }
        }
    }
}

/// Free-function form of [`Expr::eval`].
pub fn evaluate(expr: &Expr, assignment: &Assignment) -> Result<bool> {
    expr.eval(assignment)
}
