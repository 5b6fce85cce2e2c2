use std::{
    fmt::{self, Display},
    str::FromStr,
};

use log::{debug, trace};

use crate::combinations::Combinations;
use crate::error::{Error, Result};
use crate::eval::Assignment;
use crate::parser::Expr;
use crate::Variable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Selection of truth-table rows by their result.
///
/// [`True`] keeps only the rows where the statement holds, [`False`] only the
/// rows where it does not, and [`Any`] keeps every row.
///
/// [`Any`]: TruthTableEntry::Any
/// [`True`]: TruthTableEntry::True
/// [`False`]: TruthTableEntry::False
pub enum TruthTableEntry {
    /// Rows evaluating to true
    True,
    /// Rows evaluating to false
    False,
    /// All rows
    Any,
}

impl TruthTableEntry {
    const fn variants<'a>() -> &'a [Self] {
        &[Self::True, Self::False, Self::Any]
    }

    fn matches(&self, s: &str) -> bool {
        match self {
            Self::True => matches!(s, "true" | "True" | "t" | "T" | "1"),
            Self::False => matches!(s, "false" | "False" | "f" | "F" | "0"),
            Self::Any => matches!(s, "any" | "Any" | "a" | "A" | "*"),
        }
    }

    /// Whether a row with result `value` is selected.
    pub const fn accepts(self, value: bool) -> bool {
        match self {
            Self::True => value,
            Self::False => !value,
            Self::Any => true,
        }
    }
}

impl Display for TruthTableEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::True => "True",
            Self::False => "False",
            Self::Any => "Any",
        })
    }
}

impl FromStr for TruthTableEntry {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Self::variants()
            .iter()
            .find(|variant| variant.matches(s))
            .ok_or_else(|| anyhow::anyhow!("cannot parse {s} as truth-table entry"))
            .copied()
    }
}

/// One assignment and the statement's value under it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TruthRow {
    inputs: Vec<bool>,
    output: bool,
}

impl TruthRow {
    /// Values of the table's variables, in column order.
    pub fn inputs(&self) -> &[bool] {
        &self.inputs
    }

    pub const fn output(&self) -> bool {
        self.output
    }

    /// Inputs followed by the output.
    pub fn cells(&self) -> impl Iterator<Item = bool> + '_ {
        self.inputs.iter().copied().chain(std::iter::once(self.output))
    }
}

/// The complete truth table of a statement.
///
/// Rows follow the canonical order: row `i` assigns the binary expansion of `i`
/// (most significant bit first) to the variables.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TruthTable {
    vars: Vec<Variable>,
    label: String,
    rows: Vec<TruthRow>,
}

impl TruthTable {
    /// Evaluates `expr` for every assignment to `vars`.
    ///
    /// `vars` must be distinct and cover every variable of `expr`; otherwise the
    /// evaluation fails with [`Error::UnboundVariable`]. More than
    /// [`Variable::COUNT`] variables cannot be distinct and fail with
    /// [`Error::TooManyVariables`].
    pub fn assemble(expr: &Expr, vars: Vec<Variable>, label: String) -> Result<Self> {
        if vars.len() > Variable::COUNT {
            return Err(Error::TooManyVariables {
                count: vars.len(),
                limit: Variable::COUNT,
            });
        }

        let combinations = Combinations::new(vars.len());
        debug!("assembling {} rows for {:?}", combinations.len(), label);

        let rows = combinations
            .map(|inputs| -> Result<TruthRow> {
                let output = expr.eval(&Assignment::new(&vars, &inputs))?;
                trace!("{:?} -> {}", inputs, output);
                Ok(TruthRow { inputs, output })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { vars, label, rows })
    }

    pub fn variables(&self) -> &[Variable] {
        &self.vars
    }

    /// The result-column header: the statement in canonical notation.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn rows(&self) -> &[TruthRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column headers: one per variable, then the label.
    pub fn header(&self) -> Vec<String> {
        self.vars
            .iter()
            .map(ToString::to_string)
            .chain(std::iter::once(self.label.clone()))
            .collect()
    }

    pub fn rows_matching(&self, entry: TruthTableEntry) -> impl Iterator<Item = &TruthRow> + '_ {
        self.rows.iter().filter(move |row| entry.accepts(row.output))
    }

    /// A view of the table restricted to the rows selected by `entry`.
    pub const fn filtered(&self, entry: TruthTableEntry) -> FilteredTable<'_> {
        FilteredTable { table: self, entry }
    }
}

impl Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.filtered(TruthTableEntry::Any), f)
    }
}

/// Rows of a [`TruthTable`] selected by a [`TruthTableEntry`], rendered as text.
pub struct FilteredTable<'a> {
    table: &'a TruthTable,
    entry: TruthTableEntry,
}

impl Display for FilteredTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = self.table.header();
        let widths: Vec<usize> = header.iter().map(|h| h.chars().count().max(1)).collect();

        let cells = header.iter().zip(&widths).map(|(h, &w)| format!("{h:^w$}"));
        writeln!(f, "{}", cells.collect::<Vec<_>>().join(" | "))?;

        let rule = widths.iter().map(|&w| "-".repeat(w));
        writeln!(f, "{}", rule.collect::<Vec<_>>().join("-+-"))?;

        for row in self.table.rows_matching(self.entry) {
            let cells = row
                .cells()
                .zip(&widths)
                .map(|(value, &w)| format!("{:^w$}", u8::from(value)));
            writeln!(f, "{}", cells.collect::<Vec<_>>().join(" | "))?;
        }

        Ok(())
    }
}
