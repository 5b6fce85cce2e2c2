//! CSV export of truth tables.
//!
//! The header line comes first (variables, then the statement label), followed
//! by one line per row with every cell written as `1` or `0`.

use std::io::Write;

use crate::truth_table::{TruthTable, TruthTableEntry};

fn cell(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

/// Writes the rows of `table` selected by `entry` to `writer`.
pub fn write_csv_filtered<W: Write>(
    table: &TruthTable,
    entry: TruthTableEntry,
    writer: W,
) -> csv::Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(table.header())?;

    for row in table.rows_matching(entry) {
        csv_writer.write_record(row.cells().map(cell))?;
    }

    csv_writer.flush()?;

    Ok(())
}

pub fn write_csv<W: Write>(table: &TruthTable, writer: W) -> csv::Result<()> {
    write_csv_filtered(table, TruthTableEntry::Any, writer)
}

pub fn to_csv_string(table: &TruthTable) -> csv::Result<String> {
    let mut buf = Vec::new();
    write_csv(table, &mut buf)?;
    // every field is either a label built from ASCII tokens or a digit
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
