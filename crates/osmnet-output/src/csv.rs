//! CSV backend.
//!
//! A report may produce several tables (the distance matrix has one for
//! metres and one for seconds).  Tables are written one after another,
//! separated by a blank line, each with its own header row.

use std::io::Write;

use csv::Writer;

use crate::{CsvTable, OutputResult};

pub fn write_tables(out: &mut dyn Write, tables: &[CsvTable]) -> OutputResult<()> {
    for (i, table) in tables.iter().enumerate() {
        if i > 0 {
            out.write_all(b"\n")?;
        }
        let mut w = Writer::from_writer(&mut *out);
        w.write_record(&table.header)?;
        for row in &table.rows {
            w.write_record(row)?;
        }
        w.flush()?;
    }
    Ok(())
}

/// Cell text for an optional number; empty when absent.
pub(crate) fn cell(value: Option<f64>) -> String {
    value.map(|v| format!("{:.1}", v)).unwrap_or_default()
}
