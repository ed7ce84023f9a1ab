//! The [`Report`] trait and the format dispatcher.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde_json::Value;

use crate::{Format, OutputError, OutputResult};

/// One table of a CSV rendering.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CsvTable {
    pub header: Vec<String>,
    pub rows:   Vec<Vec<String>>,
}

impl CsvTable {
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CsvTable { header: header.into_iter().map(Into::into).collect(), rows: Vec::new() }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
}

/// A renderable query result.
///
/// Text and JSON are mandatory; GeoJSON and CSV are opt-in.
pub trait Report {
    /// Short result name used in error messages, e.g. `"route"`.
    fn name(&self) -> &'static str;

    fn write_text(&self, out: &mut dyn Write) -> io::Result<()>;

    fn to_json(&self) -> Value;

    fn to_geojson(&self) -> Option<Value> {
        None
    }

    fn csv_tables(&self) -> Option<Vec<CsvTable>> {
        None
    }
}

/// Render `report` as `format` into `out`.
pub fn render(report: &dyn Report, format: Format, out: &mut dyn Write) -> OutputResult<()> {
    let unsupported = || OutputError::Unsupported { format, what: report.name() };
    match format {
        Format::Text => report.write_text(out)?,
        Format::Json => write_json(out, &report.to_json())?,
        Format::GeoJson => write_json(out, &report.to_geojson().ok_or_else(unsupported)?)?,
        Format::Csv => crate::csv::write_tables(out, &report.csv_tables().ok_or_else(unsupported)?)?,
    }
    Ok(())
}

/// Render into a file, creating or truncating it.
///
/// The file is left untouched when rendering fails.
pub fn render_to_path(report: &dyn Report, format: Format, path: &Path) -> OutputResult<()> {
    let mut buf = Vec::new();
    render(report, format, &mut buf)?;
    fs::write(path, buf)?;
    Ok(())
}

pub fn render_to_string(report: &dyn Report, format: Format) -> OutputResult<String> {
    let mut buf = Vec::new();
    render(report, format, &mut buf)?;
    // Every backend writes UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn write_json(out: &mut dyn Write, value: &Value) -> OutputResult<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    out.write_all(b"\n")?;
    Ok(())
}
