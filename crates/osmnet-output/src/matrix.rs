use std::io::{self, Write};

use osmnet_core::TravelMode;
use osmnet_route::DistanceMatrix;
use serde_json::{Value, json};

use crate::csv::cell;
use crate::geojson::{lat_lon, round1};
use crate::{CsvTable, Report};

/// Distance and time matrices.  Unreachable cells are `null` in JSON and
/// empty in CSV.
pub struct MatrixOutput<'a> {
    pub matrix: &'a DistanceMatrix,
    pub mode:   TravelMode,
}

impl MatrixOutput<'_> {
    fn labels(&self) -> Vec<String> {
        (1..=self.matrix.len()).map(|i| format!("P{i}")).collect()
    }

    fn rounded(rows: &[Vec<Option<f64>>]) -> Value {
        rows.iter()
            .map(|row| row.iter().map(|c| c.map(round1)).collect::<Vec<_>>())
            .collect::<Vec<_>>()
            .into()
    }

    fn write_grid<F>(&self, out: &mut dyn Write, rows: &[Vec<Option<f64>>], fmt_cell: F) -> io::Result<()>
    where
        F: Fn(f64) -> String,
    {
        let labels = self.labels();
        write!(out, "{:<12}", "From\\To")?;
        for l in &labels {
            write!(out, "{l:<12}")?;
        }
        writeln!(out)?;
        for (label, row) in labels.iter().zip(rows) {
            write!(out, "{label:<12}")?;
            for c in row {
                let text = c.map(&fmt_cell).unwrap_or_else(|| "N/A".to_owned());
                write!(out, "{text:<12}")?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

impl Report for MatrixOutput<'_> {
    fn name(&self) -> &'static str {
        "distance matrix"
    }

    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Distance Matrix ({}, optimised for {})", self.mode, self.matrix.optimize)?;
        writeln!(out, "{}", "=".repeat(60))?;
        for (i, p) in self.matrix.points.iter().enumerate() {
            let note = if self.matrix.vertices[i].is_none() { "  (no nearby road)" } else { "" };
            writeln!(out, "P{}: {p}{note}", i + 1)?;
        }
        writeln!(out)?;
        writeln!(out, "Distance (km)")?;
        self.write_grid(out, &self.matrix.distance_m, |m| format!("{:.2}", m / 1_000.0))?;
        writeln!(out)?;
        writeln!(out, "Time (min)")?;
        self.write_grid(out, &self.matrix.time_s, |s| format!("{:.1}", s / 60.0))
    }

    fn to_json(&self) -> Value {
        let points: Vec<Value> = self
            .matrix
            .points
            .iter()
            .zip(&self.matrix.vertices)
            .map(|(&p, v)| {
                let mut o = lat_lon(p);
                o["resolved"] = json!(v.is_some());
                o
            })
            .collect();
        json!({
            "mode": self.mode.as_str(),
            "optimize": self.matrix.optimize.as_str(),
            "points": points,
            "distance_matrix_m": Self::rounded(&self.matrix.distance_m),
            "time_matrix_s": Self::rounded(&self.matrix.time_s),
            "unreachable_pairs": self.matrix.unreachable_pairs(),
        })
    }

    fn csv_tables(&self) -> Option<Vec<CsvTable>> {
        let labels = self.labels();
        let table = |title: &str, rows: &[Vec<Option<f64>>]| {
            let mut t = CsvTable::new(std::iter::once(title.to_owned()).chain(labels.iter().cloned()));
            for (label, row) in labels.iter().zip(rows) {
                t.push(std::iter::once(label.clone()).chain(row.iter().map(|&c| cell(c))).collect());
            }
            t
        };
        Some(vec![
            table("Distance (m)", &self.matrix.distance_m),
            table("Time (s)", &self.matrix.time_s),
        ])
    }
}
