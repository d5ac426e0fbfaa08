//! Result rendering: box-drawn tables, JSON and CSV
//!
//! Every command turns its results into flat [`Row`] values so that the
//! three formats stay column-compatible.

use std::io::Write;

use clap::ValueEnum;
use serde::Serialize;

use crate::Result;

/// Output format selected with `--format`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// One flat output record
pub trait Row: Serialize {
    /// Column titles, in the order of [`cells`](Row::cells)
    fn headers() -> &'static [&'static str];

    /// Formatted table cells
    fn cells(&self) -> Vec<String>;
}

/// Write a list of records to stdout
pub fn write_rows<R: Row>(format: OutputFormat, rows: &[R]) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Table => out.write_all(render_table(R::headers(), rows).as_bytes())?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, rows)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => write_csv(&mut out, rows)?,
    }
    Ok(())
}

/// Write a single record to stdout; JSON output is an object, not a list
pub fn write_record<R: Row>(format: OutputFormat, row: &R) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            serde_json::to_writer_pretty(&mut out, row)?;
            writeln!(out)?;
            Ok(())
        }
        _ => write_rows(format, std::slice::from_ref(row)),
    }
}

fn write_csv<W: Write, R: Row>(out: W, rows: &[R]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Render rows as a box-drawn table
pub fn render_table<R: Row>(headers: &[&str], rows: &[R]) -> String {
    let cells: Vec<Vec<String>> = rows.iter().map(Row::cells).collect();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}\n", left, segments.join(mid), right)
    };
    let line = |values: Vec<&str>| {
        let padded: Vec<String> = values
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!(" {:>width$} ", v, width = w))
            .collect();
        format!("│{}│\n", padded.join("│"))
    };

    let mut table = rule("┌", "┬", "┐");
    table.push_str(&line(headers.to_vec()));
    table.push_str(&rule("├", "┼", "┤"));
    for row in &cells {
        table.push_str(&line(row.iter().map(String::as_str).collect()));
    }
    table.push_str(&rule("└", "┴", "┘"));
    table
}

/// Fixed six-decimal formatting used by table cells
pub fn num(value: f64) -> String {
    format!("{:.6}", value)
}
