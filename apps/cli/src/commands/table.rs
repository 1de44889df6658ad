//! Plain-text tables for the list commands.

use std::fmt::Write;

/// Rows of cells rendered with left-aligned, padded columns.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// A type that can be shown as one table row.
pub trait TableRow {
    fn headers() -> &'static [&'static str];
    fn cells(&self) -> Vec<String>;
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Table {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Builds a table from any iterator of rows.
    pub fn from_rows<'a, T, I>(items: I) -> Self
    where
        T: TableRow + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut table = Table::new(T::headers());
        for item in items {
            table.push(item.cells());
        }
        table
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let columns = self.headers.len();
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().take(columns).enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let mut out = String::new();
        write_line(&mut out, &self.headers, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_line(&mut out, &rule, &widths);
        for row in &self.rows {
            write_line(&mut out, row, &widths);
        }
        out
    }
}

fn write_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (i, width) in widths.iter().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        if i > 0 {
            line.push_str("  ");
        }
        // `{:<width$}` pads by chars, so accented names line up
        let _ = write!(line, "{:<width$}", cell, width = width);
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
