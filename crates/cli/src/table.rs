// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Column-aligned text tables.

use std::io::Write;

use crate::color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Plain,
    Muted,
    Status,
}

#[derive(Debug, Clone)]
pub struct Column {
    title: &'static str,
    style: Style,
    max: Option<usize>,
}

impl Column {
    pub fn left(title: &'static str) -> Self {
        Self { title, style: Style::Plain, max: None }
    }

    pub fn muted(title: &'static str) -> Self {
        Self { title, style: Style::Muted, max: None }
    }

    /// Cells are colored by [`color::status`].
    pub fn status(title: &'static str) -> Self {
        Self { title, style: Style::Status, max: None }
    }

    /// Truncate cells longer than `max` characters.
    pub fn with_max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    fn fit(&self, cell: &str) -> String {
        match self.max {
            Some(max) if cell.chars().count() > max => {
                let kept: String = cell.chars().take(max.saturating_sub(1)).collect();
                format!("{}…", kept)
            }
            _ => cell.to_string(),
        }
    }

    fn paint(&self, cell: &str) -> String {
        match self.style {
            Style::Plain => cell.to_string(),
            Style::Muted => color::muted(cell),
            Style::Status => color::status(cell),
        }
    }
}

pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    /// Add a row. Missing cells render empty; extra cells are dropped.
    pub fn row(&mut self, cells: Vec<String>) {
        let fitted = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| col.fit(cells.get(i).map(String::as_str).unwrap_or("")))
            .collect();
        self.rows.push(fitted);
    }

    pub fn render(&self, out: &mut dyn Write) {
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let cells = self.rows.iter().map(|r| r[i].chars().count());
                cells.chain([col.title.len()]).max().unwrap_or(0)
            })
            .collect();

        let last = self.columns.len().saturating_sub(1);
        let header: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| pad(&color::header(col.title), col.title.len(), widths[i], i == last))
            .collect();
        let _ = writeln!(out, "{}", header.join("  "));

        for row in &self.rows {
            let line: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let col = &self.columns[i];
                    pad(&col.paint(cell), cell.chars().count(), widths[i], i == last)
                })
                .collect();
            let _ = writeln!(out, "{}", line.join("  "));
        }
    }
}

/// Pad `painted` (whose visible length is `len`) to `width`. The last column
/// is not padded so lines carry no trailing spaces.
fn pad(painted: &str, len: usize, width: usize, last: bool) -> String {
    if last {
        painted.to_string()
    } else {
        format!("{}{}", painted, " ".repeat(width.saturating_sub(len)))
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
