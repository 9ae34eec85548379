// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Table renderer for list views.
//!
//! Widths are counted in characters. Color is applied after padding so
//! escape codes never count toward a column's width.

use std::io::Write;

use crate::color;

pub enum Align {
    Left,
    Right,
}

/// How a cell's text is styled after padding.
pub enum CellStyle {
    Plain,
    Muted,
    /// Colored by workspace status, see [`color::status`].
    Status,
}

pub struct Column {
    pub name: &'static str,
    pub align: Align,
    pub style: CellStyle,
    /// The header width is always a floor.
    pub min_width: Option<usize>,
    /// Longer values are cut and end in `…`.
    pub max_width: Option<usize>,
}

impl Column {
    fn new(name: &'static str, align: Align, style: CellStyle) -> Self {
        Self {
            name,
            align,
            style,
            min_width: None,
            max_width: None,
        }
    }

    pub fn left(name: &'static str) -> Self {
        Self::new(name, Align::Left, CellStyle::Plain)
    }

    pub fn right(name: &'static str) -> Self {
        Self::new(name, Align::Right, CellStyle::Plain)
    }

    pub fn muted(name: &'static str) -> Self {
        Self::new(name, Align::Left, CellStyle::Muted)
    }

    pub fn status(name: &'static str) -> Self {
        Self::new(name, Align::Left, CellStyle::Status)
    }

    pub fn with_max(mut self, max: usize) -> Self {
        self.max_width = Some(max);
        self
    }

    pub fn with_min(mut self, min: usize) -> Self {
        self.min_width = Some(min);
        self
    }
}

pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
    colorize: bool,
}

const SEP: &str = "  ";

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self::with_color(columns, color::should_colorize())
    }

    pub fn with_color(columns: Vec<Column>, colorize: bool) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            colorize,
        }
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header plus rows. An empty table renders nothing. A left-aligned
    /// last column is never padded.
    pub fn render(&self, out: &mut impl Write) -> std::io::Result<()> {
        if self.is_empty() {
            return Ok(());
        }
        let widths = self.compute_widths();
        let last = self.columns.len().saturating_sub(1);

        let header: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let padded = fit(col.name, widths[i], col, i == last);
                if self.colorize {
                    color::apply_header(&padded)
                } else {
                    padded
                }
            })
            .collect();
        writeln!(out, "{}", header.join(SEP))?;

        for row in &self.rows {
            let cells: Vec<String> = self
                .columns
                .iter()
                .enumerate()
                .map(|(i, col)| {
                    let raw = row.get(i).map(String::as_str).unwrap_or("");
                    let padded = fit(&truncate(raw, col.max_width), widths[i], col, i == last);
                    stylize(&padded, &col.style, self.colorize)
                })
                .collect();
            writeln!(out, "{}", cells.join(SEP))?;
        }
        Ok(())
    }

    fn compute_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let data = self
                    .rows
                    .iter()
                    .map(|row| {
                        let len = row.get(i).map_or(0, |s| s.chars().count());
                        col.max_width.map_or(len, |max| len.min(max))
                    })
                    .max()
                    .unwrap_or(0);
                col.name
                    .chars()
                    .count()
                    .max(col.min_width.unwrap_or(0))
                    .max(data)
            })
            .collect()
    }
}

fn fit(text: &str, width: usize, col: &Column, is_last: bool) -> String {
    match col.align {
        Align::Left if is_last => text.to_string(),
        Align::Left => format!("{text:<width$}"),
        Align::Right => format!("{text:>width$}"),
    }
}

fn truncate(s: &str, max: Option<usize>) -> String {
    match max {
        Some(max) if max > 0 && s.chars().count() > max => {
            let mut cut: String = s.chars().take(max - 1).collect();
            cut.push('…');
            cut
        }
        _ => s.to_string(),
    }
}

fn stylize(text: &str, style: &CellStyle, colorize: bool) -> String {
    if !colorize {
        return text.to_string();
    }
    match style {
        CellStyle::Plain => text.to_string(),
        CellStyle::Muted => color::apply_muted(text),
        CellStyle::Status => color::apply_status(text),
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
