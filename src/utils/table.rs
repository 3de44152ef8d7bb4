//! Table rendering utilities for CLI outputs.

use crate::utils::formatting::{pad_left, pad_right};
use unicode_width::UnicodeWidthStr;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

pub struct Column {
    pub header: String,
    pub align: Align,
}

impl Column {
    pub fn left(header: &str) -> Self {
        Self {
            header: header.to_string(),
            align: Align::Left,
        }
    }

    pub fn right(header: &str) -> Self {
        Self {
            header: header.to_string(),
            align: Align::Right,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| UnicodeWidthStr::width(c.as_str()))
                    .chain(std::iter::once(UnicodeWidthStr::width(col.header.as_str())))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    fn render_line(&self, cells: &[String], widths: &[usize]) -> String {
        let line: Vec<String> = self
            .columns
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(i, (col, w))| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                match col.align {
                    Align::Left => pad_right(cell, *w),
                    Align::Right => pad_left(cell, *w),
                }
            })
            .collect();
        line.join("  ").trim_end().to_string()
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let headers: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();

        let mut out = self.render_line(&headers, &widths);
        out.push('\n');
        out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));
        out.push('\n');

        for row in &self.rows {
            out.push_str(&self.render_line(row, &widths));
            out.push('\n');
        }

        out
    }
}
