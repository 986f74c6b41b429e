// src/table.rs

use tracing::warn;

use crate::error::{ReadError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// Column names, split from the first line.
    pub headers: Vec<String>,
    /// Each following line, as a Vec of Strings (one per cell). Short lines stay short.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Split the response text into header cells and data cells.
    ///
    /// Lines are separated on `\n`; one trailing empty line is dropped and a
    /// trailing `\r` is stripped from every line. Cells are a naive split on
    /// `,` with no quoting support.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines: Vec<&str> = text.split('\n').collect();
        if lines.last() == Some(&"") {
            lines.pop();
        }

        let mut iter = lines.into_iter().map(|l| l.strip_suffix('\r').unwrap_or(l));
        let header_line = iter.next().ok_or(ReadError::Empty)?;
        let headers = split_cells(header_line);

        let rows: Vec<Vec<String>> = iter.map(split_cells).collect();

        let short = rows.iter().filter(|r| r.len() < headers.len()).count();
        if short > 0 {
            warn!(
                short,
                columns = headers.len(),
                "some rows have fewer cells than headers"
            );
        }

        Ok(Self { headers, rows })
    }

    /// Raw cell at `col` for `row`, `None` if the line was too short.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Every row's raw value for column `col`, in row order.
    pub fn column(&self, col: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        self.rows
            .iter()
            .map(move |r| r.get(col).map(String::as_str))
    }
}

fn split_cells(line: &str) -> Vec<String> {
    line.split(',').map(str::to_string).collect()
}
