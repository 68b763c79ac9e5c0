//! Uploaded workbook decoding.
//!
//! Both import surfaces (SAP ledger lines, bulk project masters) accept a
//! header-row workbook. This module reads the first worksheet and exposes
//! rows as header-keyed string cells; all business parsing stays in
//! `opexhub_core::ingest`.

use std::collections::HashMap;
use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use thiserror::Error;

use opexhub_shared::AppError;

/// Error types for workbook decoding.
#[derive(Debug, Error)]
pub enum SheetError {
    /// The upload could not be read as a workbook.
    #[error("failed to read workbook: {0}")]
    Workbook(String),

    /// The workbook has no sheets.
    #[error("workbook has no sheets")]
    NoSheet,
}

impl From<SheetError> for AppError {
    fn from(err: SheetError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// A decoded worksheet: header row plus data rows.
#[derive(Debug)]
pub struct Sheet {
    headers: Vec<String>,
    header_index: HashMap<String, usize>,
    rows: Vec<Vec<Data>>,
}

impl Sheet {
    /// Decodes the first worksheet of an uploaded workbook (`.xlsx`/`.xls`).
    pub fn parse(bytes: &[u8]) -> Result<Self, SheetError> {
        let cursor = Cursor::new(bytes.to_vec());
        let mut workbook = open_workbook_auto_from_rs(cursor)
            .map_err(|e| SheetError::Workbook(e.to_string()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(SheetError::NoSheet)?
            .map_err(|e| SheetError::Workbook(e.to_string()))?;

        let mut row_iter = range.rows();
        let headers: Vec<String> = row_iter
            .next()
            .map(|row| {
                row.iter()
                    .map(|cell| cell_text(cell).unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default();
        let header_index = headers
            .iter()
            .enumerate()
            .map(|(index, name)| (name.clone(), index))
            .collect();
        let rows = row_iter.map(<[Data]>::to_vec).collect();

        Ok(Self {
            headers,
            header_index,
            rows,
        })
    }

    /// The header row, in column order.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Iterates the data rows.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(|cells| Row { sheet: self, cells })
    }
}

/// One data row, addressed by header name.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    sheet: &'a Sheet,
    cells: &'a [Data],
}

impl Row<'_> {
    /// The trimmed text of a cell, `None` when the column is missing or the
    /// cell is empty.
    #[must_use]
    pub fn text(&self, column: &str) -> Option<String> {
        let index = *self.sheet.header_index.get(column)?;
        self.cells.get(index).and_then(cell_text)
    }
}

/// Renders one cell as trimmed text. Numeric cells use their display form
/// (integral floats print without a fraction), date cells render ISO dates.
fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.format("%Y-%m-%d").to_string())?,
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
    };
    if text.is_empty() { None } else { Some(text) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text_shapes() {
        assert_eq!(cell_text(&Data::String("  A-001 ".into())), Some("A-001".into()));
        assert_eq!(cell_text(&Data::Float(202501.0)), Some("202501".into()));
        assert_eq!(cell_text(&Data::Int(3)), Some("3".into()));
        assert_eq!(cell_text(&Data::Empty), None);
        assert_eq!(cell_text(&Data::String("   ".into())), None);
    }
}
