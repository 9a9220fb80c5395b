//! Spreadsheet (.xlsx) row reader.

use std::path::Path;

use calamine::{Data, Reader};

use kbforge_shared::{KbForgeError, Result};

// ---------------------------------------------------------------------------
// SpreadsheetRow
// ---------------------------------------------------------------------------

/// One data row, keyed by the sheet's header row.
///
/// Column order is preserved. Lookups fail closed: a column absent from the
/// header yields the empty string, never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetRow {
    columns: Vec<(String, String)>,
}

impl SpreadsheetRow {
    pub fn new(columns: Vec<(String, String)>) -> Self {
        Self { columns }
    }

    /// The trimmed value under `column`, or `""` when the column is missing.
    pub fn get(&self, column: &str) -> &str {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.trim())
            .unwrap_or("")
    }

    /// All `(column, value)` cells in sheet order.
    pub fn cells(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// True when every cell value is empty after trimming.
    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(|(_, value)| value.trim().is_empty())
    }
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Read an `.xlsx` file and return its data rows across all sheets.
///
/// The first row of each sheet is its header; every following row becomes a
/// [`SpreadsheetRow`] keyed by those headers. Rows whose cells are all empty
/// are skipped.
pub fn read_rows(path: &Path) -> Result<Vec<SpreadsheetRow>> {
    let mut workbook = calamine::open_workbook_auto(path)
        .map_err(|e| KbForgeError::extract(format!("{}: {e}", path.display())))?;

    let mut rows = Vec::new();
    for sheet_name in workbook.sheet_names().to_vec() {
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| KbForgeError::extract(format!("{}: {sheet_name}: {e}", path.display())))?;

        let mut sheet_rows = range.rows();
        let Some(header_row) = sheet_rows.next() else {
            continue;
        };
        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| render_cell(cell).trim().to_string())
            .collect();

        for row in sheet_rows {
            let columns: Vec<(String, String)> = headers
                .iter()
                .cloned()
                .zip(row.iter().map(render_cell))
                .collect();

            let parsed = SpreadsheetRow::new(columns);
            if !parsed.is_empty() {
                rows.push(parsed);
            }
        }
    }

    tracing::debug!(path = %path.display(), count = rows.len(), "read xlsx rows");
    Ok(rows)
}

/// Render any cell value as text. Empty and error cells become `""`.
fn render_cell(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        _ => String::new(),
    }
}
