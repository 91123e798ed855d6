//! Tabular file reader
//!
//! Reads CSV files and Excel-family workbooks into a [`Table`] of string
//! cells. This is the only place where columns are looked up by name; the
//! source adapters resolve their columns once and produce typed rows.

use crate::domain::errors::ReconError;
use crate::domain::Result;
use calamine::{open_workbook_auto, Data, Reader};
use std::io::Read;
use std::path::Path;

/// A header row plus data rows, all cells rendered as strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table; headers are trimmed and lower-cased
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            headers: headers.iter().map(|h| h.trim().to_lowercase()).collect(),
            rows,
        }
    }

    /// Normalized header names
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows, header excluded
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when there are no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column, matched case-insensitively
    pub fn column(&self, name: &str) -> Option<usize> {
        let name = name.trim().to_lowercase();
        self.headers.iter().position(|h| *h == name)
    }

    /// Index of the first of `names` that is present
    pub fn column_any(&self, names: &[&str]) -> Option<usize> {
        names.iter().find_map(|name| self.column(name))
    }

    /// Index of a column that must be present
    ///
    /// # Errors
    ///
    /// Returns [`ReconError::Schema`] naming the dataset and column.
    pub fn require_column(&self, dataset: &str, name: &str) -> Result<usize> {
        self.column(name).ok_or_else(|| {
            ReconError::Schema(format!("{dataset} input is missing required column '{name}'"))
        })
    }

    /// A cell's text, empty when the row is short
    pub fn cell(row: &[String], index: usize) -> &str {
        row.get(index).map(String::as_str).unwrap_or("")
    }

    /// A cell's text, `None` when empty or missing
    pub fn optional_cell(row: &[String], index: usize) -> Option<&str> {
        Some(Self::cell(row, index)).filter(|s| !s.trim().is_empty())
    }
}

/// Read a table, choosing the parser from the file extension
///
/// # Errors
///
/// Returns [`ReconError::Schema`] for unsupported extensions and whatever the
/// underlying reader reports otherwise.
pub fn read_table(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let table = match extension.as_str() {
        "csv" => read_csv(path)?,
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => read_workbook(path)?,
        other => {
            return Err(ReconError::Schema(format!(
                "Unsupported input format '{}' for {}",
                other,
                path.display()
            )))
        }
    };

    tracing::info!(
        path = %path.display(),
        rows = table.len(),
        columns = table.headers().len(),
        "Loaded input table"
    );

    Ok(table)
}

/// Read a CSV file with a header row
pub fn read_csv(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).map_err(|e| {
        ReconError::Io(format!("Failed to open {}: {}", path.display(), e))
    })?;
    read_csv_from_reader(file)
}

/// Read CSV data with a header row from any reader
pub fn read_csv_from_reader<R: Read>(reader: R) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table::new(headers, rows))
}

/// Read the first worksheet of a workbook; its first row is the header
pub fn read_workbook(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| ReconError::Workbook(format!("Failed to open {}: {}", path.display(), e)))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ReconError::Workbook(format!("{} contains no sheets", path.display())))?;

    let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
        ReconError::Workbook(format!("Failed to read sheet '{}': {}", sheet_name, e))
    })?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(render_cell).collect(),
        None => Vec::new(),
    };
    let rows: Vec<Vec<String>> = rows
        .map(|row| row.iter().map(render_cell).collect())
        .collect();

    Ok(Table::new(headers, rows))
}

fn render_cell(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => {
            // Integers without decimals
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{n}")
            }
        }
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| format!("{}", dt.as_f64())),
        // #N/A and friends read as empty cells
        Data::Error(_) => String::new(),
        other => other.to_string(),
    }
}
