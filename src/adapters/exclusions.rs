//! Curated exclusion list reader

use super::table::{read_table, Table};
use crate::domain::records::ExclusionRow;
use crate::domain::Result;
use std::path::Path;

/// Default header of the entity-name column
pub const DEFAULT_NAME_COLUMN: &str = "entity name (from hmlr datasets)";

/// Map an already-read table onto exclusion rows
pub fn exclusions_from_table(table: &Table, name_column: &str) -> Result<Vec<ExclusionRow>> {
    let column = table.require_column("exclusions", name_column)?;
    Ok(table
        .rows()
        .iter()
        .map(|row| ExclusionRow {
            entity_name: Table::optional_cell(row, column).map(str::to_string),
        })
        .collect())
}

/// Read an exclusion list file
pub fn read_exclusions(path: impl AsRef<Path>, name_column: &str) -> Result<Vec<ExclusionRow>> {
    let table = read_table(path)?;
    exclusions_from_table(&table, name_column)
}
