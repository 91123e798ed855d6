//! Register of Overseas Entities reader
//!
//! Reads a file export of the ROE query result. Connecting to the Companies
//! House database is out of scope; whatever produced the export must provide
//! the three columns below.

use super::table::{read_table, Table};
use crate::domain::records::RoeEntity;
use crate::domain::Result;
use std::path::Path;

const DATASET: &str = "roe";

/// Map an already-read table onto ROE entities
pub fn entities_from_table(table: &Table) -> Result<Vec<RoeEntity>> {
    let number = table.require_column(DATASET, "incorporation_number")?;
    let name = table.require_column(DATASET, "corporate_body_name")?;
    let date = table.require_column(DATASET, "incorporation_date")?;

    Ok(table
        .rows()
        .iter()
        .map(|row| RoeEntity {
            incorporation_number: Table::cell(row, number).trim().to_string(),
            corporate_body_name: Table::cell(row, name).to_string(),
            incorporation_date: Table::cell(row, date).trim().to_string(),
        })
        .collect())
}

/// Read a ROE export file
pub fn read_entities(path: impl AsRef<Path>) -> Result<Vec<RoeEntity>> {
    let table = read_table(path)?;
    entities_from_table(&table)
}
