//! HMLR overseas-companies extract reader
//!
//! Maps the wide extract table onto [`TitleRow`]s. Proprietor slots are read
//! as `proprietor_name_{i}` plus `proprietor_{i}_address_{1..3}` for
//! `i` in `1..=slot_count`; slots whose name column is absent are skipped.

use super::table::{read_table, Table};
use crate::domain::records::{ProprietorSlot, TitleDetails, TitleRow};
use crate::domain::Result;
use std::path::Path;

const DATASET: &str = "hmlr";

/// Accepted headers for the proprietor-added date; the published extract
/// spells it "proprieter"
const DATE_ADDED_COLUMNS: &[&str] = &[
    "date_proprieter_added_updated",
    "date_proprietor_added_updated",
    "date_proprietor_added",
];

struct SlotColumns {
    name: usize,
    addresses: [Option<usize>; 3],
}

struct TitleColumns {
    title_number: usize,
    tenure: usize,
    property_address: usize,
    district: usize,
    county: usize,
    region: usize,
    price_paid: usize,
    date_proprietor_added: Option<usize>,
    extract_date: usize,
    slots: Vec<SlotColumns>,
}

impl TitleColumns {
    fn resolve(table: &Table, slot_count: usize) -> Result<Self> {
        let mut slots = Vec::new();
        for i in 1..=slot_count {
            let Some(name) = table.column(&format!("proprietor_name_{i}")) else {
                continue;
            };
            let addresses = [1, 2, 3].map(|n| table.column(&format!("proprietor_{i}_address_{n}")));
            slots.push(SlotColumns { name, addresses });
        }
        if slots.is_empty() {
            // Report the first slot as the missing column
            table.require_column(DATASET, "proprietor_name_1")?;
        }

        let date_proprietor_added = table.column_any(DATE_ADDED_COLUMNS);
        if date_proprietor_added.is_none() {
            tracing::warn!("HMLR input has no proprietor-added date column");
        }

        Ok(Self {
            title_number: table.require_column(DATASET, "title_number")?,
            tenure: table.require_column(DATASET, "tenure")?,
            property_address: table.require_column(DATASET, "property_address")?,
            district: table.require_column(DATASET, "district")?,
            county: table.require_column(DATASET, "county")?,
            region: table.require_column(DATASET, "region")?,
            price_paid: table.require_column(DATASET, "price_paid")?,
            date_proprietor_added,
            extract_date: table.require_column(DATASET, "extract_date")?,
            slots,
        })
    }

    fn title_row(&self, row: &[String]) -> TitleRow {
        let text = |index: usize| Table::cell(row, index).trim().to_string();
        let details = TitleDetails {
            title_number: text(self.title_number),
            tenure: text(self.tenure),
            property_address: text(self.property_address),
            district: text(self.district),
            county: text(self.county),
            region: text(self.region),
            price_paid: text(self.price_paid),
            date_proprietor_added: self.date_proprietor_added.map(text).unwrap_or_default(),
            extract_date: text(self.extract_date),
        };

        let proprietors = self
            .slots
            .iter()
            .map(|slot| {
                let [a1, a2, a3] = slot.addresses.map(|c| c.map(text).unwrap_or_default());
                ProprietorSlot {
                    name: Table::optional_cell(row, slot.name).map(str::to_string),
                    address_1: a1,
                    address_2: a2,
                    address_3: a3,
                }
            })
            .collect();

        TitleRow {
            details,
            proprietors,
        }
    }
}

/// Map an already-read table onto title rows
///
/// # Errors
///
/// Returns [`ReconError::Schema`](crate::domain::ReconError::Schema) if a
/// shared column or every proprietor name column is missing.
pub fn titles_from_table(table: &Table, slot_count: usize) -> Result<Vec<TitleRow>> {
    let columns = TitleColumns::resolve(table, slot_count)?;
    tracing::debug!(slots = columns.slots.len(), "Resolved HMLR columns");
    Ok(table.rows().iter().map(|row| columns.title_row(row)).collect())
}

/// Read an HMLR extract file
pub fn read_titles(path: impl AsRef<Path>, slot_count: usize) -> Result<Vec<TitleRow>> {
    let table = read_table(path)?;
    titles_from_table(&table, slot_count)
}
