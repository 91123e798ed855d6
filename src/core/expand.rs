//! Wide-row expansion
//!
//! An HMLR extract row carries up to N proprietors in indexed sibling columns
//! (`proprietor_name_1..4`). [`RowExpander`] turns such a row into one owned
//! record per populated slot, copying the shared title fields into each.

use crate::domain::errors::ReconError;
use crate::domain::records::{Proprietor, ProprietorSlot, TitleRow};
use crate::domain::Result;

/// Default number of proprietor slots in an HMLR extract row
pub const DEFAULT_SLOT_COUNT: usize = 4;

/// Default cell values that mean "no name here"
pub const DEFAULT_NULL_SENTINELS: &[&str] = &["nan", "null", "none", "n/a", "#n/a"];

/// A row holding a bounded list of repeated slot groups
pub trait SlottedRow {
    /// One slot group
    type Slot;

    /// The record produced for a populated slot
    type Output;

    /// Check the row's shared fields; `row_number` is 1-based
    fn validate(&self, row_number: usize) -> Result<()>;

    /// Slots in index order, slot 1 first
    fn slots(&self) -> &[Self::Slot];

    /// The slot's name field, if any
    fn slot_name(slot: &Self::Slot) -> Option<&str>;

    /// Build the owned record for slot `index` (1-based)
    fn candidate(&self, index: usize, slot: &Self::Slot) -> Self::Output;
}

impl SlottedRow for TitleRow {
    type Slot = ProprietorSlot;
    type Output = Proprietor;

    fn validate(&self, row_number: usize) -> Result<()> {
        if self.details.title_number.trim().is_empty() {
            return Err(ReconError::malformed(
                "hmlr",
                row_number,
                "title_number is blank",
            ));
        }
        Ok(())
    }

    fn slots(&self) -> &[ProprietorSlot] {
        &self.proprietors
    }

    fn slot_name(slot: &ProprietorSlot) -> Option<&str> {
        slot.name.as_deref()
    }

    fn candidate(&self, index: usize, slot: &ProprietorSlot) -> Proprietor {
        Proprietor {
            slot: index,
            details: self.details.clone(),
            proprietor_name: slot.name.clone().unwrap_or_default(),
            proprietor_address_1: slot.address_1.clone(),
            proprietor_address_2: slot.address_2.clone(),
            proprietor_address_3: slot.address_3.clone(),
        }
    }
}

/// Expands slotted rows into one record per populated slot
#[derive(Debug, Clone)]
pub struct RowExpander {
    slot_count: usize,
    null_sentinels: Vec<String>,
}

impl RowExpander {
    /// Create an expander reading at most `slot_count` slots per row
    ///
    /// Sentinels are compared case-insensitively against the trimmed name.
    pub fn new(slot_count: usize, null_sentinels: &[String]) -> Self {
        Self {
            slot_count,
            null_sentinels: null_sentinels
                .iter()
                .map(|s| s.trim().to_lowercase())
                .collect(),
        }
    }

    /// Number of slots read per row
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Whether a slot name counts as empty
    pub fn is_blank(&self, name: Option<&str>) -> bool {
        match name.map(str::trim) {
            None => true,
            Some("") => true,
            Some(name) => {
                let lowered = name.to_lowercase();
                self.null_sentinels.iter().any(|s| *s == lowered)
            }
        }
    }

    /// Lazily expand one row
    ///
    /// Yields slots `1..=slot_count` in order, skipping blank ones. Slots the
    /// row does not carry are absent. The row itself is never modified.
    ///
    /// # Errors
    ///
    /// Returns [`ReconError::MalformedRecord`] if the row's shared fields fail
    /// validation.
    pub fn expand<'a, R>(
        &'a self,
        row: &'a R,
        row_number: usize,
    ) -> Result<impl Iterator<Item = R::Output> + 'a>
    where
        R: SlottedRow + 'a,
    {
        row.validate(row_number)?;

        Ok(row
            .slots()
            .iter()
            .take(self.slot_count)
            .enumerate()
            .filter(move |(_, slot)| !self.is_blank(R::slot_name(slot)))
            .map(move |(i, slot)| row.candidate(i + 1, slot)))
    }

    /// Expand a whole extract, rows in input order
    ///
    /// # Errors
    ///
    /// Stops at the first malformed row.
    pub fn expand_all<R: SlottedRow>(&self, rows: &[R]) -> Result<Vec<R::Output>> {
        let mut expanded = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            expanded.extend(self.expand(row, i + 1)?);
        }

        tracing::debug!(
            rows = rows.len(),
            records = expanded.len(),
            slot_count = self.slot_count,
            "Expanded slotted rows"
        );

        Ok(expanded)
    }
}

impl Default for RowExpander {
    fn default() -> Self {
        let sentinels: Vec<String> = DEFAULT_NULL_SENTINELS.iter().map(|s| s.to_string()).collect();
        Self::new(DEFAULT_SLOT_COUNT, &sentinels)
    }
}
