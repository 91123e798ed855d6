//! Source record models
//!
//! Statically declared schemas for the three inputs (HMLR titles, ROE
//! entities, exclusion rows) and the normalized record the core works on.
//! Column-name lookups happen once, in the adapters; from here on every field
//! is a named struct member.

use super::ids::{CanonicalKey, SourceId};
use serde::Serialize;

/// Fields shared by every proprietor on a land title
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TitleDetails {
    /// Land Registry title number (required)
    pub title_number: String,

    /// Freehold / Leasehold
    pub tenure: String,

    /// Address of the registered property
    pub property_address: String,

    /// Local authority district
    pub district: String,

    /// County
    pub county: String,

    /// Region
    pub region: String,

    /// Price paid, as printed in the extract
    pub price_paid: String,

    /// Date the proprietor was added or updated
    pub date_proprietor_added: String,

    /// Date of the monthly extract
    pub extract_date: String,
}

/// One proprietor slot of a title row
///
/// A slot whose name is absent, blank or a null sentinel is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProprietorSlot {
    /// Proprietor name
    pub name: Option<String>,

    /// First address line
    pub address_1: String,

    /// Second address line
    pub address_2: String,

    /// Third address line
    pub address_3: String,
}

impl ProprietorSlot {
    /// Slot holding only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// A wide HMLR extract row: shared title details plus a bounded list of
/// proprietor slots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleRow {
    /// Shared title fields
    pub details: TitleDetails,

    /// Proprietor slots, slot 1 first
    pub proprietors: Vec<ProprietorSlot>,
}

impl TitleRow {
    /// Creates a new builder for constructing a TitleRow
    pub fn builder(title_number: impl Into<String>) -> TitleRowBuilder {
        TitleRowBuilder::new(title_number)
    }
}

/// Builder for constructing TitleRow instances
#[derive(Debug, Default)]
pub struct TitleRowBuilder {
    row: TitleRow,
}

impl TitleRowBuilder {
    /// Creates a new TitleRowBuilder for the given title number
    pub fn new(title_number: impl Into<String>) -> Self {
        let mut row = TitleRow::default();
        row.details.title_number = title_number.into();
        Self { row }
    }

    /// Sets the tenure
    pub fn tenure(mut self, tenure: impl Into<String>) -> Self {
        self.row.details.tenure = tenure.into();
        self
    }

    /// Sets the property address
    pub fn property_address(mut self, address: impl Into<String>) -> Self {
        self.row.details.property_address = address.into();
        self
    }

    /// Sets the region
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.row.details.region = region.into();
        self
    }

    /// Appends a proprietor slot holding `name` (None for a null cell)
    pub fn proprietor(mut self, name: Option<&str>) -> Self {
        self.row.proprietors.push(ProprietorSlot {
            name: name.map(str::to_string),
            ..ProprietorSlot::default()
        });
        self
    }

    /// Appends a fully populated proprietor slot
    pub fn slot(mut self, slot: ProprietorSlot) -> Self {
        self.row.proprietors.push(slot);
        self
    }

    /// Builds the TitleRow
    pub fn build(self) -> TitleRow {
        self.row
    }
}

/// One proprietor of one title, after expansion of the wide row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Proprietor {
    /// 1-based slot the proprietor came from
    pub slot: usize,

    /// Copied title details
    #[serde(flatten)]
    pub details: TitleDetails,

    /// Proprietor name as written in the extract
    pub proprietor_name: String,

    /// First proprietor address line
    pub proprietor_address_1: String,

    /// Second proprietor address line
    pub proprietor_address_2: String,

    /// Third proprietor address line
    pub proprietor_address_3: String,
}

/// An entity on the Register of Overseas Entities
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoeEntity {
    /// Companies House incorporation number (required)
    pub incorporation_number: String,

    /// Registered name of the overseas entity
    pub corporate_body_name: String,

    /// Date the entity was registered
    pub incorporation_date: String,
}

impl RoeEntity {
    /// Convenience constructor
    pub fn new(incorporation_number: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            incorporation_number: incorporation_number.into(),
            corporate_body_name: name.into(),
            incorporation_date: String::new(),
        }
    }
}

/// A row of the curated exclusion list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionRow {
    /// Entity name as written in the HMLR datasets
    pub entity_name: Option<String>,
}

impl ExclusionRow {
    /// Convenience constructor
    pub fn new(entity_name: impl Into<String>) -> Self {
        Self {
            entity_name: Some(entity_name.into()),
        }
    }
}

/// A record admitted to the matching key space
///
/// Built only through
/// [`NameNormalizer::record`](crate::core::normalize::NameNormalizer::record),
/// which guarantees the canonical key is derived from the display name and is
/// never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord<A> {
    source_id: SourceId,
    display_name: String,
    canonical_key: CanonicalKey,
    attributes: A,
}

impl<A> NormalizedRecord<A> {
    pub(crate) fn from_parts(
        source_id: SourceId,
        display_name: String,
        canonical_key: CanonicalKey,
        attributes: A,
    ) -> Self {
        Self {
            source_id,
            display_name,
            canonical_key,
            attributes,
        }
    }

    /// Identifier within the source dataset
    pub fn source_id(&self) -> &SourceId {
        &self.source_id
    }

    /// Name as it appeared in the source
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Matching key derived from the display name
    pub fn canonical_key(&self) -> &CanonicalKey {
        &self.canonical_key
    }

    /// Auxiliary source fields
    pub fn attributes(&self) -> &A {
        &self.attributes
    }

    /// Mutable access to the auxiliary fields; the name and key stay fixed
    pub fn attributes_mut(&mut self) -> &mut A {
        &mut self.attributes
    }
}
