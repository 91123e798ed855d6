//! Set reconciliation over canonical keys
//!
//! Given the normalized HMLR proprietors (side A), the normalized ROE
//! entities (side B) and the exclusion set, [`reconcile`] works out which
//! unique keys are matched, excluded or unmatched on each side, and collects
//! every raw record behind an unmatched key for export.

use crate::core::normalize::NameNormalizer;
use crate::domain::errors::ReconError;
use crate::domain::ids::CanonicalKey;
use crate::domain::records::{ExclusionRow, NormalizedRecord};
use crate::domain::Result;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

/// Canonical keys deliberately left out of unmatched reporting
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    keys: HashSet<CanonicalKey>,
}

impl ExclusionSet {
    /// Create an empty exclusion set
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize the rows of a curated exclusion list
    ///
    /// Rows whose name is blank or normalizes to nothing are skipped.
    pub fn from_rows(rows: &[ExclusionRow], normalizer: &NameNormalizer) -> Self {
        Self::from_names(rows.iter().filter_map(|r| r.entity_name.as_deref()), normalizer)
    }

    /// Normalize free-text names into an exclusion set
    pub fn from_names<I, S>(names: I, normalizer: &NameNormalizer) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for name in names {
            set.insert_name(name, normalizer);
        }
        set
    }

    /// Normalize and add one name; returns false if it was blank or already present
    pub fn insert_name(&mut self, name: impl AsRef<str>, normalizer: &NameNormalizer) -> bool {
        let key = normalizer.normalize(name);
        if key.is_empty() {
            return false;
        }
        self.keys.insert(key)
    }

    /// Whether `key` is excluded
    pub fn contains(&self, key: &CanonicalKey) -> bool {
        self.keys.contains(key)
    }

    /// Number of distinct excluded keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True when nothing is excluded
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Partition counts for one side, over unique canonical keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SidePartition {
    /// Records on this side before de-duplication
    pub total_records: usize,

    /// Distinct canonical keys
    pub unique: usize,

    /// Unique keys also present on the opposite side
    pub matched: usize,

    /// Unique keys in the exclusion set
    pub excluded: usize,

    /// Unique keys absent from the opposite side and not excluded
    pub unmatched: usize,
}

/// Outcome of reconciling side A against side B
#[derive(Debug, Clone)]
pub struct ReconciliationResult<A, B> {
    /// Keys present on both sides and not excluded
    pub matched: BTreeSet<CanonicalKey>,

    /// Every side A record whose key is unmatched, sorted by key
    pub unmatched_side_a: Vec<NormalizedRecord<A>>,

    /// Every side B record whose key is unmatched, sorted by key
    pub unmatched_side_b: Vec<NormalizedRecord<B>>,

    /// Unique side A keys that were excluded
    pub excluded_a_count: usize,

    /// Unique side B keys that were excluded
    pub excluded_b_count: usize,

    /// Side A partition counts
    pub side_a: SidePartition,

    /// Side B partition counts
    pub side_b: SidePartition,
}

/// Stable first-seen de-duplication by canonical key
///
/// This is the "unique entity" view of one side.
pub fn dedup_first_seen<A>(records: &[NormalizedRecord<A>]) -> Vec<&NormalizedRecord<A>> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for record in records {
        if seen.insert(record.canonical_key()) {
            unique.push(record);
        }
    }
    unique
}

/// Reconcile two normalized sides against each other
///
/// # Errors
///
/// Returns [`ReconError::InvalidInput`] if either side is empty, so that "no
/// data" is never reported as a fully matched (or fully unmatched) run.
pub fn reconcile<A, B>(
    side_a: Vec<NormalizedRecord<A>>,
    side_b: Vec<NormalizedRecord<B>>,
    exclusions: &ExclusionSet,
) -> Result<ReconciliationResult<A, B>> {
    if side_a.is_empty() {
        return Err(ReconError::InvalidInput(
            "side A has no records after normalization".to_string(),
        ));
    }
    if side_b.is_empty() {
        return Err(ReconError::InvalidInput(
            "side B has no records after normalization".to_string(),
        ));
    }

    let keys_a = key_set(&side_a);
    let keys_b = key_set(&side_b);

    let (partition_a, matched, unmatched_side_a) = partition_side(side_a, &keys_b, exclusions);
    let (partition_b, _, unmatched_side_b) = partition_side(side_b, &keys_a, exclusions);

    tracing::info!(
        side_a_unique = partition_a.unique,
        side_a_unmatched = partition_a.unmatched,
        side_a_excluded = partition_a.excluded,
        side_b_unique = partition_b.unique,
        side_b_unmatched = partition_b.unmatched,
        side_b_excluded = partition_b.excluded,
        matched = matched.len(),
        "Reconciliation complete"
    );

    Ok(ReconciliationResult {
        matched,
        unmatched_side_a,
        unmatched_side_b,
        excluded_a_count: partition_a.excluded,
        excluded_b_count: partition_b.excluded,
        side_a: partition_a,
        side_b: partition_b,
    })
}

fn key_set<T>(records: &[NormalizedRecord<T>]) -> HashSet<CanonicalKey> {
    records.iter().map(|r| r.canonical_key().clone()).collect()
}

fn partition_side<T>(
    records: Vec<NormalizedRecord<T>>,
    opposite_keys: &HashSet<CanonicalKey>,
    exclusions: &ExclusionSet,
) -> (SidePartition, BTreeSet<CanonicalKey>, Vec<NormalizedRecord<T>>) {
    let mut partition = SidePartition {
        total_records: records.len(),
        ..SidePartition::default()
    };
    let mut matched = BTreeSet::new();
    let mut unmatched_keys = HashSet::new();

    for record in dedup_first_seen(&records) {
        let key = record.canonical_key();
        partition.unique += 1;
        if exclusions.contains(key) {
            partition.excluded += 1;
        } else if opposite_keys.contains(key) {
            partition.matched += 1;
            matched.insert(key.clone());
        } else {
            partition.unmatched += 1;
            unmatched_keys.insert(key.clone());
        }
    }

    let mut unmatched: Vec<NormalizedRecord<T>> = records
        .into_iter()
        .filter(|r| unmatched_keys.contains(r.canonical_key()))
        .collect();
    // Stable, so records sharing a key keep their input order
    unmatched.sort_by(|a, b| a.canonical_key().cmp(b.canonical_key()));

    (partition, matched, unmatched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::SourceId;

    fn side(names: &[&str]) -> Vec<NormalizedRecord<usize>> {
        let normalizer = NameNormalizer::default();
        names
            .iter()
            .enumerate()
            .filter_map(|(i, name)| {
                normalizer.record(SourceId::new(format!("r{i}")).unwrap(), name, i)
            })
            .collect()
    }

    #[test]
    fn test_suffix_variants_match() {
        let result = reconcile(
            side(&["Acme Trading Ltd"]),
            side(&["ACME TRADING LIMITED"]),
            &ExclusionSet::new(),
        )
        .unwrap();

        assert_eq!(result.side_a.matched, 1);
        assert_eq!(result.side_a.unmatched, 0);
        assert_eq!(result.side_b.matched, 1);
        assert_eq!(result.side_b.unmatched, 0);
        assert!(result.unmatched_side_a.is_empty());
        assert!(result.unmatched_side_b.is_empty());
    }

    #[test]
    fn test_exclusions_are_not_unmatched() {
        let exclusions = ExclusionSet::from_names(["beta"], &NameNormalizer::default());
        let result = reconcile(
            side(&["Acme Ltd", "Beta Inc"]),
            side(&["Acme Ltd"]),
            &exclusions,
        )
        .unwrap();

        assert_eq!(result.side_a.matched, 1);
        assert_eq!(result.excluded_a_count, 1);
        assert_eq!(result.side_a.unmatched, 0);
        assert!(result.unmatched_side_a.is_empty());
    }

    #[test]
    fn test_empty_sides_are_invalid_input() {
        let err = reconcile(side(&[]), side(&["Acme"]), &ExclusionSet::new()).unwrap_err();
        assert!(matches!(err, ReconError::InvalidInput(_)));

        let err = reconcile(side(&["Acme"]), side(&["", "  "]), &ExclusionSet::new()).unwrap_err();
        assert!(matches!(err, ReconError::InvalidInput(_)));
    }

    #[test]
    fn test_unmatched_keeps_every_record_sorted() {
        let result = reconcile(
            side(&["Zeta Ltd", "Alpha Ltd", "Zeta Limited", "Gamma"]),
            side(&["Gamma"]),
            &ExclusionSet::new(),
        )
        .unwrap();

        let keys: Vec<&str> = result
            .unmatched_side_a
            .iter()
            .map(|r| r.canonical_key().as_str())
            .collect();
        assert_eq!(keys, vec!["alpha", "zeta", "zeta"]);

        // Duplicates survive for export but count once
        assert_eq!(result.side_a.unmatched, 2);
        assert_eq!(result.side_a.unique, 3);
        assert_eq!(result.side_a.total_records, 4);

        // Stable: the two "zeta" records keep input order
        let zeta_names: Vec<&str> = result.unmatched_side_a[1..]
            .iter()
            .map(|r| r.display_name())
            .collect();
        assert_eq!(zeta_names, vec!["Zeta Ltd", "Zeta Limited"]);
    }

    #[test]
    fn test_dedup_first_seen() {
        let records = side(&["Acme Ltd", "Beta", "ACME LIMITED"]);
        let unique = dedup_first_seen(&records);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].display_name(), "Acme Ltd");
        assert_eq!(unique[1].display_name(), "Beta");
    }

    #[test]
    fn test_exclusion_set_skips_blank_names() {
        let normalizer = NameNormalizer::default();
        let rows = vec![
            ExclusionRow::new("Crown Estate"),
            ExclusionRow::default(),
            ExclusionRow::new("..."),
            ExclusionRow::new("The Crown Estate"),
        ];
        let set = ExclusionSet::from_rows(&rows, &normalizer);
        assert_eq!(set.len(), 2);
        assert!(set.contains(&normalizer.normalize("CROWN ESTATE")));
    }
}
