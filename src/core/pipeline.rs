//! Reconciliation pipeline entry point
//!
//! [`run_pipeline`] takes the three already-loaded inputs and returns the
//! result plus per-side stats. It performs no I/O; reading the inputs and
//! writing the reports is the caller's job.

use crate::config::ReconConfig;
use crate::core::expand::{RowExpander, DEFAULT_NULL_SENTINELS, DEFAULT_SLOT_COUNT};
use crate::core::normalize::{NameNormalizer, WhitespaceOrder};
use crate::core::reconcile::{reconcile, ExclusionSet, ReconciliationResult};
use crate::core::stats::SummaryStats;
use crate::domain::errors::ReconError;
use crate::domain::ids::SourceId;
use crate::domain::records::{ExclusionRow, NormalizedRecord, Proprietor, RoeEntity, TitleRow};
use crate::domain::Result;
use std::time::Instant;

/// Knobs for one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    /// Whitespace removal relative to suffix stripping
    pub whitespace_order: WhitespaceOrder,

    /// Suffixes added to the built-in vocabulary
    pub extra_suffixes: Vec<String>,

    /// Proprietor slots read per HMLR row
    pub slot_count: usize,

    /// Cell values treated as "no name"
    pub null_sentinels: Vec<String>,
}

impl PipelineOptions {
    /// Options taken from a loaded configuration
    pub fn from_config(config: &ReconConfig) -> Self {
        Self {
            whitespace_order: config.normalization.whitespace_order,
            extra_suffixes: config.normalization.extra_suffixes.clone(),
            slot_count: config.expansion.slot_count,
            null_sentinels: config.expansion.null_sentinels.clone(),
        }
    }

    /// The normalizer these options describe
    pub fn normalizer(&self) -> NameNormalizer {
        NameNormalizer::new(self.whitespace_order, &self.extra_suffixes)
    }

    /// The row expander these options describe
    pub fn expander(&self) -> RowExpander {
        RowExpander::new(self.slot_count, &self.null_sentinels)
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            whitespace_order: WhitespaceOrder::default(),
            extra_suffixes: Vec::new(),
            slot_count: DEFAULT_SLOT_COUNT,
            null_sentinels: DEFAULT_NULL_SENTINELS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Everything a run produces
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// HMLR proprietors (side A) reconciled against ROE entities (side B)
    pub result: ReconciliationResult<Proprietor, RoeEntity>,

    /// HMLR-side stats
    pub hmlr_stats: SummaryStats,

    /// ROE-side stats
    pub roe_stats: SummaryStats,
}

/// Run expansion, normalization, reconciliation and stats over loaded inputs
///
/// # Errors
///
/// - [`ReconError::MalformedRecord`] if an HMLR row has no title number or a
///   ROE row has no incorporation number
/// - [`ReconError::InvalidInput`] if either side is empty after normalization
pub fn run_pipeline(
    titles: &[TitleRow],
    roe_entities: &[RoeEntity],
    exclusion_rows: &[ExclusionRow],
    options: &PipelineOptions,
) -> Result<PipelineOutput> {
    let start = Instant::now();
    let normalizer = options.normalizer();
    let expander = options.expander();

    let proprietors = expander.expand_all(titles)?;
    let hmlr_records = normalize_proprietors(proprietors, &normalizer)?;
    let roe_records = normalize_roe(roe_entities, &normalizer, &expander)?;
    let exclusions = ExclusionSet::from_rows(exclusion_rows, &normalizer);

    tracing::info!(
        titles = titles.len(),
        hmlr_records = hmlr_records.len(),
        roe_records = roe_records.len(),
        exclusions = exclusions.len(),
        whitespace_order = %normalizer.order(),
        "Inputs normalized"
    );

    let result = reconcile(hmlr_records, roe_records, &exclusions)?;
    let hmlr_stats = SummaryStats::for_side_a(&result);
    let roe_stats = SummaryStats::for_side_b(&result);

    tracing::debug!(
        duration_ms = start.elapsed().as_millis(),
        "Pipeline finished"
    );

    Ok(PipelineOutput {
        result,
        hmlr_stats,
        roe_stats,
    })
}

/// Admit expanded HMLR proprietors into the key space
pub fn normalize_proprietors(
    proprietors: Vec<Proprietor>,
    normalizer: &NameNormalizer,
) -> Result<Vec<NormalizedRecord<Proprietor>>> {
    let mut records = Vec::with_capacity(proprietors.len());
    for proprietor in proprietors {
        let source_id = SourceId::for_slot(&proprietor.details.title_number, proprietor.slot)
            .map_err(|e| ReconError::malformed("hmlr", 0, e))?;
        let name = proprietor.proprietor_name.clone();
        if let Some(record) = normalizer.record(source_id, &name, proprietor) {
            records.push(record);
        }
    }
    Ok(records)
}

/// Admit ROE entities into the key space
///
/// Names the expander treats as null sentinels are dropped, as on the HMLR side.
pub fn normalize_roe(
    entities: &[RoeEntity],
    normalizer: &NameNormalizer,
    expander: &RowExpander,
) -> Result<Vec<NormalizedRecord<RoeEntity>>> {
    let mut records = Vec::with_capacity(entities.len());
    for (i, entity) in entities.iter().enumerate() {
        let source_id = SourceId::new(entity.incorporation_number.trim())
            .map_err(|_| ReconError::malformed("roe", i + 1, "incorporation_number is blank"))?;
        if expander.is_blank(Some(entity.corporate_body_name.as_str())) {
            tracing::debug!(
                source_id = %source_id,
                "ROE name is a null sentinel, dropping record"
            );
            continue;
        }
        if let Some(record) =
            normalizer.record(source_id, &entity.corporate_body_name, entity.clone())
        {
            records.push(record);
        }
    }
    Ok(records)
}
