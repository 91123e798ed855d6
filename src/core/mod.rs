//! Core reconciliation logic.
//!
//! Everything in this module is pure, synchronous and in-memory.
//!
//! # Modules
//!
//! - [`normalize`] - Organization name → canonical matching key
//! - [`expand`] - Wide HMLR rows → one record per proprietor slot
//! - [`reconcile`] - Matched / excluded / unmatched partitions per side
//! - [`stats`] - Summary counts and percentages
//! - [`pipeline`] - Explicit entry point composing the above
//!
//! # Workflow
//!
//! 1. **Expand**: split each title row into its populated proprietor slots
//! 2. **Normalize**: derive the canonical key of every HMLR proprietor, ROE
//!    entity and exclusion-list entry
//! 3. **Reconcile**: de-duplicate each side and partition its unique keys
//! 4. **Summarize**: derive headline stats per side
//!
//! # Example
//!
//! ```rust
//! use proprietor_recon::core::pipeline::{run_pipeline, PipelineOptions};
//! use proprietor_recon::domain::{ExclusionRow, RoeEntity, TitleRow};
//!
//! # fn example() -> proprietor_recon::domain::Result<()> {
//! let titles = vec![TitleRow::builder("NGL1").proprietor(Some("Acme Trading Ltd")).build()];
//! let roe = vec![RoeEntity::new("OE000001", "ACME TRADING LIMITED")];
//! let exclusions: Vec<ExclusionRow> = Vec::new();
//!
//! let output = run_pipeline(&titles, &roe, &exclusions, &PipelineOptions::default())?;
//! assert_eq!(output.hmlr_stats.matched_count, 1);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod expand;
pub mod normalize;
pub mod pipeline;
pub mod reconcile;
pub mod stats;
