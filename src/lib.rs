// proprietor-recon - HMLR overseas proprietors vs the Register of Overseas Entities
// Copyright (c) 2025 Proprietor Recon Contributors
// Licensed under the MIT License

//! # proprietor-recon
//!
//! Reconciles the overseas-company proprietors of HM Land Registry (HMLR)
//! titles against the Register of Overseas Entities (ROE), and reports the
//! organizations present on one side but not the other.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Expanding** wide HMLR title rows into one record per proprietor
//! - **Normalizing** organization names into canonical matching keys
//! - **Reconciling** the two key sets, honoring a curated exclusion list
//! - **Reporting** unmatched records and headline statistics
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Pure reconciliation logic (normalize, expand, reconcile, stats)
//! - [`adapters`] - File discovery, table readers and report writers
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use proprietor_recon::adapters::{exclusions, hmlr, roe};
//! use proprietor_recon::config::load_config;
//! use proprietor_recon::core::pipeline::{run_pipeline, PipelineOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("proprietor-recon.toml")?;
//!     let options = PipelineOptions::from_config(&config);
//!
//!     let titles = hmlr::read_titles("inputs/hmlr-data/RXN_01_Sep_2023.xlsx", options.slot_count)?;
//!     let entities = roe::read_entities(&config.inputs.roe_path)?;
//!     let excluded = exclusions::read_exclusions(
//!         "inputs/2023-09-15-exclusions.xlsx",
//!         &config.inputs.exclusion_name_column,
//!     )?;
//!
//!     let output = run_pipeline(&titles, &entities, &excluded, &options)?;
//!     println!("HMLR matched: {}", output.hmlr_stats.matched_percentage_display());
//!     Ok(())
//! }
//! ```
//!
//! ## Name Normalization
//!
//! ```rust
//! use proprietor_recon::core::normalize::normalize;
//!
//! assert_eq!(normalize("Acme Trading Ltd"), normalize("ACME TRADING LIMITED"));
//! assert_eq!(normalize("Gamma S.r.l.").as_str(), "gamma");
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result`], whose error type is
//! [`domain::ReconError`]:
//!
//! ```rust
//! use proprietor_recon::core::reconcile::{reconcile, ExclusionSet};
//! use proprietor_recon::domain::{NormalizedRecord, ReconError};
//!
//! let empty: Vec<NormalizedRecord<()>> = Vec::new();
//! let err = reconcile(empty.clone(), empty, &ExclusionSet::new()).unwrap_err();
//! assert!(matches!(err, ReconError::InvalidInput(_)));
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
