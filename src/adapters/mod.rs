//! File-system integrations.
//!
//! Everything that touches disk lives here; the [`core`](crate::core) layer
//! only ever sees typed records.
//!
//! - [`table`] - CSV and workbook reader producing string tables
//! - [`discovery`] - Picks the newest dated input file in a directory
//! - [`hmlr`] - HMLR extract table → [`TitleRow`](crate::domain::TitleRow)
//! - [`roe`] - ROE export table → [`RoeEntity`](crate::domain::RoeEntity)
//! - [`exclusions`] - Exclusion list table → [`ExclusionRow`](crate::domain::ExclusionRow)
//! - [`export`] - Unmatched CSV/xlsx reports and the JSON run summary
//!
//! # Example
//!
//! ```rust,no_run
//! use proprietor_recon::adapters::discovery::{newest_file, NamingConvention};
//! use proprietor_recon::adapters::hmlr::read_titles;
//! use std::path::Path;
//!
//! # fn example() -> proprietor_recon::domain::Result<()> {
//! let extract = newest_file(Path::new("inputs/hmlr-data"), NamingConvention::HmlrExtract)?;
//! let titles = read_titles(&extract, 4)?;
//! println!("{} titles in {}", titles.len(), extract.display());
//! # Ok(())
//! # }
//! ```

pub mod discovery;
pub mod exclusions;
pub mod export;
pub mod hmlr;
pub mod roe;
pub mod table;
