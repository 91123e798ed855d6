//! Input file discovery
//!
//! Monthly HMLR extracts and curated exclusion lists are dropped into
//! directories with a date encoded in the file name. Discovery picks the file
//! with the most recent encoded date.

use crate::domain::errors::ReconError;
use crate::domain::Result;
use chrono::NaiveDate;
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static HMLR_EXTRACT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^RXN_(\d{2})_([a-z]{3})_(\d{4})\.(xlsx|csv)$")
        .expect("Invalid HMLR extract pattern")
});

static EXCLUSIONS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d{4})-(\d{2})-(\d{2})-exclusions\.(xlsx|csv)$")
        .expect("Invalid exclusions pattern")
});

/// A dated file-naming convention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingConvention {
    /// `RXN_DD_Mon_YYYY.xlsx`, e.g. `RXN_01_Sep_2023.xlsx`
    HmlrExtract,

    /// `YYYY-MM-DD-exclusions.xlsx`
    Exclusions,
}

impl NamingConvention {
    /// Date encoded in `file_name`, if it follows this convention
    pub fn parse_date(&self, file_name: &str) -> Option<NaiveDate> {
        match self {
            NamingConvention::HmlrExtract => {
                let caps = HMLR_EXTRACT_PATTERN.captures(file_name)?;
                let day: u32 = caps[1].parse().ok()?;
                let month = month_from_abbrev(&caps[2])?;
                let year: i32 = caps[3].parse().ok()?;
                NaiveDate::from_ymd_opt(year, month, day)
            }
            NamingConvention::Exclusions => {
                let caps = EXCLUSIONS_PATTERN.captures(file_name)?;
                let year: i32 = caps[1].parse().ok()?;
                let month: u32 = caps[2].parse().ok()?;
                let day: u32 = caps[3].parse().ok()?;
                NaiveDate::from_ymd_opt(year, month, day)
            }
        }
    }
}

impl fmt::Display for NamingConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamingConvention::HmlrExtract => write!(f, "RXN_DD_Mon_YYYY.xlsx"),
            NamingConvention::Exclusions => write!(f, "YYYY-MM-DD-exclusions.xlsx"),
        }
    }
}

fn month_from_abbrev(abbrev: &str) -> Option<u32> {
    let month = match abbrev.to_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// The file in `dir` with the most recent date under `convention`
///
/// Files that do not follow the convention, or encode an impossible date,
/// are ignored. Ties on date are broken by file name.
///
/// # Errors
///
/// Returns [`ReconError::Discovery`] if the directory is missing or holds no
/// matching file.
pub fn newest_file(dir: &Path, convention: NamingConvention) -> Result<PathBuf> {
    let (path, date) = dated_files(dir, convention)?
        .into_iter()
        .max_by(|(a_path, a_date), (b_path, b_date)| {
            a_date.cmp(b_date).then_with(|| a_path.cmp(b_path))
        })
        .ok_or_else(|| {
            ReconError::Discovery(format!(
                "No file named like {} found in {}",
                convention,
                dir.display()
            ))
        })?;

    tracing::info!(
        path = %path.display(),
        date = %date,
        "Selected newest input file"
    );

    Ok(path)
}

/// Every file in `dir` following `convention`, with its encoded date
pub fn dated_files(dir: &Path, convention: NamingConvention) -> Result<Vec<(PathBuf, NaiveDate)>> {
    if !dir.is_dir() {
        return Err(ReconError::Discovery(format!(
            "Input directory not found: {}",
            dir.display()
        )));
    }

    let mut found = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        match convention.parse_date(name) {
            Some(date) => found.push((entry.path(), date)),
            None => tracing::debug!(file = name, "Skipping file outside naming convention"),
        }
    }

    Ok(found)
}
