//! Report writer
//!
//! Writes the unmatched HMLR proprietors and unmatched ROE entities as CSV or
//! xlsx, plus an optional JSON run summary, into the output directory. File
//! names carry the run date: `{date}-HMLR-unmatched.{ext}`,
//! `{date}-ROE-unmatched.{ext}` and `{date}-summary.json`.

use crate::core::pipeline::PipelineOutput;
use crate::core::stats::SummaryStats;
use crate::domain::errors::ReconError;
use crate::domain::records::{NormalizedRecord, Proprietor, RoeEntity};
use crate::domain::Result;
use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const HMLR_HEADER: [&str; 14] = [
    "title_number",
    "tenure",
    "property_address",
    "district",
    "county",
    "region",
    "price_paid",
    "proprietor_name",
    "proprietor_address_1",
    "proprietor_address_2",
    "proprietor_address_3",
    "date_proprietor_added",
    "extract_date",
    "clean_proprietor_name",
];

const ROE_HEADER: [&str; 4] = [
    "incorporation_number",
    "corporate_body_name",
    "incorporation_date",
    "clean_company_name",
];

/// File format of the unmatched reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// Comma-separated text
    #[default]
    Csv,

    /// Excel workbook with a single sheet
    Xlsx,
}

impl ReportFormat {
    /// File extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Xlsx => "xlsx",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ReportFormat::Csv),
            "xlsx" => Ok(ReportFormat::Xlsx),
            other => Err(format!("Invalid report format '{}'. Must be one of: csv, xlsx", other)),
        }
    }
}

/// Input files a run was computed from
#[derive(Debug, Clone, Default, Serialize)]
pub struct InputFiles {
    /// HMLR extract
    pub hmlr: PathBuf,

    /// ROE export
    pub roe: PathBuf,

    /// Exclusion list
    pub exclusions: PathBuf,
}

/// JSON run summary
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary<'a> {
    /// Date stamped on the output files
    pub run_date: NaiveDate,

    /// Where the inputs came from
    pub inputs: &'a InputFiles,

    /// Unique keys present on both sides
    pub matched_keys: usize,

    /// HMLR-side stats
    pub hmlr: &'a SummaryStats,

    /// ROE-side stats
    pub roe: &'a SummaryStats,

    /// Rows written to the HMLR unmatched report
    pub hmlr_unmatched_rows: usize,

    /// Rows written to the ROE unmatched report
    pub roe_unmatched_rows: usize,
}

/// Paths of the files a [`ReportWriter`] produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    /// Unmatched HMLR proprietors
    pub hmlr_unmatched: PathBuf,

    /// Unmatched ROE entities
    pub roe_unmatched: PathBuf,

    /// JSON summary, if enabled
    pub summary: Option<PathBuf>,
}

/// Writes run reports into a directory
#[derive(Debug, Clone)]
pub struct ReportWriter {
    directory: PathBuf,
    run_date: NaiveDate,
    format: ReportFormat,
    write_summary_json: bool,
}

impl ReportWriter {
    /// Create a writer for `directory`, stamping files with `run_date`
    pub fn new(directory: impl Into<PathBuf>, run_date: NaiveDate) -> Self {
        Self {
            directory: directory.into(),
            run_date,
            format: ReportFormat::default(),
            write_summary_json: true,
        }
    }

    /// Set the report file format
    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    /// Enable or disable the JSON summary
    pub fn with_summary_json(mut self, enabled: bool) -> Self {
        self.write_summary_json = enabled;
        self
    }

    /// Paths this writer would produce
    pub fn paths(&self) -> ReportPaths {
        let date = self.run_date.format("%Y-%m-%d");
        let ext = self.format.extension();
        ReportPaths {
            hmlr_unmatched: self.directory.join(format!("{date}-HMLR-unmatched.{ext}")),
            roe_unmatched: self.directory.join(format!("{date}-ROE-unmatched.{ext}")),
            summary: self
                .write_summary_json
                .then(|| self.directory.join(format!("{date}-summary.json"))),
        }
    }

    /// Write every report for `output`
    ///
    /// # Errors
    ///
    /// Returns [`ReconError::Io`] if the directory cannot be created or a file
    /// cannot be written.
    pub fn write(&self, output: &PipelineOutput, inputs: &InputFiles) -> Result<ReportPaths> {
        std::fs::create_dir_all(&self.directory).map_err(|e| {
            ReconError::Io(format!(
                "Failed to create output directory {}: {}",
                self.directory.display(),
                e
            ))
        })?;

        let paths = self.paths();
        let hmlr_rows = output.result.unmatched_side_a.iter().map(hmlr_row);
        let roe_rows = output.result.unmatched_side_b.iter().map(roe_row);
        match self.format {
            ReportFormat::Csv => {
                write_csv(&paths.hmlr_unmatched, HMLR_HEADER, hmlr_rows)?;
                write_csv(&paths.roe_unmatched, ROE_HEADER, roe_rows)?;
            }
            ReportFormat::Xlsx => {
                write_xlsx(&paths.hmlr_unmatched, "HMLR unmatched", HMLR_HEADER, hmlr_rows)?;
                write_xlsx(&paths.roe_unmatched, "ROE unmatched", ROE_HEADER, roe_rows)?;
            }
        }

        if let Some(summary_path) = &paths.summary {
            let summary = self.summary(output, inputs);
            let json = serde_json::to_string_pretty(&summary)?;
            std::fs::write(summary_path, json)?;
        }

        tracing::info!(
            hmlr_unmatched = %paths.hmlr_unmatched.display(),
            roe_unmatched = %paths.roe_unmatched.display(),
            "Reports written"
        );

        Ok(paths)
    }

    /// Summary of `output` as it would be written
    pub fn summary<'a>(&self, output: &'a PipelineOutput, inputs: &'a InputFiles) -> RunSummary<'a> {
        RunSummary {
            run_date: self.run_date,
            inputs,
            matched_keys: output.result.matched.len(),
            hmlr: &output.hmlr_stats,
            roe: &output.roe_stats,
            hmlr_unmatched_rows: output.result.unmatched_side_a.len(),
            roe_unmatched_rows: output.result.unmatched_side_b.len(),
        }
    }
}

fn hmlr_row(record: &NormalizedRecord<Proprietor>) -> [&str; 14] {
    let p = record.attributes();
    let d = &p.details;
    [
        d.title_number.as_str(),
        &d.tenure,
        &d.property_address,
        &d.district,
        &d.county,
        &d.region,
        &d.price_paid,
        &p.proprietor_name,
        &p.proprietor_address_1,
        &p.proprietor_address_2,
        &p.proprietor_address_3,
        &d.date_proprietor_added,
        &d.extract_date,
        record.canonical_key().as_str(),
    ]
}

fn roe_row(record: &NormalizedRecord<RoeEntity>) -> [&str; 4] {
    let e = record.attributes();
    [
        e.incorporation_number.as_str(),
        &e.corporate_body_name,
        &e.incorporation_date,
        record.canonical_key().as_str(),
    ]
}

fn write_csv<'a, const N: usize>(
    path: &Path,
    header: [&str; N],
    rows: impl Iterator<Item = [&'a str; N]>,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_xlsx<'a, const N: usize>(
    path: &Path,
    sheet_name: &str,
    header: [&str; N],
    rows: impl Iterator<Item = [&'a str; N]>,
) -> Result<()> {
    let xlsx_error =
        |e: rust_xlsxwriter::XlsxError| ReconError::Io(format!("Failed to write {}: {}", path.display(), e));

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook
        .add_worksheet()
        .set_name(sheet_name)
        .map_err(xlsx_error)?;

    for (col, name) in header.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *name, &header_format)
            .map_err(xlsx_error)?;
    }

    // rust_xlsxwriter uses 0-based row/col as u32/u16; row 0 is the header
    for (i, row) in rows.enumerate() {
        let row32 = (i + 1) as u32;
        for (col, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            worksheet
                .write_string(row32, col as u16, *value)
                .map_err(xlsx_error)?;
        }
    }

    workbook.save(path).map_err(xlsx_error)?;
    Ok(())
}
