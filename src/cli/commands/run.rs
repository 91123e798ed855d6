//! Run command implementation
//!
//! This module implements the `run` command: discover the inputs, reconcile
//! HMLR proprietors against ROE entities and write the unmatched reports.

use crate::adapters::discovery::{newest_file, NamingConvention};
use crate::adapters::export::{InputFiles, ReportPaths, ReportWriter};
use crate::adapters::{exclusions, hmlr, roe};
use crate::cli::{exit_code_for, EXIT_CONFIG_ERROR, EXIT_SUCCESS};
use crate::config::{load_config_or_default, ReconConfig};
use crate::core::normalize::WhitespaceOrder;
use crate::core::pipeline::{run_pipeline, PipelineOptions, PipelineOutput};
use crate::domain::Result;
use crate::log_error_with_context;
use chrono::Local;
use clap::Args;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// HMLR extract to use instead of the newest one in `inputs.hmlr_dir`
    #[arg(long, value_name = "PATH")]
    pub hmlr_file: Option<PathBuf>,

    /// ROE export to use instead of `inputs.roe_path`
    #[arg(long, value_name = "PATH")]
    pub roe_file: Option<PathBuf>,

    /// Exclusion list to use instead of the newest one in `inputs.exclusions_dir`
    #[arg(long, value_name = "PATH")]
    pub exclusions_file: Option<PathBuf>,

    /// Override the report directory
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Override the whitespace order (after_suffix or before_suffix)
    #[arg(long, value_name = "ORDER")]
    pub whitespace_order: Option<WhitespaceOrder>,

    /// Dry run mode - compute and print stats without writing reports
    #[arg(long)]
    pub dry_run: bool,
}

impl RunArgs {
    /// Execute the run command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting run command");

        // A missing file falls back to defaults plus RECON_* overrides
        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("{e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(EXIT_CONFIG_ERROR);
        }

        if config.application.dry_run {
            tracing::info!("Dry run mode enabled - no reports will be written");
            println!("🔍 DRY RUN MODE - No reports will be written");
            println!();
        }

        match self.run(&config) {
            Ok(_) => Ok(EXIT_SUCCESS),
            Err(e) => {
                log_error_with_context!(&e, "Reconciliation run failed");
                eprintln!("❌ Run failed: {e}");
                Ok(exit_code_for(&e))
            }
        }
    }

    fn apply_overrides(&self, config: &mut ReconConfig) {
        if let Some(order) = self.whitespace_order {
            tracing::info!(whitespace_order = %order, "Overriding whitespace order from CLI");
            config.normalization.whitespace_order = order;
        }
        if let Some(dir) = &self.output_dir {
            tracing::info!(output_dir = %dir, "Overriding output directory from CLI");
            config.output.directory = dir.clone();
        }
        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }
    }

    /// Resolve which files this run reads
    pub fn resolve_inputs(&self, config: &ReconConfig) -> Result<InputFiles> {
        let hmlr = match &self.hmlr_file {
            Some(path) => path.clone(),
            None => newest_file(Path::new(&config.inputs.hmlr_dir), NamingConvention::HmlrExtract)?,
        };
        let exclusions = match &self.exclusions_file {
            Some(path) => path.clone(),
            None => newest_file(
                Path::new(&config.inputs.exclusions_dir),
                NamingConvention::Exclusions,
            )?,
        };
        let roe = self
            .roe_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.inputs.roe_path));

        Ok(InputFiles {
            hmlr,
            roe,
            exclusions,
        })
    }

    fn run(&self, config: &ReconConfig) -> Result<Option<ReportPaths>> {
        let start = Instant::now();
        let inputs = self.resolve_inputs(config)?;
        let options = PipelineOptions::from_config(config);

        println!("📂 HMLR extract:  {}", inputs.hmlr.display());
        println!("📂 ROE export:    {}", inputs.roe.display());
        println!("📂 Exclusions:    {}", inputs.exclusions.display());
        println!();

        let titles = hmlr::read_titles(&inputs.hmlr, options.slot_count)?;
        let entities = roe::read_entities(&inputs.roe)?;
        let exclusion_rows =
            exclusions::read_exclusions(&inputs.exclusions, &config.inputs.exclusion_name_column)?;

        let output = run_pipeline(&titles, &entities, &exclusion_rows, &options)?;
        print_summary(&output);

        if config.application.dry_run {
            tracing::info!(duration_ms = start.elapsed().as_millis(), "Dry run complete");
            return Ok(None);
        }

        let writer = ReportWriter::new(&config.output.directory, Local::now().date_naive())
            .with_format(config.output.format)
            .with_summary_json(config.output.write_summary_json);
        let paths = writer.write(&output, &inputs)?;

        println!("✅ Reports written:");
        println!("  {}", paths.hmlr_unmatched.display());
        println!("  {}", paths.roe_unmatched.display());
        if let Some(summary) = &paths.summary {
            println!("  {}", summary.display());
        }

        tracing::info!(duration_ms = start.elapsed().as_millis(), "Run complete");
        Ok(Some(paths))
    }
}

fn print_summary(output: &PipelineOutput) {
    output.hmlr_stats.log_summary("hmlr");
    output.roe_stats.log_summary("roe");

    println!("📊 HMLR proprietors");
    println!("{}", output.hmlr_stats);
    println!();
    println!("📊 ROE entities");
    println!("{}", output.roe_stats);
    println!();
}
