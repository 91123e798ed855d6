//! End-to-end tests: discovery, readers, reconciliation and report files

use chrono::NaiveDate;
use proprietor_recon::adapters::discovery::{newest_file, NamingConvention};
use proprietor_recon::adapters::export::{InputFiles, ReportWriter};
use proprietor_recon::adapters::exclusions::{self, DEFAULT_NAME_COLUMN};
use proprietor_recon::adapters::{hmlr, roe};
use proprietor_recon::cli::commands::run::RunArgs;
use proprietor_recon::cli::{EXIT_INPUT_ERROR, EXIT_SUCCESS};
use proprietor_recon::core::pipeline::{run_pipeline, PipelineOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const HMLR_HEADER: &str = "Title_Number,Tenure,Property_Address,District,County,Region,Price_Paid,\
Proprietor_Name_1,Proprietor_1_Address_1,Proprietor_1_Address_2,Proprietor_1_Address_3,\
Proprietor_Name_2,Proprietor_2_Address_1,Proprietor_2_Address_2,Proprietor_2_Address_3,\
Date_Proprieter_Added_Updated,Extract_Date";

/// Input tree with an older and a newer file of each dated kind
fn input_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    let hmlr_dir = dir.path().join("hmlr-data");
    fs::create_dir_all(&hmlr_dir).unwrap();

    fs::write(
        hmlr_dir.join("RXN_01_Sep_2023.csv"),
        format!(
            "{HMLR_HEADER}\n\
NGL0,Freehold,Old Road,Camden,Greater London,London,5,Old Co Ltd,,,,,,,,01-01-2020,01-09-2023\n"
        ),
    )
    .unwrap();
    fs::write(
        hmlr_dir.join("RXN_15_Jan_2024.csv"),
        format!(
            "{HMLR_HEADER}\n\
NGL1,Freehold,1 High St,Westminster,Greater London,London,1000000,Acme Trading Ltd,PO Box 1,Douglas,Isle of Man,Beta Holdings Inc,,,,02-03-2021,15-01-2024\n\
NGL2,Leasehold,2 Low Rd,Leeds,West Yorkshire,Yorkshire,250000,Zeta S.r.l.,Via Roma 1,,,nan,,,,03-04-2022,15-01-2024\n\
NGL3,Freehold,3 Park Ln,Westminster,Greater London,London,,Crown Estate Ltd,,,,,,,,,15-01-2024\n"
        ),
    )
    .unwrap();
    fs::write(hmlr_dir.join("notes.txt"), "not an extract").unwrap();

    fs::write(
        dir.path().join("2023-01-01-exclusions.csv"),
        "Entity Name (from HMLR datasets)\nZeta\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("2024-01-10-exclusions.csv"),
        "Entity Name (from HMLR datasets)\nCrown Estate\n\n",
    )
    .unwrap();

    fs::write(
        dir.path().join("roe-register.csv"),
        "incorporation_number,corporate_body_name,incorporation_date\n\
OE000001,ACME TRADING LIMITED,2001-05-01\n\
OE000002,Omega S.A.,1999-12-31\n\
OE000003,Beta Holdings Incorporated,2010-07-04\n",
    )
    .unwrap();

    dir
}

fn resolve(dir: &Path) -> InputFiles {
    InputFiles {
        hmlr: newest_file(&dir.join("hmlr-data"), NamingConvention::HmlrExtract).unwrap(),
        roe: dir.join("roe-register.csv"),
        exclusions: newest_file(dir, NamingConvention::Exclusions).unwrap(),
    }
}

fn write_config(dir: &Path, output: &Path, roe_path: &Path) -> PathBuf {
    let path = dir.join("recon.toml");
    fs::write(
        &path,
        format!(
            r#"[inputs]
hmlr_dir = "{}"
exclusions_dir = "{}"
roe_path = "{}"

[output]
directory = "{}"
"#,
            dir.join("hmlr-data").display(),
            dir.display(),
            roe_path.display(),
            output.display(),
        ),
    )
    .unwrap();
    path
}

fn file_ending_with(dir: &Path, suffix: &str) -> Option<PathBuf> {
    fs::read_dir(dir)
        .ok()?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .find(|p| p.to_string_lossy().ends_with(suffix))
}

#[test]
fn test_newest_inputs_are_discovered() {
    let dir = input_tree();
    let inputs = resolve(dir.path());

    assert!(inputs.hmlr.ends_with("RXN_15_Jan_2024.csv"));
    assert!(inputs.exclusions.ends_with("2024-01-10-exclusions.csv"));
}

#[test]
fn test_full_pipeline_writes_reports() {
    let dir = input_tree();
    let inputs = resolve(dir.path());
    let options = PipelineOptions::default();

    let titles = hmlr::read_titles(&inputs.hmlr, options.slot_count).unwrap();
    let entities = roe::read_entities(&inputs.roe).unwrap();
    let excluded = exclusions::read_exclusions(&inputs.exclusions, DEFAULT_NAME_COLUMN).unwrap();

    assert_eq!(titles.len(), 3);
    assert_eq!(entities.len(), 3);

    let output = run_pipeline(&titles, &entities, &excluded, &options).unwrap();

    // Acme and Beta match, Crown Estate is excluded, Zeta is left over
    assert_eq!(output.hmlr_stats.unique_count, 4);
    assert_eq!(output.hmlr_stats.matched_count, 2);
    assert_eq!(output.hmlr_stats.excluded_count, 1);
    assert_eq!(output.hmlr_stats.unmatched_count, 1);
    assert_eq!(output.hmlr_stats.matched_percentage_display(), "50.00%");
    assert_eq!(output.roe_stats.unique_count, 3);
    assert_eq!(output.roe_stats.unmatched_count, 1);

    let out_dir = dir.path().join("outputs");
    let run_date = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
    let paths = ReportWriter::new(&out_dir, run_date)
        .write(&output, &inputs)
        .unwrap();

    assert!(paths.hmlr_unmatched.ends_with("2024-01-20-HMLR-unmatched.csv"));
    let hmlr_csv = fs::read_to_string(&paths.hmlr_unmatched).unwrap();
    let lines: Vec<&str> = hmlr_csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("clean_proprietor_name"));
    assert!(lines[1].starts_with("NGL2,Leasehold,2 Low Rd"));
    assert!(lines[1].contains("Zeta S.r.l.,Via Roma 1"));
    assert!(lines[1].ends_with(",zeta"));

    let roe_csv = fs::read_to_string(&paths.roe_unmatched).unwrap();
    assert_eq!(
        roe_csv.lines().collect::<Vec<_>>(),
        vec![
            "incorporation_number,corporate_body_name,incorporation_date,clean_company_name",
            "OE000002,Omega S.A.,1999-12-31,omega",
        ]
    );

    let summary_path = paths.summary.unwrap();
    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(summary_path).unwrap()).unwrap();
    assert_eq!(summary["run_date"], "2024-01-20");
    assert_eq!(summary["matched_keys"], 2);
    assert_eq!(summary["hmlr"]["unmatched_count"], 1);
    assert_eq!(summary["roe_unmatched_rows"], 1);
}

#[test]
fn test_run_command_succeeds() {
    let dir = input_tree();
    let out_dir = dir.path().join("reports");
    let config = write_config(dir.path(), &out_dir, &dir.path().join("roe-register.csv"));

    let args = RunArgs {
        hmlr_file: None,
        roe_file: None,
        exclusions_file: None,
        output_dir: None,
        whitespace_order: None,
        dry_run: false,
    };
    let code = args.execute(&config.to_string_lossy()).unwrap();

    assert_eq!(code, EXIT_SUCCESS);
    let hmlr_report = file_ending_with(&out_dir, "-HMLR-unmatched.csv").unwrap();
    assert!(fs::read_to_string(hmlr_report).unwrap().contains("Zeta S.r.l."));
    assert!(file_ending_with(&out_dir, "-ROE-unmatched.csv").is_some());
    assert!(file_ending_with(&out_dir, "-summary.json").is_some());
}

#[test]
fn test_run_command_rejects_roe_without_required_column() {
    let dir = input_tree();
    let bad_roe = dir.path().join("bad-roe.csv");
    fs::write(&bad_roe, "incorporation_number,name\nOE1,Acme\n").unwrap();
    let out_dir = dir.path().join("reports");
    let config = write_config(dir.path(), &out_dir, &bad_roe);

    let args = RunArgs {
        hmlr_file: None,
        roe_file: None,
        exclusions_file: None,
        output_dir: None,
        whitespace_order: None,
        dry_run: false,
    };
    let code = args.execute(&config.to_string_lossy()).unwrap();

    assert_eq!(code, EXIT_INPUT_ERROR);
    assert!(!out_dir.exists());
}

#[test]
fn test_run_command_without_extracts_is_input_error() {
    let dir = input_tree();
    fs::remove_file(dir.path().join("hmlr-data").join("RXN_01_Sep_2023.csv")).unwrap();
    fs::remove_file(dir.path().join("hmlr-data").join("RXN_15_Jan_2024.csv")).unwrap();
    let out_dir = dir.path().join("reports");
    let config = write_config(dir.path(), &out_dir, &dir.path().join("roe-register.csv"));

    let args = RunArgs {
        hmlr_file: None,
        roe_file: None,
        exclusions_file: None,
        output_dir: None,
        whitespace_order: None,
        dry_run: false,
    };

    assert_eq!(args.execute(&config.to_string_lossy()).unwrap(), EXIT_INPUT_ERROR);
}

#[test]
fn test_run_command_with_explicit_files_needs_no_config_file() {
    let dir = input_tree();
    let inputs = resolve(dir.path());
    let out_dir = dir.path().join("reports");

    let args = RunArgs {
        hmlr_file: Some(inputs.hmlr),
        roe_file: Some(inputs.roe),
        exclusions_file: Some(inputs.exclusions),
        output_dir: Some(out_dir.to_string_lossy().to_string()),
        whitespace_order: None,
        dry_run: false,
    };
    let missing_config = dir.path().join("no-such-config.toml");

    assert_eq!(args.execute(&missing_config.to_string_lossy()).unwrap(), EXIT_SUCCESS);
    assert!(file_ending_with(&out_dir, "-HMLR-unmatched.csv").is_some());
}
