//! Index command - validate a directory and write the catalog files
//!
//! Writes `images_sidecar.csv` and `images_db.json` into the output
//! directory, then re-reads the database and verifies it.

use crate::cli::error::HelpfulError;
use crate::cli::output::{format_rate, print_json};
use crate::cli::validate::{print_abort, run_pass};
use crate::cli::Status;
use chrono::Utc;
use imgindex::catalog::{
    load_database, verify_database, write_database, write_sidecar, CatalogDatabase, CatalogError,
    DATABASE_FILE_NAME, SIDECAR_FILE_NAME,
};
use imgindex::naming::{IntegrityViolation, Rejection};
use imgindex::AppConfig;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Arguments for the index command
#[derive(Debug)]
pub struct IndexArgs {
    pub path: PathBuf,
    pub out: PathBuf,
    pub base_url: Option<String>,
    pub db_name: Option<String>,
    pub strict: bool,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct IndexOutput<'a> {
    directory: String,
    sidecar: String,
    database: String,
    total: usize,
    indexed: usize,
    rejected: &'a [Rejection],
    violations: Vec<IntegrityViolation>,
    clean: bool,
}

fn catalog_error(path: &Path, err: CatalogError) -> HelpfulError {
    match err {
        CatalogError::Json(e) => HelpfulError::json_parse_error(path, &e.to_string()),
        other => HelpfulError::io_error(path, &other.to_string()),
    }
}

pub fn run(args: IndexArgs, config: &AppConfig) -> anyhow::Result<Status> {
    let strict = args.strict || config.strict;
    let base_url = args.base_url.as_deref().or(config.base_url.as_deref());
    let db_name = args.db_name.as_deref().unwrap_or(config.db_name.as_str());

    let report = match run_pass(&args.path, strict, config)? {
        Ok(report) => report,
        Err(abort) => {
            print_abort(&args.path, &abort, args.json)?;
            return Ok(Status::StrictAbort);
        }
    };

    std::fs::create_dir_all(&args.out)
        .map_err(|e| HelpfulError::io_error(&args.out, &e.to_string()))?;

    let sidecar_path = args.out.join(SIDECAR_FILE_NAME);
    write_sidecar(&sidecar_path, &report.records).map_err(|e| catalog_error(&sidecar_path, e))?;

    let db_path = args.out.join(DATABASE_FILE_NAME);
    let db = CatalogDatabase::from_records(
        &report.records,
        db_name,
        base_url,
        Utc::now().date_naive(),
    );
    write_database(&db_path, &db).map_err(|e| catalog_error(&db_path, e))?;
    info!(items = db.count, path = %db_path.display(), "Wrote catalog database");

    let written = load_database(&db_path).map_err(|e| catalog_error(&db_path, e))?;
    let mut violations = report.violations.clone();
    violations.extend(verify_database(&written));
    for violation in &violations {
        error!("Integrity violation: {}", violation);
    }

    let clean = report.rejections.is_empty() && violations.is_empty();

    if args.json {
        print_json(&IndexOutput {
            directory: args.path.display().to_string(),
            sidecar: sidecar_path.display().to_string(),
            database: db_path.display().to_string(),
            total: report.summary.total,
            indexed: report.records.len(),
            rejected: &report.rejections,
            violations,
            clean,
        })?;
    } else {
        println!(
            "Indexed {}/{} file(s) ({})",
            report.records.len(),
            report.summary.total,
            format_rate(report.records.len(), report.summary.total)
        );
        println!("  sidecar:  {}", sidecar_path.display());
        println!("  database: {}", db_path.display());
        for rejection in &report.rejections {
            let reasons: Vec<String> = rejection.reasons.iter().map(|r| r.message()).collect();
            println!("  skipped {}: {}", rejection.filename, reasons.join("; "));
        }
        for violation in &violations {
            println!("  INTEGRITY: {}", violation);
        }
    }

    Ok(Status::from_clean(clean))
}
