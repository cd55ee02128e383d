//! Verify command - integrity check of a written catalog database

use crate::cli::error::HelpfulError;
use crate::cli::output::print_json;
use crate::cli::Status;
use imgindex::catalog::{load_database, verify_database, CatalogError};
use imgindex::naming::IntegrityViolation;
use serde::Serialize;
use std::path::PathBuf;
use tracing::error;

/// Arguments for the verify command
#[derive(Debug)]
pub struct VerifyArgs {
    pub path: PathBuf,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct VerifyOutput {
    database: String,
    db_name: String,
    count: usize,
    items: usize,
    valid: bool,
    violations: Vec<IntegrityViolation>,
}

pub fn run(args: VerifyArgs) -> anyhow::Result<Status> {
    if !args.path.exists() {
        return Err(HelpfulError::file_not_found(&args.path).into());
    }
    let db = load_database(&args.path).map_err(|err| match err {
        CatalogError::Json(e) => HelpfulError::json_parse_error(&args.path, &e.to_string()),
        other => HelpfulError::io_error(&args.path, &other.to_string()),
    })?;

    let violations = verify_database(&db);
    for violation in &violations {
        error!("Integrity violation: {}", violation);
    }
    let valid = violations.is_empty();

    if args.json {
        print_json(&VerifyOutput {
            database: args.path.display().to_string(),
            db_name: db.db_name,
            count: db.count,
            items: db.items.len(),
            valid,
            violations,
        })?;
    } else if valid {
        println!(
            "OK: {} ({} items, created {})",
            args.path.display(),
            db.items.len(),
            db.created_at
        );
    } else {
        println!("INVALID: {}", args.path.display());
        for violation in &violations {
            println!("  - {}", violation);
        }
    }

    Ok(Status::from_clean(valid))
}
