//! Validate command - run a corpus pass over an image directory
//!
//! Nothing is written; the report goes to stdout as tables or JSON.

use crate::cli::error::HelpfulError;
use crate::cli::output::{color_for_rate, format_rate, print_json, print_table, print_table_colored};
use crate::cli::Status;
use comfy_table::Color;
use imgindex::naming::{CorpusChecker, CorpusReport, StrictAbort, Tally};
use imgindex::AppConfig;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

/// Arguments for the validate command
#[derive(Debug)]
pub struct ValidateArgs {
    pub path: PathBuf,
    pub strict: bool,
    pub json: bool,
    pub quiet: bool,
}

/// File names directly inside `path`, sorted.
///
/// Only regular files count; subdirectories are not entered.
pub fn list_directory(path: &Path) -> Result<Vec<String>, HelpfulError> {
    if !path.exists() {
        return Err(HelpfulError::directory_not_found(path));
    }
    if !path.is_dir() {
        return Err(HelpfulError::not_a_directory(path));
    }

    let mut names = Vec::new();
    for entry in WalkDir::new(path).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| HelpfulError::io_error(path, &e.to_string()))?;
        if entry.file_type().is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();

    if names.is_empty() {
        return Err(HelpfulError::no_input_files(path));
    }
    Ok(names)
}

/// Run the checker, mapping a strict abort to its own status.
pub(crate) fn run_pass(
    path: &Path,
    strict: bool,
    config: &AppConfig,
) -> anyhow::Result<Result<CorpusReport, StrictAbort>> {
    let names = list_directory(path)?;
    info!(directory = %path.display(), files = names.len(), "Listing complete");
    let vocab = config.vocabulary();
    Ok(CorpusChecker::new(&vocab).strict(strict).run(names))
}

#[derive(Debug, Serialize)]
struct ValidateOutput<'a> {
    directory: String,
    strict: bool,
    clean: bool,
    #[serde(flatten)]
    report: &'a CorpusReport,
}

#[derive(Debug, Serialize)]
pub(crate) struct AbortOutput<'a> {
    pub directory: String,
    pub aborted: AbortDetail<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AbortDetail<'a> {
    pub filename: &'a str,
    pub kind: &'static str,
    pub message: String,
}

impl<'a> AbortOutput<'a> {
    pub fn new(path: &Path, abort: &'a StrictAbort) -> Self {
        Self {
            directory: path.display().to_string(),
            aborted: AbortDetail {
                filename: &abort.filename,
                kind: abort.error.kind(),
                message: abort.error.to_string(),
            },
        }
    }
}

pub fn run(args: ValidateArgs, config: &AppConfig) -> anyhow::Result<Status> {
    let strict = args.strict || config.strict;

    let report = match run_pass(&args.path, strict, config)? {
        Ok(report) => report,
        Err(abort) => {
            print_abort(&args.path, &abort, args.json)?;
            return Ok(Status::StrictAbort);
        }
    };

    if args.json {
        print_json(&ValidateOutput {
            directory: args.path.display().to_string(),
            strict,
            clean: report.is_clean(),
            report: &report,
        })?;
    } else if args.quiet {
        for rejection in &report.rejections {
            println!("{}", rejection.filename);
        }
    } else {
        print_report(&args.path, &report);
    }

    Ok(Status::from_clean(report.is_clean()))
}

pub(crate) fn print_abort(path: &Path, abort: &StrictAbort, json: bool) -> anyhow::Result<()> {
    if json {
        print_json(&AbortOutput::new(path, abort))?;
    } else {
        eprintln!("ABORTED (strict mode): {}", abort.filename);
        eprintln!("  {}", abort.error);
    }
    Ok(())
}

pub(crate) fn print_report(path: &Path, report: &CorpusReport) {
    let summary = &report.summary;
    println!("Validated {} file(s) in {}", summary.total, path.display());
    println!();

    if !report.rejections.is_empty() {
        let rows = report
            .rejections
            .iter()
            .flat_map(|rejection| {
                rejection.reasons.iter().map(move |reason| {
                    vec![
                        rejection.filename.clone(),
                        reason.stage().to_string(),
                        reason.kind().to_string(),
                        reason.message(),
                    ]
                })
            })
            .collect();
        println!("REJECTED:");
        print_table(&["File", "Stage", "Kind", "Reason"], rows);
        println!();
    }

    if !summary.by_zone.is_empty() {
        println!("BY ZONE:");
        print_tallies("Zone", &summary.by_zone);
        println!();
        println!("BY CATEGORY:");
        print_tallies("Category", &summary.by_category);
        println!();
    }

    for violation in &report.violations {
        println!("INTEGRITY: {}", violation);
    }

    println!(
        "Accepted: {}/{} ({})  Rejected: {}",
        summary.accepted,
        summary.total,
        format_rate(summary.accepted, summary.total),
        summary.rejected
    );
}

fn print_tallies(label: &str, tallies: &BTreeMap<String, Tally>) {
    let rows = tallies
        .iter()
        .map(|(name, tally)| {
            vec![
                (name.clone(), None),
                (tally.total.to_string(), None),
                (tally.valid.to_string(), None),
                (
                    format_rate(tally.valid, tally.total),
                    Some(color_for_rate(tally.valid, tally.total)),
                ),
            ]
        })
        .collect::<Vec<Vec<(String, Option<Color>)>>>();
    print_table_colored(&[label, "Total", "Valid", "Rate"], rows);
}
