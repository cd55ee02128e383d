//! Check command - validate individual filenames
//!
//! Names are checked on their own: no directory listing and no corpus
//! uniqueness, so two names with the same identifier both pass.

use crate::cli::output::{print_json, print_table_colored};
use crate::cli::Status;
use comfy_table::Color;
use imgindex::naming::{parse, validate, RejectionReason, Vocabulary};
use imgindex::AppConfig;
use serde::Serialize;

/// Arguments for the check command
#[derive(Debug)]
pub struct CheckArgs {
    pub filenames: Vec<String>,
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct CheckOutcome {
    pub filename: String,
    pub valid: bool,
    /// `grammar` when the name did not parse
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoded: Option<String>,
    pub errors: Vec<RejectionReason>,
}

pub fn check_one(filename: &str, vocab: &Vocabulary) -> CheckOutcome {
    match parse(filename) {
        Err(err) => CheckOutcome {
            filename: filename.to_string(),
            valid: false,
            stage: Some("grammar"),
            decoded: None,
            errors: vec![RejectionReason::Grammar(err)],
        },
        Ok(parsed) => {
            let result = validate(&parsed, vocab, None);
            let parts = result.parts();
            CheckOutcome {
                filename: filename.to_string(),
                valid: result.is_valid(),
                stage: (!result.is_valid()).then_some("semantic"),
                decoded: Some(format!(
                    "{} / {} / {:02}",
                    vocab.zone_display(parts.zone),
                    vocab.category_display(parts.category),
                    parts.sequence
                )),
                errors: result
                    .into_errors()
                    .into_iter()
                    .map(RejectionReason::Semantic)
                    .collect(),
            }
        }
    }
}

pub fn run(args: CheckArgs, config: &AppConfig) -> anyhow::Result<Status> {
    let vocab = config.vocabulary();
    let outcomes: Vec<CheckOutcome> = args
        .filenames
        .iter()
        .map(|name| check_one(name, &vocab))
        .collect();
    let all_valid = outcomes.iter().all(|o| o.valid);

    if args.json {
        print_json(&outcomes)?;
    } else {
        let rows = outcomes
            .iter()
            .map(|o| {
                let (verdict, color) = if o.valid {
                    ("OK".to_string(), Color::Green)
                } else {
                    ("REJECTED".to_string(), Color::Red)
                };
                let reasons: Vec<String> = o.errors.iter().map(|e| e.message()).collect();
                vec![
                    (o.filename.clone(), None),
                    (verdict, Some(color)),
                    (o.decoded.clone().unwrap_or_else(|| "-".to_string()), None),
                    (reasons.join("\n"), None),
                ]
            })
            .collect();
        print_table_colored(&["File", "Result", "Zone / Category / Seq", "Reason"], rows);
    }

    Ok(Status::from_clean(all_valid))
}
