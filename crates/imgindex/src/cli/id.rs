//! Id command - identifier codec tools

use crate::cli::error::HelpfulError;
use crate::cli::output::{print_json, print_table};
use crate::cli::Status;
use imgindex::naming::{decode_id, IdParts, Identifier, Vocabulary};
use imgindex::AppConfig;
use serde::Serialize;

#[derive(Debug)]
pub enum IdAction {
    Decode { id: String },
    Encode { zone: u32, category: u32, sequence: u32 },
}

#[derive(Debug)]
pub struct IdArgs {
    pub action: IdAction,
    pub json: bool,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct IdReport {
    pub identifier: String,
    pub value: u32,
    pub zone_id: u32,
    pub zone: Option<String>,
    pub category_id: u32,
    pub category: Option<String>,
    pub sequence: u32,
    /// decode(encode(parts)) gives the parts back
    pub round_trip: bool,
}

impl IdReport {
    fn new(identifier: Identifier, requested: IdParts, vocab: &Vocabulary) -> Self {
        Self {
            identifier: identifier.padded(),
            value: identifier.value(),
            zone_id: requested.zone,
            zone: vocab.zone_label(requested.zone).map(str::to_string),
            category_id: requested.category,
            category: vocab.category_label(requested.category).map(str::to_string),
            sequence: requested.sequence,
            round_trip: decode_id(identifier.value()) == requested,
        }
    }
}

pub fn decode(raw: &str, vocab: &Vocabulary) -> Result<IdReport, HelpfulError> {
    let value: u32 = raw
        .trim()
        .parse()
        .map_err(|_| HelpfulError::invalid_identifier(raw, "not a non-negative integer"))?;
    let identifier =
        Identifier::new(value).map_err(|e| HelpfulError::invalid_identifier(raw, &e.to_string()))?;
    Ok(IdReport::new(identifier, identifier.parts(), vocab))
}

pub fn encode(parts: IdParts, vocab: &Vocabulary) -> Result<IdReport, HelpfulError> {
    let identifier = Identifier::from_parts(parts)
        .map_err(|e| HelpfulError::invalid_identifier(&parts.to_string(), &e.to_string()))?;
    Ok(IdReport::new(identifier, parts, vocab))
}

pub fn run(args: IdArgs, config: &AppConfig) -> anyhow::Result<Status> {
    let vocab = config.vocabulary();
    let report = match args.action {
        IdAction::Decode { id } => decode(&id, &vocab)?,
        IdAction::Encode {
            zone,
            category,
            sequence,
        } => encode(IdParts::new(zone, category, sequence), &vocab)?,
    };

    if args.json {
        print_json(&report)?;
    } else {
        let unknown = || "(unknown)".to_string();
        print_table(
            &["Identifier", "Zone", "Category", "Sequence"],
            vec![vec![
                report.identifier.clone(),
                format!("{} {}", report.zone_id, report.zone.clone().unwrap_or_else(unknown)),
                format!(
                    "{} {}",
                    report.category_id,
                    report.category.clone().unwrap_or_else(unknown)
                ),
                format!("{:02}", report.sequence),
            ]],
        );
        if !report.round_trip {
            println!(
                "WARNING: coordinates do not round-trip; {} decodes to {}",
                report.identifier,
                decode_id(report.value)
            );
        }
    }

    Ok(Status::from_clean(report.round_trip))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_with_labels() {
        let report = decode("2101", &Vocabulary::default()).unwrap();
        assert_eq!(report.zone.as_deref(), Some("bathroom"));
        assert_eq!(report.category.as_deref(), Some("plumbing"));
        assert_eq!(report.sequence, 1);
        assert!(report.round_trip);

        let short = decode("42", &Vocabulary::default()).unwrap();
        assert_eq!(short.identifier, "0042");
        assert_eq!(short.zone.as_deref(), Some("worksite"));
    }

    #[test]
    fn test_decode_rejects_bad_input() {
        assert!(decode("10000", &Vocabulary::default()).is_err());
        assert!(decode("abc", &Vocabulary::default()).is_err());
    }

    #[test]
    fn test_encode_round_trip_flag() {
        let ok = encode(IdParts::new(3, 6, 1), &Vocabulary::default()).unwrap();
        assert_eq!(ok.identifier, "3601");
        assert!(ok.round_trip);

        // category 12 overflows into the zone digit
        let overflow = encode(IdParts::new(1, 12, 0), &Vocabulary::default()).unwrap();
        assert_eq!(overflow.identifier, "2200");
        assert!(!overflow.round_trip);

        assert!(encode(IdParts::new(10, 0, 0), &Vocabulary::default()).is_err());
    }

    #[test]
    fn test_encode_overflowing_coordinates_is_an_error() {
        let vocab = Vocabulary::default();
        assert!(encode(IdParts::new(4_294_968, 0, 0), &vocab).is_err());
        assert!(encode(IdParts::new(0, u32::MAX, 0), &vocab).is_err());
        let err = encode(IdParts::new(0, 0, u32::MAX), &vocab).unwrap_err();
        assert!(err.message.contains("Invalid identifier"));
    }
}
