//! Semantic validation of parsed filenames
//!
//! Checks run in a fixed order and never short-circuit; every broken rule
//! is reported:
//!
//! 1. vocabulary: view-type, zone, category
//! 2. identifier round-trip through the codec
//! 3. sequence range
//! 4. corpus uniqueness (identifier, then sequence in its zone/category bucket)
//! 5. per-zone field requirements, then capture date calendar check
//!
//! Step 4 only runs when a [`CorpusState`] is supplied.

use super::corpus::CorpusState;
use super::error::SemanticError;
use super::types::ParsedFilename;
use super::vocab::{FieldRequirement, ViewType, Vocabulary};
use chrono::NaiveDate;
use imgindex_ids::{decode_id, IdParts, Identifier};
use serde::Serialize;

const MAX_SEQUENCE: u32 = 99;
const DATE_FORMAT: &str = "%Y%m%d";

/// Outcome of validating one parsed filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    filename: String,
    parts: IdParts,
    errors: Vec<SemanticError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Decoded coordinates, available even when validation failed.
    pub fn parts(&self) -> IdParts {
        self.parts
    }

    /// Errors in reporting order.
    pub fn errors(&self) -> &[SemanticError] {
        &self.errors
    }

    pub fn first_error(&self) -> Option<&SemanticError> {
        self.errors.first()
    }

    pub fn into_errors(self) -> Vec<SemanticError> {
        self.errors
    }
}

impl Serialize for ValidationResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        #[derive(Serialize)]
        struct ErrorView<'a> {
            kind: &'a str,
            message: String,
        }

        let errors: Vec<ErrorView<'_>> = self
            .errors
            .iter()
            .map(|e| ErrorView {
                kind: e.kind(),
                message: e.to_string(),
            })
            .collect();

        let mut state = serializer.serialize_struct("ValidationResult", 4)?;
        state.serialize_field("filename", &self.filename)?;
        state.serialize_field("valid", &self.is_valid())?;
        state.serialize_field("decoded", &self.parts)?;
        state.serialize_field("errors", &errors)?;
        state.end()
    }
}

/// Validate one parsed filename.
///
/// With `corpus` set, duplicates against earlier accepted files are errors
/// and an accepted file is recorded in the state. Rejected files leave the
/// state untouched.
pub fn validate(
    parsed: &ParsedFilename,
    vocab: &Vocabulary,
    corpus: Option<&mut CorpusState>,
) -> ValidationResult {
    let identifier = parsed.identifier();
    let parts = decode_id(identifier.value());
    let mut errors = Vec::new();

    check_vocabulary(parsed, parts, vocab, &mut errors);
    check_round_trip(identifier.value(), parts, &mut errors);
    check_sequence_range(parts, &mut errors);

    if let Some(state) = corpus.as_deref() {
        check_uniqueness(state, identifier, parts, &mut errors);
    }

    check_zone_requirements(parsed, parts, vocab, &mut errors);
    check_capture_date(parsed, &mut errors);

    if errors.is_empty() {
        if let Some(state) = corpus {
            state.record(identifier, parts);
        }
    }

    ValidationResult {
        filename: parsed.filename().to_string(),
        parts,
        errors,
    }
}

fn check_vocabulary(
    parsed: &ParsedFilename,
    parts: IdParts,
    vocab: &Vocabulary,
    errors: &mut Vec<SemanticError>,
) {
    if ViewType::from_code(parsed.view_code()).is_none() {
        errors.push(SemanticError::UnknownViewType {
            code: parsed.view_code().to_string(),
        });
    }
    if vocab.zone_label(parts.zone).is_none() {
        errors.push(SemanticError::UnknownZone { zone_id: parts.zone });
    }
    if vocab.category_label(parts.category).is_none() {
        errors.push(SemanticError::UnknownCategory {
            category_id: parts.category,
        });
    }
}

fn check_round_trip(identifier: u32, parts: IdParts, errors: &mut Vec<SemanticError>) {
    let recomposed = parts.encode();
    if recomposed != identifier {
        errors.push(SemanticError::IdentifierMismatch {
            identifier,
            parts,
            recomposed,
        });
    }
}

// Guaranteed by the codec's modulo; kept for parts built by hand.
fn check_sequence_range(parts: IdParts, errors: &mut Vec<SemanticError>) {
    if parts.sequence > MAX_SEQUENCE {
        errors.push(SemanticError::SequenceOutOfRange {
            sequence: parts.sequence,
        });
    }
}

fn check_uniqueness(
    state: &CorpusState,
    identifier: Identifier,
    parts: IdParts,
    errors: &mut Vec<SemanticError>,
) {
    if state.contains_identifier(identifier) {
        errors.push(SemanticError::DuplicateIdentifier { identifier });
    }
    if state.contains_sequence(parts) {
        errors.push(SemanticError::DuplicateSequence {
            zone_id: parts.zone,
            category_id: parts.category,
            sequence: parts.sequence,
        });
    }
}

fn check_zone_requirements(
    parsed: &ParsedFilename,
    parts: IdParts,
    vocab: &Vocabulary,
    errors: &mut Vec<SemanticError>,
) {
    for requirement in vocab.requirements_for(parts.zone) {
        let satisfied = match requirement {
            FieldRequirement::CaptureDate => parsed.date().is_some(),
            FieldRequirement::Year => year_of(parsed).is_some(),
        };
        if satisfied {
            continue;
        }
        let zone_id = parts.zone;
        let zone = vocab.zone_display(zone_id);
        errors.push(match requirement {
            FieldRequirement::CaptureDate => SemanticError::MissingCaptureDate { zone_id, zone },
            FieldRequirement::Year => SemanticError::MissingYear { zone_id, zone },
        });
    }
}

fn check_capture_date(parsed: &ParsedFilename, errors: &mut Vec<SemanticError>) {
    if let Some(date) = parsed.date() {
        if NaiveDate::parse_from_str(date, DATE_FORMAT).is_err() {
            errors.push(SemanticError::InvalidCaptureDate {
                date: date.to_string(),
            });
        }
    }
}

/// Year carried by a filename: the capture date's year, else a `19xx`/`20xx`
/// detail segment.
pub fn year_of(parsed: &ParsedFilename) -> Option<u32> {
    if let Some(date) = parsed.date() {
        return date.get(..4).and_then(|y| y.parse().ok());
    }
    parsed.detail_segments().find_map(year_segment)
}

fn year_segment(segment: &str) -> Option<u32> {
    if segment.len() != 4 || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: u32 = segment.parse().ok()?;
    (1900..=2099).contains(&year).then_some(year)
}
