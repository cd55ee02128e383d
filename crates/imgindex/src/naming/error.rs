//! Error types for filename validation
//!
//! Two disjoint families:
//! - [`GrammarError`]: the name is not parseable at all (no partial data)
//! - [`SemanticError`]: the name parses but breaks a vocabulary, codec,
//!   uniqueness or per-zone rule
//!
//! [`IntegrityViolation`] covers cross-record properties of a finished
//! catalog rather than single files.

use imgindex_ids::{IdParts, Identifier};
use serde::Serialize;
use thiserror::Error;

/// Why a filename failed the grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarViolation {
    /// No `.ext` suffix at all
    MissingExtension,
    /// Extension outside the allow-list
    DisallowedExtension(String),
    /// Allowed extension written with uppercase letters
    UppercaseExtension(String),
    /// Anything else: bad identifier, lowercase or spaced detail, wrong view-type shape
    PatternMismatch,
}

impl std::fmt::Display for GrammarViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarViolation::MissingExtension => write!(f, "missing file extension"),
            GrammarViolation::DisallowedExtension(ext) => {
                write!(f, "extension not allowed: .{}", ext)
            }
            GrammarViolation::UppercaseExtension(ext) => {
                write!(f, "extension must be lowercase: .{}", ext)
            }
            GrammarViolation::PatternMismatch => write!(
                f,
                "does not match NNNN_DETAIL_VIEWTYPE[_YYYYMMDD].ext (uppercase detail and view-type, no spaces)"
            ),
        }
    }
}

/// Filename does not match the canonical grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{filename}: {reason}")]
pub struct GrammarError {
    pub filename: String,
    pub reason: GrammarViolation,
}

impl GrammarError {
    pub fn kind(&self) -> &'static str {
        match self.reason {
            GrammarViolation::MissingExtension => "missing_extension",
            GrammarViolation::DisallowedExtension(_) => "disallowed_extension",
            GrammarViolation::UppercaseExtension(_) => "uppercase_extension",
            GrammarViolation::PatternMismatch => "pattern_mismatch",
        }
    }
}

/// A rule broken by a parseable filename.
///
/// Variants are declared in reporting order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SemanticError {
    #[error("view-type '{code}' is not one of PAN, GEN, DET, MAC, MGM, MGS, MGP, MGB, DEG")]
    UnknownViewType { code: String },

    #[error("zone id {zone_id} is unknown")]
    UnknownZone { zone_id: u32 },

    #[error("category id {category_id} is unknown")]
    UnknownCategory { category_id: u32 },

    #[error("identifier {identifier:04} inconsistent with zone/category/sequence {parts} (recomposes to {recomposed:04})")]
    IdentifierMismatch {
        identifier: u32,
        parts: IdParts,
        recomposed: u32,
    },

    #[error("sequence {sequence} outside 00..99")]
    SequenceOutOfRange { sequence: u32 },

    #[error("duplicate identifier {identifier}")]
    DuplicateIdentifier { identifier: Identifier },

    #[error("duplicate sequence {sequence:02} for zone {zone_id}, category {category_id}")]
    DuplicateSequence {
        zone_id: u32,
        category_id: u32,
        sequence: u32,
    },

    #[error("capture date (_YYYYMMDD) required for {zone} zone ({zone_id})")]
    MissingCaptureDate { zone_id: u32, zone: String },

    #[error("year required for {zone} zone ({zone_id}): add a capture date or a YYYY detail segment")]
    MissingYear { zone_id: u32, zone: String },

    #[error("capture date {date} is not a calendar date")]
    InvalidCaptureDate { date: String },
}

impl SemanticError {
    /// Stable code for machine-readable output.
    pub fn kind(&self) -> &'static str {
        match self {
            SemanticError::UnknownViewType { .. } => "unknown_view_type",
            SemanticError::UnknownZone { .. } => "unknown_zone",
            SemanticError::UnknownCategory { .. } => "unknown_category",
            SemanticError::IdentifierMismatch { .. } => "identifier_mismatch",
            SemanticError::SequenceOutOfRange { .. } => "sequence_out_of_range",
            SemanticError::DuplicateIdentifier { .. } => "duplicate_identifier",
            SemanticError::DuplicateSequence { .. } => "duplicate_sequence",
            SemanticError::MissingCaptureDate { .. } => "missing_capture_date",
            SemanticError::MissingYear { .. } => "missing_year",
            SemanticError::InvalidCaptureDate { .. } => "invalid_capture_date",
        }
    }
}

/// Strict mode stopped the pass at the first semantic failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("strict mode: {filename}: {error}")]
pub struct StrictAbort {
    pub filename: String,
    pub error: SemanticError,
}

/// A cross-record property of a catalog that does not hold.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntegrityViolation {
    #[error("count mismatch: stated {stated} but {actual} records")]
    CountMismatch { stated: usize, actual: usize },

    #[error("identifier {id} appears {occurrences} times")]
    DuplicateIdentifier { id: String, occurrences: usize },

    #[error("item {index}: identifier '{id}' is not 4 digits")]
    MalformedIdentifier { index: usize, id: String },

    #[error("item {index}: classification '{value}' is not dated/undated")]
    UnknownClassification { index: usize, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grammar_error_carries_filename_and_reason() {
        let err = GrammarError {
            filename: "photo.gif".to_string(),
            reason: GrammarViolation::DisallowedExtension("gif".to_string()),
        };
        assert_eq!(err.to_string(), "photo.gif: extension not allowed: .gif");
        assert_eq!(err.kind(), "disallowed_extension");
    }

    #[test]
    fn semantic_messages_are_human_readable() {
        let dup = SemanticError::DuplicateIdentifier {
            identifier: Identifier::new(2101).unwrap(),
        };
        assert_eq!(dup.to_string(), "duplicate identifier 2101");

        let seq = SemanticError::DuplicateSequence {
            zone_id: 2,
            category_id: 1,
            sequence: 1,
        };
        assert_eq!(
            seq.to_string(),
            "duplicate sequence 01 for zone 2, category 1"
        );

        let mismatch = SemanticError::IdentifierMismatch {
            identifier: 150,
            parts: IdParts::new(0, 0, 150),
            recomposed: 150,
        };
        assert!(mismatch.to_string().contains("0150"));
    }

    #[test]
    fn integrity_violation_serializes_with_kind_tag() {
        let v = IntegrityViolation::CountMismatch {
            stated: 3,
            actual: 2,
        };
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["kind"], "count_mismatch");
        assert_eq!(json["stated"], 3);
    }
}
