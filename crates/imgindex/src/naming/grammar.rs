//! Filename grammar
//!
//! Recognizes `NNNN_DETAIL_VIEWTYPE[_YYYYMMDD].ext`:
//!
//! - `NNNN`: 4 ASCII digits (the identifier)
//! - `DETAIL`: uppercase letters, digits and Latin-1 accented capitals,
//!   optionally hyphen-joined; no spaces, no lowercase
//! - `VIEWTYPE`: exactly 3 uppercase letters
//! - `YYYYMMDD`: optional capture date
//! - `ext`: lowercase, one of [`ALLOWED_EXTENSIONS`]
//!
//! Matching is case-sensitive. Nothing is normalized.

use super::error::{GrammarError, GrammarViolation};
use super::types::ParsedFilename;
use imgindex_ids::Identifier;
use regex::Regex;
use std::sync::LazyLock;

pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "tiff"];

// `[0-9]` rather than `\d`: the regex crate's `\d` matches any Unicode digit.
static FILENAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?P<id>[0-9]{4})_",
        r"(?P<detail>[A-Z0-9À-ÖØ-Ý]+(?:-[A-Z0-9À-ÖØ-Ý]+)*)_",
        r"(?P<view>[A-Z]{3})",
        r"(?:_(?P<date>[0-9]{8}))?",
        r"\.(?P<ext>jpg|jpeg|png|webp|tiff)$",
    ))
    .unwrap()
});

/// Parse a bare filename (no directory part).
pub fn parse(filename: &str) -> Result<ParsedFilename, GrammarError> {
    let reject = || GrammarError {
        filename: filename.to_string(),
        reason: diagnose(filename),
    };

    let caps = FILENAME_PATTERN.captures(filename).ok_or_else(reject)?;

    let id_str = &caps["id"];
    let identifier = Identifier::parse(id_str).map_err(|_| reject())?;

    Ok(ParsedFilename::new(
        filename,
        identifier,
        id_str,
        &caps["detail"],
        &caps["view"],
        caps.name("date").map(|m| m.as_str()),
        &caps["ext"],
    ))
}

/// Whether a name would parse, without building the result.
pub fn is_match(filename: &str) -> bool {
    FILENAME_PATTERN.is_match(filename)
}

/// Explain a non-match from the whole name only.
fn diagnose(filename: &str) -> GrammarViolation {
    let Some((stem, ext)) = filename.rsplit_once('.') else {
        return GrammarViolation::MissingExtension;
    };
    if stem.is_empty() || ext.is_empty() {
        return GrammarViolation::MissingExtension;
    }

    let lowered = ext.to_lowercase();
    if !ALLOWED_EXTENSIONS.contains(&lowered.as_str()) {
        GrammarViolation::DisallowedExtension(ext.to_string())
    } else if lowered != ext {
        GrammarViolation::UppercaseExtension(ext.to_string())
    } else {
        GrammarViolation::PatternMismatch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dated_worksite_name() {
        let parsed = parse("0003_SALON-PROTECTION_GEN_20250818.jpg").unwrap();
        assert_eq!(parsed.identifier().value(), 3);
        assert_eq!(parsed.identifier_str(), "0003");
        assert_eq!(parsed.detail(), "SALON-PROTECTION");
        assert_eq!(parsed.view_code(), "GEN");
        assert_eq!(parsed.date(), Some("20250818"));
        assert_eq!(parsed.extension(), "jpg");

        let parts = parsed.parts();
        assert_eq!((parts.zone, parts.category, parts.sequence), (0, 0, 3));
    }

    #[test]
    fn parses_undated_name() {
        let parsed = parse("2401_CARRELAGE-DESALIGNEMENT_DET.jpeg").unwrap();
        assert_eq!(parsed.date(), None);
        assert_eq!(parsed.extension(), "jpeg");
        assert_eq!(
            parsed.detail_segments().collect::<Vec<_>>(),
            vec!["CARRELAGE", "DESALIGNEMENT"]
        );
    }

    #[test]
    fn accepts_accented_uppercase_detail() {
        let parsed = parse("2201_BAIGNOIRE-ÉCLAT_MAC.png").unwrap();
        assert_eq!(parsed.detail(), "BAIGNOIRE-ÉCLAT");
        assert!(is_match("3601_FENÊTRE_DET.webp"));
        assert!(is_match("3602_ÀÖØÝ_DET.tiff"));
    }

    #[test]
    fn rejects_multiplication_sign_between_accent_ranges() {
        assert!(!is_match("3601_A×B_DET.jpg"));
    }

    #[test]
    fn rejects_lowercase_detail() {
        let err = parse("0001_sdb_GEN_20250818.jpg").unwrap_err();
        assert_eq!(err.reason, GrammarViolation::PatternMismatch);
        assert_eq!(err.filename, "0001_sdb_GEN_20250818.jpg");
    }

    #[test]
    fn rejects_lowercase_view_type() {
        assert!(parse("2001_SDB_gen.jpg").is_err());
    }

    #[test]
    fn rejects_space_in_detail() {
        assert!(parse("0001_SDB PROTECTION_GEN_20250818.jpg").is_err());
    }

    #[test]
    fn rejects_non_four_digit_identifier() {
        assert!(parse("001_SDB_GEN_20250818.jpg").is_err());
        assert!(parse("00001_SDB_GEN_20250818.jpg").is_err());
        assert!(parse("٠٠٠١_SDB_GEN.jpg").is_err());
    }

    #[test]
    fn rejects_disallowed_extension() {
        let err = parse("2001_SDB_GEN.gif").unwrap_err();
        assert_eq!(
            err.reason,
            GrammarViolation::DisallowedExtension("gif".to_string())
        );
    }

    #[test]
    fn rejects_uppercase_extension_without_normalizing() {
        let err = parse("2001_SDB_GEN.JPG").unwrap_err();
        assert_eq!(
            err.reason,
            GrammarViolation::UppercaseExtension("JPG".to_string())
        );
    }

    #[test]
    fn rejects_wrong_view_type_length() {
        assert!(parse("0001_SDB_DETAIL_20250818.jpg").is_err());
        assert!(parse("0001_SDB_GE_20250818.jpg").is_err());
    }

    #[test]
    fn rejects_malformed_date_suffix() {
        assert!(parse("0001_SDB_GEN_2025081.jpg").is_err());
        assert!(parse("0001_SDB_GEN_202508180.jpg").is_err());
    }

    #[test]
    fn rejects_empty_segments_and_missing_extension() {
        assert!(parse("0001_SDB--X_GEN.jpg").is_err());
        assert!(parse("0001_-SDB_GEN.jpg").is_err());
        let err = parse("0001_SDB_GEN").unwrap_err();
        assert_eq!(err.reason, GrammarViolation::MissingExtension);
    }
}
