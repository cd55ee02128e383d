//! Catalog records built from accepted filenames

use super::types::{Classification, ParsedFilename};
use super::vocab::{ViewType, Vocabulary};
use serde::{Deserialize, Serialize};

/// One accepted image, as handed to the catalog writers.
///
/// Field order is the CSV sidecar column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub filename: String,
    /// Zero-padded 4-digit identifier
    pub identifier: String,
    pub zone_id: u32,
    pub zone: String,
    pub category_id: u32,
    pub category: String,
    pub sequence: u32,
    pub detail: String,
    pub view_type: String,
    pub view_label: String,
    pub extension: String,
    /// Raw `YYYYMMDD`
    pub capture_date: Option<String>,
    pub classification: Classification,
}

/// Build the record for a file that passed validation.
pub fn build_record(parsed: &ParsedFilename, vocab: &Vocabulary) -> CatalogRecord {
    let parts = parsed.parts();
    let view_label = ViewType::from_code(parsed.view_code())
        .map(|v| v.label().to_string())
        .unwrap_or_default();

    CatalogRecord {
        filename: parsed.filename().to_string(),
        identifier: parsed.identifier().padded(),
        zone_id: parts.zone,
        zone: vocab.zone_display(parts.zone),
        category_id: parts.category,
        category: vocab.category_display(parts.category),
        sequence: parts.sequence,
        detail: parsed.detail().to_string(),
        view_type: parsed.view_code().to_string(),
        view_label,
        extension: parsed.extension().to_string(),
        capture_date: parsed.date().map(str::to_string),
        classification: parsed.classification(),
    }
}

impl CatalogRecord {
    /// Detail with hyphens read as spaces ("SALON PROTECTION").
    pub fn detail_words(&self) -> String {
        self.detail.replace('-', " ")
    }
}
