//! JSON database consumed by the gallery front-end.

use super::error::{CatalogError, Result};
use crate::naming::corpus::duplicate_identifiers;
use crate::naming::{CatalogRecord, Classification, Identifier, IntegrityViolation};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

pub const DATABASE_FILE_NAME: &str = "images_db.json";
pub const DEFAULT_DB_NAME: &str = "ImageCatalog";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDatabase {
    pub db_name: String,
    /// `YYYY-MM-DD` generation date
    pub created_at: String,
    pub count: usize,
    pub items: Vec<CatalogItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub tags: Vec<String>,
    /// Kept as a string so that a hand-edited file can be verified.
    pub classification: String,
}

impl CatalogItem {
    pub fn from_record(record: &CatalogRecord, base_url: Option<&str>) -> Self {
        let title = format!(
            "{} · {} · {}",
            title_case(&record.category),
            record.detail_words(),
            record.view_type
        );
        let url = base_url.map(|base| format!("{}/{}", base.trim_end_matches('/'), record.filename));
        let tags = [
            &record.zone,
            &record.category,
            &record.detail,
            &record.view_type,
        ]
        .iter()
        .map(|t| t.to_lowercase())
        .collect();

        Self {
            id: record.identifier.clone(),
            title,
            url,
            tags,
            classification: record.classification.as_str().to_string(),
        }
    }
}

impl CatalogDatabase {
    pub fn from_records(
        records: &[CatalogRecord],
        db_name: &str,
        base_url: Option<&str>,
        created_at: NaiveDate,
    ) -> Self {
        let items: Vec<CatalogItem> = records
            .iter()
            .map(|r| CatalogItem::from_record(r, base_url))
            .collect();
        Self {
            db_name: db_name.to_string(),
            created_at: created_at.format("%Y-%m-%d").to_string(),
            count: items.len(),
            items,
        }
    }
}

/// Capitalize each word; hyphen and space both start a new word.
fn title_case(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut at_word_start = true;
    for c in label.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

pub fn write_database(path: &Path, db: &CatalogDatabase) -> Result<()> {
    let file = File::create(path).map_err(|e| CatalogError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, db)?;
    writer
        .write_all(b"\n")
        .and_then(|_| writer.flush())
        .map_err(|e| CatalogError::io(path, e))?;
    Ok(())
}

pub fn load_database(path: &Path) -> Result<CatalogDatabase> {
    let file = File::open(path).map_err(|e| CatalogError::io(path, e))?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Structural checks on a database document.
///
/// Empty result means the document is sound.
pub fn verify_database(db: &CatalogDatabase) -> Vec<IntegrityViolation> {
    let mut violations = Vec::new();

    if db.count != db.items.len() {
        violations.push(IntegrityViolation::CountMismatch {
            stated: db.count,
            actual: db.items.len(),
        });
    }

    violations.extend(duplicate_identifiers(db.items.iter().map(|i| i.id.as_str())));

    for (index, item) in db.items.iter().enumerate() {
        if Identifier::parse(&item.id).is_err() {
            violations.push(IntegrityViolation::MalformedIdentifier {
                index,
                id: item.id.clone(),
            });
        }
        if Classification::parse(&item.classification).is_none() {
            violations.push(IntegrityViolation::UnknownClassification {
                index,
                value: item.classification.clone(),
            });
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::{build_record, parse, Vocabulary};
    use tempfile::TempDir;

    fn records(names: &[&str]) -> Vec<CatalogRecord> {
        let vocab = Vocabulary::default();
        names
            .iter()
            .map(|n| build_record(&parse(n).unwrap(), &vocab))
            .collect()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 20).unwrap()
    }

    #[test]
    fn item_title_tags_and_url() {
        let recs = records(&["3701_LAVABO-SUSPENDU_GEN.jpg"]);
        let db = CatalogDatabase::from_records(&recs, "Renovation", Some("https://cdn.example/img/"), date());

        assert_eq!(db.db_name, "Renovation");
        assert_eq!(db.created_at, "2025-08-20");
        assert_eq!(db.count, 1);
        let item = &db.items[0];
        assert_eq!(item.id, "3701");
        assert_eq!(item.title, "Sanitary-Ware · LAVABO SUSPENDU · GEN");
        assert_eq!(
            item.url.as_deref(),
            Some("https://cdn.example/img/3701_LAVABO-SUSPENDU_GEN.jpg")
        );
        assert_eq!(item.tags, vec!["toilet-room", "sanitary-ware", "lavabo-suspendu", "gen"]);
        assert_eq!(item.classification, "undated");
    }

    #[test]
    fn url_omitted_without_base() {
        let recs = records(&["0003_SALON_GEN_20250818.jpg"]);
        let db = CatalogDatabase::from_records(&recs, DEFAULT_DB_NAME, None, date());
        assert!(db.items[0].url.is_none());
        let json = serde_json::to_value(&db).unwrap();
        assert!(json["items"][0].get("url").is_none());
        assert_eq!(json["items"][0]["title"], "General View · SALON · GEN");
    }

    #[test]
    fn sound_database_verifies() {
        let recs = records(&["0003_SALON_GEN_20250818.jpg", "2101_CARRELAGE_GEN.jpg"]);
        let db = CatalogDatabase::from_records(&recs, DEFAULT_DB_NAME, None, date());
        assert!(verify_database(&db).is_empty());
    }

    #[test]
    fn tampered_database_reports_every_violation() {
        let recs = records(&["0003_SALON_GEN_20250818.jpg", "2101_CARRELAGE_GEN.jpg"]);
        let mut db = CatalogDatabase::from_records(&recs, DEFAULT_DB_NAME, None, date());
        db.count = 5;
        db.items[1].id = "0003".to_string();
        db.items.push(CatalogItem {
            id: "12".to_string(),
            title: String::new(),
            url: None,
            tags: vec![],
            classification: "legacy".to_string(),
        });

        let violations = verify_database(&db);
        assert_eq!(
            violations,
            vec![
                IntegrityViolation::CountMismatch { stated: 5, actual: 3 },
                IntegrityViolation::DuplicateIdentifier {
                    id: "0003".to_string(),
                    occurrences: 2
                },
                IntegrityViolation::MalformedIdentifier {
                    index: 2,
                    id: "12".to_string()
                },
                IntegrityViolation::UnknownClassification {
                    index: 2,
                    value: "legacy".to_string()
                },
            ]
        );
    }

    #[test]
    fn written_database_loads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DATABASE_FILE_NAME);
        let recs = records(&["1001_PLAN-ETAGE_GEN_20240105.png"]);
        let db = CatalogDatabase::from_records(&recs, DEFAULT_DB_NAME, None, date());

        write_database(&path, &db).unwrap();
        assert_eq!(load_database(&path).unwrap(), db);
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("general view"), "General View");
        assert_eq!(title_case("existing-fixtures"), "Existing-Fixtures");
        assert_eq!(title_case("CAT_4"), "Cat_4");
    }
}
