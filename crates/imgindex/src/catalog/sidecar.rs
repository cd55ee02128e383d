//! CSV sidecar: one row per accepted image.

use super::error::{CatalogError, Result};
use crate::naming::CatalogRecord;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const SIDECAR_FILE_NAME: &str = "images_sidecar.csv";

/// Column order matches the [`CatalogRecord`] field order.
pub const SIDECAR_HEADER: &[&str] = &[
    "filename",
    "identifier",
    "zone_id",
    "zone",
    "category_id",
    "category",
    "sequence",
    "detail",
    "view_type",
    "view_label",
    "extension",
    "capture_date",
    "classification",
];

/// Write records to any writer. The header is written even with no rows.
pub fn write_records<W: Write>(writer: W, records: &[CatalogRecord]) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(SIDECAR_HEADER)?;
    for record in records {
        csv.serialize(record)?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn write_sidecar(path: &Path, records: &[CatalogRecord]) -> Result<()> {
    let file = File::create(path).map_err(|e| CatalogError::io(path, e))?;
    write_records(file, records)
}

/// Read a sidecar back into records.
pub fn read_sidecar(path: &Path) -> Result<Vec<CatalogRecord>> {
    let file = File::open(path).map_err(|e| CatalogError::io(path, e))?;
    let mut reader = csv::Reader::from_reader(file);
    let records = reader
        .deserialize::<CatalogRecord>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(records)
}
