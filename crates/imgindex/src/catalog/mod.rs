//! Catalog writers: CSV sidecar and JSON database.

pub mod database;
pub mod error;
pub mod sidecar;

pub use database::{
    load_database, verify_database, write_database, CatalogDatabase, CatalogItem,
    DATABASE_FILE_NAME, DEFAULT_DB_NAME,
};
pub use error::{CatalogError, Result};
pub use sidecar::{read_sidecar, write_records, write_sidecar, SIDECAR_FILE_NAME, SIDECAR_HEADER};
