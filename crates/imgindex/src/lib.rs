//! imgindex - image filename validation and catalog generation
//!
//! The library holds the naming engine and catalog writers; the `imgindex`
//! binary wraps them in a CLI.

pub mod catalog;
pub mod config;
pub mod naming;

pub use catalog::{CatalogDatabase, CatalogError, CatalogItem};
pub use config::{AppConfig, ConfigError};
pub use naming::{
    build_record, parse, validate, CatalogRecord, CorpusChecker, CorpusReport, ParsedFilename,
    ValidationResult, Vocabulary,
};
