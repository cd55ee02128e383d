//! Naming - filename codec and integrity validation
//!
//! Image filenames follow `NNNN_DETAIL_VIEWTYPE[_YYYYMMDD].ext`, where the
//! 4-digit identifier packs zone, category and sequence.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────┐     ┌───────────┐     ┌───────────────┐     ┌──────────────┐
//! │  grammar  │────▶│ validator │────▶│    corpus     │────▶│    record    │
//! │  (parse)  │     │ (vocab +  │     │ (uniqueness,  │     │ (CatalogRec) │
//! │           │     │  codec)   │     │  summary)     │     │              │
//! └───────────┘     └───────────┘     └───────────────┘     └──────────────┘
//! ```

pub mod corpus;
pub mod error;
pub mod grammar;
pub mod record;
pub mod types;
pub mod validator;
pub mod vocab;

pub use corpus::{
    CorpusChecker, CorpusReport, CorpusState, CorpusSummary, Rejection, RejectionReason, Tally,
};
pub use error::{GrammarError, GrammarViolation, IntegrityViolation, SemanticError, StrictAbort};
pub use grammar::{parse, ALLOWED_EXTENSIONS};
pub use imgindex_ids::{checked_encode_id, decode_id, encode_id, IdParts, Identifier};
pub use record::{build_record, CatalogRecord};
pub use types::{Classification, ParsedFilename};
pub use validator::{validate, ValidationResult};
pub use vocab::{FieldRequirement, LabelEntry, ViewType, Vocabulary, ZoneRule};
