//! Value types shared by the parser, validator and record builder

use imgindex_ids::{IdParts, Identifier};
use serde::{Deserialize, Serialize};

/// Components captured from a filename that matched the grammar.
///
/// Only the parser creates these; fields are read through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedFilename {
    filename: String,
    identifier: Identifier,
    identifier_str: String,
    detail: String,
    view_code: String,
    date: Option<String>,
    extension: String,
}

impl ParsedFilename {
    pub(crate) fn new(
        filename: &str,
        identifier: Identifier,
        identifier_str: &str,
        detail: &str,
        view_code: &str,
        date: Option<&str>,
        extension: &str,
    ) -> Self {
        Self {
            filename: filename.to_string(),
            identifier,
            identifier_str: identifier_str.to_string(),
            detail: detail.to_string(),
            view_code: view_code.to_string(),
            date: date.map(str::to_string),
            extension: extension.to_string(),
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn identifier(&self) -> Identifier {
        self.identifier
    }

    /// The identifier exactly as written, zero padding included.
    pub fn identifier_str(&self) -> &str {
        &self.identifier_str
    }

    pub fn parts(&self) -> IdParts {
        self.identifier.parts()
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Hyphen-separated segments of the detail token.
    pub fn detail_segments(&self) -> impl Iterator<Item = &str> {
        self.detail.split('-')
    }

    pub fn view_code(&self) -> &str {
        &self.view_code
    }

    /// Raw `YYYYMMDD` capture date, if the optional group matched.
    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn classification(&self) -> Classification {
        if self.date.is_some() {
            Classification::Dated
        } else {
            Classification::Undated
        }
    }
}

/// Derived grouping used by downstream reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Dated,
    Undated,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Dated => "dated",
            Classification::Undated => "undated",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dated" => Some(Classification::Dated),
            "undated" => Some(Classification::Undated),
            _ => None,
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
