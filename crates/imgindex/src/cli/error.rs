//! Helpful error types for CLI commands
//!
//! Every error includes:
//! - What went wrong
//! - Context about the situation
//! - Suggestions for how to fix it
//!
//! It also carries the process exit status the failure maps to.

use super::Status;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// An error with helpful context and suggestions
#[derive(Debug, Serialize)]
pub struct HelpfulError {
    /// The main error message
    pub message: String,
    /// Additional context about what was happening
    pub context: Option<String>,
    /// Suggestions for how to fix the error
    pub suggestions: Vec<String>,
    #[serde(skip)]
    pub status: Status,
}

impl HelpfulError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            status: Status::Failure,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_suggestions(mut self, suggestions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.suggestions.extend(suggestions.into_iter().map(|s| s.into()));
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    // === Common error constructors ===

    /// Image directory does not exist
    pub fn directory_not_found(path: &Path) -> Self {
        Self::new(format!("Directory not found: {}", path.display()))
            .with_context("The image directory does not exist on the filesystem")
            .with_suggestions([
                format!("TRY: Check that the path exists: ls -la {}", path.display()),
                "TRY: Check for typos in the path".to_string(),
            ])
            .with_status(Status::MissingDirectory)
    }

    /// Path exists but is not a directory
    pub fn not_a_directory(path: &Path) -> Self {
        Self::new(format!("Not a directory: {}", path.display()))
            .with_context("This command expects a directory of images, not a file")
            .with_suggestions([
                format!(
                    "TRY: Check a single name instead: imgindex check {}",
                    path.file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| path.display().to_string())
                ),
                format!(
                    "TRY: Validate the parent directory: imgindex validate {}",
                    path.parent()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| ".".to_string())
                ),
            ])
            .with_status(Status::MissingDirectory)
    }

    /// Directory holds no regular files
    pub fn no_input_files(path: &Path) -> Self {
        Self::new(format!("No files found in {}", path.display()))
            .with_context("Only regular files directly inside the directory are considered")
            .with_suggestions([
                "TRY: Subdirectories are not scanned; point at the folder holding the images"
                    .to_string(),
                format!("TRY: List the directory: ls -la {}", path.display()),
            ])
            .with_status(Status::NoInput)
    }

    /// File does not exist
    pub fn file_not_found(path: &Path) -> Self {
        Self::new(format!("File not found: {}", path.display()))
            .with_context("The specified file does not exist")
            .with_suggestions([
                format!("TRY: Check if the file exists: ls -la {}", path.display()),
                "TRY: Generate a database first: imgindex index <DIR> --out <DIR>".to_string(),
            ])
    }

    /// File cannot be read or written
    pub fn io_error(path: &Path, reason: &str) -> Self {
        Self::new(format!("Cannot access: {}", path.display()))
            .with_context(reason.to_string())
            .with_suggestions([
                format!("TRY: Check permissions: ls -la {}", path.display()),
                "TRY: Ensure the parent directory exists and is writable".to_string(),
            ])
    }

    /// JSON database cannot be parsed
    pub fn json_parse_error(path: &Path, details: &str) -> Self {
        Self::new(format!("JSON parse error: {}", details))
            .with_context(format!("Failed to parse database: {}", path.display()))
            .with_suggestions([
                "TRY: Validate the JSON: cat FILE | python -m json.tool".to_string(),
                "TRY: Regenerate the database with: imgindex index".to_string(),
            ])
    }

    /// Configuration file problem
    pub fn config_error(details: &str) -> Self {
        Self::new(format!("Configuration error: {}", details))
            .with_context("imgindex reads an optional TOML file from its home directory or --config")
            .with_suggestions([
                "TRY: Show resolved paths: imgindex config".to_string(),
                "TRY: Requirements are 'capture_date' or 'year'".to_string(),
            ])
    }

    /// Identifier argument out of range or not numeric
    pub fn invalid_identifier(value: &str, details: &str) -> Self {
        Self::new(format!("Invalid identifier '{}': {}", value, details))
            .with_context("Identifiers are integers from 0 to 9999 (zone*1000 + category*100 + sequence)")
            .with_suggestion("TRY: imgindex id decode 2101")
    }
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ERROR: {}", self.message)?;

        if let Some(ctx) = &self.context {
            writeln!(f, "CONTEXT: {}", ctx)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            for suggestion in &self.suggestions {
                writeln!(f, "  {}", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HelpfulError {}

/// Exit status for any error reaching `main`.
pub fn status_of(err: &anyhow::Error) -> Status {
    err.downcast_ref::<HelpfulError>()
        .map(|e| e.status)
        .unwrap_or(Status::Failure)
}

/// Print an error as `{"error": {...}}` on stdout for `--json` callers.
pub fn print_json_error(err: &anyhow::Error) {
    let body = match err.downcast_ref::<HelpfulError>() {
        Some(helpful) => serde_json::json!({ "error": helpful }),
        None => serde_json::json!({
            "error": {
                "message": format!("{:#}", err),
                "context": null,
                "suggestions": [],
            }
        }),
    };
    match serde_json::to_string_pretty(&body) {
        Ok(text) => println!("{}", text),
        Err(_) => eprintln!("{:#}", err),
    }
}
