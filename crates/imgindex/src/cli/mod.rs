//! CLI commands for imgindex
//!
//! Each command takes its args struct plus the loaded [`AppConfig`] and
//! returns the [`Status`] the process should exit with.
//!
//! [`AppConfig`]: imgindex::AppConfig

pub mod check;
pub mod config;
pub mod error;
pub mod id;
pub mod index;
pub mod output;
pub mod validate;
pub mod verify;

use std::process::ExitCode;

/// Process exit status. Every outcome has its own code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Everything accepted, no violations
    Clean,
    /// Unexpected failure
    Failure,
    /// Pass completed with rejections or integrity violations
    Issues,
    /// Strict mode stopped at a semantic failure
    StrictAbort,
    /// Directory held no files
    NoInput,
    /// Directory missing or not a directory
    MissingDirectory,
}

impl Status {
    pub fn code(self) -> u8 {
        match self {
            Status::Clean => 0,
            Status::Failure => 1,
            Status::Issues => 2,
            Status::StrictAbort => 3,
            Status::NoInput => 4,
            Status::MissingDirectory => 5,
        }
    }

    /// `Clean` when nothing was found, `Issues` otherwise.
    pub fn from_clean(clean: bool) -> Self {
        if clean {
            Status::Clean
        } else {
            Status::Issues
        }
    }
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        ExitCode::from(status.code())
    }
}
