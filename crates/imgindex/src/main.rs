//! imgindex command-line launcher
//!
//! Validates construction-site image filenames and builds the gallery
//! catalog (CSV sidecar plus JSON database) from a directory of images.

use clap::{Parser, Subcommand};
use imgindex::AppConfig;
use imgindex_logging::{init_logging, LogConfig};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, warn};

mod cli;

use cli::error::{print_json_error, status_of, HelpfulError};
use cli::Status;

#[derive(Parser, Debug)]
#[command(
    name = "imgindex",
    version,
    about = "Validate image filenames and generate the image catalog"
)]
struct Cli {
    /// Enable verbose logging (info/debug to stderr)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Config file (default: ~/.imgindex/config.toml when present)
    #[arg(long, global = true, env = "IMGINDEX_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate every file in a directory and print a report
    Validate {
        /// Directory holding the images (not scanned recursively)
        path: PathBuf,

        /// Abort on the first semantic failure
        #[arg(long)]
        strict: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Print rejected filenames only
        #[arg(short, long)]
        quiet: bool,
    },

    /// Validate a directory and write images_sidecar.csv and images_db.json
    Index {
        /// Directory holding the images
        path: PathBuf,

        /// Output directory for the catalog files
        #[arg(short, long)]
        out: PathBuf,

        /// Prefix for item URLs in the JSON database
        #[arg(long)]
        base_url: Option<String>,

        /// Database name recorded in images_db.json
        #[arg(long)]
        db_name: Option<String>,

        /// Abort on the first semantic failure
        #[arg(long)]
        strict: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check individual filenames (no corpus uniqueness)
    Check {
        /// Filenames to check
        #[arg(required = true)]
        filenames: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Identifier codec tools
    Id {
        #[command(subcommand)]
        action: IdCommands,
    },

    /// Verify the integrity of a written images_db.json
    Verify {
        /// Path to images_db.json
        path: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show resolved paths and the effective vocabulary
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
enum IdCommands {
    /// Split an identifier into zone, category and sequence
    Decode {
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Build an identifier from zone, category and sequence
    Encode {
        zone: u32,
        category: u32,
        sequence: u32,

        #[arg(long)]
        json: bool,
    },
}

fn command_wants_json(command: &Commands) -> bool {
    match command {
        Commands::Validate { json, .. }
        | Commands::Index { json, .. }
        | Commands::Check { json, .. }
        | Commands::Verify { json, .. }
        | Commands::Config { json } => *json,
        Commands::Id { action } => match action {
            IdCommands::Decode { json, .. } | IdCommands::Encode { json, .. } => *json,
        },
    }
}

/// Load the config file a command depends on; a broken file is fatal.
fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let config = AppConfig::load_or_default(path)
        .map_err(|e| HelpfulError::config_error(&e.to_string()))?;
    debug!(?config, "Loaded configuration");
    Ok(config)
}

fn run_command(cli: Cli) -> anyhow::Result<Status> {
    match cli.command {
        Commands::Validate {
            path,
            strict,
            json,
            quiet,
        } => cli::validate::run(
            cli::validate::ValidateArgs {
                path,
                strict,
                json,
                quiet,
            },
            &load_config(cli.config.as_deref())?,
        ),
        Commands::Index {
            path,
            out,
            base_url,
            db_name,
            strict,
            json,
        } => cli::index::run(
            cli::index::IndexArgs {
                path,
                out,
                base_url,
                db_name,
                strict,
                json,
            },
            &load_config(cli.config.as_deref())?,
        ),
        Commands::Check { filenames, json } => cli::check::run(
            cli::check::CheckArgs { filenames, json },
            &load_config(cli.config.as_deref())?,
        ),
        Commands::Id { action } => {
            // Labels only; fall back to the built-in tables.
            let config = AppConfig::load_or_default(cli.config.as_deref()).unwrap_or_else(|err| {
                warn!("Ignoring configuration: {}", err);
                AppConfig::default()
            });
            let (action, json) = match action {
                IdCommands::Decode { id, json } => (cli::id::IdAction::Decode { id }, json),
                IdCommands::Encode {
                    zone,
                    category,
                    sequence,
                    json,
                } => (
                    cli::id::IdAction::Encode {
                        zone,
                        category,
                        sequence,
                    },
                    json,
                ),
            };
            cli::id::run(cli::id::IdArgs { action, json }, &config)
        }
        Commands::Verify { path, json } => cli::verify::run(cli::verify::VerifyArgs { path, json }),
        Commands::Config { json } => {
            let loaded = AppConfig::load_or_default(cli.config.as_deref());
            cli::config::run(
                cli::config::ConfigArgs {
                    json,
                    config_path: cli.config,
                },
                loaded,
            )
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json_mode = command_wants_json(&cli.command);

    let log_dir = imgindex::config::logs_dir();
    let _log_guard = match init_logging(LogConfig {
        app_name: "imgindex",
        log_dir: Some(&log_dir),
        verbose: cli.verbose,
    }) {
        Ok(guard) => {
            debug!(
                file_logging = guard.has_file_writer(),
                log_dir = %log_dir.display(),
                "Logging initialized"
            );
            Some(guard)
        }
        Err(err) => {
            eprintln!("Warning: logging disabled: {:#}", err);
            None
        }
    };

    match run_command(cli) {
        Ok(status) => status.into(),
        Err(err) => {
            if json_mode {
                print_json_error(&err);
            } else {
                eprintln!("{:#}", err);
            }
            status_of(&err).into()
        }
    }
}
