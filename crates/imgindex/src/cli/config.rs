//! Config command - show resolved paths and the effective vocabulary

use crate::cli::output::print_table;
use crate::cli::Status;
use imgindex::config::{default_config_path, imgindex_home, logs_dir};
use imgindex::naming::ViewType;
use imgindex::{AppConfig, ConfigError};
use std::path::{Path, PathBuf};

/// Arguments for the config command
#[derive(Debug)]
pub struct ConfigArgs {
    pub json: bool,
    /// `--config` path when given
    pub config_path: Option<PathBuf>,
}

fn exists_label(path: &Path) -> &'static str {
    if path.exists() {
        "exists"
    } else {
        "not found"
    }
}

/// A config file that fails to load is reported beside the paths; the
/// built-in vocabulary is shown in its place.
pub fn run(args: ConfigArgs, loaded: Result<AppConfig, ConfigError>) -> anyhow::Result<Status> {
    let (config, config_error) = match loaded {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err.to_string())),
    };
    let config = &config;
    let status = if config_error.is_some() {
        Status::Failure
    } else {
        Status::Clean
    };
    let home = imgindex_home();
    let logs = logs_dir();
    let config_path = args.config_path.unwrap_or_else(default_config_path);
    let vocab = config.vocabulary();

    if args.json {
        let zones: Vec<_> = vocab
            .zones()
            .map(|(id, label)| serde_json::json!({ "id": id, "label": label }))
            .collect();
        let categories: Vec<_> = vocab
            .categories()
            .map(|(id, label)| serde_json::json!({ "id": id, "label": label }))
            .collect();
        let view_types: Vec<_> = ViewType::ALL
            .iter()
            .map(|v| serde_json::json!({ "code": v.code(), "label": v.label() }))
            .collect();
        let output = serde_json::json!({
            "home": home.to_string_lossy(),
            "logs": {
                "path": logs.to_string_lossy(),
                "exists": logs.exists(),
            },
            "config_file": {
                "path": config_path.to_string_lossy(),
                "exists": config_path.exists(),
                "error": config_error,
            },
            "db_name": config.db_name,
            "base_url": config.base_url,
            "strict": config.strict,
            "zones": zones,
            "categories": categories,
            "view_types": view_types,
            "zone_rules": vocab.zone_rules(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(status);
    }

    println!("IMGINDEX CONFIGURATION");
    println!("======================");
    println!();
    println!("Home:     {}", home.display());
    println!("Logs:     {} ({})", logs.display(), exists_label(&logs));
    println!("Config:   {} ({})", config_path.display(), exists_label(&config_path));
    if let Some(err) = &config_error {
        println!("          ERROR: {}", err);
        println!("          showing built-in defaults below");
    }
    println!();
    println!("Database name: {}", config.db_name);
    println!(
        "Base URL:      {}",
        config.base_url.as_deref().unwrap_or("(none)")
    );
    println!("Strict:        {}", if config.strict { "yes" } else { "no" });
    println!();

    println!("ZONES:");
    print_table(
        &["Id", "Label", "Requires"],
        vocab
            .zones()
            .map(|(id, label)| {
                let requires: Vec<String> = vocab
                    .requirements_for(id)
                    .map(|r| format!("{:?}", r))
                    .collect();
                vec![id.to_string(), label.to_string(), requires.join(", ")]
            })
            .collect(),
    );
    println!();
    println!("CATEGORIES:");
    print_table(
        &["Id", "Label"],
        vocab
            .categories()
            .map(|(id, label)| vec![id.to_string(), label.to_string()])
            .collect(),
    );
    println!();
    println!("VIEW TYPES:");
    print_table(
        &["Code", "Label"],
        ViewType::ALL
            .iter()
            .map(|v| vec![v.code().to_string(), v.label().to_string()])
            .collect(),
    );

    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args(path: &Path) -> ConfigArgs {
        ConfigArgs {
            json: true,
            config_path: Some(path.to_path_buf()),
        }
    }

    #[test]
    fn test_loaded_config_is_clean() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "db_name = \"Renovation\"\n").unwrap();
        let loaded = AppConfig::load(&path);
        assert_eq!(run(args(&path), loaded).unwrap(), Status::Clean);
    }

    #[test]
    fn test_broken_config_still_reports() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[[zones]]\nid = \"four\"\n").unwrap();
        let loaded = AppConfig::load(&path);
        assert!(loaded.is_err());
        assert_eq!(run(args(&path), loaded).unwrap(), Status::Failure);

        let text = ConfigArgs {
            json: false,
            config_path: Some(path.clone()),
        };
        assert_eq!(run(text, AppConfig::load(&path)).unwrap(), Status::Failure);
    }
}
