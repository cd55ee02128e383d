use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn imgindex_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_imgindex"))
}

fn run_cli(args: &[&str], home: &Path) -> Output {
    let mut cmd = Command::new(imgindex_bin());
    cmd.args(args)
        .env("IMGINDEX_HOME", home)
        .env("RUST_LOG", "error")
        .env_remove("IMGINDEX_CONFIG");
    cmd.output().expect("failed to execute imgindex CLI")
}

fn run_cli_json(args: &[&str], home: &Path) -> (i32, serde_json::Value) {
    let output = run_cli(args, home);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json_start = stdout.find(|c| c == '{' || c == '[').unwrap_or_else(|| {
        panic!(
            "no JSON payload found in output\nstdout:\n{}\nstderr:\n{}",
            stdout,
            String::from_utf8_lossy(&output.stderr)
        )
    });
    let mut deserializer = serde_json::Deserializer::from_str(&stdout[json_start..]);
    let value = serde_json::Value::deserialize(&mut deserializer).expect("invalid JSON output");
    (output.status.code().expect("terminated by signal"), value)
}

fn images_dir(names: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for name in names {
        fs::write(dir.path().join(name), b"").unwrap();
    }
    dir
}

#[test]
fn index_writes_sidecar_and_database() {
    let home = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let images = images_dir(&[
        "0003_SALON-PROTECTION_GEN_20250818.jpg",
        "2101_CARRELAGE_GEN.jpg",
        "3701_LAVABO_DET.webp",
    ]);

    let (code, json) = run_cli_json(
        &[
            "index",
            images.path().to_str().unwrap(),
            "--out",
            out.path().to_str().unwrap(),
            "--base-url",
            "https://cdn.example/images/",
            "--db-name",
            "Renovation",
            "--json",
        ],
        home.path(),
    );
    assert_eq!(code, 0);
    assert_eq!(json["indexed"], 3);
    assert_eq!(json["clean"], true);

    let sidecar = fs::read_to_string(out.path().join("images_sidecar.csv")).unwrap();
    let mut lines = sidecar.lines();
    assert_eq!(
        lines.next().unwrap(),
        "filename,identifier,zone_id,zone,category_id,category,sequence,detail,view_type,view_label,extension,capture_date,classification"
    );
    assert_eq!(lines.count(), 3);

    let db: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.path().join("images_db.json")).unwrap())
            .unwrap();
    assert_eq!(db["db_name"], "Renovation");
    assert_eq!(db["count"], 3);
    let first = &db["items"][0];
    assert_eq!(first["id"], "0003");
    assert_eq!(first["title"], "General View · SALON PROTECTION · GEN");
    assert_eq!(
        first["url"],
        "https://cdn.example/images/0003_SALON-PROTECTION_GEN_20250818.jpg"
    );
    assert_eq!(first["classification"], "dated");
    assert_eq!(db["items"][2]["classification"], "undated");

    let (code, json) = run_cli_json(
        &["verify", out.path().join("images_db.json").to_str().unwrap(), "--json"],
        home.path(),
    );
    assert_eq!(code, 0);
    assert_eq!(json["valid"], true);
}

#[test]
fn index_skips_rejected_files() {
    let home = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let images = images_dir(&["2101_CARRELAGE_GEN.jpg", "2101_DOUBLON_GEN.jpg", "README.md"]);

    let (code, json) = run_cli_json(
        &[
            "index",
            images.path().to_str().unwrap(),
            "--out",
            out.path().to_str().unwrap(),
            "--json",
        ],
        home.path(),
    );
    assert_eq!(code, 2);
    assert_eq!(json["total"], 3);
    assert_eq!(json["indexed"], 1);
    assert_eq!(json["rejected"].as_array().unwrap().len(), 2);

    let db: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.path().join("images_db.json")).unwrap())
            .unwrap();
    assert_eq!(db["db_name"], "ImageCatalog");
    assert!(db["items"][0].get("url").is_none());
}

#[test]
fn config_file_extends_vocabulary() {
    let home = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let images = images_dir(&["4101_EVIER_GEN_20250301.jpg"]);
    let images_arg = images.path().to_str().unwrap();

    let (code, json) = run_cli_json(&["validate", images_arg, "--json"], home.path());
    assert_eq!(code, 2);
    assert_eq!(json["rejections"][0]["reasons"][0]["kind"], "unknown_zone");

    fs::write(
        home.path().join("config.toml"),
        "base_url = \"https://cdn.example\"\n\n[[zones]]\nid = 4\nlabel = \"kitchen\"\n",
    )
    .unwrap();
    let (code, json) = run_cli_json(
        &["index", images_arg, "--out", out.path().to_str().unwrap(), "--json"],
        home.path(),
    );
    assert_eq!(code, 0);
    assert_eq!(json["indexed"], 1);

    let db: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.path().join("images_db.json")).unwrap())
            .unwrap();
    assert_eq!(db["items"][0]["url"], "https://cdn.example/4101_EVIER_GEN_20250301.jpg");
    assert_eq!(db["items"][0]["tags"][0], "kitchen");
}

#[test]
fn missing_explicit_config_is_an_error() {
    let home = TempDir::new().unwrap();
    let images = images_dir(&["2101_CARRELAGE_GEN.jpg"]);
    let missing = home.path().join("absent.toml");

    let (code, json) = run_cli_json(
        &[
            "validate",
            images.path().to_str().unwrap(),
            "--config",
            missing.to_str().unwrap(),
            "--json",
        ],
        home.path(),
    );
    assert_eq!(code, 1);
    assert!(json["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Configuration error"));
}

#[test]
fn verify_flags_tampered_database() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("images_db.json");
    fs::write(
        &path,
        r#"{
  "db_name": "ImageCatalog",
  "created_at": "2025-08-20",
  "count": 3,
  "items": [
    {"id": "2101", "title": "a", "tags": [], "classification": "undated"},
    {"id": "2101", "title": "b", "tags": [], "classification": "archived"}
  ]
}"#,
    )
    .unwrap();

    let (code, json) = run_cli_json(&["verify", path.to_str().unwrap(), "--json"], home.path());
    assert_eq!(code, 2);
    assert_eq!(json["valid"], false);
    let kinds: Vec<&str> = json["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["kind"].as_str().unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec!["count_mismatch", "duplicate_identifier", "unknown_classification"]
    );
}

#[test]
fn broken_default_config_spares_config_and_id_commands() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("config.toml"), "strict = \"sometimes\"\n").unwrap();

    let (code, json) = run_cli_json(&["config", "--json"], home.path());
    assert_eq!(code, 1);
    assert_eq!(json["config_file"]["exists"], true);
    assert!(json["config_file"]["error"]
        .as_str()
        .unwrap()
        .contains("Invalid config"));
    assert_eq!(json["zones"][0]["label"], "worksite");

    let (code, json) = run_cli_json(&["id", "decode", "2101", "--json"], home.path());
    assert_eq!(code, 0);
    assert_eq!(json["zone"], "bathroom");

    let images = images_dir(&["2101_CARRELAGE_GEN.jpg"]);
    let (code, json) = run_cli_json(
        &["validate", images.path().to_str().unwrap(), "--json"],
        home.path(),
    );
    assert_eq!(code, 1);
    assert!(json["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Configuration error"));
}
