//! # Config & CLI Parsing Tests
//!
//! Settings precedence: CLI flags win over file values, file values win
//! over defaults.

use clap::Parser;
use piazza::cli::Cli;
use piazza::cli::config::{BackendKind, Config, Settings};
use std::io::Write;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).expect("valid args")
}

#[test]
fn defaults_when_nothing_is_given() {
    let cli = parse(&["piazza", "status"]);
    let settings = Settings::resolve(&cli, &Config::default()).expect("resolve");

    assert_eq!(settings.backend, BackendKind::Redb);
    assert_eq!(settings.database.to_string_lossy(), "piazza.db");
    assert!(settings.viewer.is_none());
    assert!(!settings.json);
}

#[test]
fn file_values_override_defaults() {
    let config: Config = r#"
        [viewer]
        user_id = "user-amara"

        [storage]
        database = "elsewhere.db"
        backend = "memory"
    "#
    .parse()
    .expect("parse");

    let cli = parse(&["piazza", "status"]);
    let settings = Settings::resolve(&cli, &config).expect("resolve");

    assert_eq!(settings.backend, BackendKind::Memory);
    assert_eq!(settings.database.to_string_lossy(), "elsewhere.db");
    assert_eq!(
        settings.viewer.as_ref().map(|v| v.as_str()),
        Some("user-amara")
    );
}

#[test]
fn cli_flags_override_file_values() {
    let config: Config = r#"
        [viewer]
        user_id = "user-amara"

        [storage]
        backend = "memory"
    "#
    .parse()
    .expect("parse");

    let cli = parse(&[
        "piazza",
        "--backend",
        "redb",
        "--viewer",
        "user-bengt",
        "--database",
        "cli.db",
        "status",
    ]);
    let settings = Settings::resolve(&cli, &config).expect("resolve");

    assert_eq!(settings.backend, BackendKind::Redb);
    assert_eq!(settings.database.to_string_lossy(), "cli.db");
    assert_eq!(
        settings.viewer.as_ref().map(|v| v.as_str()),
        Some("user-bengt")
    );
}

#[test]
fn unknown_backend_is_rejected() {
    let cli = parse(&["piazza", "--backend", "sqlite", "status"]);
    assert!(Settings::resolve(&cli, &Config::default()).is_err());
}

#[test]
fn config_file_loads_from_explicit_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("piazza.toml");
    let mut file = std::fs::File::create(&path).expect("create");
    writeln!(file, "[storage]\nbackend = \"memory\"").expect("write");

    let config = Config::load(Some(&path)).expect("load");
    assert_eq!(config.storage.backend.as_deref(), Some("memory"));
}

#[test]
fn missing_explicit_config_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("does-not-exist.toml");

    assert!(Config::load(Some(&path)).is_err());
}

#[test]
fn json_mode_flag_carries_through() {
    let cli = parse(&["piazza", "--json-mode", "trending"]);
    let settings = Settings::resolve(&cli, &Config::default()).expect("resolve");
    assert!(settings.json);
}
