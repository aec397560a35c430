//! # Config File Support
//!
//! Optional `piazza.toml` loading and CLI-flag precedence.
//!
//! ```toml
//! [viewer]
//! user_id = "user-amara"
//!
//! [storage]
//! database = "piazza.db"
//! backend = "redb"
//! ```
//!
//! CLI flags always win over file values; file values win over defaults.
//! A missing config file is not an error.

use crate::cli::Cli;
use piazza_core::{PiazzaError, UserId};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Config file location probed when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "piazza.toml";

/// Database path used when neither flag nor file provides one.
pub const DEFAULT_DATABASE_PATH: &str = "piazza.db";

// =============================================================================
// CONFIG FILE SHAPE
// =============================================================================

/// Parsed `piazza.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub viewer: ViewerSection,
    #[serde(default)]
    pub storage: StorageSection,
}

/// `[viewer]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewerSection {
    pub user_id: Option<String>,
}

/// `[storage]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageSection {
    pub database: Option<PathBuf>,
    pub backend: Option<String>,
}

impl Config {
    /// Load the config file.
    ///
    /// With an explicit path, the file must exist and parse. Without one,
    /// `./piazza.toml` is used when present, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, PiazzaError> {
        match path {
            Some(p) => Self::from_file(p),
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse a config file from disk.
    fn from_file(path: &Path) -> Result<Self, PiazzaError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| PiazzaError::IoError(format!("{}: {}", path.display(), e)))?;
        Self::from_str(&raw)
            .map_err(|e| PiazzaError::DeserializationError(format!("{}: {}", path.display(), e)))
    }
}

impl FromStr for Config {
    type Err = toml::de::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s)
    }
}

// =============================================================================
// RESOLVED SETTINGS
// =============================================================================

/// Which storage backend to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Durable redb slots.
    Redb,
    /// Volatile in-memory slots.
    Memory,
}

impl FromStr for BackendKind {
    type Err = PiazzaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "redb" => Ok(Self::Redb),
            "memory" => Ok(Self::Memory),
            other => Err(PiazzaError::InvalidInput(format!(
                "unknown backend '{other}' (expected redb or memory)"
            ))),
        }
    }
}

/// Effective settings after merging CLI flags, config file, and defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database: PathBuf,
    pub backend: BackendKind,
    pub viewer: Option<UserId>,
    pub json: bool,
}

impl Settings {
    /// Merge CLI flags over config-file values over defaults.
    pub fn resolve(cli: &Cli, config: &Config) -> Result<Self, PiazzaError> {
        let database = cli
            .database
            .clone()
            .or_else(|| config.storage.database.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH));

        let backend = match cli.backend.as_deref().or(config.storage.backend.as_deref()) {
            Some(raw) => raw.parse()?,
            None => BackendKind::Redb,
        };

        let viewer = cli
            .viewer
            .clone()
            .or_else(|| config.viewer.user_id.clone())
            .map(UserId::new);

        Ok(Self {
            database,
            backend,
            viewer,
            json: cli.json_mode,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
