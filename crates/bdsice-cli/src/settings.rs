//! User settings read from `settings.toml`.
//!
//! The file lives in the platform configuration folder:
//! - macOS: ~/Library/Application Support/es.bdsice.bdsice/
//! - Windows: %APPDATA%/bdsice/bdsice/config/
//! - Linux: ~/.config/bdsice/
//!
//! A missing file means defaults. The file is never created by the tool.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

const APP_QUALIFIER: &str = "es";
const APP_ORG: &str = "bdsice";
const APP_NAME: &str = "bdsice";
const CONFIG_FILENAME: &str = "settings.toml";
const DEFAULT_DATABASE_DIR: &str = "database";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the raw `.xer` files, the series records and
    /// `db.json`.
    pub database_path: PathBuf,
    /// Skip raw files that fail to decode during a rebuild instead of
    /// aborting it.
    pub skip_invalid: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            skip_invalid: true,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
}

fn default_database_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join(DEFAULT_DATABASE_DIR))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_DIR))
}

/// Get the path to the settings file.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn settings_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Parse settings text. Missing keys take their default.
pub fn parse_settings(content: &str) -> Result<Settings, toml::de::Error> {
    toml::from_str(content)
}

/// Load settings from `path`.
///
/// A missing file gives defaults; an unreadable or malformed one is an
/// error so that a typo does not silently point at another database.
pub fn load_settings_from(path: &Path) -> anyhow::Result<Settings> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("failed to read settings file {}", path.display())));
        }
    };
    let settings = parse_settings(&content)
        .map_err(|e| anyhow::anyhow!("invalid settings file {}: {e}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded settings");
    Ok(settings)
}

/// Load settings from the platform configuration folder.
pub fn load_settings() -> anyhow::Result<Settings> {
    match settings_path() {
        Some(path) => load_settings_from(&path),
        None => {
            tracing::warn!("could not determine settings path, using defaults");
            Ok(Settings::default())
        }
    }
}
