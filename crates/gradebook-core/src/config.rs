//! Gradebook configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GradebookError, Result};
use crate::stats::TopperPolicy;

/// Top-level gradebook configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradebookConfig {
    /// JSON file holding the student records.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Whether a term where everyone averages zero has a topper.
    #[serde(default)]
    pub topper_policy: TopperPolicy,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("gradebook.json")
}

impl Default for GradebookConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            topper_policy: TopperPolicy::default(),
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `gradebook.toml` in the current directory
/// 2. `~/.config/gradebook/config.toml`
///
/// Environment variable override: `GRADEBOOK_DATA_FILE`.
pub fn load_config() -> Result<GradebookConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<GradebookConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => {
            return Err(GradebookError::Config(format!(
                "config file not found: {}",
                p.display()
            )))
        }
        None => {
            let local = PathBuf::from("gradebook.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|home| home.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            let content = std::fs::read_to_string(&path).map_err(|e| {
                GradebookError::Config(format!("failed to read {}: {e}", path.display()))
            })?;
            parse_config(&content).map_err(|e| {
                GradebookError::Config(format!("failed to parse {}: {e}", path.display()))
            })?
        }
        None => GradebookConfig::default(),
    };

    if let Ok(data_file) = std::env::var("GRADEBOOK_DATA_FILE") {
        if !data_file.is_empty() {
            config.data_file = PathBuf::from(data_file);
        }
    }

    Ok(config)
}

fn parse_config(content: &str) -> std::result::Result<GradebookConfig, toml::de::Error> {
    toml::from_str(content)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradebook"))
}
