//! Subcommand implementations.

use std::path::PathBuf;

use anyhow::{Context, Result};

use gradebook_core::config::load_config_from;
use gradebook_core::persist;
use gradebook_core::{GradebookConfig, StudentStore};

pub mod init;
pub mod menu;
pub mod rank;
pub mod report;
pub mod students;
pub mod topper;
pub mod transfer;

/// Resolved configuration plus the data file every command works against.
pub struct Workspace {
    pub config: GradebookConfig,
    pub data_file: PathBuf,
}

impl Workspace {
    pub fn load(data: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<Self> {
        let config = load_config_from(config_path.as_deref())?;
        let data_file = data.unwrap_or_else(|| config.data_file.clone());
        tracing::debug!(data_file = %data_file.display(), "workspace resolved");
        Ok(Self { config, data_file })
    }

    /// Load the data file, or an empty store if it does not exist yet.
    pub fn open_store(&self) -> Result<StudentStore> {
        persist::load_or_default(&self.data_file)
            .with_context(|| format!("failed to load {}", self.data_file.display()))
    }

    pub fn save_store(&self, store: &StudentStore) -> Result<()> {
        persist::save_json(store, &self.data_file)
            .with_context(|| format!("failed to write {}", self.data_file.display()))
    }
}
