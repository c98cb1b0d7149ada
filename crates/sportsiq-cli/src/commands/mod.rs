//! Subcommand implementations.

use std::path::PathBuf;

use anyhow::Result;

use sportsiq_core::store::TriviaStore;
use sportsiq_sources::config::{load_config_from, resolve_data_dir, TriviaConfig};

pub mod init;
pub mod play;
pub mod prefs;
pub mod reset_stats;
pub mod scores;
pub mod stats;

/// Paths given on the command line, ahead of the subcommand.
pub struct Paths {
    pub data_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

impl Paths {
    /// Load the config and open the store it points at.
    pub fn open(&self) -> Result<(TriviaConfig, TriviaStore)> {
        let config = load_config_from(self.config.as_deref())?;
        let dir = resolve_data_dir(self.data_dir.as_deref(), &config)?;
        tracing::debug!("using data directory {}", dir.display());
        Ok((config, TriviaStore::open(dir)))
    }

    pub fn store(&self) -> Result<TriviaStore> {
        self.open().map(|(_, store)| store)
    }
}
