//! Configuration loading from linkrank.toml.
//!
//! The file lives next to the pages of a corpus and only tunes the rankers;
//! command-line flags override anything set here.
//!
//! ## Example
//!
//! ```toml
//! [ranking]
//! damping = 0.85
//! samples = 10000
//! convergence-threshold = 0.001
//! max-iterations = 10000
//! seed = 42
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::types::RankingConfig;

/// Name of the per-corpus config file.
pub const CONFIG_FILE: &str = "linkrank.toml";

/// linkrank configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// File this config was read from, if any (for display).
    pub source: Option<PathBuf>,

    pub ranking: RankingConfig,
}

/// Raw config as deserialized from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    ranking: RankingConfig,
}

impl Config {
    /// Load `linkrank.toml` from `directory`, or defaults if there is none.
    pub fn load(directory: &Path) -> Result<Self, ConfigError> {
        let path = directory.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }
        Self::load_file(&path)
    }

    /// Load a specific config file.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            source: Some(path.to_path_buf()),
            ranking: raw.ranking,
        })
    }

    /// Format config for verbose display.
    pub fn display_summary(&self) -> String {
        let source = match &self.source {
            Some(path) => path.display().to_string(),
            None => "(defaults)".to_string(),
        };
        let seed = match self.ranking.seed {
            Some(seed) => seed.to_string(),
            None => "entropy".to_string(),
        };
        format!(
            "config={source} damping={} samples={} threshold={} seed={seed}",
            self.ranking.damping, self.ranking.samples, self.ranking.convergence_threshold
        )
    }
}
