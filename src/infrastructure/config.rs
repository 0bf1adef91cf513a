//! JSON configuration of the OTP entry.

use crate::application::CellOptions;
use crate::domain::{OtpError, OtpResult, Platform, StyleSet};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_CELLS: usize = 6;

/// Everything the host reads at startup. Missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Number of cells in the entry
    pub cells: usize,
    pub options: CellOptions,
    pub style: StyleSet,
    /// Overrides the detected platform, e.g. to preview iOS behavior
    pub platform: Option<Platform>,
    /// Where tracing output goes; no logging when unset
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cells: DEFAULT_CELLS,
            options: CellOptions::default(),
            style: StyleSet::default(),
            platform: None,
            log_file: None,
        }
    }
}

pub struct ConfigRepository;

impl ConfigRepository {
    pub fn load(path: &Path) -> OtpResult<AppConfig> {
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str::<AppConfig>(&content).map_err(|source| OtpError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), cells = config.cells, "config loaded");
        Ok(config)
    }

    pub fn save(config: &AppConfig, path: &Path) -> OtpResult<()> {
        let json = serde_json::to_string_pretty(config)?;
        fs::write(path, json)?;
        Ok(())
    }
}
