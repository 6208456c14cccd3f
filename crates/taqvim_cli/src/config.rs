//! `taqvim.toml` handling
//!
//! ```toml
//! [picker]
//! min_year = 1350
//! initial_jalali_date = "1379-10-05"
//! centered = true
//!
//! [simulate]
//! frame_ms = 16
//! script = "drag day 90; wait 300"
//! ```
//!
//! Both sections are optional.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use taqvim_picker::PickerConfig;

/// File looked up in the working directory when `--config` is not given
pub const CONFIG_FILE: &str = "taqvim.toml";

/// Contents of `taqvim.toml`
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TaqvimConfig {
    #[serde(default)]
    pub picker: PickerConfig,
    #[serde(default)]
    pub simulate: SimulateConfig,
}

/// Defaults for `taqvim simulate`
#[derive(Debug, Deserialize, Serialize)]
pub struct SimulateConfig {
    /// Length of one simulated frame
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
    /// Script used when none is passed on the command line
    #[serde(default)]
    pub script: Option<String>,
}

fn default_frame_ms() -> u64 {
    16
}

impl Default for SimulateConfig {
    fn default() -> Self {
        Self {
            frame_ms: default_frame_ms(),
            script: None,
        }
    }
}

impl TaqvimConfig {
    /// Load an explicit file, or `taqvim.toml` in `dir` when present
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }

        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            return Self::load_file(&path);
        }

        tracing::debug!("no {} in {}, using defaults", CONFIG_FILE, dir.display());
        Ok(Self::default())
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: TaqvimConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        tracing::debug!("loaded {}", path.display());
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
