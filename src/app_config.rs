use serde::Deserialize;
use std::path::Path;

use crate::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Settings of the `clash-panel` tool, read from `panel.toml`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
#[serde(default)]
pub struct PanelConfig {
    /// UI context id; entries invisible to it are left out of exports.
    pub viewer: Option<String>,
    pub include_disabled: bool,
    pub strip_inactive_transports: bool,
    pub output: OutputFormat,
    /// `tracing` filter directive, overridden by `RUST_LOG`.
    pub log_level: Option<String>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            viewer: None,
            include_disabled: false,
            strip_inactive_transports: true,
            output: OutputFormat::Yaml,
            log_level: None,
        }
    }
}

impl PanelConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let data = std::fs::read(path)?;
        let cfg = toml::from_slice(&data)?;
        Ok(cfg)
    }

    /// Like [`PanelConfig::load_from_file`], but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }
}
