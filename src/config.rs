//! User configuration (`config.toml`).
//!
//! Looked up in the platform config dir unless `--config` names a file.
//! Command-line flags take precedence over anything set here.

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use directories::ProjectDirs;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB

pub const DEFAULT_MAX_PASSES: usize = 64;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Markdown,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub fill: FillConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FillConfig {
    #[serde(default)]
    pub until_stable: bool,

    #[serde(default = "default_max_passes")]
    pub max_passes: usize,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            until_stable: false,
            max_passes: default_max_passes(),
        }
    }
}

fn default_max_passes() -> usize {
    DEFAULT_MAX_PASSES
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

pub fn default_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "gridfill")?;
    Some(proj.config_dir().join("config.toml"))
}

impl Config {
    /// Load from `explicit`, or from the default location if it exists.
    ///
    /// A missing default file yields the defaults; a missing explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) if path.is_file() => path,
                _ => {
                    debug!("no config file, using defaults");
                    return Ok(Self::default());
                }
            },
        };
        Self::from_file(&path)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let meta = std::fs::metadata(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        if meta.len() > MAX_CONFIG_FILE_BYTES {
            bail!(
                "Refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_CONFIG_FILE_BYTES
            );
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
