use crate::error::{InsightsError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Run configuration. Every field has a default so the binary works with
/// no config file at all; `config.toml` and then CLI flags layer on top.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub dataset: DatasetConfig,
    pub analysis: AnalysisConfig,
    pub charts: ChartsConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatasetConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// How many genres to keep for the genre chart and summary listing.
    pub top_genres: usize,
    /// How many titles the top-rated ranking returns.
    pub top_titles: usize,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChartsConfig {
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig::default(),
            analysis: AnalysisConfig::default(),
            charts: ChartsConfig::default(),
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("netflix_titles.csv"),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_genres: 10,
            top_titles: 10,
        }
    }
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("charts"),
        }
    }
}

impl Config {
    /// Load configuration from `config.toml`, falling back to defaults if
    /// the file is absent. A file that exists but fails to parse is a
    /// configuration error, not something to silently ignore.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_PATH))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            InsightsError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}
