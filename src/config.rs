//! Threshold configuration.
//!
//! Later sources win: built-in defaults, then the config file, then
//! environment variables, then command-line flags.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

use crate::engine::{BudgetStatusEngine, Thresholds};

pub const ENV_APPROACHING: &str = "BUDGETDESK_APPROACHING";
pub const ENV_OVER: &str = "BUDGETDESK_OVER";
pub const CONFIG_FILE_NAME: &str = "budgetdesk.json";

/// Threshold values given on the command line, unparsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub approaching: Option<String>,
    pub over: Option<String>,
}

/// Contents of the JSON config file. Missing keys keep the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub approaching_threshold: Option<Decimal>,
    pub over_threshold: Option<Decimal>,
}

impl FileConfig {
    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).context("Invalid config file")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    pub thresholds: Thresholds,
}

impl Config {
    /// Resolve the configuration from every source.
    ///
    /// An explicit `config_path` must exist; the default location is optional.
    pub fn load(config_path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let file = match config_path {
            Some(path) => Some(read_config(path)?),
            None => match default_config_path() {
                Some(path) if path.exists() => Some(read_config(&path)?),
                _ => None,
            },
        };
        Self::resolve(file.as_deref(), |key| std::env::var(key).ok(), overrides)
    }

    pub fn resolve(
        file: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
        overrides: &Overrides,
    ) -> Result<Self> {
        let defaults = Thresholds::default();
        let mut approaching = defaults.approaching();
        let mut over = defaults.over();

        if let Some(contents) = file {
            let file = FileConfig::from_json(contents)?;
            approaching = file.approaching_threshold.unwrap_or(approaching);
            over = file.over_threshold.unwrap_or(over);
        }

        if let Some(raw) = env(ENV_APPROACHING) {
            approaching = parse_percent(&raw).with_context(|| format!("Invalid {ENV_APPROACHING}"))?;
        }
        if let Some(raw) = env(ENV_OVER) {
            over = parse_percent(&raw).with_context(|| format!("Invalid {ENV_OVER}"))?;
        }

        if let Some(raw) = &overrides.approaching {
            approaching = parse_percent(raw).context("Invalid --approaching value")?;
        }
        if let Some(raw) = &overrides.over {
            over = parse_percent(raw).context("Invalid --over value")?;
        }

        let thresholds = Thresholds::new(approaching, over)?;
        debug!(%approaching, %over, "resolved thresholds");
        Ok(Self { thresholds })
    }

    pub fn engine(&self) -> BudgetStatusEngine {
        BudgetStatusEngine::new(self.thresholds)
    }
}

/// `85`, `85.5` or `85%`.
fn parse_percent(raw: &str) -> Result<Decimal> {
    let cleaned = raw.trim().trim_end_matches('%').trim();
    Decimal::from_str(cleaned).with_context(|| format!("'{}' is not a percentage", raw.trim()))
}

fn read_config(path: &Path) -> Result<String> {
    debug!(path = %path.display(), "reading config file");
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))
}

pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "budgetdesk", "BudgetDesk")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
