//! Configuration file loading for repair-aj.
//!
//! Discovers and loads `repair-aj.toml` from the project root.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "repair-aj.toml";

/// Top-level configuration from repair-aj.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RepairAjConfig {
    pub repair: RepairConfig,
}

/// `[repair]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RepairConfig {
    /// Model to repair without prompting.
    pub model: Option<String>,

    /// Preview only; never write.
    pub dry_run: bool,
}

/// Returns the config path when `repair-aj.toml` exists in `project_root`.
pub fn discover_config(project_root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = project_root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

pub fn load_config(path: &Utf8Path) -> anyhow::Result<RepairAjConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

pub fn parse_config(contents: &str) -> anyhow::Result<RepairAjConfig> {
    let config: RepairAjConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from the project root, or return default if not found.
pub fn load_or_default(project_root: &Utf8Path) -> anyhow::Result<RepairAjConfig> {
    match discover_config(project_root) {
        Some(path) => load_config(&path),
        None => Ok(RepairAjConfig::default()),
    }
}

/// Effective settings for one `repair` invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedConfig {
    pub model: Option<String>,
    pub dry_run: bool,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: RepairAjConfig,
}

impl ConfigMerger {
    pub fn new(config: RepairAjConfig) -> Self {
        Self { config }
    }

    /// `--model` replaces the configured model; `--dry-run` can only turn
    /// dry-run on.
    pub fn merge_repair_args(self, cli_model: Option<String>, cli_dry_run: bool) -> MergedConfig {
        MergedConfig {
            model: cli_model.or(self.config.repair.model),
            dry_run: cli_dry_run || self.config.repair.dry_run,
        }
    }
}
