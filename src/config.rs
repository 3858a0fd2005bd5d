//! Configuration System
//!
//! Scan and logging configuration with serde defaults, loaded from an
//! optional workspace `graft.toml` with `GRAFT_*` environment overrides.

use crate::error::DiscoveryError;
use crate::logging::LoggingConfig;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Workspace configuration file name.
pub const CONFIG_FILE_NAME: &str = "graft.toml";

/// Scan configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Name of the nested work-in-progress subdirectory holding stubs
    #[serde(default = "default_wip_dir_name")]
    pub wip_dir_name: String,

    /// Directory name suffixes excluded from generation-only discovery.
    /// Suffix match, not exact match: "Foo.bin" and "Widgets.Properties"
    /// are both excluded by the defaults.
    #[serde(default = "default_excluded_dir_suffixes")]
    pub excluded_dir_suffixes: Vec<String>,
}

fn default_wip_dir_name() -> String {
    "WORKINPROGRESS".to_string()
}

fn default_excluded_dir_suffixes() -> Vec<String> {
    vec!["bin".to_string(), "obj".to_string(), "Properties".to_string()]
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            wip_dir_name: default_wip_dir_name(),
            excluded_dir_suffixes: default_excluded_dir_suffixes(),
        }
    }
}

impl ScanConfig {
    /// Whether a directory name matches the build-artifact denylist.
    pub fn is_excluded_dir(&self, dir_name: &str) -> bool {
        self.excluded_dir_suffixes
            .iter()
            .any(|suffix| dir_name.ends_with(suffix.as_str()))
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraftConfig {
    /// Scan settings
    #[serde(default)]
    pub scan: ScanConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Loader for workspace configuration.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Sources, lowest to highest precedence: defaults, `<root>/graft.toml`
    /// when present, `GRAFT_*` environment variables (`__` as separator,
    /// e.g. `GRAFT_SCAN__WIP_DIR_NAME`).
    pub fn load(workspace_root: &Path) -> Result<GraftConfig, DiscoveryError> {
        let mut builder = Config::builder();

        let config_path = workspace_root.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            builder = builder.add_source(File::from(config_path.as_path()).required(false));
        } else {
            warn!(
                config_path = %config_path.display(),
                "No workspace configuration file found; using defaults."
            );
        }

        builder = builder.add_source(Environment::with_prefix("GRAFT").separator("__"));

        let settings = builder.build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Load configuration from a specific TOML file.
    pub fn load_from_file(path: &Path) -> Result<GraftConfig, DiscoveryError> {
        let settings = Config::builder()
            .add_source(File::from(path))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}

/// Write a default `graft.toml` into the workspace.
///
/// Skips an existing file unless `force` is set. Returns true when the file
/// was written, false when it was skipped.
pub fn write_default_config(workspace_root: &Path, force: bool) -> Result<bool, DiscoveryError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);
    if config_path.exists() && !force {
        return Ok(false);
    }

    let contents = toml::to_string_pretty(&GraftConfig::default())
        .map_err(|e| DiscoveryError::Config(format!("Failed to serialize default config: {}", e)))?;
    std::fs::write(&config_path, contents)?;
    Ok(true)
}
