//! Application configuration management.
//!
//! Settings are layered with figment, later layers winning:
//!
//! 1. Built-in defaults
//! 2. `config.toml` in the platform config directory
//! 3. `DUPESWEEP_*` environment variables
//! 4. CLI flags (applied by the caller)
//!
//! The scanning core never reads configuration itself; the CLI resolves
//! everything up front and passes plain values down.

use anyhow::Result;
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::actions::DeleteMode;
use crate::duplicates::SortOrder;
use crate::scanner::{ExtensionFilter, WalkErrorPolicy};

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "DUPESWEEP_";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Size ordering used when not prompted for.
    pub sort_order: SortOrder,
    /// Extension filter used when not prompted for.
    pub extension: ExtensionFilter,
    /// Hashing threads; 1 hashes sequentially.
    pub io_threads: usize,
    /// What to do with unreadable paths during the walk.
    pub walk_errors: WalkErrorPolicy,
    /// How selected files are removed.
    pub delete_mode: DeleteMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sort_order: SortOrder::Ascending,
            extension: ExtensionFilter::any(),
            io_threads: 1,
            walk_errors: WalkErrorPolicy::Abort,
            delete_mode: DeleteMode::Permanent,
        }
    }
}

impl Config {
    /// Load the configuration from the default platform-specific path.
    ///
    /// Falls back to defaults (with a debug log) if anything goes wrong.
    pub fn load() -> Self {
        let path = Self::config_path().ok();
        match Self::load_from(path.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                log::debug!("Failed to load config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Load defaults, then `path` (if given and present), then environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or an environment value can't be parsed.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        let config: Config = figment.merge(Env::prefixed(ENV_PREFIX)).extract()?;
        log::debug!("Loaded config: {:?}", config);
        Ok(config)
    }

    /// Save the configuration to `path` as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default platform-specific configuration path.
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("com", "dupesweep", "dupesweep")
            .ok_or_else(|| anyhow::anyhow!("Failed to determine project directories"))?;
        Ok(project_dirs.config_dir().join("config.toml"))
    }
}
