//! User configuration loaded from `config.toml`.
//!
//! Every key is optional; a missing file is the same as an empty one.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::paths::{DEFAULT_INSTALL_DIR, expand_home};
use crate::source::RegistrySource;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Contents of `~/.config/bashmod/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Explicit registry URLs or paths. Takes precedence over everything else.
    pub registries: Vec<String>,
    /// Single registry location, used when `registries` is empty.
    pub registry_url: Option<String>,
    pub github_user: String,
    pub github_repo: String,
    pub github_branch: String,
    /// Install directory before `~` expansion.
    pub install_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registries: Vec::new(),
            registry_url: None,
            github_user: "user".to_string(),
            github_repo: "bashrc-modules".to_string(),
            github_branch: "main".to_string(),
            install_dir: DEFAULT_INSTALL_DIR.to_string(),
        }
    }
}

impl Config {
    /// Load from `$BASHMOD_CONFIG` or the default location.
    ///
    /// # Errors
    ///
    /// See [`Config::load_from`].
    pub fn load() -> Result<Self, ConfigError> {
        match crate::paths::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from an explicit path. A missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file exists but cannot be read and
    /// [`ConfigError::Parse`] if it is not valid TOML for this schema.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Raw source strings in precedence order: `registries`, then
    /// `registry_url`, then the GitHub default.
    pub fn registry_locations(&self) -> Vec<String> {
        if !self.registries.is_empty() {
            return self.registries.clone();
        }
        if let Some(url) = self.registry_url.as_deref().filter(|u| !u.is_empty()) {
            return vec![url.to_string()];
        }
        vec![format!(
            "https://raw.githubusercontent.com/{}/{}/{}/registry.json",
            self.github_user, self.github_repo, self.github_branch
        )]
    }

    /// Resolved registry sources.
    pub fn registry_sources(&self) -> Vec<RegistrySource> {
        self.registry_locations()
            .into_iter()
            .map(RegistrySource::new)
            .collect()
    }

    /// Install directory with `~` expanded.
    pub fn install_dir(&self) -> PathBuf {
        expand_home(&self.install_dir)
    }
}
