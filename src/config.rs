//! Configuration loading and management
//!
//! Handles parsing of `.todoview.toml` configuration files. Lookup order is an
//! explicit path, then `./.todoview.toml`, then the user config directory.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::paginate::DEFAULT_PAGE_SIZE;
use crate::source::DEFAULT_ENDPOINT;

pub const CONFIG_FILE_NAME: &str = ".todoview.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Collection endpoint fetched once per session
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Tasks per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Terminal UI configuration
    #[serde(default)]
    pub ui: UiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            page_size: default_page_size(),
            ui: UiConfig::default(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// Terminal UI configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UiConfig {
    /// Below this width the favorites panel is stacked under the list
    #[serde(default = "default_narrow_width")]
    pub narrow_width: u16,
}

fn default_narrow_width() -> u16 {
    100
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            narrow_width: default_narrow_width(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve configuration for a session.
    ///
    /// An explicit path must exist; implicit locations fall back to defaults
    /// when absent.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::ConfigNotFound(path.to_path_buf()));
            }
            return Self::load(path);
        }

        let local = cwd.join(CONFIG_FILE_NAME);
        if local.exists() {
            return Self::load(&local);
        }

        if let Some(user) = user_config_path() {
            if user.exists() {
                return Self::load(&user);
            }
        }

        Ok(Self::default())
    }

    /// Apply command-line overrides on top of file values.
    pub fn with_overrides(
        mut self,
        endpoint: Option<String>,
        page_size: Option<usize>,
    ) -> Result<Self> {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        if let Some(page_size) = page_size {
            self.page_size = page_size;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(Error::InvalidConfig("endpoint cannot be empty".to_string()));
        }
        if self.page_size == 0 {
            return Err(Error::InvalidConfig(
                "page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// `<config dir>/todoview/config.toml` for the current user, if resolvable.
pub fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "todoview").map(|dirs| dirs.config_dir().join("config.toml"))
}
