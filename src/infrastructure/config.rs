// src/infrastructure/config.rs
use crate::application::{NotesFooter, SocialLink};
use crate::constants::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// TOML configuration for notesboard
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub footer: FooterConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FooterConfig {
    #[serde(default = "NotesFooter::default_copyright")]
    pub copyright: String,
    #[serde(default = "NotesFooter::default_links")]
    pub links: Vec<SocialLink>,
}

fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }
fn default_timeout_secs() -> u64 { DEFAULT_TIMEOUT_SECS }

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            copyright: NotesFooter::default_copyright(),
            links: NotesFooter::default_links(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl FooterConfig {
    pub fn to_footer(&self) -> NotesFooter {
        NotesFooter::new(self.links.clone(), self.copyright.clone())
    }
}

impl Config {
    /// `<config dir>/notesboard/config.toml`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("notesboard").join("config.toml"))
    }

    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse TOML config")?;

        Ok(config)
    }

    /// Load an explicitly given file, else the default file if it exists, else defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                debug!(?path, "Loading config");
                Self::load(path)
            }
            _ => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Save configuration to TOML file, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let toml_string = toml::to_string_pretty(self)
            .context("Failed to serialize config to TOML")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(path, toml_string)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Create default configuration file at path
    pub fn create_default(path: impl AsRef<Path>) -> Result<Self> {
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }
}
