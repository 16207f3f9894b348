//! Application configuration
//!
//! Read from `config.toml` in the platform config directory (or an explicit
//! path), then adjusted by `VOCABOOK_REMOTE_URL` / `VOCABOOK_DATA_FILE`.
//!
//! ```toml
//! request_timeout_secs = 30
//! display_mode = "english"
//!
//! [backend]
//! type = "http"
//! url = "https://jsonblob.com/api/jsonBlob/..."
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::remote::{DocumentError, DocumentStore, FileDocumentStore, HttpDocumentStore};
use crate::vocab::DisplayMode;

pub const REMOTE_URL_ENV: &str = "VOCABOOK_REMOTE_URL";
pub const DATA_FILE_ENV: &str = "VOCABOOK_DATA_FILE";

const APP_DIR: &str = "vocabook";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Where the topic document lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Backend {
    /// JSON blob service reached over HTTP
    Http { url: String },
    /// Local JSON file
    File { path: PathBuf },
}

impl Default for Backend {
    fn default() -> Self {
        Self::File {
            path: default_data_file(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: Backend,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Initial display mode for review sessions
    #[serde(default)]
    pub display_mode: DisplayMode,
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            display_mode: DisplayMode::default(),
        }
    }
}

/// `<config dir>/vocabook/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

/// `<data dir>/vocabook/topics.json`, or `topics.json` in the working directory
pub fn default_data_file() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR).join("topics.json"))
        .unwrap_or_else(|| PathBuf::from("topics.json"))
}

impl AppConfig {
    /// Load from `explicit`, or from the default location when present,
    /// then apply environment overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.apply_overrides(
            std::env::var(REMOTE_URL_ENV).ok(),
            std::env::var(DATA_FILE_ENV).ok(),
        );
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        log::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// A remote URL wins over a data file; blank values are ignored
    pub fn apply_overrides(&mut self, remote_url: Option<String>, data_file: Option<String>) {
        if let Some(url) = remote_url.filter(|u| !u.trim().is_empty()) {
            self.backend = Backend::Http { url };
        } else if let Some(path) = data_file.filter(|p| !p.trim().is_empty()) {
            self.backend = Backend::File {
                path: PathBuf::from(path),
            };
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.backend {
            Backend::Http { url } if !url.starts_with("http://") && !url.starts_with("https://") => {
                Err(ConfigError::Invalid(format!("backend URL must be http(s): {}", url)))
            }
            _ if self.request_timeout_secs == 0 => {
                Err(ConfigError::Invalid("request_timeout_secs must be positive".to_string()))
            }
            _ => Ok(()),
        }
    }

    /// Build the document backend this configuration describes
    pub fn open_backend(&self) -> Result<Box<dyn DocumentStore>, DocumentError> {
        match &self.backend {
            Backend::Http { url } => {
                log::info!("Using remote document at {}", url);
                let store = HttpDocumentStore::new(
                    url.clone(),
                    Duration::from_secs(self.request_timeout_secs),
                    Duration::from_secs(self.connect_timeout_secs),
                )?;
                Ok(Box::new(store))
            }
            Backend::File { path } => {
                log::info!("Using local document at {:?}", path);
                Ok(Box::new(FileDocumentStore::new(path.clone())))
            }
        }
    }
}
