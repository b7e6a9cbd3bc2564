use crate::core::path::{config_file, ensure_parent_dir};
use crate::core::{IndexError, IndexResult};
use crate::di::ConfigProvider;
use crate::index::IndexFormat;
use crate::releases::fetcher::parse_base_url;
use crate::releases::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides `api_url`
pub const API_URL_ENV: &str = "RELEASE_INDEX_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Releases metadata endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Releases requested per page. A shorter page marks the end of the catalog.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Index file to write
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Index layout
    /// - "full": every release with its builds (default)
    /// - "versions": only version strings and a last-updated stamp
    #[serde(default)]
    pub format: IndexFormat,
}

fn default_api_url() -> String {
    "https://api.releases.hashicorp.com/v1/releases/terraform".to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_output() -> PathBuf {
    PathBuf::from("index.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            page_size: default_page_size(),
            output: default_output(),
            format: IndexFormat::default(),
        }
    }
}

impl Config {
    /// Load and validate the effective configuration
    ///
    /// See [`Config::load_unvalidated`] for the layering. Callers that apply
    /// further overrides should use that instead and validate afterwards.
    pub fn load(explicit: Option<&Path>) -> IndexResult<Self> {
        let config = Self::load_unvalidated(explicit)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the layered configuration without validating it
    ///
    /// Starts from the defaults, then reads `explicit` if given (it must
    /// exist) or else the platform config file if one exists, then applies
    /// the environment override.
    ///
    /// Config locations:
    /// - Windows: %APPDATA%\release-index\config.yaml
    /// - Linux: ~/.config/release-index/config.yaml
    /// - macOS: ~/Library/Application Support/release-index/config.yaml
    pub fn load_unvalidated(explicit: Option<&Path>) -> IndexResult<Self> {
        let mut config = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(IndexError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Self::load_from(path)?
            }
            None => match config_file() {
                Ok(path) if path.exists() => Self::load_from(&path)?,
                _ => Self::default(),
            },
        };

        config.apply_env();
        Ok(config)
    }

    /// Read a config file without applying overrides
    pub fn load_from(path: &Path) -> IndexResult<Self> {
        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| {
            IndexError::Config(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }

    /// Apply `RELEASE_INDEX_API_URL` when set and non-empty
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api_url = url.trim().to_string();
            }
        }
    }

    /// Reject settings the fetch loop cannot run with
    pub fn validate(&self) -> IndexResult<()> {
        if self.page_size == 0 {
            return Err(IndexError::Config(
                "page_size must be greater than zero".to_string(),
            ));
        }
        parse_base_url(&self.api_url)?;
        Ok(())
    }

    /// Save config to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> IndexResult<()> {
        ensure_parent_dir(path)?;

        let content = serde_yaml::to_string(self)
            .map_err(|e| IndexError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)?;
        Ok(())
    }

    /// Render as YAML for display
    pub fn to_yaml(&self) -> IndexResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

// Implement ConfigProvider trait
impl ConfigProvider for Config {
    fn api_url(&self) -> &str {
        &self.api_url
    }

    fn page_size(&self) -> usize {
        self.page_size
    }

    fn output_path(&self) -> PathBuf {
        self.output.clone()
    }
}
