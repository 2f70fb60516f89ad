//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::Category;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upstream catalog and HTTP behavior settings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Client-side presentation settings
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.catalog.user_agent.trim().is_empty() {
            return Err(AppError::config("catalog.user_agent is empty"));
        }
        if self.catalog.timeout_secs == 0 {
            return Err(AppError::config("catalog.timeout_secs must be > 0"));
        }
        url::Url::parse(&self.catalog.base_url)
            .map_err(|e| AppError::config(format!("catalog.base_url is invalid: {e}")))?;
        if self.display.page_size == 0 {
            return Err(AppError::config("display.page_size must be > 0"));
        }
        Ok(())
    }
}

/// Upstream catalog and HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base address of the catalog API
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay between page requests in milliseconds (rate-limit courtesy)
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,
}

impl CatalogConfig {
    /// First-page address for a category.
    pub fn endpoint_url(&self, category: Category) -> String {
        format!("{}/{}/", self.base_url.trim_end_matches('/'), category)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
        }
    }
}

/// Client-side presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Items per page, uniform across all categories
    #[serde(default = "defaults::page_size")]
    pub page_size: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: defaults::page_size(),
        }
    }
}

mod defaults {
    pub fn base_url() -> String {
        "https://swapi.py4e.com/api".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; starcat/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn request_delay() -> u64 {
        100
    }
    pub fn page_size() -> usize {
        10
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.catalog.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_page_size() {
        let mut config = Config::default();
        config.display.page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let mut config = Config::default();
        config.catalog.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_endpoint_url_joins_category() {
        let config = CatalogConfig::default();
        assert_eq!(
            config.endpoint_url(Category::People),
            "https://swapi.py4e.com/api/people/"
        );

        let trailing = CatalogConfig {
            base_url: "https://swapi.py4e.com/api/".into(),
            ..CatalogConfig::default()
        };
        assert_eq!(
            trailing.endpoint_url(Category::Films),
            "https://swapi.py4e.com/api/films/"
        );
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[catalog]\ntimeout_secs = 5\n").unwrap();
        assert_eq!(config.catalog.timeout_secs, 5);
        assert_eq!(config.catalog.base_url, "https://swapi.py4e.com/api");
        assert_eq!(config.display.page_size, 10);
    }
}
