// src/models/config.rs

//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Archive search parameters
    #[serde(default)]
    pub search: SearchConfig,
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
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::config("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::config("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.request_spacing_secs == 0 {
            return Err(AppError::config("crawler.request_spacing_secs must be > 0"));
        }
        if self.crawler.max_pages == 0 {
            return Err(AppError::config("crawler.max_pages must be > 0"));
        }
        if Url::parse(&self.crawler.site_root).is_err() {
            return Err(AppError::config("crawler.site_root is not a valid URL"));
        }
        if self.crawler.origin.trim().is_empty() {
            return Err(AppError::config("crawler.origin is empty"));
        }
        if self.search.next_page_label.is_empty() {
            return Err(AppError::config("search.next_page_label is empty"));
        }
        Ok(())
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Landing page of the results archive
    #[serde(default = "defaults::site_root")]
    pub site_root: String,

    /// Origin header attached to every request
    #[serde(default = "defaults::origin")]
    pub origin: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Minimum spacing between requests in seconds
    #[serde(default = "defaults::request_spacing")]
    pub request_spacing_secs: u64,

    /// Ceiling on result pages per dimension, in case the archive never
    /// stops offering a next page
    #[serde(default = "defaults::max_pages")]
    pub max_pages: usize,

    /// Address of the optional memcached response cache
    #[serde(default = "defaults::cache_addr")]
    pub cache_addr: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            site_root: defaults::site_root(),
            origin: defaults::origin(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_spacing_secs: defaults::request_spacing(),
            max_pages: defaults::max_pages(),
            cache_addr: defaults::cache_addr(),
        }
    }
}

/// Archive search parameters submitted with every first-page query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Result year to search
    #[serde(default = "defaults::year")]
    pub year: u16,

    /// Top-N finishers per jurisdiction
    #[serde(default = "defaults::top")]
    pub top: u32,

    /// Top-N finishers per gender category
    #[serde(default = "defaults::top_wc")]
    pub top_wc: u32,

    /// Exact value of the archive's "next page" submit button
    #[serde(default = "defaults::next_page_label")]
    pub next_page_label: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            year: defaults::year(),
            top: defaults::top(),
            top_wc: defaults::top_wc(),
            next_page_label: defaults::next_page_label(),
        }
    }
}

mod defaults {
    // Crawler defaults
    pub fn site_root() -> String {
        "http://web2.nyrrc.org/cgi-bin/htmlos.cgi/mar-programs/archive/archive_search.html".into()
    }
    pub fn origin() -> String {
        "http://web2.nyrrc.org".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_10_5) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/46.0.2490.71 Safari/537.36"
            .into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn request_spacing() -> u64 {
        1
    }
    pub fn max_pages() -> usize {
        50
    }
    pub fn cache_addr() -> String {
        "localhost:11211".into()
    }

    // Search defaults
    pub fn year() -> u16 {
        2014
    }
    pub fn top() -> u32 {
        10
    }
    pub fn top_wc() -> u32 {
        10
    }
    pub fn next_page_label() -> String {
        "NEXT 10 >".into()
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
        config.crawler.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_spacing() {
        let mut config = Config::default();
        config.crawler.request_spacing_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_site_root() {
        let mut config = Config::default();
        config.crawler.site_root = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: Config = toml::from_str(
            r#"
            [search]
            year = 2013
            "#,
        )
        .unwrap();
        assert_eq!(config.search.year, 2013);
        assert_eq!(config.search.top, 10);
        assert_eq!(config.crawler.request_spacing_secs, 1);
    }
}
