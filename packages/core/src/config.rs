//! Configuration for asset graph retrieval

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::client::{Result, RetrievalError};
use crate::models::Category;

/// Largest window a collection may request in one page
pub const MAX_PAGE_SIZE: usize = 1000;

/// Environment variable overriding [`RetrievalConfig::page_size`]
pub const PAGE_SIZE_ENV: &str = "ASSET_GRAPH_PAGE_SIZE";

/// Environment variable overriding [`RetrievalConfig::reply_page_size`]
pub const REPLY_PAGE_SIZE_ENV: &str = "ASSET_GRAPH_REPLY_PAGE_SIZE";

/// Window sizes used by every collection of a graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Window size for top-level categories and schema attributes
    pub page_size: usize,

    /// Window size for comment replies and note log notes
    pub reply_page_size: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            page_size: 100,
            reply_page_size: 25,
        }
    }
}

impl RetrievalConfig {
    /// Config with the same window size for every category
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size,
            reply_page_size: page_size,
        }
    }

    /// Load a JSON config file; missing keys take their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            RetrievalError::invalid_parameter(
                "config_path",
                format!("cannot read {}: {}", path.display(), e),
            )
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|e| {
            RetrievalError::invalid_parameter(
                "config_path",
                format!("malformed config {}: {}", path.display(), e),
            )
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `ASSET_GRAPH_PAGE_SIZE` / `ASSET_GRAPH_REPLY_PAGE_SIZE` when set
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(value) = lookup(PAGE_SIZE_ENV) {
            self.page_size = parse_size(PAGE_SIZE_ENV, &value)?;
        }
        if let Some(value) = lookup(REPLY_PAGE_SIZE_ENV) {
            self.reply_page_size = parse_size(REPLY_PAGE_SIZE_ENV, &value)?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Window size for a category
    pub fn page_size_for(&self, category: Category) -> usize {
        match category {
            Category::Replies | Category::Notes => self.reply_page_size,
            _ => self.page_size,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        check_size("page_size", self.page_size)?;
        check_size("reply_page_size", self.reply_page_size)
    }
}

fn check_size(parameter: &str, size: usize) -> Result<()> {
    if size == 0 {
        return Err(RetrievalError::invalid_parameter(
            parameter,
            "must be greater than 0",
        ));
    }
    if size > MAX_PAGE_SIZE {
        return Err(RetrievalError::invalid_parameter(
            parameter,
            format!("cannot exceed {}", MAX_PAGE_SIZE),
        ));
    }
    Ok(())
}

fn parse_size(parameter: &str, value: &str) -> Result<usize> {
    value.trim().parse().map_err(|_| {
        RetrievalError::invalid_parameter(parameter, format!("'{}' is not a page size", value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = RetrievalConfig::default();
        assert_eq!(config.page_size, 100);
        assert_eq!(config.reply_page_size, 25);
        assert!(config.validate().is_ok());
        assert_eq!(config.page_size_for(Category::Licenses), 100);
        assert_eq!(config.page_size_for(Category::Replies), 25);
        assert_eq!(config.page_size_for(Category::SchemaAttributes), 100);
    }

    #[test]
    fn test_config_validation() {
        let mut config = RetrievalConfig::default();

        config.page_size = 0;
        assert!(config.validate().is_err());

        config.page_size = MAX_PAGE_SIZE + 1;
        assert!(config.validate().is_err());

        config.page_size = MAX_PAGE_SIZE;
        config.reply_page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let config = RetrievalConfig::default()
            .with_overrides(|key| match key {
                PAGE_SIZE_ENV => Some("250".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.page_size, 250);
        assert_eq!(config.reply_page_size, 25);

        let err = RetrievalConfig::default()
            .with_overrides(|key| match key {
                REPLY_PAGE_SIZE_ENV => Some("lots".to_string()),
                _ => None,
            })
            .unwrap_err();
        assert!(matches!(
            err,
            RetrievalError::InvalidParameter { parameter, .. } if parameter == REPLY_PAGE_SIZE_ENV
        ));
    }

    #[test]
    fn test_from_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "page_size": 40 }}"#).unwrap();

        let config = RetrievalConfig::from_file(file.path()).unwrap();
        assert_eq!(config.page_size, 40);
        assert_eq!(config.reply_page_size, 25);
    }

    #[test]
    fn test_from_file_rejects_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "page_size": 0 }}"#).unwrap();
        assert!(RetrievalConfig::from_file(file.path()).is_err());

        let dir = tempfile::TempDir::new().unwrap();
        assert!(RetrievalConfig::from_file(dir.path().join("missing.json")).is_err());
    }
}
