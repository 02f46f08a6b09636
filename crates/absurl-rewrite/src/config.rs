//! Replacer configuration.
//!
//! ```json
//! { "baseUrl": "https://example.com/", "dialect": "xml" }
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::rules::Dialect;
use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub base_url: String,
    /// Forced dialect. `None` lets the caller decide per document.
    #[serde(default)]
    pub dialect: Option<Dialect>,
}

impl Config {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            dialect: None,
        }
    }

    /// Parse a JSON config.
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(source)?;
        config.validate()
    }

    /// Read and parse a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&source)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config() {
        let config = Config::from_json(r#"{"baseUrl": "http://example.com"}"#).unwrap();
        assert_eq!(config, Config::new("http://example.com"));
    }

    #[test]
    fn test_dialect_field() {
        let config =
            Config::from_json(r#"{"baseUrl": "http://example.com", "dialect": "xml"}"#).unwrap();
        assert_eq!(config.dialect, Some(Dialect::Xml));
    }

    #[test]
    fn test_empty_base_rejected() {
        let err = Config::from_json(r#"{"baseUrl": "  "}"#).unwrap_err();
        assert!(matches!(err, ConfigError::MissingBaseUrl));
    }

    #[test]
    fn test_invalid_json() {
        let err = Config::from_json("{baseUrl").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        assert!(err.to_string().starts_with("Invalid config"));
    }

    #[test]
    fn test_unknown_dialect_rejected() {
        let err = Config::from_json(r#"{"baseUrl": "http://a", "dialect": "json"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file(Path::new("/nonexistent/absurl.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/absurl.json"));
    }
}
