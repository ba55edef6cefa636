//! Logger configuration
//!
//! Loaded from TOML; every field has a default so an empty document is valid.
//!
//! ```toml
//! profile = "production"
//! culture = "de-DE"
//! category = "billing"
//!
//! [test_log]
//! write_to_file = true
//! file = "target/test.log"
//! ```

use crate::culture::Culture;
use crate::errors::{PocketError, Result};
use crate::logging_facility::Profile;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    pub profile: Profile,
    /// Culture name, e.g. `en-US`; empty means invariant
    pub culture: String,
    pub category: String,
    pub test_log: TestLogConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TestLogConfig {
    pub write_to_file: bool,
    pub file: Option<PathBuf>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            profile: Profile::Development,
            culture: String::new(),
            category: "pocketlog".to_string(),
            test_log: TestLogConfig::default(),
        }
    }
}

impl LoggerConfig {
    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` on malformed TOML, unknown keys or an unknown culture.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: LoggerConfig = toml::from_str(text)?;
        config.resolve_culture()?;
        Ok(config)
    }

    /// Load configuration from a file.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, otherwise as [`Self::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| PocketError::io(path.display().to_string(), e))?;
        Self::from_toml_str(&text)
    }

    /// The configured culture.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the name has no built-in conventions.
    pub fn resolve_culture(&self) -> Result<Culture> {
        Culture::by_name(&self.culture).ok_or_else(|| PocketError::InvalidConfig {
            reason: format!("unknown culture '{}'", self.culture),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = LoggerConfig::from_toml_str("").unwrap();
        assert_eq!(config, LoggerConfig::default());
        assert_eq!(config.resolve_culture().unwrap(), Culture::invariant());
    }

    #[test]
    fn test_full_document() {
        let config = LoggerConfig::from_toml_str(
            r#"
            profile = "production"
            culture = "de-DE"
            category = "billing"

            [test_log]
            write_to_file = true
            file = "out.log"
            "#,
        )
        .unwrap();
        assert_eq!(config.profile, Profile::Production);
        assert_eq!(config.category, "billing");
        assert!(config.test_log.write_to_file);
        assert_eq!(config.test_log.file, Some(PathBuf::from("out.log")));
        assert_eq!(config.resolve_culture().unwrap().decimal_separator, ',');
    }

    #[test]
    fn test_unknown_culture_is_rejected() {
        let err = LoggerConfig::from_toml_str("culture = \"xx-YY\"").unwrap_err();
        assert_eq!(err.code(), "ERR_INVALID_CONFIG");
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(LoggerConfig::from_toml_str("colour = 1").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = LoggerConfig::load(Path::new("/nonexistent/pocketlog.toml")).unwrap_err();
        assert_eq!(err.code(), "ERR_IO");
    }
}
