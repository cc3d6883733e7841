//! Configuration management for Folio
//!
//! Provides hierarchical configuration loading from multiple sources:
//! 1. Environment variables (FOLIO_* prefix, highest precedence)
//! 2. folio.local.toml (gitignored, local overrides)
//! 3. folio.toml (git-tracked, project config)
//! 4. ~/.config/folio/config.toml (user defaults)
//! 5. Built-in defaults (lowest precedence)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

mod error;
mod loader;
mod paths;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use paths::Paths;

/// Log levels accepted by `[logging] level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main Folio configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    pub project: ProjectConfig,
    pub library: LibraryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub name: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "folio-project".to_string(),
        }
    }
}

/// Behaviour of the book/author library slices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Let the authors slice react to `ADD_BOOK` by registering unknown
    /// authors. Off by default: authors are added with `ADD_AUTHOR` only.
    pub register_authors_from_books: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing level when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl FolioConfig {
    /// Load configuration for a project directory from every source
    pub fn load_from_dir(project_dir: impl AsRef<Path>) -> Result<Self> {
        ConfigLoader::new().with_project_dir(project_dir).load()
    }

    /// Check values the type system cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                self.logging.level
            )));
        }

        if self.project.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "project.name must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_default_config() {
        let config = FolioConfig::default();
        assert_eq!(config.project.name, "folio-project");
        assert!(!config.library.register_authors_from_books);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test_case("trace")]
    #[test_case("DEBUG")]
    #[test_case("Warn")]
    fn test_valid_levels(level: &str) {
        let mut config = FolioConfig::default();
        config.logging.level = level.to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_level() {
        let mut config = FolioConfig::default();
        config.logging.level = "loud".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(msg)) if msg.contains("loud")
        ));
    }

    #[test]
    fn test_empty_project_name() {
        let mut config = FolioConfig::default();
        config.project.name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_rendering() {
        let mut config = FolioConfig::default();
        config.library.register_authors_from_books = true;

        let text = config.to_toml_string().expect("render");
        assert!(text.contains("register_authors_from_books = true"));

        let parsed: FolioConfig = toml::from_str(&text).expect("parse");
        assert_eq!(parsed, config);
    }
}
