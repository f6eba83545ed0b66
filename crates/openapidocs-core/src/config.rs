//! Configuration of a documentation run.
//!
//! The configuration can be created programmatically or loaded from a YAML
//! (or JSON) file; command-line flags override the values read from a file.
//!
//! # Examples
//!
//! ```no_run
//! use openapidocs_core::config::Config;
//!
//! # #[tokio::main]
//! # async fn main() -> openapidocs_core::Result<()> {
//! let mut config = Config::new("openapi.yaml", "docs/api.md");
//! config.style = "MARKDOWN".to_string();
//! config.save("openapidocs.yaml").await?;
//!
//! let loaded = Config::from_file("openapidocs.yaml").await?;
//! assert_eq!(loaded.style, "MARKDOWN");
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::path::{Path, PathBuf};

use crate::mk::templates::OutputStyle;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Configuration of a documentation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Path or URL of the OpenAPI document
    pub source: String,

    /// Path of the output file
    pub destination: String,

    /// Output style, by name or number
    #[serde(default = "default_style")]
    pub style: String,

    /// Directory of custom templates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<String>,

    /// YAML or JSON file with translated labels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texts: Option<String>,

    /// strftime-like format of date-times in JSON examples
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime_format: Option<String>,
}

impl Config {
    /// Create a new Config with default values
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            style: default_style(),
            templates_dir: None,
            texts: None,
            datetime_format: None,
        }
    }

    /// Load configuration from a file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// The configured output style
    pub fn output_style(&self) -> crate::Result<OutputStyle> {
        self.style.parse()
    }

    pub fn templates_path(&self) -> Option<PathBuf> {
        self.templates_dir.as_ref().map(PathBuf::from)
    }
}

fn default_style() -> String {
    OutputStyle::default().as_str().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_config_roundtrip() -> crate::Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("config.yaml");

        let mut config = Config::new("openapi.json", "docs/api.md");
        config.templates_dir = Some("./views".to_string());
        config.datetime_format = Some("%d/%m/%Y".to_string());
        config.save(&file_path).await?;

        let loaded = Config::from_file(&file_path).await?;
        assert_eq!(config, loaded);
        assert_eq!(loaded.output_style()?, OutputStyle::Mkdocs);

        Ok(())
    }

    #[tokio::test]
    async fn test_defaults_for_missing_keys() -> crate::Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("config.yaml");
        fs::write(&file_path, "source: openapi.yaml\ndestination: out.puml\nstyle: '100'\n").await?;

        let loaded = Config::from_file(&file_path).await?;
        assert_eq!(loaded.output_style()?, OutputStyle::PlantumlSchemas);
        assert_eq!(loaded.templates_path(), None);
        assert_eq!(loaded.texts, None);

        Ok(())
    }

    #[test]
    fn test_invalid_style() {
        let mut config = Config::new("a.yaml", "b.md");
        config.style = "WRONG".to_string();
        assert!(matches!(config.output_style(), Err(Error::InvalidStyle(_))));
    }
}
