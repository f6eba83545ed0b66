//! Error handling for the OpenAPI Documentation library.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. It uses `thiserror` for easy
//! error handling and implements conversions from common error types.
//!
//! # Examples
//!
//! ```
//! use openapidocs_core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     // Operations that might fail...
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Result type for OpenAPI Documentation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for OpenAPI Documentation operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Template engine error
    #[error("Template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Template error
    #[error("Template error: {0}")]
    Template(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The source is neither an existing file nor an HTTP(S) URL
    #[error("Invalid source: it must be either a path to a .json or .yaml file, or a valid URL.")]
    InvalidSource(String),

    /// The source path exists, but it is not a file
    #[error("The given path is not a file path: {}", .0.display())]
    NotAFile(PathBuf),

    /// The source file has an extension that cannot be read
    #[error("Unsupported source file: {}", .0.display())]
    UnsupportedSource(PathBuf),

    /// The loaded document is not a mapping
    #[error("Invalid OpenAPI document: {0}")]
    InvalidDocument(String),

    /// Content fetched from a URL is neither JSON nor YAML
    #[error("Could not load a valid JSON or YAML file from the given URL: {0}")]
    SourceFormat(String),

    /// An HTTP request failed or returned a status that does not indicate success
    #[error("Failed request: {message}")]
    FailedRequest {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// A path inside a document crosses a value that is not a mapping
    #[error("Invalid sub-path: {path:?}")]
    InvalidSubPath { path: Vec<String> },

    /// A `$ref` pointing to another file could not be found
    #[error("Cannot resolve the $ref source {reference} Tried to read from path: {}", .attempted_path.display())]
    ReferencedFileNotFound {
        reference: String,
        attempted_path: PathBuf,
    },

    /// Unknown output style
    #[error("Invalid style: {0}")]
    InvalidStyle(String),

    /// A custom templates directory is missing or is not a directory
    #[error("Invalid templates directory: {0}")]
    InvalidTemplatesDir(String),

    /// The serializer received a value that has no record shape
    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),

    /// A link cannot be produced from an empty value
    #[error("Invalid link value: {0:?}")]
    InvalidLink(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new template error
    pub fn template<S: Into<String>>(msg: S) -> Self {
        Self::Template(msg.into())
    }

    /// Create a new failed request error without an underlying transport error
    pub fn failed_request<S: Into<String>>(msg: S) -> Self {
        Self::FailedRequest {
            message: msg.into(),
            source: None,
        }
    }

    /// Returns true for errors caused by invalid input given by the user, as
    /// opposed to failures of the environment or bugs.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidSource(_)
                | Self::NotAFile(_)
                | Self::UnsupportedSource(_)
                | Self::InvalidDocument(_)
                | Self::InvalidStyle(_)
                | Self::InvalidTemplatesDir(_)
                | Self::InvalidSubPath { .. }
                | Self::InvalidLink(_)
                | Self::Config(_)
        )
    }
}
