//! Loading of OpenAPI documents from files and URLs.
//!
//! A source is either a path to an existing `.json`, `.yaml` or `.yml` file,
//! or an HTTP(S) URL. Documents are returned as generic [`Node`]s.
//!
//! # Examples
//!
//! ```no_run
//! use openapidocs_core::source::read_from_source;
//! use openapidocs_core::error::Result;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! let document = read_from_source("./openapi.yaml").await?;
//! if let Some(title) = document.pointer("/info/title").and_then(|t| t.as_str()) {
//!     println!("API Title: {}", title);
//! }
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::path::Path;

use crate::error::{Error, Result};
use crate::normalize::Node;
use crate::web::{ensure_success, http_get};

/// Kind of file, told by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    Json,
    Yaml,
}

impl FileKind {
    fn of(path: &Path) -> Option<Self> {
        let name = path.to_string_lossy().to_lowercase();
        if name.ends_with(".json") {
            Some(Self::Json)
        } else if name.ends_with(".yaml") || name.ends_with(".yml") {
            Some(Self::Yaml)
        } else {
            None
        }
    }

    fn parse(self, content: &str) -> Result<Node> {
        Ok(match self {
            Self::Json => serde_json::from_str(content)?,
            Self::Yaml => serde_yaml::from_str(content)?,
        })
    }
}

/// Reads JSON from a file.
pub fn read_from_json_file<P: AsRef<Path>>(path: P) -> Result<Node> {
    let content = std::fs::read_to_string(path.as_ref())?;
    FileKind::Json.parse(&content)
}

/// Reads YAML from a file.
pub fn read_from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Node> {
    let content = std::fs::read_to_string(path.as_ref())?;
    FileKind::Yaml.parse(&content)
}

/// Reads a `.json`, `.yaml` or `.yml` file, choosing the parser by extension.
pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Node> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::NotAFile(path.to_path_buf()));
    }
    match FileKind::of(path) {
        Some(FileKind::Json) => read_from_json_file(path),
        Some(FileKind::Yaml) => read_from_yaml_file(path),
        None => Err(Error::UnsupportedSource(path.to_path_buf())),
    }
}

/// Parses text whose format could not be told in advance: JSON first, then
/// YAML.
pub fn parse_content(content: &str) -> Result<Node> {
    if let Ok(node) = serde_json::from_str(content) {
        return Ok(node);
    }
    serde_yaml::from_str(content)
        .map_err(|e| Error::SourceFormat(format!("content is neither valid JSON nor YAML ({e})")))
}

/// Fetches a document from a URL.
///
/// The format is told by the response content type, then by the URL
/// extension; when both are silent the content is tried as JSON and then as
/// YAML.
pub async fn read_from_url(url: &str) -> Result<Node> {
    let response = http_get(url).await?;
    ensure_success(&response)?;

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_lowercase();

    let data = response.text().await.map_err(|e| Error::FailedRequest {
        message: format!("cannot read the response from {url}: {e}"),
        source: Some(e),
    })?;

    let lower_url = url.to_lowercase();
    if content_type.contains("json") || lower_url.ends_with(".json") {
        return FileKind::Json.parse(&data);
    }
    if content_type.contains("yaml") || lower_url.ends_with(".yaml") || lower_url.ends_with(".yml")
    {
        return FileKind::Yaml.parse(&data);
    }

    parse_content(&data).map_err(|_| Error::SourceFormat(url.to_string()))
}

/// Reads a document from a file path or from an HTTP(S) URL.
pub async fn read_from_source(source: &str) -> Result<Node> {
    let path = Path::new(source);

    if path.exists() {
        if !path.is_file() {
            return Err(Error::NotAFile(path.to_path_buf()));
        }
        log::debug!("Reading from file {}", source);
        let kind = FileKind::of(path).ok_or_else(|| Error::UnsupportedSource(path.to_path_buf()))?;
        let content = tokio::fs::read_to_string(path).await?;
        return kind.parse(&content);
    }

    let lower = source.to_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        log::debug!("Reading from URL {}", source);
        return read_from_url(source).await;
    }

    Err(Error::InvalidSource(source.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const YAML_DOCUMENT: &str = "openapi: 3.0.3\ninfo:\n    title: Cats API\n    version: 1.0.0\npaths:\n    /cats:\n        get:\n            responses:\n                200:\n                    description: OK\n";

    #[tokio::test]
    async fn test_read_yaml_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("spec.YAML");
        std::fs::write(&file, YAML_DOCUMENT).unwrap();

        let node = read_from_source(file.to_str().unwrap()).await.unwrap();
        assert_eq!(node["info"]["title"], json!("Cats API"));
        // unquoted status codes become string keys
        assert_eq!(
            node["paths"]["/cats"]["get"]["responses"]["200"]["description"],
            json!("OK")
        );
    }

    #[tokio::test]
    async fn test_read_json_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("spec.json");
        std::fs::write(&file, r#"{"openapi": "3.0.3", "info": {"title": "A", "version": "1"}}"#)
            .unwrap();

        let node = read_from_file(&file).unwrap();
        assert_eq!(node["openapi"], json!("3.0.3"));
    }

    #[tokio::test]
    async fn test_directory_is_not_a_file() {
        let dir = tempdir().unwrap();
        let error = read_from_source(dir.path().to_str().unwrap()).await.unwrap_err();
        assert!(matches!(error, Error::NotAFile(_)));
    }

    #[tokio::test]
    async fn test_unsupported_extension() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("spec.txt");
        std::fs::write(&file, "openapi: 3.0.3").unwrap();
        let error = read_from_source(file.to_str().unwrap()).await.unwrap_err();
        assert!(matches!(error, Error::UnsupportedSource(_)));
    }

    #[tokio::test]
    async fn test_invalid_source() {
        let error = read_from_source("ftp://example.com/spec.yaml").await.unwrap_err();
        assert!(matches!(error, Error::InvalidSource(_)));
        assert!(error.is_user_error());
    }

    #[tokio::test]
    async fn test_read_from_url_sniffs_content() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/spec.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"openapi": "3.0.3"}"#))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/docs"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/x-yaml")
                    .set_body_string(YAML_DOCUMENT),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/unknown"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/plain")
                    .set_body_string("openapi: 3.1.0"),
            )
            .mount(&server)
            .await;

        let node = read_from_source(&format!("{}/spec.json", server.uri()))
            .await
            .unwrap();
        assert_eq!(node, json!({"openapi": "3.0.3"}));

        let node = read_from_url(&format!("{}/docs", server.uri())).await.unwrap();
        assert_eq!(node["info"]["version"], json!("1.0.0"));

        let node = read_from_url(&format!("{}/unknown", server.uri())).await.unwrap();
        assert_eq!(node, json!({"openapi": "3.1.0"}));
    }

    #[tokio::test]
    async fn test_read_from_url_failed_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let error = read_from_url(&format!("{}/spec.yaml", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(error, Error::FailedRequest { .. }));
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_parse_content_fallback() {
        assert_eq!(parse_content("[1, 2]").unwrap(), json!([1, 2]));
        assert_eq!(parse_content("a: b").unwrap(), json!({"a": "b"}));
        assert!(matches!(
            parse_content("a: [b"),
            Err(Error::SourceFormat(_))
        ));
    }
}
