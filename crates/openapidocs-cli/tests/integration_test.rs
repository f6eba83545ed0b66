//! End-to-end integration tests for the openapidocs CLI

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const SPEC_CONTENT: &str = r#"
openapi: 3.0.0
info:
  title: Test API
  version: 1.0.0
  description: Test API for openapidocs integration tests
servers:
  - url: http://localhost:8080/api/v1
    description: Development server
paths:
  /pets:
    get:
      operationId: listPets
      summary: List all pets
      parameters:
        - name: limit
          in: query
          schema:
            type: integer
            default: 20
      responses:
        '200':
          description: A list of pets
          content:
            application/json:
              schema:
                type: array
                items:
                  $ref: '#/components/schemas/Pet'
components:
  schemas:
    Pet:
      type: object
      required: [id]
      properties:
        id:
          type: integer
          format: int64
        name:
          type: string
"#;

/// Creates a test OpenAPI document in the given directory
fn create_test_openapi_spec(dir: &Path) -> Result<PathBuf> {
    let spec_path = dir.join("openapi.yaml");
    std::fs::write(&spec_path, SPEC_CONTENT)?;
    Ok(spec_path)
}

fn openapidocs(args: &[&str]) -> Result<Output> {
    Ok(Command::new(env!("CARGO_BIN_EXE_openapidocs"))
        .args(args)
        .output()?)
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_gen_docs_mkdocs() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let spec_path = create_test_openapi_spec(temp_dir.path())?;
    let destination = temp_dir.path().join("docs").join("api.md");

    let output = openapidocs(&[
        "gen-docs",
        "-s",
        path_arg(&spec_path),
        "-d",
        path_arg(&destination),
    ])?;

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let text = std::fs::read_to_string(&destination)?;
    assert!(text.contains("Test API"));
    assert!(text.contains("/pets"));
    assert!(text.contains("http-get"));
    Ok(())
}

#[test]
fn test_gen_docs_plantuml_by_number() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let spec_path = create_test_openapi_spec(temp_dir.path())?;
    let destination = temp_dir.path().join("schemas.puml");

    let output = openapidocs(&[
        "gen-docs",
        "-s",
        path_arg(&spec_path),
        "-d",
        path_arg(&destination),
        "-t",
        "100",
    ])?;

    assert!(output.status.success());
    let text = std::fs::read_to_string(&destination)?;
    assert!(text.starts_with("@startuml"));
    assert!(text.contains("class Pet {"));
    Ok(())
}

#[test]
fn test_gen_docs_with_config_file() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let spec_path = create_test_openapi_spec(temp_dir.path())?;
    let destination = temp_dir.path().join("api.md");
    let config_path = temp_dir.path().join("openapidocs.yaml");
    std::fs::write(
        &config_path,
        format!(
            "source: {}\ndestination: {}\nstyle: MARKDOWN\n",
            path_arg(&spec_path),
            path_arg(&destination)
        ),
    )?;

    let output = openapidocs(&["gen-docs", "--config", path_arg(&config_path)])?;

    assert!(output.status.success());
    let text = std::fs::read_to_string(&destination)?;
    assert!(text.starts_with("# Test API 1.0.0"));
    Ok(())
}

#[test]
fn test_list_styles() -> Result<()> {
    let output = openapidocs(&["list-styles"])?;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("MKDOCS (1)"));
    assert!(stdout.contains("MARKDOWN (2)"));
    assert!(stdout.contains("PLANTUML_SCHEMAS (100)"));
    assert!(stdout.contains("PLANTUML_API (101)"));
    Ok(())
}

#[test]
fn test_invalid_style_exits_with_user_error() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let spec_path = create_test_openapi_spec(temp_dir.path())?;
    let destination = temp_dir.path().join("api.md");

    let output = openapidocs(&[
        "gen-docs",
        "-s",
        path_arg(&spec_path),
        "-d",
        path_arg(&destination),
        "-t",
        "HTML",
    ])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(!destination.exists());
    Ok(())
}

#[test]
fn test_missing_source_exits_with_user_error() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let destination = temp_dir.path().join("api.md");

    let output = openapidocs(&[
        "gen-docs",
        "-s",
        "does-not-exist.yaml",
        "-d",
        path_arg(&destination),
    ])?;

    assert_eq!(output.status.code(), Some(2));
    Ok(())
}

#[test]
fn test_unsupported_source_exits_with_user_error() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let source = temp_dir.path().join("openapi.txt");
    std::fs::write(&source, "openapi: 3.0.0")?;

    let output = openapidocs(&[
        "gen-docs",
        "-s",
        path_arg(&source),
        "-d",
        path_arg(&temp_dir.path().join("api.md")),
    ])?;

    assert_eq!(output.status.code(), Some(2));
    Ok(())
}
