//! Documentation generation entry points

// Internal imports (std, crate)
use std::path::Path;

use crate::config::Config;
use crate::error::Result;
use crate::mk::contents::JsonContentWriter;
use crate::mk::templates::OutputStyle;
use crate::mk::texts::Texts;
use crate::mk::v3::OpenApiV3DocumentationHandler;
use crate::normalize::{DateTimeFormatHandler, Normalizer};
use crate::source::read_from_source;

/// Generates the documentation of `source` and writes it to `destination`.
pub async fn generate_document(
    source: &str,
    destination: &Path,
    style: OutputStyle,
    templates_dir: Option<&Path>,
) -> Result<()> {
    let mut config = Config::new(source, destination.to_string_lossy());
    config.style = style.as_str().to_string();
    config.templates_dir = templates_dir.map(|dir| dir.to_string_lossy().into_owned());
    generate(&config).await
}

/// Main entry point for documentation generation
pub async fn generate(config: &Config) -> Result<()> {
    // 1. Load the OpenAPI document
    let style = config.output_style()?;
    let data = read_from_source(&config.source).await?;

    // 2. Prepare the handler of the document
    let mut handler = OpenApiV3DocumentationHandler::new(data, &config.source)?
        .with_style(style, config.templates_path().as_deref())?;
    if let Some(texts) = &config.texts {
        handler = handler.with_texts(Texts::from_file(texts).await?);
    }
    if let Some(format) = &config.datetime_format {
        let normalizer =
            Normalizer::default().with_handler(DateTimeFormatHandler::new(Some(format.clone())));
        handler = handler.with_json_writer(JsonContentWriter::new(normalizer));
    }

    // 3. Render and write the output
    let text = handler.write()?;
    let destination = Path::new(&config.destination);
    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(destination, text).await?;

    log::info!(
        "Wrote the {} documentation of {} to {}",
        style,
        config.source,
        destination.display()
    );
    Ok(())
}
