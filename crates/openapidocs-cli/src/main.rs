//! openapidocs CLI entrypoint
//! Parses command-line arguments and dispatches to the documentation generator.

// Internal imports (std, crate)
use std::path::PathBuf;
use std::process::ExitCode;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use openapidocs_core::{Config, OutputStyle};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "openapidocs")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate documentation from an OpenAPI document
    GenDocs {
        /// Path or URL to the OpenAPI document (YAML or JSON)
        ///
        /// Example: -s path/to/openapi.yaml
        /// Example: -s https://example.com/openapi.json
        #[arg(short, long)]
        source: Option<String>,
        /// Path of the output file
        #[arg(short, long)]
        destination: Option<PathBuf>,
        /// Output style, by name or number (see list-styles)
        #[arg(short = 't', long)]
        style: Option<String>,
        /// Directory of custom templates
        #[arg(short = 'T', long)]
        templates_dir: Option<PathBuf>,
        /// YAML or JSON file with translated labels
        #[arg(long)]
        texts: Option<PathBuf>,
        /// YAML or JSON configuration file; flags override its values
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List the supported output styles
    ListStyles,
}

/// Exit code for errors caused by the user's input
const USER_ERROR_CODE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("❌ {error:#}");
            match error.downcast_ref::<openapidocs_core::Error>() {
                Some(error) if error.is_user_error() => ExitCode::from(USER_ERROR_CODE),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::GenDocs {
            source,
            destination,
            style,
            templates_dir,
            texts,
            config,
        } => {
            let config = build_config(source, destination, style, templates_dir, texts, config).await?;
            tracing::debug!(?config, "Generating documentation");

            openapidocs_core::generate(&config).await?;
            println!("✅ Documentation written to: {}", config.destination);
        }
        Commands::ListStyles => {
            for style in OutputStyle::all() {
                println!("{} ({})", style.as_str(), style.value());
            }
        }
    }
    Ok(())
}

/// Merges the configuration file, if any, with the command-line flags.
async fn build_config(
    source: Option<String>,
    destination: Option<PathBuf>,
    style: Option<String>,
    templates_dir: Option<PathBuf>,
    texts: Option<PathBuf>,
    config_file: Option<PathBuf>,
) -> anyhow::Result<Config> {
    let mut config = match &config_file {
        Some(path) => Config::from_file(path)
            .await
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => {
            let source = source.clone().ok_or_else(|| {
                openapidocs_core::Error::config("a source is required (-s/--source)")
            })?;
            let destination = destination.clone().ok_or_else(|| {
                openapidocs_core::Error::config("a destination is required (-d/--destination)")
            })?;
            Config::new(source, destination.to_string_lossy())
        }
    };

    if let Some(source) = source {
        config.source = source;
    }
    if let Some(destination) = destination {
        config.destination = destination.to_string_lossy().into_owned();
    }
    if let Some(style) = style {
        config.style = style;
    }
    if let Some(dir) = templates_dir {
        config.templates_dir = Some(dir.to_string_lossy().into_owned());
    }
    if let Some(texts) = texts {
        config.texts = Some(texts.to_string_lossy().into_owned());
    }

    // fail fast on a wrong style, before any loading
    config.output_style()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gen_docs() {
        let cli = Cli::parse_from([
            "openapidocs",
            "--verbose",
            "gen-docs",
            "-s",
            "openapi.yaml",
            "-d",
            "docs/api.md",
            "-t",
            "MARKDOWN",
            "-T",
            "views",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::GenDocs {
                source,
                destination,
                style,
                templates_dir,
                ..
            } => {
                assert_eq!(source.as_deref(), Some("openapi.yaml"));
                assert_eq!(destination, Some(PathBuf::from("docs/api.md")));
                assert_eq!(style.as_deref(), Some("MARKDOWN"));
                assert_eq!(templates_dir, Some(PathBuf::from("views")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_flags_override_config_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("openapidocs.yaml");
        tokio::fs::write(
            &path,
            "source: a.yaml\ndestination: a.md\nstyle: MARKDOWN\ndatetime_format: '%Y'\n",
        )
        .await?;

        let config = build_config(
            None,
            Some(PathBuf::from("b.puml")),
            Some("PLANTUML_API".to_string()),
            None,
            None,
            Some(path),
        )
        .await?;

        assert_eq!(config.source, "a.yaml");
        assert_eq!(config.destination, "b.puml");
        assert_eq!(config.style, "PLANTUML_API");
        assert_eq!(config.datetime_format.as_deref(), Some("%Y"));
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_source_is_a_user_error() {
        let error = build_config(None, Some(PathBuf::from("a.md")), None, None, None, None)
            .await
            .unwrap_err();
        let error = error.downcast_ref::<openapidocs_core::Error>().unwrap();
        assert!(error.is_user_error());
    }
}
