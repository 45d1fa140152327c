//! Command-line entry point
//!
//! Parses configuration, runs the loader and writes JSON to stdout.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tokio::io::AsyncWriteExt;

use crate::config::Config;
use crate::schema::{ColumnSchema, Record};
use crate::validation::{parse, ParseOutput};

/// Run the loader with arguments from the command line
pub async fn run() -> Result<()> {
    let config = Config::from_args_and_env()?;
    init_logging(&config.log_level);
    run_with_config(&config).await
}

/// Run the loader with an explicit configuration
pub async fn run_with_config(config: &Config) -> Result<()> {
    let output = load(config).await?;
    let rendered = render(&output, config.pretty)?;

    let mut stdout = tokio::io::stdout();
    stdout.write_all(rendered.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;

    if let ParseOutput::Typed(parsed) = &output {
        if config.strict && !parsed.is_valid() {
            log::warn!("{} rows rejected in strict mode", parsed.errors.len());
            bail!(
                "{} of {} rows failed validation",
                parsed.errors.len(),
                parsed.total_rows()
            );
        }
    }

    Ok(())
}

/// Load the configured input, with the schema if one was given
pub async fn load(config: &Config) -> Result<ParseOutput<Record>> {
    let schema = match config.resolve_schema()? {
        Some(path) => Some(ColumnSchema::load(&path)?),
        None => None,
    };

    let output: ParseOutput<Record> = parse(&config.input, schema.as_ref()).await?;

    match &output {
        ParseOutput::Rows(rows) => {
            log::info!("Loaded {} rows from {}", rows.len(), config.input.display());
        }
        ParseOutput::Typed(parsed) => {
            log::info!(
                "Loaded {} records from {} ({} rejected)",
                parsed.data.len(),
                config.input.display(),
                parsed.errors.len()
            );
        }
    }

    Ok(output)
}

/// Serialize a result as JSON
pub fn render<T: Serialize>(output: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(output)
    } else {
        serde_json::to_string(output)
    };
    json.context("failed to serialize output")
}

fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A logger may already be installed when embedded in tests.
    let _ = env_logger::Builder::from_env(env).try_init();
}
