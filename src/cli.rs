use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{error, info};

use crate::config::LoadedConfig;
use crate::console::{Console, LineEnd};
use crate::engine::{EngineOptions, ExtractionEngine};
use crate::error::ExtractError;
use crate::job::RunSummary;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct CliOptions {
    /// Text or HTML file to scan for application ids
    pub input: Option<PathBuf>,

    /// File that receives one id per line (overwritten)
    pub output: Option<PathBuf>,

    /// Optional path to config file (YAML)
    #[arg(long)]
    pub config_path: Option<PathBuf>,

    /// Disable colored console output
    #[arg(long)]
    pub no_color: bool,

    /// Emit diagnostic logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

pub fn parse() -> CliOptions {
    CliOptions::parse()
}

/// Validate the arguments, then extract with the loaded configuration.
///
/// A missing input path is reported as a usage error even when the config
/// failed to load.
pub fn run(
    opts: &CliOptions,
    loaded: anyhow::Result<LoadedConfig>,
    console: &mut dyn Console,
) -> Result<RunSummary, ExtractError> {
    let input = input_path(opts)?;
    let loaded = loaded?;
    info!("config loaded from {}", loaded.source);

    let cfg = &loaded.config;
    let output = opts
        .output
        .clone()
        .unwrap_or_else(|| cfg.default_output.clone());
    ExtractionEngine::new(console, EngineOptions::from(cfg)).run(input, &output)
}

fn input_path(opts: &CliOptions) -> Result<&Path, ExtractError> {
    match opts.input.as_deref() {
        Some(path) if !path.as_os_str().is_empty() => Ok(path),
        _ => Err(ExtractError::Usage),
    }
}

/// Print the user-facing diagnostic for a failed run.
pub fn report(console: &mut dyn Console, err: &ExtractError) {
    match err {
        ExtractError::Usage => console.message(
            &format!(
                "<c:Red>Usage:</c>\n{} <c:DarkCyan>inputfile</c> [<c:DarkCyan>outputfile</c>]",
                env!("CARGO_PKG_NAME")
            ),
            LineEnd::Newline,
        ),
        ExtractError::InputNotFound { path } => console.message(
            &format!(
                "<c:Red>Not exists <c:DarkCyan>input</c> file: {}",
                path.display()
            ),
            LineEnd::Newline,
        ),
        other => {
            error!("{other}");
            console.message(&format!("<c:Red>Failed:</c> {other}"), LineEnd::Newline);
        }
    }
}
