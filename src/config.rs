use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::constants::MIN_STATUS_WIDTH;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub default_output: PathBuf,
    pub status_width: usize,
    pub skip_bytes: u64,
    pub color: bool,
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    /// Where the config came from, for logging.
    pub source: String,
}

pub fn load_config(path: Option<&Path>) -> Result<LoadedConfig> {
    let (bytes, source): (Vec<u8>, String) = if let Some(p) = path {
        let bytes = std::fs::read(p)
            .with_context(|| format!("failed to read config {}", p.display()))?;
        (bytes, p.display().to_string())
    } else {
        (
            include_bytes!("../config/default.yml").to_vec(),
            "built-in defaults".to_string(),
        )
    };

    let config: Config = serde_yaml::from_slice(&bytes)
        .with_context(|| format!("failed to parse config from {source}"))?;
    validate(&config)?;

    Ok(LoadedConfig { config, source })
}

fn validate(config: &Config) -> Result<()> {
    if config.default_output.as_os_str().is_empty() {
        bail!("default_output must not be empty");
    }
    if config.status_width < MIN_STATUS_WIDTH {
        bail!(
            "status_width {} is below the minimum of {}",
            config.status_width,
            MIN_STATUS_WIDTH
        );
    }
    Ok(())
}
