//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod parse;
pub mod reconcile;

use std::io::Read;
use std::path::{Path, PathBuf};

use dlbar_core::DlbarConfig;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dlbar")
        .join("config.json")
}

/// Load the configuration from `config_path`, or the default location if it exists.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<DlbarConfig> {
    let config = match config_path {
        Some(path) => DlbarConfig::from_file(Path::new(path))?,
        None => {
            let path = default_config_path();
            if path.exists() {
                DlbarConfig::from_file(&path)?
            } else {
                DlbarConfig::default()
            }
        }
    };
    Ok(config)
}

/// Read a barcode payload from a file, or stdin for `-`.
pub fn read_payload(input: &Path) -> anyhow::Result<String> {
    if input == Path::new("-") {
        let mut data = String::new();
        std::io::stdin().read_to_string(&mut data)?;
        return Ok(data);
    }

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    Ok(std::fs::read_to_string(input)?)
}
