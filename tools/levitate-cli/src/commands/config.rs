//! Show or initialize configuration.

use std::path::PathBuf;

use anyhow::Context;
use levitate_common::config::{config_file_path, AppConfig};

pub fn run(init: bool, path: Option<PathBuf>) -> anyhow::Result<()> {
    if init {
        let config = AppConfig::default();
        let written = match &path {
            Some(path) => {
                config.save_to(path)?;
                path.clone()
            }
            None => config.save().context("Failed to save config")?,
        };
        println!("Default configuration written to {}", written.display());
        return Ok(());
    }

    let source = path.clone().unwrap_or_else(config_file_path);
    let config = super::load_config(path.as_deref())?;

    if source.exists() {
        println!("# {}", source.display());
    } else {
        println!("# defaults ({} not found)", source.display());
    }
    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}
