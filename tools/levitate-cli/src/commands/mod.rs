pub mod check;
pub mod config;
pub mod scene;
pub mod simulate;

use std::path::Path;

use anyhow::Context;
use levitate_common::config::AppConfig;

/// Explicit config file if given, otherwise the standard location.
pub(crate) fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(AppConfig::load()),
    }
}
