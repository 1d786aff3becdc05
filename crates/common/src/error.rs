//! Error types shared across Levitate crates.

use std::path::PathBuf;

/// Top-level error type for Levitate operations.
///
/// The per-frame update path never produces one of these; they come from
/// loading and validating configuration, scenes, and hover scripts.
#[derive(Debug, thiserror::Error)]
pub enum LevitateError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Scene error: {message}")]
    Scene { message: String },

    #[error("Unknown object: {id}")]
    UnknownObject { id: String },

    #[error("Invalid hover window '{input}': {message}")]
    InvalidHoverWindow { input: String, message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using LevitateError.
pub type LevitateResult<T> = Result<T, LevitateError>;

impl LevitateError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn scene(msg: impl Into<String>) -> Self {
        Self::Scene {
            message: msg.into(),
        }
    }

    pub fn unknown_object(id: impl Into<String>) -> Self {
        Self::UnknownObject { id: id.into() }
    }

    pub fn invalid_hover_window(input: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::InvalidHoverWindow {
            input: input.into(),
            message: msg.into(),
        }
    }
}
