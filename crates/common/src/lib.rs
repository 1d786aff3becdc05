//! Levitate Common Utilities
//!
//! Shared infrastructure for all Levitate crates:
//! - Error types and result aliases
//! - Frame clock and delta sanitizing
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
