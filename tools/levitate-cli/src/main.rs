//! Levitate CLI — headless hover-lift simulation and scene tooling.
//!
//! Usage:
//!   levitate simulate [OPTIONS]   Run a scripted hover session
//!   levitate scene [--write PATH] Print or write the showcase scene
//!   levitate config [--init]      Show or initialize configuration
//!   levitate check [--config P]   Validate motion tuning

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use levitate_common::config::{AppConfig, LoggingConfig};

mod commands;

#[derive(Parser)]
#[command(
    name = "levitate",
    about = "Spring-driven hover animation for 3D showcase objects",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a hover session at a fixed frame rate and summarize the motion
    Simulate {
        /// Hover cue, `START..END` for every object or `ID@START..END` (repeatable)
        #[arg(long = "hover", value_name = "CUE")]
        hovers: Vec<String>,

        /// Frames per second
        #[arg(long, default_value = "60")]
        fps: u32,

        /// Simulated duration (seconds)
        #[arg(long, default_value = "3.0")]
        duration: f64,

        /// Scene file (defaults to the built-in showcase)
        #[arg(long)]
        scene: Option<PathBuf>,

        /// Config file (defaults to the standard location)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the full trace as JSONL
        #[arg(long)]
        jsonl: Option<PathBuf>,

        /// Print the summary as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the built-in showcase scene
    Scene {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        write: Option<PathBuf>,
    },

    /// Show the effective configuration
    Config {
        /// Write the defaults to the standard location
        #[arg(long)]
        init: bool,

        /// Read from this file instead of the standard location
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Validate motion tuning and report derived constants
    Check {
        /// Config file (defaults to the standard location)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Commands {
    /// Config file named on the command line, if any.
    fn config_path(&self) -> Option<&Path> {
        match self {
            Commands::Simulate { config, .. } | Commands::Check { config } => config.as_deref(),
            Commands::Config { path, .. } => path.as_deref(),
            Commands::Scene { .. } => None,
        }
    }
}

/// Logging settings from the config file, with `--verbose` / `--log-json`
/// applied on top. An unreadable explicit file falls back to the defaults
/// here; the command itself reports the error.
fn logging_config(cli: &Cli) -> LoggingConfig {
    let file = match cli.command.config_path() {
        Some(path) => AppConfig::load_from(path)
            .map(|config| config.logging)
            .unwrap_or_default(),
        None => AppConfig::load().logging,
    };
    file.with_overrides(cli.verbose, cli.log_json)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    levitate_common::logging::init_logging(&logging_config(&cli));

    match cli.command {
        Commands::Simulate {
            hovers,
            fps,
            duration,
            scene,
            config,
            jsonl,
            json,
        } => commands::simulate::run(commands::simulate::SimulateArgs {
            hovers,
            fps,
            duration,
            scene,
            config,
            jsonl,
            json,
        }),
        Commands::Scene { write } => commands::scene::run(write),
        Commands::Config { init, path } => commands::config::run(init, path),
        Commands::Check { config } => commands::check::run(config),
    }
}
