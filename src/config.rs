//! Command-line and environment configuration

use std::path::PathBuf;

use clap::Parser;
use tui_dispatch_debug::DebugCliArgs;

use crate::loader::{DEFAULT_FALLBACK, DEFAULT_SOURCE, DataSource};

/// Monster catalog browser
#[derive(Parser, Debug)]
#[command(name = "monsterdex")]
#[command(about = "Browse a monster catalog grouped by region")]
pub struct Args {
    /// Dataset location tried first (path, file:// or http(s):// URL)
    #[arg(long, short, env = "MONSTERDEX_SOURCE", default_value = DEFAULT_SOURCE)]
    pub source: String,

    /// Dataset location tried when the first one fails
    #[arg(long, short, env = "MONSTERDEX_FALLBACK", default_value = DEFAULT_FALLBACK)]
    pub fallback: String,

    /// Write logs to this file (filter with MONSTERDEX_LOG)
    #[arg(long, env = "MONSTERDEX_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    #[command(flatten)]
    pub debug: DebugCliArgs,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("--{0} must not be empty")]
    EmptyLocation(&'static str),
}

/// Validated runtime settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub source: DataSource,
    pub fallback: DataSource,
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn config(&self) -> Result<Config, ConfigError> {
        if self.source.trim().is_empty() {
            return Err(ConfigError::EmptyLocation("source"));
        }
        if self.fallback.trim().is_empty() {
            return Err(ConfigError::EmptyLocation("fallback"));
        }
        Ok(Config {
            source: DataSource::parse(&self.source),
            fallback: DataSource::parse(&self.fallback),
            log_file: self.log_file.clone(),
        })
    }
}
