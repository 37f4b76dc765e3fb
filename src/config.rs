//! Configuration management for foxmarks

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{FoxmarksError, Result};
use crate::query;

/// Output format for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(()),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let format = match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        };
        write!(f, "{}", format)
    }
}

/// Output configuration
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub file: Option<PathBuf>,
    pub format: OutputFormat,
    pub verbose: bool,
    pub silent: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            file: None,
            format: OutputFormat::Text,
            verbose: false,
            silent: false,
        }
    }
}

/// Configuration for one extraction pass.
///
/// The home and temp directories are threaded explicitly so components never
/// read global host state; tests point them at synthetic roots.
#[derive(Debug, Clone)]
pub struct Config {
    pub home_dir: PathBuf,
    pub temp_root: PathBuf,
    /// User override for the primary database: a `places.sqlite` file or a
    /// directory containing one. May carry path shorthand.
    pub database: Option<String>,
    /// Profile directory name or path, bypassing `profiles.ini` selection.
    pub profile: Option<String>,
    pub limit: usize,
    pub output: OutputConfig,
}

impl Config {
    /// Build a configuration from the ambient environment.
    ///
    /// This is the only place the real home and temp directories are read.
    pub fn from_env() -> Result<Self> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| FoxmarksError::Config("Cannot determine home directory".to_string()))?;

        Ok(Config {
            home_dir,
            temp_root: std::env::temp_dir(),
            database: None,
            profile: None,
            limit: query::MAX_BOOKMARK_ROWS,
            output: OutputConfig::default(),
        })
    }
}
