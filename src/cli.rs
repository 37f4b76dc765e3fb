//! CLI argument parsing module
//!
//! This module handles command-line argument parsing and the application
//! entry point.

use std::str::FromStr;

use clap::{Arg, ArgMatches, Command};

use crate::bookmarks::BookmarkExtractor;
use crate::config::{Config, OutputFormat};
use crate::error::{FoxmarksError, Result};
use crate::exit_code::exit_code_for_error;
use crate::output::OutputWriter;
use crate::paths;

/// Main entry point for the CLI application
pub fn run() {
    crate::logging::init();

    let app = create_app();
    let matches = app.get_matches();

    if let Err(e) = run_with_args(&matches) {
        eprintln!("foxmarks: error: {}", e);
        std::process::exit(exit_code_for_error(&e));
    }
}

/// Run foxmarks with parsed command line arguments
fn run_with_args(matches: &ArgMatches) -> Result<()> {
    let config = build_config_from_args(matches)?;
    let output = OutputWriter::new(config.output.clone());

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| FoxmarksError::Config(format!("Failed to create async runtime: {}", e)))?;

    rt.block_on(async {
        let extractor = BookmarkExtractor::new(config);
        let groups = extractor.fetch().await?;

        let bookmarks: usize = groups.iter().map(|group| group.bookmarks.len()).sum();
        output.write_verbose(&format!(
            "{} bookmark(s) in {} group(s)",
            bookmarks,
            groups.len()
        ))?;
        output.write_groups(&groups)
    })
}

/// Create the CLI application structure
fn create_app() -> Command {
    Command::new("foxmarks")
        .version(crate::VERSION)
        .about("Read Firefox bookmarks safely from a live profile, grouped by domain")
        .arg(
            Arg::new("database")
                .short('d')
                .long("database")
                .value_name("PATH")
                .help("Path to places.sqlite, or a directory containing it"),
        )
        .arg(
            Arg::new("profile")
                .short('p')
                .long("profile")
                .value_name("NAME|PATH")
                .help("Profile directory name or path, bypassing profiles.ini"),
        )
        .arg(
            Arg::new("limit")
                .long("limit")
                .value_name("COUNT")
                .help("Maximum number of bookmarks to read")
                .default_value("500"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_name("FORMAT")
                .help("Output format: text or json")
                .default_value("text"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Write output to file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Verbose output")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('s')
                .long("silent")
                .help("Silent mode")
                .action(clap::ArgAction::SetTrue),
        )
}

/// Build configuration from command line arguments
fn build_config_from_args(matches: &ArgMatches) -> Result<Config> {
    let mut config = Config::from_env()?;

    if let Some(database) = matches.get_one::<String>("database") {
        config.database = Some(database.clone());
    }

    if let Some(profile) = matches.get_one::<String>("profile") {
        config.profile = Some(profile.clone());
    }

    if let Some(limit_str) = matches.get_one::<String>("limit") {
        config.limit = limit_str
            .parse()
            .map_err(|_| FoxmarksError::Config(format!("Invalid limit: '{}'", limit_str)))?;
    }

    if let Some(format_str) = matches.get_one::<String>("format") {
        config.output.format = OutputFormat::from_str(format_str)
            .map_err(|_| FoxmarksError::Config(format!("Unknown output format: '{}'", format_str)))?;
    }

    if let Some(output_file) = matches.get_one::<String>("output") {
        config.output.file = paths::resolve(Some(output_file), &config.home_dir);
    }

    config.output.verbose = matches.get_flag("verbose");
    config.output.silent = matches.get_flag("silent");

    Ok(config)
}
