//! foxmarks - safe Firefox bookmark extraction
//!
//! This crate locates a Firefox profile on disk, snapshots its SQLite
//! stores so reads never contend with a running browser, and returns
//! bookmarks grouped by domain with favicon references.

pub mod bookmarks;
pub mod cli;
pub mod config;
pub mod error;
pub mod exit_code;
pub mod firefox;
pub mod icons;
pub mod logging;
pub mod output;
pub mod paths;
pub mod query;
pub mod snapshot;

pub use error::{FoxmarksError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
