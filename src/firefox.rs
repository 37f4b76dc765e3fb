//! Firefox profile and database discovery.
//!
//! Firefox keeps one or more profiles under an install-layout root that
//! varies by platform and packaging (plain install, snap, flatpak, macOS
//! sandbox container). Discovery walks a fixed candidate list, then reads
//! the `profiles.ini` manifest to pick the profile directory holding the
//! bookmark stores.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{FoxmarksError, Result};
use crate::paths;

/// Primary bookmark store inside a profile directory.
pub const PLACES_DB: &str = "places.sqlite";

/// Auxiliary favicon store inside a profile directory.
pub const FAVICONS_DB: &str = "favicons.sqlite";

const PROFILES_INI: &str = "profiles.ini";

/// Fixed, ordered install-layout roots under the given home directory.
///
/// Earlier entries take priority when multiple layouts coexist on one
/// machine.
pub fn profile_root_candidates(home: &Path) -> Vec<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        vec![
            home.join("Library/Application Support/Firefox"),
            home.join("Library/Containers/org.mozilla.firefox/Data/Library/Application Support/Firefox"),
        ]
    }
    #[cfg(target_os = "windows")]
    {
        vec![home.join("AppData").join("Roaming").join("Mozilla").join("Firefox")]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        vec![
            home.join(".mozilla/firefox"),
            home.join("snap/firefox/common/.mozilla/firefox"),
            home.join(".var/app/org.mozilla.firefox/.mozilla/firefox"),
        ]
    }
}

/// First existing candidate root, or `None` when Firefox is not installed.
pub fn find_profile_root(home: &Path) -> Option<PathBuf> {
    profile_root_candidates(home)
        .into_iter()
        .find(|candidate| candidate.is_dir())
}

/// Pick the profile directory named by `profiles.ini` under `root`.
///
/// A missing or unreadable manifest is an expected condition, not an error.
pub fn find_default_profile_dir(root: &Path) -> Option<PathBuf> {
    let manifest = fs::read_to_string(root.join(PROFILES_INI)).ok()?;
    manifest_profile_path(&manifest).map(|path| root.join(path))
}

/// Select a profile path from the manifest text.
///
/// Blocks are separated by blank lines; a block with a `Path=` key is a
/// profile. The first block flagged `Default=1` wins outright, otherwise the
/// first profile block in file order is used.
fn manifest_profile_path(manifest: &str) -> Option<String> {
    let normalized = manifest.replace("\r\n", "\n");
    let mut fallback: Option<String> = None;

    for block in normalized.split("\n\n") {
        let mut path: Option<&str> = None;
        let mut is_default = false;
        for line in block.lines() {
            let line = line.trim();
            if let Some(value) = line.strip_prefix("Path=") {
                path = Some(value.trim());
            } else if line == "Default=1" {
                is_default = true;
            }
        }

        let Some(path) = path.filter(|value| !value.is_empty()) else {
            continue;
        };
        if is_default {
            return Some(path.to_string());
        }
        if fallback.is_none() {
            fallback = Some(path.to_string());
        }
    }

    fallback
}

/// Resolve the primary bookmark store for this pass.
///
/// The user override is honored first (a file, or a directory assumed to
/// contain `places.sqlite`), then an explicit profile, then autodetection
/// through the candidate roots and the manifest. Every miss is a
/// `NotFound` with the path that was tried.
pub fn locate_places_db(config: &Config) -> Result<PathBuf> {
    if let Some(raw) = config.database.as_deref() {
        let resolved = paths::resolve(Some(raw), &config.home_dir)
            .ok_or_else(|| FoxmarksError::NotFound("Database override is empty".to_string()))?;
        let candidate = if resolved.is_dir() {
            resolved.join(PLACES_DB)
        } else {
            resolved
        };
        if candidate.is_file() {
            return Ok(candidate);
        }
        return Err(FoxmarksError::NotFound(format!(
            "No bookmark database at {}",
            candidate.display()
        )));
    }

    if let Some(profile) = config.profile.as_deref() {
        return places_db_for_profile(config, profile);
    }

    let root = find_profile_root(&config.home_dir)
        .ok_or_else(|| FoxmarksError::NotFound("No Firefox profile root found".to_string()))?;
    let profile_dir = find_default_profile_dir(&root).ok_or_else(|| {
        FoxmarksError::NotFound(format!(
            "No profile listed in {}",
            root.join(PROFILES_INI).display()
        ))
    })?;

    let db = profile_dir.join(PLACES_DB);
    if db.is_file() {
        Ok(db)
    } else {
        Err(FoxmarksError::NotFound(format!(
            "No bookmark database at {}",
            db.display()
        )))
    }
}

fn places_db_for_profile(config: &Config, profile: &str) -> Result<PathBuf> {
    let mut candidates = Vec::new();
    if is_path_like(profile) {
        if let Some(dir) = paths::resolve(Some(profile), &config.home_dir) {
            candidates.push(dir);
        }
    } else if let Some(root) = find_profile_root(&config.home_dir) {
        // Profile names live directly under the root on Linux and under a
        // Profiles/ subdirectory on macOS.
        candidates.push(root.join(profile));
        candidates.push(root.join("Profiles").join(profile));
    }

    for dir in &candidates {
        let db = dir.join(PLACES_DB);
        if db.is_file() {
            return Ok(db);
        }
    }
    Err(FoxmarksError::NotFound(format!(
        "No bookmark database for profile '{}'",
        profile
    )))
}

/// Favicon store sitting next to the primary store, when present.
pub fn favicons_db_beside(places: &Path) -> Option<PathBuf> {
    let path = places.with_file_name(FAVICONS_DB);
    path.is_file().then_some(path)
}

fn is_path_like(value: &str) -> bool {
    value.contains('/') || value.contains('\\') || value.starts_with('~')
}
