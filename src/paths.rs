//! Path shorthand expansion.
//!
//! User-supplied paths may carry shell-style shorthand: a `~` home prefix,
//! literal `$HOME`/`${HOME}` tokens, or a layer of quoting pasted in from a
//! shell. This module turns such input into a plain path. It is a pure
//! string transform; existence checks belong to the callers.

use std::path::{Path, PathBuf};

/// Expand path shorthand against an explicit home directory.
///
/// Returns `None` for absent, empty, or whitespace-only input. Only the home
/// directory is substituted; other environment variables and nested
/// expansion are out of scope.
pub fn resolve(raw: Option<&str>, home: &Path) -> Option<PathBuf> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }

    let unquoted = strip_quotes(trimmed);
    if unquoted.is_empty() {
        return None;
    }

    if unquoted == "~" {
        return Some(home.to_path_buf());
    }
    if let Some(rest) = unquoted.strip_prefix("~/") {
        return Some(home.join(rest));
    }

    if unquoted.contains("${HOME}") || unquoted.contains("$HOME") {
        let home_str = home.to_string_lossy();
        let replaced = unquoted
            .replace("${HOME}", &home_str)
            .replace("$HOME", &home_str);
        return Some(PathBuf::from(replaced));
    }

    Some(PathBuf::from(unquoted))
}

/// Strip one layer of surrounding matching quotes (`"..."` or `'...'`).
fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}
