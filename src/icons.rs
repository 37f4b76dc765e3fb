//! Favicon resolution for bookmark records.
//!
//! Nothing here performs network I/O; this module only decides which icon
//! reference the presentation layer should use.

use std::fmt;

use url::Url;

use crate::bookmarks::BookmarkRecord;

/// Group key for records whose URL has no parsable host.
pub const OTHER_GROUP: &str = "Other";

/// Favicon service queried when a record carries no embedded icon.
const FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons";

/// An icon for presentation: a fetchable URL or the generic globe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconRef {
    Url(String),
    Generic,
}

impl fmt::Display for IconRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IconRef::Url(url) => write!(f, "{}", url),
            IconRef::Generic => write!(f, "globe"),
        }
    }
}

/// Host component of `url`, used as the grouping key.
pub fn domain_for(url: &str) -> Option<String> {
    Url::parse(url).ok()?.host_str().map(str::to_string)
}

/// Pick an icon for a record.
///
/// An embedded icon reference wins; records with a real domain fall back to
/// a favicon-service URL parameterized by the percent-encoded bookmark URL;
/// everything else gets the generic globe.
pub fn resolve_icon(record: &BookmarkRecord, group_key: &str) -> IconRef {
    if let Some(icon) = record.icon_url.as_deref() {
        if !icon.is_empty() {
            return IconRef::Url(icon.to_string());
        }
    }

    if group_key != OTHER_GROUP {
        if let Ok(service) = Url::parse_with_params(FAVICON_SERVICE, [("domain", record.url.as_str())]) {
            return IconRef::Url(service.to_string());
        }
    }

    IconRef::Generic
}
