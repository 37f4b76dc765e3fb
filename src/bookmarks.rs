//! Bookmark records, aggregation, and the extraction pipeline.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::Result;
use crate::firefox;
use crate::icons;
use crate::query::{self, Attachment, RowMap};
use crate::snapshot::Snapshotter;

/// A single bookmark as presented to callers.
#[derive(Debug, Clone, Serialize)]
pub struct BookmarkRecord {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub icon_url: Option<String>,
}

/// Bookmarks sharing one registrable domain, in most-recently-added order.
#[derive(Debug, Clone, Serialize)]
pub struct BookmarkGroup {
    pub key: String,
    pub bookmarks: Vec<BookmarkRecord>,
}

/// Main interface for extracting grouped bookmarks.
pub struct BookmarkExtractor {
    config: Config,
}

impl BookmarkExtractor {
    /// Create a new extractor with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run one extraction pass: locate, snapshot, query, aggregate.
    ///
    /// Dropping the returned future cancels the pass. A cancelled pass
    /// leaves nothing behind: its snapshot directories are removed on drop
    /// and no state is shared with other passes.
    pub async fn fetch(&self) -> Result<Vec<BookmarkGroup>> {
        let places = firefox::locate_places_db(&self.config)?;
        let favicons = firefox::favicons_db_beside(&places);
        if favicons.is_none() {
            log::warn!(
                "No favicon store next to {}; bookmarks will have no embedded icons",
                places.display()
            );
        }

        let snapshotter = Snapshotter::new(&self.config.temp_root);
        let places_snapshot = snapshotter.snapshot(&places)?;
        let favicons_snapshot = match &favicons {
            Some(path) => match snapshotter.snapshot(path) {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    log::warn!("Failed to snapshot favicon store: {}", e);
                    None
                }
            },
            None => None,
        };

        let rows = match &favicons_snapshot {
            Some(snapshot) => query::query(
                places_snapshot.path(),
                &[Attachment {
                    alias: query::FAVICONS_ALIAS,
                    db_path: snapshot.path(),
                }],
                query::JOINED_BOOKMARKS_SQL,
                self.config.limit,
            )?,
            None => query::query(
                places_snapshot.path(),
                &[],
                query::UNJOINED_BOOKMARKS_SQL,
                self.config.limit,
            )?,
        };

        Ok(aggregate(rows))
    }
}

/// Fold raw query rows into domain-keyed groups.
///
/// Rows without a usable URL are dropped. Groups are built in first-seen
/// order, then the emitted sequence is sorted by key; records inside a
/// group keep the query's newest-first order.
pub fn aggregate(rows: Vec<RowMap>) -> Vec<BookmarkGroup> {
    let mut order: Vec<String> = Vec::new();
    let mut grouped: HashMap<String, Vec<BookmarkRecord>> = HashMap::new();

    for row in rows {
        let Some(record) = record_from_row(&row) else {
            continue;
        };
        let key = icons::domain_for(&record.url)
            .unwrap_or_else(|| icons::OTHER_GROUP.to_string());
        if !grouped.contains_key(&key) {
            order.push(key.clone());
        }
        grouped.entry(key).or_default().push(record);
    }

    let mut groups: Vec<BookmarkGroup> = order
        .into_iter()
        .map(|key| {
            let bookmarks = grouped.remove(&key).unwrap_or_default();
            BookmarkGroup { key, bookmarks }
        })
        .collect();
    groups.sort_by(|a, b| a.key.cmp(&b.key));
    groups
}

fn record_from_row(row: &RowMap) -> Option<BookmarkRecord> {
    let url = string_field(row, "url");
    if url.is_empty() {
        log::debug!("Discarding bookmark row without a URL");
        return None;
    }

    let id = row.get("id").and_then(Value::as_i64).unwrap_or_default();
    let title = {
        let title = string_field(row, "title");
        if title.is_empty() {
            url.clone()
        } else {
            title
        }
    };
    let icon_url = row
        .get("icon_url")
        .and_then(Value::as_str)
        .map(str::to_string)
        .filter(|icon| !icon.is_empty());

    Some(BookmarkRecord {
        id,
        title,
        url,
        icon_url,
    })
}

fn string_field(row: &RowMap, name: &str) -> String {
    row.get(name)
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}
