//! Read-only queries against snapshot databases.
//!
//! The engine opens a snapshot read-only, attaches any secondary snapshots
//! under fixed aliases for cross-database joins, and hands rows back as
//! generic column-name to JSON-value maps for the aggregation layer.

use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use serde_json::{Map, Value};

use crate::error::{FoxmarksError, Result};

/// Upper bound on rows returned by the bookmark queries, bounding memory and
/// presentation cost.
pub const MAX_BOOKMARK_ROWS: usize = 500;

/// Alias under which the favicon store is attached.
pub const FAVICONS_ALIAS: &str = "favicons";

/// A row keyed by column name.
pub type RowMap = Map<String, Value>;

/// A secondary database attached under an alias for cross-database joins.
///
/// Aliases are fixed identifiers supplied by this crate; the path is bound
/// as a statement parameter, never spliced into SQL.
#[derive(Debug, Clone, Copy)]
pub struct Attachment<'a> {
    pub alias: &'static str,
    pub db_path: &'a Path,
}

/// Bookmark query joined against the attached favicon store.
///
/// Title resolution prefers the explicit bookmark title, then the page
/// title, then the raw URL. The correlated sub-query picks the widest icon
/// recorded for the page. Only bookmark-type records with an HTTP(S) URL
/// survive, newest first.
pub const JOINED_BOOKMARKS_SQL: &str = "\
SELECT b.id AS id,
       CASE
           WHEN TRIM(IFNULL(b.title, '')) <> '' THEN TRIM(b.title)
           WHEN TRIM(IFNULL(p.title, '')) <> '' THEN TRIM(p.title)
           ELSE p.url
       END AS title,
       p.url AS url,
       (
           SELECT i.icon_url
           FROM favicons.moz_icons i
           JOIN favicons.moz_icons_to_pages ip ON ip.icon_id = i.id
           JOIN favicons.moz_pages_w_icons pg ON pg.id = ip.page_id
           WHERE pg.page_url = p.url
           ORDER BY i.width DESC
           LIMIT 1
       ) AS icon_url
FROM moz_bookmarks b
JOIN moz_places p ON p.id = b.fk
WHERE b.type = 1
  AND (p.url LIKE 'http://%' OR p.url LIKE 'https://%')
ORDER BY b.dateAdded DESC
LIMIT ?1";

/// Same selection without the favicon store; icons come back null.
pub const UNJOINED_BOOKMARKS_SQL: &str = "\
SELECT b.id AS id,
       CASE
           WHEN TRIM(IFNULL(b.title, '')) <> '' THEN TRIM(b.title)
           WHEN TRIM(IFNULL(p.title, '')) <> '' THEN TRIM(p.title)
           ELSE p.url
       END AS title,
       p.url AS url,
       NULL AS icon_url
FROM moz_bookmarks b
JOIN moz_places p ON p.id = b.fk
WHERE b.type = 1
  AND (p.url LIKE 'http://%' OR p.url LIKE 'https://%')
ORDER BY b.dateAdded DESC
LIMIT ?1";

/// Run a parameterized read-only query against a snapshot database.
///
/// Attachments are bound in caller order before the query executes. An
/// empty result set is normal; any SQLite failure surfaces as a `Query`
/// error carrying the underlying diagnostic, with no partial rows.
pub fn query(
    primary: &Path,
    attachments: &[Attachment<'_>],
    sql: &str,
    limit: usize,
) -> Result<Vec<RowMap>> {
    let conn = Connection::open_with_flags(
        primary,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_URI,
    )
    .map_err(|e| {
        FoxmarksError::Query(format!("Failed to open snapshot {}: {}", primary.display(), e))
    })?;

    for attachment in attachments {
        let statement = format!("ATTACH DATABASE ?1 AS {}", attachment.alias);
        conn.execute(&statement, [attachment.db_path.to_string_lossy().into_owned()])
            .map_err(|e| {
                FoxmarksError::Query(format!(
                    "Failed to attach {} as {}: {}",
                    attachment.db_path.display(),
                    attachment.alias,
                    e
                ))
            })?;
    }

    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| FoxmarksError::Query(format!("Failed to prepare bookmark query: {}", e)))?;
    let column_names: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();

    let mut rows = stmt
        .query([limit as i64])
        .map_err(|e| FoxmarksError::Query(format!("Failed to run bookmark query: {}", e)))?;

    let mut out = Vec::new();
    while let Some(row) = rows
        .next()
        .map_err(|e| FoxmarksError::Query(format!("Failed to read bookmark row: {}", e)))?
    {
        let mut map = RowMap::new();
        for (idx, name) in column_names.iter().enumerate() {
            let value = row.get_ref(idx).map_err(|e| {
                FoxmarksError::Query(format!("Failed to read column {}: {}", name, e))
            })?;
            map.insert(name.clone(), value_ref_to_json(value));
        }
        out.push(map);
    }

    Ok(out)
}

fn value_ref_to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Value::from(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}
