use foxmarks::bookmarks::BookmarkExtractor;
use foxmarks::config::Config;
use foxmarks::error::FoxmarksError;
use foxmarks::firefox::{profile_root_candidates, FAVICONS_DB, PLACES_DB};
use foxmarks::icons::{self, IconRef};
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn create_places_db(path: &Path) {
    let conn = Connection::open(path).expect("open places db");
    conn.execute(
        "CREATE TABLE moz_places (
            id INTEGER PRIMARY KEY,
            url LONGVARCHAR,
            title LONGVARCHAR
        )",
        [],
    )
    .expect("create moz_places");
    conn.execute(
        "CREATE TABLE moz_bookmarks (
            id INTEGER PRIMARY KEY,
            type INTEGER,
            fk INTEGER,
            title LONGVARCHAR,
            dateAdded INTEGER
        )",
        [],
    )
    .expect("create moz_bookmarks");

    let places: &[(i64, &str, &str)] = &[
        (1, "https://example.com/a", "Example A"),
        (2, "https://example.com/b", "Example B"),
        (3, "https://docs.rs/rusqlite", "rusqlite docs"),
    ];
    for (id, url, title) in places {
        conn.execute(
            "INSERT INTO moz_places (id, url, title) VALUES (?1, ?2, ?3)",
            (id, url, title),
        )
        .expect("insert place");
    }

    let bookmarks: &[(i64, i64, &str, i64)] = &[
        (10, 1, "Example A", 300),
        (11, 2, "Example B", 200),
        (12, 3, "rusqlite docs", 100),
    ];
    for (id, fk, title, added) in bookmarks {
        conn.execute(
            "INSERT INTO moz_bookmarks (id, type, fk, title, dateAdded)
             VALUES (?1, 1, ?2, ?3, ?4)",
            (id, fk, title, added),
        )
        .expect("insert bookmark");
    }
}

fn create_favicons_db(path: &Path) {
    let conn = Connection::open(path).expect("open favicons db");
    conn.execute(
        "CREATE TABLE moz_icons (id INTEGER PRIMARY KEY, icon_url TEXT, width INTEGER)",
        [],
    )
    .expect("create moz_icons");
    conn.execute(
        "CREATE TABLE moz_pages_w_icons (id INTEGER PRIMARY KEY, page_url TEXT)",
        [],
    )
    .expect("create moz_pages_w_icons");
    conn.execute(
        "CREATE TABLE moz_icons_to_pages (page_id INTEGER, icon_id INTEGER)",
        [],
    )
    .expect("create moz_icons_to_pages");

    conn.execute(
        "INSERT INTO moz_pages_w_icons (id, page_url) VALUES (1, 'https://example.com/a')",
        [],
    )
    .expect("insert page");
    conn.execute(
        "INSERT INTO moz_icons (id, icon_url, width) VALUES
            (1, 'https://example.com/favicon-16.png', 16),
            (2, 'https://example.com/favicon-32.png', 32)",
        [],
    )
    .expect("insert icons");
    conn.execute(
        "INSERT INTO moz_icons_to_pages (page_id, icon_id) VALUES (1, 1), (1, 2)",
        [],
    )
    .expect("link icons");
}

/// Synthetic home directory with a populated default profile.
fn create_profile_home(with_favicons: bool) -> (TempDir, Config) {
    let home = tempdir().expect("home tempdir");
    let root = profile_root_candidates(home.path())[0].clone();
    let profile_dir = root.join("abcd1234.default-release");
    fs::create_dir_all(&profile_dir).expect("create profile dir");
    fs::write(
        root.join("profiles.ini"),
        "[Profile0]\nPath=abcd1234.default-release\nDefault=1\n",
    )
    .expect("write profiles.ini");

    create_places_db(&profile_dir.join(PLACES_DB));
    if with_favicons {
        create_favicons_db(&profile_dir.join(FAVICONS_DB));
    }

    let config = Config {
        home_dir: home.path().to_path_buf(),
        temp_root: home.path().to_path_buf(),
        database: None,
        profile: None,
        limit: 500,
        output: Default::default(),
    };
    (home, config)
}

#[tokio::test]
async fn fetch_returns_sorted_groups_with_icons() {
    let (_home, config) = create_profile_home(true);

    let groups = BookmarkExtractor::new(config)
        .fetch()
        .await
        .expect("fetch bookmarks");

    let keys: Vec<&str> = groups.iter().map(|group| group.key.as_str()).collect();
    assert_eq!(keys, vec!["docs.rs", "example.com"]);

    let example = &groups[1];
    assert_eq!(example.bookmarks.len(), 2);
    // Newest first within the group.
    assert_eq!(example.bookmarks[0].url, "https://example.com/a");
    assert_eq!(
        example.bookmarks[0].icon_url.as_deref(),
        Some("https://example.com/favicon-32.png")
    );
    assert_eq!(example.bookmarks[1].icon_url, None);
}

#[tokio::test]
async fn fetch_degrades_without_a_favicon_store() {
    let (_home, config) = create_profile_home(false);

    let groups = BookmarkExtractor::new(config)
        .fetch()
        .await
        .expect("fetch bookmarks");

    for group in &groups {
        for record in &group.bookmarks {
            assert_eq!(record.icon_url, None);
            // The resolver still produces a favicon-service fallback.
            match icons::resolve_icon(record, &group.key) {
                IconRef::Url(url) => {
                    assert!(url.starts_with("https://www.google.com/s2/favicons?domain="));
                }
                IconRef::Generic => panic!("records with a domain should get a fallback URL"),
            }
        }
    }
}

#[tokio::test]
async fn fetch_honors_a_database_override_directory() {
    let data = tempdir().expect("data tempdir");
    create_places_db(&data.path().join(PLACES_DB));

    let home = tempdir().expect("home tempdir");
    let config = Config {
        home_dir: home.path().to_path_buf(),
        temp_root: home.path().to_path_buf(),
        database: Some(data.path().to_string_lossy().into_owned()),
        profile: None,
        limit: 500,
        output: Default::default(),
    };

    let groups = BookmarkExtractor::new(config)
        .fetch()
        .await
        .expect("fetch bookmarks");
    let total: usize = groups.iter().map(|group| group.bookmarks.len()).sum();
    assert_eq!(total, 3);
}

#[tokio::test]
async fn fetch_without_any_profile_is_not_found() {
    let home = tempdir().expect("home tempdir");
    let config = Config {
        home_dir: home.path().to_path_buf(),
        temp_root: home.path().to_path_buf(),
        database: None,
        profile: None,
        limit: 500,
        output: Default::default(),
    };

    let err = BookmarkExtractor::new(config)
        .fetch()
        .await
        .expect_err("no profile anywhere");
    assert!(matches!(err, FoxmarksError::NotFound(_)));
}

#[tokio::test]
async fn fetch_leaves_no_snapshot_directories_behind() {
    let (_home, mut config) = create_profile_home(true);
    let temp_root = tempdir().expect("temp root");
    config.temp_root = temp_root.path().to_path_buf();

    BookmarkExtractor::new(config)
        .fetch()
        .await
        .expect("fetch bookmarks");

    let leftovers: Vec<_> = fs::read_dir(temp_root.path())
        .expect("read temp root")
        .collect();
    assert!(leftovers.is_empty(), "snapshots should be cleaned up");
}
