//! Output formatting and display utilities

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::bookmarks::BookmarkGroup;
use crate::config::{OutputConfig, OutputFormat};
use crate::error::Result;
use crate::icons;

/// Output writer that handles file vs stdout
pub struct OutputWriter {
    config: OutputConfig,
}

/// One group as presented, with every icon resolved.
#[derive(Serialize)]
struct GroupView<'a> {
    key: &'a str,
    bookmarks: Vec<RecordView<'a>>,
}

#[derive(Serialize)]
struct RecordView<'a> {
    id: i64,
    title: &'a str,
    url: &'a str,
    icon: String,
}

impl OutputWriter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Render the grouped result to the configured destination.
    pub fn write_groups(&self, groups: &[BookmarkGroup]) -> Result<()> {
        let rendered = match self.config.format {
            OutputFormat::Json => {
                let mut json = serde_json::to_string_pretty(&group_views(groups))?;
                json.push('\n');
                json
            }
            OutputFormat::Text => render_text(groups),
        };
        self.write(&rendered)
    }

    /// Write verbose information (if enabled)
    pub fn write_verbose(&self, message: &str) -> Result<()> {
        if self.config.verbose && !self.config.silent {
            eprintln!("* {}", message);
        }
        Ok(())
    }

    /// Write error message
    pub fn write_error(&self, message: &str) -> Result<()> {
        if !self.config.silent {
            eprintln!("foxmarks: error: {}", message);
        }
        Ok(())
    }

    fn write(&self, content: &str) -> Result<()> {
        if let Some(file_path) = &self.config.file {
            self.write_to_file(content, file_path)
        } else {
            self.write_to_stdout(content)
        }
    }

    fn write_to_file(&self, content: &str, file_path: &Path) -> Result<()> {
        let mut file = File::create(file_path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_to_stdout(&self, content: &str) -> Result<()> {
        io::stdout().write_all(content.as_bytes())?;
        Ok(())
    }
}

fn group_views(groups: &[BookmarkGroup]) -> Vec<GroupView<'_>> {
    groups
        .iter()
        .map(|group| GroupView {
            key: &group.key,
            bookmarks: group
                .bookmarks
                .iter()
                .map(|record| RecordView {
                    id: record.id,
                    title: &record.title,
                    url: &record.url,
                    icon: icons::resolve_icon(record, &group.key).to_string(),
                })
                .collect(),
        })
        .collect()
}

fn render_text(groups: &[BookmarkGroup]) -> String {
    let mut out = String::new();
    for group in groups {
        out.push_str(&group.key);
        out.push('\n');
        for record in &group.bookmarks {
            out.push_str("  ");
            out.push_str(&record.title);
            out.push_str("  ");
            out.push_str(&record.url);
            out.push('\n');
        }
    }
    out
}
