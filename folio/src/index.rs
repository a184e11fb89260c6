//! Collection index and search
//!
//! Every search walks the record tree again and builds a fresh list of
//! [`IndexEntry`] summaries, so results always reflect what is on disk.
//! Records that cannot be read or decoded still appear, with empty fields.

use crate::config::ContentLayout;
use crate::frontmatter::Document;
use crate::fs_utils::FileSystem;
use crate::record::RecordFields;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Summary of one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    /// Fields as stored
    #[serde(flatten)]
    pub fields: RecordFields,
    /// Record file relative to the project root, `/`-separated
    pub path: String,
    /// Absolute record file
    #[serde(skip)]
    pub file: PathBuf,
}

impl IndexEntry {
    /// Lowercase haystack for substring search: title, summary, series,
    /// tags and path separated by spaces
    pub fn search_text(&self) -> String {
        let tags = self.fields.tags.join(" ");
        [
            self.fields.title.as_str(),
            self.fields.summary.as_str(),
            self.fields.series.as_str(),
            tags.as_str(),
            self.path.as_str(),
        ]
        .join(" ")
        .to_lowercase()
    }
}

/// What to look for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Substring to find, case-insensitive
    pub text: String,
    /// Exact status to require, case-insensitive
    pub status: Option<String>,
    /// Maximum entries to return; zero means no limit
    pub limit: usize,
}

impl SearchQuery {
    /// Unfiltered, unlimited query for `text`
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    fn status_filter(&self) -> Option<String> {
        self.status
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
    }

    fn matches(&self, needle: &str, status: Option<&str>, entry: &IndexEntry) -> bool {
        if let Some(status) = status {
            if entry.fields.status.to_lowercase() != status {
                return false;
            }
        }
        entry.search_text().contains(needle)
    }
}

/// Search outcome
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    /// Matches before the limit was applied
    pub total: usize,
    /// Matches after the limit, newest path first
    pub entries: Vec<IndexEntry>,
}

fn read_fields(fs: &dyn FileSystem, file: &Path) -> RecordFields {
    let bytes = match fs.read(file) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(
                "Listing unreadable record {} without fields: {}",
                file.display(),
                e
            );
            return RecordFields::default();
        }
    };

    // invalid UTF-8 is replaced rather than dropping the record
    let raw = String::from_utf8_lossy(&bytes);
    match Document::parse(&raw) {
        Some(document) => RecordFields::from_frontmatter(&document.frontmatter),
        None => {
            debug!("No frontmatter in {}", file.display());
            RecordFields::default()
        }
    }
}

/// Collect every record under `root`, skipping hidden files and
/// directories. A missing root yields nothing.
pub fn scan(fs: &dyn FileSystem, layout: &ContentLayout, root: &Path) -> Vec<IndexEntry> {
    if !fs.is_dir(root) {
        debug!("Search root {} does not exist", root.display());
        return Vec::new();
    }

    let files = match fs.walk_files(root) {
        Ok(files) => files,
        Err(e) => {
            warn!("Could not scan {}: {}", root.display(), e);
            return Vec::new();
        }
    };

    files
        .into_iter()
        .filter(|file| {
            file.file_name()
                .is_some_and(|name| name == layout.record_file_name.as_str())
        })
        .map(|file| IndexEntry {
            fields: read_fields(fs, &file),
            path: layout.relative_path(&file),
            file,
        })
        .collect()
}

/// Search the layout's search root.
///
/// Matches are ordered by relative path, descending, so the newest dated
/// records come first. An empty result is not an error.
pub fn search(
    fs: &dyn FileSystem,
    layout: &ContentLayout,
    query: &SearchQuery,
) -> SearchResults {
    let root = layout.search_root(fs);
    let needle = query.text.trim().to_lowercase();
    let status = query.status_filter();

    let mut matches: Vec<IndexEntry> = scan(fs, layout, root)
        .into_iter()
        .filter(|entry| query.matches(&needle, status.as_deref(), entry))
        .collect();
    matches.sort_by(|a, b| b.path.cmp(&a.path));

    let total = matches.len();
    if query.limit > 0 {
        matches.truncate(query.limit);
    }
    debug!(
        "Search for '{}' under {} matched {} record(s)",
        needle,
        root.display(),
        total
    );

    SearchResults {
        total,
        entries: matches,
    }
}
