//! Content addressing
//!
//! Every record lives at `{content}/{YYYY}/{MM}/{DD}/{NN}-{slug}/{record file}`.
//! The two-digit ordinal `NN` makes same-day records unique and keeps
//! directory listings in creation order. This module computes new locations
//! and resolves user input (a path, a directory or a published URL) back to
//! an existing record file.

use crate::config::ContentLayout;
use crate::error::{FolioError, Result};
use crate::fs_utils::FileSystem;
use crate::normalize::CalendarDate;
use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex::Regex;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

static ORDINAL_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new("^([0-9]{2})-").expect("valid ordinal regex"));
static DATED_PATH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^/?[0-9]{4}/[0-9]{2}/[0-9]{2}/[0-9]{2}-").expect("valid dated path regex")
});

/// Marker that introduces a record path inside a published URL
const CONTENT_MARKER: &str = "/content/";

/// Same-day sequence number, 1 to 99
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ordinal(u8);

impl Ordinal {
    /// Largest ordinal that fits the two-digit field
    pub const MAX: u32 = 99;

    /// Create an ordinal, `None` when outside `1..=99`
    pub fn new(value: u32) -> Option<Self> {
        if (1..=Self::MAX).contains(&value) {
            // in range, so the cast is lossless
            Some(Self(value as u8))
        } else {
            None
        }
    }

    /// Numeric value
    pub fn value(&self) -> u32 {
        u32::from(self.0)
    }
}

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// Ordinal prefix of a leaf directory name such as `03-my-post`
pub fn parse_ordinal_prefix(name: &str) -> Option<u32> {
    ORDINAL_PREFIX_RE
        .captures(name)
        .and_then(|caps| caps[1].parse().ok())
}

/// Directory holding every record of `date`
pub fn day_dir(layout: &ContentLayout, date: &CalendarDate) -> PathBuf {
    layout
        .content_root
        .join(date.year.to_string())
        .join(date.month_dir())
        .join(date.day_dir())
}

/// Next free ordinal in `day_dir`: one past the highest existing prefix.
///
/// Gaps left by removed directories are never reused. A missing day
/// directory yields 1.
pub fn next_ordinal(fs: &dyn FileSystem, day_dir: &Path) -> Result<Ordinal> {
    if !fs.is_dir(day_dir) {
        return Ordinal::new(1).ok_or_else(|| FolioError::OrdinalExhausted {
            day_dir: day_dir.to_path_buf(),
        });
    }

    let highest = fs
        .read_dir(day_dir)?
        .into_iter()
        .filter(|path| fs.is_dir(path))
        .filter_map(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .and_then(parse_ordinal_prefix)
        })
        .max()
        .unwrap_or(0);

    debug!("Highest ordinal in {} is {}", day_dir.display(), highest);

    Ordinal::new(highest + 1).ok_or_else(|| FolioError::OrdinalExhausted {
        day_dir: day_dir.to_path_buf(),
    })
}

/// Leaf directory for a new record
pub fn record_dir(
    layout: &ContentLayout,
    date: &CalendarDate,
    ordinal: Ordinal,
    slug: &str,
) -> PathBuf {
    day_dir(layout, date).join(format!("{ordinal}-{slug}"))
}

/// Record path named by a published URL, relative to the content root.
///
/// A `/content/` marker wins over the dated-path pattern: everything after
/// the first marker is taken as the record path. Otherwise the URL path must
/// start with `YYYY/MM/DD/NN-`.
fn relative_path_from_url(input: &str) -> Option<String> {
    let url = url::Url::parse(input).ok()?;
    let pathname = percent_decode_str(url.path()).decode_utf8().ok()?;

    let relative = if let Some((_, after)) = pathname.split_once(CONTENT_MARKER) {
        after.to_string()
    } else if DATED_PATH_RE.is_match(&pathname) {
        pathname.trim_start_matches('/').to_string()
    } else {
        return None;
    };

    let relative = relative.trim_end_matches('/');
    if relative.is_empty() {
        None
    } else {
        Some(relative.to_string())
    }
}

fn has_parent_component(path: &Path) -> bool {
    path.components().any(|c| matches!(c, Component::ParentDir))
}

/// Resolve user input to an existing record file.
///
/// Accepts, in order: an `http(s)` URL naming a record, a path relative to
/// the project root (or absolute), or a path relative to the content root.
/// A directory resolves to the record file inside it. Returns `None` when no
/// interpretation names an existing file.
pub fn resolve(layout: &ContentLayout, fs: &dyn FileSystem, input: &str) -> Option<PathBuf> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let mut candidate = PathBuf::from(input);

    if input.starts_with("http://") || input.starts_with("https://") {
        if let Some(relative) = relative_path_from_url(input) {
            let relative = PathBuf::from(relative);
            if has_parent_component(&relative) {
                debug!("Refusing URL path that leaves the content root: {}", input);
                return None;
            }
            let mut path = layout.content_root.join(relative);
            if path.file_name().and_then(|n| n.to_str()) != Some(layout.record_file_name.as_str())
            {
                path = layout.record_file(&path);
            }
            debug!("URL {} maps to {}", input, path.display());
            candidate = path;
        }
    }

    if candidate.is_relative() {
        candidate = layout.project_root.join(candidate);
    }

    if !fs.exists(&candidate) {
        let alternative = layout.content_root.join(input);
        if fs.exists(&alternative) {
            candidate = alternative;
        }
    }

    if fs.is_dir(&candidate) {
        candidate = layout.record_file(&candidate);
    }

    if fs.is_file(&candidate) {
        Some(candidate)
    } else {
        debug!("No record found for '{}'", input);
        None
    }
}
