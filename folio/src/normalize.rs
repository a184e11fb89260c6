//! Slug, tag and date normalisation
//!
//! Pure text utilities shared by record creation, editing and the
//! frontmatter codec. Outputs of [`slugify`] and [`normalize_tag`] only ever
//! contain `[a-z0-9-]`, never start or end with a hyphen and never contain
//! two hyphens in a row.

use crate::error::{FolioError, Result};
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static QUOTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new("['\"`\u{2018}\u{2019}\u{201C}\u{201D}]").expect("valid quote regex"));
static NON_SLUG_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new("[^a-z0-9]+").expect("valid slug regex"));
static SEPARATOR_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[_\s]+").expect("valid separator regex"));
static NON_TAG_CHAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new("[^a-z0-9-]").expect("valid tag regex"));
static HYPHEN_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new("-{2,}").expect("valid hyphen regex"));
static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new("^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("valid date regex"));

/// Turn free text into a URL-safe token.
///
/// Returns an empty string for empty or all-punctuation input; callers pick
/// their own fallback.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let unquoted = QUOTE_RE.replace_all(&lowered, "");
    let hyphenated = NON_SLUG_RUN_RE.replace_all(&unquoted, "-");
    let trimmed = hyphenated.trim_matches('-');
    HYPHEN_RUN_RE.replace_all(trimmed, "-").into_owned()
}

/// Normalise a single user-supplied tag.
pub fn normalize_tag(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let hyphenated = SEPARATOR_RUN_RE.replace_all(&lowered, "-");
    let stripped = NON_TAG_CHAR_RE.replace_all(&hyphenated, "");
    let collapsed = HYPHEN_RUN_RE.replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_string()
}

/// Split comma-separated tag input into normalised, de-duplicated tags.
///
/// Order of first appearance is kept; entries that normalise to nothing are
/// dropped.
pub fn parse_tag_list(input: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in input.split(',').map(normalize_tag) {
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

/// Cap a slug at `max_len` bytes.
///
/// When the cut lands inside a word the slug is shortened back to the last
/// hyphen so only whole words survive; trailing hyphens are removed. Returns
/// the slug and whether it was shortened.
pub fn truncate_slug(slug: &str, max_len: usize) -> (String, bool) {
    if slug.len() <= max_len {
        return (slug.to_string(), false);
    }

    // slugs are ASCII, so byte offsets are char boundaries
    let mut cut = &slug[..max_len];
    let splits_word = slug.as_bytes()[max_len] != b'-';
    if splits_word {
        if let Some(idx) = cut.rfind('-') {
            cut = &cut[..idx];
        }
    }
    (cut.trim_end_matches('-').to_string(), true)
}

/// Zero-pad a numeric field to two digits
pub fn pad2(value: u32) -> String {
    format!("{value:02}")
}

/// A validated calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarDate {
    /// Four digit year
    pub year: i32,
    /// Month, 1 to 12
    pub month: u32,
    /// Day of month, 1 to 31
    pub day: u32,
}

impl CalendarDate {
    /// Parse `YYYY-MM-DD`, rejecting impossible days such as `2023-02-29`.
    ///
    /// The components are rebuilt into a real calendar date and compared
    /// back, so out-of-range values fail instead of being clamped.
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || FolioError::InvalidDate(text.to_string());
        let caps = DATE_RE.captures(text.trim()).ok_or_else(invalid)?;

        let year: i32 = caps[1].parse().map_err(|_| invalid())?;
        let month: u32 = caps[2].parse().map_err(|_| invalid())?;
        let day: u32 = caps[3].parse().map_err(|_| invalid())?;

        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;
        if date.year() != year || date.month() != month || date.day() != day {
            return Err(invalid());
        }

        Ok(Self { year, month, day })
    }

    /// The current local date
    pub fn today() -> Self {
        chrono::Local::now().date_naive().into()
    }

    /// Two-digit month directory name
    pub fn month_dir(&self) -> String {
        pad2(self.month)
    }

    /// Two-digit day directory name
    pub fn day_dir(&self) -> String {
        pad2(self.day)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

impl FromStr for CalendarDate {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}
