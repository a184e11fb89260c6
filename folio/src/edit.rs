//! Editing existing records
//!
//! An edit resolves the record, decodes it, applies field changes to the
//! frontmatter model, optionally swaps the body and rewrites the whole file.
//! Fields the caller does not supply keep their lines exactly as stored.

use crate::address::resolve;
use crate::config::ContentLayout;
use crate::error::{FolioError, Result};
use crate::frontmatter::Document;
use crate::fs_utils::FileSystem;
use crate::input::InputProvider;
use crate::normalize::parse_tag_list;
use crate::record::{RecordFields, Status};
use std::path::PathBuf;
use tracing::debug;

/// Value that clears the series or the tag list
pub const CLEAR_SENTINEL: &str = "-";

/// Field changes for one record. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordEdit {
    /// New title; a blank value keeps the current one
    pub title: Option<String>,
    /// New status; unknown values become draft with a warning
    pub status: Option<String>,
    /// New series, or `-` to remove it
    pub series: Option<String>,
    /// Comma-separated tags, or `-` to remove them all
    pub tags: Option<String>,
    /// Replacement body; ignored when blank
    pub body: Option<String>,
}

/// A record loaded for editing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRecord {
    /// Resolved record file
    pub path: PathBuf,
    /// Decoded content
    pub document: Document,
}

impl OpenRecord {
    /// Current values of the known fields
    pub fn fields(&self) -> RecordFields {
        RecordFields::from_frontmatter(&self.document.frontmatter)
    }
}

/// Result of a successful edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    /// The file that was rewritten
    pub path: PathBuf,
    /// Soft problems that were corrected along the way
    pub warnings: Vec<String>,
}

fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Resolve and decode a record.
///
/// Fails with [`FolioError::RecordNotFound`] when `input` names no record
/// and [`FolioError::MissingFrontmatter`] when the file has no metadata
/// block.
pub fn open_record(
    fs: &dyn FileSystem,
    layout: &ContentLayout,
    input: &str,
) -> Result<OpenRecord> {
    layout.ensure_content_root(fs)?;

    let path = resolve(layout, fs, input)
        .ok_or_else(|| FolioError::RecordNotFound(input.trim().to_string()))?;
    let raw = fs.read_to_string(&path)?;
    let document = Document::decode(&raw, &path)?;
    Ok(OpenRecord { path, document })
}

/// Apply `edit` to a decoded record in memory.
///
/// Returns the warnings raised. Fails with [`FolioError::MissingTitle`]
/// when the record would end up without a title; the document may already
/// be partially modified in that case, so callers discard it.
pub fn apply_edit(document: &mut Document, edit: &RecordEdit) -> Result<Vec<String>> {
    let mut warnings = Vec::new();
    let frontmatter = &mut document.frontmatter;

    match supplied(&edit.title) {
        Some(title) => frontmatter.set_quoted("title", title),
        None if frontmatter.scalar("title").trim().is_empty() => {
            return Err(FolioError::MissingTitle)
        }
        None => {}
    }

    if let Some(status) = supplied(&edit.status) {
        let (status, warning) = Status::parse_lenient(status);
        warnings.extend(warning);
        frontmatter.set_plain("status", status.as_str());
    }

    match supplied(&edit.series) {
        Some(CLEAR_SENTINEL) => frontmatter.remove("series"),
        Some(series) => frontmatter.set_plain("series", series),
        None => {}
    }

    match supplied(&edit.tags) {
        Some(CLEAR_SENTINEL) => frontmatter.set_tags(&[]),
        Some(tags) => frontmatter.set_tags(&parse_tag_list(tags)),
        None => {}
    }

    if let Some(body) = edit.body.as_deref().filter(|b| !b.trim().is_empty()) {
        let mut body = body.trim_end().to_string();
        body.push('\n');
        document.body = body;
    }

    Ok(warnings)
}

/// Resolve `input`, apply `edit` and rewrite the record file.
///
/// Nothing is written unless every step before the write succeeds.
pub fn edit_record(
    fs: &dyn FileSystem,
    layout: &ContentLayout,
    input: &str,
    edit: &RecordEdit,
) -> Result<EditOutcome> {
    let OpenRecord { path, mut document } = open_record(fs, layout, input)?;
    let warnings = apply_edit(&mut document, edit)?;

    fs.write(&path, &document.encode())?;
    debug!("Rewrote record {}", path.display());

    Ok(EditOutcome { path, warnings })
}

/// Fill the fields of `edit` the caller left out by asking `input`, with the
/// record's current values as defaults.
///
/// An answer equal to the current value leaves that field untouched, so a
/// non-interactive run changes nothing it was not told to change. The body
/// is never prompted for.
pub fn gather_record_edit(
    input: &dyn InputProvider,
    current: &RecordFields,
    edit: RecordEdit,
) -> Result<RecordEdit> {
    let ask = |given: Option<String>, question: &str, existing: &str| -> Result<Option<String>> {
        if given.is_some() {
            return Ok(given);
        }
        let answer = input.ask(question, existing)?;
        Ok(if answer.is_empty() || answer == existing.trim() {
            None
        } else {
            Some(answer)
        })
    };

    let current_status = if current.status.is_empty() {
        Status::default().as_str().to_string()
    } else {
        current.status.clone()
    };

    Ok(RecordEdit {
        title: ask(edit.title, "Title", &current.title)?,
        status: ask(
            edit.status,
            "Status (draft/review/published/archived)",
            &current_status,
        )?,
        series: ask(edit.series, "Series (optional, '-' to clear)", &current.series)?,
        tags: ask(
            edit.tags,
            "Tags (comma-separated, '-' to clear)",
            &current.tags.join(", "),
        )?,
        body: edit.body,
    })
}
