//! Creating new records
//!
//! [`create_record`] validates a complete [`NewRecord`] and writes it to the
//! next free slot for its date. [`gather_new_record`] fills in whatever the
//! caller left out by asking an [`InputProvider`].

use crate::address::{day_dir, next_ordinal, record_dir};
use crate::config::{Config, ContentLayout};
use crate::error::{FolioError, Result};
use crate::frontmatter::{single_line, Document, Frontmatter};
use crate::fs_utils::FileSystem;
use crate::input::InputProvider;
use crate::normalize::{parse_tag_list, slugify, truncate_slug, CalendarDate};
use crate::record::Status;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Slug used when the title yields no usable characters
pub const FALLBACK_SLUG: &str = "new-article";

/// Everything needed to create a record. Empty strings mean "not given".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    /// Creation date, part of the storage path
    pub date: CalendarDate,
    /// Required title
    pub title: String,
    /// Slug override; derived from the title when empty
    pub slug: String,
    /// Status text; unknown values fall back to draft
    pub status: String,
    /// Optional summary
    pub summary: String,
    /// Optional series name
    pub series: String,
    /// Comma-separated tags
    pub tags: String,
}

impl NewRecord {
    /// Request with only the required values set
    pub fn new(date: CalendarDate, title: impl Into<String>) -> Self {
        Self {
            date,
            title: title.into(),
            slug: String::new(),
            status: String::new(),
            summary: String::new(),
            series: String::new(),
            tags: String::new(),
        }
    }
}

/// A record written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedRecord {
    /// Leaf directory `.../YYYY/MM/DD/NN-slug`
    pub dir: PathBuf,
    /// The record file inside `dir`
    pub path: PathBuf,
    /// Soft problems that were corrected along the way
    pub warnings: Vec<String>,
}

fn final_slug(request: &NewRecord, max_len: usize, warnings: &mut Vec<String>) -> String {
    let from_title = slugify(&request.title);
    let default = if from_title.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        from_title
    };

    let requested = slugify(&request.slug);
    let slug = if requested.is_empty() { default } else { requested };

    let (slug, truncated) = truncate_slug(&slug, max_len);
    if truncated {
        let warning = format!("Slug trimmed to {max_len} characters.");
        warn!("{}", warning);
        warnings.push(warning);
    }
    if slug.is_empty() {
        // a cut that removed every whole word
        return FALLBACK_SLUG.to_string();
    }
    slug
}

fn build_frontmatter(
    title: &str,
    status: Status,
    request: &NewRecord,
    tags: &[String],
) -> Frontmatter {
    let mut frontmatter = Frontmatter::default();
    frontmatter.set_quoted("title", title);
    frontmatter.set_plain("status", status.as_str());

    let series = request.series.trim();
    if !series.is_empty() {
        frontmatter.set_plain("series", series);
    }

    let summary = request.summary.trim();
    if !summary.is_empty() {
        frontmatter.set_quoted("summary", summary);
    }

    frontmatter.set_tags(tags);
    frontmatter
}

/// Create a record for `request` under the layout's content root.
///
/// All validation happens before anything touches the disk: a missing
/// title, an exhausted ordinal or an existing target directory fail without
/// writing. An unknown status becomes draft with a warning.
pub fn create_record(
    fs: &dyn FileSystem,
    config: &Config,
    layout: &ContentLayout,
    author: &str,
    request: &NewRecord,
) -> Result<CreatedRecord> {
    layout.ensure_content_root(fs)?;

    let title = single_line(request.title.trim());
    let title = title.as_str();
    if title.is_empty() {
        return Err(FolioError::MissingTitle);
    }

    let mut warnings = Vec::new();
    let slug = final_slug(request, config.max_slug_length, &mut warnings);

    let status_input = if request.status.trim().is_empty() {
        Status::default().as_str()
    } else {
        request.status.trim()
    };
    let (status, status_warning) = Status::parse_lenient(status_input);
    warnings.extend(status_warning);

    let tags = parse_tag_list(&request.tags);

    let day = day_dir(layout, &request.date);
    let ordinal = next_ordinal(fs, &day)?;
    let dir = record_dir(layout, &request.date, ordinal, &slug);
    if fs.exists(&dir) {
        return Err(FolioError::RecordExists(dir));
    }

    let document = Document::new(
        build_frontmatter(title, status, request, &tags),
        format!("# {title}\nBy {author}\n\n"),
    );

    let path = layout.record_file(&dir);
    fs.create_dir_all(&dir)?;
    fs.write(&path, &document.encode())?;
    debug!("Created record {}", path.display());

    Ok(CreatedRecord {
        dir,
        path,
        warnings,
    })
}

/// Values supplied up front, typically from command-line flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewRecordArgs {
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    /// Title
    pub title: Option<String>,
    /// Slug override
    pub slug: Option<String>,
    /// Status
    pub status: Option<String>,
    /// Summary
    pub summary: Option<String>,
    /// Series
    pub series: Option<String>,
    /// Comma-separated tags
    pub tags: Option<String>,
}

/// Attempts at a valid date before giving up in interactive mode
pub const DATE_ATTEMPTS: usize = 3;

fn gather_date(
    input: &dyn InputProvider,
    supplied: Option<&str>,
    today: CalendarDate,
) -> Result<CalendarDate> {
    let today_text = today.to_string();
    let mut answer = match supplied {
        Some(value) => value.trim().to_string(),
        None => input.ask_required("Date (YYYY-MM-DD)", &today_text)?,
    };

    let mut attempts = 1;
    loop {
        match CalendarDate::parse(&answer) {
            Ok(date) => return Ok(date),
            Err(e) if !input.is_interactive() || attempts >= DATE_ATTEMPTS => return Err(e),
            Err(e) => {
                warn!("{}", e);
                answer = input.ask_required("Date (YYYY-MM-DD)", &today_text)?;
                attempts += 1;
            }
        }
    }
}

/// Build a [`NewRecord`] from `args`, asking `input` for every value that
/// was not supplied.
///
/// The date defaults to `today`, the slug to one derived from the title and
/// the status to draft. A missing title fails with
/// [`FolioError::MissingTitle`] when no answer is available.
pub fn gather_new_record(
    input: &dyn InputProvider,
    args: &NewRecordArgs,
    today: CalendarDate,
) -> Result<NewRecord> {
    let date = gather_date(input, args.date.as_deref(), today)?;

    let title = match &args.title {
        Some(title) => title.trim().to_string(),
        None => input.ask_required("Title", "")?,
    };
    if title.is_empty() {
        return Err(FolioError::MissingTitle);
    }

    let ask = |supplied: &Option<String>, question: &str, default: &str| -> Result<String> {
        match supplied {
            Some(value) => Ok(value.trim().to_string()),
            None => input.ask(question, default),
        }
    };

    let slug_default = match slugify(&title) {
        slug if slug.is_empty() => FALLBACK_SLUG.to_string(),
        slug => slug,
    };
    let slug = ask(&args.slug, "Slug", &slug_default)?;
    let status = ask(
        &args.status,
        "Status (draft/review/published/archived)",
        Status::default().as_str(),
    )?;
    let summary = ask(&args.summary, "Summary (optional, two sentences)", "")?;
    let series = ask(&args.series, "Series (optional)", "")?;
    let tags = ask(&args.tags, "Tags (comma-separated, optional)", "")?;

    Ok(NewRecord {
        date,
        title,
        slug,
        status,
        summary,
        series,
        tags,
    })
}
